//! Property discovery.
//!
//! ## Menu
//!
//! - [`normalize`] / [`classify_accessor`]: accessor method names to property names.
//! - [`PropertyDescriptor`]: one property and the members backing it.
//! - [`TypeAnalyzer`]: the properties of one type, linked to its parent's analyzer.
//! - [`PropertyOrder`]: natural or declared ordering of merged properties.
//! - [`AnalysisCache`]: per-context memo of analyzers; [`SharedAnalysisCache`] for shared use.
//!
//! ## Discovery rules
//!
//! For each type, only members declared directly on it are scanned:
//!
//! 1. Every non-static field is a property named after the field.
//! 2. Every non-static method shaped like `getX()`, `isX()` or `setX(v)`
//!    adds a reader or writer to property `x`, see [`classify_accessor`].
//! 3. Entries left with no field, reader or writer are dropped.
//!
//! The parent type is analyzed first, and merged lookups prefer the type's
//! own properties over those of its ancestors.

// -----------------------------------------------------------------------------
// Modules

mod analyzer;
mod cache;
mod naming;
mod order;
mod property;

// -----------------------------------------------------------------------------
// Exports

pub use analyzer::TypeAnalyzer;
pub use cache::{AnalysisCache, SharedAnalysisCache};
pub use naming::{Accessor, classify_accessor, normalize};
pub use order::PropertyOrder;
pub use property::PropertyDescriptor;
