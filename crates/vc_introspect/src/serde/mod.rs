//! [`serde_core::Serialize`] for analysis results.
//!
//! Only metadata is serialized: names, declaring types and accessor names.
//! Property *values* are never read.
//!
//! - [`PropertyDescriptor`] becomes a `Property` struct with the fields
//!   `name`, `declaring_type`, `field`, `read_method`, `write_methods`,
//!   `readable` and `writable`.
//! - [`TypeAnalyzer`] becomes an `Analysis` struct with the fields `type`,
//!   `parent` and `properties`, the latter in
//!   [`properties`](TypeAnalyzer::properties) order.
//!
//! [`PropertyDescriptor`]: crate::analysis::PropertyDescriptor
//! [`TypeAnalyzer`]: crate::analysis::TypeAnalyzer

// -----------------------------------------------------------------------------
// Modules

mod metadata;
