//! Declared structure of a type.
//!
//! Rust has no runtime reflection, so a type describes itself: its author
//! fills a [`TypeDescriptor`] with the fields and methods the type declares
//! and stores it in a [`DescriptorCell`] behind [`Introspect`].
//!
//! ## Menu
//!
//! - [`Type`]: `TypeId` plus type path.
//! - [`Modifiers`]: `PUBLIC`, `STATIC` flags of a member.
//! - [`FieldDescriptor`]: a declared field and its optional access handle.
//! - [`MethodDescriptor`]: a declared method; getter, setter or opaque.
//! - [`TypeDescriptor`]: all of the above plus parent link and declared property order.
//! - [`Introspect`] / [`DynamicIntrospect`]: static and dynamic access to a descriptor.
//! - [`PropertyValue`]: a value read through a field or a getter.

// -----------------------------------------------------------------------------
// Modules

mod descriptor;
mod field;
mod introspect;
mod method;
mod modifiers;
mod ty;
mod value;

// -----------------------------------------------------------------------------
// Exports

pub use descriptor::{TypeDescriptor, TypeDescriptorBuilder};
pub use field::FieldDescriptor;
pub(crate) use field::{ErasedField, FieldAccessor};
pub use introspect::{DescriptorCell, DynamicIntrospect, Introspect};
pub use method::{MethodDescriptor, MethodKind};
pub use modifiers::Modifiers;
pub use ty::Type;
pub use value::PropertyValue;
