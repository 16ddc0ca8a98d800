//! Name-based lookup of type descriptors.
//!
//! Analysis starts from a descriptor. A deserializer usually starts from a
//! type name instead; [`DescriptorRegistry`] maps one to the other.

// -----------------------------------------------------------------------------
// Modules

mod descriptor_registry;

// -----------------------------------------------------------------------------
// Exports

pub use descriptor_registry::DescriptorRegistry;
