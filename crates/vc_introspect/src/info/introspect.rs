use std::sync::OnceLock;

use core::any::Any;

use crate::info::TypeDescriptor;

// -----------------------------------------------------------------------------
// Introspect

/// A static accessor to a type's [`TypeDescriptor`].
///
/// The descriptor is built once and kept in a `static` [`DescriptorCell`]:
///
/// ```
/// use vc_introspect::info::{DescriptorCell, FieldDescriptor, Introspect, TypeDescriptor};
///
/// struct Point {
///     x: i32,
///     y: i32,
/// }
///
/// impl Introspect for Point {
///     fn type_descriptor() -> &'static TypeDescriptor {
///         static CELL: DescriptorCell = DescriptorCell::new();
///         CELL.get_or_init(|| {
///             TypeDescriptor::builder::<Self>()
///                 .field(FieldDescriptor::new::<Self, i32>("x", |p| &p.x, |p| &mut p.x))
///                 .field(FieldDescriptor::new::<Self, i32>("y", |p| &p.y, |p| &mut p.y))
///                 .build()
///         })
///     }
/// }
///
/// assert_eq!(Point::type_descriptor().fields().len(), 2);
/// ```
///
/// Generic types would share one `static` between all instantiations, so
/// only non-generic types can use a plain cell.
pub trait Introspect: Any {
    /// Returns the descriptor of `Self`.
    fn type_descriptor() -> &'static TypeDescriptor;
}

// -----------------------------------------------------------------------------
// DynamicIntrospect

/// Dynamic dispatch for types that implement [`Introspect`].
///
/// Auto impl for all types that implemented [`Introspect`].
pub trait DynamicIntrospect: Any {
    /// Returns the descriptor of the value's concrete type.
    fn introspect_descriptor(&self) -> &'static TypeDescriptor;
}

impl<T: Introspect> DynamicIntrospect for T {
    #[inline]
    fn introspect_descriptor(&self) -> &'static TypeDescriptor {
        T::type_descriptor()
    }
}

// -----------------------------------------------------------------------------
// DescriptorCell

/// Static storage of a non-generic type's [`TypeDescriptor`].
///
/// Internally an [`OnceLock`]; see [`Introspect`] for usage.
pub struct DescriptorCell(OnceLock<TypeDescriptor>);

impl DescriptorCell {
    /// Creates an empty cell.
    #[inline]
    pub const fn new() -> Self {
        Self(OnceLock::new())
    }

    /// Returns the stored descriptor, building it with `f` on first access.
    #[inline]
    pub fn get_or_init<F>(&self, f: F) -> &TypeDescriptor
    where
        F: FnOnce() -> TypeDescriptor,
    {
        self.0.get_or_init(f)
    }
}
