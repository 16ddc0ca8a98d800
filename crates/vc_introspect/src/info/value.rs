use alloc::boxed::Box;
use core::any::{Any, TypeId};
use core::fmt;

// -----------------------------------------------------------------------------
// PropertyValue

/// A value read from a property.
///
/// Fields are borrowed straight out of the target; getters produce an
/// owned value.
pub enum PropertyValue<'a> {
    /// Borrowed from the target through a field.
    Borrowed(&'a dyn Any),
    /// Returned by a getter.
    Owned(Box<dyn Any>),
}

impl PropertyValue<'_> {
    /// Returns the value as `&dyn Any`.
    #[inline]
    pub fn as_any(&self) -> &dyn Any {
        match self {
            Self::Borrowed(value) => *value,
            Self::Owned(value) => &**value,
        }
    }

    /// Returns the [`TypeId`] of the value itself.
    #[inline]
    pub fn value_type_id(&self) -> TypeId {
        self.as_any().type_id()
    }

    /// Returns `true` if the value is a `T`.
    #[inline]
    pub fn is<T: Any>(&self) -> bool {
        self.as_any().is::<T>()
    }

    /// Returns the value as a `&T`, if it is one.
    #[inline]
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }

    /// Returns `true` if the value was produced by a getter.
    #[inline]
    pub const fn is_owned(&self) -> bool {
        matches!(self, Self::Owned(_))
    }
}

impl fmt::Debug for PropertyValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Borrowed(_) => f.write_str("PropertyValue::Borrowed(..)"),
            Self::Owned(_) => f.write_str("PropertyValue::Owned(..)"),
        }
    }
}
