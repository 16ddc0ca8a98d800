use alloc::boxed::Box;
use alloc::string::ToString;
use core::any::Any;
use core::fmt;

use crate::AccessError;
use crate::error::Mismatch;
use crate::info::{Modifiers, Type};

// -----------------------------------------------------------------------------
// Erased access

// Also used by `TypeDescriptor` to project a child value onto its parent.
pub(crate) trait ErasedField: Send + Sync {
    fn get<'a>(&self, target: &'a dyn Any) -> Option<&'a dyn Any>;

    fn get_mut<'a>(&self, target: &'a mut dyn Any) -> Option<&'a mut dyn Any>;

    fn set(&self, target: &mut dyn Any, value: Box<dyn Any>) -> Result<(), Mismatch>;
}

pub(crate) struct FieldAccessor<T, F> {
    pub get: fn(&T) -> &F,
    pub get_mut: fn(&mut T) -> &mut F,
}

impl<T: Any, F: Any> ErasedField for FieldAccessor<T, F> {
    #[inline]
    fn get<'a>(&self, target: &'a dyn Any) -> Option<&'a dyn Any> {
        let target = target.downcast_ref::<T>()?;
        Some((self.get)(target))
    }

    #[inline]
    fn get_mut<'a>(&self, target: &'a mut dyn Any) -> Option<&'a mut dyn Any> {
        let target = target.downcast_mut::<T>()?;
        Some((self.get_mut)(target))
    }

    fn set(&self, target: &mut dyn Any, value: Box<dyn Any>) -> Result<(), Mismatch> {
        let target = target.downcast_mut::<T>().ok_or(Mismatch::Target)?;
        let value = value.downcast::<F>().map_err(|_| Mismatch::Value)?;
        *(self.get_mut)(target) = *value;
        Ok(())
    }
}

// -----------------------------------------------------------------------------
// FieldDescriptor

/// A field declared directly on a type.
///
/// A field built with [`new`](Self::new) carries a projection pair and can
/// be read and written through a `dyn Any` target. A field built with
/// [`opaque`](Self::opaque) is only declared: it still takes part in
/// discovery, but every access fails.
///
/// # Examples
///
/// ```
/// use vc_introspect::info::FieldDescriptor;
///
/// struct Counter {
///     count: u32,
/// }
///
/// let field = FieldDescriptor::new::<Counter, u32>("count", |c| &c.count, |c| &mut c.count);
///
/// let mut counter = Counter { count: 1 };
/// field.set(&mut counter, Box::new(5_u32)).unwrap();
///
/// let value = field.get(&counter).unwrap();
/// assert_eq!(value.downcast_ref::<u32>(), Some(&5));
/// ```
pub struct FieldDescriptor {
    name: &'static str,
    ty: Type,
    owner: Type,
    modifiers: Modifiers,
    access: Option<Box<dyn ErasedField>>,
}

impl FieldDescriptor {
    /// Creates an accessible field of type `F` declared on `T`.
    pub fn new<T: Any, F: Any>(
        name: &'static str,
        get: fn(&T) -> &F,
        get_mut: fn(&mut T) -> &mut F,
    ) -> Self {
        Self {
            name,
            ty: Type::of::<F>(),
            owner: Type::of::<T>(),
            modifiers: Modifiers::empty(),
            access: Some(Box::new(FieldAccessor { get, get_mut })),
        }
    }

    /// Creates a declared field of type `F` on `T` without an access handle.
    pub fn opaque<T: Any, F: Any>(name: &'static str) -> Self {
        Self {
            name,
            ty: Type::of::<F>(),
            owner: Type::of::<T>(),
            modifiers: Modifiers::empty(),
            access: None,
        }
    }

    /// Replaces the modifiers.
    #[inline]
    pub fn with_modifiers(self, modifiers: Modifiers) -> Self {
        Self { modifiers, ..self }
    }

    /// Returns the declared field name.
    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the field's type.
    #[inline]
    pub const fn ty(&self) -> Type {
        self.ty
    }

    /// Returns the declaring type.
    #[inline]
    pub const fn owner(&self) -> Type {
        self.owner
    }

    /// Returns the modifiers.
    #[inline]
    pub const fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    /// Returns `true` for a [`Modifiers::STATIC`] field.
    #[inline]
    pub const fn is_static(&self) -> bool {
        self.modifiers.contains(Modifiers::STATIC)
    }

    /// Returns `true` if the field carries an access handle.
    #[inline]
    pub fn is_accessible(&self) -> bool {
        self.access.is_some()
    }

    /// Borrows the field out of `target`.
    pub fn get<'a>(&self, target: &'a dyn Any) -> Result<&'a dyn Any, AccessError> {
        let access = self
            .access
            .as_deref()
            .ok_or(AccessError::NotInvocable(self.name))?;
        access.get(target).ok_or_else(|| self.target_mismatch())
    }

    /// Mutably borrows the field out of `target`.
    pub fn get_mut<'a>(&self, target: &'a mut dyn Any) -> Result<&'a mut dyn Any, AccessError> {
        let access = self
            .access
            .as_deref()
            .ok_or(AccessError::NotInvocable(self.name))?;
        access.get_mut(target).ok_or_else(|| self.target_mismatch())
    }

    /// Assigns `value` to the field of `target`.
    ///
    /// `value` must hold exactly the field's type.
    pub fn set(&self, target: &mut dyn Any, value: Box<dyn Any>) -> Result<(), AccessError> {
        let access = self
            .access
            .as_deref()
            .ok_or(AccessError::NotInvocable(self.name))?;
        access.set(target, value).map_err(|mismatch| match mismatch {
            Mismatch::Target => self.target_mismatch(),
            Mismatch::Value => AccessError::ValueMismatch {
                member: self.name.to_string(),
            },
        })
    }

    #[inline]
    fn target_mismatch(&self) -> AccessError {
        AccessError::TargetMismatch {
            member: self.name,
            expected: self.owner.path(),
        }
    }
}

impl fmt::Debug for FieldDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldDescriptor")
            .field("name", &self.name)
            .field("ty", &self.ty)
            .field("modifiers", &self.modifiers)
            .field("accessible", &self.is_accessible())
            .finish()
    }
}
