use alloc::boxed::Box;
use alloc::string::ToString;
use alloc::vec::Vec;
use core::any::{Any, TypeId};
use core::fmt;

use crate::AccessError;
use crate::error::Mismatch;
use crate::info::{Modifiers, Type};

// -----------------------------------------------------------------------------
// Erased handles

trait ErasedGetter: Send + Sync {
    fn call(&self, target: &dyn Any) -> Option<Box<dyn Any>>;
}

trait ErasedSetter: Send + Sync {
    fn call(&self, target: &mut dyn Any, value: Box<dyn Any>) -> Result<(), Mismatch>;
}

struct Getter<T, R> {
    f: fn(&T) -> R,
}

struct Setter<T, V> {
    f: fn(&mut T, V),
}

impl<T: Any, R: Any> ErasedGetter for Getter<T, R> {
    #[inline]
    fn call(&self, target: &dyn Any) -> Option<Box<dyn Any>> {
        let target = target.downcast_ref::<T>()?;
        Some(Box::new((self.f)(target)))
    }
}

impl<T: Any, V: Any> ErasedSetter for Setter<T, V> {
    fn call(&self, target: &mut dyn Any, value: Box<dyn Any>) -> Result<(), Mismatch> {
        let target = target.downcast_mut::<T>().ok_or(Mismatch::Target)?;
        let value = value.downcast::<V>().map_err(|_| Mismatch::Value)?;
        (self.f)(target, *value);
        Ok(())
    }
}

enum Handle {
    Getter(Box<dyn ErasedGetter>),
    Setter(Box<dyn ErasedSetter>),
    Opaque,
}

// -----------------------------------------------------------------------------
// MethodKind

/// What a [`MethodDescriptor`] can be invoked as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MethodKind {
    /// `fn(&T) -> R`.
    Getter,
    /// `fn(&mut T, V)`.
    Setter,
    /// Declared only; not invocable.
    Opaque,
}

// -----------------------------------------------------------------------------
// MethodDescriptor

/// A method declared directly on a type.
///
/// Discovery only looks at the name, the parameter count and the modifiers.
/// The handle decides what the method can do once it has been picked as a
/// property accessor.
///
/// # Examples
///
/// ```
/// use vc_introspect::info::{MethodDescriptor, MethodKind};
///
/// struct Lamp {
///     lit: bool,
/// }
///
/// let is_lit = MethodDescriptor::getter::<Lamp, bool>("isLit", |l| l.lit);
/// let set_lit = MethodDescriptor::setter::<Lamp, bool>("setLit", |l, v| l.lit = v);
///
/// assert_eq!(is_lit.param_count(), 0);
/// assert_eq!(set_lit.param_count(), 1);
/// assert_eq!(set_lit.kind(), MethodKind::Setter);
///
/// let mut lamp = Lamp { lit: false };
/// set_lit.invoke_set(&mut lamp, Box::new(true)).unwrap();
/// let value = is_lit.invoke_get(&lamp).unwrap();
/// assert_eq!(value.downcast_ref::<bool>(), Some(&true));
/// ```
pub struct MethodDescriptor {
    name: &'static str,
    owner: Type,
    modifiers: Modifiers,
    params: Box<[Type]>,
    returns: Option<Type>,
    handle: Handle,
}

impl MethodDescriptor {
    /// Creates a zero-parameter method of `T` returning `R`.
    pub fn getter<T: Any, R: Any>(name: &'static str, f: fn(&T) -> R) -> Self {
        Self {
            name,
            owner: Type::of::<T>(),
            modifiers: Modifiers::PUBLIC,
            params: Box::new([]),
            returns: Some(Type::of::<R>()),
            handle: Handle::Getter(Box::new(Getter { f })),
        }
    }

    /// Creates a one-parameter method of `T` taking `V`.
    pub fn setter<T: Any, V: Any>(name: &'static str, f: fn(&mut T, V)) -> Self {
        Self {
            name,
            owner: Type::of::<T>(),
            modifiers: Modifiers::PUBLIC,
            params: Box::new([Type::of::<V>()]),
            returns: None,
            handle: Handle::Setter(Box::new(Setter { f })),
        }
    }

    /// Creates a declared method of `T` that cannot be invoked.
    pub fn opaque<T: Any>(name: &'static str, params: &[Type], returns: Option<Type>) -> Self {
        Self {
            name,
            owner: Type::of::<T>(),
            modifiers: Modifiers::PUBLIC,
            params: params.iter().copied().collect::<Vec<_>>().into_boxed_slice(),
            returns,
            handle: Handle::Opaque,
        }
    }

    /// Replaces the modifiers. Methods start out [`Modifiers::PUBLIC`].
    #[inline]
    pub fn with_modifiers(self, modifiers: Modifiers) -> Self {
        Self { modifiers, ..self }
    }

    /// Returns the declared method name.
    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
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

    /// Returns `true` for a [`Modifiers::STATIC`] method.
    #[inline]
    pub const fn is_static(&self) -> bool {
        self.modifiers.contains(Modifiers::STATIC)
    }

    /// Returns the parameter types, receiver excluded.
    #[inline]
    pub fn params(&self) -> &[Type] {
        &self.params
    }

    /// Returns the number of parameters, receiver excluded.
    #[inline]
    pub fn param_count(&self) -> usize {
        self.params.len()
    }

    /// Returns the return type, `None` for unit.
    #[inline]
    pub const fn returns(&self) -> Option<Type> {
        self.returns
    }

    /// Returns how the method can be invoked.
    pub const fn kind(&self) -> MethodKind {
        match self.handle {
            Handle::Getter(_) => MethodKind::Getter,
            Handle::Setter(_) => MethodKind::Setter,
            Handle::Opaque => MethodKind::Opaque,
        }
    }

    /// Returns `true` if this is a setter whose only parameter has `type_id`.
    pub fn accepts(&self, type_id: TypeId) -> bool {
        matches!(self.handle, Handle::Setter(_))
            && matches!(&*self.params, [param] if param.id() == type_id)
    }

    /// Calls a getter on `target`.
    pub fn invoke_get(&self, target: &dyn Any) -> Result<Box<dyn Any>, AccessError> {
        let Handle::Getter(getter) = &self.handle else {
            return Err(AccessError::NotInvocable(self.name));
        };
        getter.call(target).ok_or_else(|| self.target_mismatch())
    }

    /// Calls a setter on `target` with `value`.
    pub fn invoke_set(&self, target: &mut dyn Any, value: Box<dyn Any>) -> Result<(), AccessError> {
        let Handle::Setter(setter) = &self.handle else {
            return Err(AccessError::NotInvocable(self.name));
        };
        setter.call(target, value).map_err(|mismatch| match mismatch {
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

impl fmt::Debug for MethodDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MethodDescriptor")
            .field("name", &self.name)
            .field("kind", &self.kind())
            .field("modifiers", &self.modifiers)
            .field("params", &self.params)
            .field("returns", &self.returns)
            .finish()
    }
}

// -----------------------------------------------------------------------------
// Tests
