use alloc::boxed::Box;
use alloc::vec::Vec;
use core::any::{Any, TypeId};
use core::fmt;
use core::marker::PhantomData;

use crate::AccessError;
use crate::info::{ErasedField, FieldAccessor};
use crate::info::{FieldDescriptor, Introspect, MethodDescriptor, Type};

// -----------------------------------------------------------------------------
// ParentLink

struct ParentLink {
    descriptor: fn() -> &'static TypeDescriptor,
    // Projection from a value of the child onto its embedded parent value.
    upcast: Option<Box<dyn ErasedField>>,
}

// -----------------------------------------------------------------------------
// TypeDescriptor

/// Everything a type declares directly: fields, methods, the link to its
/// parent type and an optional property order.
///
/// Members inherited from the parent are *not* repeated here; the analysis
/// walks the parent link instead. A descriptor without a parent is the root
/// of its chain.
///
/// Rust models inheritance by embedding, so a parent link usually carries an
/// *upcast*: the projection from a child value onto the embedded parent
/// value. Inherited properties are read and written through it.
///
/// Built with [`TypeDescriptor::builder`], usually inside
/// [`Introspect::type_descriptor`].
pub struct TypeDescriptor {
    ty: Type,
    parent: Option<ParentLink>,
    fields: Box<[FieldDescriptor]>,
    methods: Box<[MethodDescriptor]>,
    property_order: Option<Box<[&'static str]>>,
}

impl TypeDescriptor {
    /// Starts a descriptor for `T`.
    #[inline]
    pub fn builder<T: Any>() -> TypeDescriptorBuilder<T> {
        TypeDescriptorBuilder {
            ty: Type::of::<T>(),
            parent: None,
            fields: Vec::new(),
            methods: Vec::new(),
            property_order: None,
            _marker: PhantomData,
        }
    }

    /// Returns the described type.
    #[inline]
    pub const fn ty(&self) -> Type {
        self.ty
    }

    /// Returns the [`TypeId`] of the described type.
    #[inline]
    pub const fn type_id(&self) -> TypeId {
        self.ty.id()
    }

    /// Returns the full type path.
    #[inline]
    pub const fn type_path(&self) -> &'static str {
        self.ty.path()
    }

    /// Returns the type path without its module prefix.
    #[inline]
    pub fn type_name(&self) -> &'static str {
        self.ty.name()
    }

    /// Returns the parent type's descriptor, `None` at the root.
    #[inline]
    pub fn parent(&self) -> Option<&'static TypeDescriptor> {
        self.parent.as_ref().map(|link| (link.descriptor)())
    }

    /// Returns `true` if values can be projected onto the parent type.
    #[inline]
    pub fn has_upcast(&self) -> bool {
        self.parent.as_ref().is_some_and(|link| link.upcast.is_some())
    }

    /// Projects `target`, a value of this type, onto its parent value.
    pub fn upcast<'a>(&self, target: &'a dyn Any) -> Result<&'a dyn Any, AccessError> {
        let upcast = self.upcast_handle()?;
        upcast.get(target).ok_or_else(|| self.target_mismatch())
    }

    /// Mutable form of [`upcast`](Self::upcast).
    pub fn upcast_mut<'a>(&self, target: &'a mut dyn Any) -> Result<&'a mut dyn Any, AccessError> {
        let upcast = self.upcast_handle()?;
        upcast.get_mut(target).ok_or_else(|| self.target_mismatch())
    }

    /// Returns the fields in declaration order.
    #[inline]
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    /// Returns the methods in declaration order.
    #[inline]
    pub fn methods(&self) -> &[MethodDescriptor] {
        &self.methods
    }

    /// Returns the field declared directly on this type with `name`.
    ///
    /// Fields of parent types are not searched.
    pub fn declared_field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|field| field.name() == name)
    }

    /// Returns the declared property order, if the type declares one.
    #[inline]
    pub fn property_order(&self) -> Option<&[&'static str]> {
        self.property_order.as_deref()
    }

    fn upcast_handle(&self) -> Result<&dyn ErasedField, AccessError> {
        self.parent
            .as_ref()
            .and_then(|link| link.upcast.as_deref())
            .ok_or(AccessError::MissingUpcast(self.ty.path()))
    }

    #[inline]
    fn target_mismatch(&self) -> AccessError {
        AccessError::TargetMismatch {
            member: self.ty.name(),
            expected: self.ty.path(),
        }
    }
}

impl fmt::Debug for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeDescriptor")
            .field("ty", &self.ty)
            .field("parent", &self.parent().map(TypeDescriptor::ty))
            .field("fields", &self.fields)
            .field("methods", &self.methods)
            .field("property_order", &self.property_order)
            .finish()
    }
}

// -----------------------------------------------------------------------------
// TypeDescriptorBuilder

/// Builder returned by [`TypeDescriptor::builder`].
///
/// # Examples
///
/// ```
/// use vc_introspect::info::{FieldDescriptor, MethodDescriptor, Modifiers, TypeDescriptor};
///
/// struct Config {
///     retries: u8,
/// }
///
/// let descriptor = TypeDescriptor::builder::<Config>()
///     .field(FieldDescriptor::new::<Config, u8>("retries", |c| &c.retries, |c| &mut c.retries))
///     .field(
///         FieldDescriptor::opaque::<Config, u8>("DEFAULT_RETRIES")
///             .with_modifiers(Modifiers::STATIC),
///     )
///     .method(MethodDescriptor::setter::<Config, u8>("setRetries", |c, v| c.retries = v))
///     .property_order(&["retries"])
///     .build();
///
/// assert_eq!(descriptor.type_name(), "Config");
/// assert!(descriptor.parent().is_none());
/// assert!(descriptor.declared_field("DEFAULT_RETRIES").unwrap().is_static());
/// assert_eq!(descriptor.property_order(), Some(&["retries"][..]));
/// ```
pub struct TypeDescriptorBuilder<T> {
    ty: Type,
    parent: Option<ParentLink>,
    fields: Vec<FieldDescriptor>,
    methods: Vec<MethodDescriptor>,
    property_order: Option<Box<[&'static str]>>,
    _marker: PhantomData<fn() -> T>,
}

impl<T: Any> TypeDescriptorBuilder<T> {
    /// Declares `P` as the parent type, embedded in `T` at the given projection.
    ///
    /// ```
    /// use vc_introspect::info::{DescriptorCell, Introspect, TypeDescriptor};
    ///
    /// struct Shape;
    /// struct Circle {
    ///     base: Shape,
    /// }
    ///
    /// impl Introspect for Shape {
    ///     fn type_descriptor() -> &'static TypeDescriptor {
    ///         static CELL: DescriptorCell = DescriptorCell::new();
    ///         CELL.get_or_init(|| TypeDescriptor::builder::<Self>().build())
    ///     }
    /// }
    ///
    /// let circle = TypeDescriptor::builder::<Circle>()
    ///     .extends::<Shape>(|c| &c.base, |c| &mut c.base)
    ///     .build();
    ///
    /// assert_eq!(circle.parent().unwrap().type_name(), "Shape");
    /// assert!(circle.upcast(&Circle { base: Shape }).unwrap().is::<Shape>());
    /// ```
    pub fn extends<P: Introspect>(self, get: fn(&T) -> &P, get_mut: fn(&mut T) -> &mut P) -> Self {
        Self {
            parent: Some(ParentLink {
                descriptor: P::type_descriptor,
                upcast: Some(Box::new(FieldAccessor { get, get_mut })),
            }),
            ..self
        }
    }

    /// Declares a parent type without a projection.
    ///
    /// Inherited properties are still discovered, but values can only be
    /// accessed through the parent's own analyzer.
    pub fn extends_descriptor(self, parent: fn() -> &'static TypeDescriptor) -> Self {
        Self {
            parent: Some(ParentLink {
                descriptor: parent,
                upcast: None,
            }),
            ..self
        }
    }

    /// Adds a declared field.
    #[inline]
    pub fn field(mut self, field: FieldDescriptor) -> Self {
        self.fields.push(field);
        self
    }

    /// Adds a declared method.
    #[inline]
    pub fn method(mut self, method: MethodDescriptor) -> Self {
        self.methods.push(method);
        self
    }

    /// Declares the order properties are listed in.
    ///
    /// Replaces any earlier declaration.
    pub fn property_order(self, names: &[&'static str]) -> Self {
        Self {
            property_order: Some(names.into()),
            ..self
        }
    }

    /// Finishes the descriptor.
    pub fn build(self) -> TypeDescriptor {
        TypeDescriptor {
            ty: self.ty,
            parent: self.parent,
            fields: self.fields.into_boxed_slice(),
            methods: self.methods.into_boxed_slice(),
            property_order: self.property_order,
        }
    }
}
