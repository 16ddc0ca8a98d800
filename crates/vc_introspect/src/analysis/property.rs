use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;
use core::any::{Any, TypeId};

use crate::AccessError;
use crate::info::{FieldDescriptor, MethodDescriptor, MethodKind, PropertyValue, TypeDescriptor};

// -----------------------------------------------------------------------------
// PropertyDescriptor

/// One logical property of a type.
///
/// A property is backed by any combination of a declared field, one read
/// accessor and any number of write accessors (overloads by parameter
/// type). It is filled in while its [`TypeAnalyzer`] scans the declaring
/// type and never changes afterwards.
///
/// [`TypeAnalyzer`]: crate::analysis::TypeAnalyzer
#[derive(Debug)]
pub struct PropertyDescriptor {
    name: String,
    declaring: &'static TypeDescriptor,
    field: Option<&'static FieldDescriptor>,
    read: Option<&'static MethodDescriptor>,
    writes: Vec<&'static MethodDescriptor>,
}

impl PropertyDescriptor {
    /// Creates a property backed only by `field`, named after the field.
    pub fn from_field(field: &'static FieldDescriptor, declaring: &'static TypeDescriptor) -> Self {
        Self {
            name: String::from(field.name()),
            declaring,
            field: Some(field),
            read: None,
            writes: Vec::new(),
        }
    }

    /// Creates a property with nothing attached yet.
    pub fn from_accessor(name: String, declaring: &'static TypeDescriptor) -> Self {
        Self {
            name,
            declaring,
            field: None,
            read: None,
            writes: Vec::new(),
        }
    }

    /// Sets the read accessor. A later call replaces an earlier one.
    pub fn set_read_method(&mut self, method: &'static MethodDescriptor) {
        if let Some(previous) = self.read.replace(method) {
            log::debug!(
                "`{}` read accessor `{}` replaced by `{}`",
                self.name,
                previous.name(),
                method.name(),
            );
        }
    }

    /// Appends a write accessor.
    pub fn add_write_method(&mut self, method: &'static MethodDescriptor) {
        self.writes.push(method);
    }

    /// Returns `true` if nothing backs this property.
    #[inline]
    pub fn is_non_property(&self) -> bool {
        self.field.is_none() && self.read.is_none() && self.writes.is_empty()
    }

    /// Returns the property name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the descriptor of the type that declares this property.
    #[inline]
    pub const fn declaring_type(&self) -> &'static TypeDescriptor {
        self.declaring
    }

    /// Returns the backing field.
    #[inline]
    pub const fn field(&self) -> Option<&'static FieldDescriptor> {
        self.field
    }

    /// Returns the read accessor.
    #[inline]
    pub const fn read_method(&self) -> Option<&'static MethodDescriptor> {
        self.read
    }

    /// Returns the write accessors in declaration order.
    #[inline]
    pub fn write_methods(&self) -> &[&'static MethodDescriptor] {
        &self.writes
    }

    /// Returns the first write accessor taking a value of `type_id`.
    pub fn write_method_for(&self, type_id: TypeId) -> Option<&'static MethodDescriptor> {
        self.writes
            .iter()
            .copied()
            .find(|method| method.accepts(type_id))
    }

    /// Returns `true` if an invocable read accessor or an accessible field
    /// exists.
    pub fn is_readable(&self) -> bool {
        self.invocable_read().is_some() || self.accessible_field().is_some()
    }

    /// Returns `true` if an invocable write accessor or an accessible field
    /// exists.
    pub fn is_writable(&self) -> bool {
        self.writes
            .iter()
            .any(|method| method.kind() == MethodKind::Setter)
            || self.accessible_field().is_some()
    }

    /// Reads the property from `target`.
    ///
    /// The read accessor is preferred; the backing field is used when there
    /// is none or when it is declared without an invocable handle.
    pub fn read<'a>(&self, target: &'a dyn Any) -> Result<PropertyValue<'a>, AccessError> {
        if let Some(method) = self.invocable_read() {
            return method.invoke_get(target).map(PropertyValue::Owned);
        }
        match self.accessible_field() {
            Some(field) => field.get(target).map(PropertyValue::Borrowed),
            None => Err(AccessError::NotReadable(self.name.clone())),
        }
    }

    #[inline]
    fn invocable_read(&self) -> Option<&'static MethodDescriptor> {
        self.read.filter(|method| method.kind() == MethodKind::Getter)
    }

    #[inline]
    fn accessible_field(&self) -> Option<&'static FieldDescriptor> {
        self.field.filter(|field| field.is_accessible())
    }

    /// Writes `value` into `target`.
    ///
    /// Uses the first write accessor whose parameter type is the value's
    /// type, then the backing field if it has that type.
    pub fn write(&self, target: &mut dyn Any, value: Box<dyn Any>) -> Result<(), AccessError> {
        if !self.is_writable() {
            return Err(AccessError::NotWritable(self.name.clone()));
        }

        let value_type = (*value).type_id();
        if let Some(method) = self.write_method_for(value_type) {
            return method.invoke_set(target, value);
        }
        match self.accessible_field() {
            Some(field) if field.ty().id() == value_type => field.set(target, value),
            _ => Err(AccessError::ValueMismatch {
                member: self.name.clone(),
            }),
        }
    }
}

// -----------------------------------------------------------------------------
// Tests
