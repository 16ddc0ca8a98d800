use alloc::boxed::Box;
use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::any::Any;
use core::fmt;

use crate::AccessError;
use crate::analysis::{Accessor, PropertyDescriptor, PropertyOrder, classify_accessor};
use crate::info::{FieldDescriptor, PropertyValue, Type, TypeDescriptor};

// -----------------------------------------------------------------------------
// TypeAnalyzer

/// The properties of one type, linked to the analyzer of its parent type.
///
/// An analyzer only stores the properties its own type declares. Lookups
/// fall back to the parent chain, so a property declared by the type
/// shadows any ancestor property of the same name.
///
/// Analyzers are created by an [`AnalysisCache`] and never change after
/// construction.
///
/// [`AnalysisCache`]: crate::analysis::AnalysisCache
pub struct TypeAnalyzer {
    descriptor: &'static TypeDescriptor,
    parent: Option<Arc<TypeAnalyzer>>,
    properties: BTreeMap<String, PropertyDescriptor>,
}

impl TypeAnalyzer {
    /// Scans `descriptor`. `parent` must be the analyzer of its parent type.
    pub(crate) fn new(
        descriptor: &'static TypeDescriptor,
        parent: Option<Arc<TypeAnalyzer>>,
    ) -> Self {
        let properties = scan(descriptor);
        log::trace!(
            "analyzed `{}`: {} declared properties, parent {:?}",
            descriptor.type_path(),
            properties.len(),
            parent.as_ref().map(|parent| parent.descriptor.type_path()),
        );

        Self {
            descriptor,
            parent,
            properties,
        }
    }

    /// Returns the analyzed type's descriptor.
    #[inline]
    pub const fn descriptor(&self) -> &'static TypeDescriptor {
        self.descriptor
    }

    /// Returns the analyzed type.
    #[inline]
    pub const fn ty(&self) -> Type {
        self.descriptor.ty()
    }

    /// Returns the parent type's analyzer, `None` at the root.
    #[inline]
    pub fn parent(&self) -> Option<&Arc<TypeAnalyzer>> {
        self.parent.as_ref()
    }

    /// Iterates over the parent chain, nearest ancestor first.
    pub fn ancestors(&self) -> impl Iterator<Item = &TypeAnalyzer> {
        core::iter::successors(self.parent.as_deref(), |analyzer| analyzer.parent.as_deref())
    }

    /// Iterates over the properties declared by this type only, by name.
    pub fn declared_properties(&self) -> impl ExactSizeIterator<Item = &PropertyDescriptor> {
        self.properties.values()
    }

    /// Returns the field declared directly on this type with `name`.
    #[inline]
    pub fn declared_field(&self, name: &str) -> Option<&'static FieldDescriptor> {
        self.descriptor.declared_field(name)
    }

    /// Returns the property `name`, searching this type first and then its
    /// ancestors.
    pub fn property(&self, name: &str) -> Option<&PropertyDescriptor> {
        core::iter::once(self)
            .chain(self.ancestors())
            .find_map(|analyzer| analyzer.properties.get(name))
    }

    /// Returns `true` if this type or an ancestor has the property `name`.
    #[inline]
    pub fn has_property(&self, name: &str) -> bool {
        self.property(name).is_some()
    }

    /// Returns every property visible on this type, one per name.
    ///
    /// Properties declared by the type win over ancestor properties of the
    /// same name. The result follows the type's declared property order if
    /// it has one, lexicographic order otherwise.
    ///
    /// # Examples
    ///
    /// ```
    /// use vc_introspect::analysis::AnalysisCache;
    /// use vc_introspect::info::{DescriptorCell, Introspect, MethodDescriptor, TypeDescriptor};
    ///
    /// struct Rect {
    ///     w: u32,
    ///     h: u32,
    /// }
    ///
    /// impl Introspect for Rect {
    ///     fn type_descriptor() -> &'static TypeDescriptor {
    ///         static CELL: DescriptorCell = DescriptorCell::new();
    ///         CELL.get_or_init(|| {
    ///             TypeDescriptor::builder::<Self>()
    ///                 .method(MethodDescriptor::getter::<Self, u32>("getWidth", |r| r.w))
    ///                 .method(MethodDescriptor::getter::<Self, u32>("getHeight", |r| r.h))
    ///                 .method(MethodDescriptor::getter::<Self, u32>("getArea", |r| r.w * r.h))
    ///                 .property_order(&["width", "height"])
    ///                 .build()
    ///         })
    ///     }
    /// }
    ///
    /// let analyzer = AnalysisCache::new().analyze_type::<Rect>();
    /// let names: Vec<&str> = analyzer.properties().iter().map(|p| p.name()).collect();
    /// assert_eq!(names, ["area", "width", "height"]);
    /// ```
    pub fn properties(&self) -> Vec<&PropertyDescriptor> {
        let mut merged: BTreeMap<&str, &PropertyDescriptor> = self
            .properties
            .iter()
            .map(|(name, property)| (name.as_str(), property))
            .collect();

        for ancestor in self.ancestors() {
            for (name, property) in &ancestor.properties {
                merged.entry(name.as_str()).or_insert(property);
            }
        }

        // `BTreeMap` already yields the natural order.
        let mut properties: Vec<&PropertyDescriptor> = merged.into_values().collect();
        if let Some(names) = self.descriptor.property_order() {
            PropertyOrder::declared(names).sort(&mut properties);
        }
        properties
    }

    /// Reads the property `name` from `target`, a value of this type.
    ///
    /// Inherited properties are read from the embedded parent value, reached
    /// through each level's upcast.
    pub fn read<'a>(
        &self,
        target: &'a dyn Any,
        name: &str,
    ) -> Result<PropertyValue<'a>, AccessError> {
        let mut level = self;
        let mut target = target;
        loop {
            if let Some(property) = level.properties.get(name) {
                return property.read(target);
            }
            let Some(parent) = level.parent.as_deref() else {
                return Err(AccessError::UnknownProperty(name.to_string()));
            };
            target = level.descriptor.upcast(target)?;
            level = parent;
        }
    }

    /// Writes `value` into the property `name` of `target`, a value of this
    /// type. See [`read`](Self::read) for inherited properties.
    pub fn write(
        &self,
        target: &mut dyn Any,
        name: &str,
        value: Box<dyn Any>,
    ) -> Result<(), AccessError> {
        let mut level = self;
        let mut target = target;
        loop {
            if let Some(property) = level.properties.get(name) {
                return property.write(target, value);
            }
            let Some(parent) = level.parent.as_deref() else {
                return Err(AccessError::UnknownProperty(name.to_string()));
            };
            target = level.descriptor.upcast_mut(target)?;
            level = parent;
        }
    }
}

impl fmt::Debug for TypeAnalyzer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeAnalyzer")
            .field("ty", &self.descriptor.ty())
            .field("parent", &self.parent.as_ref().map(|parent| parent.ty()))
            .field("properties", &self.properties.keys())
            .finish()
    }
}

// -----------------------------------------------------------------------------
// Scan

fn scan(descriptor: &'static TypeDescriptor) -> BTreeMap<String, PropertyDescriptor> {
    let mut properties = BTreeMap::new();

    for field in descriptor.fields() {
        if field.is_static() || properties.contains_key(field.name()) {
            continue;
        }
        properties.insert(
            field.name().to_string(),
            PropertyDescriptor::from_field(field, descriptor),
        );
    }

    for method in descriptor.methods() {
        if method.is_static() {
            continue;
        }
        let Some(accessor) = classify_accessor(method.name(), method.param_count()) else {
            continue;
        };
        match accessor {
            Accessor::Read(name) => properties
                .entry(name.clone())
                .or_insert_with(|| PropertyDescriptor::from_accessor(name, descriptor))
                .set_read_method(method),
            Accessor::Write(name) => properties
                .entry(name.clone())
                .or_insert_with(|| PropertyDescriptor::from_accessor(name, descriptor))
                .add_write_method(method),
        }
    }

    properties.retain(|_, property| !property.is_non_property());
    properties
}

// -----------------------------------------------------------------------------
// Tests
