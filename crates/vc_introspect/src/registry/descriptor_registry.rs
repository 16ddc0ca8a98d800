use core::any::TypeId;
use core::fmt;

use vc_utils::TypeIdMap;
use vc_utils::hash::{FixedHashState, HashMap, HashSet};

use crate::info::{Introspect, TypeDescriptor};

// -----------------------------------------------------------------------------
// DescriptorRegistry

/// A store of [`TypeDescriptor`]s, indexed by [`TypeId`], type path and
/// short type name.
///
/// Registering a type also registers its parent chain, so every
/// descriptor reachable from a registered one can be looked up by name.
///
/// # Examples
///
/// ```
/// use vc_introspect::analysis::AnalysisCache;
/// use vc_introspect::info::{DescriptorCell, Introspect, MethodDescriptor, TypeDescriptor};
/// use vc_introspect::registry::DescriptorRegistry;
///
/// struct Sensor {
///     reading: f32,
/// }
///
/// impl Introspect for Sensor {
///     fn type_descriptor() -> &'static TypeDescriptor {
///         static CELL: DescriptorCell = DescriptorCell::new();
///         CELL.get_or_init(|| {
///             TypeDescriptor::builder::<Self>()
///                 .method(MethodDescriptor::getter::<Self, f32>("getReading", |s| s.reading))
///                 .build()
///         })
///     }
/// }
///
/// let mut registry = DescriptorRegistry::new();
/// registry.register::<Sensor>();
///
/// let descriptor = registry.get_with_type_name("Sensor");
/// let analyzer = AnalysisCache::new().analyze(descriptor).unwrap();
/// assert!(analyzer.has_property("reading"));
/// ```
pub struct DescriptorRegistry {
    descriptors: TypeIdMap<&'static TypeDescriptor>,
    type_path_to_id: HashMap<&'static str, TypeId>,
    type_name_to_id: HashMap<&'static str, TypeId>,
    ambiguous_names: HashSet<&'static str>,
}

impl Default for DescriptorRegistry {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl DescriptorRegistry {
    /// Creates an empty registry.
    #[inline]
    pub const fn new() -> Self {
        Self {
            descriptors: TypeIdMap::new(),
            type_path_to_id: HashMap::with_hasher(FixedHashState),
            type_name_to_id: HashMap::with_hasher(FixedHashState),
            ambiguous_names: HashSet::with_hasher(FixedHashState),
        }
    }

    // The type must not be registered yet.
    fn add_new_type_indices(&mut self, descriptor: &'static TypeDescriptor) {
        let type_name = descriptor.type_name();
        let type_id = descriptor.type_id();

        if !self.ambiguous_names.contains(type_name) {
            if self.type_name_to_id.remove(type_name).is_some() {
                self.ambiguous_names.insert(type_name);
            } else {
                self.type_name_to_id.insert(type_name, type_id);
            }
        }

        self.type_path_to_id.insert(descriptor.type_path(), type_id);
    }

    /// Registers `descriptor` and every not yet registered ancestor.
    ///
    /// Returns `false`, and does nothing, if the type is already present.
    pub fn register_descriptor(&mut self, descriptor: &'static TypeDescriptor) -> bool {
        let mut next = Some(descriptor);
        let mut inserted = false;

        while let Some(descriptor) = next {
            let added = self.descriptors.try_insert(descriptor.type_id(), || descriptor);
            if !added {
                // The rest of the chain was registered with this type.
                break;
            }
            self.add_new_type_indices(descriptor);
            inserted = true;
            next = descriptor.parent();
        }

        inserted
    }

    /// Registers `T` and its parent chain. See
    /// [`register_descriptor`](Self::register_descriptor).
    #[inline]
    pub fn register<T: Introspect>(&mut self) -> bool {
        self.register_descriptor(T::type_descriptor())
    }

    /// Registers every type submitted with [`auto_register!`].
    ///
    /// Repeated calls are cheap and insert nothing new.
    ///
    /// Returns `true` if automatic registration works on the current
    /// platform. Without the `auto_register` feature this does nothing and
    /// returns `false`.
    ///
    /// [`auto_register!`]: crate::auto_register
    pub fn auto_register(&mut self) -> bool {
        #[cfg(feature = "auto_register")]
        {
            use crate::__macro_exports::auto_register;

            if self.contains(TypeId::of::<auto_register::__AvailFlag>()) {
                return true;
            }
            for descriptor in auto_register::__descriptors() {
                self.register_descriptor(descriptor);
            }
            self.contains(TypeId::of::<auto_register::__AvailFlag>())
        }
        #[cfg(not(feature = "auto_register"))]
        {
            false
        }
    }

    /// Returns `true` if the type with `type_id` is registered.
    #[inline]
    pub fn contains(&self, type_id: TypeId) -> bool {
        self.descriptors.contains(&type_id)
    }

    /// Returns the descriptor of the type with `type_id`.
    #[inline]
    pub fn get(&self, type_id: TypeId) -> Option<&'static TypeDescriptor> {
        self.descriptors.get(&type_id).copied()
    }

    /// Returns the descriptor registered under the full `type_path`.
    pub fn get_with_type_path(&self, type_path: &str) -> Option<&'static TypeDescriptor> {
        let type_id = self.type_path_to_id.get(type_path)?;
        self.get(*type_id)
    }

    /// Returns the descriptor registered under the short `type_name`.
    ///
    /// `None` if no type or more than one type has that name.
    pub fn get_with_type_name(&self, type_name: &str) -> Option<&'static TypeDescriptor> {
        let type_id = self.type_name_to_id.get(type_name)?;
        self.get(*type_id)
    }

    /// Returns `true` if `type_name` matches more than one registered type.
    #[inline]
    pub fn is_ambiguous(&self, type_name: &str) -> bool {
        self.ambiguous_names.contains(type_name)
    }

    /// Returns the number of registered types.
    #[inline]
    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    /// Returns `true` if nothing is registered.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    /// Iterates over the registered descriptors in no particular order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &'static TypeDescriptor> + '_ {
        self.descriptors.values().copied()
    }
}

impl fmt::Debug for DescriptorRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.type_path_to_id.keys()).finish()
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use core::any::TypeId;

    use super::DescriptorRegistry;
    use crate::info::Introspect;
    use crate::test_fixtures::{CycleA, CycleB, Employee, Entity, Person};

    mod first {
        use crate::info::{DescriptorCell, Introspect, TypeDescriptor};

        pub struct Twin;

        impl Introspect for Twin {
            fn type_descriptor() -> &'static TypeDescriptor {
                static CELL: DescriptorCell = DescriptorCell::new();
                CELL.get_or_init(|| TypeDescriptor::builder::<Self>().build())
            }
        }
    }

    mod second {
        use crate::info::{DescriptorCell, Introspect, TypeDescriptor};

        pub struct Twin;

        impl Introspect for Twin {
            fn type_descriptor() -> &'static TypeDescriptor {
                static CELL: DescriptorCell = DescriptorCell::new();
                CELL.get_or_init(|| TypeDescriptor::builder::<Self>().build())
            }
        }
    }

    #[cfg(feature = "auto_register")]
    mod submitted {
        use crate::info::{DescriptorCell, Introspect, TypeDescriptor};
        use crate::test_fixtures::Entity;

        pub struct Submitted;

        impl Introspect for Submitted {
            fn type_descriptor() -> &'static TypeDescriptor {
                static CELL: DescriptorCell = DescriptorCell::new();
                CELL.get_or_init(|| {
                    TypeDescriptor::builder::<Self>()
                        .extends_descriptor(Entity::type_descriptor)
                        .build()
                })
            }
        }

        crate::auto_register!(Submitted);
    }

    #[test]
    fn registers_parent_chain() {
        let mut registry = DescriptorRegistry::new();
        assert!(registry.register::<Employee>());
        assert_eq!(registry.len(), 3);
        assert!(registry.contains(TypeId::of::<Entity>()));

        assert!(!registry.register::<Employee>());
        assert!(!registry.register::<Person>());
        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn lookups() {
        let mut registry = DescriptorRegistry::default();
        registry.register::<Person>();

        let by_name = registry.get_with_type_name("Entity").unwrap();
        let by_path = registry.get_with_type_path(Entity::type_descriptor().type_path()).unwrap();
        assert!(core::ptr::eq(by_name, by_path));
        assert!(core::ptr::eq(by_name, Entity::type_descriptor()));

        assert!(registry.get_with_type_name("Employee").is_none());
        assert!(registry.get(TypeId::of::<Employee>()).is_none());
        assert_eq!(registry.iter().count(), 2);
    }

    #[test]
    fn ambiguous_names() {
        let mut registry = DescriptorRegistry::new();
        registry.register::<first::Twin>();
        assert!(registry.get_with_type_name("Twin").is_some());

        registry.register::<second::Twin>();
        assert!(registry.is_ambiguous("Twin"));
        assert!(registry.get_with_type_name("Twin").is_none());
        assert!(registry.get_with_type_path(second::Twin::type_descriptor().type_path()).is_some());
    }

    #[test]
    fn cyclic_chain_terminates() {
        let mut registry = DescriptorRegistry::new();
        assert!(registry.register::<CycleA>());
        assert!(registry.contains(TypeId::of::<CycleB>()));
        assert_eq!(registry.len(), 2);
    }

    #[cfg(feature = "auto_register")]
    #[test]
    fn auto_register() {
        let mut registry = DescriptorRegistry::new();
        if registry.auto_register() {
            assert!(registry.contains(TypeId::of::<submitted::Submitted>()));
            assert!(registry.contains(TypeId::of::<Entity>()));
            assert!(registry.auto_register());
        }
    }

    #[cfg(not(feature = "auto_register"))]
    #[test]
    fn auto_register_disabled() {
        let mut registry = DescriptorRegistry::new();
        assert!(!registry.auto_register());
        assert!(registry.is_empty());
    }
}
