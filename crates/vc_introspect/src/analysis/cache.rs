use alloc::sync::Arc;
use alloc::vec::Vec;
use core::any::TypeId;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use vc_utils::TypeIdMap;

use crate::analysis::TypeAnalyzer;
use crate::info::{DynamicIntrospect, Introspect, TypeDescriptor};

// -----------------------------------------------------------------------------
// AnalysisCache

/// Memo of `type -> analyzer` owned by one execution context.
///
/// Create one per worker, request or serialization pass and drop or
/// [`clear`](Self::clear) it when the context ends. All methods take
/// `&mut self`, so the hot path needs no locking; use
/// [`SharedAnalysisCache`] to share a cache on purpose.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use vc_introspect::analysis::AnalysisCache;
/// use vc_introspect::info::{DescriptorCell, Introspect, TypeDescriptor};
///
/// struct Empty;
///
/// impl Introspect for Empty {
///     fn type_descriptor() -> &'static TypeDescriptor {
///         static CELL: DescriptorCell = DescriptorCell::new();
///         CELL.get_or_init(|| TypeDescriptor::builder::<Self>().build())
///     }
/// }
///
/// let mut cache = AnalysisCache::new();
/// let first = cache.analyze_type::<Empty>();
/// let again = cache.analyze_type::<Empty>();
/// assert!(Arc::ptr_eq(&first, &again));
///
/// cache.clear();
/// let fresh = cache.analyze_type::<Empty>();
/// assert!(!Arc::ptr_eq(&first, &fresh));
///
/// assert!(cache.analyze(None).is_none());
/// ```
#[derive(Default)]
pub struct AnalysisCache {
    analyzers: TypeIdMap<Arc<TypeAnalyzer>>,
    // Types whose parent chain is being analyzed.
    pending: Vec<TypeId>,
}

impl AnalysisCache {
    /// Creates an empty cache.
    #[inline]
    pub const fn new() -> Self {
        Self {
            analyzers: TypeIdMap::new(),
            pending: Vec::new(),
        }
    }

    /// Returns the analyzer of `descriptor`'s type, building it (and the
    /// analyzers of its parent chain) on first request.
    ///
    /// `None` is the "no type" sentinel and yields `None`.
    pub fn analyze(
        &mut self,
        descriptor: Option<&'static TypeDescriptor>,
    ) -> Option<Arc<TypeAnalyzer>> {
        descriptor.map(|descriptor| self.analyze_descriptor(descriptor))
    }

    /// Returns the analyzer of `T`.
    #[inline]
    pub fn analyze_type<T: Introspect>(&mut self) -> Arc<TypeAnalyzer> {
        self.analyze_descriptor(T::type_descriptor())
    }

    /// Returns the analyzer of `value`'s concrete type.
    #[inline]
    pub fn analyze_value(&mut self, value: &dyn DynamicIntrospect) -> Arc<TypeAnalyzer> {
        self.analyze_descriptor(value.introspect_descriptor())
    }

    fn analyze_descriptor(&mut self, descriptor: &'static TypeDescriptor) -> Arc<TypeAnalyzer> {
        let type_id = descriptor.type_id();
        if let Some(analyzer) = self.analyzers.get(&type_id) {
            return Arc::clone(analyzer);
        }

        self.pending.push(type_id);
        let parent = match descriptor.parent() {
            Some(parent) if self.pending.contains(&parent.type_id()) => {
                log::error!(
                    "cyclic parent chain: `{}` extends `{}`, analyzing `{}` as a root",
                    descriptor.type_path(),
                    parent.type_path(),
                    descriptor.type_path(),
                );
                None
            }
            Some(parent) => Some(self.analyze_descriptor(parent)),
            None => None,
        };
        self.pending.pop();

        let analyzer = Arc::new(TypeAnalyzer::new(descriptor, parent));
        self.analyzers.insert(type_id, Arc::clone(&analyzer));
        analyzer
    }

    /// Returns the cached analyzer for `type_id`, without building one.
    #[inline]
    pub fn get(&self, type_id: TypeId) -> Option<&Arc<TypeAnalyzer>> {
        self.analyzers.get(&type_id)
    }

    /// Returns `true` if an analyzer for `type_id` is cached.
    #[inline]
    pub fn contains(&self, type_id: TypeId) -> bool {
        self.analyzers.contains(&type_id)
    }

    /// Returns the number of cached analyzers.
    #[inline]
    pub fn len(&self) -> usize {
        self.analyzers.len()
    }

    /// Returns `true` if nothing is cached.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.analyzers.is_empty()
    }

    /// Drops every cached analyzer.
    ///
    /// Analyzers already handed out stay valid; later requests build new
    /// ones.
    pub fn clear(&mut self) {
        log::debug!("analysis cache cleared, {} analyzers dropped", self.analyzers.len());
        self.analyzers.clear();
    }
}

impl core::fmt::Debug for AnalysisCache {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_set()
            .entries(self.analyzers.values().map(|analyzer| analyzer.ty()))
            .finish()
    }
}

// -----------------------------------------------------------------------------
// SharedAnalysisCache

/// An [`AnalysisCache`] shared between threads.
///
/// Lookups take the read lock. A miss takes the write lock and looks up
/// again before building, so each type still gets at most one analyzer.
#[derive(Clone, Default)]
pub struct SharedAnalysisCache {
    /// The wrapped [`AnalysisCache`].
    pub internal: Arc<RwLock<AnalysisCache>>,
}

impl SharedAnalysisCache {
    /// Creates an empty shared cache.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Takes a read lock on the underlying [`AnalysisCache`].
    pub fn read(&self) -> RwLockReadGuard<'_, AnalysisCache> {
        self.internal.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Takes a write lock on the underlying [`AnalysisCache`].
    pub fn write(&self) -> RwLockWriteGuard<'_, AnalysisCache> {
        self.internal
            .write()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// See [`AnalysisCache::analyze`].
    pub fn analyze(
        &self,
        descriptor: Option<&'static TypeDescriptor>,
    ) -> Option<Arc<TypeAnalyzer>> {
        let descriptor = descriptor?;
        if let Some(analyzer) = self.read().get(descriptor.type_id()) {
            return Some(Arc::clone(analyzer));
        }
        self.write().analyze(Some(descriptor))
    }

    /// See [`AnalysisCache::analyze_type`].
    #[inline]
    pub fn analyze_type<T: Introspect>(&self) -> Arc<TypeAnalyzer> {
        let descriptor = T::type_descriptor();
        if let Some(analyzer) = self.read().get(descriptor.type_id()) {
            return Arc::clone(analyzer);
        }
        self.write().analyze_type::<T>()
    }

    /// See [`AnalysisCache::clear`].
    pub fn clear(&self) {
        self.write().clear();
    }
}

impl core::fmt::Debug for SharedAnalysisCache {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Debug::fmt(&*self.read(), f)
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::sync::Arc;
    use alloc::vec::Vec;
    use core::any::TypeId;

    use super::{AnalysisCache, SharedAnalysisCache};
    use crate::info::{DynamicIntrospect, Introspect};
    use crate::test_fixtures::{CycleA, CycleB, Employee, Entity, Person, employee};

    #[test]
    fn parents_are_cached_first() {
        let mut cache = AnalysisCache::new();
        let analyzer = cache.analyze_type::<Employee>();

        assert_eq!(cache.len(), 3);
        assert!(cache.contains(TypeId::of::<Person>()));
        assert!(cache.contains(TypeId::of::<Entity>()));

        let person = cache.get(TypeId::of::<Person>()).unwrap();
        assert!(Arc::ptr_eq(analyzer.parent().unwrap(), person));

        let chain: Vec<&str> = analyzer.ancestors().map(|a| a.ty().name()).collect();
        assert_eq!(chain, ["Person", "Entity"]);
    }

    #[test]
    fn identity_until_cleared() {
        let mut cache = AnalysisCache::new();
        let first = cache.analyze_type::<Person>();
        let value = employee();
        let by_value = cache.analyze_value(&value.base as &dyn DynamicIntrospect);
        assert!(Arc::ptr_eq(&first, &by_value));

        cache.clear();
        assert!(cache.is_empty());
        let fresh = cache.analyze(Some(Person::type_descriptor())).unwrap();
        assert!(!Arc::ptr_eq(&first, &fresh));
        // Handed-out analyzers stay usable.
        assert!(first.has_property("name"));
    }

    #[test]
    fn caches_are_independent() {
        let mut a = AnalysisCache::new();
        let mut b = AnalysisCache::new();
        assert!(!Arc::ptr_eq(&a.analyze_type::<Entity>(), &b.analyze_type::<Entity>()));
    }

    #[test]
    fn cyclic_chain_is_cut() {
        let mut cache = AnalysisCache::new();
        let a = cache.analyze_type::<CycleA>();

        let b = a.parent().unwrap();
        assert!(b.parent().is_none());
        assert_eq!(a.ancestors().count(), 1);

        let names: Vec<&str> = a.properties().iter().map(|p| p.name()).collect();
        assert_eq!(names, ["a", "b"]);
        assert!(Arc::ptr_eq(b, &cache.analyze_type::<CycleB>()));
    }

    #[test]
    fn shared_cache() {
        let shared = SharedAnalysisCache::new();
        let other = shared.clone();

        let first = shared.analyze_type::<Person>();
        let second = other.analyze(Some(Person::type_descriptor())).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert!(shared.analyze(None).is_none());
        assert_eq!(shared.read().len(), 2);

        other.clear();
        assert!(shared.read().is_empty());
    }

    #[test]
    fn shared_cache_across_threads() {
        let shared = SharedAnalysisCache::new();
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let shared = shared.clone();
                std::thread::spawn(move || shared.analyze_type::<Employee>())
            })
            .collect();

        let analyzers: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert!(analyzers.windows(2).all(|w| Arc::ptr_eq(&w[0], &w[1])));
        assert_eq!(shared.read().len(), 3);
    }
}
