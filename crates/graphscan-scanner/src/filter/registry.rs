use crate::model::{FieldInfo, TypeInfo};
use dashmap::DashMap;
use std::fmt;
use std::sync::Arc;

/// Predicate deciding whether a (type, field) pair may be expanded.
///
/// Returning `false` blacklists the pair.
pub trait ScanFilter: Send + Sync {
    fn accept(&self, ty: &TypeInfo, field: Option<&FieldInfo>) -> bool;
}

impl<F> ScanFilter for F
where
    F: Fn(&TypeInfo, Option<&FieldInfo>) -> bool + Send + Sync,
{
    fn accept(&self, ty: &TypeInfo, field: Option<&FieldInfo>) -> bool {
        self(ty, field)
    }
}

pub type FilterRef = Arc<dyn ScanFilter>;

/// Concurrent set of dynamic filters keyed by the identity of their `Arc`
#[derive(Default)]
pub struct FilterRegistry {
    filters: DashMap<usize, FilterRef>,
}

impl FilterRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn key(filter: &FilterRef) -> usize {
        Arc::as_ptr(filter) as *const () as usize
    }

    /// Register a filter. Returns false if this exact filter was already present.
    pub fn add(&self, filter: FilterRef) -> bool {
        self.filters.insert(Self::key(&filter), filter).is_none()
    }

    /// Remove a filter previously added. Returns false if it was not registered.
    pub fn remove(&self, filter: &FilterRef) -> bool {
        self.filters.remove(&Self::key(filter)).is_some()
    }

    /// True only if every registered filter accepts
    pub fn accepts(&self, ty: &TypeInfo, field: Option<&FieldInfo>) -> bool {
        // collect first so no shard lock is held while user code runs
        let filters: Vec<FilterRef> = self.filters.iter().map(|e| e.value().clone()).collect();
        filters.iter().all(|filter| filter.accept(ty, field))
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    pub fn clear(&self) {
        self.filters.clear();
    }
}

impl fmt::Debug for FilterRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilterRegistry")
            .field("filters", &self.filters.len())
            .finish()
    }
}
