use crate::{
    any::{self, Instance},
    key::ServiceKey,
};

/// Resolved instances of one lifetime region: the whole container or a single scope
#[derive(Default)]
pub(crate) struct Cache {
    map: any::Map,
}

impl Cache {
    #[inline]
    #[must_use]
    pub(crate) const fn new() -> Self {
        Self { map: any::Map::new() }
    }

    #[inline]
    #[must_use]
    pub(crate) fn get(&self, key: &ServiceKey) -> Option<Instance> {
        self.map.get(key).cloned()
    }

    #[inline]
    pub(crate) fn insert(&mut self, key: ServiceKey, instance: Instance) -> Option<Instance> {
        self.map.insert(key, instance)
    }

    #[inline]
    pub(crate) fn remove(&mut self, key: &ServiceKey) -> Option<Instance> {
        self.map.remove(key)
    }

    #[inline]
    #[must_use]
    pub(crate) fn len(&self) -> usize {
        self.map.len()
    }
}
