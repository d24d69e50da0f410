use alloc::collections::BTreeMap;

use crate::{key::ServiceKey, registration::RegistrationData};

#[derive(Default)]
pub(crate) struct Registry {
    registrations: BTreeMap<ServiceKey, RegistrationData>,
}

impl Registry {
    #[inline]
    pub(crate) fn insert(&mut self, key: ServiceKey, registration: RegistrationData) -> Option<RegistrationData> {
        self.registrations.insert(key, registration)
    }

    /// Clones the registration out, so it can be used without holding the registry
    #[inline]
    #[must_use]
    pub(crate) fn get(&self, key: &ServiceKey) -> Option<RegistrationData> {
        self.registrations.get(key).cloned()
    }

    #[inline]
    #[must_use]
    pub(crate) fn contains(&self, key: &ServiceKey) -> bool {
        self.registrations.contains_key(key)
    }

    #[inline]
    #[must_use]
    pub(crate) fn len(&self) -> usize {
        self.registrations.len()
    }
}
