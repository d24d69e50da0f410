use alloc::{boxed::Box, sync::Arc, vec::Vec};
use core::any::{Any as _, TypeId};
use parking_lot::Mutex;
use tracing::{debug, debug_span, error, field};

use crate::{
    any::Instance,
    arguments::{Argument, Arguments},
    cache::Cache,
    dependency::Dependency,
    errors::{InstantiatorErrorKind, RegisterErrorKind, ResolveErrorKind},
    instantiator::Instantiator,
    key::{ServiceKey, ServicePath},
    lifetime::Lifetime,
    registration::{Registration, RegistrationData},
    registry::Registry,
    scope::{ScopeGuard, ScopeStack},
};

/// Registry of services together with the caches of their instances.
///
/// Cloning a container is cheap and gives another handle to the same registrations and caches.
/// Handles can be sent to other threads, but the exactly-once guarantees
/// of singleton and scoped services hold only when resolutions don't race each other.
#[derive(Default)]
pub struct Container {
    pub(crate) inner: Arc<ContainerInner>,
    /// Services under construction in the call chain that handed this handle to a factory
    resolving: Vec<ServiceKey>,
}

impl Clone for Container {
    /// The clone shares registrations and caches, but not the chain of services being constructed
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            resolving: Vec::new(),
        }
    }
}

impl Container {
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a service, replacing the previous registration of the same service without a warning.
    /// Instances of the replaced registration are evicted from the singleton cache and from the open scopes.
    ///
    /// Returns `true` if a previous registration was replaced.
    ///
    /// # Errors
    /// Returns [`RegisterErrorKind::NoInstantiator`] if the registration has neither a constructor nor a factory
    pub fn register<I>(&self, registration: Registration<I>) -> Result<bool, RegisterErrorKind>
    where
        I: ?Sized + Send + Sync + 'static,
    {
        let key = registration.key();
        let span = debug_span!("register", service = key.name());
        let _guard = span.enter();

        let registration = match registration.into_data() {
            Ok(registration) => registration,
            Err(err) => {
                error!("{}", err);
                return Err(err);
            }
        };
        let lifetime = registration.lifetime;
        let instantiator = registration.instantiator.kind();

        let previous = self.inner.registry.lock().insert(key, registration);
        let Some(previous) = previous else {
            debug!(%lifetime, instantiator, "Registered");
            return Ok(false);
        };

        let evicted = if previous.lifetime.is_cached() { self.evict(key) } else { 0 };
        debug!(%lifetime, instantiator, evicted, "Registration replaced");

        Ok(true)
    }

    #[inline]
    #[must_use]
    pub fn is_registered<I: ?Sized + 'static>(&self) -> bool {
        self.inner.registry.lock().contains(&ServiceKey::of::<I>())
    }

    #[inline]
    #[must_use]
    pub fn registrations_count(&self) -> usize {
        self.inner.registry.lock().len()
    }

    /// Opens a new scope with an empty cache for scoped services.
    /// The previously active scope is restored when the returned guard is dropped,
    /// including early returns and unwinding.
    pub fn enter_scope(&self) -> ScopeGuard<'_> {
        let (depth, id) = self.inner.scopes.lock().push();
        debug!(depth, "Scope entered");

        ScopeGuard {
            container: self,
            depth,
            id,
        }
    }

    /// Runs `f` inside a new scope
    pub fn scope<T>(&self, f: impl FnOnce(&Container) -> T) -> T {
        let scope = self.enter_scope();
        f(&scope)
    }

    /// Number of open scopes
    #[inline]
    #[must_use]
    pub fn scope_depth(&self) -> usize {
        self.inner.scopes.lock().depth()
    }

    /// Resolves the service `I` according to its lifetime
    ///
    /// # Errors
    /// - [`ResolveErrorKind::NoRegistration`] if `I` or one of its dependencies isn't registered
    /// - [`ResolveErrorKind::NoActiveScope`] if a scoped service is resolved outside of a scope
    /// - [`ResolveErrorKind::CyclicDependency`] if `I` depends on itself, directly or not
    /// - [`ResolveErrorKind::Instantiator`] if a dependency or the instantiator failed
    pub fn resolve<I>(&self) -> Result<Arc<I>, ResolveErrorKind>
    where
        I: ?Sized + Send + Sync + 'static,
    {
        let instance = self.resolve_key(ServiceKey::of::<I>())?;
        match instance.downcast_ref::<Arc<I>>() {
            Some(instance) => Ok(instance.clone()),
            None => {
                let err = ResolveErrorKind::IncorrectType {
                    expected: TypeId::of::<Arc<I>>(),
                    actual: (*instance).type_id(),
                };
                error!("{}", err);
                Err(err)
            }
        }
    }

    /// Type-erased version of [`Self::resolve`].
    /// The returned instance holds an `Arc<I>`, where `I` is the type the key was built from.
    #[allow(clippy::missing_errors_doc)]
    pub fn resolve_key(&self, key: ServiceKey) -> Result<Instance, ResolveErrorKind> {
        let mut resolving = self.resolving.clone();
        self.resolve_in_chain(key, &mut resolving)
    }
}

impl Container {
    /// Resolves `key` as part of the chain of services in `resolving`
    fn resolve_in_chain(&self, key: ServiceKey, resolving: &mut Vec<ServiceKey>) -> Result<Instance, ResolveErrorKind> {
        let span = debug_span!("resolve", service = key.name(), lifetime = field::Empty);
        let _guard = span.enter();

        let registration = self.inner.registry.lock().get(&key);
        let Some(registration) = registration else {
            let err = ResolveErrorKind::NoRegistration { service: key };
            error!("{}", err);
            return Err(err);
        };
        span.record("lifetime", registration.lifetime.name());

        match registration.lifetime {
            Lifetime::Singleton => {
                let cached = self.inner.singletons.lock().get(&key);
                if let Some(instance) = cached {
                    debug!("Found in singleton cache");
                    return Ok(instance);
                }
                debug!("Not found in singleton cache");

                let instance = self.construct(key, registration, resolving)?;
                self.inner.singletons.lock().insert(key, instance.clone());
                debug!("Cached");

                Ok(instance)
            }
            Lifetime::Scoped => {
                let (depth, id) = {
                    let scopes = self.inner.scopes.lock();
                    let Some(scope) = scopes.current() else {
                        let err = ResolveErrorKind::NoActiveScope { service: key };
                        error!("{}", err);
                        return Err(err);
                    };
                    if let Some(instance) = scope.cache.get(&key) {
                        debug!("Found in scope cache");
                        return Ok(instance);
                    }
                    (scopes.depth(), scope.id)
                };
                debug!(depth, "Not found in scope cache");

                let instance = self.construct(key, registration, resolving)?;
                // The scope that was current before construction, even if the instantiator opened and closed scopes itself
                if let Some(cache) = self.inner.scopes.lock().get_mut(id) {
                    cache.insert(key, instance.clone());
                    debug!(depth, "Cached");
                }

                Ok(instance)
            }
            Lifetime::PerRequest => self.construct(key, registration, resolving),
        }
    }

    fn construct(
        &self,
        key: ServiceKey,
        registration: RegistrationData,
        resolving: &mut Vec<ServiceKey>,
    ) -> Result<Instance, ResolveErrorKind> {
        if let Some(position) = resolving.iter().position(|resolving_key| *resolving_key == key) {
            let mut path = resolving[position..].to_vec();
            path.push(key);

            let err = ResolveErrorKind::CyclicDependency {
                path: ServicePath(path.into_boxed_slice()),
            };
            error!("{}", err);
            return Err(err);
        }

        resolving.push(key);
        let result = self.instantiate(registration, resolving);
        resolving.pop();

        result
    }

    fn instantiate(&self, registration: RegistrationData, resolving: &mut Vec<ServiceKey>) -> Result<Instance, ResolveErrorKind> {
        let RegistrationData {
            instantiator,
            dependencies,
            params,
            ..
        } = registration;

        let result = match instantiator {
            Instantiator::Factory(factory) => factory(&Container {
                inner: self.inner.clone(),
                resolving: resolving.clone(),
            }),
            Instantiator::Constructor(constructor) => {
                let mut arguments = Arguments::new();
                for Dependency { name, service } in dependencies {
                    match self.resolve_in_chain(service, resolving) {
                        Ok(instance) => {
                            arguments.insert(name, Argument::from_instance(instance));
                        }
                        Err(err) => {
                            error!(argument = name, "{}", err);
                            return Err(ResolveErrorKind::Instantiator(InstantiatorErrorKind::Deps(Box::new(err))));
                        }
                    }
                }
                for (name, value) in params {
                    if !arguments.contains(name) {
                        arguments.insert(name, value);
                    }
                }
                if !arguments.is_empty() {
                    debug!(arguments = ?arguments, "Arguments assembled");
                }

                constructor(arguments)
            }
        };

        result.map_err(|err| {
            error!("{}", err);
            ResolveErrorKind::Instantiator(InstantiatorErrorKind::Factory(err))
        })
    }

    /// Removes cached instances of `key` from the singleton cache and the open scopes
    fn evict(&self, key: ServiceKey) -> usize {
        let singleton = self.inner.singletons.lock().remove(&key);
        let scoped: Vec<Instance> = self
            .inner
            .scopes
            .lock()
            .caches_mut()
            .filter_map(|cache| cache.remove(&key))
            .collect();

        usize::from(singleton.is_some()) + scoped.len()
    }

    pub(crate) fn exit_scope(&self, depth: usize, id: u64) {
        let closed = self.inner.scopes.lock().close(depth, id);
        if closed.is_empty() {
            debug!(depth, "Scope already closed by an outer scope");
            return;
        }
        debug!(
            depth,
            instances = closed.iter().map(|scope| scope.cache.len()).sum::<usize>(),
            "Scope exited"
        );
        // Instances are dropped here, after the lock is released
        drop(closed);
    }
}

#[derive(Default)]
pub(crate) struct ContainerInner {
    pub(crate) registry: Mutex<Registry>,
    pub(crate) singletons: Mutex<Cache>,
    pub(crate) scopes: Mutex<ScopeStack>,
}
