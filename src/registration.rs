use alloc::{collections::BTreeMap, sync::Arc, vec::Vec};
use core::marker::PhantomData;

use crate::{
    arguments::{Argument, Arguments},
    dependency::Dependency,
    errors::{InstantiateErrorKind, RegisterErrorKind},
    instantiator::{boxed_constructor, boxed_factory, Instantiator},
    key::ServiceKey,
    lifetime::Lifetime,
    Container,
};

/// Recipe for building the service `I`.
///
/// A registration carries exactly one instantiator: either a [`Registration::constructor`],
/// which receives the arguments assembled from the declared [`Registration::dependency`] list
/// and the fixed [`Registration::param`] values, or a [`Registration::factory`], which receives the
/// container itself and ignores both. Setting one replaces the other.
///
/// # Examples
/// ```rust
/// use lifestyle::{Container, Registration};
/// use std::sync::Arc;
///
/// trait Greeter: Send + Sync {
///     fn greet(&self) -> String;
/// }
///
/// struct English {
///     name: String,
/// }
///
/// impl Greeter for English {
///     fn greet(&self) -> String {
///         format!("Hello, {}", self.name)
///     }
/// }
///
/// let container = Container::new();
/// container
///     .register(
///         Registration::<dyn Greeter>::new()
///             .constructor(|args| Ok(Arc::new(English { name: args.get("name")? }) as Arc<dyn Greeter>))
///             .param("name", String::from("world"))
///             .singleton(),
///     )
///     .unwrap();
///
/// assert_eq!(container.resolve::<dyn Greeter>().unwrap().greet(), "Hello, world");
/// ```
pub struct Registration<I: ?Sized> {
    instantiator: Option<Instantiator>,
    lifetime: Lifetime,
    dependencies: Vec<Dependency>,
    params: BTreeMap<&'static str, Argument>,
    _provides: PhantomData<fn() -> Arc<I>>,
}

impl<I> Registration<I>
where
    I: ?Sized + Send + Sync + 'static,
{
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            instantiator: None,
            lifetime: Lifetime::default(),
            dependencies: Vec::new(),
            params: BTreeMap::new(),
            _provides: PhantomData,
        }
    }

    /// Registration that always hands out the given, already built instance.
    /// Use it with [`Lifetime::Singleton`] to keep the instance in the singleton cache.
    #[inline]
    #[must_use]
    pub fn instance(instance: Arc<I>) -> Self {
        Self::new().factory(move |_| Ok(instance.clone()))
    }

    #[inline]
    #[must_use]
    pub fn constructor<F>(mut self, constructor: F) -> Self
    where
        F: Fn(Arguments) -> Result<Arc<I>, InstantiateErrorKind> + Send + Sync + 'static,
    {
        self.instantiator = Some(Instantiator::Constructor(boxed_constructor(constructor)));
        self
    }

    #[inline]
    #[must_use]
    pub fn factory<F>(mut self, factory: F) -> Self
    where
        F: Fn(&Container) -> Result<Arc<I>, InstantiateErrorKind> + Send + Sync + 'static,
    {
        self.instantiator = Some(Instantiator::Factory(boxed_factory(factory)));
        self
    }

    #[inline]
    #[must_use]
    pub fn lifetime(mut self, lifetime: Lifetime) -> Self {
        self.lifetime = lifetime;
        self
    }

    #[inline]
    #[must_use]
    pub fn singleton(self) -> Self {
        self.lifetime(Lifetime::Singleton)
    }

    #[inline]
    #[must_use]
    pub fn scoped(self) -> Self {
        self.lifetime(Lifetime::Scoped)
    }

    #[inline]
    #[must_use]
    pub fn per_request(self) -> Self {
        self.lifetime(Lifetime::PerRequest)
    }

    /// Declares that the constructor parameter `name` is filled with the resolved `D`.
    /// Declaring the same name twice keeps the last declaration.
    #[inline]
    #[must_use]
    pub fn dependency<D: ?Sized + 'static>(mut self, name: &'static str) -> Self {
        self.dependencies.retain(|dependency| dependency.name != name);
        self.dependencies.push(Dependency {
            name,
            service: ServiceKey::of::<D>(),
        });
        self
    }

    /// Adds a fixed constructor parameter.
    /// A dependency declared with the same name takes precedence over it.
    #[inline]
    #[must_use]
    pub fn param<T: Send + Sync + 'static>(mut self, name: &'static str, value: T) -> Self {
        self.params.insert(name, Argument::value(value));
        self
    }

    #[inline]
    #[must_use]
    pub fn key(&self) -> ServiceKey {
        ServiceKey::of::<I>()
    }

    #[inline]
    #[must_use]
    pub fn dependencies(&self) -> &[Dependency] {
        &self.dependencies
    }

    pub(crate) fn into_data(self) -> Result<RegistrationData, RegisterErrorKind> {
        let service = self.key();
        let Some(instantiator) = self.instantiator else {
            return Err(RegisterErrorKind::NoInstantiator { service });
        };

        Ok(RegistrationData {
            instantiator,
            lifetime: self.lifetime,
            dependencies: self.dependencies,
            params: self.params,
        })
    }
}

impl<I> Default for Registration<I>
where
    I: ?Sized + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone)]
pub(crate) struct RegistrationData {
    pub(crate) instantiator: Instantiator,
    pub(crate) lifetime: Lifetime,
    pub(crate) dependencies: Vec<Dependency>,
    pub(crate) params: BTreeMap<&'static str, Argument>,
}

#[cfg(test)]
mod tests {
    use super::Registration;
    use crate::{errors::RegisterErrorKind, instantiator::Instantiator, key::ServiceKey, lifetime::Lifetime, registry::Registry};

    use alloc::sync::Arc;

    trait Clock: Send + Sync {}
    trait Mailer: Send + Sync {}

    struct SystemClock;

    impl Clock for SystemClock {}

    #[test]
    fn test_into_data_without_instantiator() {
        let registration = Registration::<dyn Clock>::new().singleton();

        assert!(matches!(
            registration.into_data(),
            Err(RegisterErrorKind::NoInstantiator { service }) if service == ServiceKey::of::<dyn Clock>()
        ));
    }

    #[test]
    fn test_last_instantiator_wins() {
        let data = Registration::<dyn Clock>::new()
            .constructor(|_| Ok(Arc::new(SystemClock) as Arc<dyn Clock>))
            .factory(|_| Ok(Arc::new(SystemClock) as Arc<dyn Clock>))
            .into_data()
            .unwrap();
        assert!(matches!(data.instantiator, Instantiator::Factory(_)));

        let data = Registration::instance(Arc::new(SystemClock) as Arc<dyn Clock>)
            .constructor(|_| Ok(Arc::new(SystemClock) as Arc<dyn Clock>))
            .into_data()
            .unwrap();
        assert!(matches!(data.instantiator, Instantiator::Constructor(_)));
        assert_eq!(data.lifetime, Lifetime::PerRequest);
    }

    #[test]
    fn test_dependency_redeclared() {
        let registration = Registration::<dyn Mailer>::new()
            .dependency::<dyn Clock>("clock")
            .dependency::<SystemClock>("clock")
            .dependency::<dyn Clock>("fallback");

        let dependencies = registration.dependencies();
        assert_eq!(dependencies.len(), 2);
        assert_eq!(dependencies[0].name, "clock");
        assert_eq!(dependencies[0].service, ServiceKey::of::<SystemClock>());
        assert_eq!(dependencies[1].name, "fallback");
    }

    #[test]
    fn test_registry_replaces() {
        let key = ServiceKey::of::<dyn Clock>();
        let mut registry = Registry::default();

        let first = Registration::<dyn Clock>::new()
            .constructor(|_| Ok(Arc::new(SystemClock) as Arc<dyn Clock>))
            .into_data()
            .unwrap();
        let second = Registration::<dyn Clock>::new()
            .constructor(|_| Ok(Arc::new(SystemClock) as Arc<dyn Clock>))
            .scoped()
            .into_data()
            .unwrap();

        assert!(registry.insert(key, first).is_none());
        assert!(registry.insert(key, second).is_some());
        assert_eq!(registry.len(), 1);
        assert!(registry.contains(&key));
        assert_eq!(registry.get(&key).unwrap().lifetime, Lifetime::Scoped);
    }
}
