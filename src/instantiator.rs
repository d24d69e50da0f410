use alloc::sync::Arc;
use tracing::debug;

use crate::{any::Instance, arguments::Arguments, errors::InstantiateErrorKind, Container};

pub(crate) type BoxedConstructor = Arc<dyn Fn(Arguments) -> Result<Instance, InstantiateErrorKind> + Send + Sync>;
pub(crate) type BoxedFactory = Arc<dyn Fn(&Container) -> Result<Instance, InstantiateErrorKind> + Send + Sync>;

/// How an instance is built
#[derive(Clone)]
pub(crate) enum Instantiator {
    /// Receives the arguments assembled from declared dependencies and fixed parameters
    Constructor(BoxedConstructor),
    /// Receives the container itself and resolves whatever it needs
    Factory(BoxedFactory),
}

impl Instantiator {
    #[inline]
    #[must_use]
    pub(crate) const fn kind(&self) -> &'static str {
        match self {
            Instantiator::Constructor(_) => "constructor",
            Instantiator::Factory(_) => "factory",
        }
    }
}

#[must_use]
pub(crate) fn boxed_constructor<I, F>(constructor: F) -> BoxedConstructor
where
    I: ?Sized + Send + Sync + 'static,
    F: Fn(Arguments) -> Result<Arc<I>, InstantiateErrorKind> + Send + Sync + 'static,
{
    Arc::new(move |arguments: Arguments| -> Result<Instance, InstantiateErrorKind> {
        let instance = constructor(arguments)?;

        debug!("Constructed");

        Ok(Arc::new(instance) as Instance)
    })
}

#[must_use]
pub(crate) fn boxed_factory<I, F>(factory: F) -> BoxedFactory
where
    I: ?Sized + Send + Sync + 'static,
    F: Fn(&Container) -> Result<Arc<I>, InstantiateErrorKind> + Send + Sync + 'static,
{
    Arc::new(move |container: &Container| -> Result<Instance, InstantiateErrorKind> {
        let instance = factory(container)?;

        debug!("Produced by factory");

        Ok(Arc::new(instance) as Instance)
    })
}
