use alloc::boxed::Box;
use core::any::TypeId;

use super::{instantiate::InstantiateErrorKind, instantiator::InstantiatorErrorKind};
use crate::key::{ServiceKey, ServicePath};

#[derive(thiserror::Error, Debug)]
pub enum ResolveErrorKind {
    #[error("Service {service} isn't registered")]
    NoRegistration { service: ServiceKey },
    #[error("Service {service} is scoped, but there is no active scope")]
    NoActiveScope { service: ServiceKey },
    #[error("Cyclic dependency detected: {path}")]
    CyclicDependency { path: ServicePath },
    #[error("Incorrect instance type. Actual: {actual:?}, expected: {expected:?}")]
    IncorrectType { expected: TypeId, actual: TypeId },
    #[error(transparent)]
    Instantiator(InstantiatorErrorKind<Box<ResolveErrorKind>, InstantiateErrorKind>),
}

impl ResolveErrorKind {
    /// Innermost resolution error, skipping the services that failed because of it.
    /// Follows both declared dependencies and the services a factory resolved itself.
    #[must_use]
    pub fn root_cause(&self) -> &ResolveErrorKind {
        let mut err = self;
        loop {
            match err {
                ResolveErrorKind::Instantiator(
                    InstantiatorErrorKind::Deps(inner) | InstantiatorErrorKind::Factory(InstantiateErrorKind::Resolve(inner)),
                ) => err = &**inner,
                _ => return err,
            }
        }
    }
}
