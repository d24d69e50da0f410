use alloc::boxed::Box;

use super::resolve::ResolveErrorKind;

/// Error returned by user constructors and factories
#[derive(thiserror::Error, Debug)]
pub enum InstantiateErrorKind {
    #[error("Argument `{name}` not found")]
    MissingArgument { name: &'static str },
    #[error("Argument `{name}` isn't of type {expected}")]
    IncorrectArgumentType { name: &'static str, expected: &'static str },
    /// A factory failed to resolve one of the services it asked the container for
    #[error(transparent)]
    Resolve(Box<ResolveErrorKind>),
    #[error(transparent)]
    Custom(#[from] anyhow::Error),
}

impl From<ResolveErrorKind> for InstantiateErrorKind {
    #[inline]
    fn from(err: ResolveErrorKind) -> Self {
        Self::Resolve(Box::new(err))
    }
}
