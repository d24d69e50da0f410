/// Failure while building an instance: either one of its dependencies couldn't be resolved,
/// or the constructor/factory itself returned an error.
#[derive(thiserror::Error, Debug)]
pub enum InstantiatorErrorKind<DepsErr, FactoryErr> {
    #[error(transparent)]
    Deps(DepsErr),
    #[error(transparent)]
    Factory(FactoryErr),
}
