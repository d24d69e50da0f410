mod container;
mod instantiate;
mod instantiator;
mod resolve;

pub use container::RegisterErrorKind;
pub use instantiate::InstantiateErrorKind;
pub use instantiator::InstantiatorErrorKind;
pub use resolve::ResolveErrorKind;
