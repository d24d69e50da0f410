#![no_std]

extern crate alloc;

pub(crate) mod any;
pub(crate) mod arguments;
pub(crate) mod cache;
pub(crate) mod container;
pub(crate) mod dependency;
pub(crate) mod errors;
pub(crate) mod instantiator;
pub(crate) mod key;
pub(crate) mod lifetime;
pub(crate) mod registration;
pub(crate) mod registry;
pub(crate) mod scope;

pub use any::{Instance, TypeInfo};
pub use arguments::{Argument, Arguments};
pub use container::Container;
pub use dependency::Dependency;
pub use errors::{InstantiateErrorKind, InstantiatorErrorKind, RegisterErrorKind, ResolveErrorKind};
pub use key::{ServiceKey, ServicePath};
pub use lifetime::Lifetime;
pub use registration::Registration;
pub use scope::ScopeGuard;
