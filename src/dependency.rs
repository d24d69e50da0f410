use crate::key::ServiceKey;

/// Constructor parameter that is filled by resolving another service
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Dependency {
    pub name: &'static str,
    pub service: ServiceKey,
}
