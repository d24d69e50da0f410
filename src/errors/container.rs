use crate::key::ServiceKey;

#[derive(thiserror::Error, Debug)]
pub enum RegisterErrorKind {
    #[error("Registration of {service} has neither a constructor nor a factory")]
    NoInstantiator { service: ServiceKey },
}
