use alloc::boxed::Box;
use core::fmt::{self, Display, Formatter};

use crate::any::TypeInfo;

/// Identifier of an abstract capability a caller can ask the container for.
///
/// Keys are derived from Rust types, usually trait objects:
/// ```rust
/// use lifestyle::ServiceKey;
///
/// trait Storage {}
///
/// assert_eq!(ServiceKey::of::<dyn Storage>(), ServiceKey::of::<dyn Storage>());
/// assert_ne!(ServiceKey::of::<dyn Storage>(), ServiceKey::of::<u8>());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ServiceKey {
    type_info: TypeInfo,
}

impl ServiceKey {
    #[inline]
    #[must_use]
    pub fn of<I: ?Sized + 'static>() -> Self {
        Self {
            type_info: TypeInfo::of::<I>(),
        }
    }

    #[inline]
    #[must_use]
    pub const fn type_info(&self) -> TypeInfo {
        self.type_info
    }

    /// Full type name of the service
    #[inline]
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.type_info.name
    }
}

impl Display for ServiceKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_info.short_name())
    }
}

/// Chain of services, rendered as `A -> B -> A`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServicePath(pub Box<[ServiceKey]>);

impl Display for ServicePath {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for (index, key) in self.0.iter().enumerate() {
            if index > 0 {
                f.write_str(" -> ")?;
            }
            write!(f, "{key}")?;
        }
        Ok(())
    }
}
