use alloc::{collections::BTreeMap, sync::Arc};
use core::{
    any::type_name,
    fmt::{self, Debug, Formatter},
};

use crate::{any::Instance, errors::InstantiateErrorKind};

/// Single named constructor argument: either a fixed value or a resolved dependency
#[derive(Clone)]
pub struct Argument(pub(crate) Instance);

impl Argument {
    #[inline]
    #[must_use]
    pub fn value<T: Send + Sync + 'static>(value: T) -> Self {
        Self(Arc::new(value))
    }

    #[inline]
    #[must_use]
    pub fn dependency<D: ?Sized + Send + Sync + 'static>(dependency: Arc<D>) -> Self {
        Self(Arc::new(dependency))
    }

    #[inline]
    #[must_use]
    pub(crate) const fn from_instance(instance: Instance) -> Self {
        Self(instance)
    }
}

/// Named arguments assembled by the container for a constructor.
///
/// Dependencies are stored as `Arc<D>` and read with [`Arguments::dependency`],
/// fixed values are stored as is and read with [`Arguments::get`].
#[derive(Clone, Default)]
pub struct Arguments {
    map: BTreeMap<&'static str, Argument>,
}

impl Arguments {
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self { map: BTreeMap::new() }
    }

    #[inline]
    pub fn insert(&mut self, name: &'static str, argument: Argument) -> Option<Argument> {
        self.map.insert(name, argument)
    }

    #[inline]
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.map.contains_key(name)
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.map.keys().copied()
    }

    /// Gets a fixed value
    ///
    /// # Errors
    /// - [`InstantiateErrorKind::MissingArgument`] if there is no argument with this name
    /// - [`InstantiateErrorKind::IncorrectArgumentType`] if the argument isn't a `T`
    pub fn get<T: Clone + 'static>(&self, name: &'static str) -> Result<T, InstantiateErrorKind> {
        let Some(Argument(value)) = self.map.get(name) else {
            return Err(InstantiateErrorKind::MissingArgument { name });
        };
        value
            .downcast_ref::<T>()
            .cloned()
            .ok_or(InstantiateErrorKind::IncorrectArgumentType {
                name,
                expected: type_name::<T>(),
            })
    }

    /// Gets a fixed value, falling back to `default` when the argument is absent.
    /// A present argument of another type is still an error.
    #[allow(clippy::missing_errors_doc)]
    pub fn get_or<T: Clone + 'static>(&self, name: &'static str, default: T) -> Result<T, InstantiateErrorKind> {
        if self.contains(name) {
            self.get(name)
        } else {
            Ok(default)
        }
    }

    /// Gets a resolved dependency
    ///
    /// # Errors
    /// - [`InstantiateErrorKind::MissingArgument`] if there is no argument with this name
    /// - [`InstantiateErrorKind::IncorrectArgumentType`] if the argument isn't an `Arc<D>`
    pub fn dependency<D: ?Sized + Send + Sync + 'static>(&self, name: &'static str) -> Result<Arc<D>, InstantiateErrorKind> {
        self.get::<Arc<D>>(name)
    }
}

impl Debug for Arguments {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.names()).finish()
    }
}
