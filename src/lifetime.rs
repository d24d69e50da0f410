use core::fmt::{self, Display, Formatter};

/// Rule that decides whether a resolved instance is reused
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Lifetime {
    /// A new instance on every resolution
    #[default]
    PerRequest,
    /// One instance per open scope. Resolution without an open scope fails.
    Scoped,
    /// One instance for the whole life of the container
    Singleton,
}

impl Lifetime {
    #[inline]
    #[must_use]
    pub const fn is_cached(&self) -> bool {
        matches!(self, Lifetime::Scoped | Lifetime::Singleton)
    }

    #[inline]
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Lifetime::PerRequest => "per_request",
            Lifetime::Scoped => "scoped",
            Lifetime::Singleton => "singleton",
        }
    }
}

impl Display for Lifetime {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
