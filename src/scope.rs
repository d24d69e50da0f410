use alloc::vec::Vec;
use core::ops::Deref;

use crate::{cache::Cache, Container};

pub(crate) struct Scope {
    pub(crate) id: u64,
    pub(crate) cache: Cache,
}

/// Open scopes, innermost last.
/// Depths are 1-based: depth `n` is the `n`-th open scope.
/// Ids are never reused, so a closed scope can't be mistaken for one opened later at the same depth.
#[derive(Default)]
pub(crate) struct ScopeStack {
    scopes: Vec<Scope>,
    next_id: u64,
}

impl ScopeStack {
    /// Opens a scope with an empty cache and returns its depth and id
    #[inline]
    pub(crate) fn push(&mut self) -> (usize, u64) {
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1);
        self.scopes.push(Scope { id, cache: Cache::new() });
        (self.scopes.len(), id)
    }

    /// Closes the scope `id` at `depth` together with every scope opened inside it.
    /// Returns the closed scopes so their instances can be dropped outside of any lock.
    /// Nothing is closed if that scope is already gone.
    #[inline]
    #[must_use]
    pub(crate) fn close(&mut self, depth: usize, id: u64) -> Vec<Scope> {
        match depth.checked_sub(1).and_then(|index| self.scopes.get(index)) {
            Some(scope) if scope.id == id => self.scopes.split_off(depth - 1),
            _ => Vec::new(),
        }
    }

    #[inline]
    #[must_use]
    pub(crate) fn depth(&self) -> usize {
        self.scopes.len()
    }

    #[inline]
    #[must_use]
    pub(crate) fn current(&self) -> Option<&Scope> {
        self.scopes.last()
    }

    /// Cache of the open scope `id`
    #[inline]
    #[must_use]
    pub(crate) fn get_mut(&mut self, id: u64) -> Option<&mut Cache> {
        self.scopes
            .iter_mut()
            .rev()
            .find(|scope| scope.id == id)
            .map(|scope| &mut scope.cache)
    }

    pub(crate) fn caches_mut(&mut self) -> impl Iterator<Item = &mut Cache> {
        self.scopes.iter_mut().map(|scope| &mut scope.cache)
    }
}

/// Open scope of a [`Container`].
///
/// While the guard is alive, scoped services are cached in its scope.
/// Dropping the guard discards that cache and makes the previously active scope (if any) current again.
/// Dropping an outer guard first closes the scopes nested in it as well; their guards then do nothing.
/// The guard derefs to the container, so it can be used to resolve services directly.
#[must_use = "the scope is closed as soon as the guard is dropped"]
pub struct ScopeGuard<'a> {
    pub(crate) container: &'a Container,
    pub(crate) depth: usize,
    pub(crate) id: u64,
}

impl ScopeGuard<'_> {
    /// Nesting level of this scope, the outermost scope is `1`
    #[inline]
    #[must_use]
    pub const fn depth(&self) -> usize {
        self.depth
    }
}

impl Deref for ScopeGuard<'_> {
    type Target = Container;

    #[inline]
    fn deref(&self) -> &Self::Target {
        self.container
    }
}

impl Drop for ScopeGuard<'_> {
    fn drop(&mut self) {
        self.container.exit_scope(self.depth, self.id);
    }
}
