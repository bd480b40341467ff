//! Read-only registries shared between interpreters.
//!
//! The builtin table is built once and may back any number of runs; the
//! algorithm table is built once per run before the introduction executes.
//! Neither changes afterwards, so a plain `Arc` is enough.

use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

pub struct SharedRegistry<T>(Arc<T>);

impl<T> SharedRegistry<T> {
    pub fn new(registry: T) -> Self {
        SharedRegistry(Arc::new(registry))
    }

    /// `true` when both handles point at the same registry.
    pub fn shares(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl<T: Default> Default for SharedRegistry<T> {
    fn default() -> Self {
        SharedRegistry::new(T::default())
    }
}

impl<T> Clone for SharedRegistry<T> {
    fn clone(&self) -> Self {
        SharedRegistry(Arc::clone(&self.0))
    }
}

impl<T> Deref for SharedRegistry<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.0
    }
}

impl<T: fmt::Debug> fmt::Debug for SharedRegistry<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SharedRegistry").field(&*self.0).finish()
    }
}
