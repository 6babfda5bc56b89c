//! Read-only access to a container

use super::Container;
use crate::{error::Error, module::ModuleRef, value::Value};
use indexmap::IndexMap;
use std::sync::Arc;

/// A read-only handle to a [`Container`].
///
/// Resolves modules the same way the container does, but cannot register new ones.
/// Cheap to copy and pass around.
///
/// # Example
/// ```
/// use named_di::{Accessor, Container};
///
/// fn greeting(services: Accessor<'_>) -> String {
///     services.get::<String>("greeting").unwrap()
/// }
///
/// let mut container = Container::new();
/// container.register("greeting", (), || String::from("hello"));
///
/// assert_eq!(greeting(container.accessor()), "hello");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Accessor<'c> {
    container: &'c Container,
}

impl<'c> Accessor<'c> {
    #[inline]
    pub(super) fn new(container: &'c Container) -> Self {
        Self { container }
    }

    /// See [`Container::lookup`]
    #[inline]
    pub fn lookup<'a>(&self, module: impl Into<ModuleRef<'a>>) -> Result<Value, Error> {
        self.container.lookup(module)
    }

    /// See [`Container::get`]
    #[inline]
    pub fn get<'a, T: Clone + Send + Sync + 'static>(&self, module: impl Into<ModuleRef<'a>>) -> Result<T, Error> {
        self.container.get(module)
    }

    /// See [`Container::get_shared`]
    #[inline]
    pub fn get_shared<'a, T: Send + Sync + 'static>(&self, module: impl Into<ModuleRef<'a>>) -> Result<Arc<T>, Error> {
        self.container.get_shared(module)
    }

    /// See [`Container::get_many`]
    #[inline]
    pub fn get_many<I, S>(&self, ids: I) -> Result<IndexMap<String, Value>, Error>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>
    {
        self.container.get_many(ids)
    }

    /// See [`Container::contains`]
    #[inline]
    pub fn contains<'a>(&self, module: impl Into<ModuleRef<'a>>) -> bool {
        self.container.contains(module)
    }
}
