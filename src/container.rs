//! Dependency Injection container and tools

use crate::{
    config::ContainerConfig,
    error::Error,
    module::{factory::{FromArgs, GenericFactory}, IntoDependencies, Module, ModuleKey, ModuleRef},
    registry::Registry,
    value::Value,
};
use indexmap::IndexMap;
use std::{
    fmt::{self, Debug},
    sync::Arc,
};

pub use self::accessor::Accessor;

pub mod accessor;
mod resolver;
mod validation;

/// Represents a DI container that registers named modules
/// and lazily resolves them together with their dependencies.
///
/// Every module is constructed at most once, the result is memoized.
/// Lookups take `&self`, registration requires `&mut self`, so a factory
/// can never register modules while the container is resolving.
///
/// # Example
/// ```
/// use named_di::Container;
///
/// let mut container = Container::named("app");
/// container
///     .register("host", (), || String::from("localhost"))
///     .register("port", (), || 5432_u16)
///     .register("url", ["host", "port"], |host: String, port: u16| format!("{host}:{port}"));
///
/// container.validate().unwrap();
///
/// let url: String = container.get("url").unwrap();
/// assert_eq!(url, "localhost:5432");
/// ```
#[derive(Default)]
pub struct Container {
    config: ContainerConfig,
    registry: Registry,
}

impl Debug for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Container")
            .field("name", &self.config.name())
            .field("modules", &self.registry.ids().collect::<Vec<_>>())
            .finish()
    }
}

impl Container {
    /// Creates an empty, unnamed container
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty container whose name prefixes diagnostic messages
    #[inline]
    pub fn named(name: impl Into<String>) -> Self {
        Self::with_config(ContainerConfig::new().with_name(name))
    }

    /// Creates an empty container with the given configuration
    #[inline]
    pub fn with_config(config: ContainerConfig) -> Self {
        Self {
            config,
            registry: Registry::default(),
        }
    }

    /// Returns the container configuration
    #[inline]
    pub fn config(&self) -> &ContainerConfig {
        &self.config
    }

    /// Returns the container name
    #[inline]
    pub fn name(&self) -> Option<&str> {
        self.config.name()
    }

    /// Registers a factory under `id` with an explicit list of dependencies.
    ///
    /// The factory receives the resolved dependencies in declared order.
    /// Registering an existing `id` replaces it together with its memoized value.
    pub fn register<F, Args>(&mut self, id: impl Into<String>, deps: impl IntoDependencies, factory: F) -> &mut Self
    where
        F: GenericFactory<Args>,
        Args: FromArgs
    {
        let module = Module::new(id, factory).depends_on(deps);
        self.insert(None, module)
    }

    /// Registers a module under `id`, using the dependencies attached to it.
    ///
    /// The module can be used as a lookup key afterwards.
    #[inline]
    pub fn register_as(&mut self, id: impl Into<String>, module: Module) -> &mut Self {
        self.insert(Some(id.into()), module)
    }

    /// Registers a module under its own name, using the dependencies attached to it
    #[inline]
    pub fn register_module(&mut self, module: Module) -> &mut Self {
        self.insert(None, module)
    }

    fn insert(&mut self, id: Option<String>, module: Module) -> &mut Self {
        let (id, replaced) = self.registry.insert_module(id, module);
        if replaced.is_some() {
            self.overridden(&id);
        }
        self
    }

    #[cfg(feature = "tracing")]
    fn overridden(&self, id: &str) {
        if self.config.warn_on_override() {
            tracing::warn!(
                module = %id,
                container = self.name().unwrap_or_default(),
                "overriding registered module"
            );
        }
    }

    #[cfg(not(feature = "tracing"))]
    #[inline]
    fn overridden(&self, _id: &str) {}

    /// Resolves a module by name or by module handle and returns its type-erased value.
    ///
    /// Dependencies are resolved depth-first in declared order,
    /// every factory runs at most once.
    #[inline]
    pub fn lookup<'a>(&self, module: impl Into<ModuleRef<'a>>) -> Result<Value, Error> {
        self.resolve(module.into(), None, &mut Vec::new())
    }

    /// Resolves a module and returns a cloned instance.
    /// `T` must implement [`Clone`] otherwise use [`Container::get_shared`]
    /// that returns a shared pointer.
    #[inline]
    pub fn get<'a, T: Clone + Send + Sync + 'static>(&self, module: impl Into<ModuleRef<'a>>) -> Result<T, Error> {
        self.get_shared::<T>(module)
            .map(|value| value.as_ref().clone())
    }

    /// Resolves a module and returns a shared pointer
    #[inline]
    pub fn get_shared<'a, T: Send + Sync + 'static>(&self, module: impl Into<ModuleRef<'a>>) -> Result<Arc<T>, Error> {
        let module = module.into();
        self.lookup(module)?.downcast_for::<T>(module.name())
    }

    /// Resolves several modules by name.
    ///
    /// Fails on the first module that cannot be resolved, no partial result is returned.
    pub fn get_many<I, S>(&self, ids: I) -> Result<IndexMap<String, Value>, Error>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>
    {
        ids.into_iter()
            .map(|id| {
                let id = id.as_ref();
                self.lookup(id).map(|value| (id.to_owned(), value))
            })
            .collect()
    }

    /// Returns a read-only handle that can resolve but not register modules
    #[inline]
    pub fn accessor(&self) -> Accessor<'_> {
        Accessor::new(self)
    }

    /// Returns `true` if the module is registered
    #[inline]
    pub fn contains<'a>(&self, module: impl Into<ModuleRef<'a>>) -> bool {
        self.registry.find(module.into()).is_some()
    }

    /// Returns `true` if the module is registered and its value is memoized
    #[inline]
    pub fn is_resolved<'a>(&self, module: impl Into<ModuleRef<'a>>) -> bool {
        self.registry
            .find(module.into())
            .is_some_and(|(_, declaration)| declaration.is_resolved())
    }

    /// Returns the declared dependencies of a registered module
    #[inline]
    pub fn dependencies<'a>(&self, module: impl Into<ModuleRef<'a>>) -> Option<&[ModuleKey]> {
        self.registry
            .find(module.into())
            .map(|(_, declaration)| declaration.dependencies())
    }

    /// Returns registered ids in registration order
    #[inline]
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.registry.ids()
    }

    /// Returns the number of registered modules
    #[inline]
    pub fn len(&self) -> usize {
        self.registry.len()
    }

    /// Returns `true` if no module is registered
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
