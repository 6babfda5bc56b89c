//! Module handles and the dependency annotation helper
//!
//! A [`Module`] is a named factory with an attached list of dependencies.
//! Clones of a module share the same factory, so a module can also be used
//! as a lookup key once it is registered.

use self::factory::{make_factory_fn, FactoryFn, FromArgs, GenericFactory};
use std::{
    fmt::{self, Debug},
    sync::atomic::{AtomicUsize, Ordering},
};

pub mod factory;

/// Identity of a module factory.
///
/// Two [`Module`] handles have the same identity only if one is a clone of the other.
/// Identities are never reused within a process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FactoryId(usize);

static NEXT_FACTORY_ID: AtomicUsize = AtomicUsize::new(0);

impl FactoryId {
    #[inline]
    fn next() -> Self {
        Self(NEXT_FACTORY_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// A named factory together with its declared dependencies
#[derive(Clone)]
pub struct Module {
    id: FactoryId,
    name: String,
    dependencies: Vec<ModuleKey>,
    factory: FactoryFn,
}

impl Debug for Module {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Module")
            .field("name", &self.name)
            .field("dependencies", &self.dependencies)
            .finish_non_exhaustive()
    }
}

impl Module {
    /// Creates a module named `name` from a factory.
    ///
    /// The factory parameters are filled with the declared dependencies, in order.
    pub fn new<F, Args>(name: impl Into<String>, factory: F) -> Self
    where
        F: GenericFactory<Args>,
        Args: FromArgs
    {
        Self {
            id: FactoryId::next(),
            name: name.into(),
            dependencies: Vec::new(),
            factory: make_factory_fn(factory),
        }
    }

    /// Creates a module named after the factory function itself.
    ///
    /// Intended for `fn` items: `Module::from_fn(database)` is named `"database"`.
    /// Closures have no meaningful name, use [`Module::new`] for them.
    pub fn from_fn<F, Args>(factory: F) -> Self
    where
        F: GenericFactory<Args>,
        Args: FromArgs
    {
        Self::new(fn_name::<F>(), factory)
    }

    /// Appends dependencies to the attached list and returns the module.
    ///
    /// Accepts a single name or module, or a sequence of them.
    /// Appending accumulates, it never replaces what is already attached.
    #[inline]
    pub fn depends_on(mut self, deps: impl IntoDependencies) -> Self {
        self.add_dependencies(deps);
        self
    }

    /// Appends dependencies to the attached list
    #[inline]
    pub fn add_dependencies(&mut self, deps: impl IntoDependencies) -> &mut Self {
        self.dependencies.extend(deps.into_dependencies());
        self
    }

    /// Returns the module's own name
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the attached dependencies
    #[inline]
    pub fn dependencies(&self) -> &[ModuleKey] {
        &self.dependencies
    }

    /// Returns the identity of the module's factory
    #[inline]
    pub fn id(&self) -> FactoryId {
        self.id
    }

    #[inline]
    pub(crate) fn into_parts(self) -> (String, Vec<ModuleKey>, FactoryFn) {
        (self.name, self.dependencies, self.factory)
    }
}

/// Attaches dependencies to a module before it is registered.
///
/// Equivalent to [`Module::add_dependencies`]. Returns the module to allow chaining.
///
/// # Example
/// ```
/// use named_di::{dependency, Container, Module};
///
/// let bar = Module::new("bar", || 1);
/// let baz = Module::new("baz", || 2);
/// let mut foo = Module::new("foo", |bar: i32, baz: i32| bar + baz);
///
/// dependency(&mut foo, &bar);
/// dependency(&mut foo, ["baz"]);
///
/// let mut container = Container::new();
/// container
///     .register_module(bar)
///     .register_module(baz)
///     .register_module(foo);
///
/// assert_eq!(container.get::<i32>("foo").unwrap(), 3);
/// ```
#[inline]
pub fn dependency(module: &mut Module, deps: impl IntoDependencies) -> &mut Module {
    module.add_dependencies(deps)
}

/// A declared dependency: either a module name or a module factory
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ModuleKey {
    /// Dependency declared by name
    Name(String),
    /// Dependency declared by factory identity, with the module's name for diagnostics
    Factory(FactoryId, String),
}

impl ModuleKey {
    /// Returns the name used in diagnostics
    #[inline]
    pub fn name(&self) -> &str {
        match self {
            ModuleKey::Name(name) | ModuleKey::Factory(_, name) => name,
        }
    }

    /// Borrows the key as a lookup reference
    #[inline]
    pub fn as_module_ref(&self) -> ModuleRef<'_> {
        match self {
            ModuleKey::Name(name) => ModuleRef::ByName(name),
            ModuleKey::Factory(id, name) => ModuleRef::ByFactory(*id, name),
        }
    }
}

impl From<&str> for ModuleKey {
    #[inline]
    fn from(name: &str) -> Self {
        ModuleKey::Name(name.to_owned())
    }
}

impl From<String> for ModuleKey {
    #[inline]
    fn from(name: String) -> Self {
        ModuleKey::Name(name)
    }
}

impl From<&String> for ModuleKey {
    #[inline]
    fn from(name: &String) -> Self {
        ModuleKey::Name(name.clone())
    }
}

impl From<&Module> for ModuleKey {
    #[inline]
    fn from(module: &Module) -> Self {
        ModuleKey::Factory(module.id(), module.name.clone())
    }
}

/// A lookup reference: either a name (map access)
/// or a factory identity (secondary index)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModuleRef<'a> {
    /// Look up by registered id
    ByName(&'a str),
    /// Look up by factory identity, the name is only used in diagnostics
    ByFactory(FactoryId, &'a str),
}

impl<'a> ModuleRef<'a> {
    /// Returns the name used in diagnostics
    #[inline]
    pub fn name(&self) -> &'a str {
        match *self {
            ModuleRef::ByName(name) | ModuleRef::ByFactory(_, name) => name,
        }
    }
}

impl<'a> From<&'a str> for ModuleRef<'a> {
    #[inline]
    fn from(name: &'a str) -> Self {
        ModuleRef::ByName(name)
    }
}

impl<'a> From<&'a String> for ModuleRef<'a> {
    #[inline]
    fn from(name: &'a String) -> Self {
        ModuleRef::ByName(name)
    }
}

impl<'a> From<&'a Module> for ModuleRef<'a> {
    #[inline]
    fn from(module: &'a Module) -> Self {
        ModuleRef::ByFactory(module.id(), &module.name)
    }
}

impl<'a> From<&'a ModuleKey> for ModuleRef<'a> {
    #[inline]
    fn from(key: &'a ModuleKey) -> Self {
        key.as_module_ref()
    }
}

/// A trait for values that can be turned into a list of declared dependencies:
/// a single name or module, or an array, slice or `Vec` of them.
/// `()` declares no dependencies.
pub trait IntoDependencies {
    /// Converts `self` into ordered dependency keys
    fn into_dependencies(self) -> Vec<ModuleKey>;
}

impl IntoDependencies for () {
    #[inline]
    fn into_dependencies(self) -> Vec<ModuleKey> {
        Vec::new()
    }
}

macro_rules! define_single_dependency {
    ($($T:ty),*) => {
        $(
        impl IntoDependencies for $T {
            #[inline]
            fn into_dependencies(self) -> Vec<ModuleKey> {
                vec![self.into()]
            }
        }
        )*
    }
}

define_single_dependency! { &str, String, &String, &Module, ModuleKey }

impl<T: Into<ModuleKey>> IntoDependencies for Vec<T> {
    #[inline]
    fn into_dependencies(self) -> Vec<ModuleKey> {
        self.into_iter().map(Into::into).collect()
    }
}

impl<T: Into<ModuleKey>, const N: usize> IntoDependencies for [T; N] {
    #[inline]
    fn into_dependencies(self) -> Vec<ModuleKey> {
        self.into_iter().map(Into::into).collect()
    }
}

impl<T: Into<ModuleKey> + Clone> IntoDependencies for &[T] {
    #[inline]
    fn into_dependencies(self) -> Vec<ModuleKey> {
        self.iter().cloned().map(Into::into).collect()
    }
}

/// Last path segment of a function's type name, without generic arguments
fn fn_name<F>() -> &'static str {
    let full = std::any::type_name::<F>();
    let path = full.split('<').next().unwrap_or(full);
    path.rsplit("::").next().unwrap_or(path)
}
