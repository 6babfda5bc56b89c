//! Module declarations and their resolution state

use crate::{
    error::Error,
    module::{factory::FactoryFn, FactoryId, Module, ModuleKey, ModuleRef},
    value::Value,
};
use indexmap::IndexMap;
use std::{cell::OnceCell, collections::HashMap};

/// A registered module: its factory, declared dependencies and memoized value
pub(crate) struct Declaration {
    dependencies: Vec<ModuleKey>,
    factory: FactoryFn,
    handle: FactoryId,
    value: OnceCell<Value>,
}

impl Declaration {
    #[inline]
    pub(crate) fn new(dependencies: Vec<ModuleKey>, factory: FactoryFn, handle: FactoryId) -> Self {
        Self {
            dependencies,
            factory,
            handle,
            value: OnceCell::new(),
        }
    }

    #[inline]
    pub(crate) fn dependencies(&self) -> &[ModuleKey] {
        &self.dependencies
    }

    #[inline]
    pub(crate) fn value(&self) -> Option<&Value> {
        self.value.get()
    }

    #[inline]
    pub(crate) fn is_resolved(&self) -> bool {
        self.value.get().is_some()
    }

    /// Runs the factory once and memoizes its result
    pub(crate) fn construct(&self, id: &str, args: &[Value]) -> Result<Value, Error> {
        if let Some(value) = self.value.get() {
            return Ok(value.clone());
        }
        let value = (self.factory)(id, args)?;
        Ok(self.value.get_or_init(|| value).clone())
    }
}

/// Insertion-ordered map of declarations with a factory identity index
#[derive(Default)]
pub(crate) struct Registry {
    declarations: IndexMap<String, Declaration>,
    by_factory: HashMap<FactoryId, String>,
}

impl Registry {
    /// Inserts a declaration under `id`, returning the one it replaced.
    ///
    /// An overridden id keeps its original position.
    fn insert(&mut self, id: String, dependencies: Vec<ModuleKey>, factory: FactoryFn, handle: FactoryId) -> Option<Declaration> {
        let declaration = Declaration::new(dependencies, factory, handle);
        let replaced = self.declarations.insert(id, declaration);
        if let Some(old) = &replaced {
            self.reindex(old.handle);
        }
        self.reindex(handle);
        replaced
    }

    /// Inserts a module under its own name or an explicit id
    #[inline]
    pub(crate) fn insert_module(&mut self, id: Option<String>, module: Module) -> (String, Option<Declaration>) {
        let handle = module.id();
        let (name, dependencies, factory) = module.into_parts();
        let id = id.unwrap_or(name);
        let replaced = self.insert(id.clone(), dependencies, factory, handle);
        (id, replaced)
    }

    /// Finds a declaration by name or by factory identity
    #[inline]
    pub(crate) fn find(&self, module: ModuleRef<'_>) -> Option<(&str, &Declaration)> {
        let id = match module {
            ModuleRef::ByName(name) => name,
            ModuleRef::ByFactory(handle, _) => self.by_factory.get(&handle)?.as_str(),
        };
        self.declarations
            .get_key_value(id)
            .map(|(id, declaration)| (id.as_str(), declaration))
    }

    /// Resolves a lookup reference to the registered id, if any
    #[inline]
    pub(crate) fn id_of(&self, module: ModuleRef<'_>) -> Option<&str> {
        self.find(module).map(|(id, _)| id)
    }

    #[inline]
    pub(crate) fn get(&self, id: &str) -> Option<&Declaration> {
        self.declarations.get(id)
    }

    #[inline]
    pub(crate) fn ids(&self) -> impl Iterator<Item = &str> {
        self.declarations.keys().map(String::as_str)
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.declarations.len()
    }

    /// Points `handle` to the first declaration in registration order
    /// that uses this factory, or drops it if none does
    fn reindex(&mut self, handle: FactoryId) {
        let first = self.declarations
            .iter()
            .find(|(_, declaration)| declaration.handle == handle)
            .map(|(id, _)| id.clone());
        match first {
            Some(id) => self.by_factory.insert(handle, id),
            None => self.by_factory.remove(&handle),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::Registry;
    use crate::module::{Module, ModuleRef};
    use std::sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    };

    #[test]
    fn it_finds_by_name_and_by_factory() {
        let module = Module::new("foo", || 1);
        let mut registry = Registry::default();
        registry.insert_module(None, module.clone());

        assert_eq!(registry.id_of(ModuleRef::ByName("foo")), Some("foo"));
        assert_eq!(registry.id_of(ModuleRef::from(&module)), Some("foo"));
        assert!(registry.find(ModuleRef::ByName("bar")).is_none());
    }

    #[test]
    fn it_indexes_module_under_explicit_id() {
        let module = Module::new("foo", || 1);
        let mut registry = Registry::default();
        let (id, replaced) = registry.insert_module(Some("bar".into()), module.clone());

        assert_eq!(id, "bar");
        assert!(replaced.is_none());
        assert_eq!(registry.id_of(ModuleRef::from(&module)), Some("bar"));
        assert!(registry.get("foo").is_none());
    }

    #[test]
    fn override_keeps_position_and_drops_value() {
        let mut registry = Registry::default();
        registry.insert_module(None, Module::new("foo", || 1));
        registry.insert_module(None, Module::new("bar", || 2));
        registry.get("foo").unwrap().construct("foo", &[]).unwrap();

        let (_, replaced) = registry.insert_module(None, Module::new("foo", || 3));

        assert!(replaced.unwrap().is_resolved());
        assert!(!registry.get("foo").unwrap().is_resolved());
        assert_eq!(registry.ids().collect::<Vec<_>>(), ["foo", "bar"]);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn override_unindexes_replaced_factory() {
        let old = Module::new("foo", || 1);
        let mut registry = Registry::default();
        registry.insert_module(None, old.clone());
        registry.insert_module(None, Module::new("foo", || 2));

        assert!(registry.find(ModuleRef::from(&old)).is_none());
    }

    #[test]
    fn override_moves_index_to_remaining_declaration() {
        let shared = Module::new("shared", || 1);
        let mut registry = Registry::default();
        registry.insert_module(Some("a".into()), shared.clone());
        registry.insert_module(Some("b".into()), shared.clone());

        assert_eq!(registry.id_of(ModuleRef::from(&shared)), Some("a"));

        registry.insert_module(Some("a".into()), Module::new("a", || 2));

        assert_eq!(registry.id_of(ModuleRef::from(&shared)), Some("b"));
    }

    #[test]
    fn re_registering_shared_factory_keeps_first_id() {
        let shared = Module::new("shared", || 1);
        let mut registry = Registry::default();
        registry.insert_module(Some("a".into()), shared.clone());
        registry.insert_module(Some("b".into()), shared.clone());
        registry.insert_module(Some("a".into()), shared.clone());

        assert_eq!(registry.ids().collect::<Vec<_>>(), ["a", "b"]);
        assert_eq!(registry.id_of(ModuleRef::from(&shared)), Some("a"));
    }

    #[test]
    fn later_registration_takes_index_once_earlier_ones_are_gone() {
        let shared = Module::new("shared", || 1);
        let mut registry = Registry::default();
        registry.insert_module(Some("a".into()), Module::new("a", || 0));
        registry.insert_module(Some("b".into()), shared.clone());
        registry.insert_module(Some("a".into()), shared.clone());

        assert_eq!(registry.id_of(ModuleRef::from(&shared)), Some("a"));
    }

    #[test]
    fn it_constructs_once() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let mut registry = Registry::default();
        registry.insert_module(None, Module::new("foo", move || counter.fetch_add(1, Ordering::SeqCst)));
        let declaration = registry.get("foo").unwrap();

        let first = declaration.construct("foo", &[]).unwrap();
        let second = declaration.construct("foo", &[]).unwrap();

        assert!(first.ptr_eq(&second));
        assert!(declaration.value().is_some());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
