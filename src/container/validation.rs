//! Static validation of the dependency graph

use super::Container;
use crate::{error::Error, module::ModuleRef, registry::Registry};
use std::{
    collections::{HashMap, HashSet},
    iter,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    /// On the current DFS path
    Visiting,
    /// Fully processed
    Visited,
}

/// Color-marking DFS over the registered dependency edges
struct CycleDetector<'a> {
    registry: &'a Registry,
    marks: HashMap<&'a str, Mark>,
    path: Vec<&'a str>,
    cycles: Vec<Vec<String>>,
}

impl<'a> CycleDetector<'a> {
    fn new(registry: &'a Registry) -> Self {
        Self {
            registry,
            marks: HashMap::with_capacity(registry.len()),
            path: Vec::new(),
            cycles: Vec::new(),
        }
    }

    /// Visits every registered id in registration order and returns the closed cycle paths
    fn run(mut self) -> Vec<Vec<String>> {
        let registry = self.registry;
        for id in registry.ids() {
            if !self.marks.contains_key(id) {
                self.visit(id);
            }
        }
        self.cycles
    }

    fn visit(&mut self, id: &'a str) {
        let registry = self.registry;
        self.marks.insert(id, Mark::Visiting);
        self.path.push(id);

        if let Some(declaration) = registry.get(id) {
            for dep in declaration.dependencies() {
                // unregistered dependencies are reported by the missing dependency pass
                let Some(dep) = registry.id_of(dep.as_module_ref()) else {
                    continue;
                };
                match self.marks.get(dep).copied() {
                    Some(Mark::Visited) => {}
                    Some(Mark::Visiting) => self.record(dep),
                    None => self.visit(dep),
                }
            }
        }

        self.path.pop();
        self.marks.insert(id, Mark::Visited);
    }

    fn record(&mut self, id: &'a str) {
        if let Some(start) = self.path.iter().position(|on_path| *on_path == id) {
            let cycle = self.path[start..]
                .iter()
                .copied()
                .chain(iter::once(id))
                .map(str::to_owned)
                .collect();
            self.cycles.push(cycle);
        }
    }
}

impl Container {
    /// Validates that the dependency graph is complete and acyclic, without running any factory.
    ///
    /// Cycles are looked for first. If there are none, every registered module's
    /// dependency chain is checked for unregistered ids. With
    /// [`crate::ContainerConfig::with_exhaustive_validation`] the second pass runs regardless.
    ///
    /// All problems are reported at once as [`Error::Validation`].
    ///
    /// # Example
    /// ```
    /// use named_di::{Container, Error};
    ///
    /// let mut container = Container::new();
    /// container
    ///     .register("foo", "bar", |bar: i32| bar)
    ///     .register("baz", "test", |test: i32| test);
    ///
    /// let err = container.validate().unwrap_err();
    /// let missing: Vec<_> = err.errors().iter().filter_map(Error::module).collect();
    ///
    /// assert_eq!(missing, ["bar", "test"]);
    /// ```
    pub fn validate(&self) -> Result<(), Error> {
        let mut errors: Vec<Error> = CycleDetector::new(&self.registry)
            .run()
            .into_iter()
            .map(|path| Error::cyclic(path, self.name()))
            .collect();

        if errors.is_empty() || self.config.exhaustive_validation() {
            let missing = self.registry
                .ids()
                .filter_map(|id| self.trace(ModuleRef::ByName(id), None, &mut HashSet::new()).err());
            errors.extend(missing);
        }

        if errors.is_empty() {
            #[cfg(feature = "tracing")]
            tracing::debug!(modules = self.len(), "dependency graph is valid");
            Ok(())
        } else {
            #[cfg(feature = "tracing")]
            tracing::debug!(errors = errors.len(), "dependency graph is invalid");
            Err(Error::Validation { errors })
        }
    }
}
