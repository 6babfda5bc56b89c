//! Lazy, memoized resolution of modules and their dependencies

use super::Container;
use crate::{error::Error, module::ModuleRef, registry::Declaration, value::Value};
use std::{collections::HashSet, iter};

impl Container {
    /// Resolves `module` depth-first, constructing unresolved dependencies first.
    ///
    /// `path` holds the ids currently being constructed,
    /// reaching one of them again is reported as a cycle.
    pub(super) fn resolve<'a>(
        &'a self,
        module: ModuleRef<'_>,
        parent: Option<&str>,
        path: &mut Vec<&'a str>
    ) -> Result<Value, Error> {
        let (id, declaration) = self.find(module, parent)?;
        if let Some(value) = declaration.value() {
            return Ok(value.clone());
        }

        if let Some(start) = path.iter().position(|in_flight| *in_flight == id) {
            let cycle = path[start..]
                .iter()
                .copied()
                .chain(iter::once(id))
                .map(str::to_owned)
                .collect();
            return Err(Error::cyclic(cycle, self.name()));
        }

        path.push(id);
        let args = declaration
            .dependencies()
            .iter()
            .map(|dep| self.resolve(dep.as_module_ref(), Some(id), path))
            .collect::<Result<Vec<_>, _>>();
        path.pop();

        #[cfg(feature = "tracing")]
        tracing::trace!(module = %id, "constructing module");
        declaration.construct(id, &args?)
    }

    /// Walks the dependency chain of `module` the same way [`Container::resolve`] does,
    /// without running any factory. Memoized modules are not descended into.
    pub(super) fn trace<'a>(
        &'a self,
        module: ModuleRef<'_>,
        parent: Option<&str>,
        visited: &mut HashSet<&'a str>
    ) -> Result<(), Error> {
        let (id, declaration) = self.find(module, parent)?;
        if declaration.is_resolved() || !visited.insert(id) {
            return Ok(());
        }
        declaration
            .dependencies()
            .iter()
            .try_for_each(|dep| self.trace(dep.as_module_ref(), Some(id), visited))
    }

    #[inline]
    fn find(&self, module: ModuleRef<'_>, parent: Option<&str>) -> Result<(&str, &Declaration), Error> {
        self.registry
            .find(module)
            .ok_or_else(|| Error::missing(parent, module.name(), self.name()))
    }
}
