//! Describes container errors

use thiserror::Error;

/// Errors produced while registering, resolving or validating modules
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A module or one of its dependencies is not registered
    #[error("Missing {}dependency \"{module}\"{}", parent_prefix(.parent), container_suffix(.container))]
    MissingDependency {
        /// The module that declared the dependency, `None` for a top-level request
        parent: Option<String>,
        /// The identifier that could not be found
        module: String,
        /// Name of the container the lookup ran in
        container: Option<String>,
    },

    /// The dependency graph contains a cycle
    #[error("Cyclical dependencies detected{}: {}", container_suffix(.container), join_path(.path))]
    CyclicDependency {
        /// Closed cycle path, the first and the last ids are the same module
        path: Vec<String>,
        /// Name of the container the cycle was found in
        container: Option<String>,
    },

    /// Aggregate of every problem found by [`crate::Container::validate`]
    #[error("{}", join_messages(.errors))]
    Validation {
        /// Individual errors in the order they were detected
        errors: Vec<Error>,
    },

    /// A resolved value or factory argument is not of the requested type
    #[error("Resolve Error: unable to resolve \"{module}\" as {type_name}")]
    ResolveFailed {
        /// The module whose value had an unexpected type
        module: String,
        /// The requested type
        type_name: &'static str,
    },

    /// Declared dependencies do not match the factory's parameters
    #[error("Resolve Error: \"{module}\" declares {actual} dependencies but its factory takes {expected}")]
    ArityMismatch {
        /// The module being constructed
        module: String,
        /// Number of parameters the factory accepts
        expected: usize,
        /// Number of declared dependencies
        actual: usize,
    },
}

impl Error {
    /// Returns the module this error is about.
    ///
    /// For a cycle this is the first id of the path. For an aggregate it is `None`.
    pub fn module(&self) -> Option<&str> {
        match self {
            Error::MissingDependency { module, .. }
            | Error::ResolveFailed { module, .. }
            | Error::ArityMismatch { module, .. } => Some(module),
            Error::CyclicDependency { path, .. } => path.first().map(String::as_str),
            Error::Validation { .. } => None,
        }
    }

    /// Returns the module that requested a missing dependency, if any
    pub fn parent(&self) -> Option<&str> {
        match self {
            Error::MissingDependency { parent, .. } => parent.as_deref(),
            _ => None,
        }
    }

    /// Returns the individual errors of an aggregate, or this error alone
    pub fn errors(&self) -> &[Error] {
        match self {
            Error::Validation { errors } => errors,
            other => std::slice::from_ref(other),
        }
    }

    #[inline]
    pub(crate) fn missing(parent: Option<&str>, module: &str, container: Option<&str>) -> Self {
        Error::MissingDependency {
            parent: parent.map(str::to_owned),
            module: module.to_owned(),
            container: container.map(str::to_owned),
        }
    }

    #[inline]
    pub(crate) fn cyclic(path: Vec<String>, container: Option<&str>) -> Self {
        Error::CyclicDependency {
            path,
            container: container.map(str::to_owned),
        }
    }
}

fn parent_prefix(parent: &Option<String>) -> String {
    parent
        .as_ref()
        .map(|p| format!("\"{p}\"'s "))
        .unwrap_or_default()
}

fn container_suffix(container: &Option<String>) -> String {
    container
        .as_ref()
        .map(|name| format!(" in container \"{name}\""))
        .unwrap_or_default()
}

fn join_path(path: &[String]) -> String {
    path.join(" -> ")
}

fn join_messages(errors: &[Error]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n\t")
}
