//! # named-di
//!
//! > A small dependency injection container that resolves named modules lazily,
//! > memoizes them and validates the dependency graph up front.
//!
//! ## Features
//! * Modules registered by name or by their factory function
//! * Dependencies passed to factories as typed positional arguments
//! * Every factory runs at most once
//! * Static validation of missing dependencies and cycles, without running factories
//!
//! ## Example
//! ```
//! use named_di::{Container, Module};
//!
//! fn database() -> String {
//!     String::from("postgres://localhost")
//! }
//!
//! let db = Module::from_fn(database);
//! let repository = Module::new("repository", |db: String| format!("repo({db})"))
//!     .depends_on(&db);
//!
//! let mut container = Container::named("app");
//! container
//!     .register_module(db)
//!     .register_module(repository);
//!
//! container.validate().unwrap();
//!
//! let repository: String = container.get("repository").unwrap();
//! assert_eq!(repository, "repo(postgres://localhost)");
//! ```

#![forbid(unsafe_code)]
#![deny(unreachable_pub)]

pub use crate::{
    config::ContainerConfig,
    container::{Accessor, Container},
    error::Error,
    module::{
        dependency,
        factory::{FromArgs, GenericFactory},
        FactoryId,
        IntoDependencies,
        Module,
        ModuleKey,
        ModuleRef,
    },
    value::Value,
};

pub mod config;
pub mod container;
pub mod error;
pub mod module;
pub mod value;

mod registry;
