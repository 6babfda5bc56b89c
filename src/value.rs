//! Type-erased values produced by module factories

use crate::error::Error;
use std::{
    any::{type_name, Any},
    fmt::{self, Debug},
    sync::Arc,
};

type ArcValue = Arc<
    dyn Any
    + Send
    + Sync
>;

/// A resolved module value.
///
/// Cloning is cheap, all clones point to the same memoized instance.
#[derive(Clone)]
pub struct Value {
    inner: ArcValue,
}

impl Debug for Value {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Value(..)")
    }
}

impl Value {
    /// Wraps a value
    #[inline]
    pub fn new<T: Send + Sync + 'static>(value: T) -> Self {
        Self { inner: Arc::new(value) }
    }

    /// Returns `true` if the inner value is a `T`
    #[inline]
    pub fn is<T: Send + Sync + 'static>(&self) -> bool {
        self.inner.is::<T>()
    }

    /// Returns a reference to the inner value if it is a `T`
    #[inline]
    pub fn downcast_ref<T: Send + Sync + 'static>(&self) -> Option<&T> {
        self.inner.downcast_ref::<T>()
    }

    /// Returns a shared pointer to the inner value if it is a `T`
    #[inline]
    pub fn downcast<T: Send + Sync + 'static>(&self) -> Option<Arc<T>> {
        self.inner.clone().downcast::<T>().ok()
    }

    /// Returns `true` if both values point to the same instance
    #[inline]
    pub fn ptr_eq(&self, other: &Value) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// Downcasts the value on behalf of `module`
    #[inline]
    pub(crate) fn downcast_for<T: Send + Sync + 'static>(&self, module: &str) -> Result<Arc<T>, Error> {
        self.downcast::<T>().ok_or_else(|| Error::ResolveFailed {
            module: module.to_owned(),
            type_name: type_name::<T>(),
        })
    }
}
