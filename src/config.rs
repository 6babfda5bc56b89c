//! Container configuration

use serde::Deserialize;

/// Represents a container configuration
///
/// Can be built with the `with_*` methods or deserialized from any serde format:
/// ```
/// use named_di::ContainerConfig;
///
/// let config = ContainerConfig::new()
///     .with_name("app")
///     .with_exhaustive_validation();
///
/// assert_eq!(config.name(), Some("app"));
/// assert!(config.warn_on_override());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ContainerConfig {
    /// Container name used in diagnostic messages
    ///
    /// Default: `None`
    name: Option<String>,

    /// Specifies whether overriding a registered module emits a warning
    ///
    /// Default: `true`
    warn_on_override: bool,

    /// Specifies whether validation looks for missing dependencies
    /// even if cycles were found
    ///
    /// Default: `false`
    exhaustive_validation: bool,
}

impl Default for ContainerConfig {
    #[inline]
    fn default() -> Self {
        Self {
            name: None,
            warn_on_override: true,
            exhaustive_validation: false,
        }
    }
}

impl ContainerConfig {
    /// Creates a default container configuration
    ///
    /// Defaults:
    /// - name: `None`
    /// - warn_on_override: `true`
    /// - exhaustive_validation: `false`
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the container name used in diagnostic messages
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Silences the warning emitted when a module is overridden
    ///
    /// Default: `true`
    pub fn without_override_warnings(mut self) -> Self {
        self.warn_on_override = false;
        self
    }

    /// Makes validation report missing dependencies alongside cycles.
    ///
    /// By default cycle errors suppress the missing dependency check.
    pub fn with_exhaustive_validation(mut self) -> Self {
        self.exhaustive_validation = true;
        self
    }

    /// Returns the container name
    #[inline]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Returns whether overriding a module emits a warning
    #[inline]
    pub fn warn_on_override(&self) -> bool {
        self.warn_on_override
    }

    /// Returns whether validation is exhaustive
    #[inline]
    pub fn exhaustive_validation(&self) -> bool {
        self.exhaustive_validation
    }
}
