//! Extensions for mapping errors to `ConfigResult` concisely.
//!
//! These helpers reduce repetitive `.map_err(|e| Arc::new(ConfigError::…))`
//! patterns when converting error types into the crate's
//! `ConfigResult<T>` alias (`Result<T, Arc<ConfigError>>`).
//!
//! # Examples
//!
//! ```
//! use strata_config::{ConfigError, ConfigResult, ConfigResultExt};
//!
//! fn missing() -> ConfigResult<()> {
//!     Err(ConfigError::key_not_found("db")).into_config()
//! }
//! assert!(missing().is_err());
//! ```

use std::sync::Arc;

use crate::ConfigError;

/// Result alias used throughout the crate.
pub type ConfigResult<T> = Result<T, Arc<ConfigError>>;

/// Generic extension for mapping any `Result<T, E>` with
/// `E: Into<ConfigError>` into a [`ConfigResult<T>`].
pub trait ConfigResultExt<T> {
    /// Convert `Result<T, E>` into `ConfigResult<T>` using `Into<ConfigError>`.
    ///
    /// # Errors
    ///
    /// Propagates the original error after conversion into `Arc<ConfigError>`.
    fn into_config(self) -> ConfigResult<T>;
}

impl<T, E> ConfigResultExt<T> for Result<T, E>
where
    E: Into<ConfigError>,
{
    fn into_config(self) -> ConfigResult<T> {
        self.map_err(|e| Arc::new(e.into()))
    }
}
