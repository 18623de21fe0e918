//! Constructors for `ConfigError` variants used across the crate.

use std::sync::Arc;

use camino::Utf8Path;

use super::ConfigError;

impl ConfigError {
    /// Construct a [`ConfigError::KeyNotFound`] for `key`.
    ///
    /// # Examples
    ///
    /// ```
    /// use strata_config::ConfigError;
    /// let e = ConfigError::key_not_found("db.host");
    /// assert!(matches!(e, ConfigError::KeyNotFound { .. }));
    /// ```
    #[must_use]
    pub fn key_not_found(key: impl Into<String>) -> Self {
        Self::KeyNotFound { key: key.into() }
    }

    /// Construct a [`ConfigError::Construction`] carrying `message`.
    #[must_use]
    pub fn construction(message: impl Into<String>) -> Self {
        Self::Construction {
            message: message.into(),
        }
    }

    /// Construct a [`ConfigError::File`] for `path`.
    #[must_use]
    pub fn file(path: &Utf8Path, source: std::io::Error) -> Self {
        Self::File {
            path: path.to_path_buf(),
            source,
        }
    }

    /// Whether this error reports a missing key.
    ///
    /// Layered reads skip layers that fail this way and stop on anything
    /// else.
    #[must_use]
    pub const fn is_key_not_found(&self) -> bool {
        matches!(self, Self::KeyNotFound { .. })
    }

    /// Construct a shared [`ConfigError::KeyNotFound`].
    #[must_use]
    pub fn key_not_found_arc(key: impl Into<String>) -> Arc<Self> {
        Arc::new(Self::key_not_found(key))
    }
}
