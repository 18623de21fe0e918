//! Primary error enum for store, view and adapter operations.

use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors that can occur while reading, mutating or composing configuration.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// Neither an exact key nor any key below the requested prefix exists.
    #[error("key not found: '{key}'")]
    KeyNotFound {
        /// Dotted key path that was requested.
        key: String,
    },

    /// A value could not be interpreted as a boolean literal.
    #[error("invalid boolean literal for '{key}': '{value}'")]
    InvalidBooleanLiteral {
        /// Key path holding the offending value.
        key: String,
        /// Display form of the rejected value.
        value: String,
    },

    /// A value could not be cast to the requested scalar type.
    #[error("cannot read '{key}' as {expected}: '{value}'")]
    InvalidCast {
        /// Key path holding the offending value.
        key: String,
        /// Name of the requested target type.
        expected: &'static str,
        /// Display form of the rejected value.
        value: String,
    },

    /// A value was not valid Base64.
    #[error("invalid base64 data in '{key}': {source}")]
    InvalidEncoding {
        /// Key path holding the offending value.
        key: String,
        /// Decoder failure.
        #[source]
        source: base64::DecodeError,
    },

    /// A key listing was requested with a depth of zero.
    #[error("key depth must be at least one")]
    InvalidDepth,

    /// A store or view could not be built from the supplied inputs.
    #[error("cannot construct configuration: {message}")]
    Construction {
        /// Human-readable explanation of the failure.
        message: String,
    },

    /// Writing configuration to the filesystem failed.
    #[error("configuration file error in '{path}': {source}")]
    File {
        /// Path that triggered the failure.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}
