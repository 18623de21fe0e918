//! Adapters turning already-parsed data into [`Nested`](crate::Nested)
//! mappings.
//!
//! None of these read files or parse text. Callers parse with the format
//! crate of their choice and hand the resulting value tree over, or take an
//! environment snapshot once at start-up.

pub mod env;
#[cfg(feature = "serde_json")]
pub mod json;
#[cfg(feature = "toml")]
pub mod toml_table;

use std::sync::Arc;

use crate::{ConfigError, key_path};

/// Error for a table nested inside an array, which cannot be flattened.
fn table_in_array(path: &str) -> Arc<ConfigError> {
    Arc::new(ConfigError::construction(format!(
        "tables inside arrays are not supported (at '{path}')"
    )))
}

/// Path of the `index`-th element of the array at `path`.
fn element_path(path: &str, index: usize) -> String {
    key_path::join(Some(path), &index.to_string())
}

#[cfg(test)]
mod tests;
