//! Environment variables as a nested mapping.
//!
//! A variable named `APP__DB__HOST` with prefix `APP` and separator `__`
//! becomes the key path `DB.HOST`. Values are kept as text. The scan is a
//! pure function of the snapshot it is given.

use crate::key_path::{self, FlatMap, SEPARATOR};
use crate::{Nested, Value};

/// Build a nested mapping from `(name, value)` pairs.
///
/// Only names starting with `prefix` followed by `separator` are used. The
/// prefix is removed, every `separator` becomes `.`, and leading or trailing
/// dots are trimmed. Names that end up empty are skipped.
///
/// # Examples
///
/// ```
/// use strata_config::sources::env::from_snapshot;
/// use strata_config::{FlatStore, Lookup};
///
/// let vars = [("APP__DB__HOST", "db.local"), ("OTHER", "x")];
/// let nested = from_snapshot(vars, "APP", "__");
/// let store = FlatStore::from_nested(&nested, false);
/// assert_eq!(store.get_str("DB.HOST", "{}")?, "db.local");
/// assert!(!store.contains("OTHER"));
/// # Ok::<_, std::sync::Arc<strata_config::ConfigError>>(())
/// ```
pub fn from_snapshot<I, K, V>(vars: I, prefix: &str, separator: &str) -> Nested
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: Into<String>,
{
    let needle = format!("{prefix}{separator}");
    let mut flat = FlatMap::new();
    for (name, value) in vars {
        let name = name.as_ref();
        if !name.starts_with(&needle) {
            continue;
        }
        let Some(rest) = name.get(prefix.len()..) else {
            continue;
        };
        let key = rest
            .replace(separator, &SEPARATOR.to_string())
            .trim_matches(SEPARATOR)
            .to_owned();
        if key.is_empty() {
            continue;
        }
        flat.insert(key, Value::String(value.into()));
    }
    key_path::unflatten(&flat)
}

/// Snapshot the process environment and convert it with [`from_snapshot`].
///
/// Variables whose name or value is not valid Unicode are skipped.
#[must_use]
pub fn from_process(prefix: &str, separator: &str) -> Nested {
    let vars = std::env::vars_os().filter_map(|(name, value)| {
        Some((name.into_string().ok()?, value.into_string().ok()?))
    });
    from_snapshot(vars, prefix, separator)
}
