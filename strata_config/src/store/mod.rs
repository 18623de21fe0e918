//! Single-layer configuration store keyed by dotted paths.

use std::borrow::Cow;
use std::fmt;

use serde::ser::{Serialize, Serializer};

use crate::key_path::{self, FlatMap};
use crate::lookup::{Entry, Lookup};
use crate::{ConfigError, ConfigResult, Nested, Node, Value};

/// A flat mapping from dotted key paths to leaf values.
///
/// Nested input is flattened on construction and on every update, so no
/// stored value is ever a mapping. When built with case folding every key
/// segment, and every path used to query the store, is lowercased.
///
/// # Examples
///
/// ```
/// use strata_config::{FlatStore, Lookup, Nested, Node, Value};
///
/// let mut nested = Nested::new();
/// nested.insert("db".into(), Node::table([("port", Node::from(5432))]));
/// let store = FlatStore::from_nested(&nested, false);
///
/// assert_eq!(store.get_int("db.port")?, 5432);
/// let db = store.section("db")?;
/// assert_eq!(db.value("port"), Some(&Value::Integer(5432)));
/// # Ok::<_, std::sync::Arc<strata_config::ConfigError>>(())
/// ```
#[derive(Clone, Debug, Default)]
pub struct FlatStore {
    entries: FlatMap,
    case_fold: bool,
}

impl FlatStore {
    /// Create an empty store.
    #[must_use]
    pub const fn new(case_fold: bool) -> Self {
        Self {
            entries: FlatMap::new(),
            case_fold,
        }
    }

    /// Build a store by flattening `nested`.
    #[must_use]
    pub fn from_nested(nested: &Nested, case_fold: bool) -> Self {
        Self {
            entries: key_path::flatten(nested, case_fold),
            case_fold,
        }
    }

    /// Build a store from keys that are already dotted paths.
    #[must_use]
    pub fn from_flat(flat: FlatMap, case_fold: bool) -> Self {
        let entries = if case_fold {
            flat.into_iter()
                .map(|(key, value)| (key.to_lowercase(), value))
                .collect()
        } else {
            flat
        };
        Self { entries, case_fold }
    }

    /// Whether keys are lowercased on storage and lookup.
    #[must_use]
    pub const fn case_fold(&self) -> bool {
        self.case_fold
    }

    fn key<'a>(&self, path: &'a str) -> Cow<'a, str> {
        key_path::fold(path, self.case_fold)
    }

    /// Return the leaf stored at exactly `path`.
    #[must_use]
    pub fn value(&self, path: &str) -> Option<&Value> {
        self.entries.get(self.key(path).as_ref())
    }

    /// Borrow the underlying flat mapping.
    #[must_use]
    pub const fn entries(&self) -> &FlatMap {
        &self.entries
    }

    /// Consume the store, returning the flat mapping.
    #[must_use]
    pub fn into_flat(self) -> FlatMap {
        self.entries
    }

    /// Iterate over stored keys and leaves in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), value))
    }

    /// Store `node` at `path`.
    ///
    /// A table is flattened below `path` and its leaves written over any
    /// existing keys; other keys below `path` are left in place. A leaf is
    /// stored at `path` directly.
    pub fn set(&mut self, path: &str, node: impl Into<Node>) {
        let key = self.key(path).into_owned();
        match node.into() {
            Node::Leaf(value) => {
                self.entries.insert(key, value);
            }
            Node::Table(table) => {
                key_path::flatten_into(&mut self.entries, Some(&key), &table, self.case_fold);
            }
        }
    }

    /// Flatten `nested` and write its leaves over the store.
    pub fn update(&mut self, nested: &Nested) {
        key_path::flatten_into(&mut self.entries, None, nested, self.case_fold);
    }

    /// Write every leaf of `other` over the store.
    pub fn merge(&mut self, other: &Self) {
        for (key, value) in &other.entries {
            let folded = key_path::fold(key, self.case_fold).into_owned();
            self.entries.insert(folded, value.clone());
        }
    }

    /// Remove `path` and every key below it.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::KeyNotFound`] when nothing matched.
    pub fn delete(&mut self, path: &str) -> ConfigResult<()> {
        let prefix = self.key(path).into_owned();
        let before = self.entries.len();
        self.entries
            .retain(|key, _| !key_path::is_at_or_below(key, &prefix));
        if self.entries.len() == before {
            return Err(ConfigError::key_not_found_arc(path));
        }
        Ok(())
    }

    /// Remove every key.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Resolve `path`, then remove it and every key below it.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::KeyNotFound`] when nothing matched.
    pub fn pop(&mut self, path: &str) -> ConfigResult<Entry> {
        let entry = self.get(path)?;
        self.delete(path)?;
        Ok(entry)
    }

    /// Like [`FlatStore::pop`], returning `default` when `path` is missing.
    pub fn pop_or(&mut self, path: &str, default: Value) -> Entry {
        self.pop(path).unwrap_or(Entry::Value(default))
    }

    /// Resolve `path`, storing `default` there first when it is missing.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::KeyNotFound`] when `default` is an empty table,
    /// since storing it writes no keys.
    pub fn set_default(&mut self, path: &str, default: impl Into<Node>) -> ConfigResult<Entry> {
        match self.get(path) {
            Err(err) if err.is_key_not_found() => {
                self.set(path, default);
                self.get(path)
            }
            other => other,
        }
    }
}

impl Lookup for FlatStore {
    fn get(&self, path: &str) -> ConfigResult<Entry> {
        if let Some(value) = self.value(path) {
            return Ok(Entry::Value(value.clone()));
        }
        self.section(path).map(Entry::Section)
    }

    fn section(&self, path: &str) -> ConfigResult<FlatStore> {
        let prefix = self.key(path);
        let entries: FlatMap = self
            .entries
            .iter()
            .filter_map(|(key, value)| {
                key_path::strip_section(key, &prefix).map(|rest| (rest.to_owned(), value.clone()))
            })
            .collect();
        if entries.is_empty() {
            return Err(ConfigError::key_not_found_arc(path));
        }
        Ok(Self {
            entries,
            case_fold: self.case_fold,
        })
    }

    fn as_dict(&self) -> FlatMap {
        self.entries.clone()
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}

impl PartialEq for FlatStore {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl fmt::Display for FlatStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (key, value)) in self.entries.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{key}: {value}")?;
        }
        f.write_str("}")
    }
}

impl Serialize for FlatStore {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.entries.serialize(serializer)
    }
}

impl<'a> IntoIterator for &'a FlatStore {
    type Item = (&'a String, &'a Value);
    type IntoIter = std::collections::btree_map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
