//! Read surface shared by [`FlatStore`] and [`LayeredView`].
//!
//! Implementors supply exact/section resolution and the resolved flat
//! dictionary; the casting accessors, key listings and Base64 helpers are
//! provided once here so both stores and views behave identically.
//!
//! [`LayeredView`]: crate::LayeredView

mod cast;

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::num::NonZeroUsize;
use std::sync::Arc;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use crate::key_path::{self, FlatMap};
use crate::{ConfigError, ConfigResult, FlatStore, Nested, Value};

pub use cast::{FALSE_LITERALS, TRUE_LITERALS, parse_bool};

/// Stored key that shadows the computed [`Lookup::keys`] listing.
pub const RESERVED_KEYS: &str = "keys";
/// Stored key that shadows the computed [`Lookup::values`] listing.
pub const RESERVED_VALUES: &str = "values";
/// Stored key that shadows the computed [`Lookup::items`] listing.
pub const RESERVED_ITEMS: &str = "items";

/// Result of resolving a key path.
#[derive(Clone, Debug, PartialEq)]
pub enum Entry {
    /// The path names a stored leaf.
    Value(Value),
    /// The path names a prefix; the section holds the keys below it with
    /// the prefix stripped.
    Section(FlatStore),
}

impl Entry {
    /// Returns the leaf if this entry is a [`Entry::Value`].
    #[must_use]
    pub const fn as_value(&self) -> Option<&Value> {
        match self {
            Self::Value(value) => Some(value),
            Self::Section(_) => None,
        }
    }

    /// Returns the section if this entry is a [`Entry::Section`].
    #[must_use]
    pub const fn as_section(&self) -> Option<&FlatStore> {
        match self {
            Self::Section(section) => Some(section),
            Self::Value(_) => None,
        }
    }

    /// Consume the entry, returning the leaf if present.
    #[must_use]
    pub fn into_value(self) -> Option<Value> {
        match self {
            Self::Value(value) => Some(value),
            Self::Section(_) => None,
        }
    }

    /// Consume the entry, returning the section if present.
    #[must_use]
    pub fn into_section(self) -> Option<FlatStore> {
        match self {
            Self::Section(section) => Some(section),
            Self::Value(_) => None,
        }
    }
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(value) => fmt::Display::fmt(value, f),
            Self::Section(section) => fmt::Display::fmt(section, f),
        }
    }
}

impl From<Value> for Entry {
    fn from(value: Value) -> Self {
        Self::Value(value)
    }
}

impl From<FlatStore> for Entry {
    fn from(section: FlatStore) -> Self {
        Self::Section(section)
    }
}

/// Outcome of a listing call whose name may also be a stored key.
///
/// Configurations may legitimately contain keys called `keys`, `values` or
/// `items`. When such a key exists the listing methods return it as
/// [`Reserved::Literal`] instead of computing the listing.
#[derive(Clone, Debug, PartialEq)]
pub enum Reserved<T> {
    /// The literal stored entry named like the listing.
    Literal(Entry),
    /// The computed listing.
    Computed(T),
}

impl<T> Reserved<T> {
    /// Returns the computed listing, or `None` when a literal key shadowed it.
    #[must_use]
    pub fn computed(self) -> Option<T> {
        match self {
            Self::Computed(listing) => Some(listing),
            Self::Literal(_) => None,
        }
    }

    /// Returns the literal entry, if one shadowed the listing.
    #[must_use]
    pub fn literal(self) -> Option<Entry> {
        match self {
            Self::Literal(entry) => Some(entry),
            Self::Computed(_) => None,
        }
    }
}

fn check_depth(depth: Option<usize>) -> ConfigResult<Option<NonZeroUsize>> {
    depth
        .map(|d| NonZeroUsize::new(d).ok_or_else(|| Arc::new(ConfigError::InvalidDepth)))
        .transpose()
}

fn computed_keys(flat: &FlatMap, depth: Option<NonZeroUsize>) -> BTreeSet<String> {
    flat.keys()
        .map(|key| depth.map_or(key.as_str(), |d| key_path::truncate(key, d)))
        .map(str::to_owned)
        .collect()
}

fn not_a_value(key: &str, expected: &'static str, section: &FlatStore) -> Arc<ConfigError> {
    Arc::new(ConfigError::InvalidCast {
        key: key.to_owned(),
        expected,
        value: section.to_string(),
    })
}

/// Read access to a configuration addressed by dotted key paths.
pub trait Lookup {
    /// Resolve `path` to a leaf or a section.
    ///
    /// An exact key wins; otherwise every key below `path` forms a section.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::KeyNotFound`] when neither exists.
    fn get(&self, path: &str) -> ConfigResult<Entry>;

    /// Resolve only the keys below `path`, ignoring an exact leaf.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::KeyNotFound`] when no key lies below `path`.
    fn section(&self, path: &str) -> ConfigResult<FlatStore>;

    /// Return the fully resolved flat dictionary.
    fn as_dict(&self) -> FlatMap;

    /// Return the resolved dictionary rebuilt as a nested mapping.
    fn as_nested(&self) -> Nested {
        key_path::unflatten(&self.as_dict())
    }

    /// Whether `path` resolves to a leaf or a section.
    fn contains(&self, path: &str) -> bool {
        self.get(path).is_ok()
    }

    /// Resolve `path`, falling back to `default` when it is missing.
    ///
    /// # Errors
    ///
    /// Propagates any failure other than [`ConfigError::KeyNotFound`].
    fn get_or(&self, path: &str, default: Value) -> ConfigResult<Entry> {
        match self.get(path) {
            Err(err) if err.is_key_not_found() => Ok(Entry::Value(default)),
            other => other,
        }
    }

    /// Resolve `path` and require a leaf.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::KeyNotFound`] when `path` is missing and
    /// [`ConfigError::InvalidCast`] when it names a section.
    fn get_value(&self, path: &str) -> ConfigResult<Value> {
        match self.get(path)? {
            Entry::Value(value) => Ok(value),
            Entry::Section(section) => Err(not_a_value(path, "value", &section)),
        }
    }

    /// Read `path` as a boolean.
    ///
    /// Text is trimmed and lowercased, then matched against
    /// [`TRUE_LITERALS`] and [`FALSE_LITERALS`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBooleanLiteral`] for unrecognised text.
    fn get_bool(&self, path: &str) -> ConfigResult<bool> {
        cast::to_bool(path, &self.get_value(path)?)
    }

    /// Read `path` as a signed integer.
    ///
    /// Booleans become `0` or `1` and text is parsed after trimming. Floats
    /// convert only when they have no fractional part: `3.0` reads as `3`,
    /// while `3.5` is rejected rather than truncated.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidCast`] when the value is not integral.
    fn get_int(&self, path: &str) -> ConfigResult<i64> {
        cast::to_int(path, &self.get_value(path)?)
    }

    /// Read `path` as a float.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidCast`] when the value is not numeric.
    fn get_float(&self, path: &str) -> ConfigResult<f64> {
        cast::to_float(path, &self.get_value(path)?)
    }

    /// Render `path` into `fmt`, replacing each `{}` with the display form
    /// of the entry. `{{` and `}}` render as literal braces.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::KeyNotFound`] when `path` is missing.
    fn get_str(&self, path: &str, fmt: &str) -> ConfigResult<String> {
        Ok(cast::format_with(fmt, &self.get(path)?.to_string()))
    }

    /// Read the section below `path` as a flat dictionary with the prefix
    /// stripped.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::KeyNotFound`] when no key lies below `path`.
    fn get_dict(&self, path: &str) -> ConfigResult<FlatMap> {
        Ok(self.section(path)?.into_flat())
    }

    /// Base64-encode the bytes of the value at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::KeyNotFound`] when `path` is missing.
    fn base64_encode(&self, path: &str) -> ConfigResult<String> {
        Ok(STANDARD.encode(self.get_value(path)?.to_bytes()))
    }

    /// Strictly Base64-decode the bytes of the value at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidEncoding`] when the value is not valid
    /// padded Base64.
    fn base64_decode(&self, path: &str) -> ConfigResult<Vec<u8>> {
        let raw = self.get_value(path)?.to_bytes();
        STANDARD.decode(raw).map_err(|source| {
            Arc::new(ConfigError::InvalidEncoding {
                key: path.to_owned(),
                source,
            })
        })
    }

    /// Return the stored entry named `name`, if any.
    ///
    /// # Errors
    ///
    /// Propagates failures other than [`ConfigError::KeyNotFound`].
    fn reserved(&self, name: &str) -> ConfigResult<Option<Entry>> {
        match self.get(name) {
            Ok(entry) => Ok(Some(entry)),
            Err(err) if err.is_key_not_found() => Ok(None),
            Err(err) => Err(err),
        }
    }

    /// List the distinct key paths, truncated to `depth` segments.
    ///
    /// A stored `keys` entry takes precedence over the listing.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidDepth`] when `depth` is `Some(0)`.
    fn keys(&self, depth: Option<usize>) -> ConfigResult<Reserved<BTreeSet<String>>> {
        let depth = check_depth(depth)?;
        if let Some(entry) = self.reserved(RESERVED_KEYS)? {
            return Ok(Reserved::Literal(entry));
        }
        Ok(Reserved::Computed(computed_keys(&self.as_dict(), depth)))
    }

    /// List the entries behind each key of [`Lookup::keys`].
    ///
    /// A stored `values` entry takes precedence over the listing.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidDepth`] when `depth` is `Some(0)`.
    fn values(&self, depth: Option<usize>) -> ConfigResult<Reserved<Vec<Entry>>> {
        let depth = check_depth(depth)?;
        if let Some(entry) = self.reserved(RESERVED_VALUES)? {
            return Ok(Reserved::Literal(entry));
        }
        let values = computed_keys(&self.as_dict(), depth)
            .iter()
            .map(|key| self.get(key))
            .collect::<ConfigResult<Vec<_>>>()?;
        Ok(Reserved::Computed(values))
    }

    /// Map each key of [`Lookup::keys`] to its entry.
    ///
    /// A stored `items` entry takes precedence over the listing.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidDepth`] when `depth` is `Some(0)`.
    fn items(&self, depth: Option<usize>) -> ConfigResult<Reserved<BTreeMap<String, Entry>>> {
        let depth = check_depth(depth)?;
        if let Some(entry) = self.reserved(RESERVED_ITEMS)? {
            return Ok(Reserved::Literal(entry));
        }
        let items = computed_keys(&self.as_dict(), depth)
            .into_iter()
            .map(|key| self.get(&key).map(|entry| (key, entry)))
            .collect::<ConfigResult<BTreeMap<_, _>>>()?;
        Ok(Reserved::Computed(items))
    }

    /// Number of resolved leaves.
    fn len(&self) -> usize {
        self.as_dict().len()
    }

    /// Whether no leaves resolve.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
