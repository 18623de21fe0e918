//! Dotted key-path algebra.
//!
//! A key path is a string of segments joined by [`SEPARATOR`]. Flattening
//! walks a [`Nested`] mapping and produces a [`FlatMap`] whose keys are the
//! joined paths of every leaf; unflattening rebuilds the tree.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::num::NonZeroUsize;

use crate::value::{Nested, Node, Value};

/// Segment separator used in key paths.
pub const SEPARATOR: char = '.';

/// A single-level mapping from dotted key path to leaf value.
pub type FlatMap = BTreeMap<String, Value>;

/// Join `child` onto `parent`, treating `None` as the root.
#[must_use]
pub fn join(parent: Option<&str>, child: &str) -> String {
    parent.map_or_else(|| child.to_owned(), |p| format!("{p}{SEPARATOR}{child}"))
}

/// Lowercase `path` when `case_fold` is set.
#[must_use]
pub fn fold(path: &str, case_fold: bool) -> Cow<'_, str> {
    if case_fold {
        Cow::Owned(path.to_lowercase())
    } else {
        Cow::Borrowed(path)
    }
}

/// Returns the remainder of `key` when it lies strictly below `prefix`.
///
/// # Examples
///
/// ```
/// use strata_config::key_path::strip_section;
/// assert_eq!(strip_section("db.host", "db"), Some("host"));
/// assert_eq!(strip_section("dbx.host", "db"), None);
/// assert_eq!(strip_section("db", "db"), None);
/// ```
#[must_use]
pub fn strip_section<'a>(key: &'a str, prefix: &str) -> Option<&'a str> {
    key.strip_prefix(prefix)?.strip_prefix(SEPARATOR)
}

/// Whether `key` equals `prefix` or lies below it.
#[must_use]
pub fn is_at_or_below(key: &str, prefix: &str) -> bool {
    key == prefix || strip_section(key, prefix).is_some()
}

/// Keep only the first `depth` segments of `path`.
///
/// # Examples
///
/// ```
/// use std::num::NonZeroUsize;
/// use strata_config::key_path::truncate;
///
/// let two = NonZeroUsize::new(2).unwrap_or(NonZeroUsize::MIN);
/// assert_eq!(truncate("a.b.c", two), "a.b");
/// assert_eq!(truncate("a", two), "a");
/// ```
#[must_use]
pub fn truncate(path: &str, depth: NonZeroUsize) -> &str {
    path.match_indices(SEPARATOR)
        .nth(depth.get() - 1)
        .and_then(|(end, _)| path.get(..end))
        .unwrap_or(path)
}

/// Flatten `nested` into a new [`FlatMap`].
///
/// Tables expand with their key joined to the parent by [`SEPARATOR`]; every
/// other node becomes a leaf. When two paths collapse onto the same key the
/// one visited last wins. With `case_fold` every segment is lowercased.
///
/// # Examples
///
/// ```
/// use strata_config::key_path::flatten;
/// use strata_config::{Nested, Node};
///
/// let mut nested = Nested::new();
/// nested.insert("A".into(), Node::table([("B", Node::from(1))]));
/// let flat = flatten(&nested, true);
/// assert_eq!(flat.keys().collect::<Vec<_>>(), ["a.b"]);
/// ```
#[must_use]
pub fn flatten(nested: &Nested, case_fold: bool) -> FlatMap {
    let mut out = FlatMap::new();
    flatten_into(&mut out, None, nested, case_fold);
    out
}

/// Flatten `nested` below `prefix`, writing leaves into `out`.
pub(crate) fn flatten_into(
    out: &mut FlatMap,
    prefix: Option<&str>,
    nested: &Nested,
    case_fold: bool,
) {
    for (segment, node) in nested {
        let key = join(prefix, &fold(segment, case_fold));
        match node {
            Node::Table(table) => flatten_into(out, Some(&key), table, case_fold),
            Node::Leaf(value) => {
                out.insert(key, value.clone());
            }
        }
    }
}

/// Rebuild a nested mapping from dotted keys.
///
/// A leaf and a sub-tree cannot share a segment in a tree, so when `flat`
/// holds both `a` and `a.b` the leaf keeps `a` and the sub-tree keys stay
/// dotted beside it (`"a.b"` as a literal key). Flattening the result yields
/// `flat` again.
///
/// # Examples
///
/// ```
/// use strata_config::key_path::{flatten, unflatten, FlatMap};
/// use strata_config::Value;
///
/// let mut flat = FlatMap::new();
/// flat.insert("db.host".into(), Value::from("localhost"));
/// flat.insert("db.port".into(), Value::from(5432));
/// let nested = unflatten(&flat);
/// assert!(nested.get("db").is_some_and(|n| n.as_table().is_some()));
/// assert_eq!(flatten(&nested, false), flat);
/// ```
#[must_use]
pub fn unflatten(flat: &FlatMap) -> Nested {
    let mut root = Nested::new();
    // BTreeMap order visits a key before any key below it.
    for (key, value) in flat {
        insert_path(&mut root, key, value.clone());
    }
    root
}

fn insert_path(table: &mut Nested, path: &str, value: Value) {
    let Some((head, rest)) = path.split_once(SEPARATOR) else {
        table.insert(path.to_owned(), Node::Leaf(value));
        return;
    };
    let slot = table
        .entry(head.to_owned())
        .or_insert_with(|| Node::Table(Nested::new()));
    if let Node::Table(child) = slot {
        insert_path(child, rest, value);
        return;
    }
    table.insert(path.to_owned(), Node::Leaf(value));
}
