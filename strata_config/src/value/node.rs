//! Nested mapping nodes handed to stores by source adapters.

use std::collections::BTreeMap;

use serde::ser::{Serialize, Serializer};

use super::Value;

/// A nested mapping keyed by single path segments.
pub type Nested = BTreeMap<String, Node>;

/// One entry of a nested mapping: either a leaf value or a sub-table.
#[derive(Clone, Debug, PartialEq)]
pub enum Node {
    /// Scalar leaf.
    Leaf(Value),
    /// Sub-table whose keys extend the parent path.
    Table(Nested),
}

impl Node {
    /// Build a table node from `(key, node)` pairs.
    ///
    /// # Examples
    ///
    /// ```
    /// use strata_config::{Node, Value};
    ///
    /// let node = Node::table([("port", Node::from(8080))]);
    /// assert!(node.as_table().is_some_and(|t| t.contains_key("port")));
    /// ```
    #[must_use]
    pub fn table<K, I>(entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Self)>,
    {
        Self::Table(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// Returns the sub-table if this node is a [`Node::Table`].
    #[must_use]
    pub const fn as_table(&self) -> Option<&Nested> {
        match self {
            Self::Table(table) => Some(table),
            Self::Leaf(_) => None,
        }
    }

    /// Returns the leaf if this node is a [`Node::Leaf`].
    #[must_use]
    pub const fn as_value(&self) -> Option<&Value> {
        match self {
            Self::Leaf(value) => Some(value),
            Self::Table(_) => None,
        }
    }
}

impl Serialize for Node {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Leaf(value) => value.serialize(serializer),
            Self::Table(table) => table.serialize(serializer),
        }
    }
}

impl From<Value> for Node {
    fn from(value: Value) -> Self {
        Self::Leaf(value)
    }
}

impl From<Nested> for Node {
    fn from(table: Nested) -> Self {
        Self::Table(table)
    }
}

macro_rules! leaf_from {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Node {
                fn from(value: $ty) -> Self {
                    Self::Leaf(Value::from(value))
                }
            }
        )*
    };
}

leaf_from!(bool, i32, i64, u32, f64, &str, String, Vec<u8>, &[u8], Vec<Value>);

impl<K: Into<String>> FromIterator<(K, Self)> for Node {
    fn from_iter<I: IntoIterator<Item = (K, Self)>>(iter: I) -> Self {
        Self::table(iter)
    }
}
