//! Priority-ordered composition of several stores.
//!
//! A [`LayeredView`] resolves reads by scanning its layers from index 0
//! (highest priority) downwards. Scalars come from the first layer that has
//! them; sections from every layer are merged so higher layers override
//! lower ones key by key. Writes land in a single writable layer that is
//! created on first use.

use std::fmt;

use serde::ser::{Serialize, Serializer};
use tracing::debug;

use crate::key_path::FlatMap;
use crate::lookup::{Entry, Lookup};
use crate::{ConfigError, ConfigResult, FlatStore, Nested, Node};

/// Build a view from `stores`, highest priority first.
///
/// # Errors
///
/// Returns [`ConfigError::Construction`] when `stores` is empty.
///
/// # Examples
///
/// ```
/// use strata_config::{FlatStore, Lookup, layered};
///
/// let mut overrides = FlatStore::new(false);
/// overrides.set("db.host", "prod");
/// let mut defaults = FlatStore::new(false);
/// defaults.set("db.host", "localhost");
/// defaults.set("db.port", 5432);
///
/// let view = layered([overrides, defaults])?;
/// assert_eq!(view.get_str("db.host", "{}")?, "prod");
/// assert_eq!(view.get_int("db.port")?, 5432);
/// # Ok::<_, std::sync::Arc<strata_config::ConfigError>>(())
/// ```
pub fn layered<I>(stores: I) -> ConfigResult<LayeredView>
where
    I: IntoIterator<Item = FlatStore>,
{
    LayeredView::new(stores.into_iter().collect())
}

/// Ordered stack of [`FlatStore`] layers read as one configuration.
#[derive(Clone, Debug)]
pub struct LayeredView {
    layers: Vec<FlatStore>,
    writable: bool,
}

impl LayeredView {
    /// Create a view over `layers`, index 0 being the highest priority.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Construction`] when `layers` is empty.
    pub fn new(layers: Vec<FlatStore>) -> ConfigResult<Self> {
        if layers.is_empty() {
            return Err(ConfigError::construction("a layered view needs at least one layer").into());
        }
        Ok(Self {
            layers,
            writable: false,
        })
    }

    /// Borrow the layers, highest priority first.
    #[must_use]
    pub fn layers(&self) -> &[FlatStore] {
        &self.layers
    }

    /// Number of layers, including a writable layer once created.
    #[must_use]
    pub const fn layer_count(&self) -> usize {
        self.layers.len()
    }

    /// Whether writes have created the writable top layer.
    #[must_use]
    pub const fn has_writable_layer(&self) -> bool {
        self.writable
    }

    /// Run `write` against the writable layer, inserting an empty one at the
    /// top on first use.
    fn with_writable<R>(&mut self, write: impl FnOnce(&mut FlatStore) -> R) -> R {
        if self.writable
            && let Some(layer) = self.layers.first_mut()
        {
            return write(layer);
        }
        let case_fold = self.layers.first().is_some_and(FlatStore::case_fold);
        let mut layer = FlatStore::new(case_fold);
        let out = write(&mut layer);
        self.layers.insert(0, layer);
        self.writable = true;
        debug!(
            layers = self.layers.len(),
            case_fold, "created writable configuration layer"
        );
        out
    }

    /// Store `node` at `path` in the writable layer.
    pub fn set(&mut self, path: &str, node: impl Into<Node>) {
        let node = node.into();
        self.with_writable(|layer| layer.set(path, node));
    }

    /// Flatten `nested` into the writable layer.
    pub fn update(&mut self, nested: &Nested) {
        self.with_writable(|layer| layer.update(nested));
    }

    /// Remove `path` and every key below it from every layer.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::KeyNotFound`] when no layer matched.
    pub fn delete(&mut self, path: &str) -> ConfigResult<()> {
        let mut removed = false;
        for layer in &mut self.layers {
            match layer.delete(path) {
                Ok(()) => removed = true,
                Err(err) if err.is_key_not_found() => {}
                Err(err) => return Err(err),
            }
        }
        if removed {
            Ok(())
        } else {
            Err(ConfigError::key_not_found_arc(path))
        }
    }

    /// Remove every key from every layer.
    pub fn clear(&mut self) {
        for layer in &mut self.layers {
            layer.clear();
        }
    }

    /// Resolve `path`, then delete it from every layer.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::KeyNotFound`] when nothing matched.
    pub fn pop(&mut self, path: &str) -> ConfigResult<Entry> {
        let entry = self.get(path)?;
        self.delete(path)?;
        Ok(entry)
    }

    /// Resolve `path`, storing `default` in the writable layer first when it
    /// is missing.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::KeyNotFound`] when `default` is an empty table.
    pub fn set_default(&mut self, path: &str, default: impl Into<Node>) -> ConfigResult<Entry> {
        match self.get(path) {
            Err(err) if err.is_key_not_found() => {
                self.set(path, default);
                self.get(path)
            }
            other => other,
        }
    }

    /// Try `read` against each layer in priority order, collecting every
    /// result that is not a miss.
    fn collect_hits<T>(
        &self,
        path: &str,
        read: impl Fn(&FlatStore) -> ConfigResult<T>,
    ) -> ConfigResult<Vec<T>> {
        let mut found = Vec::new();
        let mut last_err = None;
        for layer in &self.layers {
            match read(layer) {
                Ok(hit) => found.push(hit),
                Err(err) if err.is_key_not_found() => last_err = Some(err),
                Err(err) => return Err(err),
            }
        }
        if found.is_empty() {
            return Err(last_err.unwrap_or_else(|| ConfigError::key_not_found_arc(path)));
        }
        Ok(found)
    }

    fn merge_sections(&self, sections: impl DoubleEndedIterator<Item = FlatStore>) -> FlatStore {
        let case_fold = self.layers.first().is_some_and(FlatStore::case_fold);
        let mut merged = FlatStore::new(case_fold);
        // Lowest priority first so higher layers overwrite shared keys.
        for section in sections.rev() {
            merged.merge(&section);
        }
        merged
    }
}

impl Lookup for LayeredView {
    fn get(&self, path: &str) -> ConfigResult<Entry> {
        let mut found = self.collect_hits(path, |layer| layer.get(path))?.into_iter();
        match found.next() {
            // Once the top hit is a section, lower-priority scalars are ignored.
            Some(Entry::Section(first)) => {
                let rest = found.filter_map(Entry::into_section);
                Ok(Entry::Section(
                    self.merge_sections(std::iter::once(first).chain(rest)),
                ))
            }
            Some(value) => Ok(value),
            None => Err(ConfigError::key_not_found_arc(path)),
        }
    }

    fn section(&self, path: &str) -> ConfigResult<FlatStore> {
        let found = self.collect_hits(path, |layer| layer.section(path))?;
        Ok(self.merge_sections(found.into_iter()))
    }

    fn as_dict(&self) -> FlatMap {
        let mut resolved = FlatMap::new();
        for layer in self.layers.iter().rev() {
            resolved.extend(layer.iter().map(|(key, value)| (key.to_owned(), value.clone())));
        }
        resolved
    }
}

impl PartialEq for LayeredView {
    fn eq(&self, other: &Self) -> bool {
        self.as_dict() == other.as_dict()
    }
}

impl PartialEq<FlatStore> for LayeredView {
    fn eq(&self, other: &FlatStore) -> bool {
        &self.as_dict() == other.entries()
    }
}

impl PartialEq<LayeredView> for FlatStore {
    fn eq(&self, other: &LayeredView) -> bool {
        other == self
    }
}

impl From<&LayeredView> for FlatStore {
    fn from(view: &LayeredView) -> Self {
        let case_fold = view.layers.first().is_some_and(Self::case_fold);
        Self::from_flat(view.as_dict(), case_fold)
    }
}

impl fmt::Display for LayeredView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&FlatStore::from(self), f)
    }
}

impl Serialize for LayeredView {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.as_dict().serialize(serializer)
    }
}

#[cfg(test)]
mod tests;
