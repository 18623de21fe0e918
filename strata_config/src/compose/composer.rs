//! Builder that stacks source layers into a layered view.

use std::borrow::Cow;

use camino::Utf8PathBuf;
use tracing::debug;

use crate::{ConfigError, ConfigResult, LayeredView, Nested};

use super::SourceLayer;

/// Builder that accumulates [`SourceLayer`] instances, lowest priority first.
#[derive(Debug, Default)]
pub struct LayerComposer {
    layers: Vec<SourceLayer<'static>>,
    case_fold: bool,
}

impl LayerComposer {
    /// Create an empty composer that preserves key case.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            layers: Vec::new(),
            case_fold: false,
        }
    }

    /// Create a composer with preallocated capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            layers: Vec::with_capacity(capacity),
            case_fold: false,
        }
    }

    /// Lowercase every key segment of every layer when building.
    #[must_use]
    pub fn case_fold(mut self, case_fold: bool) -> Self {
        self.case_fold = case_fold;
        self
    }

    /// Push a defaults layer.
    pub fn push_defaults(&mut self, nested: Nested) {
        self.push_layer(SourceLayer::defaults(Cow::Owned(nested)));
    }

    /// Push a configuration file layer.
    pub fn push_file(&mut self, nested: Nested, path: Option<Utf8PathBuf>) {
        self.push_layer(SourceLayer::file(Cow::Owned(nested), path));
    }

    /// Push an environment layer.
    pub fn push_environment(&mut self, nested: Nested) {
        self.push_layer(SourceLayer::environment(Cow::Owned(nested)));
    }

    /// Push an explicit override layer.
    pub fn push_override(&mut self, nested: Nested) {
        self.push_layer(SourceLayer::overrides(Cow::Owned(nested)));
    }

    /// Push an arbitrary layer.
    pub fn push_layer(&mut self, layer: SourceLayer<'static>) {
        self.layers.push(layer);
    }

    /// Borrow the accumulated layers in push order.
    #[must_use]
    pub fn layers(&self) -> &[SourceLayer<'static>] {
        &self.layers
    }

    /// Flatten every layer and stack them so the last pushed is read first.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Construction`] when no layers were pushed.
    pub fn build(&self) -> ConfigResult<LayeredView> {
        if self.layers.is_empty() {
            return Err(ConfigError::construction("no configuration layers were composed").into());
        }
        let stores = self
            .layers
            .iter()
            .rev()
            .map(|layer| {
                let store = layer.to_store(self.case_fold);
                debug!(
                    provenance = ?layer.provenance(),
                    path = ?layer.path(),
                    keys = store.entries().len(),
                    "composed configuration layer"
                );
                store
            })
            .collect();
        LayeredView::new(stores)
    }
}

impl IntoIterator for LayerComposer {
    type Item = SourceLayer<'static>;
    type IntoIter = std::vec::IntoIter<SourceLayer<'static>>;

    fn into_iter(self) -> Self::IntoIter {
        self.layers.into_iter()
    }
}
