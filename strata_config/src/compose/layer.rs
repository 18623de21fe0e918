//! Layer metadata and payloads for composition.

use std::borrow::Cow;

use camino::{Utf8Path, Utf8PathBuf};

use crate::{FlatStore, Nested};

/// Kind of source a layer was read from.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum Provenance {
    /// Built-in default values.
    Defaults,
    /// Values loaded from a configuration file.
    File,
    /// Values collected from environment variables.
    Environment,
    /// Values supplied explicitly by the caller.
    Override,
}

/// A nested mapping tagged with where it came from.
#[derive(Clone, Debug)]
pub struct SourceLayer<'a> {
    provenance: Provenance,
    nested: Cow<'a, Nested>,
    path: Option<Utf8PathBuf>,
}

impl<'a> SourceLayer<'a> {
    /// Construct a layer of default values.
    #[must_use]
    pub const fn defaults(nested: Cow<'a, Nested>) -> Self {
        Self {
            provenance: Provenance::Defaults,
            nested,
            path: None,
        }
    }

    /// Construct a layer read from a configuration file.
    #[must_use]
    pub const fn file(nested: Cow<'a, Nested>, path: Option<Utf8PathBuf>) -> Self {
        Self {
            provenance: Provenance::File,
            nested,
            path,
        }
    }

    /// Construct a layer collected from environment variables.
    #[must_use]
    pub const fn environment(nested: Cow<'a, Nested>) -> Self {
        Self {
            provenance: Provenance::Environment,
            nested,
            path: None,
        }
    }

    /// Construct a layer of explicit overrides.
    #[must_use]
    pub const fn overrides(nested: Cow<'a, Nested>) -> Self {
        Self {
            provenance: Provenance::Override,
            nested,
            path: None,
        }
    }

    /// Returns the provenance of the layer.
    #[must_use]
    pub const fn provenance(&self) -> Provenance {
        self.provenance
    }

    /// Returns the associated path if this layer was read from a file.
    #[must_use]
    pub fn path(&self) -> Option<&Utf8Path> {
        self.path.as_deref()
    }

    /// Borrow the nested mapping.
    #[must_use]
    pub fn nested(&self) -> &Nested {
        &self.nested
    }

    /// Flatten the layer into a store.
    #[must_use]
    pub fn to_store(&self, case_fold: bool) -> FlatStore {
        FlatStore::from_nested(&self.nested, case_fold)
    }

    /// Convert this layer into a `'static` owned variant.
    #[must_use]
    pub fn into_owned(self) -> SourceLayer<'static> {
        SourceLayer {
            provenance: self.provenance,
            nested: Cow::Owned(self.nested.into_owned()),
            path: self.path,
        }
    }
}
