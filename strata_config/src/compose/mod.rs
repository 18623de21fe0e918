//! Provenance-tagged layer composition.
//!
//! Source adapters hand their nested mappings to a [`LayerComposer`] in
//! ascending priority: defaults first, explicit overrides last. Building the
//! composer flattens each layer and reverses the order into a
//! [`LayeredView`](crate::LayeredView), so the last layer pushed is read
//! first.
//!
//! # Example
//!
//! ```rust
//! use strata_config::compose::LayerComposer;
//! use strata_config::{Lookup, Nested, Node};
//!
//! let mut defaults = Nested::new();
//! defaults.insert("port".into(), Node::from(3000));
//! let mut overrides = Nested::new();
//! overrides.insert("port".into(), Node::from(4000));
//!
//! let mut composer = LayerComposer::new();
//! composer.push_defaults(defaults);
//! composer.push_override(overrides);
//!
//! let view = composer.build()?;
//! assert_eq!(view.get_int("port")?, 4000);
//! # Ok::<_, std::sync::Arc<strata_config::ConfigError>>(())
//! ```

mod composer;
mod layer;

pub use composer::LayerComposer;
pub use layer::{Provenance, SourceLayer};
