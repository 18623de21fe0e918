//! Hierarchical, layered configuration addressed by dotted key paths.
//!
//! A [`FlatStore`] holds one configuration source as a flat mapping from
//! paths such as `db.pool.size` to scalar [`Value`]s. A [`LayeredView`]
//! stacks several stores and answers each lookup from the first layer that
//! has the key. Both implement [`Lookup`], which provides typed getters,
//! section extraction and key enumeration.
//!
//! Sources never read files themselves: [`sources`] converts parsed JSON or
//! TOML values and environment snapshots into [`Nested`] mappings, and
//! [`compose::LayerComposer`] orders them by priority.
//!
//! # Example
//!
//! ```rust
//! use strata_config::{FlatStore, Lookup, layered};
//!
//! let mut defaults = FlatStore::default();
//! defaults.set("db.host", "localhost");
//! defaults.set("db.port", 5432);
//! let mut env = FlatStore::default();
//! env.set("db.port", "6543");
//!
//! let view = layered([env, defaults])?;
//! assert_eq!(view.get_int("db.port")?, 6543);
//! assert_eq!(view.get_str("db.host", "{}")?, "localhost");
//! # Ok::<_, std::sync::Arc<strata_config::ConfigError>>(())
//! ```

pub mod compose;
pub mod dump;
mod error;
pub mod key_path;
mod lookup;
mod result_ext;
pub mod sources;
mod store;
mod value;
mod view;

pub use compose::{LayerComposer, Provenance, SourceLayer};
pub use error::ConfigError;
pub use lookup::{
    Entry, FALSE_LITERALS, Lookup, RESERVED_ITEMS, RESERVED_KEYS, RESERVED_VALUES, Reserved,
    TRUE_LITERALS, parse_bool,
};
pub use result_ext::{ConfigResult, ConfigResultExt};
pub use store::FlatStore;
pub use value::{Nested, Node, Value};
pub use view::{LayeredView, layered};
