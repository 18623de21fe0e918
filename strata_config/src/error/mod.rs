//! Error types produced by configuration stores and views.

mod constructors;
mod types;

pub use types::ConfigError;

#[cfg(test)]
mod tests;
