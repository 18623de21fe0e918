//! Test helpers shared across crates in the workspace.
//!
//! [`env`] serialises process environment mutation behind RAII guards and
//! [`tree`] reads directory trees back into memory for assertions.

pub mod env;
pub mod tree;
