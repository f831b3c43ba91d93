//! Blockfall (workspace facade crate).
//!
//! Re-exports the playfield engine as `blockfall::{core,types}` so front ends and the
//! integration tests depend on a single package while the implementation lives in
//! dedicated crates under `crates/`.

pub use blockfall_core as core;
pub use blockfall_types as types;
