//! Tetris Overlord (workspace facade crate).
//!
//! The implementation lives in dedicated crates under `crates/`; this package
//! re-exports them under short names and carries the driver configuration.

pub mod config;

pub use tetris_overlord_core as core;
pub use tetris_overlord_input as input;
pub use tetris_overlord_replay as replay;
pub use tetris_overlord_term as term;
pub use tetris_overlord_types as types;

pub use config::RunConfig;
