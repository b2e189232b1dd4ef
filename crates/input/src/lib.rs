//! Terminal input module (engine-facing).
//!
//! Maps `crossterm` key events into [`crate::types::GameAction`] and the title
//! screen's mode choice. Key bindings are fixed.

pub mod map;

pub use tetris_overlord_types as types;

pub use map::{handle_key_event, mode_choice, should_quit, ModeChoice};
