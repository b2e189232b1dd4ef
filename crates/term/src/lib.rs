//! Terminal "game renderer" module.
//!
//! A small, game-oriented rendering layer: the view draws a [`GameSnapshot`]
//! into a plain framebuffer and the renderer flushes it to the terminal,
//! rewriting only what changed between frames.
//!
//! - Board cells are 2 glyphs wide to compensate for terminal glyph aspect ratio
//! - Pending line clears flash, corrupted cells use a shaded block
//! - The side panel carries score, the next piece and, in boss mode, the boss status
//!
//! [`GameSnapshot`]: crate::core::GameSnapshot

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use tetris_overlord_core as core;
pub use tetris_overlord_types as types;

pub use fb::{CellStyle, FrameBuffer, Glyph, Rgb};
pub use game_view::{format_thousands, GameView, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
