//! Core game logic module - pure, deterministic, and testable
//!
//! This crate contains the game rules, the boss encounter and session state.
//! It has **no dependencies** on terminals, files or clocks:
//!
//! - **Deterministic**: one injected RNG drives every random draw, so a seed plus a
//!   command sequence always replays the same session
//! - **Explicit time**: timers only advance through `tick(dt_ms)`
//! - **Event driven**: the engine never prints; drivers drain [`GameEvent`]s
//!
//! # Module Structure
//!
//! - [`pieces`]: tetromino catalog (5x5 rotation masks, colors) and the active piece
//! - [`board`]: 10x20 grid with a corruption shadow grid, collision and row removal
//! - [`line_clear`]: 300ms grace window between detecting and removing full rows
//! - [`boss`]: boss health, phases, stun and the attack scheduler
//! - [`scoring`]: line scores, leveling, gravity and boss damage
//! - [`rng`]: uniform and 7-bag piece randomizers
//! - [`game_state`]: the session, per-tick contract and commands
//! - [`snapshot`]: plain-data copy of the query surface
//!
//! # Game Rules
//!
//! - Pieces spawn at the top center and fall one row per gravity interval
//! - Rotation cycles through the kind's rotation states with no wall kicks
//! - A piece that cannot fall settles; full rows are removed 300ms later
//! - Line clears score `{100, 300, 500, 800} * level`; level is `lines / 10 + 1`
//! - In boss mode, clears damage the boss; the boss answers with timed attacks
//!
//! # Example
//!
//! ```
//! use tetris_overlord_core::{GameConfig, GameState, TickOutcome};
//! use tetris_overlord_types::GameAction;
//!
//! let mut game = GameState::new(GameConfig::boss(12345));
//!
//! game.apply_action(GameAction::MoveRight);
//! game.apply_action(GameAction::Rotate);
//! game.apply_action(GameAction::HardDrop);
//! assert!(game.score() > 0); // Hard drop awards points
//!
//! assert_eq!(game.tick(16), TickOutcome::Continue);
//! for event in game.drain_events() {
//!     println!("{}", event.name());
//! }
//! ```

pub mod board;
pub mod boss;
pub mod config;
pub mod events;
pub mod game_state;
pub mod line_clear;
pub mod pieces;
pub mod rng;
pub mod scoring;
pub mod snapshot;

pub use tetris_overlord_types as types;

// Re-export commonly used types for convenience
pub use board::{Board, RowList, U8Grid};
pub use boss::{BossState, DamageReport};
pub use config::GameConfig;
pub use events::{ClearedRow, GameEvent};
pub use game_state::{GameState, TickOutcome};
pub use line_clear::LineClearSequencer;
pub use pieces::{validate_catalog, ActivePiece, CatalogError, PieceShape};
pub use rng::{PieceQueue, Randomizer};
pub use snapshot::{ActiveSnapshot, BossSnapshot, GameSnapshot};
