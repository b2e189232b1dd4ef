//! Headless, deterministic replays.
//!
//! A [`ReplayScript`] fixes the seed, the mode and every `(dt, actions)` step,
//! so a run always produces the same [`ReplayReport`]. The report is plain
//! serde data meant to be written out as JSON.

pub mod protocol;
pub mod runner;
pub mod script;

pub use tetris_overlord_core as core;
pub use tetris_overlord_types as types;

pub use protocol::{EventOut, EventRecord, Outcome, ReplayReport, SnapshotOut};
pub use runner::run;
pub use script::{PlannedStep, RandomizerName, ReplayScript, ReplayStep};

#[derive(Debug, thiserror::Error)]
pub enum ReplayError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid replay script: {0}")]
    Json(#[from] serde_json::Error),
    #[error("step {step}: unknown action {name:?}")]
    UnknownAction { step: usize, name: String },
}
