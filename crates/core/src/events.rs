//! Discrete notifications produced by the engine.
//!
//! The engine never prints or renders; drivers drain these after each tick to
//! drive highlights, particles, status lines or a replay log.

use arrayvec::ArrayVec;

use crate::board::RowList;
use crate::pieces::PieceShape;
use crate::types::{AttackKind, Cell, Tint, BOARD_WIDTH, GARBAGE_ROWS_MAX};

/// One removed row with the cells it held just before removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClearedRow {
    pub row: usize,
    pub cells: [Cell; BOARD_WIDTH as usize],
}

#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    /// A piece was written into the board. `cells` excludes cells above the top row.
    PieceSettled {
        cells: PieceShape,
        tint: Tint,
        hard_drop_rows: u32,
    },
    /// Full rows detected; they stay on the board until the grace window ends.
    LinesPending { rows: RowList },
    RowsCleared { rows: Vec<ClearedRow>, points: u32 },
    LevelUp { level: u32 },
    AttackFired { attack: AttackKind },
    /// Gap column of each injected garbage row, oldest first.
    GarbageInjected {
        gaps: ArrayVec<u8, { GARBAGE_ROWS_MAX as usize }>,
    },
    /// A timed effect ran out (speed boost or time pressure).
    EffectExpired { effect: AttackKind },
    BossDamaged { amount: u32, health: u32 },
    BossPhaseChanged { phase: u8 },
    BossStunned { duration_ms: u32 },
    BossDefeated,
    GameOver,
}

impl GameEvent {
    /// Stable event name used by logs and replay output.
    pub fn name(&self) -> &'static str {
        match self {
            GameEvent::PieceSettled { .. } => "pieceSettled",
            GameEvent::LinesPending { .. } => "linesPending",
            GameEvent::RowsCleared { .. } => "rowsCleared",
            GameEvent::LevelUp { .. } => "levelUp",
            GameEvent::AttackFired { .. } => "attackFired",
            GameEvent::GarbageInjected { .. } => "garbageInjected",
            GameEvent::EffectExpired { .. } => "effectExpired",
            GameEvent::BossDamaged { .. } => "bossDamaged",
            GameEvent::BossPhaseChanged { .. } => "bossPhaseChanged",
            GameEvent::BossStunned { .. } => "bossStunned",
            GameEvent::BossDefeated => "bossDefeated",
            GameEvent::GameOver => "gameOver",
        }
    }
}
