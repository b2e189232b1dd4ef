//! Plain-data copy of the engine query surface, for renderers and replay output.

use crate::board::U8Grid;
use crate::boss::BossState;
use crate::pieces::ActivePiece;
use crate::rng::Randomizer;
use crate::types::{AttackKind, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActiveSnapshot {
    pub kind: PieceKind,
    pub rotation: u8,
    pub x: i8,
    pub y: i8,
    pub corrupted: bool,
}

impl From<ActivePiece> for ActiveSnapshot {
    fn from(value: ActivePiece) -> Self {
        Self {
            kind: value.kind,
            rotation: value.rotation,
            x: value.x,
            y: value.y,
            corrupted: value.corrupted,
        }
    }
}

impl From<ActiveSnapshot> for ActivePiece {
    fn from(value: ActiveSnapshot) -> Self {
        Self {
            kind: value.kind,
            rotation: value.rotation,
            x: value.x,
            y: value.y,
            corrupted: value.corrupted,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BossSnapshot {
    pub health: u32,
    pub max_health: u32,
    pub phase: u8,
    pub stunned: bool,
    pub stun_remaining_ms: u32,
    pub attack_timer_ms: u32,
    pub attack_cooldown_ms: u32,
    pub attack_imminent: bool,
    pub last_attack: Option<AttackKind>,
    pub shake_intensity: f32,
    pub shake_remaining_ms: u32,
    pub animation_ms: u32,
}

impl From<&BossState> for BossSnapshot {
    fn from(boss: &BossState) -> Self {
        Self {
            health: boss.health(),
            max_health: boss.max_health(),
            phase: boss.phase(),
            stunned: boss.stunned(),
            stun_remaining_ms: boss.stun_remaining_ms(),
            attack_timer_ms: boss.attack_timer_ms(),
            attack_cooldown_ms: boss.attack_cooldown_ms(),
            attack_imminent: boss.attack_imminent(),
            last_attack: boss.last_attack(),
            shake_intensity: boss.shake_intensity(),
            shake_remaining_ms: boss.shake_remaining_ms(),
            animation_ms: boss.animation_ms(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GameSnapshot {
    /// Tint codes per cell (0 = empty)
    pub board: U8Grid,
    /// 1 where the settled cell is corrupted
    pub corrupted: U8Grid,
    pub active: ActiveSnapshot,
    /// Row the active piece would land on with a hard drop
    pub ghost_y: i8,
    pub next: ActiveSnapshot,
    pub score: u32,
    pub level: u32,
    pub lines: u32,
    pub pending_rows: Vec<usize>,
    pub fall_interval_ms: u32,
    pub speed_boost_ms: u32,
    pub time_pressure_ms: u32,
    pub corruption_active: bool,
    pub boss: Option<BossSnapshot>,
    pub won: bool,
    pub game_over: bool,
    pub seed: u64,
    pub randomizer: Randomizer,
    pub animation_ms: u32,
}

impl Default for GameSnapshot {
    fn default() -> Self {
        let piece = ActiveSnapshot::from(ActivePiece::spawn(PieceKind::I));
        Self {
            board: [[0u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
            corrupted: [[0u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
            active: piece,
            ghost_y: piece.y,
            next: piece,
            score: 0,
            level: 1,
            lines: 0,
            pending_rows: Vec::new(),
            fall_interval_ms: 0,
            speed_boost_ms: 0,
            time_pressure_ms: 0,
            corruption_active: false,
            boss: None,
            won: false,
            game_over: false,
            seed: 0,
            randomizer: Randomizer::Uniform,
            animation_ms: 0,
        }
    }
}

impl GameSnapshot {
    /// Neither won nor lost.
    pub fn playable(&self) -> bool {
        !self.game_over && !self.won
    }

    pub fn is_pending_row(&self, y: usize) -> bool {
        self.pending_rows.contains(&y)
    }
}
