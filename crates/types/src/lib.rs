//! Shared types module - data structures and rule constants
//!
//! Everything in here is plain data with no external dependencies, so the same
//! definitions can be used by the engine, the terminal driver and the replay runner.
//!
//! # Board Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 20 rows (indexed 0-19, row 0 at the top)
//! - **Spawn origin**: (3, 0), the top-left corner of the 5x5 piece mask
//!
//! # Timing Constants
//!
//! All timers are driven by explicit millisecond deltas passed to `tick`.
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Driver frame step (~60 FPS) |
//! | `BASE_FALL_MS` | 500 | Gravity interval at level 1 |
//! | `FALL_STEP_MS` | 25 | Interval reduction per level |
//! | `MIN_FALL_MS` | 50 | Gravity floor |
//! | `LINE_CLEAR_GRACE_MS` | 300 | Delay between full-row detection and removal |
//!
//! # Boss Encounter
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `BOSS_MAX_HEALTH` | 100 | Starting health |
//! | `PHASE_TWO_HEALTH` | 66 | Health at or below which phase 2 starts |
//! | `PHASE_THREE_HEALTH` | 33 | Health at or below which phase 3 starts |
//! | `ATTACK_COOLDOWN_MS` | 5000 / 2500 / 2000 | Attack cooldown per phase |
//! | `STUN_DAMAGE` | 20 | Minimum hit that stuns the boss |
//! | `STUN_MS` | 1500 | Stun duration |
//! | `SPEED_BOOST_MS` | 5000 | Halved fall interval |
//! | `TIME_PRESSURE_MS` | 10000 | Quartered fall interval plus piece corruption |
//!
//! # Examples
//!
//! ```
//! use tetris_overlord_types::{AttackKind, GameAction, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! let parsed = PieceKind::from_str("t").unwrap();
//! assert_eq!(parsed, PieceKind::T);
//!
//! let action = GameAction::from_str("hardDrop").unwrap();
//! assert_eq!(action, GameAction::HardDrop);
//!
//! assert_eq!(AttackKind::GarbageLines.as_str(), "garbageLines");
//! assert_eq!((BOARD_WIDTH, BOARD_HEIGHT), (10, 20));
//! ```

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Board height in cells (20 rows)
pub const BOARD_HEIGHT: u8 = 20;

/// Side length of the square occupancy mask every rotation state is drawn in.
pub const MASK_SIZE: usize = 5;

/// Number of cells in every piece.
pub const MINOS_PER_PIECE: usize = 4;

/// Driver frame step in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Gravity interval at level 1.
pub const BASE_FALL_MS: u32 = 500;

/// Gravity interval reduction per level above 1.
pub const FALL_STEP_MS: u32 = 25;

/// Gravity interval floor.
pub const MIN_FALL_MS: u32 = 50;

/// Lines needed to advance one level.
pub const LINES_PER_LEVEL: u32 = 10;

/// Delay between detecting full rows and removing them.
pub const LINE_CLEAR_GRACE_MS: u32 = 300;

/// Score awarded per row descended by a hard drop.
pub const HARD_DROP_POINTS_PER_ROW: u32 = 2;

/// Score awarded per successful soft-drop step.
pub const SOFT_DROP_POINTS_PER_ROW: u32 = 1;

/// Base line clear scores indexed by cleared row count, multiplied by the level.
pub const LINE_SCORES: [u32; 5] = [0, 100, 300, 500, 800];

/// Probability that a garbage row cell is filled.
pub const GARBAGE_FILL_PROBABILITY: f64 = 0.8;

/// Garbage attack row count range (inclusive).
pub const GARBAGE_ROWS_MIN: u8 = 1;
pub const GARBAGE_ROWS_MAX: u8 = 2;

/// Boss starting health.
pub const BOSS_MAX_HEALTH: u32 = 100;

/// Health at or below which the boss enters phase 2.
pub const PHASE_TWO_HEALTH: u32 = 66;

/// Health at or below which the boss enters phase 3.
pub const PHASE_THREE_HEALTH: u32 = 33;

/// Attack cooldown for phases 1, 2 and 3.
pub const ATTACK_COOLDOWN_MS: [u32; 3] = [5000, 2500, 2000];

/// Attack warning starts once the attack timer passes this fraction of the cooldown.
pub const ATTACK_WARNING_NUMERATOR: u32 = 4;
pub const ATTACK_WARNING_DENOMINATOR: u32 = 5;

/// Boss damage dealt per cleared row.
pub const DAMAGE_PER_LINE: u32 = 5;

/// Fixed boss damage for a four-row clear.
pub const TETRIS_DAMAGE: u32 = 25;

/// Minimum single hit that stuns the boss.
pub const STUN_DAMAGE: u32 = 20;

/// Stun duration.
pub const STUN_MS: u32 = 1500;

/// Speed boost duration (fall interval halved).
pub const SPEED_BOOST_MS: u32 = 5000;

/// Time pressure duration (fall interval quartered, corruption enabled).
pub const TIME_PRESSURE_MS: u32 = 10_000;

/// Chance a newly drawn piece is corrupted while corruption mode is on.
pub const CORRUPTION_CHANCE: f64 = 0.3;

/// Grid shake duration and starting intensity (visual only).
pub const GRID_SHAKE_MS: u32 = 2000;
pub const GRID_SHAKE_INTENSITY: f32 = 3.0;

/// Shake intensity lost per elapsed millisecond.
pub const GRID_SHAKE_DECAY_PER_MS: f32 = 0.01;

/// Tetromino piece kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl PieceKind {
    /// All kinds in catalog order.
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    /// Parse piece kind from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "o" => Some(PieceKind::O),
            "t" => Some(PieceKind::T),
            "s" => Some(PieceKind::S),
            "z" => Some(PieceKind::Z),
            "j" => Some(PieceKind::J),
            "l" => Some(PieceKind::L),
            _ => None,
        }
    }

    /// Convert to lowercase string
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "i",
            PieceKind::O => "o",
            PieceKind::T => "t",
            PieceKind::S => "s",
            PieceKind::Z => "z",
            PieceKind::J => "j",
            PieceKind::L => "l",
        }
    }

    /// Stable 1-based cell code used by `u8` board grids (0 = empty).
    pub fn code(&self) -> u8 {
        match self {
            PieceKind::I => 1,
            PieceKind::O => 2,
            PieceKind::T => 3,
            PieceKind::S => 4,
            PieceKind::Z => 5,
            PieceKind::J => 6,
            PieceKind::L => 7,
        }
    }
}

/// Color identity of a settled cell.
///
/// Corrupted pieces and injected garbage both settle as `Corruption`; the board's
/// corruption grid records which cells came from either source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tint {
    Piece(PieceKind),
    Corruption,
}

/// `u8` grid code for corruption-tinted cells.
pub const CORRUPTION_CODE: u8 = 8;

impl Tint {
    /// Grid code: 1-7 for piece kinds, 8 for corruption.
    pub fn code(&self) -> u8 {
        match self {
            Tint::Piece(kind) => kind.code(),
            Tint::Corruption => CORRUPTION_CODE,
        }
    }

    /// Inverse of [`Tint::code`]; 0 and unknown codes map to `None`.
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            CORRUPTION_CODE => Some(Tint::Corruption),
            _ => PieceKind::ALL
                .iter()
                .find(|kind| kind.code() == code)
                .map(|&kind| Tint::Piece(kind)),
        }
    }
}

/// Cell on the board (None = empty)
pub type Cell = Option<Tint>;

/// 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Adversarial events the boss can fire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttackKind {
    GarbageLines,
    SpeedBoost,
    GridShake,
    PieceTheft,
    TimePressure,
}

impl AttackKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AttackKind::GarbageLines => "garbageLines",
            AttackKind::SpeedBoost => "speedBoost",
            AttackKind::GridShake => "gridShake",
            AttackKind::PieceTheft => "pieceTheft",
            AttackKind::TimePressure => "timePressure",
        }
    }

    /// Parse from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "garbagelines" | "garbage" => Some(AttackKind::GarbageLines),
            "speedboost" => Some(AttackKind::SpeedBoost),
            "gridshake" => Some(AttackKind::GridShake),
            "piecetheft" => Some(AttackKind::PieceTheft),
            "timepressure" => Some(AttackKind::TimePressure),
            _ => None,
        }
    }
}

/// Game actions issued by a driver between ticks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    MoveLeft,
    MoveRight,
    SoftDrop,
    HardDrop,
    Rotate,
    Restart,
}

impl GameAction {
    /// Parse action from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(GameAction::MoveLeft),
            "moveright" => Some(GameAction::MoveRight),
            "softdrop" => Some(GameAction::SoftDrop),
            "harddrop" => Some(GameAction::HardDrop),
            "rotate" | "rotatecw" => Some(GameAction::Rotate),
            "restart" => Some(GameAction::Restart),
            _ => None,
        }
    }

    /// Convert to string
    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::MoveLeft => "moveLeft",
            GameAction::MoveRight => "moveRight",
            GameAction::SoftDrop => "softDrop",
            GameAction::HardDrop => "hardDrop",
            GameAction::Rotate => "rotate",
            GameAction::Restart => "restart",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn piece_kind_round_trips_through_str_and_code() {
        for kind in PieceKind::ALL {
            assert_eq!(PieceKind::from_str(kind.as_str()), Some(kind));
            assert_eq!(Tint::from_code(kind.code()), Some(Tint::Piece(kind)));
        }
        assert_eq!(PieceKind::from_str("x"), None);
    }

    #[test]
    fn tint_codes_are_distinct_and_nonzero() {
        let mut codes: Vec<u8> = PieceKind::ALL.iter().map(|k| k.code()).collect();
        codes.push(Tint::Corruption.code());
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), 8);
        assert!(!codes.contains(&0));
        assert_eq!(Tint::from_code(0), None);
        assert_eq!(Tint::from_code(CORRUPTION_CODE), Some(Tint::Corruption));
    }

    #[test]
    fn game_action_parsing_is_case_insensitive() {
        assert_eq!(GameAction::from_str("MOVELEFT"), Some(GameAction::MoveLeft));
        assert_eq!(GameAction::from_str("rotateCw"), Some(GameAction::Rotate));
        assert_eq!(GameAction::from_str("hold"), None);
        for action in [
            GameAction::MoveLeft,
            GameAction::MoveRight,
            GameAction::SoftDrop,
            GameAction::HardDrop,
            GameAction::Rotate,
            GameAction::Restart,
        ] {
            assert_eq!(GameAction::from_str(action.as_str()), Some(action));
        }
    }

    #[test]
    fn cooldowns_shrink_with_phase() {
        assert!(ATTACK_COOLDOWN_MS.windows(2).all(|w| w[0] > w[1]));
        assert!(PHASE_THREE_HEALTH < PHASE_TWO_HEALTH);
        assert!(TETRIS_DAMAGE >= STUN_DAMAGE);
    }
}
