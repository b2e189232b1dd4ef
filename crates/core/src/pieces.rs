//! Pieces module - static tetromino catalog and the active falling piece
//!
//! Every rotation state is a 5x5 occupancy mask. Each mask row is a `u8` whose
//! low five bits are the columns, most significant bit first:
//! bit `4 - col` set means the cell at `(col, row)` is occupied.
//!
//! Rotation states are enumerated explicitly per kind (I, S, Z have 2, O has 1,
//! T, J, L have 4). There are no wall kicks: rotating simply selects the next state.

use arrayvec::ArrayVec;
use thiserror::Error;

use crate::types::{
    PieceKind, Rgb, Tint, BOARD_WIDTH, MASK_SIZE, MINOS_PER_PIECE,
};

/// One rotation state: 5 rows of 5-bit column masks.
pub type Mask = [u8; MASK_SIZE];

/// Occupied cells of a piece, relative to the mask origin or absolute on the board.
pub type PieceShape = ArrayVec<(i8, i8), MINOS_PER_PIECE>;

/// Color used for corrupted pieces and garbage rows.
pub const CORRUPTION_COLOR: Rgb = Rgb::new(100, 50, 50);

const COLUMN_BITS: u8 = 0b1_1111;

const I_STATES: [Mask; 2] = [
    [0, 0b00100, 0b00100, 0b00100, 0b00100],
    [0, 0, 0b11110, 0, 0],
];

const O_STATES: [Mask; 1] = [[0, 0, 0b01100, 0b01100, 0]];

const T_STATES: [Mask; 4] = [
    [0, 0, 0b00100, 0b01110, 0],
    [0, 0, 0b01000, 0b01100, 0b01000],
    [0, 0, 0, 0b01110, 0b00100],
    [0, 0, 0b01000, 0b11000, 0b01000],
];

const S_STATES: [Mask; 2] = [
    [0, 0, 0b00110, 0b01100, 0],
    [0, 0b01000, 0b01100, 0b00100, 0],
];

const Z_STATES: [Mask; 2] = [
    [0, 0, 0b11000, 0b01100, 0],
    [0, 0b00100, 0b01100, 0b01000, 0],
];

const J_STATES: [Mask; 4] = [
    [0, 0b00100, 0b00100, 0b01100, 0],
    [0, 0, 0b10000, 0b11100, 0],
    [0, 0b01100, 0b01000, 0b01000, 0],
    [0, 0, 0b11100, 0b00100, 0],
];

const L_STATES: [Mask; 4] = [
    [0, 0b00100, 0b00100, 0b00110, 0],
    [0, 0, 0b11100, 0b10000, 0],
    [0, 0b11000, 0b01000, 0b01000, 0],
    [0, 0, 0b00100, 0b11100, 0],
];

/// Ordered rotation states for a piece kind.
pub fn rotation_states(kind: PieceKind) -> &'static [Mask] {
    match kind {
        PieceKind::I => &I_STATES,
        PieceKind::O => &O_STATES,
        PieceKind::T => &T_STATES,
        PieceKind::S => &S_STATES,
        PieceKind::Z => &Z_STATES,
        PieceKind::J => &J_STATES,
        PieceKind::L => &L_STATES,
    }
}

pub fn rotation_count(kind: PieceKind) -> u8 {
    rotation_states(kind).len() as u8
}

/// Display color of a piece kind.
pub fn color(kind: PieceKind) -> Rgb {
    match kind {
        PieceKind::I => Rgb::new(0, 240, 255),
        PieceKind::O => Rgb::new(255, 220, 0),
        PieceKind::T => Rgb::new(160, 80, 255),
        PieceKind::S => Rgb::new(80, 255, 80),
        PieceKind::Z => Rgb::new(255, 80, 80),
        PieceKind::J => Rgb::new(80, 120, 255),
        PieceKind::L => Rgb::new(255, 160, 0),
    }
}

/// Darker variant of [`color`], used for bevels and the drop preview.
pub fn shadow_color(kind: PieceKind) -> Rgb {
    match kind {
        PieceKind::I => Rgb::new(0, 180, 200),
        PieceKind::O => Rgb::new(200, 170, 0),
        PieceKind::T => Rgb::new(120, 60, 200),
        PieceKind::S => Rgb::new(60, 200, 60),
        PieceKind::Z => Rgb::new(200, 60, 60),
        PieceKind::J => Rgb::new(60, 90, 200),
        PieceKind::L => Rgb::new(200, 120, 0),
    }
}

pub fn tint_color(tint: Tint) -> Rgb {
    match tint {
        Tint::Piece(kind) => color(kind),
        Tint::Corruption => CORRUPTION_COLOR,
    }
}

/// Relative `(col, row)` offsets of the occupied cells of a mask, row-major.
///
/// Stops after four cells; [`validate_catalog`] guarantees catalog masks never have more.
pub fn mask_offsets(mask: &Mask) -> PieceShape {
    let mut out = PieceShape::new();
    for (row, bits) in mask.iter().enumerate() {
        for col in 0..MASK_SIZE {
            if (*bits >> (MASK_SIZE - 1 - col)) & 1 == 0 {
                continue;
            }
            if out.try_push((col as i8, row as i8)).is_err() {
                return out;
            }
        }
    }
    out
}

/// Malformed catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("piece {kind:?} has no rotation states")]
    NoRotations { kind: PieceKind },
    #[error("piece {kind:?} rotation {rotation} has {cells} cells, expected 4")]
    WrongCellCount {
        kind: PieceKind,
        rotation: usize,
        cells: u32,
    },
    #[error("piece {kind:?} rotation {rotation} sets bits outside the 5x5 mask")]
    OutOfMask { kind: PieceKind, rotation: usize },
}

/// Check every catalog entry: at least one rotation, four cells per mask, no stray bits.
pub fn validate_catalog() -> Result<(), CatalogError> {
    for kind in PieceKind::ALL {
        let states = rotation_states(kind);
        if states.is_empty() {
            return Err(CatalogError::NoRotations { kind });
        }
        for (rotation, mask) in states.iter().enumerate() {
            if mask.iter().any(|row| row & !COLUMN_BITS != 0) {
                return Err(CatalogError::OutOfMask { kind, rotation });
            }
            let cells: u32 = mask.iter().map(|row| row.count_ones()).sum();
            if cells != MINOS_PER_PIECE as u32 {
                return Err(CatalogError::WrongCellCount {
                    kind,
                    rotation,
                    cells,
                });
            }
        }
    }
    Ok(())
}

/// Spawn column of the mask origin.
pub const SPAWN_X: i8 = (BOARD_WIDTH / 2) as i8 - 2;

/// Active falling piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActivePiece {
    pub kind: PieceKind,
    pub rotation: u8,
    pub x: i8,
    pub y: i8,
    pub corrupted: bool,
}

impl ActivePiece {
    /// Create a piece at the spawn origin in rotation 0.
    pub fn spawn(kind: PieceKind) -> Self {
        Self {
            kind,
            rotation: 0,
            x: SPAWN_X,
            y: 0,
            corrupted: false,
        }
    }

    /// Absolute board cells of the current rotation.
    pub fn cells(&self) -> PieceShape {
        self.cells_at(self.rotation, 0, 0)
    }

    /// Absolute cells the piece would occupy in `rotation`, shifted by `(dx, dy)`.
    pub fn cells_at(&self, rotation: u8, dx: i8, dy: i8) -> PieceShape {
        let states = rotation_states(self.kind);
        let mask = &states[rotation as usize % states.len()];
        mask_offsets(mask)
            .into_iter()
            .map(|(col, row)| (self.x + col + dx, self.y + row + dy))
            .collect()
    }

    pub fn next_rotation(&self) -> u8 {
        (self.rotation + 1) % rotation_count(self.kind)
    }

    /// Tint the piece leaves on the board when settled.
    pub fn tint(&self) -> Tint {
        if self.corrupted {
            Tint::Corruption
        } else {
            Tint::Piece(self.kind)
        }
    }
}
