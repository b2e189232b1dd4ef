//! Board module - manages the game grid
//!
//! The board is a 10x20 grid where each cell is empty or holds a [`Tint`].
//! A parallel flag grid records which settled cells are corrupted (garbage rows
//! and corrupted pieces). Both grids are flat arrays in row-major order.
//!
//! Coordinates: (x, y) where x ranges 0..9 (left to right), y ranges 0..19 (top to bottom).
//! Rows above the board (y < 0) are legal for a falling piece and are never stored.

use arrayvec::ArrayVec;
use rand::Rng;

use crate::pieces::ActivePiece;
use crate::types::{Cell, Tint, BOARD_HEIGHT, BOARD_WIDTH};

/// Total number of cells on the board
const BOARD_SIZE: usize = (BOARD_WIDTH as usize) * (BOARD_HEIGHT as usize);

const WIDTH: usize = BOARD_WIDTH as usize;
const HEIGHT: usize = BOARD_HEIGHT as usize;

/// Row indices, at most one per board row.
pub type RowList = ArrayVec<usize, HEIGHT>;

/// `u8` code grid used by snapshots (0 = empty, see [`Tint::code`]).
pub type U8Grid = [[u8; WIDTH]; HEIGHT];

/// The game board - 10 columns x 20 rows using flat array storage
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    /// Flat array of cells, row-major order (y * WIDTH + x)
    cells: [Cell; BOARD_SIZE],
    /// Corruption flags, same layout as `cells`
    corrupted: [bool; BOARD_SIZE],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [None; BOARD_SIZE],
            corrupted: [false; BOARD_SIZE],
        }
    }

    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= BOARD_WIDTH as i8 || y < 0 || y >= BOARD_HEIGHT as i8 {
            return None;
        }
        Some((y as usize) * WIDTH + (x as usize))
    }

    pub fn width(&self) -> u8 {
        BOARD_WIDTH
    }

    pub fn height(&self) -> u8 {
        BOARD_HEIGHT
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y), clearing its corruption flag.
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        match Self::index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                self.corrupted[idx] = false;
                true
            }
            None => false,
        }
    }

    /// Fill a cell and flag it as corrupted.
    pub fn set_corrupted(&mut self, x: i8, y: i8, tint: Tint) -> bool {
        match Self::index(x, y) {
            Some(idx) => {
                self.cells[idx] = Some(tint);
                self.corrupted[idx] = true;
                true
            }
            None => false,
        }
    }

    pub fn is_corrupted(&self, x: i8, y: i8) -> bool {
        Self::index(x, y).is_some_and(|idx| self.corrupted[idx])
    }

    /// Check if position is valid (within bounds and empty)
    pub fn is_valid(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(None))
    }

    /// Check if position is occupied (within bounds and filled)
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(Some(_)))
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        if y >= HEIGHT {
            return false;
        }
        self.row(y).iter().all(|cell| cell.is_some())
    }

    /// All full rows, ascending.
    pub fn full_rows(&self) -> RowList {
        (0..HEIGHT).filter(|&y| self.is_row_full(y)).collect()
    }

    /// Cells of one row. Panics if `y` is out of range.
    pub fn row(&self, y: usize) -> &[Cell] {
        let start = y * WIDTH;
        &self.cells[start..start + WIDTH]
    }

    /// Whether `piece` fits after shifting by `(dx, dy)` and optionally switching rotation.
    ///
    /// Cells above the board are allowed; everything else must be inside the
    /// walls and floor and must not overlap a settled cell.
    pub fn is_valid_placement(
        &self,
        piece: &ActivePiece,
        dx: i8,
        dy: i8,
        rotation: Option<u8>,
    ) -> bool {
        let rotation = rotation.unwrap_or(piece.rotation);
        piece.cells_at(rotation, dx, dy).iter().all(|&(x, y)| {
            if x < 0 || x >= BOARD_WIDTH as i8 || y >= BOARD_HEIGHT as i8 {
                return false;
            }
            y < 0 || self.is_valid(x, y)
        })
    }

    /// Write the piece into the grid and report full rows, ascending.
    ///
    /// Cells above the board are dropped. Rows are only reported; removal is
    /// deferred to [`Board::remove_rows`].
    pub fn settle(&mut self, piece: &ActivePiece) -> RowList {
        let tint = piece.tint();
        for (x, y) in piece.cells() {
            if y < 0 {
                continue;
            }
            if piece.corrupted {
                self.set_corrupted(x, y, tint);
            } else {
                self.set(x, y, Some(tint));
            }
        }
        self.full_rows()
    }

    /// Push a garbage row in from the bottom, discarding the top row.
    ///
    /// Each column is filled with a corrupted cell with probability `fill_probability`,
    /// then one uniformly chosen column is forced empty. Returns the gap column.
    pub fn inject_garbage_row<R: Rng + ?Sized>(&mut self, rng: &mut R, fill_probability: f64) -> u8 {
        let p = fill_probability.clamp(0.0, 1.0);

        self.cells.copy_within(WIDTH.., 0);
        self.corrupted.copy_within(WIDTH.., 0);

        let bottom = BOARD_SIZE - WIDTH;
        for x in 0..WIDTH {
            let filled = rng.gen_bool(p);
            self.cells[bottom + x] = filled.then_some(Tint::Corruption);
            self.corrupted[bottom + x] = filled;
        }

        let gap = rng.gen_range(0..BOARD_WIDTH);
        self.cells[bottom + gap as usize] = None;
        self.corrupted[bottom + gap as usize] = false;
        gap
    }

    /// Remove the given rows and drop everything above them.
    ///
    /// Duplicates and out-of-range indices are ignored. The same number of empty
    /// rows appear at the top, so the board keeps its shape.
    /// Returns the number of rows actually removed.
    pub fn remove_rows(&mut self, rows: &[usize]) -> usize {
        let mut remove = [false; HEIGHT];
        for &y in rows {
            if y < HEIGHT {
                remove[y] = true;
            }
        }

        // Two-pointer compaction from the bottom up
        let mut write_y = HEIGHT;
        for read_y in (0..HEIGHT).rev() {
            if remove[read_y] {
                continue;
            }
            write_y -= 1;
            if write_y != read_y {
                let src = read_y * WIDTH;
                let dst = write_y * WIDTH;
                self.cells.copy_within(src..src + WIDTH, dst);
                self.corrupted.copy_within(src..src + WIDTH, dst);
            }
        }

        for idx in 0..write_y * WIDTH {
            self.cells[idx] = None;
            self.corrupted[idx] = false;
        }

        write_y
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        self.cells = [None; BOARD_SIZE];
        self.corrupted = [false; BOARD_SIZE];
    }

    /// Encode the board as tint codes (0 = empty).
    pub fn write_u8_grid(&self, out: &mut U8Grid) {
        for (y, row) in out.iter_mut().enumerate() {
            for (x, code) in row.iter_mut().enumerate() {
                *code = self.cells[y * WIDTH + x].map_or(0, |tint| tint.code());
            }
        }
    }

    /// Encode the corruption grid as 0/1 rows.
    pub fn write_corruption_grid(&self, out: &mut U8Grid) {
        for (y, row) in out.iter_mut().enumerate() {
            for (x, flag) in row.iter_mut().enumerate() {
                *flag = u8::from(self.corrupted[y * WIDTH + x]);
            }
        }
    }

    /// Build a board from tint codes; unknown codes become empty cells.
    /// Code 8 (corruption) is flagged as corrupted.
    pub fn from_u8_grid(grid: &U8Grid) -> Self {
        let mut board = Self::new();
        for (y, row) in grid.iter().enumerate() {
            for (x, &code) in row.iter().enumerate() {
                match Tint::from_code(code) {
                    Some(Tint::Corruption) => {
                        board.set_corrupted(x as i8, y as i8, Tint::Corruption);
                    }
                    cell => {
                        board.set(x as i8, y as i8, cell);
                    }
                }
            }
        }
        board
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
