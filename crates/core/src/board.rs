//! Board module - the playfield grid and collision engine
//!
//! The board is a 10x20 grid where each cell is empty or holds the kind of the
//! piece that filled it. Uses a flat array for cache locality and zero
//! allocation. Coordinates: (x, y) where x ranges 0..9 (left to right) and y
//! ranges 0..19 (top to bottom). Shapes may sit partly above row 0; those cells
//! are never checked against, or written into, the grid.
//!
//! The board knows nothing about pieces beyond occupancy bitmaps.

use arrayvec::ArrayVec;

use crate::pieces::Matrix;
use crate::types::{Cell, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

/// Total number of cells on the board
const BOARD_SIZE: usize = (BOARD_WIDTH as usize) * (BOARD_HEIGHT as usize);

/// Row indices, at most one per board row
pub type RowList = ArrayVec<usize, { BOARD_HEIGHT as usize }>;

/// The game board - 10 columns x 20 rows using flat array storage
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    /// Flat array of cells, row-major order (y * WIDTH + x)
    cells: [Cell; BOARD_SIZE],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [None; BOARD_SIZE],
        }
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= BOARD_WIDTH as i8 || y < 0 || y >= BOARD_HEIGHT as i8 {
            return None;
        }
        Some((y as usize) * (BOARD_WIDTH as usize) + (x as usize))
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

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        match Self::index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Check if position is occupied (within bounds and filled)
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(Some(_)))
    }

    /// Whether `matrix` fits with its top-left corner at (x, y).
    ///
    /// Fails on any occupied cell left of column 0, right of the last column,
    /// below the last row, or on a filled cell. Cells above row 0 only need to
    /// be within the side walls.
    pub fn is_valid_position(&self, matrix: &Matrix, x: i8, y: i8) -> bool {
        matrix.cells().all(|(dx, dy)| {
            let (bx, by) = (x as i16 + dx as i16, y as i16 + dy as i16);
            if bx < 0 || bx >= BOARD_WIDTH as i16 || by >= BOARD_HEIGHT as i16 {
                return false;
            }
            by < 0 || !self.is_occupied(bx as i8, by as i8)
        })
    }

    /// Stamp `matrix` at (x, y) with `kind`.
    ///
    /// Cells outside the board (in particular above row 0) are skipped.
    pub fn lock(&mut self, matrix: &Matrix, x: i8, y: i8, kind: PieceKind) {
        for (dx, dy) in matrix.cells() {
            let (bx, by) = (x as i16 + dx as i16, y as i16 + dy as i16);
            if (0..BOARD_WIDTH as i16).contains(&bx) && (0..BOARD_HEIGHT as i16).contains(&by) {
                self.set(bx as i8, by as i8, Some(kind));
            }
        }
    }

    /// Lowest row the matrix can drop to from (x, y).
    ///
    /// Returns `y` itself when the piece is already resting (or already
    /// invalid).
    pub fn ghost_row(&self, matrix: &Matrix, x: i8, y: i8) -> i8 {
        let mut ghost = y;
        while ghost < BOARD_HEIGHT as i8 && self.is_valid_position(matrix, x, ghost + 1) {
            ghost += 1;
        }
        ghost
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        if y >= BOARD_HEIGHT as usize {
            return false;
        }
        let start = y * BOARD_WIDTH as usize;
        let end = start + BOARD_WIDTH as usize;
        self.cells[start..end].iter().all(|cell| cell.is_some())
    }

    /// Indices of every full row, top to bottom
    pub fn full_rows(&self) -> RowList {
        (0..BOARD_HEIGHT as usize)
            .filter(|&y| self.is_row_full(y))
            .collect()
    }

    /// Remove every full row and return how many were removed.
    ///
    /// Single bottom-up pass with a write cursor: surviving rows slide down
    /// past removed ones and the vacated top rows are emptied.
    pub fn clear_rows(&mut self) -> usize {
        let width = BOARD_WIDTH as usize;
        let mut write_y = BOARD_HEIGHT as usize;
        let mut cleared = 0;

        for read_y in (0..BOARD_HEIGHT as usize).rev() {
            if self.is_row_full(read_y) {
                cleared += 1;
                continue;
            }
            write_y -= 1;
            if write_y != read_y {
                let src_start = read_y * width;
                self.cells
                    .copy_within(src_start..src_start + width, write_y * width);
            }
        }

        for cell in &mut self.cells[..write_y * width] {
            *cell = None;
        }

        cleared
    }

    /// Board rows, top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks_exact(BOARD_WIDTH as usize)
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Empty every cell
    pub fn reset(&mut self) {
        self.cells = [None; BOARD_SIZE];
    }

    /// Copy into a fixed 2D grid (used by snapshots)
    pub fn write_grid(&self, out: &mut [[Cell; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize]) {
        for (dst, src) in out.iter_mut().zip(self.rows()) {
            dst.copy_from_slice(src);
        }
    }

    /// Create from a 2D vector for testing (converts to flat array)
    #[cfg(test)]
    pub fn from_cells(cells_2d: Vec<Vec<Cell>>) -> Self {
        assert_eq!(cells_2d.len(), BOARD_HEIGHT as usize);
        assert!(cells_2d.iter().all(|row| row.len() == BOARD_WIDTH as usize));

        let mut flat = [None; BOARD_SIZE];
        for (y, row) in cells_2d.iter().enumerate() {
            for (x, cell) in row.iter().enumerate() {
                flat[y * BOARD_WIDTH as usize + x] = *cell;
            }
        }
        Self { cells: flat }
    }

    /// Convert to 2D vector for testing/display
    #[cfg(test)]
    pub fn to_cells(&self) -> Vec<Vec<Cell>> {
        self.rows().map(|row| row.to_vec()).collect()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
