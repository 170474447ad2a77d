//! Pieces module - tetromino bitmaps and rotation with wall kicks
//!
//! Shapes are stored once as base bitmaps. Every other rotation state is the
//! base bitmap turned by exact 90° transposes. Kick offsets follow SRS and are
//! written in its y-up convention: a kick `(dx, dy)` lands the piece at
//! `(x + dx, y - dy)` on the y-down board.
//! Reference: https://tetris.wiki/SRS

use serde::{Deserialize, Serialize};

use crate::types::{PieceKind, Rotation, RotationDirection};

/// Largest bitmap side (the I piece).
pub const MAX_MATRIX_SIZE: usize = 4;

/// Immutable occupancy bitmap, at most 4x4.
///
/// `cells[y][x]` is row-major with y growing downwards. Only the top-left
/// `height x width` region is meaningful.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Matrix {
    width: u8,
    height: u8,
    cells: [[bool; MAX_MATRIX_SIZE]; MAX_MATRIX_SIZE],
}

impl Matrix {
    /// Build from rows of 0/1 values.
    ///
    /// Panics if the pattern is larger than 4x4 or the rows are ragged; this is
    /// meant for static catalog data and tests.
    pub fn from_rows(rows: &[&[u8]]) -> Self {
        let height = rows.len();
        let width = rows.first().map_or(0, |r| r.len());
        assert!(height <= MAX_MATRIX_SIZE && width <= MAX_MATRIX_SIZE);
        assert!(rows.iter().all(|r| r.len() == width), "ragged matrix rows");

        let mut cells = [[false; MAX_MATRIX_SIZE]; MAX_MATRIX_SIZE];
        for (y, row) in rows.iter().enumerate() {
            for (x, &v) in row.iter().enumerate() {
                cells[y][x] = v != 0;
            }
        }
        Self {
            width: width as u8,
            height: height as u8,
            cells,
        }
    }

    pub fn width(&self) -> u8 {
        self.width
    }

    pub fn height(&self) -> u8 {
        self.height
    }

    /// Whether `(x, y)` inside the bitmap is occupied. Outside is empty.
    pub fn get(&self, x: u8, y: u8) -> bool {
        x < self.width && y < self.height && self.cells[y as usize][x as usize]
    }

    /// Occupied cells as `(dx, dy)` offsets from the bitmap's top-left corner.
    pub fn cells(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        (0..self.height).flat_map(move |y| {
            (0..self.width)
                .filter(move |&x| self.cells[y as usize][x as usize])
                .map(move |x| (x as i8, y as i8))
        })
    }

    /// Clockwise quarter turn: `out[y][x] = in[h - 1 - x][y]`.
    pub fn rotated_cw(&self) -> Self {
        let (w, h) = (self.width as usize, self.height as usize);
        let mut cells = [[false; MAX_MATRIX_SIZE]; MAX_MATRIX_SIZE];
        for (y, row) in cells.iter_mut().enumerate().take(w) {
            for (x, cell) in row.iter_mut().enumerate().take(h) {
                *cell = self.cells[h - 1 - x][y];
            }
        }
        Self {
            width: self.height,
            height: self.width,
            cells,
        }
    }

    /// Counter-clockwise quarter turn: `out[y][x] = in[x][w - 1 - y]`.
    pub fn rotated_ccw(&self) -> Self {
        let (w, h) = (self.width as usize, self.height as usize);
        let mut cells = [[false; MAX_MATRIX_SIZE]; MAX_MATRIX_SIZE];
        for (y, row) in cells.iter_mut().enumerate().take(w) {
            for (x, cell) in row.iter_mut().enumerate().take(h) {
                *cell = self.cells[x][w - 1 - y];
            }
        }
        Self {
            width: self.height,
            height: self.width,
            cells,
        }
    }
}

/// Base (spawn) bitmap for a piece kind
pub fn base_matrix(kind: PieceKind) -> Matrix {
    match kind {
        PieceKind::I => Matrix::from_rows(&[&[0, 0, 0, 0], &[1, 1, 1, 1], &[0, 0, 0, 0], &[0, 0, 0, 0]]),
        PieceKind::O => Matrix::from_rows(&[&[1, 1], &[1, 1]]),
        PieceKind::T => Matrix::from_rows(&[&[0, 1, 0], &[1, 1, 1], &[0, 0, 0]]),
        PieceKind::S => Matrix::from_rows(&[&[0, 1, 1], &[1, 1, 0], &[0, 0, 0]]),
        PieceKind::Z => Matrix::from_rows(&[&[1, 1, 0], &[0, 1, 1], &[0, 0, 0]]),
        PieceKind::J => Matrix::from_rows(&[&[1, 0, 0], &[1, 1, 1], &[0, 0, 0]]),
        PieceKind::L => Matrix::from_rows(&[&[0, 0, 1], &[1, 1, 1], &[0, 0, 0]]),
    }
}

/// Bitmap one quarter turn away from `matrix`
pub fn rotate(matrix: &Matrix, direction: RotationDirection) -> Matrix {
    match direction {
        RotationDirection::Clockwise => matrix.rotated_cw(),
        RotationDirection::CounterClockwise => matrix.rotated_ccw(),
    }
}

/// Bitmap for a kind at a rotation state, derived from the base bitmap.
pub fn matrix(kind: PieceKind, rotation: Rotation) -> Matrix {
    let mut m = base_matrix(kind);
    for _ in 0..rotation.index() {
        m = m.rotated_cw();
    }
    m
}

/// Kick offsets for one transition, `(0, 0)` first
pub type Kicks = [(i8, i8); 5];

/// Clockwise kicks for J, L, S, T, Z, indexed by the state rotated from.
const JLSTZ_CW_KICKS: [Kicks; 4] = [
    // 0->1
    [(0, 0), (-1, 0), (-1, 1), (0, -2), (-1, -2)],
    // 1->2
    [(0, 0), (1, 0), (1, -1), (0, 2), (1, 2)],
    // 2->3
    [(0, 0), (1, 0), (1, 1), (0, -2), (1, -2)],
    // 3->0
    [(0, 0), (-1, 0), (-1, -1), (0, 2), (-1, 2)],
];

/// Clockwise kicks for I (wider horizontal range).
const I_CW_KICKS: [Kicks; 4] = [
    // 0->1
    [(0, 0), (-2, 0), (1, 0), (-2, -1), (1, 2)],
    // 1->2
    [(0, 0), (-1, 0), (2, 0), (-1, 2), (2, -1)],
    // 2->3
    [(0, 0), (2, 0), (-1, 0), (2, 1), (-1, -2)],
    // 3->0
    [(0, 0), (1, 0), (-2, 0), (1, -2), (-2, 1)],
];

/// Kick list for rotating `kind` away from `from` in `direction`.
///
/// Counter-clockwise transitions negate the clockwise list of the reverse
/// transition (s -> s-1 undoes s-1 -> s). The O piece only tries `(0, 0)`.
pub fn kicks(kind: PieceKind, from: Rotation, direction: RotationDirection) -> Kicks {
    let table = match kind {
        PieceKind::O => return [(0, 0); 5],
        PieceKind::I => &I_CW_KICKS,
        _ => &JLSTZ_CW_KICKS,
    };
    match direction {
        RotationDirection::Clockwise => table[from.index()],
        RotationDirection::CounterClockwise => {
            let reverse = table[from.rotate_ccw().index()];
            reverse.map(|(dx, dy)| (-dx, -dy))
        }
    }
}

/// A successful rotation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RotationResult {
    pub matrix: Matrix,
    pub rotation: Rotation,
    /// Board-space shift applied (y-down).
    pub offset: (i8, i8),
}

/// Try to rotate with wall kicks.
///
/// `is_valid(matrix, x, y)` decides each candidate placement. Returns `None`
/// when every kick is rejected; the caller leaves its piece untouched.
pub fn try_rotate(
    kind: PieceKind,
    current: &Matrix,
    rotation: Rotation,
    x: i8,
    y: i8,
    direction: RotationDirection,
    is_valid: impl Fn(&Matrix, i8, i8) -> bool,
) -> Option<RotationResult> {
    let new_matrix = rotate(current, direction);
    let new_rotation = match direction {
        RotationDirection::Clockwise => rotation.rotate_cw(),
        RotationDirection::CounterClockwise => rotation.rotate_ccw(),
    };

    kicks(kind, rotation, direction)
        .iter()
        .map(|&(dx, dy)| (dx, -dy))
        .find(|&(ox, oy)| is_valid(&new_matrix, x + ox, y + oy))
        .map(|offset| RotationResult {
            matrix: new_matrix,
            rotation: new_rotation,
            offset,
        })
}

/// Spawn column: centered over the bitmap width.
pub fn spawn_x(matrix: &Matrix, board_width: u8) -> i8 {
    ((board_width as i8) - (matrix.width() as i8)) / 2
}
