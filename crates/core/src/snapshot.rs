use serde::Serialize;

use crate::game_state::Tetromino;
use crate::pieces::Matrix;
use crate::types::{Cell, PieceKind, Rotation, Status, BOARD_HEIGHT, BOARD_WIDTH};

pub type Grid = [[Cell; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ActiveSnapshot {
    pub kind: PieceKind,
    pub rotation: Rotation,
    pub matrix: Matrix,
    pub x: i8,
    pub y: i8,
}

impl From<Tetromino> for ActiveSnapshot {
    fn from(value: Tetromino) -> Self {
        Self {
            kind: value.kind,
            rotation: value.rotation,
            matrix: value.matrix,
            x: value.x,
            y: value.y,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TimersSnapshot {
    pub drop_ms: f64,
    pub lock_ms: f64,
    pub is_locking: bool,
}

/// Read-only view of one settled frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GameSnapshot {
    pub board: Grid,
    pub active: Option<ActiveSnapshot>,
    pub ghost_y: Option<i8>,
    pub next: Option<PieceKind>,
    pub status: Status,
    pub piece_id: u32,
    pub score: u32,
    pub level: u32,
    pub lines: u32,
    pub soft_drop: bool,
    pub timers: TimersSnapshot,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn playable(&self) -> bool {
        self.status == Status::Playing
    }

    /// Number of filled cells on the grid (active piece excluded).
    pub fn filled_cells(&self) -> usize {
        self.board.iter().flatten().filter(|c| c.is_some()).count()
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            board: [[None; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
            active: None,
            ghost_y: None,
            next: None,
            status: Status::Idle,
            piece_id: 0,
            score: 0,
            level: 0,
            lines: 0,
            soft_drop: false,
            timers: TimersSnapshot {
                drop_ms: 0.0,
                lock_ms: 0.0,
                is_locking: false,
            },
        }
    }
}
