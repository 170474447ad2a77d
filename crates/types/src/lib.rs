//! Shared vocabulary for the simulation: piece kinds, rotation states, actions,
//! session status, and the timing/scoring constants.
//!
//! Everything here is plain data. The core crate owns the rules that use it.
//!
//! # Board Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 20 rows (indexed 0-19, top to bottom)
//!
//! # Timing Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `SOFT_DROP_INTERVAL_MS` | 50 | Gravity interval while soft drop is held |
//! | `LOCK_DELAY_MS` | 500 | Grace period once a piece cannot descend |
//! | `DEFAULT_DAS_MS` | 150 | Hold time before auto-repeat starts |
//! | `DEFAULT_ARR_MS` | 50 | Interval between auto-repeat moves |
//!
//! # Examples
//!
//! ```
//! use tetris_sim_types::{GameAction, PieceKind, Rotation, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! assert_eq!(PieceKind::from_str("t"), Some(PieceKind::T));
//! assert_eq!(Rotation::North.rotate_cw(), Rotation::East);
//! assert_eq!(GameAction::from_str("hardDrop"), Some(GameAction::HardDrop));
//! assert_eq!((BOARD_WIDTH, BOARD_HEIGHT), (10, 20));
//! ```

use serde::{Deserialize, Serialize};

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Board height in cells (20 rows)
pub const BOARD_HEIGHT: u8 = 20;

/// Gravity interval while soft drop is held, independent of level.
pub const SOFT_DROP_INTERVAL_MS: u32 = 50;

/// Lock delay once the active piece cannot descend.
pub const LOCK_DELAY_MS: u32 = 500;

/// DAS (Delayed Auto Shift) delay in milliseconds.
pub const DEFAULT_DAS_MS: u32 = 150;

/// ARR (Auto Repeat Rate) in milliseconds.
pub const DEFAULT_ARR_MS: u32 = 50;

/// Lines needed per level.
pub const LINES_PER_LEVEL: u32 = 10;

/// Gravity interval by level (milliseconds per row).
///
/// Levels past the end of the table use the last entry.
pub const DROP_INTERVALS: [u32; 21] = [
    800, 720, 630, 550, 470, 380, 300, 220, 130, 100, 80, 80, 80, 70, 70, 70, 50, 50, 50, 30, 30,
];

/// Line clear base points, indexed by rows cleared at once.
///
/// Multiplied by `level + 1`.
pub const LINE_SCORES: [u32; 5] = [0, 100, 300, 500, 800];

/// Points per row gained by gravity while soft drop is held.
pub const SOFT_DROP_POINTS_PER_ROW: u32 = 1;

/// Points per row descended by a hard drop.
pub const HARD_DROP_POINTS_PER_ROW: u32 = 2;

/// The seven tetromino piece kinds
///
/// Each piece has a distinct shape and color:
/// - **I**: Cyan, horizontal bar
/// - **O**: Yellow, 2x2 square
/// - **T**: Purple, T-shaped
/// - **S**: Green, S-shaped
/// - **Z**: Red, Z-shaped (mirror of S)
/// - **J**: Blue, J-shaped
/// - **L**: Orange, L-shaped (mirror of J)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
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
    ///
    /// # Examples
    ///
    /// ```
    /// use tetris_sim_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("O"), Some(PieceKind::O));
    /// assert_eq!(PieceKind::from_str("unknown"), None);
    /// ```
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

    /// Uppercase display name
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "I",
            PieceKind::O => "O",
            PieceKind::T => "T",
            PieceKind::S => "S",
            PieceKind::Z => "Z",
            PieceKind::J => "J",
            PieceKind::L => "L",
        }
    }

    /// Display color as 0xRRGGBB
    pub fn color(&self) -> u32 {
        match self {
            PieceKind::I => 0x00fff5,
            PieceKind::O => 0xffff00,
            PieceKind::T => 0x9b59b6,
            PieceKind::S => 0x39ff14,
            PieceKind::Z => 0xff0040,
            PieceKind::J => 0x4444ff,
            PieceKind::L => 0xff6600,
        }
    }
}

/// Rotation states, numbered 0-3 clockwise from spawn.
///
/// The rotation cycle goes: North → East → South → West → North
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rotation {
    North,
    East,
    South,
    West,
}

impl Rotation {
    /// Rotate clockwise (90°)
    ///
    /// # Examples
    ///
    /// ```
    /// use tetris_sim_types::Rotation;
    ///
    /// assert_eq!(Rotation::North.rotate_cw(), Rotation::East);
    /// assert_eq!(Rotation::West.rotate_cw(), Rotation::North);
    /// ```
    pub fn rotate_cw(&self) -> Self {
        match self {
            Rotation::North => Rotation::East,
            Rotation::East => Rotation::South,
            Rotation::South => Rotation::West,
            Rotation::West => Rotation::North,
        }
    }

    /// Rotate counter-clockwise (-90° or 270°)
    pub fn rotate_ccw(&self) -> Self {
        match self {
            Rotation::North => Rotation::West,
            Rotation::West => Rotation::South,
            Rotation::South => Rotation::East,
            Rotation::East => Rotation::North,
        }
    }

    /// State index 0-3
    pub fn index(&self) -> usize {
        match self {
            Rotation::North => 0,
            Rotation::East => 1,
            Rotation::South => 2,
            Rotation::West => 3,
        }
    }

    /// Inverse of [`Rotation::index`], taken modulo 4.
    pub fn from_index(index: usize) -> Self {
        match index % 4 {
            0 => Rotation::North,
            1 => Rotation::East,
            2 => Rotation::South,
            _ => Rotation::West,
        }
    }

    /// Convert to lowercase string
    pub fn as_str(&self) -> &'static str {
        match self {
            Rotation::North => "north",
            Rotation::East => "east",
            Rotation::South => "south",
            Rotation::West => "west",
        }
    }
}

/// Direction of a rotation attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RotationDirection {
    Clockwise,
    CounterClockwise,
}

/// Discrete inputs accepted by the simulation.
///
/// Horizontal moves arm auto-repeat; the matching release action disarms it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GameAction {
    /// Reset the session and begin playing
    Start,
    /// Freeze timers (only while playing)
    Pause,
    /// Continue a paused session
    Resume,
    /// Move piece one cell left and hold left
    MoveLeft,
    /// Move piece one cell right and hold right
    MoveRight,
    /// Stop holding left
    ReleaseLeft,
    /// Stop holding right
    ReleaseRight,
    /// Rotate piece 90° clockwise
    #[serde(rename = "rotateCW")]
    RotateCw,
    /// Rotate piece 90° counter-clockwise
    #[serde(rename = "rotateCCW")]
    RotateCcw,
    /// Begin accelerated gravity
    SoftDropOn,
    /// End accelerated gravity
    SoftDropOff,
    /// Drop to the lowest valid row and lock immediately
    HardDrop,
}

impl GameAction {
    pub const ALL: [GameAction; 12] = [
        GameAction::Start,
        GameAction::Pause,
        GameAction::Resume,
        GameAction::MoveLeft,
        GameAction::MoveRight,
        GameAction::ReleaseLeft,
        GameAction::ReleaseRight,
        GameAction::RotateCw,
        GameAction::RotateCcw,
        GameAction::SoftDropOn,
        GameAction::SoftDropOff,
        GameAction::HardDrop,
    ];

    /// Parse action from its camelCase name (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use tetris_sim_types::GameAction;
    ///
    /// assert_eq!(GameAction::from_str("moveLeft"), Some(GameAction::MoveLeft));
    /// assert_eq!(GameAction::from_str("rotateCW"), Some(GameAction::RotateCw));
    /// assert_eq!(GameAction::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "start" => Some(GameAction::Start),
            "pause" => Some(GameAction::Pause),
            "resume" => Some(GameAction::Resume),
            "moveleft" => Some(GameAction::MoveLeft),
            "moveright" => Some(GameAction::MoveRight),
            "releaseleft" => Some(GameAction::ReleaseLeft),
            "releaseright" => Some(GameAction::ReleaseRight),
            "rotatecw" => Some(GameAction::RotateCw),
            "rotateccw" => Some(GameAction::RotateCcw),
            "softdropon" => Some(GameAction::SoftDropOn),
            "softdropoff" => Some(GameAction::SoftDropOff),
            "harddrop" => Some(GameAction::HardDrop),
            _ => None,
        }
    }

    /// camelCase name
    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::Start => "start",
            GameAction::Pause => "pause",
            GameAction::Resume => "resume",
            GameAction::MoveLeft => "moveLeft",
            GameAction::MoveRight => "moveRight",
            GameAction::ReleaseLeft => "releaseLeft",
            GameAction::ReleaseRight => "releaseRight",
            GameAction::RotateCw => "rotateCW",
            GameAction::RotateCcw => "rotateCCW",
            GameAction::SoftDropOn => "softDropOn",
            GameAction::SoftDropOff => "softDropOff",
            GameAction::HardDrop => "hardDrop",
        }
    }
}

/// Session lifecycle.
///
/// `Idle -> Playing <-> Paused`, and `Playing -> GameOver`. `Start` leaves any
/// status for `Playing`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Status {
    #[default]
    Idle,
    Playing,
    Paused,
    GameOver,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Idle => "idle",
            Status::Playing => "playing",
            Status::Paused => "paused",
            Status::GameOver => "game-over",
        }
    }
}

/// Which top-out rule ended the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GameOverCause {
    /// A piece locked with cells above row 0.
    LockOut,
    /// A freshly spawned piece overlapped locked cells.
    BlockOut,
}

/// A cell on the game board
///
/// - `None`: Empty cell
/// - `Some(PieceKind)`: Cell filled by the specified piece kind
pub type Cell = Option<PieceKind>;
