//! Core game logic - pure, deterministic, and testable
//!
//! Rules, state and simulation for a single-player falling-block game on a
//! 10x20 grid. Nothing here touches a clock, a terminal or a socket: time only
//! advances through [`GameState::tick`] and randomness only comes from the
//! seeded bag in [`rng`].
//!
//! # Module Structure
//!
//! - [`board`]: 10x20 grid with collision checks and row clearing
//! - [`pieces`]: tetromino bitmaps, quarter-turn rotation, SRS wall kicks
//! - [`rng`]: seeded 7-bag randomizer
//! - [`scoring`]: line, drop and level rules
//! - [`autoshift`]: held-key auto-repeat (DAS/ARR)
//! - [`config`]: timing configuration, optionally read from the environment
//! - [`game_state`]: the session state machine
//! - [`events`] and [`snapshot`]: what presentation layers observe
//!
//! # Example
//!
//! ```
//! use tetris_sim_core::GameState;
//! use tetris_sim_types::{GameAction, Status};
//!
//! let mut game = GameState::new(12345);
//! game.start();
//!
//! game.apply_action(GameAction::MoveRight);
//! game.apply_action(GameAction::RotateCw);
//! game.apply_action(GameAction::HardDrop);
//!
//! assert_eq!(game.status(), Status::Playing);
//! assert!(game.score() > 0); // hard drop awards points
//! ```
//!
//! # Timing
//!
//! - Gravity: 800ms at level 0, shrinking per level down to 30ms
//! - Soft drop: one row per 50ms while held
//! - Lock delay: 500ms once a piece cannot fall; shifts and rotations restart it
//!
//! Call [`GameState::tick`] with the elapsed milliseconds of each frame.

pub mod autoshift;
pub mod board;
pub mod config;
pub mod events;
pub mod game_state;
pub mod pieces;
pub mod rng;
pub mod scoring;
pub mod snapshot;

pub use tetris_sim_types as types;

// Re-export commonly used types for convenience
pub use autoshift::{AutoShift, HorizontalDirection};
pub use board::Board;
pub use config::{ConfigError, GameConfig};
pub use events::{Events, GameEvent};
pub use game_state::{GameState, Tetromino};
pub use pieces::{base_matrix, try_rotate, Matrix, RotationResult};
pub use rng::{PieceQueue, SimpleRng};
pub use scoring::{calculate_drop_score, calculate_level, calculate_line_score};
pub use snapshot::{ActiveSnapshot, GameSnapshot, Grid};
