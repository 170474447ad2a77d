//! Falling-block puzzle simulation (workspace facade crate).
//!
//! Re-exports the member crates under short paths so binaries and tests can
//! write `tetris_sim::core::GameState` while the implementation lives under
//! `crates/`.

pub use tetris_sim_core as core;
pub use tetris_sim_replay as replay;
pub use tetris_sim_types as types;
