//! Deterministic replay of recorded input traces.
//!
//! A [`Trace`] is a seed plus an ordered list of actions and ticks. Feeding it
//! to [`replay`] always produces the same [`ReplayOutcome`], which makes
//! traces usable as regression fixtures and bug reports.

pub mod trace;

pub use tetris_sim_core::types;
pub use trace::{parse_trace, Step, Trace, TraceError};

use serde::Serialize;
use tetris_sim_core::{GameConfig, GameEvent, GameSnapshot, GameState};
use tracing::{debug, info_span};

use crate::types::GameOverCause;

/// Seed used when a trace does not name one.
pub const DEFAULT_SEED: u32 = 1;

/// Aggregate result of one replay.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReplayOutcome {
    pub seed: u32,
    pub snapshot: GameSnapshot,
    pub pieces_locked: u32,
    /// One entry per clear, holding the number of rows removed.
    pub line_clears: Vec<u32>,
    pub game_over: Option<GameOverCause>,
    pub elapsed_ms: f64,
}

impl ReplayOutcome {
    pub fn score(&self) -> u32 {
        self.snapshot.score
    }

    pub fn lines(&self) -> u32 {
        self.snapshot.lines
    }
}

/// Run `trace` against a fresh game.
pub fn replay(trace: &Trace, config: GameConfig) -> ReplayOutcome {
    let seed = trace.seed.unwrap_or(DEFAULT_SEED);
    let span = info_span!("replay", seed, steps = trace.steps.len());
    let _guard = span.enter();

    let mut game = GameState::with_config(seed, config);
    let mut outcome = ReplayOutcome {
        seed,
        snapshot: GameSnapshot::default(),
        pieces_locked: 0,
        line_clears: Vec::new(),
        game_over: None,
        elapsed_ms: 0.0,
    };

    for step in &trace.steps {
        match *step {
            Step::Action(action) => {
                let events = game.apply_action(action);
                record(&mut outcome, &events);
            }
            Step::Tick { delta_ms, repeat } => {
                for _ in 0..repeat {
                    let events = game.tick(delta_ms);
                    record(&mut outcome, &events);
                }
                outcome.elapsed_ms += delta_ms * f64::from(repeat);
            }
        }
    }

    game.snapshot_into(&mut outcome.snapshot);
    outcome.game_over = game.game_over_cause();
    debug!(
        score = outcome.snapshot.score,
        locked = outcome.pieces_locked,
        "replay finished"
    );
    outcome
}

fn record(outcome: &mut ReplayOutcome, events: &[GameEvent]) {
    for event in events {
        match *event {
            GameEvent::Locked { .. } => outcome.pieces_locked += 1,
            GameEvent::LinesCleared { count, .. } => outcome.line_clears.push(count),
            _ => {}
        }
    }
}
