//! Plain-text input traces.
//!
//! One command per line:
//!
//! ```text
//! # comment
//! seed 42
//! start
//! tick 16 x60
//! moveLeft
//! hardDrop
//! ```
//!
//! `seed` may only appear before the first command. Action names are the
//! camelCase names of [`GameAction`], matched case-insensitively.

use thiserror::Error;

use crate::types::GameAction;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Step {
    Action(GameAction),
    /// `repeat` consecutive ticks of `delta_ms` each.
    Tick { delta_ms: f64, repeat: u32 },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Trace {
    pub seed: Option<u32>,
    pub steps: Vec<Step>,
}

impl Trace {
    /// Total simulated milliseconds.
    pub fn duration_ms(&self) -> f64 {
        self.steps
            .iter()
            .map(|step| match *step {
                Step::Tick { delta_ms, repeat } => delta_ms * f64::from(repeat),
                Step::Action(_) => 0.0,
            })
            .sum()
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum TraceError {
    #[error("line {line}: unknown command `{word}`")]
    UnknownCommand { line: usize, word: String },
    #[error("line {line}: `{command}` needs an argument")]
    MissingArgument { line: usize, command: &'static str },
    #[error("line {line}: invalid number `{raw}`")]
    InvalidNumber { line: usize, raw: String },
    #[error("line {line}: tick delta must be finite and non-negative, got `{raw}`")]
    InvalidDelta { line: usize, raw: String },
    #[error("line {line}: `seed` must come before any command")]
    MisplacedSeed { line: usize },
    #[error("line {line}: unexpected `{extra}`")]
    TrailingInput { line: usize, extra: String },
}

pub fn parse_trace(input: &str) -> Result<Trace, TraceError> {
    let mut trace = Trace::default();

    for (index, raw_line) in input.lines().enumerate() {
        let line = index + 1;
        let content = raw_line.split('#').next().unwrap_or("").trim();
        if content.is_empty() {
            continue;
        }

        let mut words = content.split_whitespace();
        let Some(command) = words.next() else {
            continue;
        };

        match command.to_ascii_lowercase().as_str() {
            "seed" => {
                if trace.seed.is_some() || !trace.steps.is_empty() {
                    return Err(TraceError::MisplacedSeed { line });
                }
                let raw = words.next().ok_or(TraceError::MissingArgument {
                    line,
                    command: "seed",
                })?;
                let seed = raw.parse::<u32>().map_err(|_| TraceError::InvalidNumber {
                    line,
                    raw: raw.to_string(),
                })?;
                trace.seed = Some(seed);
            }
            "tick" => {
                let raw = words.next().ok_or(TraceError::MissingArgument {
                    line,
                    command: "tick",
                })?;
                let delta_ms = raw.parse::<f64>().map_err(|_| TraceError::InvalidNumber {
                    line,
                    raw: raw.to_string(),
                })?;
                if !delta_ms.is_finite() || delta_ms < 0.0 {
                    return Err(TraceError::InvalidDelta {
                        line,
                        raw: raw.to_string(),
                    });
                }
                let repeat = match words.next() {
                    Some(count) => parse_repeat(count, line)?,
                    None => 1,
                };
                trace.steps.push(Step::Tick { delta_ms, repeat });
            }
            _ => {
                let action = GameAction::from_str(command).ok_or_else(|| {
                    TraceError::UnknownCommand {
                        line,
                        word: command.to_string(),
                    }
                })?;
                trace.steps.push(Step::Action(action));
            }
        }

        if let Some(extra) = words.next() {
            return Err(TraceError::TrailingInput {
                line,
                extra: extra.to_string(),
            });
        }
    }

    Ok(trace)
}

/// `xN` or `*N`
fn parse_repeat(raw: &str, line: usize) -> Result<u32, TraceError> {
    let digits = raw
        .strip_prefix(&['x', 'X', '*'][..])
        .ok_or_else(|| TraceError::TrailingInput {
            line,
            extra: raw.to_string(),
        })?;
    digits.parse::<u32>().map_err(|_| TraceError::InvalidNumber {
        line,
        raw: raw.to_string(),
    })
}
