//! Tunable timing, with defaults from the shared constants.

use std::env;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{DEFAULT_ARR_MS, DEFAULT_DAS_MS, LOCK_DELAY_MS, SOFT_DROP_INTERVAL_MS};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} must be a whole number of milliseconds (got {raw:?})")]
    InvalidNumber { var: &'static str, raw: String },
    #[error("{var} must be greater than zero")]
    Zero { var: &'static str },
}

/// Timing knobs for one simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub das_ms: u32,
    pub arr_ms: u32,
    pub lock_delay_ms: u32,
    pub soft_drop_interval_ms: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            das_ms: DEFAULT_DAS_MS,
            arr_ms: DEFAULT_ARR_MS,
            lock_delay_ms: LOCK_DELAY_MS,
            soft_drop_interval_ms: SOFT_DROP_INTERVAL_MS,
        }
    }
}

impl GameConfig {
    /// Read overrides from `TETRIS_DAS_MS`, `TETRIS_ARR_MS`,
    /// `TETRIS_LOCK_DELAY_MS` and `TETRIS_SOFT_DROP_MS`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| env::var(var).ok())
    }

    /// Same as [`GameConfig::from_env`] with an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let read = |var: &'static str, default: u32| -> Result<u32, ConfigError> {
            match lookup(var) {
                None => Ok(default),
                Some(raw) if raw.trim().is_empty() => Ok(default),
                Some(raw) => raw
                    .trim()
                    .parse()
                    .map_err(|_| ConfigError::InvalidNumber { var, raw }),
            }
        };

        let config = Self {
            das_ms: read("TETRIS_DAS_MS", defaults.das_ms)?,
            arr_ms: read("TETRIS_ARR_MS", defaults.arr_ms)?,
            lock_delay_ms: read("TETRIS_LOCK_DELAY_MS", defaults.lock_delay_ms)?,
            soft_drop_interval_ms: read("TETRIS_SOFT_DROP_MS", defaults.soft_drop_interval_ms)?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Repeat intervals of zero would never let time advance.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.arr_ms == 0 {
            return Err(ConfigError::Zero { var: "TETRIS_ARR_MS" });
        }
        if self.soft_drop_interval_ms == 0 {
            return Err(ConfigError::Zero {
                var: "TETRIS_SOFT_DROP_MS",
            });
        }
        Ok(())
    }
}
