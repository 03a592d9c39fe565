use std::{fs, path::Path};

use reflex_schema::{Difficulty, Milliseconds};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::gameplay::delay::DelayWindows;
use crate::gameplay::rank::RankThresholds;
use crate::stats::DEFAULT_RECENT_WINDOW;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub countdown_from: u32,
    pub tick_interval_ms: Milliseconds,
    pub delays: DelayWindows,
    pub ranks: RankThresholds,
    pub recent_window: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            countdown_from: 3,
            tick_interval_ms: 1000,
            delays: DelayWindows::default(),
            ranks: RankThresholds::default(),
            recent_window: DEFAULT_RECENT_WINDOW,
        }
    }
}

impl GameConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: GameConfig =
            serde_json::from_slice(&bytes).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: GameConfig =
            serde_json::from_str(json).map_err(|source| ConfigError::Parse {
                path: "<inline>".into(),
                source,
            })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.countdown_from == 0 {
            return Err(ConfigError::InvalidTiming("countdown_from must be at least 1"));
        }
        if self.tick_interval_ms == 0 {
            return Err(ConfigError::InvalidTiming("tick_interval_ms must be non-zero"));
        }

        for difficulty in Difficulty::ALL {
            let window = self.delays.for_difficulty(difficulty);
            if window.is_empty() {
                return Err(ConfigError::InvalidWindow {
                    difficulty,
                    min_ms: window.min_ms,
                    max_ms: window.max_ms,
                });
            }
        }

        if !self.ranks.is_increasing() {
            return Err(ConfigError::InvalidThresholds {
                lightning_fast_ms: self.ranks.lightning_fast_ms,
                fast_ms: self.ranks.fast_ms,
                average_ms: self.ranks.average_ms,
            });
        }

        Ok(())
    }
}
