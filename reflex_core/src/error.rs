use std::{io, path::PathBuf};

use reflex_schema::{Difficulty, Milliseconds};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store I/O failed: {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("store contents are not valid JSON")]
    Format(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse config: {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("delay window for {difficulty} is empty (min_ms={min_ms}, max_ms={max_ms})")]
    InvalidWindow {
        difficulty: Difficulty,
        min_ms: Milliseconds,
        max_ms: Milliseconds,
    },

    #[error("rank thresholds must be strictly increasing ({lightning_fast_ms} < {fast_ms} < {average_ms})")]
    InvalidThresholds {
        lightning_fast_ms: Milliseconds,
        fast_ms: Milliseconds,
        average_ms: Milliseconds,
    },

    #[error("invalid timing: {0}")]
    InvalidTiming(&'static str),
}
