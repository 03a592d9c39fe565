use reflex_schema::{Milliseconds, Rank};
use serde::{Deserialize, Serialize};

/// Inclusive upper bounds for each rank; anything above `average_ms` is Slow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RankThresholds {
    pub lightning_fast_ms: Milliseconds,
    pub fast_ms: Milliseconds,
    pub average_ms: Milliseconds,
}

impl Default for RankThresholds {
    fn default() -> Self {
        Self {
            lightning_fast_ms: 180,
            fast_ms: 250,
            average_ms: 350,
        }
    }
}

impl RankThresholds {
    pub fn classify(&self, reaction_time_ms: Milliseconds) -> Rank {
        if reaction_time_ms <= self.lightning_fast_ms {
            Rank::LightningFast
        } else if reaction_time_ms <= self.fast_ms {
            Rank::Fast
        } else if reaction_time_ms <= self.average_ms {
            Rank::Average
        } else {
            Rank::Slow
        }
    }

    pub fn is_increasing(&self) -> bool {
        self.lightning_fast_ms < self.fast_ms && self.fast_ms < self.average_ms
    }
}

/// Classifies with the default thresholds.
pub fn get_rank(reaction_time_ms: Milliseconds) -> Rank {
    RankThresholds::default().classify(reaction_time_ms)
}
