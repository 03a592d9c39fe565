use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

pub type Milliseconds = u64;

/// Store key holding the current record.
pub const RECORD_KEY: &str = "reflex_record";

/// Store key of the pre-record format: a bare array of millisecond values.
pub const LEGACY_HISTORY_KEY: &str = "novah_reaction_data";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Normal, Difficulty::Hard];

    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "EASY",
            Difficulty::Normal => "NORMAL",
            Difficulty::Hard => "HARD",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "normal" => Ok(Difficulty::Normal),
            "hard" => Ok(Difficulty::Hard),
            other => Err(format!("unknown difficulty '{other}' (expected easy, normal or hard)")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Rank {
    LightningFast,
    Fast,
    Average,
    Slow,
}

impl Rank {
    pub fn as_str(self) -> &'static str {
        match self {
            Rank::LightningFast => "LIGHTNING_FAST",
            Rank::Fast => "FAST",
            Rank::Average => "AVERAGE",
            Rank::Slow => "SLOW",
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One successful round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attempt {
    #[serde(rename = "time")]
    pub reaction_time_ms: Milliseconds,
    pub rank: Rank,
    #[serde(rename = "diff")]
    pub difficulty: Difficulty,
    #[serde(rename = "date")]
    pub timestamp: String,
}

/// The persisted aggregate. Early taps are counted but leave no entry in
/// `history`, so `total_games == history.len() + early_taps` holds.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GameRecord {
    #[serde(default)]
    pub history: Vec<Attempt>,
    #[serde(default, rename = "streak")]
    pub current_streak: u32,
    #[serde(default, rename = "bestStreak")]
    pub best_streak: u32,
    #[serde(default, rename = "tooEarly")]
    pub early_taps: u32,
    #[serde(default, rename = "totalGames")]
    pub total_games: u32,
}

impl GameRecord {
    pub fn record_success(&mut self, attempt: Attempt) {
        self.history.push(attempt);
        self.total_games += 1;
        self.current_streak += 1;
        self.best_streak = self.best_streak.max(self.current_streak);
    }

    pub fn record_early_tap(&mut self) {
        self.total_games += 1;
        self.early_taps += 1;
        self.current_streak = 0;
    }

    pub fn is_consistent(&self) -> bool {
        u64::from(self.total_games) == self.history.len() as u64 + u64::from(self.early_taps)
            && self.best_streak >= self.current_streak
    }

    /// Repairs counters that disagree with the history (e.g. a hand-edited file).
    pub fn sanitized(mut self) -> Self {
        // Saturates; a history past u32::MAX cannot be counted exactly.
        let successes = u32::try_from(self.history.len()).unwrap_or(u32::MAX);
        self.total_games = successes.saturating_add(self.early_taps);
        self.best_streak = self.best_streak.max(self.current_streak);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attempt(ms: Milliseconds) -> Attempt {
        Attempt {
            reaction_time_ms: ms,
            rank: Rank::Fast,
            difficulty: Difficulty::Normal,
            timestamp: "2026-01-01 12:00".to_string(),
        }
    }

    #[test]
    fn record_uses_persisted_field_names() {
        let mut record = GameRecord::default();
        record.record_success(attempt(237));

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["history"][0]["time"], 237);
        assert_eq!(value["history"][0]["rank"], "FAST");
        assert_eq!(value["history"][0]["diff"], "NORMAL");
        assert_eq!(value["history"][0]["date"], "2026-01-01 12:00");
        assert_eq!(value["streak"], 1);
        assert_eq!(value["bestStreak"], 1);
        assert_eq!(value["tooEarly"], 0);
        assert_eq!(value["totalGames"], 1);
    }

    #[test]
    fn missing_fields_default_to_zero() {
        let record: GameRecord = serde_json::from_str(r#"{"streak":2,"bestStreak":4}"#).unwrap();
        assert!(record.history.is_empty());
        assert_eq!(record.current_streak, 2);
        assert_eq!(record.best_streak, 4);
        assert_eq!(record.total_games, 0);
    }

    #[test]
    fn early_tap_breaks_streak_but_keeps_best() {
        let mut record = GameRecord::default();
        record.record_success(attempt(200));
        record.record_success(attempt(210));
        record.record_early_tap();

        assert_eq!(record.current_streak, 0);
        assert_eq!(record.best_streak, 2);
        assert_eq!(record.total_games, 3);
        assert_eq!(record.early_taps, 1);
        assert!(record.is_consistent());
    }

    #[test]
    fn sanitized_repairs_counters() {
        let record = GameRecord {
            history: vec![attempt(300)],
            current_streak: 5,
            best_streak: 1,
            early_taps: 2,
            total_games: 99,
        }
        .sanitized();

        assert_eq!(record.total_games, 3);
        assert_eq!(record.best_streak, 5);
        assert!(record.is_consistent());
    }

    #[test]
    fn sanitized_saturates_instead_of_wrapping() {
        let record = GameRecord {
            history: vec![attempt(300), attempt(200)],
            current_streak: 2,
            best_streak: 2,
            early_taps: u32::MAX - 1,
            total_games: 0,
        }
        .sanitized();

        assert_eq!(record.total_games, u32::MAX);
        // Saturated counters cannot satisfy the exact count.
        assert!(!record.is_consistent());
    }

    #[test]
    fn difficulty_parses_case_insensitively() {
        assert_eq!("HARD".parse::<Difficulty>(), Ok(Difficulty::Hard));
        assert_eq!("easy".parse::<Difficulty>(), Ok(Difficulty::Easy));
        assert!("nightmare".parse::<Difficulty>().is_err());
    }
}
