//! Read-only statistics over a [`GameRecord`].
//!
//! Every query is computed on call. `None` is the "no data" sentinel for an
//! empty history; [`display_ms`] renders it as `--`.

use std::iter::Rev;
use std::slice::Iter;

use reflex_schema::{Attempt, Difficulty, GameRecord, Milliseconds, Rank};

pub const DEFAULT_RECENT_WINDOW: usize = 5;

#[derive(Debug, Clone, Copy)]
pub struct StatsEngine<'a> {
    record: &'a GameRecord,
}

impl<'a> StatsEngine<'a> {
    pub fn new(record: &'a GameRecord) -> Self {
        Self { record }
    }

    pub fn best(&self) -> Option<Milliseconds> {
        self.times().min()
    }

    pub fn worst(&self) -> Option<Milliseconds> {
        self.times().max()
    }

    pub fn average(&self) -> Option<Milliseconds> {
        rounded_mean(&self.record.history)
    }

    /// Mean of the newest `min(n, len)` attempts.
    pub fn recent_average(&self, n: usize) -> Option<Milliseconds> {
        let history = &self.record.history;
        let start = history.len().saturating_sub(n);
        rounded_mean(&history[start..])
    }

    pub fn best_for(&self, difficulty: Difficulty) -> Option<Milliseconds> {
        self.record
            .history
            .iter()
            .filter(|a| a.difficulty == difficulty)
            .map(|a| a.reaction_time_ms)
            .min()
    }

    /// Newest first. Each call starts a fresh pass over the history.
    pub fn formatted_history(&self) -> HistoryIter<'a> {
        let record: &'a GameRecord = self.record;
        let history = &record.history;
        HistoryIter {
            inner: history.iter().rev(),
            next_number: history.len(),
        }
    }

    pub fn summary(&self, recent_window: usize) -> StatsSummary {
        let record = self.record;
        let success_rate_percent = if record.total_games == 0 {
            None
        } else {
            let pct = record.history.len() as f64 * 100.0 / record.total_games as f64;
            Some(pct.round() as u32)
        };

        StatsSummary {
            best: self.best(),
            worst: self.worst(),
            average: self.average(),
            recent_average: self.recent_average(recent_window),
            recent_window,
            current_streak: record.current_streak,
            best_streak: record.best_streak,
            early_taps: record.early_taps,
            total_games: record.total_games,
            success_rate_percent,
        }
    }

    fn times(&self) -> impl Iterator<Item = Milliseconds> + 'a {
        let record: &'a GameRecord = self.record;
        record.history.iter().map(|a| a.reaction_time_ms)
    }
}

fn rounded_mean(attempts: &[Attempt]) -> Option<Milliseconds> {
    if attempts.is_empty() {
        return None;
    }
    let len = attempts.len() as u64;
    let sum: u64 = attempts.iter().map(|a| a.reaction_time_ms).sum();
    // Half rounds up, matching Math.round for non-negative values.
    Some((sum + len / 2) / len)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryEntry<'a> {
    /// 1-based position among successful attempts, oldest = 1.
    pub number: usize,
    pub attempt: &'a Attempt,
}

impl HistoryEntry<'_> {
    pub fn reaction_time_ms(&self) -> Milliseconds {
        self.attempt.reaction_time_ms
    }

    pub fn rank(&self) -> Rank {
        self.attempt.rank
    }

    pub fn difficulty(&self) -> Difficulty {
        self.attempt.difficulty
    }

    pub fn date(&self) -> &str {
        &self.attempt.timestamp
    }
}

#[derive(Debug, Clone)]
pub struct HistoryIter<'a> {
    inner: Rev<Iter<'a, Attempt>>,
    next_number: usize,
}

impl<'a> Iterator for HistoryIter<'a> {
    type Item = HistoryEntry<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let attempt = self.inner.next()?;
        let number = self.next_number;
        self.next_number -= 1;
        Some(HistoryEntry { number, attempt })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for HistoryIter<'_> {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatsSummary {
    pub best: Option<Milliseconds>,
    pub worst: Option<Milliseconds>,
    pub average: Option<Milliseconds>,
    pub recent_average: Option<Milliseconds>,
    pub recent_window: usize,
    pub current_streak: u32,
    pub best_streak: u32,
    pub early_taps: u32,
    pub total_games: u32,
    pub success_rate_percent: Option<u32>,
}

pub fn display_ms(value: Option<Milliseconds>) -> String {
    match value {
        Some(ms) => ms.to_string(),
        None => "--".to_string(),
    }
}
