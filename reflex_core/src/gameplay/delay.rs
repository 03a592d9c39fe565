use rand::Rng;
use reflex_schema::{Difficulty, Milliseconds};
use serde::{Deserialize, Serialize};

/// Half-open `[min_ms, max_ms)` range for the wait before the go signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DelayWindow {
    pub min_ms: Milliseconds,
    pub max_ms: Milliseconds,
}

impl DelayWindow {
    pub const fn new(min_ms: Milliseconds, max_ms: Milliseconds) -> Self {
        Self { min_ms, max_ms }
    }

    pub fn contains(&self, delay_ms: Milliseconds) -> bool {
        (self.min_ms..self.max_ms).contains(&delay_ms)
    }

    pub fn is_empty(&self) -> bool {
        self.min_ms >= self.max_ms
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DelayWindows {
    pub easy: DelayWindow,
    pub normal: DelayWindow,
    pub hard: DelayWindow,
}

impl Default for DelayWindows {
    fn default() -> Self {
        Self {
            easy: DelayWindow::new(1000, 3000),
            normal: DelayWindow::new(2000, 5000),
            hard: DelayWindow::new(3000, 8000),
        }
    }
}

impl DelayWindows {
    pub fn for_difficulty(&self, difficulty: Difficulty) -> DelayWindow {
        match difficulty {
            Difficulty::Easy => self.easy,
            Difficulty::Normal => self.normal,
            Difficulty::Hard => self.hard,
        }
    }
}

/// Source of uniformly distributed delays.
pub trait DelaySource {
    /// Returns a value in `[min, max)`. Callers guarantee `min < max`.
    fn uniform(&mut self, min: Milliseconds, max: Milliseconds) -> Milliseconds;

    fn delay_for(&mut self, window: DelayWindow) -> Milliseconds {
        if window.is_empty() {
            return window.min_ms;
        }
        self.uniform(window.min_ms, window.max_ms)
    }
}

pub struct RngDelay<R> {
    rng: R,
}

impl<R: Rng> RngDelay<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RngDelay<rand::rngs::ThreadRng> {
    pub fn from_thread_rng() -> Self {
        Self::new(rand::thread_rng())
    }
}

impl<R: Rng> DelaySource for RngDelay<R> {
    fn uniform(&mut self, min: Milliseconds, max: Milliseconds) -> Milliseconds {
        self.rng.gen_range(min..max)
    }
}
