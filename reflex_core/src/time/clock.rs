use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

use reflex_schema::Milliseconds;

pub trait Clock {
    /// Monotonic milliseconds since an arbitrary origin.
    fn now_ms(&self) -> Milliseconds;

    /// Human-readable wall-clock label stored with each attempt.
    fn date_label(&self) -> String;
}

#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_ms(&self) -> Milliseconds {
        self.origin.elapsed().as_millis() as Milliseconds
    }

    fn date_label(&self) -> String {
        chrono::Local::now().format("%Y-%m-%d %H:%M").to_string()
    }
}

/// Clock advanced by hand. Clones share the same time source.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Arc<AtomicU64>,
}

impl ManualClock {
    pub fn new(start_ms: Milliseconds) -> Self {
        Self {
            now: Arc::new(AtomicU64::new(start_ms)),
        }
    }

    pub fn advance(&self, delta_ms: Milliseconds) {
        self.now.fetch_add(delta_ms, Ordering::AcqRel);
    }

    pub fn set(&self, now_ms: Milliseconds) {
        self.now.store(now_ms, Ordering::Release);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> Milliseconds {
        self.now.load(Ordering::Acquire)
    }

    fn date_label(&self) -> String {
        format!("t+{}ms", self.now_ms())
    }
}
