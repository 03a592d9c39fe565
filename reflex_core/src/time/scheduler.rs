use reflex_schema::Milliseconds;

/// Opaque cancellation handle. Handles are never reused within a queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerHandle(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Timer {
    CountdownTick,
    Arm,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FiredTimer {
    pub handle: TimerHandle,
    pub timer: Timer,
    /// The deadline the timer was scheduled for, not the time it was observed.
    pub deadline: Milliseconds,
}

#[derive(Debug, Clone)]
struct Entry {
    handle: TimerHandle,
    timer: Timer,
    deadline: Milliseconds,
    period: Option<Milliseconds>,
}

/// Deterministic timer queue driven by explicit `pop_due` calls.
#[derive(Debug, Default)]
pub struct TimerQueue {
    next_handle: u64,
    entries: Vec<Entry>,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule_once(
        &mut self,
        now: Milliseconds,
        delay_ms: Milliseconds,
        timer: Timer,
    ) -> TimerHandle {
        self.push(now.saturating_add(delay_ms), None, timer)
    }

    pub fn schedule_repeating(
        &mut self,
        now: Milliseconds,
        period_ms: Milliseconds,
        timer: Timer,
    ) -> TimerHandle {
        let period_ms = period_ms.max(1);
        self.push(now.saturating_add(period_ms), Some(period_ms), timer)
    }

    /// Returns whether a pending timer was removed. Cancelling twice is harmless.
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.handle != handle);
        self.entries.len() != before
    }

    pub fn is_pending(&self, handle: TimerHandle) -> bool {
        self.entries.iter().any(|e| e.handle == handle)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn next_deadline(&self) -> Option<Milliseconds> {
        self.entries.iter().map(|e| e.deadline).min()
    }

    /// Removes the earliest timer due at `now`. Repeating timers are re-armed
    /// one period after their previous deadline.
    pub fn pop_due(&mut self, now: Milliseconds) -> Option<FiredTimer> {
        let idx = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, e)| e.deadline <= now)
            .min_by_key(|(_, e)| (e.deadline, e.handle))
            .map(|(idx, _)| idx)?;

        let entry = &mut self.entries[idx];
        let fired = FiredTimer {
            handle: entry.handle,
            timer: entry.timer,
            deadline: entry.deadline,
        };

        let period = entry.period;
        match period {
            Some(period) => entry.deadline = entry.deadline.saturating_add(period),
            None => {
                self.entries.swap_remove(idx);
            }
        }

        Some(fired)
    }

    fn push(
        &mut self,
        deadline: Milliseconds,
        period: Option<Milliseconds>,
        timer: Timer,
    ) -> TimerHandle {
        let handle = TimerHandle(self.next_handle);
        self.next_handle += 1;
        self.entries.push(Entry {
            handle,
            timer,
            deadline,
            period,
        });
        handle
    }
}
