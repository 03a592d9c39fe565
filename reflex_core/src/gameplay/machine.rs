use reflex_schema::{Attempt, Difficulty, GameRecord, Milliseconds};

use crate::config::GameConfig;
use crate::gameplay::delay::DelaySource;
use crate::gameplay::events::{
    GameEvent, HapticPattern, RoundOutcome, Screen, Signal, HAPTIC_COUNTDOWN_TICK,
    HAPTIC_EARLY_TAP, HAPTIC_ROUND_START, HAPTIC_SUCCESS,
};
use crate::stats::StatsEngine;
use crate::store::{self, KeyValueStore};
use crate::time::clock::Clock;
use crate::time::scheduler::{FiredTimer, Timer, TimerHandle, TimerQueue};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    Idle,
    Countdown { remaining: u32 },
    Waiting { difficulty: Difficulty },
    Ready { difficulty: Difficulty, armed_at: Milliseconds },
}

impl GameState {
    pub fn name(&self) -> &'static str {
        match self {
            GameState::Idle => "IDLE",
            GameState::Countdown { .. } => "COUNTDOWN",
            GameState::Waiting { .. } => "WAITING",
            GameState::Ready { .. } => "READY",
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, GameState::Idle)
    }
}

/// One game session: owns the state, the record and the single live timer.
///
/// The machine never sleeps. A driver calls [`GameMachine::poll`] whenever
/// [`GameMachine::next_deadline`] passes and forwards taps with
/// [`GameMachine::tap`] or [`GameMachine::tap_at`].
pub struct GameMachine<C, D, S> {
    config: GameConfig,
    clock: C,
    delay: D,
    store: S,
    state: GameState,
    selected: Difficulty,
    record: GameRecord,
    timers: TimerQueue,
    active_timer: Option<TimerHandle>,
}

impl<C: Clock, D: DelaySource, S: KeyValueStore> GameMachine<C, D, S> {
    /// Loads the record from `store`; malformed or unreadable data yields an empty record.
    pub fn new(config: GameConfig, clock: C, delay: D, mut store: S) -> Self {
        let record = store::load_record(&mut store);
        Self {
            config,
            clock,
            delay,
            store,
            state: GameState::Idle,
            selected: Difficulty::default(),
            record,
            timers: TimerQueue::new(),
            active_timer: None,
        }
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn record(&self) -> &GameRecord {
        &self.record
    }

    pub fn stats(&self) -> StatsEngine<'_> {
        StatsEngine::new(&self.record)
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn selected_difficulty(&self) -> Difficulty {
        self.selected
    }

    /// Applies at the next WAITING entry.
    pub fn select_difficulty(&mut self, difficulty: Difficulty) {
        self.selected = difficulty;
    }

    pub fn next_deadline(&self) -> Option<Milliseconds> {
        self.timers.next_deadline()
    }

    pub fn start(&mut self) -> Vec<GameEvent> {
        if !self.state.is_idle() {
            log::debug!("start ignored in {}", self.state.name());
            return Vec::new();
        }

        let remaining = self.config.countdown_from;
        let now = self.clock.now_ms();
        let handle =
            self.timers
                .schedule_repeating(now, self.config.tick_interval_ms, Timer::CountdownTick);
        self.replace_active_timer(handle);
        self.state = GameState::Countdown { remaining };
        log::debug!("countdown from {remaining}");

        vec![
            GameEvent::ScreenChanged(Screen::Countdown),
            GameEvent::CountdownTick(remaining),
            GameEvent::Haptic(HapticPattern::Pulse(HAPTIC_COUNTDOWN_TICK)),
        ]
    }

    pub fn tap(&mut self) -> Vec<GameEvent> {
        let now = self.clock.now_ms();
        self.tap_at(now)
    }

    /// Judges a tap that happened at `tapped_at`, which may be earlier than now.
    ///
    /// Call this before [`GameMachine::poll`]: a tap that predates the go
    /// signal is early even if the arm deadline has since passed.
    pub fn tap_at(&mut self, tapped_at: Milliseconds) -> Vec<GameEvent> {
        match self.state {
            GameState::Idle | GameState::Countdown { .. } => Vec::new(),
            GameState::Waiting { difficulty } => self.finish_early(difficulty),
            GameState::Ready {
                difficulty,
                armed_at,
            } if tapped_at < armed_at => {
                log::debug!("tap at {tapped_at} predates go at {armed_at}");
                self.finish_early(difficulty)
            }
            GameState::Ready {
                difficulty,
                armed_at,
            } => self.finish_reacted(difficulty, tapped_at - armed_at),
        }
    }

    /// Delivers every timer due at the current clock reading, in deadline order.
    pub fn poll(&mut self) -> Vec<GameEvent> {
        let now = self.clock.now_ms();
        let mut events = Vec::new();
        while let Some(fired) = self.timers.pop_due(now) {
            events.extend(self.on_timer(fired));
        }
        events
    }

    /// Handles one fired timer. Anything but the live handle is stale and dropped.
    pub fn on_timer(&mut self, fired: FiredTimer) -> Vec<GameEvent> {
        if self.active_timer != Some(fired.handle) {
            log::debug!("dropping stale {:?} timer", fired.timer);
            return Vec::new();
        }

        match (fired.timer, self.state) {
            (Timer::CountdownTick, GameState::Countdown { remaining }) => {
                self.countdown_tick(remaining, fired.deadline)
            }
            (Timer::Arm, GameState::Waiting { difficulty }) => self.arm(difficulty),
            (timer, state) => {
                log::debug!("ignoring {timer:?} timer in {}", state.name());
                self.cancel_active_timer();
                Vec::new()
            }
        }
    }

    /// Clears the record and its persisted copy; aborts any round in progress.
    pub fn reset(&mut self) -> Vec<GameEvent> {
        self.cancel_active_timer();
        let was_idle = self.state.is_idle();
        self.state = GameState::Idle;
        self.record = GameRecord::default();

        if let Err(e) = store::clear_record(&mut self.store) {
            log::warn!("failed to clear persisted record: {e}");
        }
        log::info!("game record reset");

        let mut events = Vec::new();
        if !was_idle {
            events.push(GameEvent::ScreenChanged(Screen::Home));
        }
        events.push(GameEvent::RecordReset);
        events
    }

    fn countdown_tick(&mut self, remaining: u32, deadline: Milliseconds) -> Vec<GameEvent> {
        let remaining = remaining.saturating_sub(1);
        if remaining > 0 {
            self.state = GameState::Countdown { remaining };
            return vec![
                GameEvent::CountdownTick(remaining),
                GameEvent::Haptic(HapticPattern::Pulse(HAPTIC_COUNTDOWN_TICK)),
            ];
        }

        self.cancel_active_timer();
        self.enter_waiting(deadline)
    }

    fn enter_waiting(&mut self, now: Milliseconds) -> Vec<GameEvent> {
        let difficulty = self.selected;
        let window = self.config.delays.for_difficulty(difficulty);
        let delay_ms = self.delay.delay_for(window);
        let handle = self.timers.schedule_once(now, delay_ms, Timer::Arm);
        self.replace_active_timer(handle);
        self.state = GameState::Waiting { difficulty };
        log::debug!("waiting {delay_ms}ms on {difficulty}");

        vec![
            GameEvent::ScreenChanged(Screen::Play),
            GameEvent::SignalChanged(Signal::Wait),
            GameEvent::Haptic(HapticPattern::Pulse(HAPTIC_ROUND_START)),
        ]
    }

    fn arm(&mut self, difficulty: Difficulty) -> Vec<GameEvent> {
        self.active_timer = None;
        let armed_at = self.clock.now_ms();
        self.state = GameState::Ready {
            difficulty,
            armed_at,
        };
        log::debug!("armed at {armed_at}");
        vec![GameEvent::SignalChanged(Signal::Go)]
    }

    fn finish_early(&mut self, difficulty: Difficulty) -> Vec<GameEvent> {
        self.cancel_active_timer();
        self.record.record_early_tap();
        self.persist();
        self.state = GameState::Idle;
        log::info!("too early on {difficulty}");

        vec![
            GameEvent::Haptic(HapticPattern::Sequence(HAPTIC_EARLY_TAP.to_vec())),
            GameEvent::RoundFinished(RoundOutcome::TooEarly),
            GameEvent::ScreenChanged(Screen::Result),
        ]
    }

    fn finish_reacted(
        &mut self,
        difficulty: Difficulty,
        reaction_time_ms: Milliseconds,
    ) -> Vec<GameEvent> {
        let attempt = Attempt {
            reaction_time_ms,
            rank: self.config.ranks.classify(reaction_time_ms),
            difficulty,
            timestamp: self.clock.date_label(),
        };

        let prior_best = self.record.best_streak;
        self.record.record_success(attempt.clone());
        self.persist();
        self.state = GameState::Idle;
        log::info!(
            "reacted in {reaction_time_ms}ms ({}) on {difficulty}",
            attempt.rank
        );

        let streak = self.record.current_streak;
        vec![
            GameEvent::Haptic(HapticPattern::Pulse(HAPTIC_SUCCESS)),
            GameEvent::RoundFinished(RoundOutcome::Reacted {
                attempt,
                streak,
                new_best_streak: self.record.best_streak > prior_best,
            }),
            GameEvent::ScreenChanged(Screen::Result),
        ]
    }

    fn replace_active_timer(&mut self, handle: TimerHandle) {
        self.cancel_active_timer();
        self.active_timer = Some(handle);
    }

    fn cancel_active_timer(&mut self) {
        if let Some(handle) = self.active_timer.take() {
            self.timers.cancel(handle);
        }
    }

    fn persist(&mut self) {
        if let Err(e) = store::save_record(&mut self.store, &self.record) {
            log::warn!("failed to save game record: {e}");
        }
    }
}
