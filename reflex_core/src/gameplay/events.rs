use reflex_schema::{Attempt, Milliseconds};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Screen {
    Home,
    Countdown,
    Play,
    Result,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Signal {
    /// Red: do not tap yet.
    Wait,
    /// Green: tap now.
    Go,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HapticPattern {
    Pulse(Milliseconds),
    /// Alternating vibrate / pause durations, starting with vibrate.
    Sequence(Vec<Milliseconds>),
}

pub const HAPTIC_COUNTDOWN_TICK: Milliseconds = 40;
pub const HAPTIC_ROUND_START: Milliseconds = 80;
pub const HAPTIC_SUCCESS: Milliseconds = 60;
pub const HAPTIC_EARLY_TAP: [Milliseconds; 3] = [100, 50, 100];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoundOutcome {
    TooEarly,
    Reacted {
        attempt: Attempt,
        streak: u32,
        new_best_streak: bool,
    },
}

/// Presentation and haptic intents. The core never renders; a front end
/// consumes these in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    ScreenChanged(Screen),
    CountdownTick(u32),
    SignalChanged(Signal),
    RoundFinished(RoundOutcome),
    Haptic(HapticPattern),
    RecordReset,
}
