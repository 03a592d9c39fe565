use reflex_schema::Milliseconds;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    Tap,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputEvent {
    /// Clock reading when the input was read. Taps are judged at this time,
    /// not at the time the event is taken off the queue.
    pub timestamp: Milliseconds,
    pub command: Command,
}
