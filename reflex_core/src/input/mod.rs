pub mod events;

use std::time::Duration;

use self::events::InputEvent;
use crossbeam_channel::{unbounded, Receiver, RecvTimeoutError, Sender};

/// Receiving end, owned by the thread that drives the game machine.
pub struct InputQueue {
    receiver: Receiver<InputEvent>,
}

/// Producing end for a reader thread. Clones feed the same queue.
#[derive(Debug, Clone)]
pub struct InputSender {
    sender: Sender<InputEvent>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Received {
    Event(InputEvent),
    TimedOut,
    /// Every sender is gone; no more input will arrive.
    Closed,
}

impl InputQueue {
    /// The queue reports [`Received::Closed`] once the sender and all its clones are dropped.
    pub fn channel() -> (InputSender, InputQueue) {
        let (sender, receiver) = unbounded();
        (InputSender { sender }, InputQueue { receiver })
    }

    /// Non-blocking.
    pub fn pop(&self) -> Option<InputEvent> {
        self.receiver.try_recv().ok()
    }

    /// Blocks up to `timeout`, or indefinitely when `None`.
    pub fn pop_timeout(&self, timeout: Option<Duration>) -> Received {
        let result = match timeout {
            Some(timeout) => self.receiver.recv_timeout(timeout),
            None => self
                .receiver
                .recv()
                .map_err(|_| RecvTimeoutError::Disconnected),
        };
        match result {
            Ok(event) => Received::Event(event),
            Err(RecvTimeoutError::Timeout) => Received::TimedOut,
            Err(RecvTimeoutError::Disconnected) => Received::Closed,
        }
    }
}

impl InputSender {
    /// Returns `false` once the queue has been dropped.
    pub fn push(&self, event: InputEvent) -> bool {
        self.sender.send(event).is_ok()
    }
}
