use heapless::Deque;
use log::warn;

use super::{InputEvent, InputProvider};

pub const INPUT_QUEUE_LEN: usize = 8;

/// Bounded event buffer filled by a front-end and drained by the session.
/// Events pushed while the buffer is full are rejected.
#[derive(Debug, Default)]
pub struct QueuedInput {
    events: Deque<InputEvent, INPUT_QUEUE_LEN>,
}

impl QueuedInput {
    pub const fn new() -> Self {
        Self {
            events: Deque::new(),
        }
    }

    pub fn push(&mut self, event: InputEvent) -> bool {
        match self.events.push_back(event) {
            Ok(()) => true,
            Err(event) => {
                warn!("input: queue full, dropping {:?}", event);
                false
            }
        }
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl InputProvider for QueuedInput {
    type Error = core::convert::Infallible;

    fn poll_event(&mut self) -> Result<Option<InputEvent>, Self::Error> {
        Ok(self.events.pop_front())
    }
}
