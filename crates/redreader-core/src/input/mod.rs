//! Input abstraction layer.

mod queue;

pub use queue::{INPUT_QUEUE_LEN, QueuedInput};

/// Logical reader commands, independent of the physical control.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum InputEvent {
    TogglePlay,
    SeekBack,
    SeekForward,
    SpeedUp,
    SpeedDown,
    /// Zero-based preset slot from the reader config.
    SpeedPreset(u8),
}

/// Polled input provider.
pub trait InputProvider {
    type Error;

    fn poll_event(&mut self) -> Result<Option<InputEvent>, Self::Error>;
}
