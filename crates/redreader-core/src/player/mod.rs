//! Tick-driven RSVP playback over a loaded document.

use heapless::Deque;
use log::{debug, info, trace};

use crate::{
    document::Document,
    pacing::PacingConfig,
    render::RenderFrame,
    state::{DEFAULT_WPM, ReadingState},
};

pub const WPM_PRESET_COUNT: usize = 3;
const EVENT_QUEUE_LEN: usize = 16;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TickResult {
    NoRender,
    RenderRequested,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ReaderConfig {
    pub wpm: u16,
    pub min_wpm: u16,
    pub max_wpm: u16,
    pub wpm_step: u16,
    pub seek_step: u16,
    pub wpm_presets: [u16; WPM_PRESET_COUNT],
    pub pacing: PacingConfig,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            wpm: DEFAULT_WPM,
            min_wpm: 200,
            max_wpm: 1200,
            wpm_step: 10,
            seek_step: 10,
            wpm_presets: [300, 500, 700],
            pacing: PacingConfig::default(),
        }
    }
}

impl ReaderConfig {
    pub fn clamp_wpm(&self, wpm: u16) -> u16 {
        let low = self.min_wpm.min(self.max_wpm).max(1);
        let high = self.min_wpm.max(self.max_wpm).max(low);
        wpm.clamp(low, high)
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Playback {
    Idle,
    Playing,
    Paused,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ChangeKind {
    Cursor,
    Speed,
}

/// Cursor or speed mutation, in the order it happened.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ChangeEvent {
    pub kind: ChangeKind,
    pub idx: usize,
    pub wpm: u16,
}

/// Single-reader playback scheduler.
///
/// The player performs no timing of its own: an external source calls
/// [`Player::tick`] with a monotonic millisecond clock and the player decides
/// whether the current token's dwell time has elapsed.
pub struct Player {
    config: ReaderConfig,
    document: Option<Document>,
    playback: Playback,
    cursor: usize,
    wpm: u16,
    accumulated_ms: u64,
    last_tick_ms: Option<u64>,
    pending_redraw: bool,
    events: Deque<ChangeEvent, EVENT_QUEUE_LEN>,
}

include!("runtime.rs");
include!("navigation.rs");
include!("view.rs");
