//! Persisted reading position abstraction.

use alloc::{collections::BTreeMap, string::String};

use log::warn;

use crate::player::ReaderConfig;

pub const DEFAULT_WPM: u16 = 600;
pub const EXTENSIONS_VERSION: u16 = 1;

/// Reserved per-document parameters (theme, pacing overrides).
///
/// The core never interprets the entries; it only carries them between load
/// and save so newer front-ends can extend the record without a schema break.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StateExtensions {
    #[cfg_attr(feature = "serde", serde(default = "current_extensions_version"))]
    pub version: u16,
    #[cfg_attr(feature = "serde", serde(default))]
    pub entries: BTreeMap<String, String>,
}

impl StateExtensions {
    pub fn new() -> Self {
        Self {
            version: EXTENSIONS_VERSION,
            entries: BTreeMap::new(),
        }
    }
}

#[cfg(feature = "serde")]
fn current_extensions_version() -> u16 {
    EXTENSIONS_VERSION
}

/// Position record as handed back by a store. Every field may be missing or
/// out of range; [`ReadingState::restore`] sanitizes it.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StoredPosition {
    #[cfg_attr(feature = "serde", serde(default))]
    pub idx: Option<i64>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub wpm: Option<i64>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub extensions: Option<StateExtensions>,
}

/// Live reading position of one document.
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReadingState {
    pub document_id: String,
    pub idx: usize,
    pub wpm: u16,
    #[cfg_attr(feature = "serde", serde(default))]
    pub extensions: StateExtensions,
}

impl ReadingState {
    /// State of a document that has never been read.
    pub fn new(document_id: impl Into<String>) -> Self {
        Self {
            document_id: document_id.into(),
            idx: 0,
            wpm: DEFAULT_WPM,
            extensions: StateExtensions::new(),
        }
    }

    /// Builds a state from a possibly corrupt stored record.
    ///
    /// `idx` is clamped into `[0, token_count - 1]`, `wpm` into the configured
    /// range. Missing values and a non-positive `wpm` fall back to defaults.
    pub fn restore(
        document_id: impl Into<String>,
        stored: Option<StoredPosition>,
        token_count: usize,
        config: &ReaderConfig,
    ) -> Self {
        let mut state = Self::new(document_id);
        let Some(stored) = stored else {
            state.wpm = config.clamp_wpm(config.wpm);
            return state;
        };

        let last = token_count.saturating_sub(1) as i64;
        state.idx = stored.idx.unwrap_or(0).clamp(0, last) as usize;

        state.wpm = match stored.wpm {
            Some(wpm) if wpm > 0 => config.clamp_wpm(wpm.min(u16::MAX as i64) as u16),
            Some(wpm) => {
                warn!(
                    "state: {} has invalid wpm {}; using {}",
                    state.document_id, wpm, config.wpm
                );
                config.clamp_wpm(config.wpm)
            }
            None => config.clamp_wpm(config.wpm),
        };

        if let Some(extensions) = stored.extensions {
            state.extensions = extensions;
        }
        state
    }

    /// Position used for "already saved" comparisons.
    pub fn position(&self) -> (usize, u16) {
        (self.idx, self.wpm)
    }
}

/// Durable reading-state backend.
pub trait ReadingStateStore {
    type Error: core::fmt::Debug;

    fn load(&mut self, document_id: &str) -> Result<Option<StoredPosition>, Self::Error>;
    fn save(&mut self, state: &ReadingState) -> Result<(), Self::Error>;
}

impl<T: ReadingStateStore + ?Sized> ReadingStateStore for &mut T {
    type Error = T::Error;

    fn load(&mut self, document_id: &str) -> Result<Option<StoredPosition>, Self::Error> {
        (**self).load(document_id)
    }

    fn save(&mut self, state: &ReadingState) -> Result<(), Self::Error> {
        (**self).save(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stored(idx: Option<i64>, wpm: Option<i64>) -> Option<StoredPosition> {
        Some(StoredPosition {
            idx,
            wpm,
            extensions: None,
        })
    }

    #[test]
    fn missing_record_uses_defaults() {
        let state = ReadingState::restore("doc", None, 10, &ReaderConfig::default());
        assert_eq!(state.position(), (0, 600));
        assert_eq!(state.extensions.version, EXTENSIONS_VERSION);
    }

    #[test]
    fn idx_is_clamped_into_document() {
        let config = ReaderConfig::default();
        assert_eq!(ReadingState::restore("d", stored(Some(99), None), 10, &config).idx, 9);
        assert_eq!(ReadingState::restore("d", stored(Some(-4), None), 10, &config).idx, 0);
        assert_eq!(ReadingState::restore("d", stored(Some(3), None), 0, &config).idx, 0);
    }

    #[test]
    fn corrupt_wpm_falls_back_to_default() {
        let config = ReaderConfig::default();
        assert_eq!(ReadingState::restore("d", stored(None, Some(0)), 5, &config).wpm, 600);
        assert_eq!(ReadingState::restore("d", stored(None, Some(-20)), 5, &config).wpm, 600);
        assert_eq!(ReadingState::restore("d", stored(None, None), 5, &config).wpm, 600);
    }

    #[test]
    fn wpm_is_clamped_into_range() {
        let config = ReaderConfig::default();
        assert_eq!(ReadingState::restore("d", stored(None, Some(50)), 5, &config).wpm, 200);
        assert_eq!(ReadingState::restore("d", stored(None, Some(90_000)), 5, &config).wpm, 1200);
        let state = ReadingState::restore("d", stored(Some(2), Some(700)), 5, &config);
        assert_eq!(state.position(), (2, 700));
    }

    #[test]
    fn extensions_are_carried_over() {
        let mut extensions = StateExtensions::new();
        extensions
            .entries
            .insert(String::from("theme"), String::from("dark"));
        let record = StoredPosition {
            idx: Some(1),
            wpm: Some(500),
            extensions: Some(extensions.clone()),
        };

        let state = ReadingState::restore("d", Some(record), 5, &ReaderConfig::default());
        assert_eq!(state.extensions, extensions);
    }
}
