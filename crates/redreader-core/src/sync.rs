//! Debounced persistence of reading positions.

use log::{debug, warn};

use crate::state::{ReadingState, ReadingStateStore};

pub const PERSIST_DEBOUNCE_MS: u64 = 400;

/// Single-slot, last-write-wins write-behind for one document.
///
/// Every tracked state replaces the pending one and restarts the quiescence
/// window, so a burst of cursor moves results in one write of the final
/// position.
#[derive(Clone, Debug)]
pub struct ReadingStateSync {
    debounce_ms: u64,
    last_saved: Option<(usize, u16)>,
    pending: Option<(ReadingState, u64)>,
}

impl ReadingStateSync {
    pub fn new(last_saved: Option<&ReadingState>, debounce_ms: u64) -> Self {
        Self {
            debounce_ms,
            last_saved: last_saved.map(ReadingState::position),
            pending: None,
        }
    }

    pub fn track(&mut self, state: ReadingState, now_ms: u64) {
        self.pending = Some((state, now_ms));
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Writes the pending state once its window has elapsed. Returns `true`
    /// when a write reached the store.
    pub fn flush_if_due<S>(&mut self, store: &mut S, now_ms: u64) -> bool
    where
        S: ReadingStateStore,
    {
        let Some((_, changed_at_ms)) = self.pending.as_ref() else {
            return false;
        };
        if now_ms.saturating_sub(*changed_at_ms) < self.debounce_ms {
            return false;
        }

        let Some((state, _)) = self.pending.take() else {
            return false;
        };
        if self.last_saved == Some(state.position()) {
            return false;
        }

        match store.save(&state) {
            Ok(()) => {
                debug!(
                    "sync: saved {} idx={} wpm={}",
                    state.document_id, state.idx, state.wpm
                );
                self.last_saved = Some(state.position());
                true
            }
            Err(err) => {
                // Keep it and retry after another quiet window.
                warn!("sync: save failed for {}: {:?}", state.document_id, err);
                self.pending = Some((state, now_ms));
                false
            }
        }
    }

    /// Drops the pending write without saving it.
    pub fn cancel(&mut self) -> Option<ReadingState> {
        self.pending.take().map(|(state, _)| state)
    }

    /// Synchronous best-effort write, bypassing the debounce window.
    pub fn flush_now<S>(&mut self, store: &mut S, state: &ReadingState) -> bool
    where
        S: ReadingStateStore,
    {
        self.pending = None;
        if self.last_saved == Some(state.position()) {
            return false;
        }

        match store.save(state) {
            Ok(()) => {
                self.last_saved = Some(state.position());
                true
            }
            Err(err) => {
                warn!("sync: final save failed for {}: {:?}", state.document_id, err);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use super::*;
    use crate::state::StoredPosition;

    #[derive(Default)]
    struct RecordingStore {
        saved: Vec<(usize, u16)>,
        fail_next: usize,
    }

    impl ReadingStateStore for RecordingStore {
        type Error = ();

        fn load(&mut self, _document_id: &str) -> Result<Option<StoredPosition>, Self::Error> {
            Ok(None)
        }

        fn save(&mut self, state: &ReadingState) -> Result<(), Self::Error> {
            if self.fail_next > 0 {
                self.fail_next -= 1;
                return Err(());
            }
            self.saved.push(state.position());
            Ok(())
        }
    }

    fn state(idx: usize, wpm: u16) -> ReadingState {
        let mut state = ReadingState::new("doc");
        state.idx = idx;
        state.wpm = wpm;
        state
    }

    #[test]
    fn coalesces_bursts_into_last_state() {
        let mut store = RecordingStore::default();
        let mut sync = ReadingStateSync::new(None, PERSIST_DEBOUNCE_MS);

        sync.track(state(1, 600), 0);
        sync.track(state(2, 600), 100);
        sync.track(state(3, 650), 300);

        assert!(!sync.flush_if_due(&mut store, 500));
        assert!(store.saved.is_empty());

        assert!(sync.flush_if_due(&mut store, 700));
        assert_eq!(store.saved, [(3, 650)]);
        assert!(!sync.has_pending());
    }

    #[test]
    fn skips_already_saved_position() {
        let mut store = RecordingStore::default();
        let initial = state(4, 600);
        let mut sync = ReadingStateSync::new(Some(&initial), PERSIST_DEBOUNCE_MS);

        sync.track(state(4, 600), 0);
        assert!(!sync.flush_if_due(&mut store, 1_000));
        assert!(store.saved.is_empty());
        assert!(!sync.has_pending());
    }

    #[test]
    fn failed_save_is_retried_after_another_window() {
        let mut store = RecordingStore {
            fail_next: 1,
            ..RecordingStore::default()
        };
        let mut sync = ReadingStateSync::new(None, PERSIST_DEBOUNCE_MS);

        sync.track(state(7, 600), 0);
        assert!(!sync.flush_if_due(&mut store, 400));
        assert!(sync.has_pending());

        assert!(!sync.flush_if_due(&mut store, 700));
        assert!(sync.flush_if_due(&mut store, 800));
        assert_eq!(store.saved, [(7, 600)]);
    }

    #[test]
    fn cancel_drops_pending_write() {
        let mut store = RecordingStore::default();
        let mut sync = ReadingStateSync::new(None, PERSIST_DEBOUNCE_MS);

        sync.track(state(2, 600), 0);
        assert_eq!(sync.cancel().map(|s| s.idx), Some(2));
        assert!(!sync.flush_if_due(&mut store, 10_000));
        assert!(store.saved.is_empty());
    }

    #[test]
    fn flush_now_ignores_window() {
        let mut store = RecordingStore::default();
        let mut sync = ReadingStateSync::new(None, PERSIST_DEBOUNCE_MS);

        sync.track(state(2, 600), 0);
        assert!(sync.flush_now(&mut store, &state(3, 600)));
        assert_eq!(store.saved, [(3, 600)]);
        assert!(!sync.has_pending());

        assert!(!sync.flush_now(&mut store, &state(3, 600)));
    }
}
