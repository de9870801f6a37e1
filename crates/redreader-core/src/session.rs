//! One reader, one document: player, input and persistence wired together.

use alloc::string::String;

use log::{info, warn};

use crate::{
    document::Document,
    input::{InputEvent, InputProvider},
    player::{Player, ReaderConfig, TickResult},
    render::RenderFrame,
    state::{ReadingState, ReadingStateStore, StateExtensions, StoredPosition},
    sync::{PERSIST_DEBOUNCE_MS, ReadingStateSync},
};

pub struct ReadingSession<S, IN>
where
    S: ReadingStateStore,
    IN: InputProvider,
{
    player: Player,
    store: S,
    input: IN,
    sync: ReadingStateSync,
    document_id: String,
    extensions: StateExtensions,
    closed: bool,
}

impl<S, IN> ReadingSession<S, IN>
where
    S: ReadingStateStore,
    IN: InputProvider,
{
    /// Restores the stored position of `document` and loads it paused.
    ///
    /// A store error or a corrupt record never fails the session; it starts
    /// from the defaults instead.
    pub fn open(document: Document, mut store: S, input: IN, config: ReaderConfig) -> Self {
        let stored = load_stored(&mut store, &document);
        let had_record = stored.is_some();
        let state = ReadingState::restore(document.id(), stored, document.len(), &config);
        let sync = ReadingStateSync::new(had_record.then_some(&state), PERSIST_DEBOUNCE_MS);

        let mut player = Player::new(config);
        let document_id = String::from(document.id());
        player.load(document, &state);

        Self {
            player,
            store,
            input,
            sync,
            document_id,
            extensions: state.extensions,
            closed: false,
        }
    }

    pub fn tick(&mut self, now_ms: u64) -> TickResult {
        if self.closed {
            return TickResult::NoRender;
        }

        let input_changed = self.process_inputs();
        let mut result = self.player.tick(now_ms);
        if input_changed {
            result = TickResult::RenderRequested;
        }

        self.forward_changes(now_ms);
        self.sync.flush_if_due(&mut self.store, now_ms);
        result
    }

    /// Stops playback, drops the pending debounced write and saves the final
    /// position synchronously. Returns whether that final write succeeded.
    pub fn close(mut self) -> bool {
        self.teardown()
    }

    pub fn frame(&self) -> Option<RenderFrame<'_>> {
        self.player.frame()
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    /// Direct control; resulting changes are persisted on the next tick.
    pub fn player_mut(&mut self) -> &mut Player {
        &mut self.player
    }

    pub fn input_mut(&mut self) -> &mut IN {
        &mut self.input
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn document_id(&self) -> &str {
        &self.document_id
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    fn process_inputs(&mut self) -> bool {
        let mut changed = false;
        loop {
            match self.input.poll_event() {
                Ok(Some(event)) => changed |= self.apply_input_event(event),
                Ok(None) => break,
                Err(_) => {
                    warn!("session: input provider failed; ignoring input this tick");
                    break;
                }
            }
        }
        changed
    }

    fn apply_input_event(&mut self, event: InputEvent) -> bool {
        match event {
            InputEvent::TogglePlay => self.player.toggle(),
            InputEvent::SeekBack => {
                self.player.seek_back();
                true
            }
            InputEvent::SeekForward => {
                self.player.seek_forward();
                true
            }
            InputEvent::SpeedUp => self.player.adjust_speed(true),
            InputEvent::SpeedDown => self.player.adjust_speed(false),
            InputEvent::SpeedPreset(slot) => self.player.apply_preset(slot as usize),
        }
    }

    fn forward_changes(&mut self, now_ms: u64) {
        while let Some(event) = self.player.pop_event() {
            let mut state = ReadingState::new(self.document_id.as_str());
            state.idx = event.idx;
            state.wpm = event.wpm;
            state.extensions = self.extensions.clone();
            self.sync.track(state, now_ms);
        }
    }

    fn teardown(&mut self) -> bool {
        if self.closed {
            return false;
        }
        self.closed = true;
        self.player.stop();
        let _ = self.sync.cancel();
        while self.player.pop_event().is_some() {}

        let Some(mut state) = self.player.reading_state() else {
            return false;
        };
        state.extensions = self.extensions.clone();

        let saved = self.sync.flush_now(&mut self.store, &state);
        info!(
            "session: closed {} at idx={} wpm={} (saved={})",
            self.document_id, state.idx, state.wpm, saved
        );
        saved
    }
}

impl<S, IN> Drop for ReadingSession<S, IN>
where
    S: ReadingStateStore,
    IN: InputProvider,
{
    fn drop(&mut self) {
        self.teardown();
    }
}

fn load_stored<S>(store: &mut S, document: &Document) -> Option<StoredPosition>
where
    S: ReadingStateStore,
{
    match store.load(document.id()) {
        Ok(stored) => stored,
        Err(err) => {
            warn!(
                "session: could not load reading state for {}: {:?}; using defaults",
                document.id(),
                err
            );
            None
        }
    }
}
