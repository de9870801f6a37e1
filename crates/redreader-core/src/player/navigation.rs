impl Player {
    /// Loads `document` at the position in `state` and enters `Paused`.
    pub fn load(&mut self, document: Document, state: &ReadingState) {
        self.cursor = state.idx.min(document.last_index());
        self.wpm = self.config.clamp_wpm(state.wpm);
        self.playback = Playback::Paused;
        self.accumulated_ms = 0;
        self.last_tick_ms = None;
        self.pending_redraw = true;
        self.events.clear();

        info!(
            "player: loaded {} ({} tokens) at {} wpm={}",
            document.id(),
            document.len(),
            self.cursor,
            self.wpm
        );
        self.document = Some(document);
    }

    /// Moves the cursor by `delta` tokens. A forward seek past the last token
    /// pauses playback.
    pub fn seek(&mut self, delta: i64) {
        let Some(last_index) = self.document.as_ref().map(Document::last_index) else {
            return;
        };

        let target = (self.cursor as i64).saturating_add(delta);
        if target > last_index as i64 && self.playback == Playback::Playing {
            self.playback = Playback::Paused;
            debug!("player: seek past end, pausing at {}", last_index);
        }

        self.move_cursor(target.clamp(0, last_index as i64) as usize);
    }

    pub fn seek_back(&mut self) {
        self.seek(-(self.config.seek_step as i64));
    }

    pub fn seek_forward(&mut self) {
        self.seek(self.config.seek_step as i64);
    }

    pub fn jump_to(&mut self, index: usize) {
        let Some(last_index) = self.document.as_ref().map(Document::last_index) else {
            return;
        };
        self.move_cursor(index.min(last_index));
    }

    /// Takes the oldest unconsumed change event.
    pub fn pop_event(&mut self) -> Option<ChangeEvent> {
        self.events.pop_front()
    }

    fn move_cursor(&mut self, index: usize) {
        self.accumulated_ms = 0;
        self.pending_redraw = true;
        if index != self.cursor {
            self.cursor = index;
            self.emit(ChangeKind::Cursor);
        }
    }

    fn emit(&mut self, kind: ChangeKind) {
        let event = ChangeEvent {
            kind,
            idx: self.cursor,
            wpm: self.wpm,
        };

        // Consumers keep only the newest state, so the oldest event is the
        // one to give up.
        if self.events.is_full() {
            let _ = self.events.pop_front();
            trace!("player: change queue full, dropped oldest event");
        }
        let _ = self.events.push_back(event);
    }
}
