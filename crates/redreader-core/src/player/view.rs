impl Player {
    /// Current token as a renderer frame, `None` until a non-empty document is
    /// loaded.
    pub fn frame(&self) -> Option<RenderFrame<'_>> {
        let document = self.document.as_ref()?;
        let token = document.token(self.cursor)?;

        Some(RenderFrame {
            token,
            orp_index: document.orp_index_at(self.cursor),
            position: self.cursor,
            total: document.len(),
            wpm: self.wpm,
            playing: self.playback == Playback::Playing,
        })
    }

    /// Snapshot of the live position for `document_id`.
    pub fn reading_state(&self) -> Option<ReadingState> {
        let document = self.document.as_ref()?;
        let mut state = ReadingState::new(document.id());
        state.idx = self.cursor;
        state.wpm = self.wpm;
        Some(state)
    }

    pub fn document(&self) -> Option<&Document> {
        self.document.as_ref()
    }

    pub fn playback(&self) -> Playback {
        self.playback
    }

    pub fn is_playing(&self) -> bool {
        self.playback == Playback::Playing
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn wpm(&self) -> u16 {
        self.wpm
    }

    pub fn config(&self) -> &ReaderConfig {
        &self.config
    }
}
