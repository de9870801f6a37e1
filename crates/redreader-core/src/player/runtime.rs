impl Player {
    pub fn new(config: ReaderConfig) -> Self {
        let wpm = config.clamp_wpm(config.wpm);

        Self {
            config,
            document: None,
            playback: Playback::Idle,
            cursor: 0,
            wpm,
            accumulated_ms: 0,
            last_tick_ms: None,
            pending_redraw: false,
            events: Deque::new(),
        }
    }

    pub fn play(&mut self) -> bool {
        let has_tokens = self.document.as_ref().is_some_and(|doc| !doc.is_empty());
        if self.playback == Playback::Playing || !has_tokens {
            return false;
        }

        self.playback = Playback::Playing;
        self.accumulated_ms = 0;
        self.last_tick_ms = None;
        self.pending_redraw = true;
        debug!("player: play at {} wpm={}", self.cursor, self.wpm);
        true
    }

    pub fn pause(&mut self) -> bool {
        if self.playback != Playback::Playing {
            return false;
        }

        self.playback = Playback::Paused;
        self.pending_redraw = true;
        debug!("player: pause at {}", self.cursor);
        true
    }

    pub fn toggle(&mut self) -> bool {
        if self.playback == Playback::Playing {
            self.pause()
        } else {
            self.play()
        }
    }

    /// Cancels playback for teardown. The cursor is kept so the final
    /// position can still be flushed.
    pub fn stop(&mut self) {
        self.playback = Playback::Idle;
        self.accumulated_ms = 0;
        self.last_tick_ms = None;
        self.pending_redraw = false;
    }

    /// Advances at most one token per call. Time beyond the current dwell is
    /// carried into the next token, so a backlog after a stalled tick source
    /// is worked off one token per tick.
    pub fn tick(&mut self, now_ms: u64) -> TickResult {
        if self.playback != Playback::Playing {
            return self.take_redraw();
        }
        let Some((dwell_ms, last_index)) = self.current_dwell() else {
            return self.take_redraw();
        };

        let elapsed = self
            .last_tick_ms
            .map_or(0, |last| now_ms.saturating_sub(last));
        self.last_tick_ms = Some(now_ms);
        self.accumulated_ms = self.accumulated_ms.saturating_add(elapsed);

        if self.accumulated_ms < dwell_ms {
            return self.take_redraw();
        }

        self.pending_redraw = false;
        if self.cursor >= last_index {
            self.accumulated_ms = 0;
            self.playback = Playback::Paused;
            info!("player: reached last token {}", self.cursor);
            return TickResult::RenderRequested;
        }

        self.accumulated_ms -= dwell_ms;
        self.cursor += 1;
        self.emit(ChangeKind::Cursor);
        TickResult::RenderRequested
    }

    /// Changes speed without touching the partially elapsed dwell.
    pub fn set_speed(&mut self, wpm: u16) -> bool {
        let next = self.config.clamp_wpm(wpm);
        if next == self.wpm {
            return false;
        }

        self.wpm = next;
        self.pending_redraw = true;
        self.emit(ChangeKind::Speed);
        true
    }

    pub fn adjust_speed(&mut self, increase: bool) -> bool {
        let next = if increase {
            self.wpm.saturating_add(self.config.wpm_step)
        } else {
            self.wpm.saturating_sub(self.config.wpm_step)
        };
        self.set_speed(next)
    }

    pub fn apply_preset(&mut self, slot: usize) -> bool {
        match self.config.wpm_presets.get(slot) {
            Some(&wpm) => self.set_speed(wpm),
            None => false,
        }
    }

    fn current_dwell(&self) -> Option<(u64, usize)> {
        let document = self.document.as_ref()?;
        let token = document.token(self.cursor)?;
        let dwell = self.config.pacing.dwell_ms(token, self.wpm) as u64;
        Some((dwell, document.last_index()))
    }

    fn take_redraw(&mut self) -> TickResult {
        if self.pending_redraw {
            self.pending_redraw = false;
            TickResult::RenderRequested
        } else {
            TickResult::NoRender
        }
    }
}
