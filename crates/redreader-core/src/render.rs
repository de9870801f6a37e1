//! View model handed to renderers on every cursor change.

use crate::text::orp_segments;

/// What a renderer needs to draw the current token.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct RenderFrame<'a> {
    pub token: &'a str,
    pub orp_index: usize,
    /// Zero-based cursor.
    pub position: usize,
    pub total: usize,
    pub wpm: u16,
    pub playing: bool,
}

impl<'a> RenderFrame<'a> {
    /// `(left, anchor, right)` around the ORP character. Renderers right-align
    /// `left` and left-align `right` so the anchor stays fixed on screen.
    pub fn segments(&self) -> (&'a str, &'a str, &'a str) {
        orp_segments(self.token, self.orp_index)
    }

    /// One-based position for "word N / total" labels.
    pub fn display_position(&self) -> usize {
        self.position + 1
    }

    pub fn progress_pct(&self) -> u8 {
        let total = self.total.max(1);
        ((self.display_position().min(total) * 100) / total) as u8
    }
}
