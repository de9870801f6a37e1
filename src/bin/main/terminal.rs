use std::io::{self, Write};

use redreader_core::render::RenderFrame;

/// Draws frames with the anchor character pinned to a fixed column.
pub(super) struct TerminalRenderer<W: Write> {
    out: W,
    anchor_column: usize,
    inline: bool,
}

impl<W: Write> TerminalRenderer<W> {
    /// `inline` redraws a single status line; otherwise each frame gets its
    /// own line, which suits logs and pipes.
    pub(super) fn new(out: W, anchor_column: usize, inline: bool) -> Self {
        Self {
            out,
            anchor_column,
            inline,
        }
    }

    pub(super) fn draw(&mut self, frame: &RenderFrame<'_>) -> io::Result<()> {
        let line = format_frame(frame, self.anchor_column);
        if self.inline {
            write!(self.out, "\r{line}\x1b[K")?;
        } else {
            writeln!(self.out, "{line}")?;
        }
        self.out.flush()
    }

    pub(super) fn finish(&mut self) -> io::Result<()> {
        if self.inline {
            writeln!(self.out)?;
        }
        self.out.flush()
    }
}

pub(super) fn format_frame(frame: &RenderFrame<'_>, anchor_column: usize) -> String {
    let (left, anchor, right) = frame.segments();
    let pad = anchor_column.saturating_sub(left.chars().count());
    let state = if frame.playing { ">" } else { "||" };

    format!(
        "{:pad$}{left}[{anchor}]{right}   {state} {}/{} {}% {} wpm",
        "",
        frame.display_position(),
        frame.total,
        frame.progress_pct(),
        frame.wpm,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(token: &str, orp_index: usize) -> RenderFrame<'_> {
        RenderFrame {
            token,
            orp_index,
            position: 1,
            total: 4,
            wpm: 600,
            playing: true,
        }
    }

    #[test]
    fn anchor_lands_on_fixed_column() {
        let short = format_frame(&frame("a", 0), 6);
        let long = format_frame(&frame("reading", 2), 6);

        assert_eq!(short.find('['), Some(6));
        assert_eq!(long.find('['), Some(6));
        assert!(long.starts_with("    re[a]ding"));
    }

    #[test]
    fn long_left_side_is_not_truncated() {
        let line = format_frame(&frame("extraordinarily", 4), 2);
        assert!(line.starts_with("extr[a]ordinarily"));
    }

    #[test]
    fn status_shows_progress_and_speed() {
        let line = format_frame(&frame("word", 1), 0);
        assert!(line.ends_with("> 2/4 50% 600 wpm"));
    }

    #[test]
    fn line_mode_writes_one_line_per_frame() {
        let mut renderer = TerminalRenderer::new(Vec::new(), 0, false);
        renderer.draw(&frame("one", 1)).unwrap();
        renderer.draw(&frame("two", 1)).unwrap();
        renderer.finish().unwrap();

        let text = String::from_utf8(renderer.out).unwrap();
        assert_eq!(text.lines().count(), 2);
        assert!(text.starts_with("o[n]e"));
    }
}
