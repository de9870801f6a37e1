//! Punctuation- and content-aware dwell time per token.

use crate::text::{
    EM_DASH, ELLIPSIS, is_closer, is_comparator, is_digit, is_footnote_marker, is_opener,
};

/// Additive dwell bonuses in milliseconds.
///
/// Every matching rule contributes; rules are not exclusive, so a token like
/// `1,048).` collects the sentence, numeric and bracket bonuses together.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct PacingConfig {
    pub sentence_pause_ms: u16,
    pub clause_pause_ms: u16,
    pub attached_dash_pause_ms: u16,
    pub standalone_dash_pause_ms: u16,
    pub ellipsis_pause_ms: u16,
    pub comparator_pause_ms: u16,
    pub numeric_pause_ms: u16,
    pub alphanumeric_pause_ms: u16,
    pub bracket_pause_ms: u16,
    pub long_word_pause_ms: u16,
    pub long_word_chars: u16,
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self {
            sentence_pause_ms: 220,
            clause_pause_ms: 120,
            attached_dash_pause_ms: 110,
            standalone_dash_pause_ms: 140,
            ellipsis_pause_ms: 160,
            comparator_pause_ms: 70,
            numeric_pause_ms: 60,
            alphanumeric_pause_ms: 40,
            bracket_pause_ms: 40,
            long_word_pause_ms: 60,
            long_word_chars: 12,
        }
    }
}

impl PacingConfig {
    /// Time `token` stays on screen at `wpm`; never zero.
    pub fn dwell_ms(&self, token: &str, wpm: u16) -> u32 {
        let base = 60_000u32 / wpm.max(1) as u32;
        (base + self.bonus_ms(token)).max(1)
    }

    fn bonus_ms(&self, token: &str) -> u32 {
        let mut bonus = 0u32;
        let mut add = |hit: bool, ms: u16| {
            if hit {
                bonus += ms as u32;
            }
        };

        let unwrapped =
            token.trim_end_matches(|ch: char| is_closer(ch) || is_footnote_marker(ch));
        let ends_sentence = unwrapped.ends_with(['.', '!', '?']);
        let ends_clause = !ends_sentence && unwrapped.ends_with([',', ';', ':']);
        add(ends_sentence, self.sentence_pause_ms);
        add(ends_clause, self.clause_pause_ms);

        let standalone_dash = token.strip_prefix(EM_DASH) == Some("");
        add(
            token.ends_with(EM_DASH) && !standalone_dash,
            self.attached_dash_pause_ms,
        );
        add(standalone_dash, self.standalone_dash_pause_ms);
        add(
            token.ends_with(ELLIPSIS) || token.ends_with("..."),
            self.ellipsis_pause_ms,
        );

        let has_digit = token.chars().any(is_digit);
        let has_letter = token.chars().any(char::is_alphabetic);
        add(token.contains(is_comparator), self.comparator_pause_ms);
        add(
            has_digit && token.contains(['.', ',', '%']),
            self.numeric_pause_ms,
        );
        add(has_digit && has_letter, self.alphanumeric_pause_ms);
        add(
            token.starts_with(is_opener) || token.ends_with(is_closer),
            self.bracket_pause_ms,
        );
        add(
            token.chars().count() >= self.long_word_chars as usize,
            self.long_word_pause_ms,
        );

        bonus
    }
}

/// [`PacingConfig::dwell_ms`] with the default bonus table.
pub fn dwell_ms(token: &str, wpm: u16) -> u32 {
    PacingConfig::default().dwell_ms(token, wpm)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_interval_follows_wpm() {
        assert_eq!(dwell_ms("word", 600), 100);
        assert_eq!(dwell_ms("word", 300), 200);
        assert_eq!(dwell_ms("word", 0), 60_000);
    }

    #[test]
    fn sentence_and_clause_endings() {
        assert_eq!(dwell_ms("word.", 600), 320);
        assert_eq!(dwell_ms("word,", 600), 220);
        assert_eq!(dwell_ms("word;", 600), 220);
        assert_eq!(dwell_ms("word?", 600), 320);
    }

    #[test]
    fn closers_are_stripped_before_checking_endings() {
        // sentence + closing bracket
        assert_eq!(dwell_ms("done.”", 600), 100 + 220 + 40);
        // the superscript marker counts as a digit, but not as a bracket
        assert_eq!(dwell_ms("done.¹", 600), 100 + 220 + 60 + 40);
    }

    #[test]
    fn dashes_and_ellipses() {
        assert_eq!(dwell_ms("—", 600), 100 + 140);
        assert_eq!(dwell_ms("methodology—", 600), 100 + 110 + 60);
        assert_eq!(dwell_ms("Wait…", 600), 100 + 160);
        // `...` also ends with a period, so both bonuses apply.
        assert_eq!(dwell_ms("so...", 600), 100 + 220 + 160);
    }

    #[test]
    fn bonuses_are_summed() {
        // comparator alone
        assert_eq!(dwell_ms("=", 600), 100 + 70);
        // digit + comma, closing bracket
        assert_eq!(dwell_ms("1,048)", 600), 100 + 60 + 40);
        // opener, letter+digit
        assert_eq!(dwell_ms("(n1", 600), 100 + 40 + 40);
        // numeric glue, sentence end
        assert_eq!(dwell_ms("0.05.", 600), 100 + 220 + 60);
        assert_eq!(dwell_ms("internationalization", 600), 100 + 60);
    }

    #[test]
    fn never_zero() {
        assert_eq!(dwell_ms("a", u16::MAX), 1);
    }

    #[test]
    fn custom_table() {
        let config = PacingConfig {
            sentence_pause_ms: 0,
            ..PacingConfig::default()
        };
        assert_eq!(config.dwell_ms("word.", 600), 100);
    }
}
