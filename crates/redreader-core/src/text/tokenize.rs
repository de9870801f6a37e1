use alloc::{string::String, vec::Vec};

use super::{
    EM_DASH, is_alnum, is_apostrophe_like, is_attachable_prefix, is_closer, is_digit,
    is_footnote_marker, is_hyphen_like, is_opener, is_token_space, is_trailing_punctuation,
    normalize,
};

/// Splits raw text into display tokens.
///
/// The input is normalized first. Tokens never contain whitespace and are
/// never empty; apart from collapsed whitespace no character is dropped.
/// Openers, closers and trailing punctuation stay glued to the word they
/// belong to, numbers keep their separators (`1,048`, `12.7`), and comparison
/// operators become tokens of their own:
///
/// ```
/// use redreader_core::text::tokenize;
///
/// assert_eq!(tokenize("p < 0.05"), ["p", "<", "0.05"]);
/// assert_eq!(tokenize("(n = 1,048)"), ["(n", "=", "1,048)"]);
/// ```
pub fn tokenize(input: &str) -> Vec<String> {
    let text = normalize(input);
    if text.is_empty() {
        return Vec::new();
    }

    let chars: Vec<char> = text.chars().collect();
    let mut scanner = Scanner {
        chars: &chars,
        pos: 0,
    };
    let mut tokens = Vec::new();

    while let Some(token) = scanner.next_token() {
        tokens.push(token);
    }

    tokens
}

/// First `limit` tokens of `input`, for paste previews.
pub fn preview(input: &str, limit: usize) -> Vec<String> {
    let mut tokens = tokenize(input);
    tokens.truncate(limit);
    tokens
}

struct Scanner<'a> {
    chars: &'a [char],
    pos: usize,
}

impl Scanner<'_> {
    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn peek_next(&self) -> Option<char> {
        self.chars.get(self.pos + 1).copied()
    }

    fn take(&mut self, token: &mut String) {
        if let Some(ch) = self.peek() {
            token.push(ch);
            self.pos += 1;
        }
    }

    fn next_token(&mut self) -> Option<String> {
        while self.peek().is_some_and(is_token_space) {
            self.pos += 1;
        }
        self.peek()?;

        let mut token = String::new();

        while self.peek().is_some_and(is_opener) {
            self.take(&mut token);
        }
        let Some(first) = self.peek() else {
            return Some(token);
        };

        let core_start = self.pos;

        // `~12.7%`, `-5`: only when the sign actually leads into a word or number.
        if is_attachable_prefix(first)
            && self
                .peek_next()
                .is_some_and(|next| is_digit(next) || is_alnum(next))
        {
            self.take(&mut token);
        }

        if self.peek() == Some(EM_DASH) {
            self.take(&mut token);
            return Some(token);
        }

        self.scan_core(&mut token);

        if self.pos == core_start && token.is_empty() {
            self.take(&mut token);
            return Some(token);
        }

        if self.peek() == Some(EM_DASH) {
            self.take(&mut token);
        }

        while self.peek().is_some_and(|ch| {
            is_closer(ch) || is_footnote_marker(ch) || is_trailing_punctuation(ch)
        }) {
            self.take(&mut token);
        }

        Some(token)
    }

    fn scan_core(&mut self, token: &mut String) {
        while let Some(ch) = self.peek() {
            if is_token_space(ch) || ch == EM_DASH {
                break;
            }

            if is_alnum(ch) {
                self.take(token);
                continue;
            }

            let prev = token.chars().last();
            let next = self.peek_next();

            let joins = if is_apostrophe_like(ch) || is_hyphen_like(ch) {
                prev.is_some_and(is_alnum) && next.is_some_and(is_alnum)
            } else if ch == ',' || ch == '.' {
                prev.is_some_and(is_digit) && next.is_some_and(is_digit)
            } else {
                // Comparators and any other symbol end the core.
                false
            };

            if !joins {
                break;
            }
            self.take(token);
        }
    }
}
