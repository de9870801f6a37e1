//! Unicode text normalization, display tokenization and ORP anchoring.

mod normalize;
mod orp;
mod tokenize;

pub use normalize::normalize;
pub use orp::{orp_index, orp_segments};
pub use tokenize::{preview, tokenize};

pub(crate) const EM_DASH: char = '—';
pub(crate) const ELLIPSIS: char = '…';

pub(crate) fn is_token_space(ch: char) -> bool {
    matches!(ch, ' ' | '\n' | '\t' | '\r')
}

/// Letter, number or combining mark.
pub(crate) fn is_alnum(ch: char) -> bool {
    ch.is_alphabetic() || ch.is_numeric() || unicode_normalization::char::is_combining_mark(ch)
}

pub(crate) fn is_digit(ch: char) -> bool {
    ch.is_numeric()
}

pub(crate) fn is_opener(ch: char) -> bool {
    matches!(ch, '(' | '[' | '{' | '<' | '“' | '‘' | '"' | '\'')
}

pub(crate) fn is_closer(ch: char) -> bool {
    matches!(ch, ')' | ']' | '}' | '>' | '”' | '’' | '"' | '\'')
}

pub(crate) fn is_footnote_marker(ch: char) -> bool {
    matches!(
        ch,
        '¹' | '²' | '³' | '⁴' | '⁵' | '⁶' | '⁷' | '⁸' | '⁹' | '⁰'
    )
}

pub(crate) fn is_hyphen_like(ch: char) -> bool {
    matches!(ch, '-' | '\u{2011}' | '–')
}

pub(crate) fn is_apostrophe_like(ch: char) -> bool {
    matches!(ch, '\'' | '’')
}

pub(crate) fn is_attachable_prefix(ch: char) -> bool {
    matches!(ch, '~' | '+' | '-' | '±')
}

pub(crate) fn is_trailing_punctuation(ch: char) -> bool {
    matches!(ch, '.' | '!' | '?' | ';' | ',' | ':' | '%' | ELLIPSIS)
}

pub(crate) fn is_comparator(ch: char) -> bool {
    matches!(ch, '<' | '>' | '=')
}
