use alloc::string::String;

use unicode_normalization::UnicodeNormalization;

/// Canonical-composes `input` (NFC) and collapses every whitespace run,
/// including no-break and thin spaces, into a single ASCII space. Leading and
/// trailing whitespace is dropped.
///
/// NFKC is deliberately not used: it would rewrite glyphs such as `²` or `µ`
/// that carry meaning in scientific text.
pub fn normalize(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut pending_space = false;

    for ch in input.nfc() {
        if is_space_variant(ch) {
            pending_space = true;
            continue;
        }

        if pending_space && !out.is_empty() {
            out.push(' ');
        }
        pending_space = false;
        out.push(ch);
    }

    out
}

fn is_space_variant(ch: char) -> bool {
    // U+00A0, U+2009 and U+202F are covered by `is_whitespace`; BOM is not.
    ch.is_whitespace() || ch == '\u{FEFF}'
}
