use unicode_normalization::char::is_combining_mark;

/// Optimal recognition point for `token`, as a char index.
///
/// Leading and trailing characters that are neither letters nor digits are
/// ignored when measuring the word, but callers apply the result to the full
/// token. For heavily punctuated tokens such as `(n,048)` the anchor therefore
/// lands one character early.
pub fn orp_index(token: &str) -> usize {
    let core = token.trim_matches(|ch: char| !is_letter_or_digit(ch));

    match core.chars().count() {
        0..=2 => 0,
        3..=5 => 1,
        6..=9 => 2,
        10..=13 => 3,
        _ => 4,
    }
}

/// Splits `token` around the char at `orp_index` into `(left, anchor, right)`.
///
/// An index past the end yields an empty anchor and right side.
pub fn orp_segments(token: &str, orp_index: usize) -> (&str, &str, &str) {
    let mut indices = token.char_indices().skip(orp_index);

    let Some((start, _)) = indices.next() else {
        return (token, "", "");
    };
    let end = indices.next().map_or(token.len(), |(idx, _)| idx);

    (&token[..start], &token[start..end], &token[end..])
}

/// Letter (\p{L}) or number. `is_alphabetic` also admits the vowel signs of
/// Indic scripts, which are marks.
fn is_letter_or_digit(ch: char) -> bool {
    (ch.is_alphabetic() && !is_combining_mark(ch)) || ch.is_numeric()
}
