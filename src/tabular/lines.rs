//! Line splitting & blank-line discarding.

/// Returns true if the line is empty after trimming.
///
/// A lone carriage return left over from CRLF input counts as blank.
#[inline]
pub fn is_blank_line(line: &str) -> bool {
    line.trim().is_empty()
}

/// Split input text on line feeds, keeping only non-blank lines.
///
/// Lines are yielded untrimmed; field-level trimming happens after splitting.
pub fn non_blank_lines(text: &str) -> impl Iterator<Item = &str> {
    text.split('\n').filter(|line| !is_blank_line(line))
}
