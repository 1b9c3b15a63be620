//! Quote-aware comma splitting for a single data line.
//!
//! Rules:
//! - An unquoted comma separates fields.
//! - `"` toggles quoted mode and is never emitted into the field.
//! - Every other character accumulates into the current field.
//! - At end of line the current buffer is emitted as the final field.
//!
//! There is no `""` escape: a doubled quote toggles quoted mode twice and
//! contributes nothing. An unterminated quote swallows the rest of the line
//! into the final field.

/// Split one data line into trimmed fields.
pub fn split_fields(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for ch in line.chars() {
        if ch == '"' {
            in_quotes = !in_quotes;
        } else if ch == ',' && !in_quotes {
            fields.push(current.trim().to_string());
            current.clear();
        } else {
            current.push(ch);
        }
    }
    fields.push(current.trim().to_string());

    fields
}

/// Remove every literal `"` from a field.
///
/// [`split_fields`] never emits quote characters, so this only matters for
/// the header line (which is split on plain commas) and as a guard for
/// callers feeding pre-split values.
#[inline]
pub fn strip_quotes(field: &str) -> String {
    field.replace('"', "")
}
