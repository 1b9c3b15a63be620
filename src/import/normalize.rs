//! Row → entry-draft mapping: synonym resolution, defaults, and the
//! mandatory-field gate.

use crate::catalog::entry::{EntryDraft, MediaFormat};
use crate::tabular::RawRow;

use super::fields::{
    ACTOR_KEYS, COVER_KEYS, DIRECTOR_KEYS, FORMAT_KEYS, GENRE_KEYS, NAME_KEYS, YEAR_KEYS, resolve,
    split_actors,
};

/// Map one raw row into an entry draft, or `None` when the row is missing
/// its mandatory fields.
///
/// The gate is exactly: resolved name empty, or resolved year zero. Every
/// other field defaults and never rejects. A year that fails to parse as an
/// integer resolves to zero and therefore rejects.
pub fn normalize(row: &RawRow) -> Option<EntryDraft> {
    let name = resolve(row, &NAME_KEYS);
    let year = resolve(row, &YEAR_KEYS).parse::<i32>().unwrap_or(0);

    if name.is_empty() || year == 0 {
        return None;
    }

    Some(
        EntryDraft {
            name: name.to_string(),
            year,
            director: resolve(row, &DIRECTOR_KEYS).to_string(),
            actors: split_actors(resolve(row, &ACTOR_KEYS)),
            genre: resolve(row, &GENRE_KEYS).to_string(),
            format: MediaFormat::parse_or_default(resolve(row, &FORMAT_KEYS)),
            cover_url: resolve(row, &COVER_KEYS).to_string(),
        }
        .with_defaults(),
    )
}
