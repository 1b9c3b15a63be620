//! Declarative header-synonym tables for row normalization.
//!
//! Each target field carries an ordered candidate-key list; resolution walks
//! the list and takes the first non-empty value. Empty values are skipped so
//! a blank `name` column does not shadow a populated `title`.

use crate::tabular::RawRow;

pub const NAME_KEYS: [&str; 4] = ["name", "title", "Name", "Title"];
pub const YEAR_KEYS: [&str; 2] = ["year", "Year"];
pub const DIRECTOR_KEYS: [&str; 2] = ["director", "Director"];
pub const GENRE_KEYS: [&str; 2] = ["genre", "Genre"];
pub const FORMAT_KEYS: [&str; 2] = ["format", "Format"];
pub const ACTOR_KEYS: [&str; 4] = ["actors", "Actors", "mainActors", "Main Actors"];
pub const COVER_KEYS: [&str; 4] = ["coverUrl", "poster", "Poster", "image"];

/// First non-empty value under any candidate key, in list order; empty
/// string when no candidate resolves.
pub fn resolve<'a>(row: &'a RawRow, keys: &[&str]) -> &'a str {
    keys.iter()
        .filter_map(|key| row.get(*key))
        .map(String::as_str)
        .find(|value| !value.is_empty())
        .unwrap_or("")
}

/// Split an actors field on comma or pipe, trimming tokens and discarding
/// empty ones.
pub fn split_actors(raw: &str) -> Vec<String> {
    raw.split([',', '|'])
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}
