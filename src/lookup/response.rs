//! OMDb payload deserialization and mapping into the catalog shape.

use serde::Deserialize;

use crate::catalog::entry::EntryDraft;

use super::LookupOutcome;

/// At most this many actors are carried over from a lookup result.
pub const MAX_ACTORS: usize = 3;

/// The subset of the OMDb response body the mapping reads.
///
/// Every field defaults so a sparse or malformed body still deserializes;
/// the mapping decides what a usable result is.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OmdbPayload {
    #[serde(rename = "Title", default)]
    pub title: String,
    #[serde(rename = "Year", default)]
    pub year: String,
    #[serde(rename = "Director", default)]
    pub director: String,
    #[serde(rename = "Actors", default)]
    pub actors: String,
    #[serde(rename = "Genre", default)]
    pub genre: String,
    #[serde(rename = "Poster", default)]
    pub poster: String,
    #[serde(rename = "Response", default)]
    pub response: String,
    #[serde(rename = "Error", default)]
    pub error: Option<String>,
}

/// Map a service payload into a lookup outcome.
///
/// The service reports misses in-band with `Response: "False"`. A hit keeps
/// the first listed genre, at most [`MAX_ACTORS`] actors, and treats an
/// `N/A` poster as absent; the draft then runs through the standard
/// defaulting so it is insertable as-is.
pub fn map_payload(payload: OmdbPayload) -> LookupOutcome {
    if payload.response == "False" {
        return LookupOutcome::NotFound {
            reason: payload.error.or_else(|| Some("Movie not found".to_string())),
        };
    }

    // Year values like "2010" or a "2010-2015" series range: keep the
    // leading digits.
    let year = payload
        .year
        .chars()
        .take_while(char::is_ascii_digit)
        .collect::<String>()
        .parse::<i32>()
        .unwrap_or(0);

    let actors: Vec<String> = payload
        .actors
        .split(", ")
        .filter(|token| !token.is_empty())
        .take(MAX_ACTORS)
        .map(str::to_string)
        .collect();

    let genre = payload
        .genre
        .split(", ")
        .next()
        .unwrap_or("")
        .to_string();

    let cover_url = if payload.poster == "N/A" {
        String::new()
    } else {
        payload.poster
    };

    LookupOutcome::Found(
        EntryDraft {
            name: payload.title,
            year,
            director: payload.director,
            actors,
            genre,
            cover_url,
            ..EntryDraft::default()
        }
        .with_defaults(),
    )
}
