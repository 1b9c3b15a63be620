//! Catalog entry schema.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Cover image applied when a row or form supplies none.
pub const PLACEHOLDER_COVER_URL: &str =
    "https://images.unsplash.com/photo-1526374965328-7f61d4dc18c5?w=400&h=600&fit=crop";

/// Actor list applied when a row resolves no actors at all.
pub const UNKNOWN_ACTOR: &str = "Unknown";

/// Genre applied when a row resolves no genre.
pub const UNKNOWN_GENRE: &str = "Unknown";

/// Edition of a catalog entry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MediaFormat {
    #[default]
    Digital,
    #[serde(rename = "DVD")]
    Dvd,
    #[serde(rename = "Blu-ray")]
    BluRay,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnknownFormat;

impl MediaFormat {
    pub const ALL: [MediaFormat; 3] = [MediaFormat::Digital, MediaFormat::Dvd, MediaFormat::BluRay];

    #[inline]
    pub const fn as_str(self) -> &'static str {
        match self {
            MediaFormat::Digital => "Digital",
            MediaFormat::Dvd => "DVD",
            MediaFormat::BluRay => "Blu-ray",
        }
    }

    /// Exact, case-sensitive match; anything else coerces to `Digital`.
    ///
    /// `"dvd"` is not `DVD`, and `"vhs"` is not a format at all; both land
    /// on the default rather than rejecting the row.
    pub fn parse_or_default(raw: &str) -> MediaFormat {
        MediaFormat::from_str(raw).unwrap_or_default()
    }
}

impl fmt::Display for MediaFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for UnknownFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("format must be one of: Digital, DVD, Blu-ray")
    }
}

impl std::error::Error for UnknownFormat {}

impl FromStr for MediaFormat {
    type Err = UnknownFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Digital" => Ok(MediaFormat::Digital),
            "DVD" => Ok(MediaFormat::Dvd),
            "Blu-ray" => Ok(MediaFormat::BluRay),
            _ => Err(UnknownFormat),
        }
    }
}

/// One stored catalog record. Identity is assigned by the store on insert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    pub id: u64,
    pub name: String,
    pub year: i32,
    pub director: String,
    pub actors: Vec<String>,
    pub genre: String,
    pub format: MediaFormat,
    pub cover_url: String,
}

/// An entry without identity: what the normalizer, forms, and the metadata
/// lookup produce, and what the store accepts for insert.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryDraft {
    pub name: String,
    pub year: i32,
    #[serde(default)]
    pub director: String,
    #[serde(default)]
    pub actors: Vec<String>,
    #[serde(default)]
    pub genre: String,
    #[serde(default)]
    pub format: MediaFormat,
    #[serde(default)]
    pub cover_url: String,
}

impl EntryDraft {
    /// Fill the optional fields that may never stay empty in a stored entry:
    /// actors, genre, and cover URL. Name and year are the mandatory gate and
    /// are not touched here.
    pub fn with_defaults(mut self) -> EntryDraft {
        if self.actors.is_empty() {
            self.actors = vec![UNKNOWN_ACTOR.to_string()];
        }
        if self.genre.is_empty() {
            self.genre = UNKNOWN_GENRE.to_string();
        }
        if self.cover_url.is_empty() {
            self.cover_url = PLACEHOLDER_COVER_URL.to_string();
        }
        self
    }

    pub fn into_entry(self, id: u64) -> Entry {
        Entry {
            id,
            name: self.name,
            year: self.year,
            director: self.director,
            actors: self.actors,
            genre: self.genre,
            format: self.format,
            cover_url: self.cover_url,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_parse_is_case_sensitive() {
        assert_eq!(MediaFormat::parse_or_default("DVD"), MediaFormat::Dvd);
        assert_eq!(MediaFormat::parse_or_default("dvd"), MediaFormat::Digital);
        assert_eq!(MediaFormat::parse_or_default("Blu-ray"), MediaFormat::BluRay);
        assert_eq!(MediaFormat::parse_or_default("vhs"), MediaFormat::Digital);
        assert_eq!(MediaFormat::parse_or_default(""), MediaFormat::Digital);
    }

    #[test]
    fn format_round_trips_through_str() {
        for format in MediaFormat::ALL {
            assert_eq!(MediaFormat::from_str(format.as_str()), Ok(format));
        }
        assert_eq!(MediaFormat::from_str("VHS"), Err(UnknownFormat));
    }

    #[test]
    fn format_serde_uses_display_names() {
        let json = serde_json::to_string(&MediaFormat::BluRay).expect("serialize");
        assert_eq!(json, "\"Blu-ray\"");
        let parsed: MediaFormat = serde_json::from_str("\"DVD\"").expect("deserialize");
        assert_eq!(parsed, MediaFormat::Dvd);
    }

    #[test]
    fn defaults_fill_only_empty_fields() {
        let draft = EntryDraft {
            name: "Alien".to_string(),
            year: 1979,
            genre: "Horror".to_string(),
            ..EntryDraft::default()
        }
        .with_defaults();
        assert_eq!(draft.actors, vec![UNKNOWN_ACTOR.to_string()]);
        assert_eq!(draft.genre, "Horror");
        assert_eq!(draft.cover_url, PLACEHOLDER_COVER_URL);
    }

    #[test]
    fn entry_serde_uses_camel_case_keys() {
        let entry = EntryDraft {
            name: "Alien".to_string(),
            year: 1979,
            ..EntryDraft::default()
        }
        .with_defaults()
        .into_entry(7);
        let value = serde_json::to_value(&entry).expect("serialize");
        assert_eq!(value["coverUrl"], PLACEHOLDER_COVER_URL);
        assert_eq!(value["id"], 7);
        assert_eq!(value["format"], "Digital");
    }
}
