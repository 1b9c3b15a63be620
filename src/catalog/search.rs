//! Search and filtering over the catalog.
//!
//! A filter is the conjunction of three optional facets: a free-text query
//! matched case-insensitively against name, director, and actors; a genre
//! multi-select; and a decade multi-select using `"1990s"`-style labels.

use super::entry::Entry;

/// Filter facets. Empty facets match everything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchFilter {
    pub query: String,
    pub genres: Vec<String>,
    pub decades: Vec<String>,
}

impl SearchFilter {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Self::default()
        }
    }

    pub fn matches(&self, entry: &Entry) -> bool {
        self.matches_query(entry) && self.matches_genre(entry) && self.matches_decade(entry)
    }

    fn matches_query(&self, entry: &Entry) -> bool {
        if self.query.is_empty() {
            return true;
        }
        let needle = self.query.to_lowercase();
        entry.name.to_lowercase().contains(&needle)
            || entry.director.to_lowercase().contains(&needle)
            || entry
                .actors
                .iter()
                .any(|actor| actor.to_lowercase().contains(&needle))
    }

    fn matches_genre(&self, entry: &Entry) -> bool {
        self.genres.is_empty() || self.genres.iter().any(|genre| *genre == entry.genre)
    }

    fn matches_decade(&self, entry: &Entry) -> bool {
        self.decades.is_empty() || self.decades.contains(&decade_label(entry.year))
    }
}

/// Entries matching the filter, in catalog order.
pub fn filter_entries<'a>(entries: &'a [Entry], filter: &SearchFilter) -> Vec<&'a Entry> {
    entries.iter().filter(|entry| filter.matches(entry)).collect()
}

/// `"1990s"`-style label for a year, flooring toward negative infinity so
/// every year lands in a decade.
pub fn decade_label(year: i32) -> String {
    format!("{}s", year.div_euclid(10) * 10)
}

/// Distinct genres present in the catalog, sorted.
pub fn available_genres(entries: &[Entry]) -> Vec<String> {
    let mut genres: Vec<String> = entries.iter().map(|entry| entry.genre.clone()).collect();
    genres.sort();
    genres.dedup();
    genres
}

/// Distinct decade labels present in the catalog, newest first.
pub fn available_decades(entries: &[Entry]) -> Vec<String> {
    let mut decades: Vec<String> = entries
        .iter()
        .map(|entry| decade_label(entry.year))
        .collect();
    decades.sort();
    decades.dedup();
    decades.reverse();
    decades
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::entry::{EntryDraft, MediaFormat};

    fn entry(id: u64, name: &str, year: i32, director: &str, genre: &str) -> Entry {
        EntryDraft {
            name: name.to_string(),
            year,
            director: director.to_string(),
            actors: vec!["Some Actor".to_string()],
            genre: genre.to_string(),
            format: MediaFormat::Digital,
            cover_url: String::new(),
        }
        .with_defaults()
        .into_entry(id)
    }

    fn catalog() -> Vec<Entry> {
        vec![
            entry(1, "Alien", 1979, "Ridley Scott", "Horror"),
            entry(2, "Heat", 1995, "Michael Mann", "Crime"),
            entry(3, "Ran", 1985, "Akira Kurosawa", "Drama"),
        ]
    }

    #[test]
    fn empty_filter_matches_all() {
        let entries = catalog();
        assert_eq!(filter_entries(&entries, &SearchFilter::default()).len(), 3);
    }

    #[test]
    fn query_matches_name_case_insensitively() {
        let entries = catalog();
        let hits = filter_entries(&entries, &SearchFilter::new("aLiEn"));
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "Alien");
    }

    #[test]
    fn query_matches_director_and_actors() {
        let entries = catalog();
        assert_eq!(filter_entries(&entries, &SearchFilter::new("kurosawa")).len(), 1);
        assert_eq!(filter_entries(&entries, &SearchFilter::new("some actor")).len(), 3);
    }

    #[test]
    fn genre_facet_is_a_disjunction() {
        let entries = catalog();
        let filter = SearchFilter {
            genres: vec!["Horror".to_string(), "Crime".to_string()],
            ..SearchFilter::default()
        };
        assert_eq!(filter_entries(&entries, &filter).len(), 2);
    }

    #[test]
    fn facets_conjunct() {
        let entries = catalog();
        let filter = SearchFilter {
            query: "a".to_string(),
            genres: vec!["Horror".to_string()],
            decades: vec!["1990s".to_string()],
            ..SearchFilter::default()
        };
        // "Alien" matches query and genre but is a 1970s film.
        assert!(filter_entries(&entries, &filter).is_empty());
    }

    #[test]
    fn decade_labels_floor() {
        assert_eq!(decade_label(1995), "1990s");
        assert_eq!(decade_label(1990), "1990s");
        assert_eq!(decade_label(2001), "2000s");
    }

    #[test]
    fn available_facets_dedup_and_sort() {
        let mut entries = catalog();
        entries.push(entry(4, "The Thing", 1982, "John Carpenter", "Horror"));
        assert_eq!(
            available_genres(&entries),
            vec!["Crime".to_string(), "Drama".to_string(), "Horror".to_string()]
        );
        assert_eq!(
            available_decades(&entries),
            vec!["1990s".to_string(), "1980s".to_string(), "1970s".to_string()]
        );
    }
}
