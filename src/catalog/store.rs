//! Entry persistence: a JSON-file library plus an in-memory store for tests.
//!
//! The store owns identity: inserts are handed an [`EntryDraft`] and come
//! back with a stored [`Entry`] carrying a fresh id. Import and the CLI never
//! fabricate ids themselves.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::entry::{Entry, EntryDraft, MediaFormat};

/// Store failure surfaced to callers, row-by-row during import.
#[derive(Debug)]
pub enum StoreError {
    Io(io::Error),
    Serde(serde_json::Error),
    Missing { id: u64 },
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Io(err) => write!(f, "library file error: {err}"),
            StoreError::Serde(err) => write!(f, "library format error: {err}"),
            StoreError::Missing { id } => write!(f, "no entry with id {id}"),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::Io(err) => Some(err),
            StoreError::Serde(err) => Some(err),
            StoreError::Missing { .. } => None,
        }
    }
}

impl From<io::Error> for StoreError {
    fn from(err: io::Error) -> Self {
        StoreError::Io(err)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Serde(err)
    }
}

/// The persistence collaborator. Bulk import only uses [`insert`].
///
/// [`insert`]: CatalogStore::insert
pub trait CatalogStore {
    /// Assign an id, persist the entry, and return the stored form.
    fn insert(&mut self, draft: EntryDraft) -> Result<Entry, StoreError>;
    /// Replace every field of an existing entry, keeping its id.
    fn update(&mut self, id: u64, draft: EntryDraft) -> Result<Entry, StoreError>;
    fn delete(&mut self, id: u64) -> Result<(), StoreError>;
    fn get(&self, id: u64) -> Option<Entry>;
    /// Entries in insert order.
    fn list(&self) -> Vec<Entry>;
}

/// In-memory store. Backs tests and the JSON-file store.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Vec<Entry>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entries(entries: Vec<Entry>) -> Self {
        Self { entries }
    }

    fn next_id(&self) -> u64 {
        self.entries.iter().map(|entry| entry.id).max().unwrap_or(0) + 1
    }

    fn position(&self, id: u64) -> Option<usize> {
        self.entries.iter().position(|entry| entry.id == id)
    }
}

impl CatalogStore for MemoryStore {
    fn insert(&mut self, draft: EntryDraft) -> Result<Entry, StoreError> {
        let entry = draft.into_entry(self.next_id());
        self.entries.push(entry.clone());
        Ok(entry)
    }

    fn update(&mut self, id: u64, draft: EntryDraft) -> Result<Entry, StoreError> {
        let index = self.position(id).ok_or(StoreError::Missing { id })?;
        let entry = draft.into_entry(id);
        self.entries[index] = entry.clone();
        Ok(entry)
    }

    fn delete(&mut self, id: u64) -> Result<(), StoreError> {
        let index = self.position(id).ok_or(StoreError::Missing { id })?;
        self.entries.remove(index);
        Ok(())
    }

    fn get(&self, id: u64) -> Option<Entry> {
        self.position(id).map(|index| self.entries[index].clone())
    }

    fn list(&self) -> Vec<Entry> {
        self.entries.clone()
    }
}

/// JSON-file-backed store. The whole library is held resident and rewritten
/// after every mutation; collections are user-curated and modest.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    inner: MemoryStore,
}

impl JsonFileStore {
    /// Open an existing library, or start empty if the file does not exist.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let entries = match fs::read_to_string(&path) {
            Ok(text) => serde_json::from_str(&text)?,
            Err(err) if err.kind() == io::ErrorKind::NotFound => Vec::new(),
            Err(err) => return Err(err.into()),
        };
        Ok(Self {
            path,
            inner: MemoryStore::with_entries(entries),
        })
    }

    /// Create a new library file. Refuses to clobber an existing one.
    pub fn create(path: impl Into<PathBuf>, entries: Vec<Entry>) -> Result<Self, StoreError> {
        let path = path.into();
        if path.exists() {
            return Err(StoreError::Io(io::Error::new(
                io::ErrorKind::AlreadyExists,
                format!("{} already exists", path.display()),
            )));
        }
        let store = Self {
            path,
            inner: MemoryStore::with_entries(entries),
        };
        store.persist()?;
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self) -> Result<(), StoreError> {
        let text = serde_json::to_string_pretty(&self.inner.entries)?;
        fs::write(&self.path, text)?;
        Ok(())
    }
}

impl CatalogStore for JsonFileStore {
    fn insert(&mut self, draft: EntryDraft) -> Result<Entry, StoreError> {
        let entry = self.inner.insert(draft)?;
        self.persist()?;
        Ok(entry)
    }

    fn update(&mut self, id: u64, draft: EntryDraft) -> Result<Entry, StoreError> {
        let entry = self.inner.update(id, draft)?;
        self.persist()?;
        Ok(entry)
    }

    fn delete(&mut self, id: u64) -> Result<(), StoreError> {
        self.inner.delete(id)?;
        self.persist()
    }

    fn get(&self, id: u64) -> Option<Entry> {
        self.inner.get(id)
    }

    fn list(&self) -> Vec<Entry> {
        self.inner.list()
    }
}

/// The three demonstration entries seeded by `init --samples`.
pub fn sample_entries() -> Vec<Entry> {
    vec![
        Entry {
            id: 1,
            name: "The Matrix".to_string(),
            year: 1999,
            director: "The Wachowskis".to_string(),
            actors: vec![
                "Keanu Reeves".to_string(),
                "Laurence Fishburne".to_string(),
                "Carrie-Anne Moss".to_string(),
            ],
            genre: "Science Fiction".to_string(),
            format: MediaFormat::BluRay,
            cover_url: super::entry::PLACEHOLDER_COVER_URL.to_string(),
        },
        Entry {
            id: 2,
            name: "Inception".to_string(),
            year: 2010,
            director: "Christopher Nolan".to_string(),
            actors: vec![
                "Leonardo DiCaprio".to_string(),
                "Marion Cotillard".to_string(),
                "Tom Hardy".to_string(),
            ],
            genre: "Science Fiction".to_string(),
            format: MediaFormat::Digital,
            cover_url: super::entry::PLACEHOLDER_COVER_URL.to_string(),
        },
        Entry {
            id: 3,
            name: "The Godfather".to_string(),
            year: 1972,
            director: "Francis Ford Coppola".to_string(),
            actors: vec![
                "Marlon Brando".to_string(),
                "Al Pacino".to_string(),
                "James Caan".to_string(),
            ],
            genre: "Crime".to_string(),
            format: MediaFormat::Dvd,
            cover_url: super::entry::PLACEHOLDER_COVER_URL.to_string(),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(name: &str, year: i32) -> EntryDraft {
        EntryDraft {
            name: name.to_string(),
            year,
            ..EntryDraft::default()
        }
        .with_defaults()
    }

    #[test]
    fn insert_assigns_increasing_ids() {
        let mut store = MemoryStore::new();
        let a = store.insert(draft("Alien", 1979)).expect("insert");
        let b = store.insert(draft("Heat", 1995)).expect("insert");
        assert_eq!(a.id, 1);
        assert_eq!(b.id, 2);
    }

    #[test]
    fn ids_are_not_reused_after_delete() {
        let mut store = MemoryStore::new();
        store.insert(draft("Alien", 1979)).expect("insert");
        let b = store.insert(draft("Heat", 1995)).expect("insert");
        store.delete(1).expect("delete");
        let c = store.insert(draft("Ran", 1985)).expect("insert");
        assert_eq!(c.id, b.id + 1);
    }

    #[test]
    fn list_preserves_insert_order() {
        let mut store = MemoryStore::new();
        store.insert(draft("Alien", 1979)).expect("insert");
        store.insert(draft("Heat", 1995)).expect("insert");
        let names: Vec<String> = store.list().into_iter().map(|e| e.name).collect();
        assert_eq!(names, vec!["Alien".to_string(), "Heat".to_string()]);
    }

    #[test]
    fn update_keeps_id_and_replaces_fields() {
        let mut store = MemoryStore::new();
        store.insert(draft("Alien", 1979)).expect("insert");
        let updated = store.update(1, draft("Aliens", 1986)).expect("update");
        assert_eq!(updated.id, 1);
        assert_eq!(store.get(1).expect("get").name, "Aliens");
    }

    #[test]
    fn missing_ids_error() {
        let mut store = MemoryStore::new();
        assert!(matches!(
            store.update(9, draft("x", 1)),
            Err(StoreError::Missing { id: 9 })
        ));
        assert!(matches!(store.delete(9), Err(StoreError::Missing { id: 9 })));
        assert!(store.get(9).is_none());
    }

    #[test]
    fn sample_entries_are_well_formed() {
        let samples = sample_entries();
        assert_eq!(samples.len(), 3);
        for entry in &samples {
            assert!(!entry.name.is_empty());
            assert_ne!(entry.year, 0);
            assert!(!entry.actors.is_empty());
        }
    }
}
