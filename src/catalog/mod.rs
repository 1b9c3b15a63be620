//! The catalog itself: entry schema, persistence, and search.

pub mod entry;
pub mod search;
pub mod store;

pub use entry::{Entry, EntryDraft, MediaFormat, PLACEHOLDER_COVER_URL};
pub use store::{CatalogStore, JsonFileStore, MemoryStore, StoreError, sample_entries};
