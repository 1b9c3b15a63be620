//! Import orchestration: parse, then normalize and insert row by row,
//! accumulating one report per run.

use std::fmt;

use crate::catalog::store::CatalogStore;
use crate::tabular::{ParseError, parse};

use super::normalize::normalize;
use super::report::ImportReport;

/// Whole-import failure: nothing was processed and no report exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportError {
    /// No header-and-data to work with, or every data line was malformed.
    NoData,
}

impl fmt::Display for ImportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImportError::NoData => f.write_str("No valid data found in CSV file"),
        }
    }
}

impl std::error::Error for ImportError {}

/// Run one bulk import over already-read text.
///
/// Row-level failures never abort the run: a rejected or uninsertable row
/// becomes one error entry and processing continues. Rows are handed to the
/// store strictly in input order. Error messages carry the 1-based display
/// row, offset by one for the header line.
pub fn run_import<S: CatalogStore>(text: &str, store: &mut S) -> Result<ImportReport, ImportError> {
    let table = match parse(text) {
        Ok(table) => table,
        Err(ParseError::Empty) => return Err(ImportError::NoData),
    };

    for dropped in &table.dropped {
        tracing::warn!(
            line = dropped.line_number,
            fields = dropped.fields,
            expected = dropped.expected,
            "skipping line with mismatched field count"
        );
    }

    if table.rows.is_empty() {
        return Err(ImportError::NoData);
    }

    let mut report = ImportReport::new();
    for (index, row) in table.rows.iter().enumerate() {
        let display_row = index + 2;
        let Some(draft) = normalize(row) else {
            report.record_failure(format!(
                "Row {display_row}: Missing required fields (name, year)"
            ));
            continue;
        };

        let name = draft.name.clone();
        match store.insert(draft) {
            Ok(entry) => {
                tracing::debug!(id = entry.id, name = %entry.name, "imported entry");
                report.record_success();
            }
            Err(err) => {
                tracing::debug!(error = %err, "insert failed");
                report.record_failure(format!("Row {display_row}: Failed to add movie \"{name}\""));
            }
        }
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::entry::{Entry, EntryDraft};
    use crate::catalog::store::{MemoryStore, StoreError};

    #[test]
    fn success_and_failure_counts_cover_every_row() {
        let text = "Title,Year\nAlien,1979\n,1980\nHeat,1995\n";
        let mut store = MemoryStore::new();
        let report = run_import(text, &mut store).expect("report");
        assert_eq!(report.successful, 2);
        assert_eq!(report.failed, 1);
        assert_eq!(report.total(), 3);
        assert_eq!(store.list().len(), 2);
    }

    #[test]
    fn error_rows_are_numbered_from_the_file_top() {
        let text = "Title,Year\nAlien,1979\n,1980\n";
        let mut store = MemoryStore::new();
        let report = run_import(text, &mut store).expect("report");
        assert_eq!(
            report.errors,
            vec!["Row 3: Missing required fields (name, year)".to_string()]
        );
    }

    #[test]
    fn header_only_input_is_a_whole_import_failure() {
        let mut store = MemoryStore::new();
        assert_eq!(run_import("Title,Year\n", &mut store), Err(ImportError::NoData));
        assert_eq!(run_import("", &mut store), Err(ImportError::NoData));
    }

    #[test]
    fn all_lines_malformed_is_a_whole_import_failure() {
        let mut store = MemoryStore::new();
        let text = "a,b,c,d,e,f\n1,2,3,4,5\n";
        assert_eq!(run_import(text, &mut store), Err(ImportError::NoData));
        assert!(store.list().is_empty());
    }

    #[test]
    fn dropped_lines_are_not_counted() {
        let text = "Title,Year\nAlien,1979\nlonely\nHeat,1995\n";
        let mut store = MemoryStore::new();
        let report = run_import(text, &mut store).expect("report");
        assert_eq!(report.total(), 2);
        assert!(report.errors.is_empty());
    }

    #[test]
    fn reimport_produces_an_identical_independent_report() {
        let text = "Title,Year\nAlien,1979\n,1980\n";
        let mut store = MemoryStore::new();
        let first = run_import(text, &mut store).expect("report");
        let second = run_import(text, &mut store).expect("report");
        assert_eq!(first, second);
        // No dedup across runs: the catalog now holds the entry twice.
        assert_eq!(store.list().len(), 2);
    }

    struct RefusingStore;

    impl CatalogStore for RefusingStore {
        fn insert(&mut self, _draft: EntryDraft) -> Result<Entry, StoreError> {
            Err(StoreError::Io(std::io::Error::other("disk full")))
        }
        fn update(&mut self, id: u64, _draft: EntryDraft) -> Result<Entry, StoreError> {
            Err(StoreError::Missing { id })
        }
        fn delete(&mut self, id: u64) -> Result<(), StoreError> {
            Err(StoreError::Missing { id })
        }
        fn get(&self, _id: u64) -> Option<Entry> {
            None
        }
        fn list(&self) -> Vec<Entry> {
            Vec::new()
        }
    }

    #[test]
    fn insert_failure_is_a_row_failure_not_an_abort() {
        let text = "Title,Year\nAlien,1979\nHeat,1995\n";
        let report = run_import(text, &mut RefusingStore).expect("report");
        assert_eq!(report.successful, 0);
        assert_eq!(report.failed, 2);
        assert_eq!(
            report.errors,
            vec![
                "Row 2: Failed to add movie \"Alien\"".to_string(),
                "Row 3: Failed to add movie \"Heat\"".to_string(),
            ]
        );
    }
}
