//! Input gating before any parsing runs: declared type and readability.
//!
//! The upload surface checks the declared media type; the CLI's proxy for a
//! declared type is the file extension. Either gate failing means the parser
//! is never invoked.

use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

/// The only accepted declared media type for uploads.
pub const CSV_MEDIA_TYPE: &str = "text/csv";

/// Strict equality against [`CSV_MEDIA_TYPE`]; parameters like
/// `text/csv; charset=utf-8` do not pass.
#[inline]
pub fn is_csv_media_type(declared: &str) -> bool {
    declared == CSV_MEDIA_TYPE
}

/// Pre-parse failure: the import never started.
#[derive(Debug)]
pub enum IntakeError {
    /// The path does not carry a `.csv` extension.
    NotCsv { path: String },
    /// The file could not be read as text.
    Unreadable { path: String, source: io::Error },
}

impl fmt::Display for IntakeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IntakeError::NotCsv { path } => {
                write!(f, "{path}: not a CSV file (expected a .csv extension)")
            }
            IntakeError::Unreadable { path, source } => {
                write!(f, "{path}: could not be read: {source}")
            }
        }
    }
}

impl std::error::Error for IntakeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            IntakeError::NotCsv { .. } => None,
            IntakeError::Unreadable { source, .. } => Some(source),
        }
    }
}

/// Gate and read an import file into memory.
///
/// The extension check is case-insensitive (`.CSV` exports exist); the read
/// requires valid UTF-8.
pub fn read_import_file(path: &Path) -> Result<String, IntakeError> {
    let display = path.display().to_string();

    let is_csv = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
    if !is_csv {
        return Err(IntakeError::NotCsv { path: display });
    }

    fs::read_to_string(path).map_err(|source| IntakeError::Unreadable {
        path: display,
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn media_type_match_is_exact() {
        assert!(is_csv_media_type("text/csv"));
        assert!(!is_csv_media_type("text/csv; charset=utf-8"));
        assert!(!is_csv_media_type("application/vnd.ms-excel"));
        assert!(!is_csv_media_type("TEXT/CSV"));
        assert!(!is_csv_media_type(""));
    }

    #[test]
    fn extension_gate_rejects_before_reading() {
        let err = read_import_file(Path::new("collection.txt")).expect_err("gate");
        assert!(matches!(err, IntakeError::NotCsv { .. }));
        let err = read_import_file(Path::new("collection")).expect_err("gate");
        assert!(matches!(err, IntakeError::NotCsv { .. }));
    }

    #[test]
    fn extension_gate_is_case_insensitive() {
        // Passes the gate, then fails on the missing file.
        let err = read_import_file(Path::new("missing-but-named.CSV")).expect_err("read");
        assert!(matches!(err, IntakeError::Unreadable { .. }));
    }
}
