//! Bulk import pipeline: intake gate, row normalization, per-row reporting.

pub mod fields;
pub mod intake;
pub mod normalize;
pub mod report;
pub mod runner;

pub use intake::{CSV_MEDIA_TYPE, IntakeError, is_csv_media_type, read_import_file};
pub use normalize::normalize;
pub use report::{ImportReport, VISIBLE_ERROR_LIMIT};
pub use runner::{ImportError, run_import};
