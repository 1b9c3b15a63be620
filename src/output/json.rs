//! JSON output schema assembly.

use serde::Serialize;

use crate::catalog::entry::Entry;
use crate::import::report::ImportReport;

pub const SCHEMA_VERSION: &str = "kino.v1";

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JsonOutcome {
    Complete,
    Partial,
    Refusal,
}

/// Import result. Unlike the human surface, the error list is not truncated.
#[derive(Debug, Clone, Serialize)]
pub struct JsonImport {
    pub version: &'static str,
    pub outcome: JsonOutcome,
    pub file: String,
    pub successful: u64,
    pub failed: u64,
    pub errors: Vec<String>,
}

impl JsonImport {
    pub fn from_report(file: impl Into<String>, report: &ImportReport) -> Self {
        Self {
            version: SCHEMA_VERSION,
            outcome: if report.failed == 0 {
                JsonOutcome::Complete
            } else {
                JsonOutcome::Partial
            },
            file: file.into(),
            successful: report.successful,
            failed: report.failed,
            errors: report.errors.clone(),
        }
    }
}

/// Listing result for `list` and `search`.
#[derive(Debug, Clone, Serialize)]
pub struct JsonEntries {
    pub version: &'static str,
    pub count: u64,
    pub entries: Vec<Entry>,
}

impl JsonEntries {
    pub fn new(entries: Vec<Entry>) -> Self {
        Self {
            version: SCHEMA_VERSION,
            count: entries.len() as u64,
            entries,
        }
    }
}

/// Whole-command refusal.
#[derive(Debug, Clone, Serialize)]
pub struct JsonRefusal {
    pub version: &'static str,
    pub outcome: JsonOutcome,
    pub message: String,
}

impl JsonRefusal {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            version: SCHEMA_VERSION,
            outcome: JsonOutcome::Refusal,
            message: message.into(),
        }
    }
}

pub fn render_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| "{}".to_string())
}
