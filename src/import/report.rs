//! Import report accumulation and its presentation limit.

use serde::Serialize;

/// How many error lines the human surface shows before summarizing.
pub const VISIBLE_ERROR_LIMIT: usize = 5;

/// Summary of one bulk-import run. `successful + failed` equals the number
/// of rows the parser yielded; lines the parser dropped are not counted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImportReport {
    pub successful: u64,
    pub failed: u64,
    /// One message per failed row, in row order. Unbounded; presentation
    /// truncates, the report does not.
    pub errors: Vec<String>,
}

impl ImportReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_success(&mut self) {
        self.successful += 1;
    }

    pub fn record_failure(&mut self, message: String) {
        self.failed += 1;
        self.errors.push(message);
    }

    /// Rows processed in total.
    pub fn total(&self) -> u64 {
        self.successful + self.failed
    }

    /// The first [`VISIBLE_ERROR_LIMIT`] errors, plus how many were held back.
    pub fn visible_errors(&self) -> (&[String], usize) {
        let shown = self.errors.len().min(VISIBLE_ERROR_LIMIT);
        (&self.errors[..shown], self.errors.len() - shown)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_track_records() {
        let mut report = ImportReport::new();
        report.record_success();
        report.record_success();
        report.record_failure("Row 4: bad".to_string());
        assert_eq!(report.successful, 2);
        assert_eq!(report.failed, 1);
        assert_eq!(report.total(), 3);
        assert_eq!(report.errors.len(), 1);
    }

    #[test]
    fn visible_errors_truncate_at_five() {
        let mut report = ImportReport::new();
        for n in 0..8 {
            report.record_failure(format!("Row {n}"));
        }
        let (shown, held_back) = report.visible_errors();
        assert_eq!(shown.len(), 5);
        assert_eq!(shown[0], "Row 0");
        assert_eq!(held_back, 3);
    }

    #[test]
    fn visible_errors_show_everything_under_the_limit() {
        let mut report = ImportReport::new();
        report.record_failure("Row 2".to_string());
        let (shown, held_back) = report.visible_errors();
        assert_eq!(shown.len(), 1);
        assert_eq!(held_back, 0);
    }

    #[test]
    fn serializes_full_error_list() {
        let mut report = ImportReport::new();
        for n in 0..7 {
            report.record_failure(format!("Row {n}"));
        }
        let value = serde_json::to_value(&report).expect("serialize");
        assert_eq!(value["errors"].as_array().expect("array").len(), 7);
        assert_eq!(value["failed"], 7);
    }
}
