//! Human-readable rendering. All render functions return display lines;
//! the caller joins and routes them.

use crate::catalog::entry::Entry;
use crate::import::report::ImportReport;

/// Render an import report: counts, then at most the first five errors with
/// the remainder summarized as a count.
pub fn render_report(report: &ImportReport) -> Vec<String> {
    let mut lines = Vec::new();
    lines.push(format!(
        "Successfully imported {} {}",
        report.successful,
        plural(report.successful, "movie", "movies")
    ));

    if report.failed > 0 {
        lines.push(format!(
            "{} {} failed to import",
            report.failed,
            plural(report.failed, "row", "rows")
        ));

        let (shown, held_back) = report.visible_errors();
        if !shown.is_empty() {
            lines.push(String::new());
            lines.push("Import errors:".to_string());
            for error in shown {
                lines.push(format!("  - {error}"));
            }
            if held_back > 0 {
                lines.push(format!(
                    "  ... and {held_back} more {}",
                    plural(held_back as u64, "error", "errors")
                ));
            }
        }
    }

    lines
}

/// One line per entry: id, name, year, director, format.
pub fn render_entry_list(entries: &[&Entry]) -> Vec<String> {
    let mut lines = Vec::new();
    for entry in entries {
        lines.push(format!(
            "#{:<4} {} ({})  {}  [{}]",
            entry.id,
            entry.name,
            entry.year,
            if entry.director.is_empty() {
                "unknown director"
            } else {
                entry.director.as_str()
            },
            entry.format
        ));
    }
    lines.push(String::new());
    lines.push(format!(
        "{} {}",
        entries.len(),
        plural(entries.len() as u64, "entry", "entries")
    ));
    lines
}

/// Full detail for a single entry.
pub fn render_entry(entry: &Entry) -> Vec<String> {
    vec![
        format!("#{} {} ({})", entry.id, entry.name, entry.year),
        format!("  director: {}", entry.director),
        format!("  actors:   {}", entry.actors.join(", ")),
        format!("  genre:    {}", entry.genre),
        format!("  format:   {}", entry.format),
        format!("  cover:    {}", entry.cover_url),
    ]
}

fn plural(count: u64, one: &'static str, many: &'static str) -> &'static str {
    if count == 1 { one } else { many }
}
