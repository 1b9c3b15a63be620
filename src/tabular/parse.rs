//! Header extraction, row shape checking, and row-map construction.

use std::collections::HashMap;
use std::fmt;

use super::lines::non_blank_lines;
use super::split::{split_fields, strip_quotes};

/// One parsed but unvalidated input row, keyed by source column header.
pub type RawRow = HashMap<String, String>;

/// A data line excluded because its field count did not match the header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DroppedLine {
    /// 1-based position among the non-blank lines (the header is line 1).
    pub line_number: usize,
    /// Fields the line actually produced.
    pub fields: usize,
    /// Fields the header requires.
    pub expected: usize,
}

/// Parse failure before any row could be produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseError {
    /// Fewer than two non-blank lines: a header alone, or no content at all.
    Empty,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::Empty => f.write_str("input has no header and data lines"),
        }
    }
}

impl std::error::Error for ParseError {}

/// Output of [`parse`]: the header, the accepted rows, and the lines that
/// were excluded for a field-count mismatch.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedTable {
    /// Header fields in source order, trimmed and quote-stripped, verbatim
    /// otherwise. Duplicates are not removed; when a duplicate header occurs,
    /// the later column's value overwrites the earlier one in each row map.
    pub headers: Vec<String>,
    /// Accepted rows in input order.
    pub rows: Vec<RawRow>,
    /// Excluded lines in input order.
    pub dropped: Vec<DroppedLine>,
}

/// Parse delimited text into header-keyed rows.
///
/// The header line is split on plain commas; data lines go through the
/// quote-aware splitter. A data line whose field count differs from the
/// header count never becomes a row; it is recorded in `dropped` instead so
/// callers can report it.
pub fn parse(text: &str) -> Result<ParsedTable, ParseError> {
    let lines: Vec<&str> = non_blank_lines(text).collect();
    if lines.len() < 2 {
        return Err(ParseError::Empty);
    }

    let headers: Vec<String> = lines[0]
        .split(',')
        .map(|header| strip_quotes(header.trim()))
        .collect();

    let mut rows = Vec::new();
    let mut dropped = Vec::new();

    for (index, line) in lines.iter().enumerate().skip(1) {
        let values = split_fields(line);
        if values.len() != headers.len() {
            dropped.push(DroppedLine {
                line_number: index + 1,
                fields: values.len(),
                expected: headers.len(),
            });
            continue;
        }

        let mut row = RawRow::with_capacity(headers.len());
        for (column, header) in headers.iter().enumerate() {
            let value = values.get(column).map(String::as_str).unwrap_or("");
            row.insert(header.clone(), strip_quotes(value));
        }
        rows.push(row);
    }

    Ok(ParsedTable {
        headers,
        rows,
        dropped,
    })
}
