//! Minimal comma-dialect tabular parsing.
//!
//! The dialect is deliberately small: fields are separated by commas, a `"`
//! toggles a quoted run so embedded commas survive, and that is all. There is
//! no `""` escape, no embedded newline, and no alternative delimiter. A full
//! CSV grammar can be swapped in behind [`parse`] without touching the import
//! layer.

pub mod lines;
pub mod parse;
pub mod split;

pub use parse::{DroppedLine, ParseError, ParsedTable, RawRow, parse};
