//! Table to CSV text

use jagcsv_format::constants::{
    is_inline_whitespace, CR, FIELD_SEPARATOR, LF, QUOTE, RECORD_TERMINATOR,
};
use jagcsv_format::{Row, Table};
use tracing::debug;

/// Check whether a field must be wrapped in quotes
///
/// True when the first or last character is inline whitespace, or the text
/// contains a comma, quote, CR, or LF anywhere.
pub fn needs_quoting(text: &str) -> bool {
    let edge_whitespace = text.chars().next().is_some_and(is_inline_whitespace)
        || text.chars().next_back().is_some_and(is_inline_whitespace);
    edge_whitespace || text.contains([FIELD_SEPARATOR, QUOTE, CR, LF])
}

/// Append one field, quoting and escaping only when required
pub fn encode_field(text: &str, out: &mut String) {
    if !needs_quoting(text) {
        out.push_str(text);
        return;
    }

    out.reserve(text.len() + 2);
    out.push(QUOTE);
    for ch in text.chars() {
        if ch == QUOTE {
            out.push(QUOTE);
        }
        out.push(ch);
    }
    out.push(QUOTE);
}

/// Append one record followed by CRLF
///
/// Absent fields are written as empty, unquoted tokens.
pub fn encode_row(row: &Row, out: &mut String) {
    for (idx, field) in row.iter().enumerate() {
        if idx > 0 {
            out.push(FIELD_SEPARATOR);
        }
        if let Some(text) = field {
            encode_field(text, out);
        }
    }
    out.push_str(RECORD_TERMINATOR);
}

/// Reusable table encoder
#[derive(Debug, Clone)]
pub struct Encoder {
    reserve_hint: bool,
}

impl Encoder {
    /// Create an encoder that pre-sizes its output buffer
    pub fn new() -> Self {
        Self { reserve_hint: true }
    }

    /// Create an encoder that grows its output buffer on demand
    pub fn without_reserve() -> Self {
        Self {
            reserve_hint: false,
        }
    }

    /// Encode a whole table
    pub fn encode(&self, table: &Table) -> String {
        let mut out = String::new();
        self.encode_into(table, &mut out);
        out
    }

    /// Append the encoding of `table` to `out`
    pub fn encode_into(&self, table: &Table, out: &mut String) {
        if self.reserve_hint {
            out.reserve(estimate_len(table));
        }
        let start = out.len();
        for row in table {
            encode_row(row, out);
        }
        debug!(rows = table.len(), bytes = out.len() - start, "encoded table");
    }
}

impl Default for Encoder {
    fn default() -> Self {
        Self::new()
    }
}

/// Encode a whole table; zero rows encode to the empty string
pub fn encode(table: &Table) -> String {
    Encoder::new().encode(table)
}

/// Unquoted output size: field text, separators, and terminators
fn estimate_len(table: &Table) -> usize {
    table
        .iter()
        .map(|row| {
            let text: usize = row.iter().map(|f| f.map_or(0, str::len)).sum();
            text + row.len().saturating_sub(1) + RECORD_TERMINATOR.len()
        })
        .sum()
}
