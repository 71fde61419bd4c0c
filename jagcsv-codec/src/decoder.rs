//! CSV text to Table
//!
//! A single pass over the input drives a three-state machine per field:
//!
//! | state         | `"`                               | `,`          | CR / LF       | other          |
//! |---------------|-----------------------------------|--------------|---------------|----------------|
//! | `Unquoted`    | open quote if buffer empty, else error | end field | end record  | append         |
//! | `InQuote`     | `""` appends `"`, else close      | append       | append        | append         |
//! | `ClosedQuote` | error                             | end field    | end record    | error          |
//!
//! End of input acts as a final record separator; ending inside a quote is an error.

use std::iter::Peekable;
use std::str::Chars;

use jagcsv_format::constants::{
    is_record_separator, trim_inline_whitespace, CR, FIELD_SEPARATOR, LF, QUOTE,
};
use jagcsv_format::{JagError, Limits, MalformedCause, Result, Row, Table};
use tracing::debug;

use crate::DecodeOpts;

/// Quote state of the field being accumulated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum QuoteState {
    /// No opening quote seen for this field
    Unquoted,
    /// Inside a quoted section; everything is literal until a closing quote
    InQuote,
    /// Quoted section closed; only a delimiter or end of input may follow
    ClosedQuote,
}

/// Strict CSV decoder
#[derive(Debug, Clone, Default)]
pub struct Decoder {
    opts: DecodeOpts,
}

impl Decoder {
    /// Create a decoder with default limits
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a decoder with explicit options
    pub fn with_opts(opts: DecodeOpts) -> Self {
        Self { opts }
    }

    /// Access the decoder options
    pub fn opts(&self) -> &DecodeOpts {
        &self.opts
    }

    /// Decode `input` into a new table
    pub fn decode(&self, input: &str) -> Result<Table> {
        let mut table = Table::new();
        self.decode_into(input, &mut table)?;
        Ok(table)
    }

    /// Decode `input`, appending its rows to `table`
    ///
    /// Returns the number of rows appended. On error `table` is left unchanged.
    pub fn decode_into(&self, input: &str, table: &mut Table) -> Result<usize> {
        let limits = &self.opts.limits;
        if input.len() > limits.max_input_len {
            return Err(JagError::LimitExceeded(format!(
                "Input length {} exceeds limit {}",
                input.len(),
                limits.max_input_len
            )));
        }

        let mut decoded = Table::new();
        Parser::new(input, limits).run(&mut decoded)?;

        let added = decoded.len();
        table.append(&mut decoded);
        debug!(rows = added, bytes = input.len(), "decoded csv");
        Ok(added)
    }
}

/// Decode `input` into a new table with default limits
pub fn decode(input: &str) -> Result<Table> {
    Decoder::new().decode(input)
}

/// Decode `input` with default limits, appending rows to `table`
pub fn decode_into(input: &str, table: &mut Table) -> Result<usize> {
    Decoder::new().decode_into(input, table)
}

/// Character source tracking the 1-based line and column of each character
struct Cursor<'a> {
    chars: Peekable<Chars<'a>>,
    line: usize,
    column: usize,
}

impl<'a> Cursor<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            chars: input.chars().peekable(),
            line: 1,
            column: 1,
        }
    }

    /// Next character with its position
    fn advance(&mut self) -> Option<(char, usize, usize)> {
        let ch = self.chars.next()?;
        let position = (ch, self.line, self.column);
        // A CR directly followed by LF ends the line at the LF.
        let ends_line = ch == LF || (ch == CR && self.chars.peek() != Some(&LF));
        if ends_line {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(position)
    }

    /// Consume the next character if it equals `expected`
    fn next_if_eq(&mut self, expected: char) -> bool {
        if self.chars.peek() == Some(&expected) {
            self.advance();
            true
        } else {
            false
        }
    }
}

/// Per-call decoding state
struct Parser<'a> {
    cursor: Cursor<'a>,
    limits: &'a Limits,
    state: QuoteState,
    buffer: String,
    /// Row of the current record; created by the first field boundary
    row: Option<Row>,
    /// Position of the opening quote of the current field
    quote_start: (usize, usize),
}

impl<'a> Parser<'a> {
    fn new(input: &'a str, limits: &'a Limits) -> Self {
        Self {
            cursor: Cursor::new(input),
            limits,
            state: QuoteState::Unquoted,
            buffer: String::new(),
            row: None,
            quote_start: (0, 0),
        }
    }

    fn run(mut self, table: &mut Table) -> Result<()> {
        use QuoteState::*;

        while let Some((ch, line, column)) = self.cursor.advance() {
            match (self.state, ch) {
                (Unquoted, QUOTE) => {
                    if !self.buffer.is_empty() {
                        return Err(JagError::malformed(MalformedCause::StrayQuote, line, column));
                    }
                    self.state = InQuote;
                    self.quote_start = (line, column);
                }
                (InQuote, QUOTE) => {
                    if self.cursor.next_if_eq(QUOTE) {
                        self.push_char(QUOTE)?;
                    } else {
                        self.state = ClosedQuote;
                    }
                }
                (ClosedQuote, QUOTE) => {
                    return Err(JagError::malformed(
                        MalformedCause::SecondQuotedSection,
                        line,
                        column,
                    ));
                }
                (InQuote, _) => self.push_char(ch)?,
                (_, FIELD_SEPARATOR) => self.end_field()?,
                (_, _) if is_record_separator(ch) => {
                    if ch == CR {
                        self.cursor.next_if_eq(LF);
                    }
                    self.end_record(table)?;
                }
                (Unquoted, _) => self.push_char(ch)?,
                (ClosedQuote, _) => {
                    return Err(JagError::malformed(
                        MalformedCause::ContentAfterQuote,
                        line,
                        column,
                    ));
                }
            }
        }

        if self.state == InQuote {
            let (line, column) = self.quote_start;
            return Err(JagError::malformed(
                MalformedCause::UnterminatedQuote,
                line,
                column,
            ));
        }
        self.end_record(table)
    }

    fn push_char(&mut self, ch: char) -> Result<()> {
        if self.buffer.len() + ch.len_utf8() > self.limits.max_field_len {
            return Err(JagError::LimitExceeded(format!(
                "Field length exceeds limit {}",
                self.limits.max_field_len
            )));
        }
        self.buffer.push(ch);
        Ok(())
    }

    /// Close the current field and append it to the current row
    fn end_field(&mut self) -> Result<()> {
        let value = match self.state {
            QuoteState::Unquoted => {
                let trimmed = trim_inline_whitespace(&self.buffer).to_string();
                self.buffer.clear();
                trimmed
            }
            _ => std::mem::take(&mut self.buffer),
        };
        self.state = QuoteState::Unquoted;

        let row = self.row.get_or_insert_with(Row::new);
        if row.len() >= self.limits.max_fields_per_row {
            return Err(JagError::LimitExceeded(format!(
                "Row has more than {} fields",
                self.limits.max_fields_per_row
            )));
        }
        row.push(value);
        Ok(())
    }

    /// Close the current record; a blank line yields no row
    fn end_record(&mut self, table: &mut Table) -> Result<()> {
        let has_field = !self.buffer.is_empty()
            || self.state == QuoteState::ClosedQuote
            || self.row.is_some();
        if !has_field {
            return Ok(());
        }

        self.end_field()?;
        if table.len() >= self.limits.max_rows {
            return Err(JagError::LimitExceeded(format!(
                "Input has more than {} rows",
                self.limits.max_rows
            )));
        }
        if let Some(row) = self.row.take() {
            table.push_row(row);
        }
        Ok(())
    }
}
