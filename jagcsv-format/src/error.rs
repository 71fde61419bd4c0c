//! Error types for jagcsv

use thiserror::Error;

/// Reason a CSV document was rejected by the decoder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MalformedCause {
    /// A quote appeared after unquoted content in the same field.
    #[error("quote inside an unquoted field")]
    StrayQuote,
    /// A second quoted section was opened within one field.
    #[error("second quoted section in one field")]
    SecondQuotedSection,
    /// Input ended while a quoted field was still open.
    #[error("unterminated quoted field")]
    UnterminatedQuote,
    /// A character other than a delimiter followed a closing quote.
    #[error("unexpected character after closing quote")]
    ContentAfterQuote,
}

/// jagcsv error types
#[derive(Debug, Error)]
pub enum JagError {
    /// Input violates the CSV grammar. Line and column are 1-based and count characters.
    #[error("Malformed CSV at line {line}, column {column}: {cause}")]
    Malformed {
        /// What was wrong.
        cause: MalformedCause,
        /// Line of the offending character.
        line: usize,
        /// Column of the offending character.
        column: usize,
    },
    /// Strict row access past the end of a table.
    #[error("Row index {index} out of range (row count {len})")]
    RowOutOfRange {
        /// Requested row.
        index: usize,
        /// Number of rows present.
        len: usize,
    },
    /// Strict field access past the end of a row.
    #[error("Field index {index} out of range (field count {len})")]
    FieldOutOfRange {
        /// Requested field.
        index: usize,
        /// Number of fields present.
        len: usize,
    },
    /// Field text could not be converted to the requested type.
    #[error("Cannot convert {text:?} to {target}")]
    Conversion {
        /// Offending field text.
        text: String,
        /// Name of the target type.
        target: &'static str,
    },
    /// A configured decode limit was exceeded.
    #[error("Limit exceeded: {0}")]
    LimitExceeded(String),
    /// Input bytes were not valid UTF-8.
    #[error("Invalid UTF-8 input: {0}")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),
    /// I/O operation failed while reading or writing text.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl JagError {
    /// Build a malformed-format error at the given position.
    pub fn malformed(cause: MalformedCause, line: usize, column: usize) -> Self {
        JagError::Malformed {
            cause,
            line,
            column,
        }
    }

    /// Build a conversion error for `text` targeting `T`.
    pub fn conversion<T: ?Sized>(text: &str) -> Self {
        JagError::Conversion {
            text: text.to_string(),
            target: std::any::type_name::<T>(),
        }
    }

    /// Cause of a malformed-format error, if this is one.
    pub fn malformed_cause(&self) -> Option<MalformedCause> {
        match self {
            JagError::Malformed { cause, .. } => Some(*cause),
            _ => None,
        }
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, JagError>;
