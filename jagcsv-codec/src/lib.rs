//! jagcsv Codec - Encoder/decoder engines
//!
//! This crate converts between [`Table`] values and CSV text:
//!
//! - [`Encoder`] writes minimal-quoting CSV, terminating every record
//!   (including the last) with CRLF
//! - [`Decoder`] parses CSV with a strict single-pass state machine and
//!   rejects malformed input without attempting recovery
//!
//! Both operate purely on in-memory strings.

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod decoder;
pub mod encoder;

// Re-export commonly used types
pub use jagcsv_format::{
    Decimal, Field, FromField, JagError, Limits, MalformedCause, Result, Row, Table, ToField,
};

// Re-export our own types
pub use decoder::{decode, decode_into, Decoder};
pub use encoder::{encode, encode_field, encode_row, needs_quoting, Encoder};

/// Decoding options
#[derive(Debug, Clone, Default)]
pub struct DecodeOpts {
    /// Security limits
    pub limits: Limits,
}

impl DecodeOpts {
    /// Options with every limit disabled
    pub fn unbounded() -> Self {
        Self {
            limits: Limits::unbounded(),
        }
    }
}
