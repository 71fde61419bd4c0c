//! jagcsv Format - Core primitives for jagged CSV tables
//!
//! This crate provides the in-memory data model shared by the jagcsv codec
//! and I/O layers, with no I/O dependencies. It includes:
//!
//! - Grammar constants (delimiters, quote, inline whitespace)
//! - Error types
//! - Decode limits
//! - Rows and tables of nullable text fields
//! - Typed field conversion (`FromField` / `ToField`)
//! - Exact decimal field values

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod constants;
pub mod decimal;
pub mod error;
pub mod field;
pub mod limits;
pub mod row;
pub mod table;

// Re-export commonly used types
pub use decimal::Decimal;
pub use error::{JagError, MalformedCause, Result};
pub use field::{Field, FromField, ToField};
pub use limits::Limits;
pub use row::Row;
pub use table::Table;
