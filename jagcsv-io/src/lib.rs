//! jagcsv I/O - Text in, text out
//!
//! The codec only transforms in-memory strings. This crate is the glue that
//! moves that text through `std::io` and the filesystem:
//!
//! - Reading a whole input into a table
//! - Writing or appending a table's encoding
//! - Shape summaries for reporting

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod reader;
pub mod summary;
pub mod writer;

// Re-export commonly used types
pub use jagcsv_codec::{DecodeOpts, Decoder, Encoder};
pub use jagcsv_format::{JagError, Limits, Result, Row, Table};
pub use reader::{read_table, read_table_from_path, strip_byte_order_mark};
pub use summary::{summarize, TableSummary};
pub use writer::{append_table_to_path, write_table, write_table_to_path};
