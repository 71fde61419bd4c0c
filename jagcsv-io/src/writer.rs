//! Writing tables to byte sinks

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

use jagcsv_codec::Encoder;
use jagcsv_format::{Result, Table};
use tracing::debug;

/// Encode `table` and write it to `output`, flushing at the end
///
/// Returns the number of bytes written.
pub fn write_table<W: Write>(table: &Table, output: W) -> Result<usize> {
    let text = Encoder::new().encode(table);
    let mut writer = BufWriter::new(output);
    writer.write_all(text.as_bytes())?;
    writer.flush()?;
    Ok(text.len())
}

/// Create or truncate `path` and write the encoding of `table`
pub fn write_table_to_path(table: &Table, path: impl AsRef<Path>) -> Result<usize> {
    let path = path.as_ref();
    let written = write_table(table, File::create(path)?)?;
    debug!(path = %path.display(), rows = table.len(), bytes = written, "wrote table");
    Ok(written)
}

/// Append the encoding of `table` to `path`, creating the file if needed
///
/// Every encoded record ends with CRLF, so appending to a file produced by
/// this crate always starts on a fresh record.
pub fn append_table_to_path(table: &Table, path: impl AsRef<Path>) -> Result<usize> {
    let path = path.as_ref();
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let written = write_table(table, file)?;
    debug!(path = %path.display(), rows = table.len(), bytes = written, "appended table");
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use jagcsv_format::Row;

    #[test]
    fn test_write_table_to_vec() {
        let table: Table = vec![["a", "b c"].into_iter().collect::<Row>()].into();
        let mut out = Vec::new();
        let written = write_table(&table, &mut out).unwrap();
        assert_eq!(out, b"a,b c\r\n");
        assert_eq!(written, out.len());
    }

    #[test]
    fn test_write_empty_table() {
        let mut out = Vec::new();
        assert_eq!(write_table(&Table::new(), &mut out).unwrap(), 0);
        assert!(out.is_empty());
    }
}
