//! Reading tables from byte sources

use std::fs::File;
use std::io::Read;
use std::path::Path;

use jagcsv_codec::{DecodeOpts, Decoder};
use jagcsv_format::constants::BYTE_ORDER_MARK;
use jagcsv_format::{JagError, Result, Table};
use tracing::debug;

/// Drop one leading UTF-8 byte order mark, if present
pub fn strip_byte_order_mark(text: &str) -> &str {
    text.strip_prefix(BYTE_ORDER_MARK).unwrap_or(text)
}

/// Read all of `input` and decode it
///
/// The input must be UTF-8; a leading byte order mark is ignored. The size
/// limit is enforced before the whole input is buffered.
pub fn read_table<R: Read>(input: R, opts: &DecodeOpts) -> Result<Table> {
    let max_len = opts.limits.max_input_len;
    let mut bytes = Vec::new();
    // Read one byte past the limit so oversized input is detected without buffering all of it.
    input
        .take((max_len as u64).saturating_add(1))
        .read_to_end(&mut bytes)?;
    if bytes.len() > max_len {
        return Err(JagError::LimitExceeded(format!(
            "Input length exceeds limit {}",
            max_len
        )));
    }

    let text = String::from_utf8(bytes)?;
    Decoder::with_opts(opts.clone()).decode(strip_byte_order_mark(&text))
}

/// Open `path` and decode its contents
pub fn read_table_from_path(path: impl AsRef<Path>, opts: &DecodeOpts) -> Result<Table> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let table = read_table(file, opts)?;
    debug!(path = %path.display(), rows = table.len(), "read table");
    Ok(table)
}
