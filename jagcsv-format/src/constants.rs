//! Grammar constants shared by the encoder and decoder

/// Field separator.
pub const FIELD_SEPARATOR: char = ',';

/// Quote character opening and closing a quoted field.
pub const QUOTE: char = '"';

/// Carriage return; alone or followed by [`LF`] it ends a record.
pub const CR: char = '\r';

/// Line feed; alone it ends a record.
pub const LF: char = '\n';

/// Record terminator written by the encoder after every record, including the last.
pub const RECORD_TERMINATOR: &str = "\r\n";

/// UTF-8 byte order mark, stripped by readers before decoding.
pub const BYTE_ORDER_MARK: char = '\u{FEFF}';

/// Characters trimmed from unquoted fields and forcing quotes at a field's edges.
pub const INLINE_WHITESPACE: [char; 5] = [
    ' ',        // space
    '\t',       // horizontal tab
    '\u{000C}', // form feed
    '\u{000B}', // vertical tab
    '\u{3000}', // ideographic (full-width) space
];

/// Returns true for characters in [`INLINE_WHITESPACE`].
#[inline]
pub fn is_inline_whitespace(ch: char) -> bool {
    matches!(ch, ' ' | '\t' | '\u{000C}' | '\u{000B}' | '\u{3000}')
}

/// Returns true for either record separator character.
#[inline]
pub fn is_record_separator(ch: char) -> bool {
    ch == CR || ch == LF
}

/// Trim leading and trailing inline whitespace.
///
/// Unlike [`str::trim`], line breaks and other Unicode whitespace are kept.
pub fn trim_inline_whitespace(text: &str) -> &str {
    text.trim_matches(is_inline_whitespace)
}
