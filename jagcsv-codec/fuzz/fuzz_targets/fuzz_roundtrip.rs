#![no_main]

use jagcsv_codec::{decode, encode};
use libfuzzer_sys::fuzz_target;

// Any accepted document must re-encode to text that decodes to the same table.
fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(table) = decode(text) else {
        return;
    };

    let encoded = encode(&table);
    let reparsed = decode(&encoded).expect("encoder output must decode");
    let mut expected = table;
    expected.remove_empty_rows();
    let mut actual = reparsed;
    actual.remove_empty_rows();
    assert_eq!(actual, expected);
});
