#![no_main]

use jagcsv_codec::{DecodeOpts, Decoder, Limits};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    let opts = DecodeOpts {
        limits: Limits::default(),
    };
    let _ = Decoder::with_opts(opts).decode(text);
});
