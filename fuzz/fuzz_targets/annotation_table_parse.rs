//! Fuzz target for annotation table parsing.
//!
//! This fuzzer feeds arbitrary byte sequences to the tab-separated table
//! reader, checking for panics, crashes, or hangs.

#![no_main]

use libfuzzer_sys::fuzz_target;
use yoloprep::reader::fuzz_parse_table;

fuzz_target!(|data: &[u8]| {
    if data.len() > 10 * 1024 * 1024 {
        return;
    }

    let _ = fuzz_parse_table(data);
});
