//! Fuzz target for bbox literal parsing.
//!
//! Any input must either parse into four finite numbers or be rejected;
//! it must never panic.

#![no_main]

use libfuzzer_sys::fuzz_target;
use yoloprep::reader::parse_bbox_literal;

fuzz_target!(|data: &[u8]| {
    let Ok(literal) = std::str::from_utf8(data) else {
        return;
    };

    if let Ok(bbox) = parse_bbox_literal(literal) {
        assert!(bbox.is_finite());
    }
});
