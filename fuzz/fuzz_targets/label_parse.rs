//! Fuzz target for PDS4 label parsing and descriptor extraction.
//!
//! This fuzzer feeds arbitrary byte sequences to the label parser and runs
//! descriptor extraction and display resolution on anything that parses,
//! checking for panics, crashes, or hangs.

#![no_main]

use libfuzzer_sys::fuzz_target;
use pds4view::label::LabelDocument;
use pds4view::{descriptor, display};

fuzz_target!(|data: &[u8]| {
    // Cap input size to avoid excessive memory usage.
    if data.len() > 10 * 1024 * 1024 {
        return;
    }

    let Ok(label) = LabelDocument::from_slice(data) else {
        return;
    };
    if let Ok(desc) = descriptor::extract(&label, None) {
        let _ = desc.element_count();
        let _ = display::resolve_display_settings(&label, &desc);
    }
});
