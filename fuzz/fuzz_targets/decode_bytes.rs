//! Fuzz target for raw array decoding.
//!
//! The first byte picks a data type and the next two give the shape; the
//! rest is decoded as the array payload.

#![no_main]

use libfuzzer_sys::fuzz_target;
use pds4view::reader::decode_bytes;
use pds4view::registry::DATA_TYPES;

fuzz_target!(|data: &[u8]| {
    let [selector, lines, samples, payload @ ..] = data else {
        return;
    };

    let (_, spec) = &DATA_TYPES[*selector as usize % DATA_TYPES.len()];
    let shape = [*lines as usize, *samples as usize];

    if let Ok(array) = decode_bytes(spec, payload, &shape) {
        assert_eq!(array.shape(), &shape);
    }
});
