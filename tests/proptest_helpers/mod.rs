#![allow(dead_code)]

use pds4view::registry::{self, DecodeSpec, Endianness};
use pds4view::ArrayData;
use proptest::prelude::*;
use proptest::test_runner::{Config as ProptestConfig, FileFailurePersistence};

pub fn proptest_config() -> ProptestConfig {
    let cases = std::env::var("PROPTEST_CASES")
        .ok()
        .and_then(|v| v.parse::<u32>().ok())
        .unwrap_or(64);

    let mut config = ProptestConfig::with_failure_persistence(FileFailurePersistence::WithSource(
        "proptest-regressions",
    ));
    config.cases = cases;
    config.max_shrink_iters = 1024;
    config
}

/// Any data type name from the registry.
pub fn arb_data_type() -> impl Strategy<Value = &'static str> {
    let names: Vec<&'static str> = registry::supported_types().collect();
    proptest::sample::select(names)
}

pub const HORIZONTAL_DIRECTIONS: [&str; 2] = ["Left to Right", "Right to Left"];
pub const VERTICAL_DIRECTIONS: [&str; 2] = ["Top to Bottom", "Bottom to Top"];

pub fn arb_directions() -> impl Strategy<Value = (&'static str, &'static str)> {
    (
        proptest::sample::select(HORIZONTAL_DIRECTIONS.to_vec()),
        proptest::sample::select(VERTICAL_DIRECTIONS.to_vec()),
    )
}

/// Re-encode decoded data so it can be compared bit for bit with the source bytes.
pub fn encode(data: &ArrayData, spec: &DecodeSpec) -> Vec<u8> {
    macro_rules! bytes_of {
        ($array:expr) => {
            $array
                .iter()
                .flat_map(|value| match spec.endianness {
                    Endianness::Big => value.to_be_bytes().to_vec(),
                    Endianness::Little => value.to_le_bytes().to_vec(),
                })
                .collect()
        };
    }

    match data {
        ArrayData::U8(array) => bytes_of!(array),
        ArrayData::I8(array) => bytes_of!(array),
        ArrayData::U16(array) => bytes_of!(array),
        ArrayData::I16(array) => bytes_of!(array),
        ArrayData::U32(array) => bytes_of!(array),
        ArrayData::I32(array) => bytes_of!(array),
        ArrayData::U64(array) => bytes_of!(array),
        ArrayData::I64(array) => bytes_of!(array),
        ArrayData::F32(array) => bytes_of!(array),
        ArrayData::F64(array) => bytes_of!(array),
    }
}
