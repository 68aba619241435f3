//! Criterion microbenches for pds4view decoding and orientation.
//!
//! Run with: `cargo bench`
//!
//! These benchmarks measure the performance of:
//! - Label parsing plus descriptor extraction
//! - Big-endian float decoding
//! - Display orientation with both axes flipped

use criterion::{criterion_group, criterion_main, Criterion, Throughput};
use std::hint::black_box;

use pds4view::descriptor::{self, ArrayDescriptor};
use pds4view::display::{self, DisplaySettings};
use pds4view::label::LabelDocument;
use pds4view::reader::decode_bytes;
use pds4view::registry;
use pds4view::RawArray;

const LINES: usize = 512;
const SAMPLES: usize = 512;

fn label() -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<Product_Observational xmlns="http://pds.nasa.gov/pds4/pds/v1" xmlns:disp="http://pds.nasa.gov/pds4/disp/v1">
  <Observation_Area><Discipline_Area>
    <disp:Display_Settings>
      <Local_Internal_Reference><local_identifier_reference>image</local_identifier_reference></Local_Internal_Reference>
      <disp:Display_Direction>
        <disp:horizontal_display_axis>Sample</disp:horizontal_display_axis>
        <disp:horizontal_display_direction>Right to Left</disp:horizontal_display_direction>
        <disp:vertical_display_axis>Line</disp:vertical_display_axis>
        <disp:vertical_display_direction>Top to Bottom</disp:vertical_display_direction>
      </disp:Display_Direction>
    </disp:Display_Settings>
  </Discipline_Area></Observation_Area>
  <File_Area_Observational>
    <File><file_name>image.fit</file_name></File>
    <Array_2D_Image>
      <local_identifier>image</local_identifier>
      <offset unit="byte">2880</offset>
      <axes>2</axes>
      <axis_index_order>Last Index Fastest</axis_index_order>
      <Element_Array><data_type>IEEE754MSBSingle</data_type></Element_Array>
      <Axis_Array><axis_name>Line</axis_name><elements>{LINES}</elements><sequence_number>1</sequence_number></Axis_Array>
      <Axis_Array><axis_name>Sample</axis_name><elements>{SAMPLES}</elements><sequence_number>2</sequence_number></Axis_Array>
    </Array_2D_Image>
  </File_Area_Observational>
</Product_Observational>"#
    )
}

fn payload() -> Vec<u8> {
    (0..LINES * SAMPLES)
        .flat_map(|i| (i as f32).to_be_bytes())
        .collect()
}

fn prepared() -> (ArrayDescriptor, DisplaySettings, RawArray) {
    let xml = label();
    let doc = LabelDocument::parse(&xml).unwrap();
    let desc = descriptor::extract(&doc, None).unwrap();
    let settings = display::resolve_display_settings(&doc, &desc).unwrap();
    let spec = registry::resolve(&desc.data_type_name).unwrap();
    let data = decode_bytes(&spec, &payload(), &desc.shape()).unwrap();
    (desc, settings, RawArray { data })
}

/// Benchmark label parsing and descriptor extraction.
fn bench_extract(c: &mut Criterion) {
    let xml = label();
    let mut group = c.benchmark_group("label");
    group.throughput(Throughput::Bytes(xml.len() as u64));

    group.bench_function("parse_and_extract", |b| {
        b.iter(|| {
            let doc = LabelDocument::parse(black_box(&xml)).unwrap();
            black_box(descriptor::extract(&doc, None).unwrap())
        })
    });

    group.finish();
}

/// Benchmark decoding big-endian f32 payloads.
fn bench_decode(c: &mut Criterion) {
    let bytes = payload();
    let spec = registry::resolve("IEEE754MSBSingle").unwrap();
    let mut group = c.benchmark_group("decode");
    group.throughput(Throughput::Bytes(bytes.len() as u64));

    group.bench_function("msb_single", |b| {
        b.iter(|| black_box(decode_bytes(&spec, black_box(&bytes), &[LINES, SAMPLES]).unwrap()))
    });

    group.finish();
}

/// Benchmark orientation with both flips applied.
fn bench_orient(c: &mut Criterion) {
    let (desc, settings, raw) = prepared();
    let mut group = c.benchmark_group("orient");
    group.throughput(Throughput::Elements((LINES * SAMPLES) as u64));

    group.bench_function("flip_both", |b| {
        b.iter(|| black_box(display::orient(black_box(&raw), &settings, &desc).unwrap()))
    });

    group.finish();
}

criterion_group!(benches, bench_extract, bench_decode, bench_orient);
criterion_main!(benches);
