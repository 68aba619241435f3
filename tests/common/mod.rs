#![allow(dead_code)]

use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

/// One `Array_2D_Image` block. Axis 1 ("Line") has `lines` elements and
/// axis 2 ("Sample") has `samples` elements unless `swap_sequence` is set.
#[derive(Clone, Debug)]
pub struct ArrayBlock {
    pub id: String,
    pub data_type: String,
    pub lines: usize,
    pub samples: usize,
    pub offset: u64,
    pub unit: String,
    pub axis_index_order: String,
    pub swap_sequence: bool,
}

impl ArrayBlock {
    pub fn new(id: &str, data_type: &str, lines: usize, samples: usize) -> Self {
        Self {
            id: id.to_string(),
            data_type: data_type.to_string(),
            lines,
            samples,
            offset: 0,
            unit: "byte".to_string(),
            axis_index_order: "Last Index Fastest".to_string(),
            swap_sequence: false,
        }
    }

    pub fn offset(mut self, offset: u64) -> Self {
        self.offset = offset;
        self
    }

    pub fn axis_index_order(mut self, order: &str) -> Self {
        self.axis_index_order = order.to_string();
        self
    }

    pub fn unit(mut self, unit: &str) -> Self {
        self.unit = unit.to_string();
        self
    }

    /// Store "Sample" as the outer axis (sequence 1) and "Line" as the inner one.
    pub fn swap_sequence(mut self) -> Self {
        self.swap_sequence = true;
        self
    }
}

/// One `disp:Display_Settings` block.
#[derive(Clone, Debug)]
pub struct DisplayBlock {
    pub reference: String,
    pub horizontal_axis: String,
    pub horizontal_direction: String,
    pub vertical_axis: String,
    pub vertical_direction: String,
}

impl DisplayBlock {
    /// Lines run bottom-to-top, samples left-to-right: no flips.
    pub fn new(reference: &str) -> Self {
        Self {
            reference: reference.to_string(),
            horizontal_axis: "Sample".to_string(),
            horizontal_direction: "Left to Right".to_string(),
            vertical_axis: "Line".to_string(),
            vertical_direction: "Bottom to Top".to_string(),
        }
    }

    pub fn directions(mut self, horizontal: &str, vertical: &str) -> Self {
        self.horizontal_direction = horizontal.to_string();
        self.vertical_direction = vertical.to_string();
        self
    }

    pub fn axes(mut self, horizontal: &str, vertical: &str) -> Self {
        self.horizontal_axis = horizontal.to_string();
        self.vertical_axis = vertical.to_string();
        self
    }
}

/// Build a PDS4 label with the given arrays (all in one file area) and display settings.
pub fn label_xml(data_file: &str, arrays: &[ArrayBlock], displays: &[DisplayBlock]) -> String {
    let mut xml = String::new();
    writeln!(xml, r#"<?xml version="1.0" encoding="UTF-8"?>"#).unwrap();
    writeln!(
        xml,
        r#"<Product_Observational xmlns="http://pds.nasa.gov/pds4/pds/v1" xmlns:disp="http://pds.nasa.gov/pds4/disp/v1">"#
    )
    .unwrap();
    writeln!(xml, "  <Observation_Area>").unwrap();
    writeln!(xml, "    <Discipline_Area>").unwrap();
    for display in displays {
        writeln!(
            xml,
            r#"      <disp:Display_Settings>
        <Local_Internal_Reference>
          <local_identifier_reference> {} </local_identifier_reference>
          <local_reference_type>display_settings_to_array</local_reference_type>
        </Local_Internal_Reference>
        <disp:Display_Direction>
          <disp:horizontal_display_axis>{}</disp:horizontal_display_axis>
          <disp:horizontal_display_direction>{}</disp:horizontal_display_direction>
          <disp:vertical_display_axis>{}</disp:vertical_display_axis>
          <disp:vertical_display_direction>{}</disp:vertical_display_direction>
        </disp:Display_Direction>
      </disp:Display_Settings>"#,
            display.reference,
            display.horizontal_axis,
            display.horizontal_direction,
            display.vertical_axis,
            display.vertical_direction
        )
        .unwrap();
    }
    writeln!(xml, "    </Discipline_Area>").unwrap();
    writeln!(xml, "  </Observation_Area>").unwrap();
    writeln!(xml, "  <File_Area_Observational>").unwrap();
    writeln!(xml, "    <File><file_name>{data_file}</file_name></File>").unwrap();
    for array in arrays {
        let (line_seq, sample_seq) = if array.swap_sequence { (2, 1) } else { (1, 2) };
        writeln!(
            xml,
            r#"    <Array_2D_Image>
      <local_identifier>{}</local_identifier>
      <offset unit="{}">{}</offset>
      <axes>2</axes>
      <axis_index_order>{}</axis_index_order>
      <Element_Array><data_type>{}</data_type></Element_Array>
      <Axis_Array><axis_name>Line</axis_name><elements>{}</elements><sequence_number>{}</sequence_number></Axis_Array>
      <Axis_Array><axis_name>Sample</axis_name><elements>{}</elements><sequence_number>{}</sequence_number></Axis_Array>
    </Array_2D_Image>"#,
            array.id,
            array.unit,
            array.offset,
            array.axis_index_order,
            array.data_type,
            array.lines,
            line_seq,
            array.samples,
            sample_seq
        )
        .unwrap();
    }
    writeln!(xml, "  </File_Area_Observational>").unwrap();
    writeln!(xml, "</Product_Observational>").unwrap();
    xml
}

/// Write a label and its data file into `dir`; returns the label path.
pub fn write_product(dir: &Path, label_name: &str, xml: &str, data_file: &str, data: &[u8]) -> PathBuf {
    fs::create_dir_all(dir).expect("create product dir");
    let label_path = dir.join(label_name);
    fs::write(&label_path, xml).expect("write label");
    fs::write(dir.join(data_file), data).expect("write data file");
    label_path
}

/// `header_len` filler bytes followed by big-endian f32 values.
pub fn msb_single_bytes(header_len: usize, values: &[f32]) -> Vec<u8> {
    let mut bytes = vec![0x20u8; header_len];
    for value in values {
        bytes.extend_from_slice(&value.to_be_bytes());
    }
    bytes
}

/// A single-array product with default display settings, 2x3 values 0..6.
pub fn write_simple_product(dir: &Path, horizontal: &str, vertical: &str) -> PathBuf {
    let xml = label_xml(
        "image.dat",
        &[ArrayBlock::new("image", "IEEE754MSBSingle", 2, 3).offset(16)],
        &[DisplayBlock::new("image").directions(horizontal, vertical)],
    );
    let data = msb_single_bytes(16, &[0.0, 1.0, 2.0, 3.0, 4.0, 5.0]);
    write_product(dir, "image.xml", &xml, "image.dat", &data)
}
