//! Image inspection.
//!
//! Summarises what a label declares about an array, how it is oriented for
//! display, and what the decoded values look like.

mod report;

pub use report::{ArraySection, DisplaySection, InspectReport, ValueStats};

use crate::array::ArrayData;
use crate::product::Pds4Image;

/// Build an inspection report for an image that has already been read.
pub fn inspect_image(image: &Pds4Image) -> InspectReport {
    let descriptor = &image.descriptor;
    let settings = &image.settings;
    let (rows, columns) = image.oriented.dimensions();

    InspectReport {
        label: image.label_path.display().to_string(),
        array: ArraySection {
            identifier: descriptor.local_identifier.clone(),
            class: descriptor.array_class.clone(),
            data_type: descriptor.data_type_name.clone(),
            element_type: image.raw.data.element_type(),
            shape: descriptor.shape(),
            axes: descriptor.axes.clone(),
            axis_index_order: descriptor.axis_index_order.to_string(),
            byte_offset: descriptor.byte_offset,
            data_file: descriptor.source_file_name.clone(),
        },
        display: DisplaySection {
            horizontal_axis: settings.horizontal_axis_name.clone(),
            horizontal_direction: settings.horizontal_direction,
            vertical_axis: settings.vertical_axis_name.clone(),
            vertical_direction: settings.vertical_direction,
            horizontal_position: image.oriented.horizontal_axis,
            vertical_position: image.oriented.vertical_axis,
            rows,
            columns,
        },
        values: compute_value_stats(&image.raw.data),
    }
}

/// Count, finite count, and min/max/mean over finite values.
pub fn compute_value_stats(data: &ArrayData) -> ValueStats {
    let mut stats = ValueStats {
        count: data.len(),
        ..Default::default()
    };

    let mut sum = 0.0;
    for value in data.to_f64().iter().copied().filter(|value| value.is_finite()) {
        stats.finite += 1;
        sum += value;
        stats.min = Some(stats.min.map_or(value, |min| min.min(value)));
        stats.max = Some(stats.max.map_or(value, |max| max.max(value)));
    }

    if stats.finite > 0 {
        stats.mean = Some(sum / stats.finite as f64);
    }
    stats
}
