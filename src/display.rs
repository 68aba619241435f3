//! Display orientation from PDS4 `disp:Display_Settings`.
//!
//! A label says which array axis runs horizontally and which vertically on
//! screen, and in which direction each one increases. [`orient`] uses that to
//! produce an array whose element `[0, 0]` belongs at the lower-left corner
//! of a display whose origin is also at the lower left.

use std::borrow::Cow;
use std::fmt;

use ndarray::{ArrayD, Axis};
use serde::Serialize;

use crate::array::{map_array, ArrayData};
use crate::descriptor::ArrayDescriptor;
use crate::error::Pds4Error;
use crate::label::{required_child, required_text, Element, LabelDocument, NamespaceMap};
use crate::reader::RawArray;

const DISPLAY_SETTINGS_PATH: &str = "pds4:Observation_Area/pds4:Discipline_Area/disp:Display_Settings";

// Labels in the wild put the reference in either namespace.
const REFERENCE_PATHS: &[&str] = &[
    "pds4:Local_Internal_Reference/pds4:local_identifier_reference",
    "disp:Local_Internal_Reference/disp:local_identifier_reference",
];

/// Direction in which the horizontal display axis increases.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum HorizontalDirection {
    LeftToRight,
    RightToLeft,
}

/// Direction in which the vertical display axis increases.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum VerticalDirection {
    TopToBottom,
    BottomToTop,
}

impl HorizontalDirection {
    fn from_label(raw: &str) -> Result<Self, Pds4Error> {
        match raw {
            "Left to Right" => Ok(HorizontalDirection::LeftToRight),
            "Right to Left" => Ok(HorizontalDirection::RightToLeft),
            other => Err(Pds4Error::UnsupportedDirection {
                value: other.to_string(),
            }),
        }
    }
}

impl VerticalDirection {
    fn from_label(raw: &str) -> Result<Self, Pds4Error> {
        match raw {
            "Top to Bottom" => Ok(VerticalDirection::TopToBottom),
            "Bottom to Top" => Ok(VerticalDirection::BottomToTop),
            other => Err(Pds4Error::UnsupportedDirection {
                value: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for HorizontalDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HorizontalDirection::LeftToRight => f.write_str("Left to Right"),
            HorizontalDirection::RightToLeft => f.write_str("Right to Left"),
        }
    }
}

impl fmt::Display for VerticalDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VerticalDirection::TopToBottom => f.write_str("Top to Bottom"),
            VerticalDirection::BottomToTop => f.write_str("Bottom to Top"),
        }
    }
}

/// Display settings for one array.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DisplaySettings {
    pub referenced_identifier: String,
    pub horizontal_axis_name: String,
    pub vertical_axis_name: String,
    pub horizontal_direction: HorizontalDirection,
    pub vertical_direction: VerticalDirection,
}

/// An array ready for display with a lower-left origin.
///
/// Position 0 is the vertical axis and position 1 the horizontal axis.
#[derive(Clone, Debug, PartialEq)]
pub struct OrientedArray {
    pub data: ArrayData,
    pub settings: DisplaySettings,
    /// Position of the vertical axis in the raw array.
    pub vertical_axis: usize,
    /// Position of the horizontal axis in the raw array.
    pub horizontal_axis: usize,
}

impl OrientedArray {
    /// `(rows, columns)` of the display.
    ///
    /// # Panics
    ///
    /// If `data` has fewer than two dimensions. Arrays built by [`orient`]
    /// always have two.
    pub fn dimensions(&self) -> (usize, usize) {
        let shape = self.data.shape();
        (shape[0], shape[1])
    }
}

/// Find the display settings that reference `descriptor`'s array.
///
/// The first `Display_Settings` block whose reference matches wins.
pub fn resolve_display_settings(
    label: &LabelDocument<'_>,
    descriptor: &ArrayDescriptor,
) -> Result<DisplaySettings, Pds4Error> {
    let ns = NamespaceMap::pds4();

    for block in label.find_all(DISPLAY_SETTINGS_PATH, &ns)? {
        if reference_of(block, &ns)?.as_deref() == Some(descriptor.local_identifier.as_str()) {
            return read_settings(block, &ns, &descriptor.local_identifier);
        }
    }

    Err(Pds4Error::DisplaySettingsNotFound {
        identifier: descriptor.local_identifier.clone(),
    })
}

fn reference_of<'a>(block: Element<'a, '_>, ns: &NamespaceMap) -> Result<Option<Cow<'a, str>>, Pds4Error> {
    for path in REFERENCE_PATHS {
        if let Some(reference) = block.find_one(path, ns)?.and_then(|element| element.text()) {
            return Ok(Some(reference));
        }
    }
    Ok(None)
}

fn read_settings(block: Element<'_, '_>, ns: &NamespaceMap, identifier: &str) -> Result<DisplaySettings, Pds4Error> {
    let direction = required_child(block, "disp:Display_Direction", ns, "<Display_Settings>")?;
    let context = "<Display_Direction>";

    let settings = DisplaySettings {
        referenced_identifier: identifier.to_string(),
        horizontal_axis_name: required_text(direction, "disp:horizontal_display_axis", ns, context)?.to_string(),
        vertical_axis_name: required_text(direction, "disp:vertical_display_axis", ns, context)?.to_string(),
        horizontal_direction: HorizontalDirection::from_label(&required_text(
            direction,
            "disp:horizontal_display_direction",
            ns,
            context,
        )?)?,
        vertical_direction: VerticalDirection::from_label(&required_text(
            direction,
            "disp:vertical_display_direction",
            ns,
            context,
        )?)?,
    };
    log::debug!(
        "display settings for '{}': horizontal '{}' {}, vertical '{}' {}",
        identifier,
        settings.horizontal_axis_name,
        settings.horizontal_direction,
        settings.vertical_axis_name,
        settings.vertical_direction
    );
    Ok(settings)
}

/// Zero-based position of the axis called `axis_name` in the raw array.
pub fn axis_position(descriptor: &ArrayDescriptor, axis_name: &str) -> Result<usize, Pds4Error> {
    let axis = descriptor.axis(axis_name).ok_or_else(|| Pds4Error::AxisNotFound {
        axis_name: axis_name.to_string(),
    })?;

    axis.sequence_number
        .checked_sub(1)
        .filter(|&position| position < descriptor.rank())
        .ok_or_else(|| Pds4Error::InvalidAxes {
            identifier: descriptor.local_identifier.clone(),
            message: format!(
                "axis '{}' has sequence number {} outside 1..{}",
                axis.name,
                axis.sequence_number,
                descriptor.rank()
            ),
        })
}

/// Rotate and flip `raw` into display orientation.
///
/// Moves the vertical axis to position 0 (other axes keep their relative
/// order), then reverses position 1 for `RightToLeft` and position 0 for
/// `TopToBottom`. The result is always in standard layout.
pub fn orient(
    raw: &RawArray,
    settings: &DisplaySettings,
    descriptor: &ArrayDescriptor,
) -> Result<OrientedArray, Pds4Error> {
    if raw.data.ndim() != descriptor.rank() {
        return Err(Pds4Error::InvalidAxes {
            identifier: descriptor.local_identifier.clone(),
            message: format!(
                "array has {} dimension(s) but the descriptor declares {}",
                raw.data.ndim(),
                descriptor.rank()
            ),
        });
    }

    let vertical_axis = axis_position(descriptor, &settings.vertical_axis_name)?;
    let horizontal_axis = axis_position(descriptor, &settings.horizontal_axis_name)?;
    if vertical_axis == horizontal_axis {
        return Err(Pds4Error::DisplayAxesConflict {
            axis_name: settings.vertical_axis_name.clone(),
        });
    }

    let flip_columns = settings.horizontal_direction == HorizontalDirection::RightToLeft;
    let flip_rows = settings.vertical_direction == VerticalDirection::TopToBottom;

    let data = map_array!(&raw.data, array => reorient(array, vertical_axis, flip_rows, flip_columns));

    Ok(OrientedArray {
        data,
        settings: settings.clone(),
        vertical_axis,
        horizontal_axis,
    })
}

fn reorient<T: Clone>(array: &ArrayD<T>, vertical_axis: usize, flip_rows: bool, flip_columns: bool) -> ArrayD<T> {
    let mut order = Vec::with_capacity(array.ndim());
    order.push(vertical_axis);
    order.extend((0..array.ndim()).filter(|&axis| axis != vertical_axis));

    let mut view = array.view().permuted_axes(order);
    if flip_columns {
        view.invert_axis(Axis(1));
    }
    if flip_rows {
        view.invert_axis(Axis(0));
    }
    view.as_standard_layout().into_owned()
}
