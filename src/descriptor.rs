//! Array descriptor extraction from a PDS4 label.
//!
//! Finds the `Array_2D*` block the caller asked for under
//! `File_Area_Observational` (or its `_Supplemental` sibling) and turns it into a validated
//! [`ArrayDescriptor`]. Anything the reader could misinterpret (axis order,
//! offset units, sequence numbering) is rejected here rather than guessed.

use std::borrow::Cow;
use std::fmt;

use serde::Serialize;

use crate::error::Pds4Error;
use crate::label::{parse_required, required_child, required_text, Element, LabelDocument, NamespaceMap};

/// Array classes accepted as 2D array descriptions.
pub const ARRAY_2D_CLASSES: &[&str] = &["Array_2D", "Array_2D_Image", "Array_2D_Map", "Array_2D_Spectrum"];

/// File-area sections that may hold array descriptions, searched in document order.
pub const FILE_AREA_CLASSES: &[&str] = &["File_Area_Observational", "File_Area_Observational_Supplemental"];

const LAST_INDEX_FASTEST: &str = "Last Index Fastest";

/// One dimension of a stored array.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AxisEntry {
    pub name: String,
    /// 1-based storage position; 1 is the outermost, slowest-varying dimension.
    pub sequence_number: usize,
    pub element_count: usize,
}

/// Storage order declared by `axis_index_order`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub enum AxisIndexOrder {
    LastIndexFastest,
    Other(String),
}

impl AxisIndexOrder {
    fn from_label(raw: &str) -> Self {
        if raw == LAST_INDEX_FASTEST {
            AxisIndexOrder::LastIndexFastest
        } else {
            AxisIndexOrder::Other(raw.to_string())
        }
    }
}

impl fmt::Display for AxisIndexOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AxisIndexOrder::LastIndexFastest => f.write_str(LAST_INDEX_FASTEST),
            AxisIndexOrder::Other(raw) => f.write_str(raw),
        }
    }
}

/// Validated description of one array in a label.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ArrayDescriptor {
    pub local_identifier: String,
    /// Element name of the array block, e.g. `Array_2D_Image`.
    pub array_class: String,
    pub data_type_name: String,
    /// Axes sorted by ascending `sequence_number`.
    pub axes: Vec<AxisEntry>,
    pub axis_index_order: AxisIndexOrder,
    pub byte_offset: u64,
    pub byte_offset_unit: String,
    pub source_file_name: String,
}

impl ArrayDescriptor {
    /// Number of dimensions.
    pub fn rank(&self) -> usize {
        self.axes.len()
    }

    /// Dimension sizes, outermost first.
    pub fn shape(&self) -> Vec<usize> {
        self.axes.iter().map(|axis| axis.element_count).collect()
    }

    /// Total number of elements, or `None` on overflow.
    pub fn element_count(&self) -> Option<usize> {
        self.axes
            .iter()
            .try_fold(1usize, |acc, axis| acc.checked_mul(axis.element_count))
    }

    /// The axis called `name`, if the array has one.
    pub fn axis(&self, name: &str) -> Option<&AxisEntry> {
        self.axes.iter().find(|axis| axis.name == name)
    }
}

/// Locate and validate an array description.
///
/// With no `target_identifier` the label must describe exactly one 2D array.
/// With one, exactly one array's `local_identifier` must match it.
pub fn extract(label: &LabelDocument<'_>, target_identifier: Option<&str>) -> Result<ArrayDescriptor, Pds4Error> {
    let ns = NamespaceMap::pds4();
    let candidates = array_blocks(label, &ns)?;
    log::debug!("found {} 2D array block(s) in label", candidates.len());

    let (file_area, array) = match target_identifier.map(str::trim) {
        None => match candidates.as_slice() {
            [] => return Err(Pds4Error::NoArrays),
            [single] => *single,
            many => {
                return Err(Pds4Error::AmbiguousArray {
                    candidates: many
                        .iter()
                        .map(|(_, array)| {
                            local_identifier_of(*array, &ns).map_or_else(|| "<unnamed>".to_string(), Cow::into_owned)
                        })
                        .collect(),
                })
            }
        },
        Some(target) => {
            let mut matching = candidates
                .iter()
                .filter(|(_, array)| local_identifier_of(*array, &ns).as_deref() == Some(target));
            match (matching.next(), matching.next()) {
                (Some(found), None) => *found,
                _ => {
                    return Err(Pds4Error::ArrayNotFound {
                        identifier: target.to_string(),
                    })
                }
            }
        }
    };

    build_descriptor(file_area, array, &ns)
}

/// Every `(file area, array block)` pair in document order.
fn array_blocks<'a, 'input>(
    label: &'a LabelDocument<'input>,
    ns: &NamespaceMap,
) -> Result<Vec<(Element<'a, 'input>, Element<'a, 'input>)>, Pds4Error> {
    let pds4 = ns.uri("pds4");
    let mut blocks = Vec::new();
    for file_area in label.find_all("pds4:*", ns)? {
        if !FILE_AREA_CLASSES.contains(&file_area.name()) {
            continue;
        }
        for child in file_area.children() {
            if child.namespace() == pds4 && ARRAY_2D_CLASSES.contains(&child.name()) {
                blocks.push((file_area, child));
            }
        }
    }
    Ok(blocks)
}

fn local_identifier_of<'a>(array: Element<'a, '_>, ns: &NamespaceMap) -> Option<Cow<'a, str>> {
    array
        .find_one("pds4:local_identifier", ns)
        .ok()
        .flatten()
        .and_then(|element| element.text())
}

fn build_descriptor(
    file_area: Element<'_, '_>,
    array: Element<'_, '_>,
    ns: &NamespaceMap,
) -> Result<ArrayDescriptor, Pds4Error> {
    let context = format!("<{}>", array.name());

    let local_identifier = required_text(array, "pds4:local_identifier", ns, &context)?.to_string();
    let source_file_name =
        required_text(file_area, "pds4:File/pds4:file_name", ns, &format!("<{}>", file_area.name()))?.to_string();
    let data_type_name = required_text(array, "pds4:Element_Array/pds4:data_type", ns, &context)?.to_string();

    let rank: usize = parse_required(array, "pds4:axes", ns, &context, "non-negative integer")?;
    let axes = read_axes(array, ns, &local_identifier, rank)?;

    let axis_index_order = AxisIndexOrder::from_label(&required_text(array, "pds4:axis_index_order", ns, &context)?);
    if let AxisIndexOrder::Other(actual) = &axis_index_order {
        return Err(Pds4Error::UnsupportedLayout { actual: actual.clone() });
    }

    let offset = required_child(array, "pds4:offset", ns, &context)?;
    let byte_offset_unit = offset.attribute("unit").map(str::trim).unwrap_or_default().to_string();
    if !is_byte_unit(&byte_offset_unit) {
        return Err(Pds4Error::UnsupportedUnit {
            actual: byte_offset_unit,
        });
    }
    let byte_offset: u64 = parse_required(array, "pds4:offset", ns, &context, "non-negative integer")?;

    let descriptor = ArrayDescriptor {
        local_identifier,
        array_class: array.name().to_string(),
        data_type_name,
        axes,
        axis_index_order,
        byte_offset,
        byte_offset_unit,
        source_file_name,
    };
    log::debug!(
        "extracted array '{}' ({}, shape {:?}, offset {})",
        descriptor.local_identifier,
        descriptor.data_type_name,
        descriptor.shape(),
        descriptor.byte_offset
    );
    Ok(descriptor)
}

fn read_axes(
    array: Element<'_, '_>,
    ns: &NamespaceMap,
    identifier: &str,
    rank: usize,
) -> Result<Vec<AxisEntry>, Pds4Error> {
    if rank != 2 {
        return Err(Pds4Error::UnsupportedRank {
            identifier: identifier.to_string(),
            rank,
        });
    }

    let mut axes = Vec::with_capacity(rank);
    for axis in array.find_all("pds4:Axis_Array", ns)? {
        axes.push(AxisEntry {
            name: required_text(axis, "pds4:axis_name", ns, "<Axis_Array>")?.to_string(),
            sequence_number: parse_required(axis, "pds4:sequence_number", ns, "<Axis_Array>", "positive integer")?,
            element_count: parse_required(axis, "pds4:elements", ns, "<Axis_Array>", "positive integer")?,
        });
    }

    let invalid = |message: String| Pds4Error::InvalidAxes {
        identifier: identifier.to_string(),
        message,
    };

    if axes.len() != rank {
        return Err(invalid(format!("<axes> declares {rank} but {} <Axis_Array> found", axes.len())));
    }

    axes.sort_by_key(|axis| axis.sequence_number);
    for (expected, axis) in (1..=rank).zip(&axes) {
        if axis.sequence_number != expected {
            return Err(invalid(format!(
                "sequence numbers must be 1..{rank} without duplicates; axis '{}' has {}",
                axis.name, axis.sequence_number
            )));
        }
        if axis.element_count == 0 {
            return Err(invalid(format!("axis '{}' has zero elements", axis.name)));
        }
    }

    Ok(axes)
}

fn is_byte_unit(unit: &str) -> bool {
    unit.eq_ignore_ascii_case("byte") || unit.eq_ignore_ascii_case("bytes")
}
