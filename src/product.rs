//! End-to-end read of a PDS4 2D image product.
//!
//! [`read_image`] parses the label, extracts the array descriptor, reads the
//! data file that sits next to the label, and orients the result for display.
//! The label is dropped once orientation is resolved; everything returned is
//! owned by the caller.

use std::path::{Path, PathBuf};

use crate::descriptor::{self, ArrayDescriptor};
use crate::display::{self, DisplaySettings, OrientedArray};
use crate::error::Pds4Error;
use crate::label::{self, LabelDocument};
use crate::reader::{self, RawArray};

/// Options for a single read.
#[derive(Clone, Debug, Default)]
pub struct ReadOptions {
    /// `local_identifier` of the array to read. Required when the label
    /// describes more than one 2D array.
    pub array_identifier: Option<String>,
}

impl ReadOptions {
    pub fn with_array(identifier: impl Into<String>) -> Self {
        Self {
            array_identifier: Some(identifier.into()),
        }
    }
}

/// A PDS4 2D image read from disk.
#[derive(Clone, Debug)]
pub struct Pds4Image {
    pub label_path: PathBuf,
    pub descriptor: ArrayDescriptor,
    pub settings: DisplaySettings,
    /// The array in storage order.
    pub raw: RawArray,
    /// The array in display order (lower-left origin).
    pub oriented: OrientedArray,
}

/// Read and orient the image described by the label at `label_path`.
pub fn read_image(label_path: &Path, opts: &ReadOptions) -> Result<Pds4Image, Pds4Error> {
    let text = label::read_label_text(label_path)?;
    let label = LabelDocument::parse_from(&text, label_path)?;
    let base_directory = label_path.parent().unwrap_or_else(|| Path::new(""));

    let descriptor = descriptor::extract(&label, opts.array_identifier.as_deref())?;
    let raw = reader::read_array(&descriptor, base_directory)?;
    let settings = display::resolve_display_settings(&label, &descriptor)?;
    let oriented = display::orient(&raw, &settings, &descriptor)?;

    log::info!(
        "read '{}' from {}: {:?} {:?}",
        descriptor.local_identifier,
        label_path.display(),
        raw.data.element_type(),
        raw.shape()
    );

    Ok(Pds4Image {
        label_path: label_path.to_path_buf(),
        descriptor,
        settings,
        raw,
        oriented,
    })
}
