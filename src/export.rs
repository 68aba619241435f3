//! Writing oriented arrays out for viewing.
//!
//! `.npy` keeps the declared element type and the display orientation, so
//! `imshow(data, origin="lower")` shows the image the right way up. PNG is a
//! quick-look rendering: values are stretched to 8 bits and rows are written
//! bottom-up, because PNG's origin is the upper-left corner.

use std::path::Path;

use image::GrayImage;
use ndarray::{ArrayD, Axis, Ix2};

use crate::array::{with_array, ArrayData};
use crate::display::OrientedArray;
use crate::error::Pds4Error;

/// Grey ramp used for PNG output.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum ColorMap {
    /// Low values dark, high values bright.
    #[default]
    Gray,
    /// Low values bright, high values dark.
    #[value(name = "gray-r")]
    GrayReversed,
}

/// Output file formats.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExportFormat {
    Npy,
    Png,
}

impl ExportFormat {
    /// Pick the format from a file extension.
    pub fn from_path(path: &Path) -> Result<Self, Pds4Error> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);
        match extension.as_deref() {
            Some("npy") => Ok(ExportFormat::Npy),
            Some("png") => Ok(ExportFormat::Png),
            _ => Err(Pds4Error::UnsupportedFormat(format!(
                "'{}' (supported extensions: .npy, .png)",
                path.display()
            ))),
        }
    }
}

/// Write any array as `.npy`, keeping its element type.
pub fn write_npy(data: &ArrayData, path: &Path) -> Result<(), Pds4Error> {
    with_array!(data, array => ndarray_npy::write_npy(path, array)).map_err(|source| {
        Pds4Error::NpyWrite {
            path: path.to_path_buf(),
            source,
        }
    })
}

/// Render an oriented array as an 8-bit grayscale PNG.
///
/// Row 0 of the oriented array ends up at the bottom of the picture.
pub fn write_png(oriented: &OrientedArray, path: &Path, cmap: ColorMap) -> Result<(), Pds4Error> {
    let picture = render_gray(&oriented.data, cmap)?;
    picture.save(path).map_err(|source| Pds4Error::ImageWrite {
        path: path.to_path_buf(),
        source,
    })?;
    log::info!(
        "wrote {}x{} PNG to {}",
        picture.width(),
        picture.height(),
        path.display()
    );
    Ok(())
}

/// Stretch `data` to 0..=255 and flip it for a top-left origin.
///
/// Non-finite values map to 0, and so does every value of a constant array.
pub fn render_gray(data: &ArrayData, cmap: ColorMap) -> Result<GrayImage, Pds4Error> {
    let values = to_2d(data.to_f64())?;
    let (rows, cols) = values.dim();

    let (lo, hi) = finite_range(values.iter().copied());
    let span = hi - lo;

    let mut pixels = Vec::with_capacity(rows * cols);
    for row in values.axis_iter(Axis(0)).rev() {
        for &value in row {
            let level = if value.is_finite() && span > 0.0 {
                ((value - lo) / span * 255.0).round() as u8
            } else {
                0
            };
            pixels.push(match cmap {
                ColorMap::Gray => level,
                ColorMap::GrayReversed => 255 - level,
            });
        }
    }

    let width = u32::try_from(cols).map_err(|_| too_large(rows, cols))?;
    let height = u32::try_from(rows).map_err(|_| too_large(rows, cols))?;
    GrayImage::from_raw(width, height, pixels).ok_or_else(|| too_large(rows, cols))
}

fn to_2d(values: ArrayD<f64>) -> Result<ndarray::Array2<f64>, Pds4Error> {
    let shape = values.shape().to_vec();
    values
        .into_dimensionality::<Ix2>()
        .map_err(|_| Pds4Error::UnsupportedFormat(format!("PNG needs a 2D array, got shape {shape:?}")))
}

fn too_large(rows: usize, cols: usize) -> Pds4Error {
    Pds4Error::UnsupportedFormat(format!("{cols}x{rows} is too large for a PNG"))
}

/// Minimum and maximum of the finite values; `(0.0, 0.0)` if there are none.
fn finite_range(values: impl Iterator<Item = f64>) -> (f64, f64) {
    values
        .filter(|value| value.is_finite())
        .fold(None, |range: Option<(f64, f64)>, value| match range {
            None => Some((value, value)),
            Some((lo, hi)) => Some((lo.min(value), hi.max(value))),
        })
        .unwrap_or((0.0, 0.0))
}
