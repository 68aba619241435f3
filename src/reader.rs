//! Raw binary array reader.
//!
//! Reads exactly the bytes an [`ArrayDescriptor`] declares from its data
//! file and decodes them with the registry's [`DecodeSpec`]. The result is a
//! standard-layout array in storage order: the axis with sequence number 1
//! is the outermost dimension.

use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};

use byteorder::{BigEndian, ByteOrder, LittleEndian};
use ndarray::{ArrayD, IxDyn};

use crate::array::ArrayData;
use crate::descriptor::ArrayDescriptor;
use crate::error::Pds4Error;
use crate::registry::{self, DecodeSpec, Endianness, NumericKind};

/// A decoded array in storage order.
#[derive(Clone, Debug, PartialEq)]
pub struct RawArray {
    pub data: ArrayData,
}

impl RawArray {
    /// Dimension sizes, outermost first.
    pub fn shape(&self) -> &[usize] {
        self.data.shape()
    }
}

/// Read the array described by `descriptor`.
///
/// The data file name is resolved relative to `base_directory` (normally the
/// label's own directory). The file is closed before this returns.
pub fn read_array(descriptor: &ArrayDescriptor, base_directory: &Path) -> Result<RawArray, Pds4Error> {
    let path = base_directory.join(&descriptor.source_file_name);
    let spec = registry::resolve(&descriptor.data_type_name)?;
    let shape = descriptor.shape();
    let expected = byte_len(descriptor, &spec)?;

    let bytes = read_exact_at(&path, descriptor.byte_offset, expected)?;
    log::debug!(
        "read {} bytes from {} at offset {}",
        bytes.len(),
        path.display(),
        descriptor.byte_offset
    );

    let data = decode_bytes(&spec, &bytes, &shape).map_err(|message| Pds4Error::InvalidAxes {
        identifier: descriptor.local_identifier.clone(),
        message,
    })?;
    Ok(RawArray { data })
}

fn byte_len(descriptor: &ArrayDescriptor, spec: &DecodeSpec) -> Result<u64, Pds4Error> {
    descriptor
        .element_count()
        .and_then(|count| count.checked_mul(spec.byte_width))
        .map(|len| len as u64)
        .ok_or_else(|| Pds4Error::InvalidAxes {
            identifier: descriptor.local_identifier.clone(),
            message: format!("array size {:?} overflows addressable memory", descriptor.shape()),
        })
}

fn read_exact_at(path: &Path, offset: u64, expected: u64) -> Result<Vec<u8>, Pds4Error> {
    let data_file_error = |source: std::io::Error| Pds4Error::DataFile {
        path: path.to_path_buf(),
        source,
    };

    let mut file = File::open(path).map_err(data_file_error)?;
    let available = file.metadata().map_err(data_file_error)?.len().saturating_sub(offset);
    file.seek(SeekFrom::Start(offset)).map_err(data_file_error)?;

    // Sized by what the file can supply, not by what the label claims.
    let mut bytes = Vec::with_capacity(expected.min(available) as usize);
    file.take(expected)
        .read_to_end(&mut bytes)
        .map_err(data_file_error)?;

    let actual = bytes.len() as u64;
    if actual < expected {
        return Err(Pds4Error::ShortRead {
            path: PathBuf::from(path),
            expected,
            actual,
        });
    }
    Ok(bytes)
}

/// Decode `bytes` into an array of `shape`.
///
/// `bytes` must hold exactly `product(shape) * spec.byte_width` bytes; the
/// error message explains any mismatch.
pub fn decode_bytes(spec: &DecodeSpec, bytes: &[u8], shape: &[usize]) -> Result<ArrayData, String> {
    let count: usize = shape.iter().product();
    if count.checked_mul(spec.byte_width) != Some(bytes.len()) {
        return Err(format!(
            "{} bytes cannot hold shape {:?} of {}-byte elements",
            bytes.len(),
            shape,
            spec.byte_width
        ));
    }

    match spec.endianness {
        Endianness::Big => decode_with::<BigEndian>(spec, bytes, shape),
        Endianness::Little => decode_with::<LittleEndian>(spec, bytes, shape),
    }
}

fn decode_with<B: ByteOrder>(spec: &DecodeSpec, bytes: &[u8], shape: &[usize]) -> Result<ArrayData, String> {
    let count = bytes.len() / spec.byte_width;
    let data = match (spec.numeric_kind, spec.byte_width) {
        (NumericKind::UnsignedInt, 1) => ArrayData::U8(shaped(shape, bytes.to_vec())?),
        (NumericKind::SignedInt, 1) => {
            ArrayData::I8(shaped(shape, bytes.iter().map(|&b| b as i8).collect())?)
        }
        (NumericKind::UnsignedInt, 2) => ArrayData::U16(shaped(shape, fill(count, bytes, B::read_u16_into))?),
        (NumericKind::SignedInt, 2) => ArrayData::I16(shaped(shape, fill(count, bytes, B::read_i16_into))?),
        (NumericKind::UnsignedInt, 4) => ArrayData::U32(shaped(shape, fill(count, bytes, B::read_u32_into))?),
        (NumericKind::SignedInt, 4) => ArrayData::I32(shaped(shape, fill(count, bytes, B::read_i32_into))?),
        (NumericKind::UnsignedInt, 8) => ArrayData::U64(shaped(shape, fill(count, bytes, B::read_u64_into))?),
        (NumericKind::SignedInt, 8) => ArrayData::I64(shaped(shape, fill(count, bytes, B::read_i64_into))?),
        (NumericKind::Float, 4) => ArrayData::F32(shaped(shape, fill(count, bytes, B::read_f32_into))?),
        (NumericKind::Float, 8) => ArrayData::F64(shaped(shape, fill(count, bytes, B::read_f64_into))?),
        (kind, width) => return Err(format!("no decoder for {width}-byte {kind:?} elements")),
    };
    Ok(data)
}

fn fill<T: Default + Clone>(count: usize, bytes: &[u8], read_into: fn(&[u8], &mut [T])) -> Vec<T> {
    let mut values = vec![T::default(); count];
    read_into(bytes, &mut values);
    values
}

fn shaped<T>(shape: &[usize], values: Vec<T>) -> Result<ArrayD<T>, String> {
    ArrayD::from_shape_vec(IxDyn(shape), values).map_err(|err| err.to_string())
}
