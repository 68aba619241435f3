//! Typed n-dimensional array storage.
//!
//! Decoded arrays keep exactly the element type the label declares, so
//! [`ArrayData`] carries one `ndarray::ArrayD` per supported element type.

use ndarray::ArrayD;
use serde::Serialize;

/// An array whose element type matches the declared PDS4 data type.
#[derive(Clone, Debug, PartialEq)]
pub enum ArrayData {
    U8(ArrayD<u8>),
    I8(ArrayD<i8>),
    U16(ArrayD<u16>),
    I16(ArrayD<i16>),
    U32(ArrayD<u32>),
    I32(ArrayD<i32>),
    U64(ArrayD<u64>),
    I64(ArrayD<i64>),
    F32(ArrayD<f32>),
    F64(ArrayD<f64>),
}

/// Apply the same expression to whichever array an [`ArrayData`] holds.
macro_rules! with_array {
    ($data:expr, $array:ident => $body:expr) => {
        match $data {
            ArrayData::U8($array) => $body,
            ArrayData::I8($array) => $body,
            ArrayData::U16($array) => $body,
            ArrayData::I16($array) => $body,
            ArrayData::U32($array) => $body,
            ArrayData::I32($array) => $body,
            ArrayData::U64($array) => $body,
            ArrayData::I64($array) => $body,
            ArrayData::F32($array) => $body,
            ArrayData::F64($array) => $body,
        }
    };
}

/// Like [`with_array!`], but rewraps the resulting array in the same variant.
macro_rules! map_array {
    ($data:expr, $array:ident => $body:expr) => {
        match $data {
            ArrayData::U8($array) => ArrayData::U8($body),
            ArrayData::I8($array) => ArrayData::I8($body),
            ArrayData::U16($array) => ArrayData::U16($body),
            ArrayData::I16($array) => ArrayData::I16($body),
            ArrayData::U32($array) => ArrayData::U32($body),
            ArrayData::I32($array) => ArrayData::I32($body),
            ArrayData::U64($array) => ArrayData::U64($body),
            ArrayData::I64($array) => ArrayData::I64($body),
            ArrayData::F32($array) => ArrayData::F32($body),
            ArrayData::F64($array) => ArrayData::F64($body),
        }
    };
}

pub(crate) use map_array;
pub(crate) use with_array;

/// Element type names as reported in inspection output.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementType {
    U8,
    I8,
    U16,
    I16,
    U32,
    I32,
    U64,
    I64,
    F32,
    F64,
}

impl ArrayData {
    /// Dimension sizes, outermost first.
    pub fn shape(&self) -> &[usize] {
        with_array!(self, array => array.shape())
    }

    /// Number of dimensions.
    pub fn ndim(&self) -> usize {
        with_array!(self, array => array.ndim())
    }

    /// Total number of elements.
    pub fn len(&self) -> usize {
        with_array!(self, array => array.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn element_type(&self) -> ElementType {
        match self {
            ArrayData::U8(_) => ElementType::U8,
            ArrayData::I8(_) => ElementType::I8,
            ArrayData::U16(_) => ElementType::U16,
            ArrayData::I16(_) => ElementType::I16,
            ArrayData::U32(_) => ElementType::U32,
            ArrayData::I32(_) => ElementType::I32,
            ArrayData::U64(_) => ElementType::U64,
            ArrayData::I64(_) => ElementType::I64,
            ArrayData::F32(_) => ElementType::F32,
            ArrayData::F64(_) => ElementType::F64,
        }
    }

    /// Widen every element to `f64`, for statistics and rendering.
    ///
    /// 64-bit integers beyond 2^53 lose precision here; the stored data does not.
    pub fn to_f64(&self) -> ArrayD<f64> {
        with_array!(self, array => array.mapv(|value| value as f64))
    }

    /// The data as `f32`, if that is the declared element type.
    pub fn as_f32(&self) -> Option<&ArrayD<f32>> {
        match self {
            ArrayData::F32(array) => Some(array),
            _ => None,
        }
    }
}
