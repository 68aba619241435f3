//! PDS4 element data types and how to decode them.
//!
//! The table is closed: supporting another encoding means adding a row to
//! [`DATA_TYPES`], never touching the call sites.

use serde::Serialize;

use crate::error::Pds4Error;

use Endianness::{Big, Little};
use NumericKind::{Float, SignedInt, UnsignedInt};

/// Byte order of a stored element.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Endianness {
    Big,
    Little,
}

/// Numeric interpretation of a stored element.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NumericKind {
    Float,
    SignedInt,
    UnsignedInt,
}

/// How to turn raw bytes into one array element.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct DecodeSpec {
    pub byte_width: usize,
    pub endianness: Endianness,
    pub numeric_kind: NumericKind,
}

impl DecodeSpec {
    const fn new(byte_width: usize, endianness: Endianness, numeric_kind: NumericKind) -> Self {
        Self {
            byte_width,
            endianness,
            numeric_kind,
        }
    }
}

/// PDS4 `data_type` names and their decode specs.
///
/// Single-byte types are listed as big-endian; byte order does not apply to them.
pub const DATA_TYPES: &[(&str, DecodeSpec)] = &[
    ("IEEE754MSBSingle", DecodeSpec::new(4, Big, Float)),
    ("IEEE754MSBDouble", DecodeSpec::new(8, Big, Float)),
    ("IEEE754LSBSingle", DecodeSpec::new(4, Little, Float)),
    ("IEEE754LSBDouble", DecodeSpec::new(8, Little, Float)),
    ("SignedByte", DecodeSpec::new(1, Big, SignedInt)),
    ("UnsignedByte", DecodeSpec::new(1, Big, UnsignedInt)),
    ("SignedMSB2", DecodeSpec::new(2, Big, SignedInt)),
    ("SignedMSB4", DecodeSpec::new(4, Big, SignedInt)),
    ("SignedMSB8", DecodeSpec::new(8, Big, SignedInt)),
    ("SignedLSB2", DecodeSpec::new(2, Little, SignedInt)),
    ("SignedLSB4", DecodeSpec::new(4, Little, SignedInt)),
    ("SignedLSB8", DecodeSpec::new(8, Little, SignedInt)),
    ("UnsignedMSB2", DecodeSpec::new(2, Big, UnsignedInt)),
    ("UnsignedMSB4", DecodeSpec::new(4, Big, UnsignedInt)),
    ("UnsignedMSB8", DecodeSpec::new(8, Big, UnsignedInt)),
    ("UnsignedLSB2", DecodeSpec::new(2, Little, UnsignedInt)),
    ("UnsignedLSB4", DecodeSpec::new(4, Little, UnsignedInt)),
    ("UnsignedLSB8", DecodeSpec::new(8, Little, UnsignedInt)),
];

/// Look up the decode spec for a PDS4 `data_type` name.
pub fn resolve(type_name: &str) -> Result<DecodeSpec, Pds4Error> {
    let type_name = type_name.trim();
    DATA_TYPES
        .iter()
        .find(|(name, _)| *name == type_name)
        .map(|(_, spec)| *spec)
        .ok_or_else(|| Pds4Error::UnsupportedType {
            type_name: type_name.to_string(),
        })
}

/// Names of every supported data type, in table order.
pub fn supported_types() -> impl Iterator<Item = &'static str> {
    DATA_TYPES.iter().map(|(name, _)| *name)
}
