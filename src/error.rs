use std::path::PathBuf;
use thiserror::Error;

/// The main error type for pds4view operations.
///
/// Every variant carries the offending value so callers can surface it
/// verbatim. None of them are recoverable within a single read.
#[derive(Debug, Error)]
pub enum Pds4Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to read label {path}: {source}")]
    LabelRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse label {path}: {message}")]
    LabelParse { path: PathBuf, message: String },

    #[error("Missing <{element}> in {context}")]
    MissingElement { element: String, context: String },

    #[error("Invalid <{element}> value '{value}' in {context}; expected {expected}")]
    InvalidValue {
        element: String,
        value: String,
        context: String,
        expected: &'static str,
    },

    #[error("Unknown namespace prefix '{0}' in label query")]
    UnknownNamespacePrefix(String),

    #[error("No 2D array found in label")]
    NoArrays,

    #[error("Multiple 2D arrays found in label ({}); select one by identifier", .candidates.join(", "))]
    AmbiguousArray { candidates: Vec<String> },

    #[error("Array with local_identifier '{identifier}' not found (or not unique)")]
    ArrayNotFound { identifier: String },

    #[error("Unsupported array rank {rank} for '{identifier}' (only 2D arrays are supported)")]
    UnsupportedRank { identifier: String, rank: usize },

    #[error("Invalid axes for '{identifier}': {message}")]
    InvalidAxes { identifier: String, message: String },

    #[error("Unsupported axis_index_order '{actual}' (expected 'Last Index Fastest')")]
    UnsupportedLayout { actual: String },

    #[error("Unsupported offset unit '{actual}' (expected 'byte')")]
    UnsupportedUnit { actual: String },

    #[error("Unsupported data_type '{type_name}'")]
    UnsupportedType { type_name: String },

    #[error("Failed to read data file {path}: {source}")]
    DataFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Short read from {path}: expected {expected} bytes, got {actual}")]
    ShortRead {
        path: PathBuf,
        expected: u64,
        actual: u64,
    },

    #[error("Display_Settings for local_identifier '{identifier}' not found")]
    DisplaySettingsNotFound { identifier: String },

    #[error("Display axis '{axis_name}' not found among the array's Axis_Array entries")]
    AxisNotFound { axis_name: String },

    #[error("Horizontal and vertical display axes both name '{axis_name}'")]
    DisplayAxesConflict { axis_name: String },

    #[error("Unsupported display direction '{value}'")]
    UnsupportedDirection { value: String },

    #[error("Failed to write NPY to {path}: {source}")]
    NpyWrite {
        path: PathBuf,
        #[source]
        source: ndarray_npy::WriteNpyError,
    },

    #[error("Failed to write image to {path}: {source}")]
    ImageWrite {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Failed to serialize report: {0}")]
    ReportSerialize(#[source] serde_json::Error),

    #[error("{failed} of {total} label(s) could not be read")]
    BatchFailed { failed: usize, total: usize },

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}
