//! Error types shared by the dataset, model and trainer layers.

use crate::dataset::ColumnType;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by ingestion, transforms and training.
///
/// Transform operations that do not apply to a column's type are *not*
/// errors: they are logged and skipped. Likewise a field that fails to parse
/// during ingestion is coerced to the type's zero value and only reported
/// through [`IngestReport`](crate::dataset::IngestReport).
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Ingestion was attempted before any column was registered.
    #[error("no schema: register at least one column before loading data")]
    NoSchema,

    /// Malformed delimited input (ragged rows, broken quoting).
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A record is too short for a registered column's position.
    #[error("record {row} has no field at index {index}")]
    MissingField { row: usize, index: usize },

    /// I/O error while opening or reading a source.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// No column with this name is registered.
    #[error("unknown column: {0}")]
    UnknownColumn(String),

    /// No column occupies this index.
    #[error("unknown column index: {0}")]
    UnknownColumnIndex(usize),

    /// A column with this name already exists.
    #[error("duplicate column name: {0}")]
    DuplicateColumn(String),

    /// A column already occupies this index.
    #[error("duplicate column index: {0}")]
    DuplicateIndex(usize),

    /// A computed cell does not match the column's declared type.
    #[error("type mismatch in column {column}: expected {expected}, got {got}")]
    TypeMismatch {
        column: String,
        expected: ColumnType,
        got: String,
    },

    /// Normalization reference is zero or not numeric.
    #[error("cannot normalize column {column}: reference scalar is zero or undefined")]
    UndefinedScalar { column: String },

    /// Parameter vector and feature vector lengths disagree.
    #[error("feature mismatch: expected {expected} features, got {got}")]
    FeatureMismatch { expected: usize, got: usize },

    /// Training or loss evaluation over an empty sample set.
    #[error("sample set is empty")]
    EmptySamples,

    /// Feature matrix and label vector disagree on row count.
    #[error("shape mismatch: {rows} feature rows but {labels} labels")]
    ShapeMismatch { rows: usize, labels: usize },

    /// Invalid trainer configuration.
    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
}
