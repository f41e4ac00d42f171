use lloyd_core::LloydError;
use thiserror::Error;

/// Errors raised while reading or writing tabular data. Every malformed
/// record is rejected here, before any vector reaches the engine.
#[derive(Error, Debug)]
pub enum IngestError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Input has no header row")]
    MissingHeader,

    #[error("Header has an identifier column but no coordinate columns")]
    NoCoordinates,

    #[error("Row {row}: expected {expected} fields, found {found}")]
    RowWidth {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("Row {row}, column '{column}': cannot parse '{value}' as a number")]
    ParseFloat {
        row: usize,
        column: String,
        value: String,
    },

    #[error("Row {row}, column '{column}': value is not finite")]
    NonFinite { row: usize, column: String },

    #[error("{0} assignments for {1} rows")]
    AssignmentCount(usize, usize),

    #[error(transparent)]
    Dataset(#[from] LloydError),
}
