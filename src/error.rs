//! Error types for loading expression tables and computing statistics

use thiserror::Error;

/// Request-level failures raised by the statistical core.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StatsError {
    #[error("unknown gene '{gene}'")]
    UnknownGene { gene: String },

    #[error("gene '{gene}' has no recorded values")]
    EmptySequence { gene: String },

    #[error("top-N must be a positive count, got {requested}")]
    InvalidTopN { requested: i64 },

    #[error("no candidate genes to rank")]
    EmptyCandidateSet,

    #[error("threshold must be a finite number, got {value}")]
    InvalidThreshold { value: f64 },

    #[error("no samples are labelled '{label}'")]
    EmptyGroup { label: String },
}

/// Failures while building a [`GeneTable`](crate::data::GeneTable).
#[derive(Error, Debug)]
pub enum DataError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid header: {reason}")]
    InvalidHeader { reason: String },

    #[error("Empty gene name in column {column}")]
    EmptyGeneName { column: usize },

    #[error("Duplicate gene name '{gene}'")]
    DuplicateGene { gene: String },

    #[error("Row {row} has {got} fields, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        got: usize,
    },

    #[error("Row {row}, gene '{gene}': invalid value '{value}'")]
    InvalidValue {
        row: usize,
        gene: String,
        value: String,
    },

    #[error("Dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: String, got: String },

    #[error("Empty data: {reason}")]
    EmptyData { reason: String },
}

/// Result alias for the statistical core.
pub type Result<T> = std::result::Result<T, StatsError>;
