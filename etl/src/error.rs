//! Error types for the campaign-split pipeline.
//!
//! Every failure aborts the whole run, so each layer has one error enum:
//!
//! - [`CsvError`] - reading and decoding the input file
//! - [`CleanError`] - per-column cleaning rules
//! - [`SplitError`] - integrity of the three projected tables
//! - [`WriteError`] - writing the output files
//! - [`PipelineError`] - top-level orchestration
//!
//! Lower layers convert into [`PipelineError`] via `From`, so `?` works
//! across module boundaries.

use thiserror::Error;

// =============================================================================
// CSV Reading Errors
// =============================================================================

/// Errors while reading the input CSV.
#[derive(Debug, Error)]
pub enum CsvError {
    /// Failed to read file.
    #[error("Failed to read file: {0}")]
    IoError(#[from] std::io::Error),

    /// Content could not be decoded.
    #[error("Failed to decode content: {0}")]
    EncodingError(String),

    /// Empty file.
    #[error("CSV file is empty")]
    EmptyFile,

    /// No headers found.
    #[error("No headers found in CSV")]
    NoHeaders,

    /// One or more expected columns are absent from the header row.
    #[error("Missing input columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    /// A row could not be read or deserialized.
    #[error("Line {line}: {message}")]
    ParseError { line: u64, message: String },
}

// =============================================================================
// Cleaning Errors
// =============================================================================

/// Errors raised by the per-column cleaning rules.
#[derive(Debug, Error, PartialEq)]
pub enum CleanError {
    /// A categorical column holds a token outside its mapping.
    #[error("Line {line}, column '{column}': unmapped value '{value}'")]
    UnmappedValue {
        line: u64,
        column: String,
        value: String,
    },

    /// Month and day do not form a valid calendar date.
    #[error("Line {line}: invalid last contact date '{value}': {message}")]
    InvalidDate {
        line: u64,
        value: String,
        message: String,
    },
}

// =============================================================================
// Split Errors
// =============================================================================

/// Violations of the one-row-per-client invariant across output tables.
#[derive(Debug, Error, PartialEq)]
pub enum SplitError {
    /// A table does not have one row per input row.
    #[error("Table '{table}' has {actual} rows, expected {expected}")]
    RowCountMismatch {
        table: &'static str,
        expected: usize,
        actual: usize,
    },

    /// Tables disagree on the client at a given row.
    #[error("Row {row}: table '{table}' has client_id {actual}, expected {expected}")]
    KeyMismatch {
        table: &'static str,
        row: usize,
        expected: i64,
        actual: i64,
    },

    /// The same client appears on more than one input row.
    #[error("Duplicate client_id {0}")]
    DuplicateClientId(i64),
}

// =============================================================================
// Write Errors
// =============================================================================

/// Errors while writing the output tables.
#[derive(Debug, Error)]
pub enum WriteError {
    /// IO error.
    #[error("Output IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Serialization error.
    #[error("Output CSV error: {0}")]
    CsvError(#[from] csv::Error),

    /// Moving a finished temp file into place failed.
    #[error("Failed to persist output file: {0}")]
    PersistError(#[from] tempfile::PersistError),
}

// =============================================================================
// Pipeline Errors (top-level)
// =============================================================================

/// Top-level pipeline errors.
///
/// This is the error type returned by [`crate::transform::pipeline::run`].
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Input reading error.
    #[error("CSV error: {0}")]
    Csv(#[from] CsvError),

    /// Cleaning error.
    #[error("Clean error: {0}")]
    Clean(#[from] CleanError),

    /// Split integrity error.
    #[error("Split error: {0}")]
    Split(#[from] SplitError),

    /// Output error.
    #[error("Write error: {0}")]
    Write(#[from] WriteError),

    /// Report serialization error.
    #[error("Report error: {0}")]
    Report(#[from] serde_json::Error),
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for input reading.
pub type CsvResult<T> = Result<T, CsvError>;

/// Result type for cleaning.
pub type CleanResult<T> = Result<T, CleanError>;

/// Result type for split checks.
pub type SplitResult<T> = Result<T, SplitError>;

/// Result type for writing outputs.
pub type WriteResult<T> = Result<T, WriteError>;

/// Result type for pipeline operations.
pub type PipelineResult<T> = Result<T, PipelineError>;
