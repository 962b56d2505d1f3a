//! Error types for the quiz conversion pipeline.
//!
//! - [`CsvError`] - CSV reading and decoding errors
//! - [`ValidationError`] - a raw table was rejected before transformation
//! - [`ExportError`] - writing the goal CSV failed
//! - [`PipelineError`] - top-level orchestration errors
//!
//! Error conversion is automatic via `From` implementations,
//! allowing `?` to work across error boundaries.

use std::fmt;

use thiserror::Error;

// =============================================================================
// CSV Parsing Errors
// =============================================================================

/// Errors during CSV parsing.
#[derive(Debug, Error)]
pub enum CsvError {
    /// Failed to read file.
    #[error("Failed to read file: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to decode the file content.
    #[error("Failed to decode content: {0}")]
    Encoding(String),

    /// Malformed CSV record.
    #[error("Invalid CSV format at line {line}: {message}")]
    Parse { line: u64, message: String },

    /// Empty file.
    #[error("CSV file is empty")]
    EmptyFile,

    /// No headers found.
    #[error("No headers found in CSV")]
    NoHeaders,
}

impl From<csv::Error> for CsvError {
    fn from(err: csv::Error) -> Self {
        let line = err.position().map(|p| p.line()).unwrap_or(0);
        CsvError::Parse {
            line,
            message: err.to_string(),
        }
    }
}

// =============================================================================
// Validation Errors
// =============================================================================

/// Which part of the table a validation failure is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The header does not describe the required columns.
    Structural,
    /// A data row is incomplete or inconsistent.
    Content,
}

/// A logical column matched by more than one supplied header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AmbiguousColumn {
    pub column: String,
    pub headers: Vec<String>,
}

impl fmt::Display for AmbiguousColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let headers: Vec<String> = self.headers.iter().map(|h| format!("{h:?}")).collect();
        write!(f, "{} (headers {})", self.column, headers.join(", "))
    }
}

/// Reasons a raw table is rejected. The message is meant for the end user.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// One or more required columns have no matching header.
    #[error("Missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    /// A required column is matched by several headers.
    #[error("Ambiguous columns: {}", join_display(.0))]
    AmbiguousColumns(Vec<AmbiguousColumn>),

    /// A row leaves at least one required cell empty.
    #[error("Row {row} contains empty cells in required columns: {}", .columns.join(", "))]
    EmptyCells { row: usize, columns: Vec<String> },

    /// The correct answer is not one of the row's answer choices.
    #[error("Row {row}: correct answer {answer:?} does not match any answer choice")]
    AnswerMismatch { row: usize, answer: String },
}

impl ValidationError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingColumns(_) | Self::AmbiguousColumns(_) => ErrorKind::Structural,
            Self::EmptyCells { .. } | Self::AnswerMismatch { .. } => ErrorKind::Content,
        }
    }

    /// 1-based row number of the offending row, for content errors.
    pub fn row(&self) -> Option<usize> {
        match self {
            Self::EmptyCells { row, .. } | Self::AnswerMismatch { row, .. } => Some(*row),
            _ => None,
        }
    }
}

fn join_display<T: fmt::Display>(items: &[T]) -> String {
    items
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

// =============================================================================
// Export Errors
// =============================================================================

/// Errors while writing the goal CSV.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("CSV write error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Output IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Output is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

// =============================================================================
// Pipeline Errors (top-level)
// =============================================================================

/// Top-level pipeline orchestration errors.
///
/// This is the error type returned by [`crate::transform::pipeline`].
#[derive(Debug, Error)]
pub enum PipelineError {
    /// CSV parsing error.
    #[error("CSV error: {0}")]
    Csv(#[from] CsvError),

    /// The table was rejected; the inner message is shown as is.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Writing the converted table failed.
    #[error("Export error: {0}")]
    Export(#[from] ExportError),

    /// Filesystem error outside of parsing/exporting.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for CSV operations.
pub type CsvResult<T> = Result<T, CsvError>;

/// Result type for validation.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Result type for export operations.
pub type ExportResult<T> = Result<T, ExportError>;

/// Result type for pipeline operations.
pub type PipelineResult<T> = Result<T, PipelineError>;
