//! # Quizload - quiz question CSV conversion
//!
//! Quizload turns "raw" quiz CSV files (one question per row, four answer
//! choice columns and a correct-answer column) into the "goal" layout used
//! for bulk import: generated ids, fixed category/type/status fields,
//! pipe-delimited options, menu ordering and cleaned question text.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │   CSV File  │────▶│   Parser    │────▶│  Validator  │────▶│ Transformer │────▶ Goal CSV
//! │  (ISO/UTF8) │     │  (auto-enc) │     │ (all-or-no) │     │ (ids+order) │
//! └─────────────┘     └─────────────┘     └─────────────┘     └─────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use quizload::{convert_file, rng_from_seed, goal_csv_string, ConversionOptions};
//!
//! let options = ConversionOptions::default();
//! let result = convert_file("questions.csv".as_ref(), &options, &mut rng_from_seed(None))?;
//! print!("{}", goal_csv_string(&result.table)?);
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Error types
//! - [`columns`] - Required columns and header matching
//! - [`models`] - Raw and goal records, conversion parameters
//! - [`parser`] - CSV parsing with auto-detection
//! - [`validation`] - Raw table validation
//! - [`transform`] - Text cleaning, record mapping and pipeline
//! - [`export`] - Goal CSV output
//! - [`logs`] - Progress log broadcasting

// Core modules
pub mod columns;
pub mod error;
pub mod models;

// Parsing
pub mod parser;

// Validation
pub mod validation;

// Transformation
pub mod transform;

// Output
pub mod export;

// Progress logs
pub mod logs;

// =============================================================================
// Re-exports - Error types
// =============================================================================

pub use error::{
    AmbiguousColumn, CsvError, ErrorKind, ExportError, PipelineError, ValidationError,
};

// =============================================================================
// Re-exports - Models
// =============================================================================

pub use columns::{expected_columns_description, HeaderMatch, LogicalColumn};
pub use models::{
    ConversionParameters, GoalRecord, GoalTable, PostStatus, QuestionType, RawRow, RawTable,
    DEFAULT_CATEGORY, GOAL_HEADERS,
};

// =============================================================================
// Re-exports - Parsing
// =============================================================================

pub use parser::{
    decode_content, detect_delimiter, detect_encoding, format_delimiter, parse_bytes_auto,
    parse_bytes_with, parse_csv, parse_csv_file_auto, parse_csv_file_with, parse_str, ParseResult,
};

// =============================================================================
// Re-exports - Validation
// =============================================================================

pub use validation::{check_headers, is_valid, validate};

// =============================================================================
// Re-exports - Transformation
// =============================================================================

pub use transform::{
    clean_question_text, convert_batch, convert_bytes, convert_file, convert_table, draw_id_base,
    rng_from_seed, transform, transform_with_base, validate_file, BatchReport, Conversion,
    ConversionOptions, CsvInfo, FileOutcome, ID_RANGE,
};

// =============================================================================
// Re-exports - Output
// =============================================================================

pub use export::{
    converted_file_name, goal_csv_string, preview, write_goal_csv, write_goal_csv_file,
};

// =============================================================================
// Re-exports - Logs
// =============================================================================

pub use logs::{LogBroadcaster, LogEntry, LogLevel, LOG_BROADCASTER};
