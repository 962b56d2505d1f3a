//! High-level conversion API.
//!
//! Combines parsing, validation and transformation, and handles batches of
//! files. A table that fails validation is never transformed.
//!
//! # Example
//!
//! ```rust,ignore
//! use quizload::{convert_file, rng_from_seed, ConversionOptions};
//! use std::path::Path;
//!
//! let options = ConversionOptions::default();
//! let mut rng = rng_from_seed(options.seed);
//! let result = convert_file(Path::new("questions.csv"), &options, &mut rng)?;
//! println!("Converted {} questions", result.table.len());
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use super::executor::transform;
use crate::error::PipelineResult;
use crate::export::{converted_file_name, preview, write_goal_csv_file};
use crate::logs::{
    log_error, log_error_indent, log_info, log_info_indent, log_success, log_warning,
};
use crate::models::{ConversionParameters, GoalTable, RawTable};
use crate::parser::{format_delimiter, parse_bytes_with, parse_csv_file_with, ParseResult};
use crate::validation::validate;

/// Options for the conversion pipeline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConversionOptions {
    /// Category and id settings applied to every record.
    pub params: ConversionParameters,

    /// Seed for the id base; `None` draws from OS entropy.
    pub seed: Option<u64>,

    /// Force a delimiter instead of detecting it.
    pub delimiter: Option<char>,

    /// Number of rows shown in previews.
    pub preview_rows: usize,
}

impl Default for ConversionOptions {
    fn default() -> Self {
        Self {
            params: ConversionParameters::default(),
            seed: None,
            delimiter: None,
            preview_rows: 5,
        }
    }
}

/// CSV file information
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CsvInfo {
    pub encoding: String,
    pub delimiter: char,
    pub headers: Vec<String>,
    pub row_count: usize,
}

/// Result of converting one source table
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Conversion {
    pub table: GoalTable,
    pub csv_info: CsvInfo,
    /// Raw rows dropped because their question was empty.
    pub skipped_rows: usize,
    /// The first `preview_rows` source rows as read.
    pub input_preview: RawTable,
}

impl Conversion {
    /// The first `rows` converted records.
    pub fn preview(&self, rows: usize) -> GoalTable {
        preview(&self.table, rows)
    }
}

/// Random source for id bases: seeded when `seed` is given.
pub fn rng_from_seed(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// Validate a raw table and, if it passes, transform it.
///
/// The table has already been decoded, so `csv_info` reports `utf-8` and
/// the forced delimiter (`,` when none is set). File and byte entry points
/// fill in what was detected.
pub fn convert_table<R: Rng + ?Sized>(
    table: &RawTable,
    options: &ConversionOptions,
    rng: &mut R,
) -> PipelineResult<Conversion> {
    log_info("✔️  Validating...");
    if let Err(e) = validate(table) {
        log_error(e.to_string());
        return Err(e.into());
    }
    log_success("Validation successful");
    if table.is_empty() {
        log_warning("No question rows found");
    }

    log_info("⚙️  Converting...");
    let goal = transform(table, &options.params, rng);
    let skipped_rows = table.len() - goal.len();
    log_success(format!("Converted {} questions", goal.len()));
    if skipped_rows > 0 {
        log_warning(format!("{} rows skipped (empty question)", skipped_rows));
    }

    Ok(Conversion {
        table: goal,
        csv_info: CsvInfo {
            encoding: "utf-8".to_string(),
            delimiter: options.delimiter.unwrap_or(','),
            headers: table.headers().to_vec(),
            row_count: table.len(),
        },
        skipped_rows,
        input_preview: table.preview(options.preview_rows),
    })
}

/// Convert a CSV file.
pub fn convert_file<R: Rng + ?Sized>(
    path: &Path,
    options: &ConversionOptions,
    rng: &mut R,
) -> PipelineResult<Conversion> {
    log_info(format!("📖 Reading {}", path.display()));
    let parse_result = parse_csv_file_with(path, options.delimiter)?;
    convert_parsed(parse_result, options, rng)
}

/// Convert CSV bytes.
pub fn convert_bytes<R: Rng + ?Sized>(
    bytes: &[u8],
    options: &ConversionOptions,
    rng: &mut R,
) -> PipelineResult<Conversion> {
    let parse_result = parse_bytes_with(bytes, options.delimiter)?;
    convert_parsed(parse_result, options, rng)
}

/// Parse and validate a CSV file without transforming it.
pub fn validate_file(path: &Path, delimiter: Option<char>) -> PipelineResult<CsvInfo> {
    let parse_result = parse_csv_file_with(path, delimiter)?;
    let csv_info = csv_info(&parse_result);
    validate(&parse_result.table)?;
    Ok(csv_info)
}

fn csv_info(parse_result: &ParseResult) -> CsvInfo {
    CsvInfo {
        encoding: parse_result.encoding.clone(),
        delimiter: parse_result.delimiter,
        headers: parse_result.table.headers().to_vec(),
        row_count: parse_result.table.len(),
    }
}

fn convert_parsed<R: Rng + ?Sized>(
    parse_result: ParseResult,
    options: &ConversionOptions,
    rng: &mut R,
) -> PipelineResult<Conversion> {
    let csv_info = csv_info(&parse_result);
    log_success(format!("Detected encoding: {}", csv_info.encoding));
    log_success(format!("Detected separator: '{}'", format_delimiter(csv_info.delimiter)));
    log_success(format!("Read {} rows", csv_info.row_count));
    log_info(format!("📋 Columns: {}", csv_info.headers.join(", ")));

    let mut conversion = convert_table(&parse_result.table, options, rng)?;
    conversion.csv_info = csv_info;
    Ok(conversion)
}

// =============================================================================
// Batch conversion
// =============================================================================

/// Outcome for a single file of a batch
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum FileOutcome {
    #[serde(rename_all = "camelCase")]
    Converted {
        input: String,
        output: String,
        records: usize,
        skipped_rows: usize,
    },
    #[serde(rename_all = "camelCase")]
    Failed { input: String, error: String },
}

impl FileOutcome {
    pub fn is_converted(&self) -> bool {
        matches!(self, FileOutcome::Converted { .. })
    }
}

/// Summary of a batch, one outcome per input in input order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchReport {
    pub outcomes: Vec<FileOutcome>,
}

impl BatchReport {
    pub fn converted(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_converted()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.converted()
    }

    pub fn all_converted(&self) -> bool {
        self.failed() == 0
    }
}

/// Convert several files into `out_dir`.
///
/// Files are independent: a file that fails to parse or validate is recorded
/// and the batch moves on. Each table draws its own id base from one random
/// source seeded from `options.seed`. Output goes to
/// `out_dir/converted_<file name>`.
pub fn convert_batch(
    inputs: &[PathBuf],
    out_dir: &Path,
    options: &ConversionOptions,
) -> PipelineResult<BatchReport> {
    fs::create_dir_all(out_dir)?;
    let mut rng = rng_from_seed(options.seed);
    let mut report = BatchReport::default();

    log_info(format!("📦 Converting {} files into {}", inputs.len(), out_dir.display()));

    for input in inputs {
        let name = input
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "questions.csv".to_string());
        let output = out_dir.join(converted_file_name(&name));

        let outcome = match convert_file(input, options, &mut rng).and_then(|conversion| {
            write_goal_csv_file(&conversion.table, &output)?;
            Ok(conversion)
        }) {
            Ok(conversion) => {
                log_info_indent(format!("{} → {}", name, output.display()), 1);
                FileOutcome::Converted {
                    input: input.display().to_string(),
                    output: output.display().to_string(),
                    records: conversion.table.len(),
                    skipped_rows: conversion.skipped_rows,
                }
            }
            Err(e) => {
                log_error_indent(format!("{}: {}", name, e), 1);
                FileOutcome::Failed {
                    input: input.display().to_string(),
                    error: e.to_string(),
                }
            }
        };
        report.outcomes.push(outcome);
    }

    if report.all_converted() {
        log_success(format!("All {} files converted", report.converted()));
    } else {
        log_warning(format!(
            "{} converted, {} failed",
            report.converted(),
            report.failed()
        ));
    }

    Ok(report)
}
