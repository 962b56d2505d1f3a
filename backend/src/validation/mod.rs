//! Raw table validation.
//!
//! Checks run in a fixed order and stop at the first failure:
//!
//! 1. every required column has a matching header
//! 2. no required column is matched by more than one header
//! 3. every row fills all required cells
//! 4. every row's correct answer equals one of its choices (both trimmed)
//!
//! Row-level checks assume the header checks passed. A rejected table must
//! not be transformed.
//!
//! # Example
//!
//! ```rust,ignore
//! use quizload::{validate, RawTable};
//!
//! let table = RawTable::from_records(headers, records);
//! match validate(&table) {
//!     Ok(()) => println!("Validation successful"),
//!     Err(e) => eprintln!("Validation Error: {e}"),
//! }
//! ```

use crate::columns::{HeaderMatch, LogicalColumn};
use crate::error::{AmbiguousColumn, ValidationError, ValidationResult};
use crate::models::{RawRow, RawTable};

/// Validate a raw table before transformation.
pub fn validate(table: &RawTable) -> ValidationResult<()> {
    check_headers(table.headers())?;

    for row in table.rows() {
        check_required_cells(row)?;
    }
    for row in table.rows() {
        check_answer_in_choices(row)?;
    }

    Ok(())
}

/// Quick yes/no check.
pub fn is_valid(table: &RawTable) -> bool {
    validate(table).is_ok()
}

/// Structural checks on the header row alone.
pub fn check_headers<S: AsRef<str>>(headers: &[S]) -> ValidationResult<()> {
    let matched = HeaderMatch::new(headers);

    let missing = matched.missing();
    if !missing.is_empty() {
        return Err(ValidationError::MissingColumns(
            missing.iter().map(|c| c.name().to_string()).collect(),
        ));
    }

    let ambiguous = matched.ambiguous();
    if !ambiguous.is_empty() {
        return Err(ValidationError::AmbiguousColumns(
            ambiguous
                .into_iter()
                .map(|column| AmbiguousColumn {
                    column: column.name().to_string(),
                    headers: matched
                        .positions(column)
                        .iter()
                        .map(|&pos| headers[pos].as_ref().to_string())
                        .collect(),
                })
                .collect(),
        ));
    }

    Ok(())
}

fn check_required_cells(row: &RawRow) -> ValidationResult<()> {
    let empty: Vec<String> = LogicalColumn::ALL
        .into_iter()
        .filter(|c| row.get(*c).is_none())
        .map(|c| c.name().to_string())
        .collect();

    if empty.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::EmptyCells {
            row: row.number,
            columns: empty,
        })
    }
}

fn check_answer_in_choices(row: &RawRow) -> ValidationResult<()> {
    let answer = row.correct_answer.as_deref().unwrap_or("").trim();
    let found = row
        .choices()
        .iter()
        .flatten()
        .any(|choice| choice.trim() == answer);

    if found {
        Ok(())
    } else {
        Err(ValidationError::AnswerMismatch {
            row: row.number,
            answer: answer.to_string(),
        })
    }
}
