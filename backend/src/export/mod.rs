//! Goal table output.
//!
//! The goal CSV is comma-delimited UTF-8 with the header row
//! [`GOAL_HEADERS`] always present, even when there are no records.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::error::ExportResult;
use crate::models::{GoalTable, GOAL_HEADERS};

/// Prefix added to the source file name for converted output.
pub const CONVERTED_PREFIX: &str = "converted_";

/// Write the goal table as CSV.
pub fn write_goal_csv<W: Write>(table: &GoalTable, writer: W) -> ExportResult<()> {
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    csv_writer.write_record(GOAL_HEADERS)?;
    for record in table {
        csv_writer.serialize(record)?;
    }
    csv_writer.flush()?;

    Ok(())
}

/// Render the goal table as a CSV string.
pub fn goal_csv_string(table: &GoalTable) -> ExportResult<String> {
    let mut buf = Vec::new();
    write_goal_csv(table, &mut buf)?;
    Ok(String::from_utf8(buf)?)
}

/// Write the goal table to a CSV file, replacing any existing file.
pub fn write_goal_csv_file(table: &GoalTable, path: &Path) -> ExportResult<()> {
    let file = File::create(path)?;
    write_goal_csv(table, file)
}

/// The first `rows` records of a table.
pub fn preview(table: &GoalTable, rows: usize) -> GoalTable {
    GoalTable {
        records: table.records.iter().take(rows).cloned().collect(),
    }
}

/// Output file name for a converted source file.
pub fn converted_file_name(name: &str) -> String {
    format!("{CONVERTED_PREFIX}{name}")
}
