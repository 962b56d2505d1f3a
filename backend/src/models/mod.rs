//! Domain models for the quiz conversion pipeline.
//!
//! - [`RawRow`] / [`RawTable`] - one question per row, as read from the source CSV
//! - [`GoalRecord`] / [`GoalTable`] - records in the bulk-import format
//! - [`ConversionParameters`] - per-batch settings supplied by the caller

use serde::{Deserialize, Serialize};

use crate::columns::{HeaderMatch, LogicalColumn};

/// Category used when the caller does not supply one.
pub const DEFAULT_CATEGORY: &str = "366524 Exam Questions";

// =============================================================================
// Raw format
// =============================================================================

/// One input question. A field is `None` when its cell is absent or blank.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RawRow {
    /// 1-based data row number (header excluded).
    pub number: usize,
    pub question: Option<String>,
    pub choice_a: Option<String>,
    pub choice_b: Option<String>,
    pub choice_c: Option<String>,
    pub choice_d: Option<String>,
    pub correct_answer: Option<String>,
}

impl RawRow {
    /// Value of a logical column.
    pub fn get(&self, column: LogicalColumn) -> Option<&str> {
        match column {
            LogicalColumn::Question => self.question.as_deref(),
            LogicalColumn::ChoiceA => self.choice_a.as_deref(),
            LogicalColumn::ChoiceB => self.choice_b.as_deref(),
            LogicalColumn::ChoiceC => self.choice_c.as_deref(),
            LogicalColumn::ChoiceD => self.choice_d.as_deref(),
            LogicalColumn::CorrectAnswer => self.correct_answer.as_deref(),
        }
    }

    /// The four answer choices in A, B, C, D order.
    pub fn choices(&self) -> [Option<&str>; 4] {
        LogicalColumn::CHOICES.map(|c| self.get(c))
    }
}

/// A parsed raw table: the header as supplied plus its typed rows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RawTable {
    headers: Vec<String>,
    rows: Vec<RawRow>,
}

impl RawTable {
    /// Build a table from a header row and untyped records.
    ///
    /// Each logical column is read from the first header that matches it;
    /// headers matching nothing are dropped.
    pub fn from_records<I, R, S>(headers: Vec<String>, records: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: AsRef<[S]>,
        S: AsRef<str>,
    {
        let matched = HeaderMatch::new(&headers);
        let rows = records
            .into_iter()
            .enumerate()
            .map(|(idx, record)| {
                let record = record.as_ref();
                let cell = |column: LogicalColumn| {
                    matched
                        .position(column)
                        .and_then(|pos| record.get(pos))
                        .map(|s| s.as_ref())
                        .filter(|s: &&str| !s.trim().is_empty())
                        .map(String::from)
                };
                RawRow {
                    number: idx + 1,
                    question: cell(LogicalColumn::Question),
                    choice_a: cell(LogicalColumn::ChoiceA),
                    choice_b: cell(LogicalColumn::ChoiceB),
                    choice_c: cell(LogicalColumn::ChoiceC),
                    choice_d: cell(LogicalColumn::ChoiceD),
                    correct_answer: cell(LogicalColumn::CorrectAnswer),
                }
            })
            .collect();

        Self { headers, rows }
    }

    /// Header names exactly as supplied.
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[RawRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The first `rows` rows under the full header, for showing what was read.
    pub fn preview(&self, rows: usize) -> RawTable {
        RawTable {
            headers: self.headers.clone(),
            rows: self.rows.iter().take(rows).cloned().collect(),
        }
    }
}

// =============================================================================
// Goal format
// =============================================================================

/// Question type understood by the import system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QuestionType {
    SingleChoice,
}

/// Publication status understood by the import system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    Publish,
}

/// One output record. Field order matches the goal CSV column order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoalRecord {
    /// `None` when identifiers are blanked.
    #[serde(rename = "ID")]
    pub id: Option<u64>,
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Category")]
    pub category: String,
    #[serde(rename = "Type")]
    pub kind: QuestionType,
    #[serde(rename = "Post Content")]
    pub post_content: String,
    #[serde(rename = "Status")]
    pub status: PostStatus,
    #[serde(rename = "Menu Order")]
    pub menu_order: usize,
    #[serde(rename = "Options")]
    pub options: String,
    #[serde(rename = "Answer")]
    pub answer: String,
}

/// Goal CSV header, in output order.
pub const GOAL_HEADERS: [&str; 9] = [
    "ID",
    "Title",
    "Category",
    "Type",
    "Post Content",
    "Status",
    "Menu Order",
    "Options",
    "Answer",
];

/// Converted records, in the order of the surviving raw rows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GoalTable {
    pub records: Vec<GoalRecord>,
}

impl GoalTable {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, GoalRecord> {
        self.records.iter()
    }
}

impl<'a> IntoIterator for &'a GoalTable {
    type Item = &'a GoalRecord;
    type IntoIter = std::slice::Iter<'a, GoalRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

// =============================================================================
// Parameters
// =============================================================================

/// Per-batch conversion settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversionParameters {
    /// Written verbatim into every record's category.
    pub category: String,
    /// Emit an empty ID column instead of generated identifiers.
    #[serde(default)]
    pub blank_ids: bool,
}

impl Default for ConversionParameters {
    fn default() -> Self {
        Self {
            category: DEFAULT_CATEGORY.to_string(),
            blank_ids: false,
        }
    }
}
