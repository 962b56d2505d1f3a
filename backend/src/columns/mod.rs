//! Required input columns and header matching.
//!
//! A raw quiz table must provide six logical columns. Headers are matched
//! case-insensitively after trimming surrounding whitespace, so
//! `" question "` satisfies `Question`. Headers that match no logical column
//! are ignored.

use serde::Serialize;

/// One of the six columns every raw table must provide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum LogicalColumn {
    Question,
    ChoiceA,
    ChoiceB,
    ChoiceC,
    ChoiceD,
    CorrectAnswer,
}

impl LogicalColumn {
    /// All required columns, in their canonical order.
    pub const ALL: [LogicalColumn; 6] = [
        LogicalColumn::Question,
        LogicalColumn::ChoiceA,
        LogicalColumn::ChoiceB,
        LogicalColumn::ChoiceC,
        LogicalColumn::ChoiceD,
        LogicalColumn::CorrectAnswer,
    ];

    /// The four answer-choice columns, in output order.
    pub const CHOICES: [LogicalColumn; 4] = [
        LogicalColumn::ChoiceA,
        LogicalColumn::ChoiceB,
        LogicalColumn::ChoiceC,
        LogicalColumn::ChoiceD,
    ];

    /// Canonical header name, as shown to users.
    pub fn name(self) -> &'static str {
        match self {
            Self::Question => "Question",
            Self::ChoiceA => "answer choice A",
            Self::ChoiceB => "answer choice B",
            Self::ChoiceC => "answer choice C",
            Self::ChoiceD => "answer choice D",
            Self::CorrectAnswer => "Correct Answer",
        }
    }

    /// Whether a supplied header names this column.
    pub fn matches(self, header: &str) -> bool {
        header.trim().to_lowercase() == self.name().to_lowercase()
    }

    fn slot(self) -> usize {
        match self {
            Self::Question => 0,
            Self::ChoiceA => 1,
            Self::ChoiceB => 2,
            Self::ChoiceC => 3,
            Self::ChoiceD => 4,
            Self::CorrectAnswer => 5,
        }
    }
}

impl std::fmt::Display for LogicalColumn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Positions of the supplied headers that match each logical column.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderMatch {
    positions: [Vec<usize>; 6],
}

impl HeaderMatch {
    /// Match a header row against the required columns.
    pub fn new<S: AsRef<str>>(headers: &[S]) -> Self {
        let mut positions: [Vec<usize>; 6] = Default::default();
        for (idx, header) in headers.iter().enumerate() {
            if let Some(column) = LogicalColumn::ALL
                .into_iter()
                .find(|c| c.matches(header.as_ref()))
            {
                positions[column.slot()].push(idx);
            }
        }
        Self { positions }
    }

    /// Every header position matching `column`, in header order.
    pub fn positions(&self, column: LogicalColumn) -> &[usize] {
        &self.positions[column.slot()]
    }

    /// First header position matching `column`.
    pub fn position(&self, column: LogicalColumn) -> Option<usize> {
        self.positions(column).first().copied()
    }

    /// Required columns with no matching header.
    pub fn missing(&self) -> Vec<LogicalColumn> {
        LogicalColumn::ALL
            .into_iter()
            .filter(|c| self.positions(*c).is_empty())
            .collect()
    }

    /// Required columns matched by more than one header.
    pub fn ambiguous(&self) -> Vec<LogicalColumn> {
        LogicalColumn::ALL
            .into_iter()
            .filter(|c| self.positions(*c).len() > 1)
            .collect()
    }
}

/// Human-readable list of the expected columns.
pub fn expected_columns_description() -> String {
    let mut out = String::from("Expected columns:\n");
    for column in LogicalColumn::ALL {
        out.push_str("- ");
        out.push_str(column.name());
        out.push('\n');
    }
    out
}
