//! Column layouts of the submission and review tables.
//!
//! Review tables come in two flavours:
//!
//! | Schema    | Columns                                                                          |
//! |-----------|----------------------------------------------------------------------------------|
//! | `split`   | Submission ID, Role, Conference Score, Journal Score, Expertise, Final Recommendation |
//! | `unified` | Submission ID, Role, Score, Conf/Journal Rec, Expertise, Final Recommendation, Top 10% |
//!
//! The submissions table is
//! `Submission ID, Thumbnail URL, Title, Area, Dual Track, Abstract[, Exception]`.
//!
//! Cells beyond the end of a short row read as empty.

use std::str::FromStr;

use chair_core::{RawReview, Registry, ScoreFields, Submission, TrackKind};
use serde::{Deserialize, Serialize};

use crate::error::{Result, TableError};

/// Layout of the review table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewSchema {
    /// Separate conference and journal score columns.
    #[default]
    Split,
    /// One score column plus a conference/journal fit code.
    Unified,
}

impl FromStr for ReviewSchema {
    type Err = TableError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "split" => Ok(Self::Split),
            "unified" => Ok(Self::Unified),
            other => Err(TableError::UnknownOption {
                kind: "review schema",
                value: other.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for ReviewSchema {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Split => write!(f, "split"),
            Self::Unified => write!(f, "unified"),
        }
    }
}

/// Column positions in the submissions table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryLayout {
    pub id_column: usize,
    pub track_column: usize,
    /// Cell value marking a dual-track submission. Anything else is journal-only.
    pub dual_literal: String,
    /// Optional exception note column. Empty cells mean no exception.
    pub exception_column: Option<usize>,
}

impl Default for RegistryLayout {
    fn default() -> Self {
        Self {
            id_column: 0,
            track_column: 4,
            dual_literal: "yes".to_string(),
            exception_column: Some(6),
        }
    }
}

impl RegistryLayout {
    pub fn with_exception_column(mut self, column: Option<usize>) -> Self {
        self.exception_column = column;
        self
    }
}

fn cell(row: &[String], column: usize) -> &str {
    row.get(column).map(String::as_str).unwrap_or("")
}

fn optional_cell(row: &[String], column: usize) -> Option<String> {
    row.get(column).cloned()
}

fn required_cell<'a>(
    table: &'static str,
    index: usize,
    row: &'a [String],
    column: usize,
) -> Result<&'a str> {
    row.get(column)
        .map(String::as_str)
        .ok_or(TableError::MissingColumn {
            table,
            // 1-based, counting the discarded header
            row: index + 2,
            column,
        })
}

/// Build the submission registry from data rows (header already dropped).
pub fn registry_from_rows(rows: &[Vec<String>], layout: &RegistryLayout) -> Result<Registry> {
    let mut submissions = Vec::with_capacity(rows.len());
    for (index, row) in rows.iter().enumerate() {
        let id = required_cell("submissions", index, row, layout.id_column)?;
        let track = if cell(row, layout.track_column) == layout.dual_literal {
            TrackKind::DualTrack
        } else {
            TrackKind::JournalOnly
        };
        let mut submission = Submission::new(id, track);
        if let Some(column) = layout.exception_column {
            let note = cell(row, column);
            if !note.is_empty() {
                submission = submission.with_exception(note);
            }
        }
        submissions.push(submission);
    }
    Ok(Registry::new(submissions))
}

/// Map data rows of the review table to raw reviews (header already dropped).
pub fn reviews_from_rows(rows: &[Vec<String>], schema: ReviewSchema) -> Result<Vec<RawReview>> {
    rows.iter()
        .enumerate()
        .map(|(index, row)| review_from_row(index, row, schema))
        .collect()
}

fn review_from_row(index: usize, row: &[String], schema: ReviewSchema) -> Result<RawReview> {
    let submission_id = required_cell("reviews", index, row, 0)?.to_string();
    let role = cell(row, 1).to_string();

    let review = match schema {
        ReviewSchema::Split => RawReview {
            submission_id,
            role,
            scores: ScoreFields::Split {
                conference: cell(row, 2).to_string(),
                journal: cell(row, 3).to_string(),
            },
            recommendation: cell(row, 5).to_string(),
            track_fit: None,
            expertise: optional_cell(row, 4),
            top_percentile: None,
        },
        ReviewSchema::Unified => RawReview {
            submission_id,
            role,
            scores: ScoreFields::Unified {
                score: cell(row, 2).to_string(),
            },
            recommendation: cell(row, 5).to_string(),
            track_fit: Some(cell(row, 3).to_string()),
            expertise: optional_cell(row, 4),
            top_percentile: optional_cell(row, 6),
        },
    };
    Ok(review)
}
