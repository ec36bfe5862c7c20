//! Report configuration threaded explicitly into the assembler.

use serde::{Deserialize, Serialize};

/// Which score population is averaged for dual-track submissions when the
/// review table carries separate conference and journal scores.
///
/// Has no effect on unified-score tables or journal-only submissions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrackAveraging {
    /// Average conference and journal scores together.
    #[default]
    Both,
    /// Average conference scores only.
    ConferenceOnly,
}

/// How dispositions are rendered in the status column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusStyle {
    /// `Reject`, `Tabled`, `Conference`, `Journal`.
    #[default]
    Full,
    /// `R`, `T`, `C`, `J`.
    Letter,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportConfig {
    pub averaging: TrackAveraging,
    pub status_style: StatusStyle,
}

impl ReportConfig {
    pub fn with_averaging(mut self, averaging: TrackAveraging) -> Self {
        self.averaging = averaging;
        self
    }

    pub fn with_status_style(mut self, status_style: StatusStyle) -> Self {
        self.status_style = status_style;
        self
    }
}
