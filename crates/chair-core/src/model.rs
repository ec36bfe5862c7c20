//! Domain types shared by every stage of the engine.

use serde::{Deserialize, Serialize};

/// Which publication tracks a submission is eligible for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrackKind {
    /// Eligible for either conference or journal publication.
    DualTrack,
    /// Evaluated solely on journal suitability.
    JournalOnly,
}

impl TrackKind {
    pub fn is_dual(self) -> bool {
        matches!(self, Self::DualTrack)
    }
}

/// A submission from the registry of all known submissions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submission {
    pub id: String,
    pub track: TrackKind,
    /// Withdrawal or exclusion note. Presence short-circuits aggregation.
    pub exception: Option<String>,
}

impl Submission {
    pub fn new(id: impl Into<String>, track: TrackKind) -> Self {
        Self {
            id: id.into(),
            track,
            exception: None,
        }
    }

    /// Attach an exception note (builder pattern).
    pub fn with_exception(mut self, note: impl Into<String>) -> Self {
        self.exception = Some(note.into());
        self
    }
}

/// Raw score cells of a review row.
///
/// Review tables come in two shapes: one unified score column, or separate
/// conference and journal score columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScoreFields {
    Unified { score: String },
    Split { conference: String, journal: String },
}

/// One review row exactly as read from the review table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawReview {
    pub submission_id: String,
    pub role: String,
    pub scores: ScoreFields,
    /// Final recommendation code cell.
    pub recommendation: String,
    /// Conference/journal fit code cell, only collected for dual-track venues.
    pub track_fit: Option<String>,
    /// Carried through but not consumed by aggregation.
    pub expertise: Option<String>,
    /// Carried through but not consumed by aggregation.
    pub top_percentile: Option<String>,
}

impl RawReview {
    /// Review row with a single unified score column.
    pub fn unified(
        submission_id: impl Into<String>,
        role: impl Into<String>,
        score: impl Into<String>,
        recommendation: impl Into<String>,
    ) -> Self {
        Self {
            submission_id: submission_id.into(),
            role: role.into(),
            scores: ScoreFields::Unified {
                score: score.into(),
            },
            recommendation: recommendation.into(),
            track_fit: None,
            expertise: None,
            top_percentile: None,
        }
    }

    /// Review row with separate conference and journal score columns.
    pub fn split(
        submission_id: impl Into<String>,
        role: impl Into<String>,
        conference: impl Into<String>,
        journal: impl Into<String>,
        recommendation: impl Into<String>,
    ) -> Self {
        Self {
            submission_id: submission_id.into(),
            role: role.into(),
            scores: ScoreFields::Split {
                conference: conference.into(),
                journal: journal.into(),
            },
            recommendation: recommendation.into(),
            track_fit: None,
            expertise: None,
            top_percentile: None,
        }
    }

    pub fn with_track_fit(mut self, code: impl Into<String>) -> Self {
        self.track_fit = Some(code.into());
        self
    }
}

/// Categorical outcome assigned to a submission.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Disposition {
    Reject,
    /// Deferred to the chair. Also the fallback whenever consensus is absent.
    #[default]
    Tabled,
    Conference,
    Journal,
}

impl Disposition {
    /// Short-form letter used by compact report variants.
    pub fn letter(self) -> &'static str {
        match self {
            Self::Reject => "R",
            Self::Tabled => "T",
            Self::Conference => "C",
            Self::Journal => "J",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Reject => "Reject",
            Self::Tabled => "Tabled",
            Self::Conference => "Conference",
            Self::Journal => "Journal",
        }
    }
}

impl std::fmt::Display for Disposition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disposition_default_is_tabled() {
        assert_eq!(Disposition::default(), Disposition::Tabled);
    }

    #[test]
    fn test_disposition_labels_and_letters() {
        let all = [
            (Disposition::Reject, "Reject", "R"),
            (Disposition::Tabled, "Tabled", "T"),
            (Disposition::Conference, "Conference", "C"),
            (Disposition::Journal, "Journal", "J"),
        ];
        for (d, label, letter) in all {
            assert_eq!(d.to_string(), label);
            assert_eq!(d.letter(), letter);
        }
    }

    #[test]
    fn test_submission_builder() {
        let sub = Submission::new("P2", TrackKind::JournalOnly).with_exception("Withdrawn");
        assert_eq!(sub.exception.as_deref(), Some("Withdrawn"));
        assert!(!sub.track.is_dual());
    }

    #[test]
    fn test_raw_review_serde_tagged_scores() {
        let raw = RawReview::split("P1", "Member", "3", "5", "2");
        let json = serde_json::to_value(&raw).unwrap();
        assert_eq!(json["scores"]["kind"], "split");
        let back: RawReview = serde_json::from_value(json).unwrap();
        assert_eq!(raw, back);
    }
}
