//! Report assembly: one chair-facing record per registry submission.

use serde::{Deserialize, Serialize};

use crate::config::{ReportConfig, StatusStyle};
use crate::decision::{decide_status, sort_by_role};
use crate::error::Result;
use crate::group::{Registry, ReviewGroups};
use crate::model::{Disposition, RawReview, Submission};
use crate::normalize::normalize_all;
use crate::score::{aggregate, SortScore, EXCEPTION_SORT_SCORE, MISSING_REVIEWS_SORT_SCORE};

/// Digest of a submission that received no reviews.
pub const MISSING_REVIEWS_DIGEST: &str = "(Has no reviews and is missing score.)";

/// The chair-facing outcome for a single submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateResult {
    pub submission_id: String,
    pub sort_score: SortScore,
    pub disposition: Disposition,
    pub digest: String,
}

impl AggregateResult {
    /// Disposition text for the status column.
    pub fn status_label(&self, style: StatusStyle) -> &'static str {
        match style {
            StatusStyle::Full => self.disposition.label(),
            StatusStyle::Letter => self.disposition.letter(),
        }
    }
}

/// The complete, registry-ordered set of records for one run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChairReport {
    pub records: Vec<AggregateResult>,
}

impl ChairReport {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of records with the given disposition.
    pub fn count(&self, disposition: Disposition) -> usize {
        self.records
            .iter()
            .filter(|r| r.disposition == disposition)
            .count()
    }

    pub fn get(&self, submission_id: &str) -> Option<&AggregateResult> {
        self.records.iter().find(|r| r.submission_id == submission_id)
    }
}

fn excepted(submission: &Submission, note: &str) -> AggregateResult {
    AggregateResult {
        submission_id: submission.id.clone(),
        sort_score: EXCEPTION_SORT_SCORE,
        disposition: Disposition::Reject,
        digest: format!("Exception: {note}"),
    }
}

fn unreviewed(submission: &Submission) -> AggregateResult {
    AggregateResult {
        submission_id: submission.id.clone(),
        sort_score: MISSING_REVIEWS_SORT_SCORE,
        disposition: Disposition::Tabled,
        digest: MISSING_REVIEWS_DIGEST.to_string(),
    }
}

fn reviewed(
    submission: &Submission,
    raws: &[RawReview],
    config: &ReportConfig,
) -> Result<AggregateResult> {
    let mut reviews = normalize_all(raws)?;
    sort_by_role(&mut reviews);
    let disposition = decide_status(&reviews);
    let summary = aggregate(submission, &reviews, config.averaging)?;

    Ok(AggregateResult {
        submission_id: submission.id.clone(),
        sort_score: summary.sort_score,
        disposition,
        digest: format!("{} bbs: {}", summary.digest, disposition),
    })
}

/// Assemble the chair report in registry order.
///
/// Exceptions take precedence over missing reviews, which take precedence
/// over the consensus and averaging path. Only reviews on that last path are
/// normalised; rows of excepted submissions and of submissions outside the
/// registry are never parsed.
///
/// # Errors
///
/// Returns [`crate::ChairError::MalformedNumber`] when a review of a scored
/// submission has a non-numeric cell.
pub fn assemble_report(
    registry: &Registry,
    mut groups: ReviewGroups,
    config: &ReportConfig,
) -> Result<ChairReport> {
    let mut records = Vec::with_capacity(registry.len());

    for submission in registry {
        let record = if let Some(note) = &submission.exception {
            // Reviews of excepted submissions are dropped unread.
            groups.take(&submission.id);
            excepted(submission, note)
        } else {
            match groups.take(&submission.id) {
                Some(raws) if !raws.is_empty() => reviewed(submission, &raws, config)?,
                _ => unreviewed(submission),
            }
        };
        tracing::trace!(
            submission = %record.submission_id,
            disposition = %record.disposition,
            sort_score = %record.sort_score,
            "assembled record"
        );
        records.push(record);
    }

    let report = ChairReport { records };
    tracing::info!(
        submissions = report.len(),
        journal = report.count(Disposition::Journal),
        conference = report.count(Disposition::Conference),
        tabled = report.count(Disposition::Tabled),
        rejected = report.count(Disposition::Reject),
        "assembled chair report"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ChairError;
    use crate::model::TrackKind;

    const LEAD: &str = "Committee Member (lead)";
    const TERTIARY: &str = "Tertiary Reviewer";

    fn review(id: &str, role: &str, score: &str, recommendation: &str) -> RawReview {
        RawReview::unified(id, role, score, recommendation).with_track_fit("2")
    }

    #[test]
    fn test_exception_wins_over_reviews() {
        let registry = Registry::new(vec![
            Submission::new("P1", TrackKind::DualTrack).with_exception("Withdrawn")
        ]);
        let groups = ReviewGroups::build(
            &registry,
            vec![review("P1", LEAD, "5", "2")],
        );
        let report = assemble_report(&registry, groups, &ReportConfig::default()).unwrap();
        let record = report.get("P1").unwrap();
        assert_eq!(record.sort_score, EXCEPTION_SORT_SCORE);
        assert_eq!(record.disposition, Disposition::Reject);
        assert_eq!(record.digest, "Exception: Withdrawn");
    }

    #[test]
    fn test_missing_reviews_record() {
        let registry = Registry::new(vec![Submission::new("P4", TrackKind::JournalOnly)]);
        let groups = ReviewGroups::build(&registry, Vec::new());
        let report = assemble_report(&registry, groups, &ReportConfig::default()).unwrap();
        let record = &report.records[0];
        assert_eq!(record.sort_score, MISSING_REVIEWS_SORT_SCORE);
        assert_eq!(record.disposition, Disposition::Tabled);
        assert_eq!(record.digest, MISSING_REVIEWS_DIGEST);
    }

    #[test]
    fn test_reviewed_digest_is_role_ordered() {
        let registry = Registry::new(vec![Submission::new("P5", TrackKind::DualTrack)]);
        let groups = ReviewGroups::build(
            &registry,
            vec![
                review("P5", TERTIARY, "-1", "-1"),
                review("P5", LEAD, "5", "2"),
            ],
        );
        let report = assemble_report(&registry, groups, &ReportConfig::default()).unwrap();
        let record = &report.records[0];
        assert!(record.digest.starts_with("[A!, r]"), "{}", record.digest);
        assert_eq!(record.digest, "[A!, r] {j, j} bbs: Tabled");
        assert_eq!(record.sort_score.value(), 2.0);
    }

    #[test]
    fn test_status_label_styles() {
        let record = AggregateResult {
            submission_id: "P1".to_string(),
            sort_score: SortScore::rounded(1.0),
            disposition: Disposition::Conference,
            digest: String::new(),
        };
        assert_eq!(record.status_label(StatusStyle::Full), "Conference");
        assert_eq!(record.status_label(StatusStyle::Letter), "C");
    }

    #[test]
    fn test_unknown_submissions_are_not_emitted() {
        let registry = Registry::new(vec![Submission::new("P1", TrackKind::DualTrack)]);
        let groups = ReviewGroups::build(
            &registry,
            vec![
                review("P1", LEAD, "1", "1"),
                review("ghost", LEAD, "1", "1"),
            ],
        );
        let report = assemble_report(&registry, groups, &ReportConfig::default()).unwrap();
        assert_eq!(report.len(), 1);
        assert!(report.get("ghost").is_none());
    }

    #[test]
    fn test_excepted_reviews_are_not_parsed() {
        let registry = Registry::new(vec![
            Submission::new("P1", TrackKind::DualTrack).with_exception("Withdrawn")
        ]);
        let groups = ReviewGroups::build(&registry, vec![review("P1", LEAD, "n/a", "?")]);
        let report = assemble_report(&registry, groups, &ReportConfig::default()).unwrap();
        assert_eq!(report.records[0].sort_score, EXCEPTION_SORT_SCORE);
    }

    #[test]
    fn test_malformed_review_of_scored_submission_is_fatal() {
        let registry = Registry::new(vec![Submission::new("P1", TrackKind::DualTrack)]);
        let groups = ReviewGroups::build(&registry, vec![review("P1", LEAD, "five", "2")]);
        let err = assemble_report(&registry, groups, &ReportConfig::default()).unwrap_err();
        assert!(matches!(err, ChairError::MalformedNumber { ref value, .. } if value == "five"));
    }
}
