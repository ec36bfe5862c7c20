//! Track-aware score averaging and symbolic score digests.

use serde::{Deserialize, Serialize};

use crate::config::TrackAveraging;
use crate::error::{ChairError, Result};
use crate::model::{Submission, TrackKind};
use crate::normalize::{NormalizedReview, NormalizedScores};

/// Sort score of an assembled record, rounded to three decimal places.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SortScore(f64);

/// Sort score of a withdrawn or excluded submission.
///
/// Lower than [`MISSING_REVIEWS_SORT_SCORE`] and every computed score.
pub const EXCEPTION_SORT_SCORE: SortScore = SortScore(-7.0);

/// Sort score of a submission without any review.
///
/// Above [`EXCEPTION_SORT_SCORE`], below the lowest computable score (-5).
pub const MISSING_REVIEWS_SORT_SCORE: SortScore = SortScore(-6.0);

impl SortScore {
    /// Round `value` to three decimal places, ties to even.
    pub fn rounded(value: f64) -> Self {
        Self((value * 1000.0).round_ties_even() / 1000.0)
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

impl std::fmt::Display for SortScore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.0.fract() == 0.0 {
            write!(f, "{:.1}", self.0)
        } else {
            write!(f, "{}", self.0)
        }
    }
}

/// Symbolic code for a review score. `R!` and `A!` are emphasised by
/// downstream displays.
pub fn score_code(score: i64) -> &'static str {
    match score {
        -5 => "R!",
        -3 => "R",
        -1 => "r",
        1 => "a",
        3 => "A",
        5 => "A!",
        _ => "?",
    }
}

/// Symbolic code for a conference/journal fit recommendation.
pub fn track_fit_code(code: i64) -> &'static str {
    match code {
        c if c < 0 => "x",
        1 => "c",
        c if c > 1 => "j",
        _ => "?",
    }
}

fn join_codes(codes: impl IntoIterator<Item = &'static str>) -> String {
    codes.into_iter().collect::<Vec<_>>().join(", ")
}

/// Render scores as `{leader}[c1, c2, ...]`.
pub fn format_score_list(leader: &str, scores: &[i64]) -> String {
    format!(
        "{leader}[{}]",
        join_codes(scores.iter().map(|s| score_code(*s)))
    )
}

/// Render track-fit codes as `{c1, c2, ...}`. Absent codes render as `?`.
pub fn format_track_fit_list(codes: &[Option<i64>]) -> String {
    format!(
        "{{{}}}",
        join_codes(codes.iter().map(|c| c.map_or("?", track_fit_code)))
    )
}

/// Arithmetic mean rounded to three places. `None` for an empty slice.
///
/// The sum is accumulated in `i128`, so saturated `i64` scores cannot
/// overflow it.
pub fn mean_score(scores: &[i64]) -> Option<SortScore> {
    if scores.is_empty() {
        return None;
    }
    let sum: i128 = scores.iter().map(|&s| i128::from(s)).sum();
    Some(SortScore::rounded(sum as f64 / scores.len() as f64))
}

/// Sort score and score digest of one submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreSummary {
    pub sort_score: SortScore,
    pub digest: String,
}

/// Per-column view of a review list.
///
/// The column layout follows the first review. A unified score read in a
/// split layout counts towards both columns; a split review read in a
/// unified layout contributes its journal score.
struct ScoreColumns {
    split: bool,
    conference: Vec<i64>,
    journal: Vec<i64>,
    unified: Vec<i64>,
    track_fit: Vec<Option<i64>>,
}

impl ScoreColumns {
    fn collect(reviews: &[NormalizedReview]) -> Self {
        let split = matches!(
            reviews.first().map(|r| r.scores),
            Some(NormalizedScores::Split { .. })
        );
        let mut columns = Self {
            split,
            conference: Vec::with_capacity(reviews.len()),
            journal: Vec::with_capacity(reviews.len()),
            unified: Vec::with_capacity(reviews.len()),
            track_fit: Vec::with_capacity(reviews.len()),
        };
        for review in reviews {
            match review.scores {
                NormalizedScores::Unified { score } => {
                    columns.conference.push(score);
                    columns.journal.push(score);
                    columns.unified.push(score);
                }
                NormalizedScores::Split {
                    conference,
                    journal,
                } => {
                    columns.conference.push(conference);
                    columns.journal.push(journal);
                    columns.unified.push(journal);
                }
            }
            columns.track_fit.push(review.track_fit);
        }
        columns
    }

    fn averaged(&self, track: TrackKind, averaging: TrackAveraging) -> Vec<i64> {
        if !self.split {
            return self.unified.clone();
        }
        match (track, averaging) {
            (TrackKind::JournalOnly, _) => self.journal.clone(),
            (TrackKind::DualTrack, TrackAveraging::ConferenceOnly) => self.conference.clone(),
            (TrackKind::DualTrack, TrackAveraging::Both) => {
                let mut all = self.conference.clone();
                all.extend_from_slice(&self.journal);
                all
            }
        }
    }

    fn digest(&self, track: TrackKind) -> String {
        match (self.split, track) {
            (true, TrackKind::DualTrack) => format!(
                "{} {}",
                format_score_list("c", &self.conference),
                format_score_list("j", &self.journal)
            ),
            (true, TrackKind::JournalOnly) => {
                format!("{} (journal only)", format_score_list("j", &self.journal))
            }
            (false, TrackKind::DualTrack) => format!(
                "{} {}",
                format_score_list("", &self.unified),
                format_track_fit_list(&self.track_fit)
            ),
            (false, TrackKind::JournalOnly) => {
                format!("{} (journal only)", format_score_list("", &self.unified))
            }
        }
    }
}

/// Compute the sort score and digest for a submission's role-sorted reviews.
///
/// Empty score cells have already been coerced to 0 and count towards the
/// mean like any other score.
///
/// # Errors
///
/// Returns [`ChairError::EmptyReviewList`] when `sorted` is empty.
pub fn aggregate(
    submission: &Submission,
    sorted: &[NormalizedReview],
    averaging: TrackAveraging,
) -> Result<ScoreSummary> {
    let columns = ScoreColumns::collect(sorted);
    let sort_score = mean_score(&columns.averaged(submission.track, averaging)).ok_or_else(
        || ChairError::EmptyReviewList {
            submission_id: submission.id.clone(),
        },
    )?;

    Ok(ScoreSummary {
        sort_score,
        digest: columns.digest(submission.track),
    })
}
