//! Raw review rows → canonical typed reviews.

use serde::{Deserialize, Serialize};

use crate::error::{ChairError, Result};
use crate::model::{Disposition, RawReview, ScoreFields};
use crate::role::{resolve_role, RoleRank};

/// Numeric scores of a normalised review, mirroring [`ScoreFields`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NormalizedScores {
    Unified { score: i64 },
    Split { conference: i64, journal: i64 },
}

/// A review in canonical form, ready for decision and aggregation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedReview {
    pub submission_id: String,
    pub role_rank: RoleRank,
    pub scores: NormalizedScores,
    pub status: Disposition,
    /// `None` when the review table does not collect a track-fit code.
    pub track_fit: Option<i64>,
}

/// Coerce a numeric cell to an integer.
///
/// An empty cell is 0. Anything else must parse as a float; it is rounded to
/// the nearest integer with ties going to the even neighbour. Values beyond
/// the `i64` range saturate at `i64::MIN` or `i64::MAX`.
///
/// # Errors
///
/// Returns [`ChairError::MalformedNumber`] for non-numeric or non-finite text.
pub fn to_int(field: &str, value: &str) -> Result<i64> {
    if value.is_empty() {
        return Ok(0);
    }
    let malformed = || ChairError::MalformedNumber {
        field: field.to_string(),
        value: value.to_string(),
    };
    let parsed: f64 = value.trim().parse().map_err(|_| malformed())?;
    if !parsed.is_finite() {
        return Err(malformed());
    }
    Ok(parsed.round_ties_even() as i64)
}

/// Map an integer recommendation code to a [`Disposition`].
pub fn status_from_code(code: i64) -> Disposition {
    match code {
        c if c < 0 => Disposition::Reject,
        1 => Disposition::Conference,
        c if c > 1 => Disposition::Journal,
        _ => Disposition::Tabled,
    }
}

/// Coerce a recommendation cell straight to a [`Disposition`].
pub fn parse_status(value: &str) -> Result<Disposition> {
    to_int("recommendation", value).map(status_from_code)
}

/// Normalise one raw review row. Pure; out-of-range scores pass through.
pub fn normalize_review(raw: &RawReview) -> Result<NormalizedReview> {
    let scores = match &raw.scores {
        ScoreFields::Unified { score } => NormalizedScores::Unified {
            score: to_int("score", score)?,
        },
        ScoreFields::Split {
            conference,
            journal,
        } => NormalizedScores::Split {
            conference: to_int("conference score", conference)?,
            journal: to_int("journal score", journal)?,
        },
    };
    let track_fit = raw
        .track_fit
        .as_deref()
        .map(|code| to_int("track fit", code))
        .transpose()?;

    Ok(NormalizedReview {
        submission_id: raw.submission_id.clone(),
        role_rank: resolve_role(&raw.role),
        scores,
        status: parse_status(&raw.recommendation)?,
        track_fit,
    })
}

/// Normalise every raw review, stopping at the first malformed row.
pub fn normalize_all<'a>(
    raws: impl IntoIterator<Item = &'a RawReview>,
) -> Result<Vec<NormalizedReview>> {
    raws.into_iter().map(normalize_review).collect()
}
