//! Submission registry and per-submission review grouping.

use std::collections::{BTreeSet, HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::model::{RawReview, Submission, TrackKind};

/// Ordered registry of every known submission.
///
/// Registry order is the output order of the chair report.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registry {
    submissions: Vec<Submission>,
}

impl Registry {
    pub fn new(submissions: Vec<Submission>) -> Self {
        Self { submissions }
    }

    /// Derive a registry from review submission ids, for review tables that
    /// come without a submissions table.
    ///
    /// Ids are deduplicated and sorted lexicographically. Every derived
    /// submission is dual-track and carries no exception.
    pub fn from_review_ids<'a>(ids: impl IntoIterator<Item = &'a str>) -> Self {
        let ids: BTreeSet<&str> = ids.into_iter().collect();
        Self {
            submissions: ids
                .into_iter()
                .map(|id| Submission::new(id, TrackKind::DualTrack))
                .collect(),
        }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Submission> {
        self.submissions.iter()
    }

    pub fn len(&self) -> usize {
        self.submissions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.submissions.is_empty()
    }

    pub fn dual_track_count(&self) -> usize {
        self.submissions.iter().filter(|s| s.track.is_dual()).count()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.submissions.iter().any(|s| s.id == id)
    }
}

impl<'a> IntoIterator for &'a Registry {
    type Item = &'a Submission;
    type IntoIter = std::slice::Iter<'a, Submission>;

    fn into_iter(self) -> Self::IntoIter {
        self.submissions.iter()
    }
}

/// Raw review rows partitioned by submission id.
///
/// Built once by an explicit pass over all reviews; lookups never create
/// entries. Within a group, reviews keep their input order. Rows are not
/// normalised here, so cells of excepted or unknown submissions are never
/// parsed.
#[derive(Debug, Clone, Default)]
pub struct ReviewGroups {
    groups: HashMap<String, Vec<RawReview>>,
    unreviewed: Vec<String>,
    unknown: Vec<String>,
}

impl ReviewGroups {
    /// Group `reviews` by submission id against `registry`.
    pub fn build(registry: &Registry, reviews: impl IntoIterator<Item = RawReview>) -> Self {
        let known: HashSet<&str> = registry.iter().map(|s| s.id.as_str()).collect();
        let mut groups: HashMap<String, Vec<RawReview>> = HashMap::new();
        let mut unknown = Vec::new();

        for review in reviews {
            if !known.contains(review.submission_id.as_str())
                && !groups.contains_key(&review.submission_id)
            {
                unknown.push(review.submission_id.clone());
            }
            groups
                .entry(review.submission_id.clone())
                .or_default()
                .push(review);
        }

        let unreviewed = registry
            .iter()
            .filter(|s| !groups.contains_key(&s.id))
            .map(|s| s.id.clone())
            .collect();

        tracing::debug!(
            groups = groups.len(),
            unknown = unknown.len(),
            "grouped reviews by submission"
        );

        Self {
            groups,
            unreviewed,
            unknown,
        }
    }

    /// Reviews for `id` in input order, if any were submitted.
    pub fn get(&self, id: &str) -> Option<&[RawReview]> {
        self.groups.get(id).map(Vec::as_slice)
    }

    /// Remove and return the reviews for `id`.
    pub fn take(&mut self, id: &str) -> Option<Vec<RawReview>> {
        self.groups.remove(id)
    }

    /// Number of distinct submission ids that received reviews.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Registry ids without a single review, in registry order.
    pub fn unreviewed(&self) -> &[String] {
        &self.unreviewed
    }

    /// Review ids absent from the registry, in first-seen order.
    pub fn unknown(&self) -> &[String] {
        &self.unknown
    }
}
