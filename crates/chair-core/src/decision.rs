//! Primary/secondary consensus gate.
//!
//! A submission only receives an automatic disposition when its primary
//! (rank 1) and secondary (rank 2) reviewers recommend the same outcome.
//! Every other combination is tabled for the chair.

use crate::model::Disposition;
use crate::normalize::NormalizedReview;
use crate::role::RoleRank;

/// Stable sort by role rank. Reviewers sharing a rank keep input order.
pub fn sort_by_role(reviews: &mut [NormalizedReview]) {
    reviews.sort_by_key(|r| r.role_rank);
}

fn first_at_rank(reviews: &[NormalizedReview], rank: RoleRank) -> Option<&NormalizedReview> {
    reviews.iter().find(|r| r.role_rank == rank)
}

/// Derive the disposition of a submission from its role-sorted reviews.
///
/// Only the first review at rank 1 and the first at rank 2 are consulted.
pub fn decide_status(sorted: &[NormalizedReview]) -> Disposition {
    let primary = first_at_rank(sorted, RoleRank::PRIMARY);
    let secondary = first_at_rank(sorted, RoleRank::SECONDARY);

    match (primary, secondary) {
        (Some(p), Some(s)) if p.status == s.status => p.status,
        _ => Disposition::Tabled,
    }
}
