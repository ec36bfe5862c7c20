//! Reviewer role precedence.
//!
//! Role labels are free text from the review system, e.g.
//!
//! - `Technical Papers Committee Member (lead)`
//! - `Technical Papers Committee Member`
//! - `Technical Papers Tertiary Reviewer`
//! - `Technical Papers PC Extra Reviewer`
//!
//! They are mapped to a precedence rank by an ordered rule table evaluated
//! first-match-wins against the label (case-sensitive substring match).

use serde::{Deserialize, Serialize};

/// Precedence rank of a reviewer. Lower is more senior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoleRank(u8);

impl RoleRank {
    pub const PRIMARY: RoleRank = RoleRank(1);
    pub const SECONDARY: RoleRank = RoleRank(2);
    pub const TERTIARY: RoleRank = RoleRank(3);
    pub const EXTRA: RoleRank = RoleRank(4);
    /// Unrecognised labels. Never part of the primary/secondary consensus.
    pub const OTHER: RoleRank = RoleRank(5);

    pub fn value(self) -> u8 {
        self.0
    }

    pub fn is_primary(self) -> bool {
        self == Self::PRIMARY
    }

    pub fn is_secondary(self) -> bool {
        self == Self::SECONDARY
    }
}

impl std::fmt::Display for RoleRank {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single precedence rule mapping a label substring to a rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoleRule {
    pub pattern: &'static str,
    pub rank: RoleRank,
}

impl RoleRule {
    /// Returns `true` if this rule matches the given role label.
    pub fn matches(&self, label: &str) -> bool {
        label.contains(self.pattern)
    }
}

/// Precedence rules in evaluation order.
///
/// | Pattern  | Rank |
/// |----------|------|
/// | lead     | 1    |
/// | Member   | 2    |
/// | Tertiary | 3    |
/// | Extra    | 4    |
///
/// `lead` comes first because the lead label also contains `Member`.
pub const ROLE_RULES: [RoleRule; 4] = [
    RoleRule {
        pattern: "lead",
        rank: RoleRank::PRIMARY,
    },
    RoleRule {
        pattern: "Member",
        rank: RoleRank::SECONDARY,
    },
    RoleRule {
        pattern: "Tertiary",
        rank: RoleRank::TERTIARY,
    },
    RoleRule {
        pattern: "Extra",
        rank: RoleRank::EXTRA,
    },
];

/// Look up the precedence rank for a role label.
///
/// Returns the first matching rule's rank, or [`RoleRank::OTHER`] if nothing
/// matches.
pub fn resolve_role(label: &str) -> RoleRank {
    ROLE_RULES
        .iter()
        .find(|rule| rule.matches(label))
        .map(|rule| rule.rank)
        .unwrap_or(RoleRank::OTHER)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_labels() {
        assert_eq!(
            resolve_role("Technical Papers Committee Member (lead)"),
            RoleRank::PRIMARY
        );
        assert_eq!(
            resolve_role("Technical Papers Committee Member"),
            RoleRank::SECONDARY
        );
        assert_eq!(
            resolve_role("Technical Papers Tertiary Reviewer"),
            RoleRank::TERTIARY
        );
        assert_eq!(
            resolve_role("Technical Papers PC Extra Reviewer"),
            RoleRank::EXTRA
        );
    }

    #[test]
    fn test_lead_overrides_every_other_pattern() {
        for label in [
            "lead",
            "Member lead",
            "Tertiary (lead)",
            "Extra lead Member Tertiary",
        ] {
            assert_eq!(resolve_role(label), RoleRank::PRIMARY, "{label}");
        }
    }

    #[test]
    fn test_match_is_case_sensitive() {
        assert_eq!(resolve_role("Committee member (Lead)"), RoleRank::OTHER);
        assert_eq!(resolve_role("tertiary"), RoleRank::OTHER);
    }

    #[test]
    fn test_unknown_and_empty_labels_default_to_other() {
        assert_eq!(resolve_role(""), RoleRank::OTHER);
        assert_eq!(resolve_role("Area Chair"), RoleRank::OTHER);
        assert_eq!(RoleRank::OTHER.value(), 5);
    }

    #[test]
    fn test_rank_ordering() {
        assert!(RoleRank::PRIMARY < RoleRank::SECONDARY);
        assert!(RoleRank::SECONDARY < RoleRank::TERTIARY);
        assert!(RoleRank::EXTRA < RoleRank::OTHER);
    }
}
