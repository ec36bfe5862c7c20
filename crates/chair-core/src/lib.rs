//! Chair Core Library
//!
//! Consolidates independently submitted peer reviews into one ranked
//! recommendation per submission.
//!
//! Pipeline: [`ReviewGroups::build`] partitions raw rows by submission id,
//! then [`assemble_report`] runs [`normalize_review`] on the groups it
//! actually scores, sorts them by role rank and runs [`decide_status`] and
//! [`aggregate`].

pub mod config;
pub mod decision;
pub mod error;
pub mod group;
pub mod model;
pub mod normalize;
pub mod report;
pub mod role;
pub mod score;
pub mod telemetry;

pub use config::{ReportConfig, StatusStyle, TrackAveraging};
pub use decision::{decide_status, sort_by_role};
pub use error::{ChairError, Result};
pub use group::{Registry, ReviewGroups};
pub use model::{Disposition, RawReview, ScoreFields, Submission, TrackKind};
pub use normalize::{
    normalize_all, normalize_review, parse_status, status_from_code, to_int, NormalizedReview,
    NormalizedScores,
};
pub use report::{assemble_report, AggregateResult, ChairReport, MISSING_REVIEWS_DIGEST};
pub use role::{resolve_role, RoleRank, RoleRule, ROLE_RULES};
pub use score::{
    aggregate, format_score_list, format_track_fit_list, mean_score, score_code, track_fit_code,
    ScoreSummary, SortScore, EXCEPTION_SORT_SCORE, MISSING_REVIEWS_SORT_SCORE,
};
pub use telemetry::init_tracing;

/// Chair version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
