//! Error taxonomy for the chair engine.
//!
//! Only input that cannot be coerced at all surfaces as an error. Missing
//! reviewers, unknown codes and empty cells all resolve to fallback values
//! inside the engine.

/// Errors produced while normalising and aggregating reviews.
#[derive(Debug, thiserror::Error)]
pub enum ChairError {
    #[error("malformed numeric field {field}: {value:?}")]
    MalformedNumber { field: String, value: String },

    #[error("no reviews to aggregate for submission {submission_id}")]
    EmptyReviewList { submission_id: String },
}

/// Result type for chair engine operations.
pub type Result<T> = std::result::Result<T, ChairError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_number_display() {
        let err = ChairError::MalformedNumber {
            field: "score".to_string(),
            value: "strong accept".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("malformed numeric field score"));
        assert!(msg.contains("strong accept"));
    }

    #[test]
    fn test_empty_review_list_display() {
        let err = ChairError::EmptyReviewList {
            submission_id: "P7".to_string(),
        };
        assert!(err.to_string().contains("P7"));
    }
}
