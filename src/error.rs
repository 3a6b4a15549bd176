//! Error types for loading and scoring rounds

use thiserror::Error;

/// Result type alias for scoring operations
pub type Result<T> = std::result::Result<T, ScoringError>;

/// Errors that abort a scoring run.
///
/// A round that merely fails validation is not an error; it is reported as
/// an invalid `RoundOutcome`. These variants cover input that cannot be
/// scored at all.
#[derive(Error, Debug)]
pub enum ScoringError {
    /// Round data is structurally broken (missing scorecard, bad hole key)
    #[error("Malformed round '{round}': {detail}")]
    MalformedRound { round: String, detail: String },

    /// I/O errors while reading result files
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Result file is not valid JSON for a round
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ScoringError {
    /// Create a new malformed round error
    pub fn malformed(round: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::MalformedRound {
            round: round.into(),
            detail: detail.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_message_names_round() {
        let err = ScoringError::malformed("Round 3 (Wed, June 3)", "no scorecard for Doe, John");
        let msg = err.to_string();
        assert!(msg.contains("Round 3 (Wed, June 3)"));
        assert!(msg.contains("no scorecard for Doe, John"));
    }
}
