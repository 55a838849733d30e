use serde::{Deserialize, Serialize};

pub mod backend;
pub mod config;
pub mod config_file;
pub mod fusion;
pub mod normalize;
pub mod pipeline;
pub mod similarity;
pub mod vocabulary;

// Re-export for convenience
pub use backend::{BackendError, TextExtractor};
pub use config::{ConfigError, ListOverride, ScoringConfig, ScoringConfigBuilder};
pub use fusion::fuse;
pub use normalize::normalize;
pub use pipeline::{Analysis, Scorer, compose_target};
pub use similarity::{VectorizeError, similarity_percent, try_similarity};
pub use vocabulary::{Vocabulary, common_terms};

/// Terminal state of a scoring run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    /// Extraction failed or produced only whitespace.
    EmptyInput,
    /// Candidate or target has nothing left after normalization.
    EmptyAfterClean,
    /// Fewer than the two required inputs were supplied.
    InputError,
    /// Any other fault, caught at the outermost boundary.
    InternalError,
}

impl Outcome {
    /// Fixed user-facing message for the states that have one.
    pub fn message(&self) -> &'static str {
        match self {
            Outcome::Success => "analysis completed successfully",
            Outcome::EmptyInput => {
                "source document appears empty or is a scanned image with no extractable text"
            }
            Outcome::EmptyAfterClean => "text empty after normalization",
            Outcome::InputError => "missing arguments (expected: <source> <description>)",
            Outcome::InternalError => "internal error",
        }
    }
}

/// The single JSON object emitted per run.
///
/// Every field is always serialized, whatever the outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub success: bool,
    /// Integer in `[0, 100]`; 0 on every failure path.
    pub score: u32,
    pub matches: Vec<String>,
    pub message: String,
}

impl ScoreResult {
    pub fn success(score: u32, matches: Vec<String>) -> Self {
        Self {
            success: true,
            score: score.min(fusion::MAX_SCORE),
            matches,
            message: Outcome::Success.message().to_string(),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            score: 0,
            matches: Vec::new(),
            message: message.into(),
        }
    }

    /// Fault caught at the outermost boundary.
    pub fn internal_error(description: impl std::fmt::Display) -> Self {
        Self::failure(format!("{}: {description}", Outcome::InternalError.message()))
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_shape_on_success() {
        let result = ScoreResult::success(42, vec!["python".into(), "c++".into()]);
        let value: serde_json::Value = serde_json::from_str(&result.to_json().unwrap()).unwrap();
        assert_eq!(value["success"], true);
        assert_eq!(value["score"], 42);
        assert_eq!(value["matches"], serde_json::json!(["python", "c++"]));
        assert_eq!(value["message"], "analysis completed successfully");
        assert_eq!(value.as_object().unwrap().len(), 4);
    }

    #[test]
    fn test_json_shape_on_failure() {
        let result = ScoreResult::failure(Outcome::EmptyInput.message());
        let value: serde_json::Value = serde_json::from_str(&result.to_json().unwrap()).unwrap();
        assert_eq!(value["success"], false);
        assert_eq!(value["score"], 0);
        assert_eq!(value["matches"], serde_json::json!([]));
        assert_eq!(value.as_object().unwrap().len(), 4);
    }

    #[test]
    fn test_json_keeps_non_ascii() {
        let result = ScoreResult::success(10, vec!["développeur".into()]);
        assert!(result.to_json().unwrap().contains("développeur"));
    }

    #[test]
    fn test_internal_error_message() {
        let result = ScoreResult::internal_error("boom");
        assert!(!result.success);
        assert_eq!(result.message, "internal error: boom");
    }

    #[test]
    fn test_success_score_capped() {
        assert_eq!(ScoreResult::success(250, vec![]).score, 100);
    }
}
