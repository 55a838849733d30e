//! One scoring run: extract, normalize, compare, fuse, package.

use std::path::Path;

use tracing::{debug, info, warn};

use crate::backend::TextExtractor;
use crate::config::ScoringConfig;
use crate::fusion::fuse_with;
use crate::normalize::normalize;
use crate::similarity::try_similarity;
use crate::vocabulary::Vocabulary;
use crate::{Outcome, ScoreResult};

/// Full outcome of one run, with the intermediate signals kept for reporting.
#[derive(Debug, Clone, PartialEq)]
pub struct Analysis {
    pub outcome: Outcome,
    pub result: ScoreResult,
    /// Cosine similarity percentage; `None` when no TF-IDF signal exists.
    pub similarity: Option<f64>,
    /// Points contributed by the shared terms before clamping.
    pub bonus: f64,
}

impl Analysis {
    fn terminal(outcome: Outcome) -> Self {
        Self {
            outcome,
            result: ScoreResult::failure(outcome.message()),
            similarity: None,
            bonus: 0.0,
        }
    }
}

/// Build the target text as `"<title> <description>"` followed by every
/// skill repeated `repeat` times.
pub fn compose_target(
    title: Option<&str>,
    description: &str,
    skills: &[String],
    repeat: usize,
) -> String {
    let mut target = match title.map(str::trim).filter(|t| !t.is_empty()) {
        Some(title) => format!("{title} {description}"),
        None => description.to_string(),
    };
    for skill in skills.iter().map(|s| s.trim()).filter(|s| !s.is_empty()) {
        for _ in 0..repeat {
            target.push(' ');
            target.push_str(skill);
        }
    }
    target
}

/// Scores a candidate document against a target description.
///
/// Holds no state between runs beyond its immutable configuration.
#[derive(Debug, Clone)]
pub struct Scorer {
    config: ScoringConfig,
    vocabulary: Vocabulary,
}

impl Default for Scorer {
    fn default() -> Self {
        Self::new(ScoringConfig::default())
    }
}

impl Scorer {
    pub fn new(config: ScoringConfig) -> Self {
        let vocabulary = config.vocabulary();
        Self { config, vocabulary }
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    /// [`compose_target`] with the configured skill repeat count.
    pub fn compose_target(&self, title: Option<&str>, description: &str, skills: &[String]) -> String {
        compose_target(title, description, skills, self.config.skill_repeat())
    }

    /// Extract the source document and score it against `target`.
    ///
    /// An extraction failure is indistinguishable from an empty document.
    pub fn score_document(
        &self,
        extractor: &dyn TextExtractor,
        path: &Path,
        target: &str,
    ) -> Analysis {
        let text = match extractor.extract_text(path) {
            Ok(text) => text,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "text extraction failed");
                String::new()
            }
        };
        debug!(chars = text.chars().count(), "extracted source text");
        self.score_text(&text, target)
    }

    /// Score already-extracted candidate text against `target`.
    pub fn score_text(&self, candidate: &str, target: &str) -> Analysis {
        if candidate.trim().is_empty() {
            info!("source text is empty");
            return Analysis::terminal(Outcome::EmptyInput);
        }

        let candidate = normalize(candidate);
        let target = normalize(target);
        debug!(
            candidate_len = candidate.len(),
            target_len = target.len(),
            "normalized texts"
        );
        if candidate.is_empty() || target.is_empty() {
            info!("text empty after normalization");
            return Analysis::terminal(Outcome::EmptyAfterClean);
        }

        let similarity = match try_similarity(
            &candidate,
            &target,
            &self.vocabulary,
            self.config.max_ngram(),
        ) {
            Ok(s) => Some(s),
            Err(e) => {
                debug!(error = %e, "no similarity signal");
                None
            }
        };

        let matches = self.vocabulary.common_terms(&candidate, &target);
        let bonus = matches.len() as f64 * self.config.points_per_term();
        let score = fuse_with(
            similarity.unwrap_or(0.0),
            matches.len(),
            self.config.points_per_term(),
        );
        info!(
            similarity = similarity.unwrap_or(0.0),
            matches = matches.len(),
            score,
            "scoring completed"
        );

        Analysis {
            outcome: Outcome::Success,
            result: ScoreResult::success(score, matches),
            similarity,
            bonus,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compose_target_plain() {
        assert_eq!(compose_target(None, "Poste Rust", &[], 3), "Poste Rust");
    }

    #[test]
    fn test_compose_target_title_and_skills() {
        let skills = vec!["SQL".to_string(), " ".to_string(), "Docker".to_string()];
        assert_eq!(
            compose_target(Some("Dev Backend"), "Poste Rust", &skills, 3),
            "Dev Backend Poste Rust SQL SQL SQL Docker Docker Docker"
        );
    }

    #[test]
    fn test_compose_target_blank_title_ignored() {
        assert_eq!(compose_target(Some("  "), "desc", &[], 3), "desc");
    }

    #[test]
    fn test_score_text_empty_source() {
        let analysis = Scorer::default().score_text("   \n ", "python");
        assert_eq!(analysis.outcome, Outcome::EmptyInput);
        assert!(!analysis.result.success);
        assert_eq!(analysis.result.score, 0);
    }

    #[test]
    fn test_score_text_empty_after_clean() {
        let analysis = Scorer::default().score_text("!!! ???", "python");
        assert_eq!(analysis.outcome, Outcome::EmptyAfterClean);
        let analysis = Scorer::default().score_text("python", "---");
        assert_eq!(analysis.outcome, Outcome::EmptyAfterClean);
        assert_eq!(analysis.result.message, Outcome::EmptyAfterClean.message());
    }

    #[test]
    fn test_score_text_short_technical_token() {
        // A single shared allow-listed token.
        let analysis = Scorer::default().score_text("go", "go");
        assert_eq!(analysis.outcome, Outcome::Success);
        assert_eq!(analysis.result.matches, vec!["go".to_string()]);
        assert!((analysis.bonus - 12.0).abs() < f64::EPSILON);
        // Identical single-feature documents: similarity 100, clamped.
        assert_eq!(analysis.result.score, 100);
    }

    #[test]
    fn test_score_text_skill_weighting_raises_score() {
        let scorer = Scorer::default();
        let cv = "développeur java spring hibernate maven";
        let plain = scorer.score_text(cv, "poste développeur backend");
        let target = scorer.compose_target(None, "poste développeur backend", &["Java".to_string()]);
        let weighted = scorer.score_text(cv, &target);
        assert!(weighted.result.score > plain.result.score);
    }
}
