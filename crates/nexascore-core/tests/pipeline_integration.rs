//! End-to-end tests for the [`Scorer`] pipeline.
//!
//! Text extraction is replaced by [`FixedExtractor`], so no PDF library is
//! involved; the tests exercise normalization, matching, TF-IDF similarity,
//! fusion and the packaged [`ScoreResult`].

use std::collections::HashSet;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};

use nexascore_core::{
    BackendError, Outcome, ScoreResult, Scorer, ScoringConfigBuilder, TextExtractor, normalize,
};

/// A hand-rolled extractor returning canned text or a canned failure.
struct FixedExtractor {
    response: Result<String, String>,
    calls: AtomicUsize,
}

impl FixedExtractor {
    fn text(text: &str) -> Self {
        Self {
            response: Ok(text.to_string()),
            calls: AtomicUsize::new(0),
        }
    }

    fn failing(message: &str) -> Self {
        Self {
            response: Err(message.to_string()),
            calls: AtomicUsize::new(0),
        }
    }
}

impl TextExtractor for FixedExtractor {
    fn extract_text(&self, _path: &Path) -> Result<String, BackendError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.response
            .clone()
            .map_err(BackendError::ExtractionError)
    }
}

fn score(candidate: &str, target: &str) -> ScoreResult {
    let extractor = FixedExtractor::text(candidate);
    Scorer::default()
        .score_document(&extractor, Path::new("cv.pdf"), target)
        .result
}

fn as_set(terms: &[String]) -> HashSet<&str> {
    terms.iter().map(String::as_str).collect()
}

#[test]
fn resume_matches_posting() {
    let result = score(
        "Expert en python et c++ avec 5 ans experience",
        "Recherche developpeur python c++",
    );
    assert!(result.success);
    assert_eq!(as_set(&result.matches), HashSet::from(["python", "c++"]));
    assert!(result.score > 24, "score {} should exceed the bonus", result.score);
    assert!(result.score <= 100);
    assert_eq!(result.message, "analysis completed successfully");
}

#[test]
fn scanned_document_is_empty_input() {
    let result = score("  \n\n  ", "Recherche developpeur python");
    assert_eq!(
        result,
        ScoreResult {
            success: false,
            score: 0,
            matches: vec![],
            message: Outcome::EmptyInput.message().to_string(),
        }
    );
}

#[test]
fn extraction_failure_is_empty_input() {
    let extractor = FixedExtractor::failing("corrupt xref table");
    let analysis = Scorer::default().score_document(&extractor, Path::new("cv.pdf"), "python");
    assert_eq!(extractor.calls.load(Ordering::SeqCst), 1);
    assert_eq!(analysis.outcome, Outcome::EmptyInput);
    assert_eq!(analysis.result.score, 0);
    assert!(analysis.result.matches.is_empty());
}

#[test]
fn stop_words_only_scores_zero() {
    let extractor = FixedExtractor::text("le la de et");
    let analysis = Scorer::default().score_document(&extractor, Path::new("cv.pdf"), "le la de");
    assert_eq!(analysis.outcome, Outcome::Success);
    assert!(analysis.similarity.is_none());
    assert!(analysis.result.matches.is_empty());
    assert_eq!(analysis.result.score, 0);
}

#[test]
fn punctuation_only_target_is_empty_after_clean() {
    let result = score("Développeur Rust", "*** !!! ***");
    assert!(!result.success);
    assert_eq!(result.score, 0);
    assert_eq!(result.message, "text empty after normalization");
}

#[test]
fn bonus_dominates_weak_similarity() {
    // Differently phrased, but sharing four technical terms.
    let result = score(
        "Réalisation de microservices en Rust, Go et C#; déploiement Kubernetes",
        "Nous cherchons une personne maîtrisant rust kubernetes c# go pour notre plateforme",
    );
    assert!(result.success);
    assert_eq!(
        as_set(&result.matches),
        HashSet::from(["rust", "go", "c#", "kubernetes"])
    );
    assert!(result.score >= 48);
}

#[test]
fn many_shared_terms_clamp_to_hundred() {
    let text = "rust python java kotlin scala haskell erlang elixir ocaml swift";
    assert_eq!(score(text, text).score, 100);
}

#[test]
fn score_is_bounded_for_varied_inputs() {
    let pairs = [
        ("a", "b"),
        ("python", "python"),
        ("c++ c# .net", "C++, C#, .NET"),
        ("Ingénieur DevOps: Terraform, AWS", "Poste de comptable"),
        ("...", "python"),
        ("r", "R language"),
    ];
    for (candidate, target) in pairs {
        let result = score(candidate, target);
        assert!(result.score <= 100, "{candidate:?} vs {target:?}");
        if !result.success {
            assert_eq!(result.score, 0);
        }
    }
}

#[test]
fn custom_points_per_term_changes_fusion() {
    let config = ScoringConfigBuilder::new()
        .points_per_term(0.0)
        .build()
        .unwrap();
    let scorer = Scorer::new(config);
    let analysis = scorer.score_text("python cuisine", "python jardinage");
    assert_eq!(analysis.result.matches, vec!["python".to_string()]);
    let similarity = analysis.similarity.unwrap();
    assert_eq!(analysis.result.score, similarity.round_ties_even() as u32);
}

#[test]
fn normalization_is_idempotent_on_realistic_text() {
    let text = "Jean DUPONT — Ingénieur logiciel\r\n\
                Compétences : C++, C#, .NET, Node.js, SQL.\n\
                Expérience : 5 ans chez Société Générale (2018-2023).";
    let once = normalize(text);
    assert_eq!(normalize(&once), once);
    assert!(once.split(' ').any(|t| t == "c++"));
    assert!(once.split(' ').any(|t| t == ".net"));
}
