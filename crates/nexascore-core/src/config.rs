use thiserror::Error;

use crate::fusion::DEFAULT_POINTS_PER_TERM;
use crate::similarity::DEFAULT_MAX_NGRAM;
use crate::vocabulary::{FRENCH_STOP_WORDS, SHORT_TECHNICAL_TERMS, Vocabulary};

/// Times each desired skill is appended to the target description.
pub const DEFAULT_SKILL_REPEAT: usize = 3;

/// Largest accepted n-gram upper bound.
pub const MAX_NGRAM_LIMIT: usize = 5;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid scoring configuration: {0}")]
    Invalid(String),
}

/// Controls how a list of values is overridden from its defaults.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum ListOverride<T> {
    /// Use the built-in defaults.
    #[default]
    Default,
    /// Completely replace the defaults with these values.
    Replace(Vec<T>),
    /// Append these values to the defaults.
    Extend(Vec<T>),
}

impl<T: Clone> ListOverride<T> {
    /// Resolve this override against the given defaults.
    pub fn resolve(&self, defaults: &[T]) -> Vec<T> {
        match self {
            ListOverride::Default => defaults.to_vec(),
            ListOverride::Replace(v) => v.clone(),
            ListOverride::Extend(v) => {
                let mut result = defaults.to_vec();
                result.extend(v.iter().cloned());
                result
            }
        }
    }
}

/// Configuration for one scoring run.
///
/// Immutable once built. Use [`ScoringConfigBuilder`] to construct anything
/// other than the defaults.
#[derive(Debug, Clone)]
pub struct ScoringConfig {
    pub(crate) stop_words: ListOverride<String>,
    pub(crate) technical_terms: ListOverride<String>,
    /// Bonus points per shared significant term (default: 12.0).
    pub(crate) points_per_term: f64,
    /// Upper bound of the TF-IDF n-gram range (default: 3).
    pub(crate) max_ngram: usize,
    /// Times each skill is repeated in the composed target (default: 3).
    pub(crate) skill_repeat: usize,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            stop_words: ListOverride::Default,
            technical_terms: ListOverride::Default,
            points_per_term: DEFAULT_POINTS_PER_TERM,
            max_ngram: DEFAULT_MAX_NGRAM,
            skill_repeat: DEFAULT_SKILL_REPEAT,
        }
    }
}

impl ScoringConfig {
    /// Resolve the stop-word and technical-term overrides into a [`Vocabulary`].
    pub fn vocabulary(&self) -> Vocabulary {
        let defaults = |list: &[&str]| list.iter().map(|s| s.to_string()).collect::<Vec<_>>();
        Vocabulary::new(
            self.stop_words.resolve(&defaults(FRENCH_STOP_WORDS)),
            self.technical_terms.resolve(&defaults(SHORT_TECHNICAL_TERMS)),
        )
    }

    pub fn points_per_term(&self) -> f64 {
        self.points_per_term
    }

    pub fn max_ngram(&self) -> usize {
        self.max_ngram
    }

    pub fn skill_repeat(&self) -> usize {
        self.skill_repeat
    }
}

/// Builder for [`ScoringConfig`]. Validation happens in [`build()`](Self::build).
#[derive(Debug, Clone, Default)]
pub struct ScoringConfigBuilder {
    stop_words: ListOverride<String>,
    technical_terms: ListOverride<String>,
    points_per_term: Option<f64>,
    max_ngram: Option<usize>,
    skill_repeat: Option<usize>,
}

impl ScoringConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Stop words ──

    pub fn set_stop_words(mut self, words: Vec<String>) -> Self {
        self.stop_words = ListOverride::Replace(words);
        self
    }

    pub fn add_stop_word(mut self, word: String) -> Self {
        match &mut self.stop_words {
            ListOverride::Extend(v) | ListOverride::Replace(v) => v.push(word),
            ListOverride::Default => self.stop_words = ListOverride::Extend(vec![word]),
        }
        self
    }

    // ── Technical terms ──

    pub fn set_technical_terms(mut self, terms: Vec<String>) -> Self {
        self.technical_terms = ListOverride::Replace(terms);
        self
    }

    pub fn add_technical_term(mut self, term: String) -> Self {
        match &mut self.technical_terms {
            ListOverride::Extend(v) | ListOverride::Replace(v) => v.push(term),
            ListOverride::Default => self.technical_terms = ListOverride::Extend(vec![term]),
        }
        self
    }

    // ── Scalars ──

    pub fn points_per_term(mut self, points: f64) -> Self {
        self.points_per_term = Some(points);
        self
    }

    pub fn max_ngram(mut self, n: usize) -> Self {
        self.max_ngram = Some(n);
        self
    }

    pub fn skill_repeat(mut self, n: usize) -> Self {
        self.skill_repeat = Some(n);
        self
    }

    pub fn build(self) -> Result<ScoringConfig, ConfigError> {
        let points_per_term = self.points_per_term.unwrap_or(DEFAULT_POINTS_PER_TERM);
        if !points_per_term.is_finite() || points_per_term < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "points_per_term must be a non-negative number, got {points_per_term}"
            )));
        }

        let max_ngram = self.max_ngram.unwrap_or(DEFAULT_MAX_NGRAM);
        if !(1..=MAX_NGRAM_LIMIT).contains(&max_ngram) {
            return Err(ConfigError::Invalid(format!(
                "max_ngram must be between 1 and {MAX_NGRAM_LIMIT}, got {max_ngram}"
            )));
        }

        let skill_repeat = self.skill_repeat.unwrap_or(DEFAULT_SKILL_REPEAT);
        if skill_repeat == 0 {
            return Err(ConfigError::Invalid("skill_repeat must be at least 1".into()));
        }

        Ok(ScoringConfig {
            stop_words: lowercase_list(self.stop_words),
            technical_terms: lowercase_list(self.technical_terms),
            points_per_term,
            max_ngram,
            skill_repeat,
        })
    }
}

/// User-supplied terms are compared against normalized (lowercase) tokens.
fn lowercase_list(list: ListOverride<String>) -> ListOverride<String> {
    let lower = |v: Vec<String>| v.into_iter().map(|s| s.trim().to_lowercase()).collect();
    match list {
        ListOverride::Default => ListOverride::Default,
        ListOverride::Replace(v) => ListOverride::Replace(lower(v)),
        ListOverride::Extend(v) => ListOverride::Extend(lower(v)),
    }
}
