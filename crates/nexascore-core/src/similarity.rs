//! TF-IDF cosine similarity over a corpus of exactly two documents.
//!
//! The IDF weights are fitted on the candidate and the target alone. With
//! `n = 2` a shared feature gets idf 1.0 and a feature unique to one side
//! gets `ln(3/2) + 1`; the per-term bonus in [`crate::fusion`] is calibrated
//! against this corpus size.

use std::collections::{BTreeMap, HashMap, HashSet};

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;
use tracing::debug;

use crate::vocabulary::{DEFAULT_VOCABULARY, Vocabulary};

/// Default upper bound of the n-gram range (features are 1..=3 token runs).
pub const DEFAULT_MAX_NGRAM: usize = 3;

/// Runs of word characters plus `+ # .`, so `c++`, `c#` and `.net` are single tokens.
///
/// Not anchored on word boundaries: a `\b`-anchored tokenizer would read `c++`
/// as `c` and `.net` as `net`, so percentages differ from such tokenizers
/// whenever a token starts or ends with a symbol.
static TOKEN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\w+#.]+").unwrap());

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VectorizeError {
    #[error("empty vocabulary: documents contain only stop words")]
    EmptyVocabulary,
}

/// Term-weighting model fitted on a small, closed corpus.
#[derive(Debug, Clone)]
pub struct TfIdfVectorizer<'a> {
    vocabulary: &'a Vocabulary,
    max_ngram: usize,
}

impl<'a> TfIdfVectorizer<'a> {
    pub fn new(vocabulary: &'a Vocabulary, max_ngram: usize) -> Self {
        Self {
            vocabulary,
            max_ngram: max_ngram.max(1),
        }
    }

    /// Tokenize, drop stop words, then emit every contiguous 1..=max_ngram run.
    pub fn analyze(&self, text: &str) -> Vec<String> {
        let tokens: Vec<&str> = TOKEN_RE
            .find_iter(text)
            .map(|m| m.as_str())
            .filter(|t| !self.vocabulary.is_stop_word(t))
            .collect();

        let mut features = Vec::new();
        for n in 1..=self.max_ngram.min(tokens.len()) {
            for window in tokens.windows(n) {
                features.push(window.join(" "));
            }
        }
        features
    }

    /// Fit IDF on `documents` and return one L2-normalized weight vector per document.
    ///
    /// Term frequency is the raw count; IDF is the smoothed
    /// `ln((1 + n) / (1 + df)) + 1`.
    pub fn fit_transform(&self, documents: &[&str]) -> Result<Vec<Vec<f64>>, VectorizeError> {
        let analyzed: Vec<Vec<String>> = documents.iter().map(|d| self.analyze(d)).collect();

        // Sorted feature index keeps vector layout independent of hash order.
        let mut document_frequency: BTreeMap<&str, usize> = BTreeMap::new();
        for features in &analyzed {
            let unique: HashSet<&str> = features.iter().map(String::as_str).collect();
            for feature in unique {
                *document_frequency.entry(feature).or_insert(0) += 1;
            }
        }

        if document_frequency.is_empty() {
            return Err(VectorizeError::EmptyVocabulary);
        }

        let n_documents = documents.len() as f64;
        let index: HashMap<&str, usize> = document_frequency
            .keys()
            .enumerate()
            .map(|(i, f)| (*f, i))
            .collect();
        let idf: Vec<f64> = document_frequency
            .values()
            .map(|&df| ((1.0 + n_documents) / (1.0 + df as f64)).ln() + 1.0)
            .collect();

        debug!(
            features = idf.len(),
            documents = documents.len(),
            "fitted tf-idf vocabulary"
        );

        let vectors = analyzed
            .iter()
            .map(|features| {
                let mut weights = vec![0.0; idf.len()];
                for feature in features {
                    if let Some(&i) = index.get(feature.as_str()) {
                        weights[i] += 1.0;
                    }
                }
                for (w, idf) in weights.iter_mut().zip(&idf) {
                    *w *= idf;
                }
                l2_normalize(&mut weights);
                weights
            })
            .collect();

        Ok(vectors)
    }
}

fn l2_normalize(v: &mut [f64]) {
    let norm = v.iter().map(|x| x * x).sum::<f64>().sqrt();
    if norm > 0.0 {
        v.iter_mut().for_each(|x| *x /= norm);
    }
}

/// Dot product over the product of magnitudes; 0 when either vector is zero.
pub fn cosine_similarity(a: &[f64], b: &[f64]) -> f64 {
    let dot: f64 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a = a.iter().map(|x| x * x).sum::<f64>().sqrt();
    let norm_b = b.iter().map(|x| x * x).sum::<f64>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}

/// Similarity percentage, or the reason no similarity signal exists.
pub fn try_similarity(
    a: &str,
    b: &str,
    vocabulary: &Vocabulary,
    max_ngram: usize,
) -> Result<f64, VectorizeError> {
    let vectors = TfIdfVectorizer::new(vocabulary, max_ngram).fit_transform(&[a, b])?;
    let cosine = cosine_similarity(&vectors[0], &vectors[1]);
    Ok((cosine * 100.0).clamp(0.0, 100.0))
}

/// Like [`try_similarity`], degrading any vectorization failure to `0.0`.
pub fn similarity_percent_with(
    a: &str,
    b: &str,
    vocabulary: &Vocabulary,
    max_ngram: usize,
) -> f64 {
    match try_similarity(a, b, vocabulary, max_ngram) {
        Ok(percent) => percent,
        Err(e) => {
            debug!(error = %e, "vectorization failed, similarity treated as 0");
            0.0
        }
    }
}

/// Similarity percentage in `[0, 100]` with the built-in stop words and n-gram range.
pub fn similarity_percent(a: &str, b: &str) -> f64 {
    similarity_percent_with(a, b, &DEFAULT_VOCABULARY, DEFAULT_MAX_NGRAM)
}
