//! Fusion of lexical similarity and the shared-term bonus into one score.

/// Points added per shared significant term.
///
/// A handful of shared technical terms can dominate the score when the
/// postings are phrased differently from the résumé.
pub const DEFAULT_POINTS_PER_TERM: f64 = 12.0;

pub const MAX_SCORE: u32 = 100;

/// Combine a similarity percentage with the common-term bonus.
///
/// `raw = similarity + terms * points_per_term`, clamped to `[0, 100]` and
/// rounded half-to-even. A NaN similarity is treated as 0.
pub fn fuse_with(similarity_percent: f64, term_count: usize, points_per_term: f64) -> u32 {
    let similarity = if similarity_percent.is_nan() {
        0.0
    } else {
        similarity_percent
    };
    let raw = similarity + term_count as f64 * points_per_term;
    let clamped = raw.clamp(0.0, MAX_SCORE as f64);
    clamped.round_ties_even() as u32
}

/// [`fuse_with`] using [`DEFAULT_POINTS_PER_TERM`].
pub fn fuse(similarity_percent: f64, common_terms: &[String]) -> u32 {
    fuse_with(similarity_percent, common_terms.len(), DEFAULT_POINTS_PER_TERM)
}
