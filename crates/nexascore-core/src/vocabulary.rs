//! Literal vocabulary overlap between two normalized texts.

use std::collections::HashSet;

use once_cell::sync::Lazy;

/// French function words excluded from both overlap and TF-IDF features:
/// articles, pronouns, conjunctions, elided forms and forms of "être".
pub const FRENCH_STOP_WORDS: &[&str] = &[
    "au", "aux", "avec", "ce", "ces", "dans", "de", "des", "du", "elle", "en", "et", "eux", "il",
    "je", "la", "le", "leur", "lui", "ma", "mais", "me", "meme", "mes", "moi", "mon", "ne", "nos",
    "notre", "nous", "on", "ou", "par", "pas", "pour", "qu", "que", "qui", "sa", "se", "ses",
    "son", "sur", "ta", "te", "tes", "toi", "ton", "tu", "un", "une", "vos", "votre", "vous", "c",
    "d", "j", "l", "m", "n", "s", "t", "y", "été", "étée", "étées", "étés", "étant", "suis", "es",
    "est", "les", "a", "à", "or", "ni", "car", "donc", "lorsque", "puisque", "quand", "comme",
    "si",
];

/// Short language/tool names exempt from the minimum-length filter.
pub const SHORT_TECHNICAL_TERMS: &[&str] = &["r", "c", "go", "js", "ai"];

/// Tokens of this length or shorter need a technical exemption to count.
const MIN_ORDINARY_LEN: usize = 2;

pub(crate) static DEFAULT_VOCABULARY: Lazy<Vocabulary> = Lazy::new(Vocabulary::default);

/// Immutable stop-word and technical-term sets used to filter tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vocabulary {
    stop_words: HashSet<String>,
    technical_terms: HashSet<String>,
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self::new(
            FRENCH_STOP_WORDS.iter().map(|s| s.to_string()),
            SHORT_TECHNICAL_TERMS.iter().map(|s| s.to_string()),
        )
    }
}

impl Vocabulary {
    pub fn new(
        stop_words: impl IntoIterator<Item = String>,
        technical_terms: impl IntoIterator<Item = String>,
    ) -> Self {
        Self {
            stop_words: stop_words.into_iter().collect(),
            technical_terms: technical_terms.into_iter().collect(),
        }
    }

    pub fn is_stop_word(&self, token: &str) -> bool {
        self.stop_words.contains(token)
    }

    /// A token is technical if it carries `+` or `#`, or is an allow-listed short name.
    pub fn is_technical(&self, token: &str) -> bool {
        token.contains(['+', '#']) || self.technical_terms.contains(token)
    }

    /// Whether a shared token is worth reporting as a match.
    ///
    /// Stop words are rejected first, so a token on both lists (e.g. `"c"`)
    /// never counts.
    pub fn is_significant(&self, token: &str) -> bool {
        if self.is_stop_word(token) {
            return false;
        }
        token.chars().count() > MIN_ORDINARY_LEN || self.is_technical(token)
    }

    /// Significant tokens present in both normalized texts.
    ///
    /// Each text is split on single spaces into a set of tokens. The result
    /// has no duplicates and follows first appearance in `a`.
    pub fn common_terms(&self, a: &str, b: &str) -> Vec<String> {
        let in_b: HashSet<&str> = tokens(b).collect();
        let mut seen = HashSet::new();
        tokens(a)
            .filter(|t| in_b.contains(t) && seen.insert(*t))
            .filter(|t| self.is_significant(t))
            .map(str::to_string)
            .collect()
    }
}

fn tokens(text: &str) -> impl Iterator<Item = &str> {
    text.split(' ').filter(|t| !t.is_empty())
}

/// [`Vocabulary::common_terms`] with the built-in lists.
pub fn common_terms(a: &str, b: &str) -> Vec<String> {
    DEFAULT_VOCABULARY.common_terms(a, b)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn as_set(terms: Vec<String>) -> HashSet<String> {
        terms.into_iter().collect()
    }

    fn set(items: &[&str]) -> HashSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_common_terms_basic() {
        let terms = common_terms(
            "expert en python et c++ avec 5 ans experience",
            "recherche developpeur python c++",
        );
        assert_eq!(as_set(terms), set(&["python", "c++"]));
    }

    #[test]
    fn test_common_terms_excludes_stop_words() {
        let terms = common_terms("le la de et avec pour", "le la de et avec pour");
        assert!(terms.is_empty());
    }

    #[test]
    fn test_common_terms_short_technical_terms() {
        let terms = common_terms("r go js ai sql", "go r js ai sql");
        assert_eq!(as_set(terms), set(&["r", "go", "js", "ai", "sql"]));
    }

    #[test]
    fn test_common_terms_c_is_a_stop_word() {
        assert!(common_terms("c", "c").is_empty());
    }

    #[test]
    fn test_common_terms_symbols_make_short_tokens_technical() {
        let terms = common_terms("c# f# x+", "x+ f# c#");
        assert_eq!(as_set(terms), set(&["c#", "f#", "x+"]));
    }

    #[test]
    fn test_common_terms_rejects_short_ordinary_tokens() {
        assert!(common_terms("ab 42 vb", "vb 42 ab").is_empty());
    }

    #[test]
    fn test_common_terms_length_counts_chars_not_bytes() {
        // "été" is a stop word, but "élu" is three characters and ordinary.
        assert_eq!(common_terms("élu été", "été élu"), vec!["élu".to_string()]);
    }

    #[test]
    fn test_common_terms_no_duplicates() {
        let terms = common_terms("rust rust rust", "rust");
        assert_eq!(terms, vec!["rust".to_string()]);
    }

    #[test]
    fn test_common_terms_only_shared_tokens() {
        let a = "java kotlin spring docker";
        let b = "docker kubernetes java";
        let terms = common_terms(a, b);
        for t in &terms {
            assert!(a.split(' ').any(|x| x == t));
            assert!(b.split(' ').any(|x| x == t));
        }
        assert_eq!(as_set(terms), set(&["java", "docker"]));
    }

    #[test]
    fn test_common_terms_empty_inputs() {
        assert!(common_terms("", "").is_empty());
        assert!(common_terms("python", "").is_empty());
    }

    #[test]
    fn test_custom_vocabulary() {
        let vocab = Vocabulary::new(vec!["python".to_string()], vec!["ml".to_string()]);
        let terms = vocab.common_terms("python ml rust", "rust ml python");
        assert_eq!(as_set(terms), set(&["ml", "rust"]));
    }
}
