use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::config::{ConfigError, ScoringConfig, ScoringConfigBuilder};

/// On-disk TOML configuration structure.
/// All fields are optional so partial configs work (merge with defaults).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ConfigFile {
    pub scoring: Option<ScoringSection>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ScoringSection {
    pub points_per_term: Option<f64>,
    pub max_ngram: Option<usize>,
    pub skill_repeat: Option<usize>,
    /// Replaces the built-in stop-word list.
    pub stop_words: Option<Vec<String>>,
    /// Appended to the (possibly replaced) stop-word list.
    pub extra_stop_words: Option<Vec<String>>,
    /// Replaces the built-in short technical terms.
    pub technical_terms: Option<Vec<String>>,
    /// Appended to the (possibly replaced) technical terms.
    pub extra_technical_terms: Option<Vec<String>>,
}

impl ConfigFile {
    /// Turn the file contents into a validated [`ScoringConfig`].
    pub fn scoring_config(&self) -> Result<ScoringConfig, ConfigError> {
        let Some(section) = &self.scoring else {
            return Ok(ScoringConfig::default());
        };

        let mut builder = ScoringConfigBuilder::new();
        if let Some(points) = section.points_per_term {
            builder = builder.points_per_term(points);
        }
        if let Some(n) = section.max_ngram {
            builder = builder.max_ngram(n);
        }
        if let Some(n) = section.skill_repeat {
            builder = builder.skill_repeat(n);
        }
        if let Some(words) = &section.stop_words {
            builder = builder.set_stop_words(words.clone());
        }
        for word in section.extra_stop_words.iter().flatten() {
            builder = builder.add_stop_word(word.clone());
        }
        if let Some(terms) = &section.technical_terms {
            builder = builder.set_technical_terms(terms.clone());
        }
        for term in section.extra_technical_terms.iter().flatten() {
            builder = builder.add_technical_term(term.clone());
        }
        builder.build()
    }
}

/// Platform config directory path: `<config_dir>/nexascore/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("nexascore").join("config.toml"))
}

/// Load config by cascading CWD `.nexascore.toml` over platform config.
/// CWD values override platform values.
pub fn load_config() -> ConfigFile {
    let platform = config_path().and_then(|p| load_from_path(&p));
    let cwd = load_from_path(Path::new(".nexascore.toml"));

    match (platform, cwd) {
        (None, None) => ConfigFile::default(),
        (Some(p), None) => p,
        (None, Some(c)) => c,
        (Some(p), Some(c)) => merge(p, c),
    }
}

/// Load a config from a path that may not exist. Returns `None` if the file
/// is missing or can't be parsed.
pub fn load_from_path(path: &Path) -> Option<ConfigFile> {
    if !path.exists() {
        return None;
    }
    match read_config(path) {
        Ok(config) => Some(config),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "ignoring unreadable config file");
            None
        }
    }
}

/// Read and parse a config file that must exist.
pub fn read_config(path: &Path) -> Result<ConfigFile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.display().to_string(),
        source,
    })?;
    Ok(toml::from_str(&content)?)
}

/// Merge two configs: `overlay` values take precedence over `base`.
pub fn merge(base: ConfigFile, overlay: ConfigFile) -> ConfigFile {
    let (base, overlay) = match (base.scoring, overlay.scoring) {
        (None, None) => return ConfigFile::default(),
        (b, o) => (b.unwrap_or_default(), o.unwrap_or_default()),
    };
    ConfigFile {
        scoring: Some(ScoringSection {
            points_per_term: overlay.points_per_term.or(base.points_per_term),
            max_ngram: overlay.max_ngram.or(base.max_ngram),
            skill_repeat: overlay.skill_repeat.or(base.skill_repeat),
            stop_words: overlay.stop_words.or(base.stop_words),
            extra_stop_words: overlay.extra_stop_words.or(base.extra_stop_words),
            technical_terms: overlay.technical_terms.or(base.technical_terms),
            extra_technical_terms: overlay.extra_technical_terms.or(base.extra_technical_terms),
        }),
    }
}
