use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read tuning file at {config_path}: {source}")]
    TuningReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse tuning file at {config_path}: {source}")]
    TuningParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },
}

/// Default ceiling for bold-paragraph implicit headings, in characters.
pub const DEFAULT_BOLD_HEADING_MAX_LEN: usize = 100;
/// Default bounds for the short-paragraph implicit-heading heuristic.
pub const DEFAULT_SHORT_HEADING_MIN_LEN: usize = 2;
pub const DEFAULT_SHORT_HEADING_MAX_LEN: usize = 60;
/// Default re-render debounce window in milliseconds.
pub const DEFAULT_DEBOUNCE_MS: u64 = 300;

/// Thresholds for the implicit-heading classification heuristics.
///
/// These heuristics are inherently ambiguous (a short declarative sentence
/// with no terminal punctuation can be read as a heading). The thresholds are
/// kept here, named and overridable, so a labeled test corpus can pin the
/// expected behavior instead of guessing at magic numbers buried in the
/// classifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeadingHeuristics {
    /// A paragraph that is one single bold run and at most this long is
    /// promoted to a heading (when it lacks terminal punctuation).
    pub bold_max_len: usize,
    /// Lower bound for the short-paragraph heading heuristic.
    pub short_min_len: usize,
    /// Upper bound for the short-paragraph heading heuristic.
    pub short_max_len: usize,
}

impl Default for HeadingHeuristics {
    fn default() -> Self {
        Self {
            bold_max_len: DEFAULT_BOLD_HEADING_MAX_LEN,
            short_min_len: DEFAULT_SHORT_HEADING_MIN_LEN,
            short_max_len: DEFAULT_SHORT_HEADING_MAX_LEN,
        }
    }
}

/// Engine tuning knobs, loadable from a TOML file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineTuning {
    pub heading: HeadingHeuristics,
    /// Debounce window applied between an edit burst and the re-render it
    /// triggers, in milliseconds.
    pub debounce_ms: u64,
}

impl Default for EngineTuning {
    fn default() -> Self {
        Self {
            heading: HeadingHeuristics::default(),
            debounce_ms: DEFAULT_DEBOUNCE_MS,
        }
    }
}

impl EngineTuning {
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path).map_err(|source| {
            ConfigError::TuningReadError {
                config_path: config_path.to_path_buf(),
                source,
            }
        })?;

        let tuning: EngineTuning =
            toml::from_str(&content).map_err(|source| ConfigError::TuningParseError {
                config_path: config_path.to_path_buf(),
                source,
            })?;

        Ok(Some(tuning))
    }

    pub fn load() -> Result<Option<Self>, ConfigError> {
        Self::load_from_path(Self::config_path())
    }

    /// Load the tuning file if present, falling back to defaults otherwise.
    pub fn load_or_default() -> Result<Self, ConfigError> {
        Ok(Self::load()?.unwrap_or_default())
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, config_path: P) -> anyhow::Result<()> {
        let config_path = config_path.as_ref();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn save(&self) -> anyhow::Result<()> {
        self.save_to_path(Self::config_path())
    }

    pub fn config_path() -> PathBuf {
        let config_dir = shellexpand::tilde("~/.config/draftforge");
        PathBuf::from(config_dir.as_ref()).join("tuning.toml")
    }
}
