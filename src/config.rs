//! Dashboard Configuration Module
//! Optional YAML file layered over built-in defaults.

use crate::analysis::DEFAULT_TOP_N;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Looked up in the working directory at start-up.
pub const CONFIG_FILENAME: &str = "perception_cloud.yaml";

/// Spreadsheet export the dashboard was built around.
pub const DEFAULT_CSV_URL: &str = "https://docs.google.com/spreadsheets/d/1dsAaDSCpLYts8Y9P6Jbd62yLaHTjvUN_B3H8XBH-JbQ/export?format=csv&id=1dsAaDSCpLYts8Y9P6Jbd62yLaHTjvUN_B3H8XBH-JbQ&gid=1585034273";

/// Literal exclusion list. Entries are compared case-sensitively against
/// lowercased tokens, so the capitalized ones and the sentence never match.
pub const DEFAULT_EXCLUDE_WORDS: [&str; 12] = [
    "ruim",
    "radiação",
    "cabos",
    "Poluição",
    "Acúmulo",
    "contaminavel",
    "Perigo",
    "sujeira",
    "Sistentabily",
    "Reversão",
    "Utópico",
    "Se o mundo comessase q descartar corretamente, o meio ambiente vai ter a oportunidade de se regenerar",
];

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_yaml::Error,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SourceConfig {
    /// HTTP(S) URL or local file path of the CSV export.
    pub csv_url: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            csv_url: DEFAULT_CSV_URL.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ScheduleConfig {
    /// Fetched data is reused until it is this old.
    pub cache_ttl_secs: u64,
    /// Full fetch → render cycle period.
    pub refresh_interval_secs: u64,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            cache_ttl_secs: 30,
            refresh_interval_secs: 5120,
        }
    }
}

impl ScheduleConfig {
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_interval_secs)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct NlpConfig {
    /// Lexicon models, tried in order; the first readable one wins.
    pub lexicon_paths: Vec<PathBuf>,
    /// Stopword list for the light tier.
    pub stopwords_path: PathBuf,
}

impl Default for NlpConfig {
    fn default() -> Self {
        Self {
            lexicon_paths: vec![PathBuf::from("models/pt_lexicon.tsv")],
            stopwords_path: PathBuf::from("models/pt_stopwords.txt"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AnalysisConfig {
    pub exclude_words: Vec<String>,
    pub top_n: usize,
    pub preview_rows: usize,
    pub preview_tokens: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            exclude_words: DEFAULT_EXCLUDE_WORDS.iter().map(|s| s.to_string()).collect(),
            top_n: DEFAULT_TOP_N,
            preview_rows: 5,
            preview_tokens: 15,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WordCloudConfig {
    pub width: u32,
    pub height: u32,
    pub max_words: usize,
    pub max_font_size: f32,
    pub min_font_size: f32,
    /// 0.0 ranks only, 1.0 sizes strictly proportional to counts.
    pub relative_scaling: f32,
    /// Padding around each word box, in pixels.
    pub margin: u32,
}

impl Default for WordCloudConfig {
    fn default() -> Self {
        Self {
            width: 600,
            height: 600,
            max_words: 100,
            max_font_size: 96.0,
            min_font_size: 8.0,
            relative_scaling: 0.5,
            margin: 2,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ChartConfig {
    pub width: u32,
    pub height: u32,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
        }
    }
}

/// Complete dashboard configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DashboardConfig {
    pub source: SourceConfig,
    pub schedule: ScheduleConfig,
    pub nlp: NlpConfig,
    pub analysis: AnalysisConfig,
    pub word_cloud: WordCloudConfig,
    pub chart: ChartConfig,
}

impl DashboardConfig {
    /// Read a config file. Sections or keys left out keep their defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_yaml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load `path` when it exists, falling back to defaults otherwise.
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            log::debug!("No config at {}, using defaults", path.display());
            return Self::default();
        }

        match Self::from_file(path) {
            Ok(config) => {
                log::info!("Loaded config from {}", path.display());
                config
            }
            Err(e) => {
                log::warn!("{}; using defaults", e);
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn defaults_match_dashboard_constants() {
        let config = DashboardConfig::default();
        assert_eq!(config.schedule.cache_ttl_secs, 30);
        assert_eq!(config.schedule.refresh_interval_secs, 5120);
        assert_eq!(config.analysis.top_n, 10);
        assert_eq!(config.word_cloud.width, 600);
        assert_eq!(config.word_cloud.max_words, 100);
        assert_eq!(config.analysis.exclude_words.len(), 12);
        assert!(config.analysis.exclude_words.contains(&"Poluição".to_string()));
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(CONFIG_FILENAME);
        fs::write(
            &path,
            "source:\n  csv_url: respostas.csv\nanalysis:\n  top_n: 5\n",
        )
        .unwrap();

        let config = DashboardConfig::from_file(&path).unwrap();
        assert_eq!(config.source.csv_url, "respostas.csv");
        assert_eq!(config.analysis.top_n, 5);
        assert_eq!(config.analysis.preview_tokens, 15);
        assert_eq!(config.schedule, ScheduleConfig::default());
    }

    #[test]
    fn missing_file_gives_defaults() {
        let tmp = TempDir::new().unwrap();
        let config = DashboardConfig::load_or_default(&tmp.path().join("nope.yaml"));
        assert_eq!(config, DashboardConfig::default());
    }

    #[test]
    fn invalid_file_gives_defaults() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(CONFIG_FILENAME);
        fs::write(&path, "schedule: [not, a, map]\n").unwrap();

        assert!(matches!(
            DashboardConfig::from_file(&path),
            Err(ConfigError::Parse { .. })
        ));
        assert_eq!(DashboardConfig::load_or_default(&path), DashboardConfig::default());
    }
}
