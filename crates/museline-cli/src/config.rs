//! Configuration loading from TOML files

use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::Deserialize;

/// Global configuration for museline
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub store: StoreConfig,
    pub met: MetConfig,
    pub harvard: HarvardConfig,
    pub ingest: IngestConfig,
    pub report: ReportConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub db_path: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from("./museline.db"),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MetConfig {
    pub base_url: String,
    /// `metadataDate` sent with the object listing; pins the listing to
    /// a stable snapshot so offsets stay meaningful across runs.
    pub metadata_date: String,
    /// Restrict ingestion to a single department ID.
    pub department: Option<u32>,
}

impl Default for MetConfig {
    fn default() -> Self {
        let defaults = museline_met::Config::default();
        Self {
            base_url: defaults.base_url,
            metadata_date: defaults.metadata_date,
            department: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HarvardConfig {
    pub base_url: String,
    #[serde(deserialize_with = "deserialize_env_var")]
    pub api_key: Option<String>,
}

impl Default for HarvardConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.harvardartmuseums.org".to_string(),
            api_key: std::env::var("HARVARD_API_KEY").ok(),
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct IngestConfig {
    pub batch_size: u64,
    pub max_batches: u64,
}

impl Default for IngestConfig {
    fn default() -> Self {
        let defaults = museline_core::IngestOptions::default();
        Self {
            batch_size: defaults.batch_size,
            max_batches: defaults.max_batches,
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Counts below this fold into the "Other" bucket.
    pub other_threshold: i64,
    /// Row limit for ranked reports.
    pub top_n: u32,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            other_threshold: 3,
            top_n: 10,
        }
    }
}

/// Deserialize a string that may contain environment variable reference like ${VAR}
fn deserialize_env_var<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt: Option<String> = Option::deserialize(deserializer)?;
    Ok(opt.and_then(|s| expand_env_var(&s)))
}

/// Expand ${VAR} to environment variable value
fn expand_env_var(s: &str) -> Option<String> {
    if let Some(var_name) = s.strip_prefix("${").and_then(|s| s.strip_suffix('}')) {
        std::env::var(var_name).ok()
    } else {
        Some(s.to_string())
    }
}

impl Config {
    /// Load configuration from default locations
    ///
    /// Search order:
    /// 1. ./museline.toml (current directory)
    /// 2. ~/.config/museline/config.toml
    ///
    /// If no config file found, returns default config.
    pub fn load() -> Result<Self> {
        let local_config = PathBuf::from("museline.toml");
        if local_config.exists() {
            return Self::from_file(&local_config);
        }

        if let Some(config_dir) = directories::ProjectDirs::from("", "", "museline") {
            let user_config = config_dir.config_dir().join("config.toml");
            if user_config.exists() {
                return Self::from_file(&user_config);
            }
        }

        log::debug!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Load configuration from a specific file
    pub fn from_file(path: &PathBuf) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = Config::default();
        assert_eq!(config.store.db_path, PathBuf::from("./museline.db"));
        assert_eq!(config.report.other_threshold, 3);
        assert!(config.ingest.batch_size > 0);
    }

    #[test]
    fn expand_env_var_simple() {
        std::env::set_var("MUSELINE_TEST_VAR", "test_value");
        assert_eq!(
            expand_env_var("${MUSELINE_TEST_VAR}"),
            Some("test_value".to_string())
        );
        std::env::remove_var("MUSELINE_TEST_VAR");
    }

    #[test]
    fn expand_env_var_literal() {
        assert_eq!(expand_env_var("literal"), Some("literal".to_string()));
    }

    #[test]
    fn expand_env_var_missing() {
        assert_eq!(expand_env_var("${NONEXISTENT_VAR_12345}"), None);
    }

    #[test]
    fn parse_config_toml() {
        let toml = r#"
[store]
db_path = "/tmp/museums.db"

[met]
department = 6

[ingest]
batch_size = 50
max_batches = 20

[report]
other_threshold = 5
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.store.db_path, PathBuf::from("/tmp/museums.db"));
        assert_eq!(config.met.department, Some(6));
        assert_eq!(config.ingest.batch_size, 50);
        assert_eq!(config.ingest.max_batches, 20);
        assert_eq!(config.report.other_threshold, 5);
        // Untouched sections keep their defaults.
        assert_eq!(config.report.top_n, 10);
    }
}
