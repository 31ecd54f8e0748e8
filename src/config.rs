use crate::core::text_normalizer::NormalizerConfig;
use crate::error::{SearchError, SearchResult};
use crate::library::SearchField;
use crate::matcher::DEFAULT_THRESHOLD;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    // Catalog
    pub catalog_path: String,

    // Matching
    pub threshold: f64,
    pub search_fields: Vec<SearchField>,
    pub ranked: bool,

    // Shell
    pub list_on_start: bool,

    // Meta
    pub log_level: String,

    // Data
    pub normalizer: NormalizerConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalog_path: "media_data.txt".to_string(),
            threshold: DEFAULT_THRESHOLD,
            search_fields: vec![SearchField::Description],
            ranked: false,
            list_on_start: true,
            log_level: "INFO".to_string(),
            normalizer: NormalizerConfig::default(),
        }
    }
}

impl Config {
    /// Load config from the default location, or fall back to defaults
    pub fn load() -> SearchResult<Self> {
        Self::load_from(&config_path())
    }

    /// Load config from `path`
    ///
    /// A missing file yields defaults. A corrupt file is moved aside to
    /// `*.json.corrupt` and defaults are used.
    pub fn load_from(path: &Path) -> SearchResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        match serde_json::from_str::<Self>(&content) {
            Ok(config) => {
                config.validate()?;
                Ok(config)
            }
            Err(e) => {
                tracing::warn!("⚠️ Config file corrupted or invalid, using defaults: {}", e);
                let backup_path = path.with_extension("json.corrupt");
                let _ = std::fs::rename(path, &backup_path);
                Ok(Self::default())
            }
        }
    }

    /// Reject values the matcher cannot work with
    pub fn validate(&self) -> SearchResult<()> {
        if !self.threshold.is_finite() || self.threshold < 0.0 {
            return Err(SearchError::Config(format!(
                "threshold must be a finite non-negative number, got {}",
                self.threshold
            )));
        }
        if self.search_fields.is_empty() {
            return Err(SearchError::Config(
                "search_fields must name at least one field".to_string(),
            ));
        }
        Ok(())
    }

    /// Save config to `path`, creating parent directories
    pub fn save_to(&self, path: &Path) -> SearchResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

pub fn config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("mediafind")
        .join("config.json")
}
