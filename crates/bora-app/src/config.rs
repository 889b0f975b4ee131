//! Configuration management for bora-dispatch
//!
//! Config stored at: ~/.config/bora-dispatch/config.json

use bora_types::{ConfigError, OutputFormat, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::warn;

/// Application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Folder holding the yearly exports and the consolidated dataset.
    /// Defaults to the desktop.
    #[serde(default)]
    pub data_dir: Option<PathBuf>,

    /// File name endings of yearly exports (2024y.xlsx, 2024y.csv)
    #[serde(default = "default_source_suffixes")]
    pub source_suffixes: Vec<String>,

    /// Consolidated dataset file name
    #[serde(default = "default_dataset_file")]
    pub dataset_file: String,

    /// Where receipts are saved. Defaults to the desktop.
    #[serde(default)]
    pub receipt_dir: Option<PathBuf>,

    /// Default output format (json, table)
    #[serde(default = "default_output_format")]
    pub output_format: OutputFormat,

    #[serde(default)]
    pub update: UpdateConfig,

    /// Supplier block printed on receipts
    #[serde(default)]
    pub issuer: IssuerInfo,
}

/// Remote version check settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateConfig {
    #[serde(default)]
    pub enabled: bool,

    /// Base URL serving `version.txt` and the artifact
    #[serde(default)]
    pub base_url: Option<String>,

    /// Artifact file name under the base URL
    #[serde(default = "default_artifact")]
    pub artifact: String,

    /// Where the artifact copy and version marker are kept. Defaults to the
    /// data directory.
    #[serde(default)]
    pub state_dir: Option<PathBuf>,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// 공급자 정보
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IssuerInfo {
    pub registration_number: String,
    pub trade_name: String,
    pub representative: String,
    pub address: String,
    pub business_type: String,
    pub business_items: String,
}

fn default_source_suffixes() -> Vec<String> {
    vec!["y.xlsx".to_string(), "y.csv".to_string()]
}

fn default_dataset_file() -> String {
    "보라물류_최종정밀단가표.csv".to_string()
}

fn default_output_format() -> OutputFormat {
    OutputFormat::Table
}

fn default_artifact() -> String {
    format!("bora-merge{}", std::env::consts::EXE_SUFFIX)
}

fn default_timeout_secs() -> u64 {
    10
}

impl Default for UpdateConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            base_url: None,
            artifact: default_artifact(),
            state_dir: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for IssuerInfo {
    fn default() -> Self {
        Self {
            registration_number: "123-86-13156".to_string(),
            trade_name: "보라물류".to_string(),
            representative: "백병순".to_string(),
            address: "경기도 군포시 당정동 103-3 1층".to_string(),
            business_type: "운수".to_string(),
            business_items: "퀵서비스, 운송주선, 화물운송".to_string(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: None,
            source_suffixes: default_source_suffixes(),
            dataset_file: default_dataset_file(),
            receipt_dir: None,
            output_format: default_output_format(),
            update: UpdateConfig::default(),
            issuer: IssuerInfo::default(),
        }
    }
}

/// Desktop folder, preferring the OneDrive-synced one when it exists
pub fn desktop_dir() -> Option<PathBuf> {
    if let Some(home) = dirs::home_dir() {
        let onedrive = home.join("OneDrive").join("바탕 화면");
        if onedrive.is_dir() {
            return Some(onedrive);
        }
    }
    dirs::desktop_dir().or_else(|| dirs::home_dir().map(|h| h.join("Desktop")))
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or(ConfigError::NotFound)?
            .join("bora-dispatch");
        Ok(config_dir)
    }

    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.json"))
    }

    pub fn data_dir(&self) -> Result<PathBuf> {
        if let Some(ref dir) = self.data_dir {
            return Ok(dir.clone());
        }
        Ok(desktop_dir().ok_or(ConfigError::NotFound)?)
    }

    pub fn receipt_dir(&self) -> Result<PathBuf> {
        if let Some(ref dir) = self.receipt_dir {
            return Ok(dir.clone());
        }
        Ok(desktop_dir().ok_or(ConfigError::NotFound)?)
    }

    pub fn update_state_dir(&self) -> Result<PathBuf> {
        match self.update.state_dir {
            Some(ref dir) => Ok(dir.clone()),
            None => self.data_dir(),
        }
    }

    /// Consolidated dataset path inside the data directory
    pub fn dataset_path(&self) -> Result<PathBuf> {
        Ok(self.data_dir()?.join(&self.dataset_file))
    }

    /// Places to look for the dataset, in order: explicit path, data
    /// directory, current directory
    pub fn dataset_candidates(&self, explicit: Option<&Path>) -> Vec<PathBuf> {
        let mut candidates = Vec::new();
        if let Some(path) = explicit {
            candidates.push(path.to_path_buf());
        }
        if let Ok(path) = self.dataset_path() {
            candidates.push(path);
        }
        candidates.push(PathBuf::from(&self.dataset_file));
        candidates
    }

    /// Load config from file, or create default
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = serde_json::from_str(&content)
                .map_err(|e| ConfigError::ParseError(e.to_string()))?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    /// Like `load`, but an unreadable or corrupt file falls back to the
    /// defaults with a warning so `config --reset` can still repair it
    pub fn load_or_default() -> Self {
        match Self::config_path() {
            Ok(path) => Self::load_or_default_from(&path),
            Err(e) => {
                warn!(error = %e, "no config directory, using defaults");
                Config::default()
            }
        }
    }

    pub fn load_or_default_from(path: &Path) -> Self {
        Self::load_from(path).unwrap_or_else(|e| {
            warn!(path = %path.display(), error = %e, "ignoring unusable config, using defaults");
            Config::default()
        })
    }

    /// Save config to file
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

impl std::fmt::Display for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let show = |p: Result<PathBuf>| {
            p.map(|p| p.display().to_string())
                .unwrap_or_else(|_| "(unavailable)".to_string())
        };

        writeln!(f, "Bora Dispatch Configuration")?;
        writeln!(f, "===========================")?;
        writeln!(f)?;
        writeln!(f, "Data dir:       {}", show(self.data_dir()))?;
        let patterns: Vec<_> = self.source_suffixes.iter().map(|s| format!("*{}", s)).collect();
        writeln!(f, "Source files:   {}", patterns.join(", "))?;
        writeln!(f, "Dataset:        {}", show(self.dataset_path()))?;
        writeln!(f, "Receipt dir:    {}", show(self.receipt_dir()))?;
        writeln!(f, "Output format:  {}", self.output_format)?;
        writeln!(f, "Update check:   {}", if self.update.enabled { "on" } else { "off" })?;
        writeln!(
            f,
            "Update URL:     {}",
            self.update.base_url.as_deref().unwrap_or("(not set)")
        )?;
        writeln!(f, "Issuer:         {} ({})", self.issuer.trade_name, self.issuer.registration_number)?;

        if let Ok(path) = Self::config_path() {
            writeln!(f)?;
            writeln!(f, "Config file:    {}", path.display())?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("config.json")).unwrap();
        assert_eq!(config, Config::default());
        assert!(!config.update.enabled);
        assert_eq!(config.source_suffixes, vec!["y.xlsx", "y.csv"]);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"data_dir": "/srv/bora", "update": {"enabled": true}}"#).unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.data_dir().unwrap(), PathBuf::from("/srv/bora"));
        assert!(config.update.enabled);
        assert_eq!(config.update.timeout_secs, 10);
        assert_eq!(config.issuer.trade_name, "보라물류");
    }

    #[test]
    fn test_partial_issuer_block() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"issuer": {"trade_name": "보라퀵"}}"#).unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.issuer.trade_name, "보라퀵");
        assert_eq!(
            config.issuer.registration_number,
            IssuerInfo::default().registration_number
        );
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");
        let config = Config {
            data_dir: Some(PathBuf::from("/data")),
            output_format: OutputFormat::Json,
            ..Default::default()
        };
        config.save_to(&path).unwrap();
        assert_eq!(Config::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_invalid_json_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{not json").unwrap();
        assert!(Config::load_from(&path).is_err());
    }

    #[test]
    fn test_corrupt_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{not json").unwrap();
        assert_eq!(Config::load_or_default_from(&path), Config::default());

        // a later save overwrites the corrupt file
        Config::default().save_to(&path).unwrap();
        assert_eq!(Config::load_from(&path).unwrap(), Config::default());
    }

    #[test]
    fn test_custom_source_suffixes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"source_suffixes": ["년.xlsx"]}"#).unwrap();
        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.source_suffixes, vec!["년.xlsx"]);
        assert!(config.to_string().contains("Source files:   *년.xlsx"));
    }

    #[test]
    fn test_dataset_candidates_order() {
        let config = Config {
            data_dir: Some(PathBuf::from("/data")),
            ..Default::default()
        };
        let candidates = config.dataset_candidates(Some(Path::new("/tmp/x.csv")));
        assert_eq!(
            candidates,
            vec![
                PathBuf::from("/tmp/x.csv"),
                PathBuf::from("/data").join(&config.dataset_file),
                PathBuf::from(&config.dataset_file),
            ]
        );
    }
}
