//! Configuration management for the CV ranker

use crate::error::{CvRankerError, Result};
use crate::input::folder::CV_FOLDER_NAME;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub cloud: CloudConfig,
    pub local: LocalConfig,
    pub folder: FolderConfig,
    pub http: HttpConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CloudConfig {
    /// Base URL; the model name and `:generateContent` are appended.
    pub endpoint: String,
    pub model: String,
    /// Environment variable consulted when no `--api-key` is given.
    pub api_key_env: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocalConfig {
    pub endpoint: String,
    pub default_model: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FolderConfig {
    /// Resume folder. Relative paths resolve against the working directory.
    pub path: PathBuf,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub detailed: bool,
    pub color_output: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    Console,
    Json,
    Markdown,
}

impl Default for CloudConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://generativelanguage.googleapis.com/v1beta/models".to_string(),
            model: "gemini-2.5-pro".to_string(),
            api_key_env: "GEMINI_API_KEY".to_string(),
        }
    }
}

impl Default for LocalConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:11434".to_string(),
            default_model: None,
        }
    }
}

impl Default for FolderConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(CV_FOLDER_NAME),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Console,
            detailed: false,
            color_output: true,
        }
    }
}

impl Config {
    /// Load from `path`, or from the default location when `None`.
    /// A missing file is created with defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_path = path
            .map(Path::to_path_buf)
            .unwrap_or_else(Self::config_path);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = toml::from_str(&content).map_err(|e| {
                CvRankerError::Configuration(format!("Failed to parse config: {}", e))
            })?;
            Ok(config)
        } else {
            let config = Self::default();
            config.save_to(&config_path)?;
            Ok(config)
        }
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self).map_err(|e| {
            CvRankerError::Configuration(format!("Failed to serialize config: {}", e))
        })?;

        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("cv-ranker")
            .join("config.toml")
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.http.timeout_secs.map(Duration::from_secs)
    }

    /// API key from the configured environment variable, if set and non-empty.
    pub fn cloud_api_key_from_env(&self) -> Option<String> {
        std::env::var(&self.cloud.api_key_env)
            .ok()
            .filter(|key| !key.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_creates_default_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let config = Config::load(Some(path.as_path())).unwrap();
        assert_eq!(config, Config::default());
        assert!(path.exists());
    }

    #[test]
    fn test_round_trip_preserves_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = Config::default();
        config.local.default_model = Some("llama3:8b".to_string());
        config.http.timeout_secs = Some(90);
        config.output.format = OutputFormat::Markdown;
        config.save_to(&path).unwrap();

        let loaded = Config::load(Some(path.as_path())).unwrap();
        assert_eq!(loaded.local.default_model.as_deref(), Some("llama3:8b"));
        assert_eq!(loaded.request_timeout(), Some(Duration::from_secs(90)));
        assert_eq!(loaded.output.format, OutputFormat::Markdown);
    }

    #[test]
    fn test_invalid_toml_is_a_configuration_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "cloud = [not toml").unwrap();

        let err = Config::load(Some(path.as_path())).unwrap_err();
        assert!(matches!(err, CvRankerError::Configuration(_)));
    }

    #[test]
    fn test_partial_file_fills_missing_sections_with_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[cloud]\nmodel = \"gemini-2.5-flash\"\n").unwrap();

        let config = Config::load(Some(path.as_path())).unwrap();
        assert_eq!(config.cloud.model, "gemini-2.5-flash");
        assert_eq!(config.cloud.api_key_env, "GEMINI_API_KEY");
        assert_eq!(config.local, LocalConfig::default());
        assert_eq!(config.folder.path, PathBuf::from(CV_FOLDER_NAME));
        assert_eq!(config.output.format, OutputFormat::Console);
        assert!(config.output.color_output);
    }
}
