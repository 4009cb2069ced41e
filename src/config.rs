use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use crate::ocr::{RecognizerSettings, DEFAULT_THRESHOLD};

const APP_DIR: &str = "ValoCoach";
const CONFIG_FILE: &str = "config.json";

/// Settings for the advice generator. The API key is never stored here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdviceSettings {
    /// Gemini model name
    pub model: String,

    /// Base URL of the generative language API
    pub endpoint: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for AdviceSettings {
    fn default() -> Self {
        Self {
            model: "gemini-2.5-flash".to_string(),
            endpoint: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            timeout_secs: 30,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Binary threshold for OCR preprocessing (1-255)
    pub threshold: u8,

    /// Directory holding Tesseract traineddata; system install when unset
    pub tessdata_path: Option<PathBuf>,

    /// Tesseract language code
    pub language: String,

    /// Tesseract page segmentation mode (0-13)
    pub page_segmentation_mode: u8,

    pub advice: AdviceSettings,
}

impl Default for Config {
    fn default() -> Self {
        let recognizer = RecognizerSettings::default();
        Self {
            threshold: DEFAULT_THRESHOLD,
            tessdata_path: recognizer.tessdata_path,
            language: recognizer.language,
            page_segmentation_mode: recognizer.page_segmentation_mode,
            advice: AdviceSettings::default(),
        }
    }
}

impl Config {
    /// Load configuration from a JSON file.
    /// A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::info!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let load_failed = |source: Box<dyn std::error::Error + Send + Sync>| {
            ConfigError::LoadFailed {
                path: path.display().to_string(),
                source,
            }
        };

        let content = fs::read_to_string(path).map_err(|e| load_failed(Box::new(e)))?;
        let config: Config =
            serde_json::from_str(&content).map_err(|e| load_failed(Box::new(e)))?;
        config.validate()?;

        tracing::info!("✓ Loaded config from: {}", path.display());
        Ok(config)
    }

    /// Load from the platform config directory
    pub fn load_default() -> Result<Self, ConfigError> {
        Self::load(&Self::default_path()?)
    }

    /// Save configuration to disk
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let save_failed = |source: Box<dyn std::error::Error + Send + Sync>| {
            ConfigError::SaveFailed {
                path: path.display().to_string(),
                source,
            }
        };

        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| save_failed(Box::new(e)))?;
        }

        let json = serde_json::to_string_pretty(self).map_err(|e| save_failed(Box::new(e)))?;
        fs::write(path, json).map_err(|e| save_failed(Box::new(e)))?;

        Ok(())
    }

    /// `<config dir>/ValoCoach/config.json`
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
            .ok_or(ConfigError::NoConfigDir)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.threshold == 0 {
            return Err(ConfigError::Invalid(
                "threshold must be between 1 and 255".to_string(),
            ));
        }
        if self.page_segmentation_mode > 13 {
            return Err(ConfigError::Invalid(format!(
                "page_segmentation_mode {} is out of range 0-13",
                self.page_segmentation_mode
            )));
        }
        if self.language.trim().is_empty() {
            return Err(ConfigError::Invalid("language must not be empty".to_string()));
        }
        if self.advice.model.trim().is_empty() {
            return Err(ConfigError::Invalid("advice.model must not be empty".to_string()));
        }
        if self.advice.timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "advice.timeout_secs must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// Tesseract settings derived from this configuration
    pub fn recognizer_settings(&self) -> RecognizerSettings {
        RecognizerSettings {
            tessdata_path: self.tessdata_path.clone(),
            language: self.language.clone(),
            page_segmentation_mode: self.page_segmentation_mode,
        }
    }
}
