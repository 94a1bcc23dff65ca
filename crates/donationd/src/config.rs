//! TOML configuration for the donation daemon
//!
//! Every section is optional; a missing file section falls back to the
//! defaults below.

use std::path::PathBuf;

use donation_api::DEFAULT_BODY_LIMIT;
use donation_core::DEFAULT_UPLOAD_DIR;
use donation_predictor::PredictorConfig;
use serde::Deserialize;

/// Top-level daemon configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DonationdConfig {
    pub server: ServerConfig,
    pub uploads: UploadsConfig,
    pub form: FormConfig,
    pub logging: LoggingConfig,
    pub predictor: PredictorConfig,
}

/// Listener settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Maximum request body size in bytes
    pub max_upload_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            max_upload_bytes: DEFAULT_BODY_LIMIT,
        }
    }
}

/// Upload storage settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UploadsConfig {
    pub dir: PathBuf,
}

impl Default for UploadsConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from(DEFAULT_UPLOAD_DIR),
        }
    }
}

/// Donation form page settings
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FormConfig {
    /// HTML file served on GET /donate instead of the built-in page
    pub template: Option<PathBuf>,
}

/// Log output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub format: LogFormat,
}

impl DonationdConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Failed to read config file '{}': {}", path, e))?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config file '{}': {}", path, e))
    }

    /// Parse configuration from TOML text
    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Read the configured form template, if any
    pub fn form_page(&self) -> anyhow::Result<Option<String>> {
        match self.form.template {
            Some(ref path) => {
                let html = std::fs::read_to_string(path).map_err(|e| {
                    anyhow::anyhow!("Failed to read form template '{}': {}", path.display(), e)
                })?;
                Ok(Some(html))
            }
            None => Ok(None),
        }
    }
}
