//! Load: config loading from file and environment variables.

use std::fs;
use std::path::Path;

use thiserror::Error;

use super::model::LogweaveConfig;

pub const DEFAULT_CONFIG_FILE: &str = "logweave.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

impl LogweaveConfig {
    /// Load configuration from file and environment variables
    /// Priority: Environment Variables > Config File > Defaults
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = std::env::var("LOGWEAVE_CONFIG_FILE")
            .unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string());

        let mut config = if Path::new(&config_path).exists() {
            tracing::info!("Loading configuration from: {}", config_path);
            Self::from_file(&config_path)?
        } else {
            tracing::debug!("Config file not found at {}, using defaults", config_path);
            Self::default()
        };

        config.apply_env(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        let config: LogweaveConfig = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Overlay `LOGWEAVE_*` variables read through `lookup`.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(size) = lookup("LOGWEAVE_SAMPLE_SIZE") {
            self.sample_size = size.trim().parse().map_err(|_| {
                ConfigError::Invalid(format!("LOGWEAVE_SAMPLE_SIZE is not a number: {}", size))
            })?;
        }
        if let Some(policy) = lookup("LOGWEAVE_ORPHAN_POLICY") {
            self.orphan_policy = policy.parse().map_err(ConfigError::Invalid)?;
        }
        if let Some(output) = lookup("LOGWEAVE_OUTPUT") {
            self.output = output.parse().map_err(ConfigError::Invalid)?;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sample_size == 0 {
            return Err(ConfigError::Invalid("sample_size must be > 0".to_string()));
        }
        Ok(())
    }
}
