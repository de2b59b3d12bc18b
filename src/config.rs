use crate::order::checkout::PricingMode;
use serde::{Deserialize, Serialize};
use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

pub const DEFAULT_SHORTCUT_ADDR: &str = "127.0.0.1:7878";
pub const KEYS: [&str; 3] = ["shortcut_addr", "pricing", "log_file"];

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// Where the running app listens for shortcuts.
    pub shortcut_addr: String,
    pub pricing: PricingMode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_file: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            shortcut_addr: DEFAULT_SHORTCUT_ADDR.to_string(),
            pricing: PricingMode::default(),
            log_file: None,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&get_config_file_path()?)
    }

    /// Like [`Config::load`], but a missing file yields the defaults.
    pub fn load_or_default() -> Result<Self, ConfigError> {
        match Self::load() {
            Err(ConfigError::ConfigNotFound) => Ok(Self::default()),
            other => other,
        }
    }

    pub fn load_from(config_path: &Path) -> Result<Self, ConfigError> {
        if !config_path.exists() {
            return Err(ConfigError::ConfigNotFound);
        }

        let content = fs::read_to_string(config_path)
            .map_err(|e| ConfigError::ReadError(e.to_string()))?;

        toml::from_str(&content).map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&get_config_file_path()?)
    }

    pub fn save_to(&self, config_path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| ConfigError::WriteError(e.to_string()))?;
        }

        let content = toml::to_string(self)
            .map_err(|e| ConfigError::SerializeError(e.to_string()))?;

        fs::write(config_path, content)
            .map_err(|e| ConfigError::WriteError(e.to_string()))?;

        Ok(())
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        match key {
            "shortcut_addr" => {
                value.parse::<SocketAddr>().map_err(|e| ConfigError::InvalidValue {
                    key: key.to_string(),
                    reason: e.to_string(),
                })?;
                self.shortcut_addr = value.to_string();
            }
            "pricing" => {
                self.pricing = value.parse().map_err(|reason| ConfigError::InvalidValue {
                    key: key.to_string(),
                    reason,
                })?;
            }
            "log_file" => {
                self.log_file = (!value.is_empty()).then(|| value.to_string());
            }
            _ => return Err(ConfigError::UnknownKey(key.to_string())),
        }
        Ok(())
    }

    pub fn get(&self, key: &str) -> Result<String, ConfigError> {
        match key {
            "shortcut_addr" => Ok(self.shortcut_addr.clone()),
            "pricing" => Ok(self.pricing.to_string()),
            "log_file" => Ok(self.log_file.clone().unwrap_or_default()),
            _ => Err(ConfigError::UnknownKey(key.to_string())),
        }
    }
}

pub fn get_config_file_path() -> Result<PathBuf, ConfigError> {
    let config_dir = dirs::config_dir()
        .ok_or(ConfigError::ConfigDirNotFound)?;

    Ok(config_dir.join("foodorder").join("config.toml"))
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Configuration not found. Run 'foodorder config set <key> <value>' to create one.")]
    ConfigNotFound,
    #[error("Could not find config directory")]
    ConfigDirNotFound,
    #[error("Unknown configuration key '{0}'. Supported keys: shortcut_addr, pricing, log_file.")]
    UnknownKey(String),
    #[error("Invalid value for '{key}': {reason}")]
    InvalidValue { key: String, reason: String },
    #[error("Failed to read config file: {0}")]
    ReadError(String),
    #[error("Failed to write config file: {0}")]
    WriteError(String),
    #[error("Failed to parse config file: {0}")]
    ParseError(String),
    #[error("Failed to serialize config: {0}")]
    SerializeError(String),
}
