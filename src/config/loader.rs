//! Configuration loader for Money-Editor
//!
//! Handles loading configuration from TOML files and merging with defaults.

use super::defaults::default_config;
use crate::pointer::PointerChain;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Configuration error type
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_target")]
    pub target: TargetSettings,

    #[serde(default = "default_money")]
    pub money: MoneySettings,

    #[serde(default = "default_logging")]
    pub logging: LoggingConfig,
}

/// Which process to open and where the value lives inside it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetSettings {
    #[serde(default = "default_process_name")]
    pub process_name: String,
    /// Module the chain is based on; the process name when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub module_name: Option<String>,
    #[serde(default = "default_base_offset")]
    pub base_offset: u64,
    #[serde(default = "default_offsets")]
    pub offsets: Vec<u64>,
}

impl TargetSettings {
    /// Module name to resolve the chain against
    pub fn module(&self) -> &str {
        self.module_name.as_deref().unwrap_or(&self.process_name)
    }

    pub fn chain(&self) -> PointerChain {
        PointerChain::new(self.base_offset, self.offsets.clone())
    }
}

/// How amounts are encoded and bounded
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoneySettings {
    #[serde(default = "default_max_amount")]
    pub max_amount: u64,
    #[serde(default = "default_cents_multiplier")]
    pub cents_multiplier: u32,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

/// Configuration loader
pub struct ConfigLoader {
    config_path: PathBuf,
}

impl ConfigLoader {
    /// Creates a new configuration loader
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        ConfigLoader {
            config_path: path.as_ref().to_path_buf(),
        }
    }

    /// Path this loader reads and writes
    pub fn path(&self) -> &Path {
        &self.config_path
    }

    /// Loads configuration from file
    pub fn load(&self) -> Result<Config, ConfigError> {
        if !self.config_path.exists() {
            return Err(ConfigError::FileNotFound(
                self.config_path.display().to_string(),
            ));
        }

        let contents = fs::read_to_string(&self.config_path)?;
        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Loads configuration, falling back to defaults only when the file is
    /// missing; a present but broken file is still an error
    pub fn load_or_default(&self) -> Result<Config, ConfigError> {
        match self.load() {
            Err(ConfigError::FileNotFound(_)) => Ok(Config::default()),
            other => other,
        }
    }

    /// Saves configuration to file
    pub fn save(&self, config: &Config) -> Result<(), ConfigError> {
        let contents = toml::to_string_pretty(config)?;
        fs::write(&self.config_path, contents)?;
        Ok(())
    }
}

// Default functions for serde
fn default_target() -> TargetSettings {
    let defaults = default_config();
    TargetSettings {
        process_name: defaults.target.process_name,
        module_name: None,
        base_offset: defaults.target.base_offset,
        offsets: defaults.target.offsets,
    }
}

fn default_money() -> MoneySettings {
    let defaults = default_config();
    MoneySettings {
        max_amount: defaults.money.max_amount,
        cents_multiplier: defaults.money.cents_multiplier,
    }
}

fn default_logging() -> LoggingConfig {
    LoggingConfig {
        level: default_log_level(),
    }
}

// Individual field defaults
fn default_process_name() -> String {
    default_config().target.process_name
}

fn default_base_offset() -> u64 {
    default_config().target.base_offset
}

fn default_offsets() -> Vec<u64> {
    default_config().target.offsets
}

fn default_max_amount() -> u64 {
    default_config().money.max_amount
}

fn default_cents_multiplier() -> u32 {
    default_config().money.cents_multiplier
}

fn default_log_level() -> String {
    default_config().logging.level
}

impl Default for Config {
    fn default() -> Self {
        Config {
            target: default_target(),
            money: default_money(),
            logging: default_logging(),
        }
    }
}
