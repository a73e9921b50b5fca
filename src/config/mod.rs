//! Configuration module for Money-Editor
//!
//! Provides configuration loading, validation, and default settings for the
//! target process, its pointer chain and the money encoding.

mod defaults;
mod loader;
mod validator;

pub use defaults::{default_config, ConfigDefaults};
pub use loader::{Config, ConfigError, ConfigLoader, LoggingConfig, MoneySettings, TargetSettings};
pub use validator::{validate_config, ConfigValidator, VALID_LOG_LEVELS};

/// File read when no `--config` path is given
pub const DEFAULT_CONFIG_FILE: &str = "money-editor.toml";

// Configuration result type
pub type ConfigResult<T> = Result<T, ConfigError>;
