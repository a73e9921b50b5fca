//! Configuration validator for Money-Editor
//!
//! Validates configuration values to ensure they are within acceptable ranges.

use super::loader::{Config, ConfigError, LoggingConfig, MoneySettings, TargetSettings};

/// Log levels accepted in `[logging] level`
pub const VALID_LOG_LEVELS: [&str; 6] = ["trace", "debug", "info", "warn", "error", "off"];

/// Configuration validator
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validates the entire configuration
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        Self::validate_target(&config.target)?;
        Self::validate_money(&config.money)?;
        Self::validate_logging(&config.logging)?;
        Ok(())
    }

    /// Validates target configuration
    fn validate_target(target: &TargetSettings) -> Result<(), ConfigError> {
        if target.process_name.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "Target process name cannot be empty".to_string(),
            ));
        }

        if matches!(&target.module_name, Some(module) if module.trim().is_empty()) {
            return Err(ConfigError::Invalid(
                "Target module name cannot be empty when set".to_string(),
            ));
        }

        if target.offsets.is_empty() {
            return Err(ConfigError::Invalid(
                "Pointer chain needs at least one offset".to_string(),
            ));
        }

        Ok(())
    }

    /// Validates money configuration
    fn validate_money(money: &MoneySettings) -> Result<(), ConfigError> {
        if money.cents_multiplier == 0 {
            return Err(ConfigError::Invalid(
                "Cents multiplier must be greater than 0".to_string(),
            ));
        }

        // The largest amount must still fit the 4-byte stored integer
        let fits = money
            .max_amount
            .checked_mul(u64::from(money.cents_multiplier))
            .is_some_and(|raw| raw <= i32::MAX as u64);
        if !fits {
            return Err(ConfigError::Invalid(format!(
                "Maximum amount {} times multiplier {} does not fit in a 32-bit integer",
                money.max_amount, money.cents_multiplier
            )));
        }

        Ok(())
    }

    /// Validates logging configuration
    fn validate_logging(logging: &LoggingConfig) -> Result<(), ConfigError> {
        if !VALID_LOG_LEVELS.contains(&logging.level.to_lowercase().as_str()) {
            return Err(ConfigError::Invalid(format!(
                "Invalid log level: {}. Must be one of: {:?}",
                logging.level, VALID_LOG_LEVELS
            )));
        }

        Ok(())
    }
}

/// Validates a configuration
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    ConfigValidator::validate(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_default_config() {
        assert!(validate_config(&Config::default()).is_ok());
    }

    #[test]
    fn test_empty_process_name() {
        let mut config = Config::default();
        config.target.process_name = "  ".to_string();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_empty_module_name() {
        let mut config = Config::default();
        config.target.module_name = Some(String::new());
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_empty_offsets() {
        let mut config = Config::default();
        config.target.offsets.clear();
        let err = validate_config(&config).unwrap_err();
        assert!(err.to_string().contains("at least one offset"));
    }

    #[test]
    fn test_zero_multiplier() {
        let mut config = Config::default();
        config.money.cents_multiplier = 0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_overflowing_max_amount() {
        let mut config = Config::default();
        config.money.max_amount = 999_999_999;
        assert!(validate_config(&config).is_err());

        config.money.max_amount = 21_474_836;
        assert!(validate_config(&config).is_ok());

        config.money.max_amount = 21_474_837;
        assert!(validate_config(&config).is_err());

        config.money.max_amount = u64::MAX;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_invalid_log_level() {
        let mut config = Config::default();
        config.logging.level = "verbose".to_string();
        assert!(validate_config(&config).is_err());

        config.logging.level = "DEBUG".to_string();
        assert!(validate_config(&config).is_ok());
    }
}
