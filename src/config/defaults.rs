//! Default configuration values for Money-Editor

use crate::core::types::{CENTS_PER_UNIT, MAX_ENCODABLE_AMOUNT};
use serde::{Deserialize, Serialize};

/// Default configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigDefaults {
    pub target: TargetDefaults,
    pub money: MoneyDefaults,
    pub logging: LoggingDefaults,
}

/// Default target process and pointer chain
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetDefaults {
    pub process_name: String,
    pub base_offset: u64,
    pub offsets: Vec<u64>,
}

/// Default money encoding
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoneyDefaults {
    pub max_amount: u64,
    pub cents_multiplier: u32,
}

/// Default logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingDefaults {
    pub level: String,
}

/// Returns the default configuration
pub fn default_config() -> ConfigDefaults {
    ConfigDefaults {
        target: TargetDefaults {
            process_name: "RDR2.exe".to_string(),
            base_offset: 0x052A_7128,
            offsets: vec![0x20, 0xE60],
        },
        money: MoneyDefaults {
            max_amount: MAX_ENCODABLE_AMOUNT, // 21_474_836
            cents_multiplier: CENTS_PER_UNIT,
        },
        logging: LoggingDefaults {
            level: "info".to_string(),
        },
    }
}
