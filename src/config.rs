//! Parser configuration, loadable from TOML
//!
//! ```toml
//! suggestion_limit = 5
//! default_transaction_type = "debit"
//! default_payment_status = "pending"
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::types::{PaymentStatus, TransactionType};

/// Number of suggestions offered for an unresolved field
pub const DEFAULT_SUGGESTION_LIMIT: usize = 5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Maximum number of did-you-mean suggestions per field
    pub suggestion_limit: usize,
    /// Applied when neither `credit` nor `debit` is typed
    pub default_transaction_type: TransactionType,
    /// Applied when no payment status keyword is typed
    pub default_payment_status: PaymentStatus,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            suggestion_limit: DEFAULT_SUGGESTION_LIMIT,
            default_transaction_type: TransactionType::Debit,
            default_payment_status: PaymentStatus::Pending,
        }
    }
}

impl ParserConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: ParserConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.suggestion_limit == 0 {
            return Err(ConfigError::Validation(
                "suggestion_limit must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
