//! Error types for parsing, serialization and configuration

use serde::{Serialize, Serializer};
use thiserror::Error;

/// Broad category of a user-facing parse error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// A required segment was not typed.
    Absent,
    /// A numeric segment was typed but is unusable.
    Invalid,
}

/// User-facing problem found while parsing a quick-entry line
///
/// Collected into `ParsedCommand::errors`; never returned as `Err`.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EntryError {
    #[error("quantity is required")]
    MissingQuantity,
    #[error("quantity `{0}` is not a number")]
    InvalidQuantity(String),
    #[error("quantity must be greater than zero")]
    NonPositiveQuantity,
    #[error("item is required")]
    MissingItem,
    #[error("rate is required (use @rate)")]
    MissingRate,
    #[error("rate `{0}` is not a number")]
    InvalidRate(String),
    #[error("rate cannot be negative")]
    NegativeRate,
    #[error("source is required (use from <name>)")]
    MissingSource,
}

impl EntryError {
    pub fn class(&self) -> ErrorClass {
        match self {
            EntryError::MissingQuantity
            | EntryError::MissingItem
            | EntryError::MissingRate
            | EntryError::MissingSource => ErrorClass::Absent,
            EntryError::InvalidQuantity(_)
            | EntryError::NonPositiveQuantity
            | EntryError::InvalidRate(_)
            | EntryError::NegativeRate => ErrorClass::Invalid,
        }
    }
}

impl Serialize for EntryError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Raised when an incomplete command is handed to the form serializer
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FormError {
    #[error("command is incomplete: {0} field(s) unresolved")]
    Incomplete(usize),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("validation error: {0}")]
    Validation(String),
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("malformed {feed} feed: {source}")]
    Feed {
        feed: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_as_message() {
        let json = serde_json::to_string(&vec![EntryError::InvalidRate("abc".into())]).unwrap();
        assert_eq!(json, r#"["rate `abc` is not a number"]"#);
    }

    #[test]
    fn test_classes() {
        assert_eq!(EntryError::MissingSource.class(), ErrorClass::Absent);
        assert_eq!(EntryError::NonPositiveQuantity.class(), ErrorClass::Invalid);
    }
}
