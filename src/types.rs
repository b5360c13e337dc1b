//! Core data types for quick-entry results

use serde::{Deserialize, Serialize};

use crate::error::EntryError;

/// Identifier shared by items, destinations and variants
pub type EntityId = i64;

/// An item or destination eligible for fuzzy resolution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchableItem {
    pub id: EntityId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
}

/// A dimensioned variant of exactly one item
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Variant {
    pub id: EntityId,
    pub entity_id: EntityId,
    #[serde(default)]
    pub length: Option<f64>,
    #[serde(default)]
    pub width: Option<f64>,
    #[serde(default)]
    pub height: Option<f64>,
    #[serde(default)]
    pub thickness: Option<f64>,
    #[serde(default)]
    pub dimension_unit: Option<String>,
    #[serde(default)]
    pub thickness_unit: Option<String>,
}

impl MatchableItem {
    pub fn new(id: EntityId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            unit: None,
        }
    }

    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }
}

impl Variant {
    /// Dimensions joined with `x`, without any unit (`10x20`).
    pub fn dimensions(&self) -> String {
        [self.length, self.width, self.height]
            .iter()
            .flatten()
            .map(|d| d.to_string())
            .collect::<Vec<_>>()
            .join("x")
    }

    /// Display label such as `10x20mm` or `10x20mm 5mm`.
    pub fn label(&self) -> String {
        let mut label = self.dimensions();
        if !label.is_empty() {
            if let Some(unit) = &self.dimension_unit {
                label.push_str(unit);
            }
        }
        if let Some(thickness) = self.thickness {
            if !label.is_empty() {
                label.push(' ');
            }
            label.push_str(&thickness.to_string());
            if let Some(unit) = &self.thickness_unit {
                label.push_str(unit);
            }
        }
        label
    }
}

/// Outcome of resolving one free-text segment against a candidate list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldMatch<T> {
    /// Exactly what the user typed, empty if the segment was absent
    pub raw: String,
    /// Set only on an exact case-insensitive match
    #[serde(rename = "match")]
    pub matched: Option<T>,
    /// Best-first corrections, populated only when `raw` is non-empty and unmatched
    pub suggestions: Vec<T>,
}

impl<T> FieldMatch<T> {
    pub fn empty() -> Self {
        Self {
            raw: String::new(),
            matched: None,
            suggestions: Vec::new(),
        }
    }

    pub fn is_resolved(&self) -> bool {
        self.matched.is_some()
    }
}

impl<T> Default for FieldMatch<T> {
    fn default() -> Self {
        Self::empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Credit,
    #[default]
    Debit,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Credit => "credit",
            TransactionType::Debit => "debit",
        }
    }

    pub fn from_keyword(word: &str) -> Option<Self> {
        if word.eq_ignore_ascii_case("credit") {
            Some(TransactionType::Credit)
        } else if word.eq_ignore_ascii_case("debit") {
            Some(TransactionType::Debit)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Paid,
    #[default]
    Pending,
    Advance,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Paid => "paid",
            PaymentStatus::Pending => "pending",
            PaymentStatus::Advance => "advance",
        }
    }

    pub fn from_keyword(word: &str) -> Option<Self> {
        [PaymentStatus::Paid, PaymentStatus::Pending, PaymentStatus::Advance]
            .into_iter()
            .find(|status| word.eq_ignore_ascii_case(status.as_str()))
    }
}

/// Structured result of one quick-entry line
///
/// Rebuilt from scratch on every input change; two parses of the same line
/// against the same catalog compare equal.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedCommand {
    pub quantity: Option<f64>,
    pub entity: FieldMatch<MatchableItem>,
    pub variant: FieldMatch<Variant>,
    pub rate: Option<f64>,
    pub transaction_type: TransactionType,
    pub source: FieldMatch<MatchableItem>,
    pub transport_cost: Option<f64>,
    pub vehicle_type: Option<String>,
    pub reg_no: Option<String>,
    pub payment_status: PaymentStatus,
    pub complete: bool,
    pub errors: Vec<EntryError>,
}

impl ParsedCommand {
    /// `quantity * rate` when both are present.
    pub fn amount(&self) -> Option<f64> {
        Some(self.quantity? * self.rate?)
    }

    pub fn error_messages(&self) -> Vec<String> {
        self.errors.iter().map(|e| e.to_string()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variant_label() {
        let variant = Variant {
            id: 1,
            entity_id: 7,
            length: Some(10.0),
            width: Some(20.0),
            dimension_unit: Some("mm".to_string()),
            ..Default::default()
        };
        assert_eq!(variant.dimensions(), "10x20");
        assert_eq!(variant.label(), "10x20mm");

        let sheet = Variant {
            thickness: Some(2.5),
            thickness_unit: Some("mm".to_string()),
            ..variant
        };
        assert_eq!(sheet.label(), "10x20mm 2.5mm");
    }

    #[test]
    fn test_keywords_case_insensitive() {
        assert_eq!(TransactionType::from_keyword("CREDIT"), Some(TransactionType::Credit));
        assert_eq!(TransactionType::from_keyword("debits"), None);
        assert_eq!(PaymentStatus::from_keyword("Advance"), Some(PaymentStatus::Advance));
        assert_eq!(PaymentStatus::from_keyword("paidup"), None);
    }

    #[test]
    fn test_field_match_wire_name() {
        let field: FieldMatch<MatchableItem> = FieldMatch {
            raw: "cem".to_string(),
            matched: None,
            suggestions: vec![MatchableItem::new(1, "Cement")],
        };
        let json = serde_json::to_value(&field).unwrap();
        assert!(json.get("match").is_some());
        assert_eq!(json["suggestions"][0]["name"], "Cement");
    }
}
