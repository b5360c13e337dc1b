//! Segment resolver - binds segments to domain values

use crate::catalog::Catalog;
use crate::config::ParserConfig;
use crate::matcher::resolve_with_limit;
use crate::segmenter::{Segment, Segments};
use crate::types::{FieldMatch, MatchableItem, PaymentStatus, TransactionType, Variant};

/// Outcome of reading one numeric segment
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Numeric {
    Absent,
    Invalid(String),
    Value(f64),
}

impl Numeric {
    fn read(segment: Option<Segment<'_>>) -> Self {
        let Some(segment) = segment else {
            return Numeric::Absent;
        };
        match segment.text.trim().parse::<f64>() {
            Ok(value) if value.is_finite() => Numeric::Value(value),
            _ => Numeric::Invalid(segment.text.to_string()),
        }
    }
}

/// Every field of a line bound to a value, before completeness is judged
#[derive(Debug, Clone)]
pub(crate) struct Resolved {
    pub quantity: Numeric,
    pub entity: FieldMatch<MatchableItem>,
    pub variant: FieldMatch<Variant>,
    pub rate: Numeric,
    pub transaction_type: TransactionType,
    pub source: FieldMatch<MatchableItem>,
    pub transport_cost: Numeric,
    pub vehicle_type: Option<String>,
    pub reg_no: Option<String>,
    pub payment_status: PaymentStatus,
}

pub(crate) fn resolve_segments(
    segments: &Segments<'_>,
    catalog: &Catalog,
    config: &ParserConfig,
) -> Resolved {
    let limit = config.suggestion_limit;

    let entity = resolve_with_limit(segment_text(segments.item), catalog.items(), limit);

    // Variants only resolve within the matched item.
    let variant_candidates = entity
        .matched
        .as_ref()
        .map(|item| catalog.variants_for(item.id))
        .unwrap_or_default();
    let variant = resolve_with_limit(segment_text(segments.variant), variant_candidates, limit);

    let source = resolve_with_limit(segment_text(segments.source), catalog.destinations(), limit);

    let vehicle_type = Some(
        segments
            .vehicle_words
            .iter()
            .map(|w| w.text)
            .collect::<Vec<_>>()
            .join(" "),
    )
    .filter(|v| !v.is_empty());

    Resolved {
        quantity: Numeric::read(segments.quantity),
        entity,
        variant,
        rate: Numeric::read(segments.rate),
        transaction_type: segments
            .transaction_type
            .unwrap_or(config.default_transaction_type),
        source,
        transport_cost: Numeric::read(segments.transport_cost),
        vehicle_type,
        reg_no: segments.reg_no.map(|s| normalize_reg_no(s.text)),
        payment_status: segments
            .payment_status
            .unwrap_or(config.default_payment_status),
    }
}

fn segment_text<'a>(segment: Option<Segment<'a>>) -> &'a str {
    segment.map_or("", |s| s.text.trim())
}

fn normalize_reg_no(text: &str) -> String {
    text.trim()
        .chars()
        .filter(|c| *c != '-')
        .map(|c| c.to_ascii_uppercase())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::segmenter::segment;

    fn catalog() -> Catalog {
        Catalog::new(
            vec![MatchableItem::new(1, "Steel"), MatchableItem::new(2, "Cement")],
            vec![MatchableItem::new(10, "Depot")],
            vec![Variant {
                id: 100,
                entity_id: 1,
                length: Some(10.0),
                width: Some(20.0),
                ..Default::default()
            }],
        )
    }

    fn resolve_line(raw: &str) -> Resolved {
        resolve_segments(&segment(raw), &catalog(), &ParserConfig::default())
    }

    #[test]
    fn test_numbers_parsed() {
        let r = resolve_line("2.5 steel @12 carting @7.25");
        assert_eq!(r.quantity, Numeric::Value(2.5));
        assert_eq!(r.rate, Numeric::Value(12.0));
        assert_eq!(r.transport_cost, Numeric::Value(7.25));
    }

    #[test]
    fn test_malformed_numbers_are_invalid_not_zero() {
        let r = resolve_line("1.2.3 steel @inf carting @x");
        assert_eq!(r.quantity, Numeric::Invalid("1.2.3".to_string()));
        assert_eq!(r.rate, Numeric::Invalid("inf".to_string()));
        assert_eq!(r.transport_cost, Numeric::Absent);
        assert_eq!(r.vehicle_type.as_deref(), Some("x"));
    }

    #[test]
    fn test_variant_scoped_to_matched_item() {
        let r = resolve_line("5 steel 10x20 @1");
        assert_eq!(r.variant.matched.map(|v| v.id), Some(100));

        let r = resolve_line("5 cement 10x20 @1");
        assert_eq!(r.variant.raw, "10x20");
        assert!(r.variant.matched.is_none());
        assert!(r.variant.suggestions.is_empty());

        let r = resolve_line("5 stee 10x20 @1");
        assert!(r.entity.matched.is_none());
        assert!(r.variant.suggestions.is_empty());
    }

    #[test]
    fn test_defaults_and_normalization() {
        let r = resolve_line("5 steel @1 from depot carting @9 tata ace mh-12-ab-1234");
        assert_eq!(r.transaction_type, TransactionType::Debit);
        assert_eq!(r.payment_status, PaymentStatus::Pending);
        assert_eq!(r.vehicle_type.as_deref(), Some("tata ace"));
        assert_eq!(r.reg_no.as_deref(), Some("MH12AB1234"));
        assert_eq!(r.source.matched.map(|d| d.id), Some(10));
    }

    #[test]
    fn test_config_defaults_applied() {
        let config = ParserConfig {
            default_transaction_type: TransactionType::Credit,
            default_payment_status: PaymentStatus::Paid,
            ..ParserConfig::default()
        };
        let r = resolve_segments(&segment("5 steel @1"), &catalog(), &config);
        assert_eq!(r.transaction_type, TransactionType::Credit);
        assert_eq!(r.payment_status, PaymentStatus::Paid);
    }
}
