//! Form serializer - shapes a complete command for the create-transaction call

use serde::Serialize;

use crate::error::FormError;
use crate::types::{EntityId, ParsedCommand, PaymentStatus, TransactionType};

/// Field set expected by the create-transaction command
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormData {
    pub entity_id: EntityId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variant_id: Option<EntityId>,
    pub destination_id: EntityId,
    pub quantity: f64,
    pub rate: f64,
    pub amount: f64,
    pub transaction_type: TransactionType,
    pub payment_status: PaymentStatus,
    /// Present only when a transport cost was resolved
    #[serde(flatten)]
    pub transport: Option<TransportFields>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransportFields {
    pub transportation_cost: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vehicle_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reg_no: Option<String>,
}

/// Map a complete command onto the creation form
///
/// Fails with [`FormError::Incomplete`] when any field `complete` depends on
/// is unresolved.
pub fn to_form_data(cmd: &ParsedCommand) -> Result<FormData, FormError> {
    let required = (
        cmd.quantity,
        cmd.rate,
        cmd.entity.matched.as_ref(),
        cmd.source.matched.as_ref(),
    );
    let (Some(quantity), Some(rate), Some(entity), Some(source)) = required else {
        let missing = [
            required.0.is_none(),
            required.1.is_none(),
            required.2.is_none(),
            required.3.is_none(),
        ]
        .iter()
        .filter(|m| **m)
        .count();
        return Err(FormError::Incomplete(missing));
    };

    let transport = cmd.transport_cost.map(|cost| TransportFields {
        transportation_cost: cost,
        vehicle_type: cmd.vehicle_type.clone(),
        reg_no: cmd.reg_no.clone(),
    });

    Ok(FormData {
        entity_id: entity.id,
        variant_id: cmd.variant.matched.as_ref().map(|v| v.id),
        destination_id: source.id,
        quantity,
        rate,
        amount: quantity * rate,
        transaction_type: cmd.transaction_type,
        payment_status: cmd.payment_status,
        transport,
    })
}

impl FormData {
    /// Ordered `(key, value)` pairs for form-encoded submission
    pub fn to_fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = vec![("entity_id", self.entity_id.to_string())];
        if let Some(variant_id) = self.variant_id {
            fields.push(("variant_id", variant_id.to_string()));
        }
        fields.extend([
            ("destination_id", self.destination_id.to_string()),
            ("quantity", self.quantity.to_string()),
            ("rate", self.rate.to_string()),
            ("amount", self.amount.to_string()),
            ("transaction_type", self.transaction_type.as_str().to_string()),
            ("payment_status", self.payment_status.as_str().to_string()),
        ]);

        if let Some(transport) = &self.transport {
            fields.push(("transportation_cost", transport.transportation_cost.to_string()));
            if let Some(vehicle_type) = &transport.vehicle_type {
                fields.push(("vehicle_type", vehicle_type.clone()));
            }
            if let Some(reg_no) = &transport.reg_no {
                fields.push(("reg_no", reg_no.clone()));
            }
        }
        fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{FieldMatch, MatchableItem};

    fn field(item: MatchableItem) -> FieldMatch<MatchableItem> {
        FieldMatch {
            raw: item.name.clone(),
            matched: Some(item),
            suggestions: Vec::new(),
        }
    }

    fn command() -> ParsedCommand {
        ParsedCommand {
            quantity: Some(30.0),
            entity: field(MatchableItem::new(1, "Cement")),
            variant: FieldMatch::empty(),
            rate: Some(100.0),
            transaction_type: TransactionType::Debit,
            source: field(MatchableItem::new(7, "Site A")),
            transport_cost: None,
            vehicle_type: Some("truck".to_string()),
            reg_no: None,
            payment_status: PaymentStatus::Pending,
            complete: true,
            errors: Vec::new(),
        }
    }

    #[test]
    fn test_omits_transport_without_cost() {
        let form = to_form_data(&command()).unwrap();
        assert_eq!(form.amount, 3000.0);
        assert_eq!(form.transport, None);

        let json = serde_json::to_value(&form).unwrap();
        assert_eq!(json["entity_id"], 1);
        assert_eq!(json["destination_id"], 7);
        assert_eq!(json["transaction_type"], "debit");
        assert!(json.get("transportation_cost").is_none());
        assert!(json.get("vehicle_type").is_none());
        assert!(json.get("variant_id").is_none());

        let keys: Vec<_> = form.to_fields().into_iter().map(|(k, _)| k).collect();
        assert_eq!(
            keys,
            vec!["entity_id", "destination_id", "quantity", "rate", "amount", "transaction_type", "payment_status"]
        );
    }

    #[test]
    fn test_includes_transport_with_cost() {
        let cmd = ParsedCommand {
            transport_cost: Some(200.0),
            reg_no: Some("MH12AB1234".to_string()),
            ..command()
        };
        let form = to_form_data(&cmd).unwrap();

        let json = serde_json::to_value(&form).unwrap();
        assert_eq!(json["transportation_cost"], 200.0);
        assert_eq!(json["vehicle_type"], "truck");
        assert_eq!(json["reg_no"], "MH12AB1234");

        let fields = form.to_fields();
        assert!(fields.contains(&("transportation_cost", "200".to_string())));
    }

    #[test]
    fn test_rejects_incomplete() {
        let cmd = ParsedCommand {
            rate: None,
            complete: false,
            ..command()
        };
        assert_eq!(to_form_data(&cmd), Err(FormError::Incomplete(1)));
    }
}
