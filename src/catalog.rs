//! Reference catalog snapshot
//!
//! A `Catalog` is immutable once built. Hosts replace it wholesale when
//! upstream reference data changes.

use ahash::AHashMap;
use serde::de::DeserializeOwned;

use crate::error::CatalogError;
use crate::types::{EntityId, MatchableItem, Variant};

#[derive(Debug, Clone, Default)]
pub struct Catalog {
    items: Vec<MatchableItem>,
    destinations: Vec<MatchableItem>,
    variants: Vec<Variant>,
    variants_by_entity: AHashMap<EntityId, Vec<Variant>>,
}

impl Catalog {
    pub fn new(
        items: Vec<MatchableItem>,
        destinations: Vec<MatchableItem>,
        variants: Vec<Variant>,
    ) -> Self {
        let mut variants_by_entity: AHashMap<EntityId, Vec<Variant>> = AHashMap::new();
        for variant in &variants {
            variants_by_entity
                .entry(variant.entity_id)
                .or_default()
                .push(variant.clone());
        }

        Self {
            items,
            destinations,
            variants,
            variants_by_entity,
        }
    }

    /// Build a snapshot from the three JSON arrays of the catalog feed
    pub fn from_json(
        items: &str,
        destinations: &str,
        variants: &str,
    ) -> Result<Self, CatalogError> {
        Ok(Self::new(
            decode_feed("items", items)?,
            decode_feed("destinations", destinations)?,
            decode_feed("variants", variants)?,
        ))
    }

    pub fn items(&self) -> &[MatchableItem] {
        &self.items
    }

    pub fn destinations(&self) -> &[MatchableItem] {
        &self.destinations
    }

    pub fn variants(&self) -> &[Variant] {
        &self.variants
    }

    /// Variants belonging to one item, in feed order
    pub fn variants_for(&self, entity_id: EntityId) -> &[Variant] {
        self.variants_by_entity
            .get(&entity_id)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty() && self.destinations.is_empty() && self.variants.is_empty()
    }
}

fn decode_feed<T: DeserializeOwned>(feed: &'static str, json: &str) -> Result<Vec<T>, CatalogError> {
    if json.trim().is_empty() {
        return Ok(Vec::new());
    }
    serde_json::from_str(json).map_err(|source| CatalogError::Feed { feed, source })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn variant(id: EntityId, entity_id: EntityId) -> Variant {
        Variant {
            id,
            entity_id,
            length: Some(10.0),
            width: Some(20.0),
            ..Default::default()
        }
    }

    #[test]
    fn test_variants_grouped_by_item() {
        let catalog = Catalog::new(
            vec![MatchableItem::new(1, "Steel"), MatchableItem::new(2, "Cement")],
            Vec::new(),
            vec![variant(10, 1), variant(11, 2), variant(12, 1)],
        );

        let ids: Vec<_> = catalog.variants_for(1).iter().map(|v| v.id).collect();
        assert_eq!(ids, vec![10, 12]);
        assert!(catalog.variants_for(99).is_empty());
        assert_eq!(catalog.variants().len(), 3);
        assert!(!catalog.is_empty());
        assert!(Catalog::default().is_empty());
    }

    #[test]
    fn test_from_json_feed() {
        let catalog = Catalog::from_json(
            r#"[{"id": 1, "name": "Cement", "unit": "bag"}]"#,
            r#"[{"id": 5, "name": "Site A"}]"#,
            r#"[{"id": 9, "entityId": 1, "length": 10, "width": 20, "dimensionUnit": "mm"}]"#,
        )
        .unwrap();

        assert_eq!(catalog.items()[0].unit.as_deref(), Some("bag"));
        assert_eq!(catalog.destinations()[0].name, "Site A");
        assert_eq!(catalog.variants_for(1)[0].label(), "10x20mm");
    }

    #[test]
    fn test_from_json_reports_feed() {
        let err = Catalog::from_json("[]", "{not json", "").unwrap_err();
        assert!(err.to_string().contains("destinations"));
    }
}
