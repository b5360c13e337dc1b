//! Quick-entry parser - turns one typed line into a `ParsedCommand`

use std::sync::Arc;

use tracing::debug;

use crate::catalog::Catalog;
use crate::config::ParserConfig;
use crate::error::EntryError;
use crate::resolver::{resolve_segments, Numeric};
use crate::segmenter::segment;
use crate::splice::splice;
use crate::types::ParsedCommand;

/// Segment a suggestion can be accepted into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuggestionField {
    Item,
    Variant,
    Source,
}

/// Parse `raw` against `catalog`
///
/// Pure: the result depends only on the arguments.
pub fn parse_with(raw: &str, catalog: &Catalog, config: &ParserConfig) -> ParsedCommand {
    let segments = segment(raw);
    let resolved = resolve_segments(&segments, catalog, config);

    // Absent-field errors wait until something has been typed.
    let typed = !raw.trim().is_empty();
    let mut errors = Vec::new();

    let quantity = match resolved.quantity {
        Numeric::Value(v) if v > 0.0 => Some(v),
        Numeric::Value(_) => {
            errors.push(EntryError::NonPositiveQuantity);
            None
        }
        Numeric::Invalid(text) => {
            errors.push(EntryError::InvalidQuantity(text));
            None
        }
        Numeric::Absent => {
            if typed {
                errors.push(EntryError::MissingQuantity);
            }
            None
        }
    };

    if typed && resolved.entity.raw.is_empty() {
        errors.push(EntryError::MissingItem);
    }

    let rate = match resolved.rate {
        Numeric::Value(v) if v >= 0.0 => Some(v),
        Numeric::Value(_) => {
            errors.push(EntryError::NegativeRate);
            None
        }
        Numeric::Invalid(text) => {
            errors.push(EntryError::InvalidRate(text));
            None
        }
        Numeric::Absent => {
            if typed {
                errors.push(EntryError::MissingRate);
            }
            None
        }
    };

    if typed && resolved.source.raw.is_empty() {
        errors.push(EntryError::MissingSource);
    }

    // Transport cost is optional, so a bad one is simply dropped.
    let transport_cost = match resolved.transport_cost {
        Numeric::Value(v) if v >= 0.0 => Some(v),
        _ => None,
    };

    let complete = quantity.is_some()
        && rate.is_some()
        && resolved.entity.is_resolved()
        && resolved.source.is_resolved();

    debug!(complete, errors = errors.len(), "parsed quick-entry line");

    ParsedCommand {
        quantity,
        entity: resolved.entity,
        variant: resolved.variant,
        rate,
        transaction_type: resolved.transaction_type,
        source: resolved.source,
        transport_cost,
        vehicle_type: resolved.vehicle_type,
        reg_no: resolved.reg_no,
        payment_status: resolved.payment_status,
        complete,
        errors,
    }
}

/// Parser holding the current catalog snapshot
///
/// The snapshot is swapped whole by [`set_catalog`](Self::set_catalog), so a
/// parse always sees one consistent catalog.
#[derive(Debug, Clone, Default)]
pub struct QuickEntryParser {
    catalog: Arc<Catalog>,
    config: ParserConfig,
}

impl QuickEntryParser {
    pub fn new(config: ParserConfig) -> Self {
        Self {
            catalog: Arc::default(),
            config,
        }
    }

    pub fn with_catalog(mut self, catalog: Catalog) -> Self {
        self.set_catalog(catalog);
        self
    }

    pub fn set_catalog(&mut self, catalog: Catalog) {
        self.set_snapshot(Arc::new(catalog));
    }

    /// Install a snapshot that may be shared with other parsers
    pub fn set_snapshot(&mut self, catalog: Arc<Catalog>) {
        debug!(
            items = catalog.items().len(),
            destinations = catalog.destinations().len(),
            variants = catalog.variants().len(),
            "replaced reference catalog"
        );
        self.catalog = catalog;
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn snapshot(&self) -> Arc<Catalog> {
        Arc::clone(&self.catalog)
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    pub fn parse(&self, raw: &str) -> ParsedCommand {
        parse_with(raw, &self.catalog, &self.config)
    }

    /// Rewrite only the given segment of `raw` with an accepted suggestion
    ///
    /// Returns `raw` unchanged when that segment was not typed.
    pub fn accept_suggestion(&self, raw: &str, field: SuggestionField, replacement: &str) -> String {
        let segments = segment(raw);
        let target = match field {
            SuggestionField::Item => segments.item,
            SuggestionField::Variant => segments.variant,
            SuggestionField::Source => segments.source,
        };
        match target {
            Some(s) => splice(raw, s.start, s.end, replacement),
            None => raw.to_string(),
        }
    }
}
