//! Segmenter - splits a quick-entry line into typed segments
//!
//! Grammar, applied left to right:
//!
//! ```text
//! {qty} {item-text} [@{rate}] [credit|debit] [from {source-text}] [carting] [@{cost}] [{vehicle}] [{regNo}] [{status}]
//! ```
//!
//! Every segment is optional. Unknown tokens are skipped and nothing here
//! fails; judging what is missing is left to the resolver.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::trace;

use crate::types::{PaymentStatus, TransactionType};

static QUANTITY: Lazy<Regex> = Lazy::new(|| Regex::new(r"^-?[0-9.]+").expect("Invalid regex pattern"));

// 10x20, 10x20x5, 10mmx20mm, 2.5x4ft
static DIMENSION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^\d+(?:\.\d+)?(?:mm|cm|m|in|ft)?(?:[x×]\d+(?:\.\d+)?(?:mm|cm|m|in|ft)?){1,2}$")
        .expect("Invalid regex pattern")
});

// MH12AB1234, MH-12-AB-1234, KA051234
static REG_NO: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^[a-z]{2}-?\d{2}-?[a-z]{0,2}-?\d{4}$").expect("Invalid regex pattern")
});

/// A contiguous run of the raw line belonging to one logical field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment<'a> {
    pub text: &'a str,
    pub start: usize,
    pub end: usize,
}

impl<'a> Segment<'a> {
    fn new(raw: &'a str, start: usize, end: usize) -> Self {
        Self {
            text: &raw[start..end],
            start,
            end,
        }
    }
}

/// Segments of one line, each absent when not typed
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Segments<'a> {
    pub quantity: Option<Segment<'a>>,
    pub item: Option<Segment<'a>>,
    pub variant: Option<Segment<'a>>,
    pub rate: Option<Segment<'a>>,
    pub transaction_type: Option<TransactionType>,
    pub source: Option<Segment<'a>>,
    pub carting: bool,
    pub transport_cost: Option<Segment<'a>>,
    pub vehicle_words: Vec<Segment<'a>>,
    pub reg_no: Option<Segment<'a>>,
    pub payment_status: Option<PaymentStatus>,
}

impl Segments<'_> {
    /// True when the line contained nothing the grammar recognised
    pub fn is_empty(&self) -> bool {
        *self == Segments::default()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Keyword {
    At,
    Type(TransactionType),
    From,
    Carting,
    Status(PaymentStatus),
}

fn keyword(word: &str) -> Option<Keyword> {
    if word == "@" {
        Some(Keyword::At)
    } else if word.eq_ignore_ascii_case("from") {
        Some(Keyword::From)
    } else if word.eq_ignore_ascii_case("carting") {
        Some(Keyword::Carting)
    } else if let Some(kind) = TransactionType::from_keyword(word) {
        Some(Keyword::Type(kind))
    } else {
        PaymentStatus::from_keyword(word).map(Keyword::Status)
    }
}

fn is_reg_no(word: &str) -> bool {
    REG_NO.is_match(word)
}

fn is_number(word: &str) -> bool {
    word.parse::<f64>().is_ok_and(f64::is_finite)
}

/// Whitespace-separated words, with every `@` split out as its own token
fn tokenize(raw: &str) -> Vec<Segment<'_>> {
    let mut tokens = Vec::new();
    let mut start = None;

    for (i, c) in raw.char_indices() {
        if c.is_whitespace() || c == '@' {
            if let Some(s) = start.take() {
                tokens.push(Segment::new(raw, s, i));
            }
            if c == '@' {
                tokens.push(Segment::new(raw, i, i + 1));
            }
        } else if start.is_none() {
            start = Some(i);
        }
    }
    if let Some(s) = start {
        tokens.push(Segment::new(raw, s, raw.len()));
    }

    tokens
}

/// Split `raw` into its grammar segments
pub fn segment(raw: &str) -> Segments<'_> {
    let tokens = tokenize(raw);
    let mut segments = Segments::default();

    // Quantity is the leading digit run, which may be glued to the item ("30cement").
    let mut cursor = 0;
    let mut item_start = tokens.first().map_or(raw.len(), |t| t.start);
    if let Some(first) = tokens.first() {
        if let Some(m) = QUANTITY.find(first.text) {
            let end = first.start + m.end();
            segments.quantity = Some(Segment::new(raw, first.start, end));
            item_start = end;
            cursor = 1;
        }
    }

    let boundary = tokens[cursor..]
        .iter()
        .position(|t| ends_item(t.text))
        .map_or(tokens.len(), |p| cursor + p);
    let item_end = tokens.get(boundary).map_or(raw.len(), |t| t.start);
    if item_start < item_end {
        split_item(raw, item_start, item_end, &mut segments);
    }

    segment_tail(raw, &tokens[boundary..], &mut segments);

    trace!(
        raw,
        quantity = ?segments.quantity.map(|s| s.text),
        item = ?segments.item.map(|s| s.text),
        source = ?segments.source.map(|s| s.text),
        "segmented quick-entry line"
    );
    segments
}

fn ends_item(word: &str) -> bool {
    matches!(
        keyword(word),
        Some(Keyword::At | Keyword::Type(_) | Keyword::From | Keyword::Carting)
    )
}

fn ends_source(word: &str) -> bool {
    keyword(word).is_some() || is_reg_no(word)
}

/// Separate a trailing dimension token from the item name
fn split_item<'a>(raw: &'a str, start: usize, end: usize, segments: &mut Segments<'a>) {
    let region = &raw[start..end];
    let trimmed = region.trim();
    if trimmed.is_empty() {
        return;
    }
    let start = start + (region.len() - region.trim_start().len());
    let end = start + trimmed.len();

    let (head, last) = match trimmed.rsplit_once(char::is_whitespace) {
        Some((head, last)) => (head.trim_end(), last),
        None => ("", trimmed),
    };

    if DIMENSION.is_match(last) {
        segments.variant = Some(Segment::new(raw, end - last.len(), end));
        if !head.is_empty() {
            segments.item = Some(Segment::new(raw, start, start + head.len()));
        }
    } else {
        segments.item = Some(Segment::new(raw, start, end));
    }
}

fn segment_tail<'a>(raw: &'a str, tokens: &[Segment<'a>], segments: &mut Segments<'a>) {
    let mut in_transport = false;
    let mut i = 0;

    while i < tokens.len() {
        let token = tokens[i];
        match keyword(token.text) {
            Some(Keyword::At) => {
                let as_rate = segments.rate.is_none() && !in_transport;
                if !as_rate {
                    in_transport = true;
                }
                // A malformed rate is kept so it can be reported; a transport
                // operand must be a number, otherwise it is a vehicle word or plate.
                let operand = tokens
                    .get(i + 1)
                    .filter(|t| keyword(t.text).is_none())
                    .filter(|t| as_rate || is_number(t.text));
                if let Some(operand) = operand {
                    let slot = if as_rate {
                        &mut segments.rate
                    } else {
                        &mut segments.transport_cost
                    };
                    slot.get_or_insert(*operand);
                    i += 1;
                }
            }
            Some(Keyword::Type(kind)) => {
                segments.transaction_type.get_or_insert(kind);
            }
            Some(Keyword::From) => {
                let words = tokens[i + 1..]
                    .iter()
                    .take_while(|t| !ends_source(t.text))
                    .count();
                if words > 0 && segments.source.is_none() {
                    let first = tokens[i + 1];
                    let last = tokens[i + words];
                    segments.source = Some(Segment::new(raw, first.start, last.end));
                }
                i += words;
            }
            Some(Keyword::Carting) => {
                in_transport = true;
                segments.carting = true;
            }
            Some(Keyword::Status(status)) => {
                segments.payment_status.get_or_insert(status);
            }
            None if is_reg_no(token.text) => {
                segments.reg_no.get_or_insert(token);
            }
            None if in_transport => {
                let bare_cost = segments.transport_cost.is_none()
                    && segments.vehicle_words.is_empty()
                    && is_number(token.text);
                if bare_cost {
                    segments.transport_cost = Some(token);
                } else {
                    segments.vehicle_words.push(token);
                }
            }
            None => {
                trace!(word = token.text, "ignoring unrecognised word");
            }
        }
        i += 1;
    }
}
