//! Reference matcher - exact lookup with ranked did-you-mean suggestions

use std::borrow::Cow;

use crate::config::DEFAULT_SUGGESTION_LIMIT;
use crate::types::{FieldMatch, MatchableItem, Variant};

/// Anything the matcher can resolve typed text against
pub trait Matchable {
    /// Name used for exact comparison and suggestion ranking
    fn match_name(&self) -> Cow<'_, str>;

    /// Extra spellings accepted as an exact match
    fn aliases(&self) -> Vec<String> {
        Vec::new()
    }
}

impl Matchable for MatchableItem {
    fn match_name(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.name)
    }
}

impl Matchable for Variant {
    fn match_name(&self) -> Cow<'_, str> {
        Cow::Owned(self.label())
    }

    fn aliases(&self) -> Vec<String> {
        let dimensions = self.dimensions();
        if dimensions.is_empty() {
            Vec::new()
        } else {
            vec![dimensions]
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum MatchRank {
    Prefix,
    Contains,
}

/// Resolve `text` against `candidates` with the default suggestion limit
pub fn resolve<T: Matchable + Clone>(text: &str, candidates: &[T]) -> FieldMatch<T> {
    resolve_with_limit(text, candidates, DEFAULT_SUGGESTION_LIMIT)
}

/// Resolve `text` against `candidates`
///
/// An exact case-insensitive hit on a name or alias wins outright. Otherwise
/// candidates containing the text are ranked prefix-first, then shorter
/// names first, then alphabetically, then by catalog order.
pub fn resolve_with_limit<T: Matchable + Clone>(
    text: &str,
    candidates: &[T],
    limit: usize,
) -> FieldMatch<T> {
    let needle = text.trim().to_lowercase();
    if needle.is_empty() {
        return FieldMatch::empty();
    }

    let exact = candidates.iter().find(|candidate| {
        candidate.match_name().to_lowercase() == needle
            || candidate
                .aliases()
                .iter()
                .any(|alias| alias.to_lowercase() == needle)
    });
    if let Some(candidate) = exact {
        return FieldMatch {
            raw: text.to_string(),
            matched: Some(candidate.clone()),
            suggestions: Vec::new(),
        };
    }

    let mut scored: Vec<(MatchRank, usize, String, usize)> = Vec::new();
    for (index, candidate) in candidates.iter().enumerate() {
        let name = candidate.match_name().to_lowercase();
        let rank = if name.starts_with(&needle) {
            MatchRank::Prefix
        } else if name.contains(&needle) {
            MatchRank::Contains
        } else {
            continue;
        };
        scored.push((rank, name.chars().count(), name, index));
    }

    scored.sort();

    FieldMatch {
        raw: text.to_string(),
        matched: None,
        suggestions: scored
            .into_iter()
            .take(limit)
            .map(|(_, _, _, index)| candidates[index].clone())
            .collect(),
    }
}
