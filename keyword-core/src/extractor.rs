//! # Structured Extractor
//!
//! Runs the [pattern table](crate::pattern) over the input in priority order.
//!
//! ## Algorithm
//! 1. For each category, scan its non-overlapping matches left to right.
//! 2. Drop matches that fail the category validator (no span is recorded).
//! 3. For suppressible categories, drop matches fully contained in a span
//!    accepted earlier in this call (by any category).
//! 4. Accept the rest: record the text, claim the span, and mark it as noise
//!    for the noun stage unless the category is `number`.
//!
//! ## Example
//! In `"010-1234-5678"` the phone number is accepted first, so the `5678`
//! that the `number` pattern would otherwise report is suppressed.

use tracing::{debug, warn};

use crate::pattern::{empty_entity_map, pattern_table, EntityMap};
use crate::span::{CharIndex, Span, SpanOccupancy};

/// Output of one structured extraction pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StructuredMatches {
    /// Accepted match texts per category (every category present).
    pub entities: EntityMap,
    /// Spans of accepted matches from every category except `number`.
    pub noise_spans: SpanOccupancy,
}

/// Extracts structured entities and the spans they claim.
pub fn extract_structured(text: &str) -> StructuredMatches {
    let index = CharIndex::new(text);
    let mut entities = empty_entity_map();
    let mut accepted = SpanOccupancy::new();
    let mut noise_spans = SpanOccupancy::new();

    for rule in pattern_table() {
        let matches = entities.entry(rule.category).or_default();

        for found in rule.regex.find_iter(text) {
            let found = match found {
                Ok(m) => m,
                Err(e) => {
                    // Backtracking limit: keep what was accepted so far for this category.
                    warn!(category = %rule.category, error = %e, "pattern scan aborted");
                    break;
                }
            };
            let matched = found.as_str();

            if let Some(validate) = rule.validate {
                if !validate(matched) {
                    continue;
                }
            }

            let span: Span = index.span(found.start(), found.end());
            if rule.suppress_if_contained && accepted.contains_span(&span) {
                continue;
            }

            matches.push(matched.to_string());
            accepted.push(span);
            if rule.blocks_noun_spans {
                noise_spans.push(span);
            }
        }
    }

    debug!(
        matched = accepted.len(),
        noise_spans = noise_spans.len(),
        "structured extraction done"
    );

    StructuredMatches {
        entities,
        noise_spans,
    }
}
