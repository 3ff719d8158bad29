//! # Redundancy Reducer
//!
//! Final clean-up of the noun set before it is returned.

use std::collections::HashSet;

use crate::normalize::{is_meaningful, normalize_token};
use crate::ordered::OrderedSet;

fn is_alphanumeric_word(word: &str) -> bool {
    word.chars().count() >= 2 && word.chars().all(|c| c.is_ascii_alphanumeric())
}

fn is_single_latin_letter(word: &str) -> bool {
    let mut chars = word.chars();
    matches!((chars.next(), chars.next()), (Some(c), None) if c.is_ascii_alphabetic())
}

/// Replaces nouns containing spaces by their normalized, meaningful parts.
pub fn split_whitespace_nouns(nouns: &mut OrderedSet) {
    if !nouns.iter().any(|noun| noun.contains(' ')) {
        return;
    }

    let mut rebuilt = OrderedSet::new();
    for noun in nouns.iter() {
        if !noun.contains(' ') {
            rebuilt.insert(noun.as_str());
            continue;
        }
        for part in noun.split_whitespace() {
            let normalized = normalize_token(part);
            if !normalized.is_empty() && is_meaningful(&normalized) {
                rebuilt.insert(normalized);
            }
        }
    }
    *nouns = rebuilt;
}

/// Drops single Latin letters that prefix a longer alphanumeric noun
/// (`"A"` goes when `"API"` is present).
pub fn remove_redundant_short_latin(nouns: &mut OrderedSet) {
    let longer: HashSet<String> = nouns
        .iter()
        .filter(|noun| is_alphanumeric_word(noun))
        .map(|noun| noun.to_lowercase())
        .collect();
    if longer.is_empty() {
        return;
    }

    nouns.retain(|noun| {
        if !is_single_latin_letter(noun) {
            return true;
        }
        let lower = noun.to_lowercase();
        !longer.iter().any(|l| l.starts_with(&lower))
    });
}
