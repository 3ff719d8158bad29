//! # Noun Filter
//!
//! Picks keyword nouns out of the tagger's token stream.
//!
//! A token is accepted when, in this order:
//! 1. its normalized surface is non-empty,
//! 2. its tag is a noun tag ([`NOUN_TAGS`](crate::tagger::NOUN_TAGS)),
//! 3. the same `(word, start)` pair was not accepted before in this call,
//! 4. it does not start inside a structured entity span,
//! 5. it is meaningful ([`is_meaningful`]).
//!
//! Every accepted noun is followed by the user dictionary terms embedded in it.

use std::collections::HashSet;

use tracing::debug;

use crate::dictionary::UserDictionary;
use crate::normalize::{is_meaningful, normalize_token};
use crate::ordered::OrderedSet;
use crate::span::SpanOccupancy;
use crate::tagger::{is_noun_tag, Token};

/// Filters tagged tokens into an ordered, deduplicated noun set.
pub fn filter_nouns(
    tokens: &[Token],
    noise_spans: &SpanOccupancy,
    dictionary: &UserDictionary,
) -> OrderedSet {
    let mut nouns = OrderedSet::new();
    let mut used: HashSet<(String, usize)> = HashSet::new();

    for token in tokens {
        let word = normalize_token(&token.surface);
        if word.is_empty() {
            continue;
        }
        if !is_noun_tag(&token.tag) {
            continue;
        }
        let key = (word, token.start);
        if used.contains(&key) {
            continue;
        }
        if noise_spans.contains_point(token.start) {
            continue;
        }
        if !is_meaningful(&key.0) {
            continue;
        }

        nouns.insert(key.0.as_str());
        nouns.extend(dictionary.expand(&key.0));
        used.insert(key);
    }

    debug!(tokens = tokens.len(), nouns = nouns.len(), "noun filter done");
    nouns
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::span::Span;
    use crate::tokenizer::ScriptTagger;

    fn empty_dictionary() -> UserDictionary {
        UserDictionary::new(Arc::new(ScriptTagger::new()))
    }

    #[test]
    fn test_accepts_nouns_and_strips_particles() {
        let tokens = vec![
            Token::new("회의는", "NNG", 0),
            Token::new("열리", "VV", 4),
            Token::new("API", "SL", 7),
        ];
        let nouns = filter_nouns(&tokens, &SpanOccupancy::new(), &empty_dictionary());
        assert_eq!(nouns.into_vec(), vec!["회의", "API"]);
    }

    #[test]
    fn test_skips_reemitted_tokens_and_occupied_starts() {
        let mut noise = SpanOccupancy::new();
        noise.push(Span::new(10, 20));
        let tokens = vec![
            Token::new("보고서", "NNG", 0),
            Token::new("보고서", "NNG", 0),
            Token::new("example", "SL", 12),
            Token::new("보고서", "NNG", 30),
        ];
        let nouns = filter_nouns(&tokens, &noise, &empty_dictionary());
        assert_eq!(nouns.into_vec(), vec!["보고서"]);
    }

    #[test]
    fn test_rejects_stop_words_and_bare_numbers() {
        let tokens = vec![
            Token::new("the", "SL", 0),
            Token::new("2024", "NR", 4),
            Token::new("“", "SW", 9),
            Token::new("현안", "NNG", 10),
        ];
        let nouns = filter_nouns(&tokens, &SpanOccupancy::new(), &empty_dictionary());
        assert_eq!(nouns.into_vec(), vec!["현안"]);
    }

    #[test]
    fn test_expands_dictionary_terms_after_the_noun() {
        let dictionary = empty_dictionary();
        dictionary.add_entries(["그로스"]).unwrap();
        let tokens = vec![Token::new("하이퍼그로스플랜을", "NNG", 0)];
        let nouns = filter_nouns(&tokens, &SpanOccupancy::new(), &dictionary);
        assert_eq!(nouns.into_vec(), vec!["하이퍼그로스플랜", "그로스"]);
    }
}
