//! # Keyword Pipeline: Result Assembly
//!
//! [`KeywordExtractor`] is the controller of the system. For one text it:
//!
//! 1. runs the [structured extractor](crate::extractor) (entities + claimed spans),
//! 2. asks the [`Tagger`] for tokens (a failing tagger yields no tokens),
//! 3. filters the tokens into nouns ([`filter_nouns`]), expanding user
//!    dictionary terms,
//! 4. merges filename tokens when the text looks like a filename,
//! 5. splits nouns containing spaces and drops redundant single letters,
//! 6. returns the nouns with the entities.
//!
//! ## Example
//!
//! ```rust
//! use keyword_core::{EntityCategory, KeywordExtractor};
//!
//! let extractor = KeywordExtractor::new();
//! let result = extractor.extract_keywords("회의는 2024/11/27에 열렸습니다.");
//!
//! assert_eq!(result.entities_for(EntityCategory::Date), ["2024/11/27"]);
//! assert!(result.nouns.contains(&"회의".to_string()));
//! ```

use std::path::Path;
use std::sync::Arc;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::ExtractorConfig;
use crate::dictionary::UserDictionary;
use crate::error::Result;
use crate::extractor::extract_structured;
use crate::filename::{looks_like_filename, split_filename_to_tokens};
use crate::normalize::{is_meaningful_filename_token, normalize_token};
use crate::noun::filter_nouns;
use crate::ordered::OrderedSet;
use crate::pattern::{empty_entity_map, EntityCategory, EntityMap};
use crate::reduce::{remove_redundant_short_latin, split_whitespace_nouns};
use crate::tagger::{Tagger, Token};
use crate::tokenizer::ScriptTagger;

/// Keywords and entities extracted from one text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionResult {
    /// Unique nouns in first-acceptance order.
    pub nouns: Vec<String>,
    /// Structured matches per category; every category is present.
    pub entities: EntityMap,
}

impl ExtractionResult {
    /// No nouns and every category empty.
    pub fn empty() -> Self {
        Self {
            nouns: Vec::new(),
            entities: empty_entity_map(),
        }
    }

    pub fn entities_for(&self, category: EntityCategory) -> &[String] {
        self.entities.get(&category).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Nouns followed by every category's matches (table order), each value
    /// kept at its first occurrence.
    pub fn unique_keywords(&self) -> Vec<String> {
        let mut unique = OrderedSet::new();
        unique.extend(self.nouns.iter().map(String::as_str));
        for values in self.entities.values() {
            unique.extend(values.iter().map(String::as_str));
        }
        unique.into_vec()
    }
}

/// The keyword extraction pipeline.
///
/// Cheap to share: wrap it in an `Arc` and call it from any thread. The only
/// mutable state is the user dictionary, which synchronizes itself.
pub struct KeywordExtractor {
    tagger: Arc<dyn Tagger>,
    dictionary: Arc<UserDictionary>,
    filename_fallback: bool,
}

impl KeywordExtractor {
    /// Extractor backed by the built-in [`ScriptTagger`] and default config.
    pub fn new() -> Self {
        Self::with_tagger(Arc::new(ScriptTagger::new()))
    }

    /// Extractor backed by `tagger`, default config.
    pub fn with_tagger(tagger: Arc<dyn Tagger>) -> Self {
        let config = ExtractorConfig::default();
        let dictionary = UserDictionary::new(tagger.clone()).with_default_tag(config.default_tag);
        Self {
            tagger,
            dictionary: Arc::new(dictionary),
            filename_fallback: config.filename_fallback,
        }
    }

    /// Extractor backed by `tagger` and configured by `config`. Applies the
    /// configured external dictionary, if any.
    pub fn with_config(tagger: Arc<dyn Tagger>, config: &ExtractorConfig) -> Result<Self> {
        let mut dictionary =
            UserDictionary::new(tagger.clone()).with_default_tag(config.default_tag.clone());
        if let Some(path) = &config.dictionary_file {
            dictionary = dictionary.with_dictionary_file(path);
        }
        if let Some(path) = &config.user_dictionary_path {
            dictionary.set_dictionary_path(path)?;
        }

        Ok(Self {
            tagger,
            dictionary: Arc::new(dictionary),
            filename_fallback: config.filename_fallback,
        })
    }

    /// Handle to the user dictionary shared with this extractor.
    pub fn dictionary(&self) -> Arc<UserDictionary> {
        Arc::clone(&self.dictionary)
    }

    /// Extracts nouns and structured entities from `text`.
    ///
    /// Never fails: blank text gives [`ExtractionResult::empty`] without
    /// calling the tagger, and a tagger error only empties the noun stage.
    pub fn extract_keywords(&self, text: &str) -> ExtractionResult {
        if text.trim().is_empty() {
            return ExtractionResult::empty();
        }

        // === Step 1: Structured entities ===
        let structured = extract_structured(text);

        // === Step 2: Tagging ===
        let tokens = self.analyze_safely(text);

        // === Step 3: Noun candidates ===
        let mut nouns = filter_nouns(&tokens, &structured.noise_spans, &self.dictionary);

        // === Step 4: Filename fallback ===
        if self.filename_fallback && looks_like_filename(text) {
            let before = nouns.len();
            for token in split_filename_to_tokens(text).iter() {
                let normalized = normalize_token(token);
                if is_meaningful_filename_token(&normalized) {
                    nouns.insert(normalized);
                }
            }
            debug!(added = nouns.len() - before, "filename tokens merged");
        }

        // === Step 5: Clean-up ===
        split_whitespace_nouns(&mut nouns);
        remove_redundant_short_latin(&mut nouns);

        ExtractionResult {
            nouns: nouns.into_vec(),
            entities: structured.entities,
        }
    }

    /// Flattened, deduplicated keywords: nouns first, then entities.
    pub fn extract_unique_keywords(&self, text: &str) -> Vec<String> {
        self.extract_keywords(text).unique_keywords()
    }

    /// Extracts every text independently, in parallel, keeping input order.
    pub fn extract_batch<S>(&self, texts: &[S]) -> Vec<ExtractionResult>
    where
        S: AsRef<str> + Sync,
    {
        texts
            .par_iter()
            .map(|text| self.extract_keywords(text.as_ref()))
            .collect()
    }

    /// Heuristic filename tokens (see [`crate::filename`]).
    pub fn split_filename_to_tokens(&self, filename: &str) -> Vec<String> {
        split_filename_to_tokens(filename).into_vec()
    }

    /// Adds user dictionary words; affects later calls only.
    pub fn add_user_dictionary<I, S>(&self, words: I) -> Result<usize>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.dictionary.add_entries(words)
    }

    /// Points the tagger at an existing dictionary file.
    pub fn set_user_dictionary_path(&self, path: impl AsRef<Path>) -> Result<()> {
        self.dictionary.set_dictionary_path(path)
    }

    fn analyze_safely(&self, text: &str) -> Vec<Token> {
        match self.tagger.analyze(text) {
            Ok(tokens) => tokens,
            Err(e) => {
                warn!(tagger = self.tagger.name(), error = %e, "tagger failed, continuing without nouns");
                Vec::new()
            }
        }
    }
}

impl Default for KeywordExtractor {
    fn default() -> Self {
        Self::new()
    }
}
