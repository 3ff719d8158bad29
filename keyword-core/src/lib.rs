//! # keyword-core: Korean/English Keyword and Entity Extraction
//!
//! Extracts two things from free text (typically document titles, filenames
//! and short bodies in Korean mixed with English):
//!
//! - **nouns**: keyword candidates coming from a morphological [`Tagger`],
//!   normalized (particles stripped, punctuation trimmed) and deduplicated;
//! - **entities**: structured values found by a fixed, ordered regex table
//!   (dates, URLs, e-mails, phone and account numbers, numbers).
//!
//! ## Pipeline
//!
//! 1.  **Structured extraction** ([`extractor`]): the [`pattern`] table is run
//!     in priority order; accepted matches claim their spans.
//! 2.  **Tagging** ([`tagger`]): any [`Tagger`] implementation; the built-in
//!     [`ScriptTagger`](tokenizer::ScriptTagger) segments by script.
//! 3.  **Noun filtering** ([`noun`]): noun tags only, never inside a claimed
//!     span, expanded with [user dictionary](dictionary) terms.
//! 4.  **Filename fallback** ([`filename`]): filename-like input is split with
//!     separator and script-run heuristics.
//! 5.  **Clean-up** ([`reduce`]).
//!
//! ## Example
//!
//! ```rust
//! use keyword_core::KeywordExtractor;
//!
//! let extractor = KeywordExtractor::new();
//! extractor.add_user_dictionary(["하이퍼그로스플랜"]).unwrap();
//!
//! let keywords = extractor.extract_unique_keywords("하이퍼그로스플랜 보고서 991231");
//! assert!(keywords.contains(&"하이퍼그로스플랜".to_string()));
//! assert!(keywords.contains(&"991231".to_string()));
//! ```
//!
//! ## Main modules
//!
//! - [`pipeline`]: the [`KeywordExtractor`] controller and [`ExtractionResult`].
//! - [`pattern`]: entity categories and the regex table.
//! - [`dictionary`]: runtime user dictionary management.

pub mod config;
pub mod dictionary;
pub mod error;
pub mod extractor;
pub mod filename;
pub mod normalize;
pub mod noun;
pub mod ordered;
pub mod pattern;
pub mod pipeline;
pub mod reduce;
pub mod span;
pub mod tagger;
pub mod tokenizer;

pub use config::ExtractorConfig;
pub use dictionary::UserDictionary;
pub use error::{KeywordError, Result, TagError};
pub use pattern::{EntityCategory, EntityMap};
pub use pipeline::{ExtractionResult, KeywordExtractor};
pub use span::Span;
pub use tagger::{Tagger, Token};
pub use tokenizer::ScriptTagger;
