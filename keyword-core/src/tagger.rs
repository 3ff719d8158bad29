//! # Tagger Capability and Part-of-Speech Tags
//!
//! The pipeline does not analyze morphology itself. It asks a [`Tagger`] for
//! a token sequence and only reads three things from each token: the surface
//! form, the tag and where it starts.
//!
//! ## Tag set (Sejong-style, as used by Korean analyzers)
//!
//! | Tag   | Meaning                    | Noun candidate |
//! |-------|----------------------------|----------------|
//! | NNG   | General noun               | yes            |
//! | NNP   | Proper noun                | yes            |
//! | NP    | Pronoun                    | yes            |
//! | NR    | Numeral                    | yes            |
//! | SH    | Chinese characters (Hanja) | yes            |
//! | SL    | Foreign (Latin) word       | yes            |
//! | NA    | Unanalyzable token         | yes            |
//! | SN    | Number                     | no             |
//! | JX    | Particle                   | no             |
//! | VV    | Verb / predicate           | no             |
//! | MAJ   | Conjunctive adverb         | no             |
//! | SF/SW | Punctuation / symbol       | no             |

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::TagError;

/// One morpheme reported by a tagger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// Surface text as it appears in the input.
    pub surface: String,
    /// Part-of-speech tag (e.g. `"NNG"`).
    pub tag: String,
    /// Character offset of the first character in the input.
    pub start: usize,
}

impl Token {
    pub fn new(surface: impl Into<String>, tag: impl Into<String>, start: usize) -> Self {
        Self {
            surface: surface.into(),
            tag: tag.into(),
            start,
        }
    }
}

pub const TAG_GENERAL_NOUN: &str = "NNG";
pub const TAG_PROPER_NOUN: &str = "NNP";
pub const TAG_NUMBER: &str = "SN";
pub const TAG_HANJA: &str = "SH";
pub const TAG_FOREIGN: &str = "SL";
pub const TAG_PARTICLE: &str = "JX";
pub const TAG_PREDICATE: &str = "VV";
pub const TAG_CONJUNCTION: &str = "MAJ";
pub const TAG_FINAL_PUNCT: &str = "SF";
pub const TAG_SYMBOL: &str = "SW";

/// Tags whose tokens may become noun keywords.
pub const NOUN_TAGS: &[&str] = &["NNG", "NNP", "NP", "NR", "SH", "SL", "NA"];

pub fn is_noun_tag(tag: &str) -> bool {
    NOUN_TAGS.contains(&tag)
}

/// Morphological analyzer used by the pipeline.
///
/// Implementations must be shareable across threads; reloading the user
/// dictionary goes through `&self`, so they manage their own interior
/// mutability.
pub trait Tagger: Send + Sync {
    /// Short identifier for logs (e.g. `"script"`).
    fn name(&self) -> &str;

    /// Splits `text` into tagged tokens, in text order.
    fn analyze(&self, text: &str) -> Result<Vec<Token>, TagError>;

    /// Replaces the tagger's user dictionary with the contents of `path`.
    fn load_user_dictionary(&self, path: &Path) -> Result<(), TagError>;
}
