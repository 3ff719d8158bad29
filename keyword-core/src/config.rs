//! # Extractor Configuration
//!
//! Every field has a default, so an empty TOML file (or none at all) gives a
//! working extractor.
//!
//! ```toml
//! user_dictionary_path = "/etc/keywords/user.dic"
//! dictionary_file = "/var/lib/keywords/managed.dic"
//! default_tag = "NNP"
//! filename_fallback = true
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{KeywordError, Result};
use crate::tagger::TAG_PROPER_NOUN;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// External dictionary applied when the extractor is built.
    pub user_dictionary_path: Option<PathBuf>,
    /// Where entries added at runtime are persisted. A temporary file is
    /// used when unset.
    pub dictionary_file: Option<PathBuf>,
    /// Tag given to plain words added to the user dictionary.
    pub default_tag: String,
    /// Re-tokenize filename-like input and merge the tokens into the nouns.
    pub filename_fallback: bool,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            user_dictionary_path: None,
            dictionary_file: None,
            default_tag: TAG_PROPER_NOUN.to_string(),
            filename_fallback: true,
        }
    }
}

impl ExtractorConfig {
    pub fn from_toml_str(content: &str, origin: &Path) -> Result<Self> {
        toml::from_str(content).map_err(|source| KeywordError::ConfigParse {
            path: origin.to_path_buf(),
            source,
        })
    }

    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| KeywordError::Config {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content, path)
    }
}
