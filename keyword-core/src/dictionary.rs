//! # User Dictionary
//!
//! Terms supplied by the caller that the tagger should treat as single
//! words, and that the noun stage should surface when they appear inside a
//! longer noun.
//!
//! ## Two views of the same data
//!
//! | View        | Content                         | Used for                          |
//! |-------------|---------------------------------|-----------------------------------|
//! | entries     | `word<TAB>TAG` lines            | persisted, reloaded by the tagger |
//! | base words  | the `word` part of each entry   | [`UserDictionary::expand`]        |
//!
//! Both only grow, except that [`UserDictionary::set_dictionary_path`]
//! replaces the base words with the contents of an external file.
//!
//! ## Locking
//! Mutations hold the write lock across the file write and the tagger
//! reload, so two writers never interleave and no reader sees half an
//! update. [`UserDictionary::expand`] only takes the read lock.

use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock};

use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::error::{KeywordError, Result};
use crate::normalize::is_meaningful;
use crate::ordered::OrderedSet;
use crate::tagger::{Tagger, TAG_PROPER_NOUN};

/// Where managed entries are written for the tagger to pick up.
#[derive(Debug)]
enum DictionaryResource {
    /// Temporary file owned by the dictionary, removed on drop.
    Managed(NamedTempFile),
    /// Caller-chosen file.
    File(PathBuf),
}

impl DictionaryResource {
    fn path(&self) -> &Path {
        match self {
            DictionaryResource::Managed(file) => file.path(),
            DictionaryResource::File(path) => path,
        }
    }
}

#[derive(Debug, Default)]
struct DictionaryState {
    entries: OrderedSet,
    base_words: OrderedSet,
    resource: Option<DictionaryResource>,
}

/// Shared, synchronized registry of user terms bound to one tagger.
pub struct UserDictionary {
    tagger: Arc<dyn Tagger>,
    default_tag: String,
    dictionary_file: Option<PathBuf>,
    state: RwLock<DictionaryState>,
}

impl std::fmt::Debug for UserDictionary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserDictionary")
            .field("tagger", &self.tagger.name())
            .field("default_tag", &self.default_tag)
            .field("dictionary_file", &self.dictionary_file)
            .finish_non_exhaustive()
    }
}

impl UserDictionary {
    pub fn new(tagger: Arc<dyn Tagger>) -> Self {
        Self {
            tagger,
            default_tag: TAG_PROPER_NOUN.to_string(),
            dictionary_file: None,
            state: RwLock::new(DictionaryState::default()),
        }
    }

    /// Tag given to plain words passed to [`add_entries`](Self::add_entries).
    pub fn with_default_tag(mut self, tag: impl Into<String>) -> Self {
        self.default_tag = tag.into();
        self
    }

    /// Persist managed entries to `path` instead of a temporary file.
    pub fn with_dictionary_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.dictionary_file = Some(path.into());
        self
    }

    /// Adds entries and reloads the tagger if anything new was added.
    ///
    /// Plain words become `word<TAB>default_tag`; inputs that already contain
    /// a tab or a space are kept verbatim. Returns the number of new entries.
    ///
    /// On a write or reload failure the entries added by this call are
    /// dropped again, so a retry adds and persists them.
    pub fn add_entries<I, S>(&self, words: I) -> Result<usize>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        let entries_before = state.entries.clone();
        let base_words_before = state.base_words.clone();

        let mut added = 0;
        for word in words {
            let Some(entry) = normalize_entry(word.as_ref(), &self.default_tag) else {
                continue;
            };
            if let Some(base) = entry.split_whitespace().next() {
                state.base_words.insert(base);
            }
            if state.entries.insert(entry) {
                added += 1;
            }
        }

        if added > 0 {
            if let Err(e) = self.apply(&mut state) {
                state.entries = entries_before;
                state.base_words = base_words_before;
                return Err(e);
            }
            info!(added, total = state.entries.len(), "user dictionary updated");
        }
        Ok(added)
    }

    /// Replaces the base words with those of an existing dictionary file and
    /// points the tagger at it. A blank path is ignored.
    pub fn set_dictionary_path(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if path.as_os_str().is_empty() || path.to_string_lossy().trim().is_empty() {
            return Ok(());
        }

        let content = std::fs::read_to_string(path).map_err(|source| KeywordError::DictionaryRead {
            path: path.to_path_buf(),
            source,
        })?;
        let base_words = parse_base_words(&content);

        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        self.tagger
            .load_user_dictionary(path)
            .map_err(|source| KeywordError::DictionaryReload {
                path: path.to_path_buf(),
                source,
            })?;
        state.base_words = base_words;

        info!(path = %path.display(), words = state.base_words.len(), "user dictionary path set");
        Ok(())
    }

    /// Dictionary words embedded in `word` (excluding `word` itself), in
    /// the order they were added.
    pub fn expand(&self, word: &str) -> Vec<String> {
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        state
            .base_words
            .iter()
            .filter(|base| base.as_str() != word && word.contains(base.as_str()) && is_meaningful(base))
            .cloned()
            .collect()
    }

    /// Managed entries, in insertion order.
    pub fn entries(&self) -> Vec<String> {
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        state.entries.iter().cloned().collect()
    }

    /// Base words used for expansion, in insertion order.
    pub fn base_words(&self) -> Vec<String> {
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        state.base_words.iter().cloned().collect()
    }

    /// File the managed entries were last written to, if any.
    pub fn resource_path(&self) -> Option<PathBuf> {
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        state.resource.as_ref().map(|r| r.path().to_path_buf())
    }

    /// Writes all entries to the resource and tells the tagger to reload it.
    fn apply(&self, state: &mut DictionaryState) -> Result<()> {
        let resource = match state.resource.take() {
            Some(resource) => resource,
            None => self.create_resource()?,
        };
        let path = resource.path().to_path_buf();
        state.resource = Some(resource);

        let content = state.entries.iter().map(String::as_str).collect::<Vec<_>>().join("\n");
        std::fs::write(&path, content).map_err(|source| KeywordError::DictionaryWrite {
            path: path.clone(),
            source,
        })?;
        debug!(path = %path.display(), entries = state.entries.len(), "user dictionary written");

        self.tagger
            .load_user_dictionary(&path)
            .map_err(|source| KeywordError::DictionaryReload { path, source })
    }

    fn create_resource(&self) -> Result<DictionaryResource> {
        if let Some(path) = &self.dictionary_file {
            return Ok(DictionaryResource::File(path.clone()));
        }
        tempfile::Builder::new()
            .prefix("keyword-extractor-userdic")
            .suffix(".txt")
            .tempfile()
            .map(DictionaryResource::Managed)
            .map_err(|source| KeywordError::DictionaryWrite {
                path: std::env::temp_dir(),
                source,
            })
    }
}

/// `word` → `word<TAB>tag`; entries with a tab or space are kept as given.
pub fn normalize_entry(entry: &str, default_tag: &str) -> Option<String> {
    let trimmed = entry.trim();
    if trimmed.is_empty() {
        return None;
    }
    if trimmed.contains('\t') || trimmed.contains(' ') {
        return Some(trimmed.to_string());
    }
    Some(format!("{trimmed}\t{default_tag}"))
}

/// First whitespace-delimited field of every non-blank line.
fn parse_base_words(content: &str) -> OrderedSet {
    content
        .lines()
        .filter_map(|line| line.split_whitespace().next())
        .collect()
}
