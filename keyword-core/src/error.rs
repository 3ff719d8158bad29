//! # Error Types
//!
//! Only the dictionary and configuration paths can fail. Blank input and
//! tagger failures are absorbed by the pipeline and never reach the caller.

use std::path::PathBuf;

use thiserror::Error;

/// Failure reported by a [`Tagger`](crate::tagger::Tagger) implementation.
#[derive(Debug, Error)]
pub enum TagError {
    #[error("tagger could not analyze input: {0}")]
    Analysis(String),

    #[error("failed to load tagger user dictionary {path}")]
    Dictionary {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors surfaced by the public extraction API.
#[derive(Debug, Error)]
pub enum KeywordError {
    #[error("failed to read user dictionary file {path}")]
    DictionaryRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write user dictionary file {path}")]
    DictionaryWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("tagger rejected user dictionary {path}")]
    DictionaryReload {
        path: PathBuf,
        #[source]
        source: TagError,
    },

    #[error("failed to read config file {path}")]
    Config {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file {path}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

pub type Result<T> = std::result::Result<T, KeywordError>;
