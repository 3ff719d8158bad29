//! # Filename Tokenizer
//!
//! Taggers do poorly on filenames: underscores, brackets, version suffixes and
//! glued mixed-script codes (`법무RM팀`) rarely come back as clean nouns. When
//! the input looks like a filename, the pipeline re-tokenizes it with these
//! heuristics and merges the result into the noun set.
//!
//! ## Example
//! `200622_주요 현안_[우리집]_법무RM팀-v2.pptx` →
//! `200622, 주요, 현안, 우리집, 법무RM팀, 법무, RM, 팀, v2, pptx`

use std::sync::LazyLock;

use regex::Regex;
use unicode_normalization::UnicodeNormalization;

use crate::ordered::OrderedSet;

static EXTENSION_SUFFIX: LazyLock<Regex> = LazyLock::new(|| compile(r"\.[A-Za-z0-9]{2,6}(\s|$)"));

/// Punctuation and brackets treated as separators.
static SEPARATORS: LazyLock<Regex> =
    LazyLock::new(|| compile(r#"[_\-\[\]{}()<>~!@#$%^&*+=|;:'",.?/`“”‘’]"#));

/// Anything that is not a word character, Hangul (syllables or jamo) or whitespace.
static FOREIGN_CHARS: LazyLock<Regex> = LazyLock::new(|| {
    compile(r"[^A-Za-z0-9_\x{AC00}-\x{D7A3}\x{1100}-\x{11FF}\x{3130}-\x{318F}\s]")
});

static SCRIPT_RUNS: LazyLock<Regex> = LazyLock::new(|| compile(r"[가-힣]+|[a-zA-Z]+|[0-9]+"));

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).unwrap_or_else(|e| panic!("invalid filename pattern {pattern:?}: {e}"))
}

/// `true` when the text ends a word with an extension-like `.ext` suffix.
pub fn looks_like_filename(text: &str) -> bool {
    EXTENSION_SUFFIX.is_match(text)
}

/// Which script a run belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RunKind {
    Hangul,
    Latin,
    Digit,
}

fn run_kind(run: &str) -> RunKind {
    match run.chars().next() {
        Some(c) if c.is_ascii_alphabetic() => RunKind::Latin,
        Some(c) if c.is_ascii_digit() => RunKind::Digit,
        _ => RunKind::Hangul,
    }
}

/// Splits a filename into raw tokens plus, for mixed Hangul/Latin/digit
/// tokens, each single-script run.
pub fn split_filename_to_tokens(filename: &str) -> OrderedSet {
    let composed: String = filename.nfc().collect();
    let spaced = SEPARATORS.replace_all(&composed, " ");
    let cleaned = FOREIGN_CHARS.replace_all(&spaced, " ");

    let mut result = OrderedSet::new();
    for token in cleaned.split_whitespace() {
        result.insert(token);

        let runs: Vec<&str> = SCRIPT_RUNS.find_iter(token).map(|m| m.as_str()).collect();
        let kinds: Vec<RunKind> = runs.iter().map(|run| run_kind(run)).collect();
        let has_hangul = kinds.contains(&RunKind::Hangul);
        let has_other = kinds.iter().any(|k| *k != RunKind::Hangul);

        if runs.len() > 1 && has_hangul && has_other {
            result.extend(runs);
        }
    }
    result
}
