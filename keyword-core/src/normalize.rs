//! # Token Normalizer
//!
//! Turns a tagger surface form into a keyword candidate and decides whether
//! the candidate carries meaning.
//!
//! ## Normalization steps
//! 1. Unicode NFC composition (decomposed jamo sequences become syllables).
//! 2. Leading/trailing punctuation trimmed (Unicode punctuation, ASCII symbols,
//!    curly quotes).
//! 3. Trailing particle (josa) stripped from pure-Hangul words.
//!
//! ## Particle rule
//! The word is scanned from its second character onward; the first split
//! point whose remainder is exactly one of [`PARTICLES`] wins. The stem is
//! kept only when it has at least two syllables, otherwise the word is left
//! as is. So `회의에서` → `회의`, but `사과` stays `사과` (stem `사` is too
//! short) even though `과` is a particle.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use unicode_normalization::UnicodeNormalization;

/// Trailing grammatical particles, in match order.
pub const PARTICLES: &[&str] = &[
    "은", "는", "이", "가", "을", "를", "의", "에", "에서", "에게", "한테", "으로", "로", "과",
    "와", "도", "만", "까지", "부터",
];

/// English function words never worth indexing.
pub const EN_STOPWORDS: &[&str] = &[
    "a", "about", "above", "after", "again", "against", "all", "am", "an", "and", "any", "are",
    "aren't", "as", "at", "be", "because", "been", "before", "being", "below", "between", "both",
    "but", "by", "can't", "cannot", "could", "couldn't", "did", "didn't", "do", "does", "doesn't",
    "doing", "don't", "down", "during", "each", "few", "for", "from", "further", "had", "hadn't",
    "has", "hasn't", "have", "haven't", "having", "he", "he'd", "he'll", "he's", "her", "here",
    "here's", "hers", "herself", "him", "himself", "his", "how", "how's", "i", "i'd", "i'll",
    "i'm", "i've", "if", "in", "into", "is", "isn't", "it", "it's", "its", "itself", "let's", "me",
    "more", "most", "mustn't", "my", "myself", "no", "nor", "not", "of", "off", "on", "once",
    "only", "or", "other", "ought", "our", "ours", "ourselves", "out", "over", "own", "same",
    "shan't", "she", "she'd", "she'll", "she's", "should", "shouldn't", "so", "some", "such",
    "than", "that", "that's", "the", "their", "theirs", "them", "themselves", "then", "there",
    "there's", "these", "they", "they'd", "they'll", "they're", "they've", "this", "those",
    "through", "to", "too", "under", "until", "up", "very", "was", "wasn't", "we", "we'd",
    "we'll", "we're", "we've", "were", "weren't", "what", "what's", "when", "when's", "where",
    "where's", "which", "while", "who", "who's", "whom", "why", "why's", "will", "with", "won't",
    "would", "wouldn't", "you", "you'd", "you'll", "you're", "you've", "your", "yours",
    "yourself", "yourselves",
];

static STOPWORDS: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| EN_STOPWORDS.iter().copied().collect());

static EDGE_PUNCTUATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[\p{P}[[:punct:]]“”‘’]+|[\p{P}[[:punct:]]“”‘’]+$")
        .unwrap_or_else(|e| panic!("invalid punctuation pattern: {e}"))
});

/// `true` for a precomposed Hangul syllable (가–힣).
pub fn is_hangul_syllable(c: char) -> bool {
    ('\u{AC00}'..='\u{D7A3}').contains(&c)
}

/// Normalizes a surface form into a keyword candidate (may return `""`).
pub fn normalize_token(word: &str) -> String {
    let composed: String = word.nfc().collect();
    let mut cleaned = EDGE_PUNCTUATION.replace_all(&composed, "").into_owned();

    if let Some(stem) = strip_particle(&cleaned) {
        cleaned = stem;
    }

    cleaned.trim().to_string()
}

/// Returns the stem when `word` is pure Hangul and ends in a strippable particle.
pub fn strip_particle(word: &str) -> Option<String> {
    let chars: Vec<char> = word.chars().collect();
    if chars.len() < 2 || !chars.iter().all(|&c| is_hangul_syllable(c)) {
        return None;
    }

    let split = (1..chars.len()).find(|&i| {
        let suffix: String = chars[i..].iter().collect();
        PARTICLES.contains(&suffix.as_str())
    })?;

    if split >= 2 {
        Some(chars[..split].iter().collect())
    } else {
        None
    }
}

fn is_digits(word: &str) -> bool {
    !word.is_empty() && word.bytes().all(|b| b.is_ascii_digit())
}

fn is_latin_word(word: &str) -> bool {
    !word.is_empty()
        && word
            .chars()
            .all(|c| c.is_ascii_alphabetic() || c == '\'' || c == '-' || c == '.')
}

/// Bare multi-digit numbers and English stop words carry no meaning.
pub fn is_meaningful(word: &str) -> bool {
    if is_digits(word) && word.len() >= 2 {
        return false;
    }
    if is_latin_word(word) {
        return !STOPWORDS.contains(word.to_lowercase().as_str());
    }
    true
}

/// Filename variant: single syllables are noise, numeric codes are kept.
pub fn is_meaningful_filename_token(word: &str) -> bool {
    let mut chars = word.chars();
    match (chars.next(), chars.next()) {
        (None, _) => return false,
        (Some(c), None) if is_hangul_syllable(c) => return false,
        _ => {}
    }
    if is_digits(word) && word.len() >= 2 {
        return true;
    }
    is_meaningful(word)
}
