//! # Script Tagger: Built-in Rule-based Tagger
//!
//! A self-contained [`Tagger`] for mixed Korean/Latin/digit text. It does not
//! perform morphological analysis; it segments by script and tags each run
//! with a coarse part of speech, which is enough to drive the keyword
//! pipeline when no external analyzer is wired in.
//!
//! ## Segmentation
//!
//! 1. The text is walked by extended grapheme cluster (UAX #29), so a base
//!    character and its combining marks always land in the same token. Each
//!    cluster is NFC-composed first, so decomposed Hangul (common in macOS
//!    filenames) segments like precomposed syllables. Token offsets still
//!    point into the original, uncomposed text.
//! 2. Clusters are grouped into runs of one script: Hangul, Latin, digits,
//!    Han. Whitespace is dropped; every other cluster is its own token.
//! 3. Hangul runs are matched greedily (longest first) against the user
//!    dictionary. Dictionary hits get their dictionary tag; leftover pieces
//!    are tagged by [`tag_hangul_fragment`].
//!
//! ## Example
//!
//! ```rust
//! use keyword_core::tagger::Tagger;
//! use keyword_core::tokenizer::ScriptTagger;
//!
//! let tagger = ScriptTagger::new();
//! let tokens = tagger.analyze("RM팀 회의는 2024년").unwrap();
//! let surfaces: Vec<&str> = tokens.iter().map(|t| t.surface.as_str()).collect();
//! assert_eq!(surfaces, ["RM", "팀", "회의는", "2024", "년"]);
//! ```

use std::collections::HashMap;
use std::path::Path;
use std::sync::RwLock;

use tracing::info;
use unicode_normalization::UnicodeNormalization;
use unicode_segmentation::UnicodeSegmentation;

use crate::error::TagError;
use crate::normalize::{is_hangul_syllable, PARTICLES};
use crate::tagger::{
    Tagger, Token, TAG_CONJUNCTION, TAG_FINAL_PUNCT, TAG_FOREIGN, TAG_GENERAL_NOUN, TAG_HANJA, TAG_NUMBER,
    TAG_PARTICLE, TAG_PREDICATE, TAG_PROPER_NOUN, TAG_SYMBOL,
};

/// Endings that mark a Hangul fragment as a predicate rather than a noun.
const PREDICATE_ENDINGS: &[&str] = &[
    "습니다", "니다", "었다", "았다", "였다", "했다", "한다", "된다", "있다", "없다", "이다",
    "이고", "하고", "해서", "하여", "되어",
];

/// Conjunctions and adverbs that would otherwise pass as nouns.
const FUNCTION_WORDS: &[&str] = &["또는", "그리고", "그러나", "하지만", "또한", "및"];

/// Script class of a single character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Script {
    Hangul,
    Latin,
    Digit,
    Han,
    Space,
    Other,
}

fn script_of(c: char) -> Script {
    if is_hangul_syllable(c) {
        Script::Hangul
    } else if c.is_ascii_alphabetic() {
        Script::Latin
    } else if c.is_ascii_digit() {
        Script::Digit
    } else if is_han(c) {
        Script::Han
    } else if c.is_whitespace() {
        Script::Space
    } else {
        Script::Other
    }
}

fn is_han(c: char) -> bool {
    ('\u{4E00}'..='\u{9FFF}').contains(&c) || ('\u{3400}'..='\u{4DBF}').contains(&c)
}

/// Tag for a Hangul piece that is not a dictionary word.
pub fn tag_hangul_fragment(fragment: &str) -> &'static str {
    if PARTICLES.contains(&fragment) {
        TAG_PARTICLE
    } else if FUNCTION_WORDS.contains(&fragment) {
        TAG_CONJUNCTION
    } else if PREDICATE_ENDINGS.iter().any(|ending| fragment.ends_with(ending)) {
        TAG_PREDICATE
    } else {
        TAG_GENERAL_NOUN
    }
}

/// Surface → tag, plus the longest entry length in characters.
#[derive(Debug, Default)]
struct TaggerDictionary {
    words: HashMap<String, String>,
    max_chars: usize,
}

impl TaggerDictionary {
    fn parse(content: &str) -> Self {
        let mut dictionary = TaggerDictionary::default();
        for line in content.lines() {
            let mut fields = line.split_whitespace();
            let Some(word) = fields.next() else {
                continue;
            };
            let tag = fields.next().unwrap_or(TAG_PROPER_NOUN);
            dictionary.max_chars = dictionary.max_chars.max(word.chars().count());
            dictionary.words.insert(word.to_string(), tag.to_string());
        }
        dictionary
    }

    /// Longest dictionary word starting at `chars[0]`, as (length, tag).
    fn longest_match(&self, chars: &[char]) -> Option<(usize, &str)> {
        let upper = self.max_chars.min(chars.len());
        (1..=upper).rev().find_map(|len| {
            let candidate: String = chars[..len].iter().collect();
            self.words.get(&candidate).map(|tag| (len, tag.as_str()))
        })
    }
}

/// Rule-based tagger segmenting by script with a reloadable user dictionary.
#[derive(Debug, Default)]
pub struct ScriptTagger {
    dictionary: RwLock<TaggerDictionary>,
}

impl ScriptTagger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of user dictionary words currently loaded.
    pub fn dictionary_len(&self) -> usize {
        self.dictionary
            .read()
            .map(|d| d.words.len())
            .unwrap_or_default()
    }

    fn tokenize(&self, text: &str, dictionary: &TaggerDictionary) -> Vec<Token> {
        let mut tokens = Vec::new();
        let mut run = Run::default();
        let mut run_script = Script::Space;
        let mut char_pos = 0;

        for grapheme in text.graphemes(true) {
            let composed: String = grapheme.nfc().collect();
            let Some(first) = composed.chars().next() else {
                continue;
            };
            let script = script_of(first);
            if script != run_script || script == Script::Other {
                flush_run(&mut tokens, &mut run, run_script, dictionary);
                run_script = script;
            }
            run.push(&composed, char_pos);
            char_pos += grapheme.chars().count();
        }
        flush_run(&mut tokens, &mut run, run_script, dictionary);

        tokens
    }
}

/// Composed characters of one run, each with the offset of the source
/// cluster it came from.
#[derive(Debug, Default)]
struct Run {
    chars: Vec<char>,
    offsets: Vec<usize>,
}

impl Run {
    fn push(&mut self, composed: &str, offset: usize) {
        for c in composed.chars() {
            self.chars.push(c);
            self.offsets.push(offset);
        }
    }

    fn text(&self, range: std::ops::Range<usize>) -> String {
        self.chars[range].iter().collect()
    }

    fn clear(&mut self) {
        self.chars.clear();
        self.offsets.clear();
    }
}

/// Closes the accumulated run and appends its token(s).
fn flush_run(tokens: &mut Vec<Token>, run: &mut Run, script: Script, dictionary: &TaggerDictionary) {
    let Some(&start) = run.offsets.first() else {
        return;
    };
    let surface = run.text(0..run.chars.len());
    match script {
        Script::Space => {}
        Script::Hangul => segment_hangul(tokens, run, dictionary),
        Script::Latin => tokens.push(Token::new(surface, TAG_FOREIGN, start)),
        Script::Digit => tokens.push(Token::new(surface, TAG_NUMBER, start)),
        Script::Han => tokens.push(Token::new(surface, TAG_HANJA, start)),
        Script::Other => {
            let tag = if matches!(surface.as_str(), "." | "?" | "!") {
                TAG_FINAL_PUNCT
            } else {
                TAG_SYMBOL
            };
            tokens.push(Token::new(surface, tag, start));
        }
    }
    run.clear();
}

/// Splits a Hangul run around user dictionary words.
fn segment_hangul(tokens: &mut Vec<Token>, run: &Run, dictionary: &TaggerDictionary) {
    let chars = &run.chars;
    let mut pending_from = 0;
    let mut i = 0;

    while i < chars.len() {
        if let Some((len, tag)) = dictionary.longest_match(&chars[i..]) {
            push_fragment(tokens, run, pending_from..i);
            tokens.push(Token::new(run.text(i..i + len), tag, run.offsets[i]));
            i += len;
            pending_from = i;
            continue;
        }
        i += 1;
    }
    push_fragment(tokens, run, pending_from..chars.len());
}

fn push_fragment(tokens: &mut Vec<Token>, run: &Run, range: std::ops::Range<usize>) {
    if range.is_empty() {
        return;
    }
    let start = run.offsets[range.start];
    let fragment = run.text(range);
    let tag = tag_hangul_fragment(&fragment);
    tokens.push(Token::new(fragment, tag, start));
}

impl Tagger for ScriptTagger {
    fn name(&self) -> &str {
        "script"
    }

    fn analyze(&self, text: &str) -> Result<Vec<Token>, TagError> {
        let dictionary = self
            .dictionary
            .read()
            .map_err(|_| TagError::Analysis("user dictionary lock poisoned".to_string()))?;
        Ok(self.tokenize(text, &dictionary))
    }

    fn load_user_dictionary(&self, path: &Path) -> Result<(), TagError> {
        let content = std::fs::read_to_string(path).map_err(|source| TagError::Dictionary {
            path: path.to_path_buf(),
            source,
        })?;
        let parsed = TaggerDictionary::parse(&content);
        let count = parsed.words.len();
        let mut dictionary = self
            .dictionary
            .write()
            .map_err(|_| TagError::Analysis("user dictionary lock poisoned".to_string()))?;
        *dictionary = parsed;
        info!(path = %path.display(), words = count, "script tagger dictionary loaded");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn surfaces_and_tags(tokens: &[Token]) -> Vec<(&str, &str)> {
        tokens.iter().map(|t| (t.surface.as_str(), t.tag.as_str())).collect()
    }

    #[test]
    fn test_splits_scripts_and_tags_them() {
        let tagger = ScriptTagger::new();
        let tokens = tagger.analyze("법무RM팀 v2 漢字.").unwrap();
        assert_eq!(
            surfaces_and_tags(&tokens),
            vec![
                ("법무", "NNG"),
                ("RM", "SL"),
                ("팀", "NNG"),
                ("v", "SL"),
                ("2", "SN"),
                ("漢字", "SH"),
                (".", "SF"),
            ]
        );
    }

    #[test]
    fn test_offsets_are_char_indices() {
        let tagger = ScriptTagger::new();
        let tokens = tagger.analyze("회의는 2024/11/27에").unwrap();
        let starts: Vec<(&str, usize)> = tokens.iter().map(|t| (t.surface.as_str(), t.start)).collect();
        assert_eq!(
            starts,
            vec![("회의는", 0), ("2024", 4), ("/", 8), ("11", 9), ("/", 11), ("27", 12), ("에", 14)]
        );
        assert_eq!(tokens.last().unwrap().tag, "JX");
    }

    #[test]
    fn test_predicates_and_function_words_are_not_nouns() {
        let tagger = ScriptTagger::new();
        let tokens = tagger.analyze("또는 열렸습니다").unwrap();
        assert_eq!(surfaces_and_tags(&tokens), vec![("또는", "MAJ"), ("열렸습니다", "VV")]);
    }

    #[test]
    fn test_user_dictionary_splits_hangul_runs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("user.dic");
        std::fs::write(&path, "하이퍼그로스플랜\tNNP\n\n전략\n").unwrap();

        let tagger = ScriptTagger::new();
        tagger.load_user_dictionary(&path).unwrap();
        assert_eq!(tagger.dictionary_len(), 2);

        let tokens = tagger.analyze("새하이퍼그로스플랜전략을").unwrap();
        assert_eq!(
            surfaces_and_tags(&tokens),
            vec![
                ("새", "NNG"),
                ("하이퍼그로스플랜", "NNP"),
                ("전략", "NNP"),
                ("을", "JX"),
            ]
        );
        assert_eq!(tokens[1].start, 1);
        assert_eq!(tokens[3].start, 11);
    }

    #[test]
    fn test_decomposed_hangul_is_composed() {
        let tagger = ScriptTagger::new();
        let decomposed: String = "회의 자료".nfd().collect();
        let tokens = tagger.analyze(&decomposed).unwrap();
        assert_eq!(surfaces_and_tags(&tokens), vec![("회의", "NNG"), ("자료", "NNG")]);
        // Offsets count the jamo of the original text.
        assert_eq!(tokens[0].start, 0);
        assert_eq!(tokens[1].start, 5);
    }

    #[test]
    fn test_missing_dictionary_file_is_an_error() {
        let tagger = ScriptTagger::new();
        let err = tagger
            .load_user_dictionary(Path::new("/nonexistent/keyword/user.dic"))
            .unwrap_err();
        assert!(matches!(err, TagError::Dictionary { .. }));
    }
}
