use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

use keyword_core::{
    EntityCategory, ExtractorConfig, KeywordError, KeywordExtractor, ScriptTagger, TagError, Tagger, Token,
};
use unicode_normalization::UnicodeNormalization;

/// Replays a fixed token script, locating each surface left to right so the
/// offsets match what a real analyzer would report.
struct ScriptedTagger {
    script: Vec<(&'static str, &'static str)>,
}

impl ScriptedTagger {
    fn new(script: &[(&'static str, &'static str)]) -> Self {
        Self {
            script: script.to_vec(),
        }
    }
}

impl Tagger for ScriptedTagger {
    fn name(&self) -> &str {
        "scripted"
    }

    fn analyze(&self, text: &str) -> Result<Vec<Token>, TagError> {
        let mut tokens = Vec::new();
        let mut cursor = 0;
        for (surface, tag) in &self.script {
            let Some(found) = text[cursor..].find(surface) else {
                return Err(TagError::Analysis(format!("{surface:?} not found")));
            };
            let byte_start = cursor + found;
            tokens.push(Token::new(*surface, *tag, text[..byte_start].chars().count()));
            cursor = byte_start + surface.len();
        }
        Ok(tokens)
    }

    fn load_user_dictionary(&self, _path: &Path) -> Result<(), TagError> {
        Ok(())
    }
}

struct FailingTagger;

impl Tagger for FailingTagger {
    fn name(&self) -> &str {
        "failing"
    }

    fn analyze(&self, _text: &str) -> Result<Vec<Token>, TagError> {
        Err(TagError::Analysis("analyzer unavailable".to_string()))
    }

    fn load_user_dictionary(&self, _path: &Path) -> Result<(), TagError> {
        Ok(())
    }
}

fn scripted(script: &[(&'static str, &'static str)]) -> KeywordExtractor {
    KeywordExtractor::with_tagger(Arc::new(ScriptedTagger::new(script)))
}

#[test]
fn test_filename_sentence_with_dates() {
    let extractor = scripted(&[
        ("파일", "NNG"),
        ("명", "NNG"),
        ("은", "JX"),
        ("미래", "NNG"),
        ("보고서", "NNG"),
        ("_", "SW"),
        ("991231", "SN"),
        (".", "SF"),
        ("pptx", "SL"),
        ("이", "VCP"),
        ("고", "EC"),
        (",", "SP"),
        ("회의", "NNG"),
        ("는", "JX"),
        ("2024", "SN"),
        ("/", "SP"),
        ("11", "SN"),
        ("/", "SP"),
        ("27", "SN"),
        ("(", "SS"),
        ("화요일", "NNP"),
        (")", "SS"),
        ("에", "JKB"),
        ("열렸", "VV"),
        ("습니다", "EF"),
        (".", "SF"),
    ]);
    let result =
        extractor.extract_keywords("파일명은 미래보고서_991231.pptx이고, 회의는 2024/11/27(화요일)에 열렸습니다.");

    for noun in ["파일", "미래", "보고서", "회의"] {
        assert!(result.nouns.contains(&noun.to_string()), "missing {noun}");
    }
    assert!(!result.nouns.contains(&"991231".to_string()));
    assert_eq!(result.entities_for(EntityCategory::ShortDate6), ["991231"]);
    assert_eq!(result.entities_for(EntityCategory::Date), ["2024/11/27"]);
    assert!(!result.entities_for(EntityCategory::Number).contains(&"991231".to_string()));
}

#[test]
fn test_blank_input_has_every_category() {
    let extractor = KeywordExtractor::with_tagger(Arc::new(FailingTagger));
    let result = extractor.extract_keywords(" \n ");
    assert!(result.nouns.is_empty());
    for category in EntityCategory::ALL {
        assert!(result.entities.get(&category).is_some_and(Vec::is_empty));
    }
}

#[test]
fn test_tagger_failure_keeps_entities() {
    let extractor = KeywordExtractor::with_tagger(Arc::new(FailingTagger));
    let result = extractor.extract_keywords("회의는 2024/11/27에 열렸습니다.");
    assert!(result.nouns.is_empty());
    assert_eq!(result.entities_for(EntityCategory::Date), ["2024/11/27"]);
}

#[test]
fn test_no_noun_inside_entity_span() {
    let extractor = scripted(&[
        ("연락처", "NNG"),
        ("contact", "NNG"),
        ("example", "NNP"),
        ("com", "SL"),
        ("으로", "JKB"),
    ]);
    let result = extractor.extract_keywords("연락처 contact@example.com으로");
    assert_eq!(result.nouns, vec!["연락처"]);
    assert_eq!(result.entities_for(EntityCategory::Email), ["contact@example.com"]);
}

#[test]
fn test_numbers_do_not_block_nouns() {
    let extractor = scripted(&[("3", "SN"), ("3", "NR"), ("분기", "NNG")]);
    let result = extractor.extract_keywords("3 3분기");
    assert_eq!(result.nouns, vec!["3", "분기"]);
    assert_eq!(result.entities_for(EntityCategory::Number), ["3", "3"]);
}

#[test]
fn test_extraction_is_idempotent() {
    let extractor = KeywordExtractor::new();
    let text = "전화번호는 010-1234-5678이고, 계좌는 020-111-222333 입니다.";
    let first = extractor.extract_keywords(text);
    let second = extractor.extract_keywords(text);
    assert_eq!(first, second);
    assert_eq!(first.entities_for(EntityCategory::PhoneKr), ["010-1234-5678"]);
    assert_eq!(first.entities_for(EntityCategory::Account), ["020-111-222333"]);
    assert!(!first.entities_for(EntityCategory::Number).contains(&"5678".to_string()));
}

#[test]
fn test_unique_keywords_are_the_deduplicated_union() {
    let extractor = KeywordExtractor::new();
    let text = "문의는 contact@example.com 또는 https://example.com 참조";
    let result = extractor.extract_keywords(text);
    let unique = extractor.extract_unique_keywords(text);

    let distinct: HashSet<&String> = unique.iter().collect();
    assert_eq!(distinct.len(), unique.len());

    let expected: HashSet<&String> = result
        .nouns
        .iter()
        .chain(result.entities.values().flatten())
        .collect();
    assert_eq!(distinct, expected);
    assert!(unique.contains(&"contact@example.com".to_string()));
    assert!(unique.contains(&"https://example.com".to_string()));
}

#[test]
fn test_decomposed_hangul_yields_nouns() {
    let extractor = KeywordExtractor::new();
    let decomposed: String = "회의 자료".nfd().collect();
    let result = extractor.extract_keywords(&decomposed);
    assert_eq!(result.nouns, vec!["회의", "자료"]);
}

#[test]
fn test_user_dictionary_word_becomes_noun() {
    let extractor = KeywordExtractor::new();
    let before = extractor.extract_keywords("이번 분기 하이퍼그로스플랜을 발표");
    assert!(before.nouns.contains(&"하이퍼그로스플랜".to_string()));

    let added = extractor.add_user_dictionary(["하이퍼그로스플랜", "", "하이퍼그로스플랜"]).unwrap();
    assert_eq!(added, 1);

    let result = extractor.extract_keywords("새하이퍼그로스플랜을 발표");
    assert!(result.nouns.contains(&"하이퍼그로스플랜".to_string()));
    assert!(!result.nouns.contains(&"새하이퍼그로스플랜".to_string()));
}

#[test]
fn test_dictionary_terms_expand_compound_nouns() {
    let extractor = scripted(&[("하이퍼그로스플랜전략", "NNG"), ("을", "JKO")]);
    extractor.add_user_dictionary(["하이퍼그로스플랜"]).unwrap();
    let result = extractor.extract_keywords("하이퍼그로스플랜전략을");
    assert_eq!(result.nouns, vec!["하이퍼그로스플랜전략", "하이퍼그로스플랜"]);
}

#[test]
fn test_external_dictionary_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("user.dic");
    std::fs::write(&path, "전략\tNNG\n").unwrap();

    let config = ExtractorConfig {
        user_dictionary_path: Some(path),
        ..ExtractorConfig::default()
    };
    let extractor = KeywordExtractor::with_config(Arc::new(ScriptTagger::new()), &config).unwrap();
    assert_eq!(extractor.dictionary().base_words(), vec!["전략"]);

    let result = extractor.extract_keywords("성장전략");
    assert_eq!(result.nouns, vec!["성장", "전략"]);
}

#[test]
fn test_missing_dictionary_path_is_reported() {
    let extractor = KeywordExtractor::new();
    let err = extractor
        .set_user_dictionary_path("/nonexistent/keyword/user.dic")
        .unwrap_err();
    assert!(matches!(err, KeywordError::DictionaryRead { .. }));
    assert!(extractor.set_user_dictionary_path("").is_ok());
}

#[test]
fn test_split_filename_to_tokens() {
    let extractor = KeywordExtractor::new();
    let tokens = extractor.split_filename_to_tokens("200622_주요 현안_[우리집]_{가출한}_법무RM팀-v2.pptx");
    for token in ["법무RM팀", "법무", "RM", "팀"] {
        assert!(tokens.contains(&token.to_string()), "missing {token}");
    }
}

#[test]
fn test_filename_input_merges_filename_tokens() {
    let extractor = KeywordExtractor::new();
    let result = extractor.extract_keywords("200622_주요 현안_[우리집]_법무RM팀-v2.pptx");
    for noun in ["200622", "주요", "현안", "우리집", "법무RM팀", "법무", "v2", "pptx"] {
        assert!(result.nouns.contains(&noun.to_string()), "missing {noun}");
    }
    assert!(!result.nouns.contains(&"v".to_string()));
}

#[test]
fn test_batch_keeps_input_order() {
    let extractor = KeywordExtractor::new();
    let texts = ["회의는 2024/11/27에 열렸습니다.", "", "문의 contact@example.com"];
    let batch = extractor.extract_batch(&texts);
    assert_eq!(batch.len(), texts.len());
    for (text, result) in texts.iter().zip(&batch) {
        assert_eq!(result, &extractor.extract_keywords(text));
    }
}

#[test]
fn test_result_serializes_with_category_keys() {
    let result = KeywordExtractor::new().extract_keywords("991231");
    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["entities"]["short_date_6"][0], "991231");
    assert_eq!(json["entities"].as_object().unwrap().len(), EntityCategory::ALL.len());
    assert!(json["entities"]["phone_intl"].as_array().unwrap().is_empty());
}
