//! # Pattern Table: Structured Entity Categories
//!
//! Fixed, ordered list of the structured entities recognized in free text.
//! The order of [`EntityCategory`] is also the evaluation priority: an earlier
//! category claims text before a later one gets to look at it.
//!
//! | Key            | Example                 | Validator      | Blocks nouns | Suppressed if contained |
//! |----------------|-------------------------|----------------|--------------|-------------------------|
//! | `short_date_6` | `991231`                | calendar YYMMDD| yes          | no                      |
//! | `url`          | `https://example.com`   | –              | yes          | no                      |
//! | `email`        | `contact@example.com`   | –              | yes          | no                      |
//! | `date`         | `2024/11/27`            | calendar date  | yes          | no                      |
//! | `phone_kr`     | `010-1234-5678`         | –              | yes          | yes                     |
//! | `phone_intl`   | `+82 10 1234 5678`      | –              | yes          | yes                     |
//! | `account`      | `020-111-222333`        | –              | yes          | yes                     |
//! | `number`       | `1,234.5`               | –              | no           | yes                     |
//!
//! Patterns need lookbehind/lookahead so that a match never starts or ends in
//! the middle of a longer digit run; they are compiled with `fancy-regex`.
//! Digit classes are spelled `[0-9]` because only ASCII digits count, and
//! phone/account separators are `-` or ASCII whitespace (plus U+2012 for
//! accounts), never a no-break space.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use chrono::NaiveDate;
use fancy_regex::Regex;
use serde::{Deserialize, Serialize};

/// Structured entity categories in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum EntityCategory {
    /// Six-digit `YYMMDD` date, e.g. inside a filename.
    #[serde(rename = "short_date_6")]
    ShortDate6,
    #[serde(rename = "url")]
    Url,
    #[serde(rename = "email")]
    Email,
    /// `YYYY.M.D`, `YYYY-M-D` or `YYYY/M/D` for years 1900–2099.
    #[serde(rename = "date")]
    Date,
    /// Korean domestic phone number (leading `0`).
    #[serde(rename = "phone_kr")]
    PhoneKr,
    /// International phone number (leading `+country`).
    #[serde(rename = "phone_intl")]
    PhoneIntl,
    /// Bank account number: two or three digit groups then a 5–6 digit tail.
    #[serde(rename = "account")]
    Account,
    /// Any remaining number, with optional thousands separators and decimals.
    #[serde(rename = "number")]
    Number,
}

impl EntityCategory {
    /// Every category, in evaluation order.
    pub const ALL: [EntityCategory; 8] = [
        EntityCategory::ShortDate6,
        EntityCategory::Url,
        EntityCategory::Email,
        EntityCategory::Date,
        EntityCategory::PhoneKr,
        EntityCategory::PhoneIntl,
        EntityCategory::Account,
        EntityCategory::Number,
    ];

    /// Key used in results and JSON output (e.g. `"phone_kr"`).
    pub fn key_name(&self) -> &'static str {
        match self {
            EntityCategory::ShortDate6 => "short_date_6",
            EntityCategory::Url => "url",
            EntityCategory::Email => "email",
            EntityCategory::Date => "date",
            EntityCategory::PhoneKr => "phone_kr",
            EntityCategory::PhoneIntl => "phone_intl",
            EntityCategory::Account => "account",
            EntityCategory::Number => "number",
        }
    }

    /// Parses a key name (e.g. `"url"` → `Some(Url)`).
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.key_name() == key)
    }
}

impl std::fmt::Display for EntityCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key_name())
    }
}

/// Matches per category. Iteration follows [`EntityCategory::ALL`] order.
pub type EntityMap = BTreeMap<EntityCategory, Vec<String>>;

/// An [`EntityMap`] with every category present and empty.
pub fn empty_entity_map() -> EntityMap {
    EntityCategory::ALL.into_iter().map(|c| (c, Vec::new())).collect()
}

/// One row of the pattern table.
pub struct PatternRule {
    pub category: EntityCategory,
    pub regex: &'static Regex,
    /// Secondary check on the matched text; failing matches leave no trace.
    pub validate: Option<fn(&str) -> bool>,
    /// Accepted matches block noun candidates starting inside them.
    pub blocks_noun_spans: bool,
    /// Matches fully inside an earlier accepted span are dropped.
    pub suppress_if_contained: bool,
}

static SHORT_DATE_6: LazyLock<Regex> =
    LazyLock::new(|| compile(r"(?<![0-9])([0-9]{6})(?![0-9])"));

static URL: LazyLock<Regex> = LazyLock::new(|| {
    compile(
        r"(?i)(?:https?|ftp)://[0-9A-Za-z_\-.\x{3131}-\x{D79D}@]+(?:/[0-9A-Za-z_\-./?&=#%:+~\x{3131}-\x{D79D}@]*)?",
    )
});

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    compile(r"(?<![/0-9A-Za-z_])[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}(?![/0-9A-Za-z_])")
});

static DATE: LazyLock<Regex> = LazyLock::new(|| {
    compile(
        r"(?<![0-9])((?:19|20)[0-9]{2})[./-](0?[1-9]|1[0-2])[./-](0?[1-9]|[12][0-9]|3[01])(?![0-9])",
    )
});

static PHONE_KR: LazyLock<Regex> = LazyLock::new(|| {
    compile(r"(?<![0-9])(?:0[0-9]{1,2}[-\t\n\x0B\x0C\r ]?[0-9]{3,4}[-\t\n\x0B\x0C\r ]?[0-9]{4})(?![0-9])")
});

static PHONE_INTL: LazyLock<Regex> = LazyLock::new(|| {
    compile(r"(?<![0-9])(?:\+[0-9]{1,3}[-\t\n\x0B\x0C\r ]?(?:[0-9]{1,4}[-\t\n\x0B\x0C\r ]?){2,4}[0-9]{2,4})(?![0-9])")
});

static ACCOUNT: LazyLock<Regex> = LazyLock::new(|| {
    compile(r"(?<![0-9])(?:[0-9]{2,4}[-\t\n\x0B\x0C\r \x{2012}]?){2,3}[0-9]{5,6}(?![0-9])")
});

static NUMBER: LazyLock<Regex> = LazyLock::new(|| {
    compile(r"(?<![0-9])((?:[0-9]{1,3}(?:,[0-9]{3})+)(?:\.[0-9]+)?|[0-9]+\.[0-9]+|[0-9]+)(?![0-9])")
});

/// The patterns are constants; a failure here is a programming error caught by tests.
fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).unwrap_or_else(|e| panic!("invalid entity pattern {pattern:?}: {e}"))
}

/// The full pattern table, in evaluation order.
pub fn pattern_table() -> [PatternRule; 8] {
    [
        PatternRule {
            category: EntityCategory::ShortDate6,
            regex: &SHORT_DATE_6,
            validate: Some(is_valid_short_date6),
            blocks_noun_spans: true,
            suppress_if_contained: false,
        },
        PatternRule {
            category: EntityCategory::Url,
            regex: &URL,
            validate: None,
            blocks_noun_spans: true,
            suppress_if_contained: false,
        },
        PatternRule {
            category: EntityCategory::Email,
            regex: &EMAIL,
            validate: None,
            blocks_noun_spans: true,
            suppress_if_contained: false,
        },
        PatternRule {
            category: EntityCategory::Date,
            regex: &DATE,
            validate: Some(is_valid_date),
            blocks_noun_spans: true,
            suppress_if_contained: false,
        },
        PatternRule {
            category: EntityCategory::PhoneKr,
            regex: &PHONE_KR,
            validate: None,
            blocks_noun_spans: true,
            suppress_if_contained: true,
        },
        PatternRule {
            category: EntityCategory::PhoneIntl,
            regex: &PHONE_INTL,
            validate: None,
            blocks_noun_spans: true,
            suppress_if_contained: true,
        },
        PatternRule {
            category: EntityCategory::Account,
            regex: &ACCOUNT,
            validate: None,
            blocks_noun_spans: true,
            suppress_if_contained: true,
        },
        PatternRule {
            category: EntityCategory::Number,
            regex: &NUMBER,
            validate: None,
            blocks_noun_spans: false,
            suppress_if_contained: true,
        },
    ]
}

/// `YYMMDD` with a pivot at 50: `00`–`49` → 2000s, `50`–`99` → 1900s.
pub fn is_valid_short_date6(yymmdd: &str) -> bool {
    if yymmdd.len() != 6 || !yymmdd.bytes().all(|b| b.is_ascii_digit()) {
        return false;
    }
    let field = |range: std::ops::Range<usize>| yymmdd[range].parse::<u32>().ok();
    let (Some(yy), Some(mm), Some(dd)) = (field(0..2), field(2..4), field(4..6)) else {
        return false;
    };
    let year = if yy <= 49 { 2000 + yy } else { 1900 + yy };
    NaiveDate::from_ymd_opt(year as i32, mm, dd).is_some()
}

/// `YYYY<sep>M<sep>D` with `.`, `-` or `/` separators, checked against the calendar.
pub fn is_valid_date(text: &str) -> bool {
    let parts: Vec<&str> = text.split(['.', '-', '/']).collect();
    let [year, month, day] = parts.as_slice() else {
        return false;
    };
    match (year.parse::<i32>(), month.parse::<u32>(), day.parse::<u32>()) {
        (Ok(y), Ok(m), Ok(d)) => NaiveDate::from_ymd_opt(y, m, d).is_some(),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_follows_category_order() {
        let table = pattern_table();
        let order: Vec<EntityCategory> = table.iter().map(|r| r.category).collect();
        assert_eq!(order, EntityCategory::ALL.to_vec());
    }

    #[test]
    fn test_only_number_leaves_nouns_alone() {
        for rule in pattern_table() {
            assert_eq!(rule.blocks_noun_spans, rule.category != EntityCategory::Number);
        }
    }

    #[test]
    fn test_key_names_round_trip() {
        for category in EntityCategory::ALL {
            assert_eq!(EntityCategory::from_key(category.key_name()), Some(category));
        }
        assert_eq!(EntityCategory::from_key("phone"), None);
    }

    #[test]
    fn test_short_date6_pivot_and_calendar() {
        assert!(is_valid_short_date6("991231"));
        assert!(is_valid_short_date6("200622"));
        assert!(is_valid_short_date6("000229")); // 2000 is a leap year
        assert!(!is_valid_short_date6("500229")); // 1950 is not
        assert!(!is_valid_short_date6("991332"));
        assert!(!is_valid_short_date6("12345"));
    }

    #[test]
    fn test_date_rejects_impossible_days() {
        assert!(is_valid_date("2024/11/27"));
        assert!(is_valid_date("2024.2.29"));
        assert!(!is_valid_date("2023-02-29"));
        assert!(!is_valid_date("2024/02/30"));
        assert!(!is_valid_date("2024/13/01"));
    }

    #[test]
    fn test_patterns_respect_digit_boundaries() {
        assert!(SHORT_DATE_6.is_match("보고서_991231.pptx").unwrap());
        assert!(!SHORT_DATE_6.is_match("1991231").unwrap());
        assert!(PHONE_KR.is_match("전화 010-1234-5678").unwrap());
        assert!(EMAIL.is_match("contact@example.com").unwrap());
        assert!(!EMAIL.is_match("https://host/user@example.com").unwrap());
    }

    #[test]
    fn test_category_serializes_to_key_name() {
        let json = serde_json::to_string(&EntityCategory::ShortDate6).unwrap();
        assert_eq!(json, "\"short_date_6\"");
    }
}
