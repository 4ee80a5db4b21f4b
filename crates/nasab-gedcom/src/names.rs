//! Arabic name extraction
//!
//! Heuristic decomposition of an Arabic name string into kunya, nasab
//! (patronymic chain) and nisba. The three extractions are independent
//! and may overlap; ambiguous names can under- or over-match.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

/// Arabic, Arabic Supplement, Arabic Extended-A and both presentation-form blocks
const ARABIC_RANGES: [(char, char); 5] = [
    ('\u{0600}', '\u{06FF}'),
    ('\u{0750}', '\u{077F}'),
    ('\u{08A0}', '\u{08FF}'),
    ('\u{FB50}', '\u{FDFF}'),
    ('\u{FE70}', '\u{FEFF}'),
];

const ARABIC_WORD: &str =
    r"[\x{0600}-\x{06FF}\x{0750}-\x{077F}\x{08A0}-\x{08FF}\x{FB50}-\x{FDFF}\x{FE70}-\x{FEFF}]+";

static KUNYA: Lazy<Regex> =
    Lazy::new(|| Regex::new(&format!(r"(?:^|\s)((?:أبو|أم)\s+{ARABIC_WORD})")).unwrap());

static NASAB: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"(?:^|\s)((?:بن|بنت)\s+{ARABIC_WORD}(?:\s+(?:بن|بنت)\s+{ARABIC_WORD})*)"
    ))
    .unwrap()
});

/// Whether a character falls in one of the Arabic blocks
pub fn is_arabic_char(c: char) -> bool {
    ARABIC_RANGES
        .iter()
        .any(|(start, end)| (*start..=*end).contains(&c))
}

/// Whether the text contains any Arabic-script character
pub fn contains_arabic(text: &str) -> bool {
    text.chars().any(is_arabic_char)
}

/// Name components found in an Arabic name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ArabicNameParts {
    /// e.g. أبو محمد
    pub kunya: Option<String>,
    /// e.g. بن عبدالله بن عبدالمطلب
    pub patronymic_chain: Option<String>,
    /// e.g. الهاشمي
    pub nisba: Option<String>,
}

impl ArabicNameParts {
    pub fn is_empty(&self) -> bool {
        self.kunya.is_none() && self.patronymic_chain.is_none() && self.nisba.is_none()
    }
}

fn extract_kunya(name: &str) -> Option<String> {
    KUNYA.captures(name).map(|caps| caps[1].to_string())
}

fn extract_nasab(name: &str) -> Option<String> {
    NASAB.captures(name).map(|caps| caps[1].to_string())
}

fn extract_nisba(name: &str) -> Option<String> {
    name.split_whitespace()
        .find(|token| {
            token.chars().count() > 3 && token.starts_with("ال") && token.ends_with('ي')
        })
        .map(str::to_string)
}

/// Extract kunya, nasab and nisba. Non-Arabic names yield empty parts.
pub fn extract_arabic_name_parts(name: &str) -> ArabicNameParts {
    if !contains_arabic(name) {
        return ArabicNameParts::default();
    }

    ArabicNameParts {
        kunya: extract_kunya(name),
        patronymic_chain: extract_nasab(name),
        nisba: extract_nisba(name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_arabic() {
        assert!(contains_arabic("Ahmad أحمد"));
        assert!(contains_arabic("ﷲ"));
        assert!(!contains_arabic("Ahmad AlFulani"));
        assert!(!contains_arabic(""));
    }

    #[test]
    fn test_full_name_decomposition() {
        let parts = extract_arabic_name_parts("أبو القاسم محمد بن عبدالله بن عبدالمطلب الهاشمي");
        assert_eq!(parts.kunya.as_deref(), Some("أبو القاسم"));
        assert_eq!(
            parts.patronymic_chain.as_deref(),
            Some("بن عبدالله بن عبدالمطلب")
        );
        assert_eq!(parts.nisba.as_deref(), Some("الهاشمي"));
    }

    #[test]
    fn test_female_forms() {
        let parts = extract_arabic_name_parts("أم كلثوم بنت علي");
        assert_eq!(parts.kunya.as_deref(), Some("أم كلثوم"));
        assert_eq!(parts.patronymic_chain.as_deref(), Some("بنت علي"));
        assert!(parts.nisba.is_none());
    }

    #[test]
    fn test_words_containing_markers_are_not_split() {
        // عبن starts no chain; أبوظبي is not a kunya
        let parts = extract_arabic_name_parts("سالم عبن أبوظبي");
        assert!(parts.patronymic_chain.is_none());
        assert!(parts.kunya.is_none());
    }

    #[test]
    fn test_plain_name_has_no_parts() {
        assert!(extract_arabic_name_parts("محمد").is_empty());
        assert!(extract_arabic_name_parts("Abu Bakr ibn Ali").is_empty());
    }

    #[test]
    fn test_calls_do_not_share_state() {
        let first = extract_arabic_name_parts("علي بن حسين");
        let second = extract_arabic_name_parts("علي بن حسين");
        assert_eq!(first, second);
    }
}
