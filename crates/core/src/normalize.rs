//! Script detection and text normalization for keyword matching.
//!
//! Handles right-to-left script detection, Arabic diacritic stripping and
//! letter canonicalization, Latin accent stripping, and whitespace and
//! punctuation collapsing.

use regex::Regex;
use std::sync::LazyLock;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Regex to collapse whitespace runs into one space.
static WHITESPACE_COLLAPSE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Regex matching anything that is neither a word character nor whitespace.
static NON_WORD_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^\w\s]|_").unwrap());

/// Share of right-to-left letters above which text counts as RTL.
const RTL_THRESHOLD: f64 = 0.3;

/// Language tags whose script is written right-to-left.
const RTL_LANGUAGES: &[&str] = &["ar", "he", "iw", "fa", "ur", "ps", "yi", "ckb"];

/// Dominant writing direction of a piece of text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextDirection {
    #[default]
    Ltr,
    Rtl,
}

impl TextDirection {
    /// Direction implied by a language tag such as `ar` or `ar-SA`, if known.
    pub fn from_language(tag: &str) -> Option<Self> {
        let primary = tag
            .split(['-', '_'])
            .next()
            .unwrap_or_default()
            .trim()
            .to_lowercase();
        if primary.is_empty() {
            None
        } else if RTL_LANGUAGES.contains(&primary.as_str()) {
            Some(Self::Rtl)
        } else {
            Some(Self::Ltr)
        }
    }
}

/// True for letters of the Hebrew and Arabic script blocks.
pub fn is_rtl_char(c: char) -> bool {
    matches!(
        c,
        '\u{0590}'..='\u{05FF}'
            | '\u{0600}'..='\u{06FF}'
            | '\u{0750}'..='\u{077F}'
            | '\u{08A0}'..='\u{08FF}'
            | '\u{FB1D}'..='\u{FDFF}'
            | '\u{FE70}'..='\u{FEFF}'
    )
}

/// Detect the dominant direction from the share of RTL letters.
pub fn detect_direction(text: &str) -> TextDirection {
    let mut alphabetic = 0usize;
    let mut rtl = 0usize;

    for c in text.chars().filter(|c| c.is_alphabetic()) {
        alphabetic += 1;
        if is_rtl_char(c) {
            rtl += 1;
        }
    }

    if alphabetic > 0 && rtl as f64 / alphabetic as f64 > RTL_THRESHOLD {
        TextDirection::Rtl
    } else {
        TextDirection::Ltr
    }
}

/// Arabic harakat, tanween, superscript alef, tatweel and Quranic marks.
fn is_arabic_diacritic(c: char) -> bool {
    matches!(
        c,
        '\u{0610}'..='\u{061A}'
            | '\u{064B}'..='\u{065F}'
            | '\u{0670}'
            | '\u{0640}'
            | '\u{06D6}'..='\u{06ED}'
    )
}

/// Map Arabic letter variants onto one canonical form.
fn canonical_arabic(c: char) -> char {
    match c {
        'أ' | 'إ' | 'آ' | 'ٱ' => 'ا',
        'ى' | 'ی' | 'ئ' => 'ي',
        'ة' => 'ه',
        'ؤ' => 'و',
        'ک' => 'ك',
        other => other,
    }
}

fn fold_arabic(text: &str) -> String {
    text.chars()
        .filter(|c| !is_arabic_diacritic(*c))
        .map(canonical_arabic)
        .collect()
}

fn fold_latin(text: &str) -> String {
    text.nfd().filter(|c| !is_combining_mark(*c)).collect()
}

/// Normalizer producing comparison keys for keyword and fuzzy matching.
#[derive(Debug, Clone, Default)]
pub struct TextNormalizer {
    /// Fixed direction; detected per call when unset.
    direction: Option<TextDirection>,
}

impl TextNormalizer {
    /// Create a normalizer that detects direction from each input.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a fixed direction instead of detecting it.
    pub fn with_direction(mut self, direction: TextDirection) -> Self {
        self.direction = Some(direction);
        self
    }

    /// The direction this normalizer applies to `text`.
    pub fn direction_for(&self, text: &str) -> TextDirection {
        self.direction.unwrap_or_else(|| detect_direction(text))
    }

    /// Normalize text into a comparison key.
    ///
    /// - RTL text: strips diacritics and canonicalizes letter variants
    /// - LTR text: strips accents
    /// - Both: lowercases, turns punctuation and underscores into spaces,
    ///   collapses whitespace and trims
    pub fn normalize(&self, text: &str) -> String {
        let folded = match self.direction_for(text) {
            TextDirection::Rtl => fold_arabic(text),
            TextDirection::Ltr => fold_latin(text),
        };

        let lowered = folded.to_lowercase();
        let spaced = NON_WORD_REGEX.replace_all(&lowered, " ");
        WHITESPACE_COLLAPSE_REGEX
            .replace_all(&spaced, " ")
            .trim()
            .to_string()
    }

    /// Normalize text and split it into words.
    pub fn words(&self, text: &str) -> Vec<String> {
        self.normalize(text)
            .split(' ')
            .filter(|w| !w.is_empty())
            .map(str::to_string)
            .collect()
    }
}

/// Check whether `needle` occurs in `haystack` as whole words.
///
/// Both inputs are expected to be normalized (single-spaced, trimmed).
pub fn contains_words(haystack: &str, needle: &str) -> bool {
    if needle.is_empty() {
        return false;
    }
    format!(" {haystack} ").contains(&format!(" {needle} "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_direction() {
        assert_eq!(detect_direction("Quarterly results"), TextDirection::Ltr);
        assert_eq!(detect_direction("شكرا لكم"), TextDirection::Rtl);
        assert_eq!(detect_direction(""), TextDirection::Ltr);
        assert_eq!(detect_direction("12345"), TextDirection::Ltr);
    }

    #[test]
    fn test_mixed_text_threshold() {
        // 4 Arabic letters out of 11 letters is above 30%
        assert_eq!(detect_direction("Results نتائ"), TextDirection::Rtl);
        // 2 out of 18 is not
        assert_eq!(detect_direction("Quarterly Results نت"), TextDirection::Ltr);
    }

    #[test]
    fn test_direction_from_language() {
        assert_eq!(TextDirection::from_language("ar"), Some(TextDirection::Rtl));
        assert_eq!(TextDirection::from_language("ar-SA"), Some(TextDirection::Rtl));
        assert_eq!(TextDirection::from_language("en_US"), Some(TextDirection::Ltr));
        assert_eq!(TextDirection::from_language(""), None);
    }

    #[test]
    fn test_strip_arabic_diacritics() {
        let normalizer = TextNormalizer::new();
        assert_eq!(normalizer.normalize("شُكْرًا"), "شكرا");
        assert_eq!(normalizer.normalize("شكــرا"), "شكرا");
    }

    #[test]
    fn test_canonicalize_arabic_letters() {
        let normalizer = TextNormalizer::new();
        assert_eq!(normalizer.normalize("أهداف"), "اهداف");
        assert_eq!(normalizer.normalize("إدارة"), "اداره");
        assert_eq!(normalizer.normalize("مستوى"), "مستوي");
    }

    #[test]
    fn test_strip_latin_accents() {
        let normalizer = TextNormalizer::new();
        assert_eq!(normalizer.normalize("Café Résumé"), "cafe resume");
    }

    #[test]
    fn test_punctuation_and_whitespace() {
        let normalizer = TextNormalizer::new();
        assert_eq!(
            normalizer.normalize("  Team-building,   Q&A!  "),
            "team building q a"
        );
        assert_eq!(normalizer.normalize("calendar_check"), "calendar check");
    }

    #[test]
    fn test_fixed_direction() {
        let normalizer = TextNormalizer::new().with_direction(TextDirection::Ltr);
        assert_eq!(normalizer.direction_for("شكرا"), TextDirection::Ltr);
    }

    #[test]
    fn test_words() {
        let normalizer = TextNormalizer::new();
        assert_eq!(normalizer.words("Our Goals: 2025"), vec!["our", "goals", "2025"]);
    }

    #[test]
    fn test_contains_words() {
        assert!(contains_words("our team goals", "team"));
        assert!(contains_words("our team goals", "team goals"));
        assert!(!contains_words("steam engine", "team"));
        assert!(!contains_words("anything", ""));
    }
}
