//! Icon resolution: author hint and slide text → catalog icon identifier.
//!
//! Stages run in a fixed order and stop at the first hit:
//!
//! 1. hint equals a catalog id (separator variants tried)
//! 2. hint contains a dictionary keyword
//! 3. hint fuzzily matches a catalog id
//! 4. slide text contains a dictionary keyword
//! 5. slide text fuzzily matches a dictionary keyword
//! 6. slide text contains catalog tags, then fuzzy tag match
//! 7. theme overrides
//! 8. first significant title word fuzzily matches a keyword or id
//! 9. generic icon
//!
//! Every identifier returned is present in the catalog.

use deck_core::normalize::contains_words;
use deck_core::similarity::{best_window_ratio, combined_score, ratio};
use deck_core::{
    IconCatalog, KeywordDictionary, Result, TextDirection, TextNormalizer, ThemeOverrides,
};
use std::collections::{HashMap, HashSet};

use crate::diagnostics::{Diagnostic, Outcome};

/// Minimum score for a fuzzy hint → id match.
const HINT_FUZZY_THRESHOLD: f64 = 0.5;
/// Minimum score for a fuzzy text → dictionary keyword match.
const TEXT_FUZZY_THRESHOLD: f64 = 0.7;
/// Added to a fuzzy keyword score when keyword and text share a whole word.
const WORD_OVERLAP_BOOST: f64 = 0.1;
/// Minimum score for a fuzzy text → tag match.
const TAG_FUZZY_THRESHOLD: f64 = 0.65;
/// Minimum score for a fuzzy title-word match.
const TITLE_WORD_THRESHOLD: f64 = 0.75;
/// Keywords shorter than this only match whole words.
const MIN_SUBSTRING_KEY_CHARS: usize = 4;

/// Words never treated as a title's significant word.
const STOPWORDS: &[&str] = &[
    "the", "and", "for", "our", "your", "with", "from", "into", "about", "this", "that", "what",
    "how", "why", "who", "are", "new", "key", "من", "في", "على", "الى", "عن", "مع", "هذا", "هذه",
    "ما", "كيف", "لماذا",
];

/// Which stage produced an icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchStage {
    HintExact,
    HintDictionary,
    HintFuzzy,
    TextDictionary,
    TextFuzzy,
    TagExact,
    TagFuzzy,
    ThemeOverride,
    TitleWord,
    Generic,
}

/// A resolved icon and how it was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IconMatch<'c> {
    pub id: &'c str,
    pub stage: MatchStage,
}

/// Dictionary keyword prepared for comparison.
#[derive(Debug, Clone)]
struct PreparedKeyword<'c> {
    key: String,
    words: Vec<String>,
    icon: &'c str,
}

/// Catalog entry prepared for comparison.
#[derive(Debug, Clone)]
struct PreparedIcon<'c> {
    id: &'c str,
    /// Id with separators turned into spaces.
    spaced: String,
    tags: Vec<String>,
}

/// Check `key` against `text`, both normalized.
fn key_matches(text: &str, key: &str) -> bool {
    if key.is_empty() {
        return false;
    }
    if key.chars().count() < MIN_SUBSTRING_KEY_CHARS {
        contains_words(text, key)
    } else {
        text.contains(key)
    }
}

/// Id with hyphens, underscores and spaces removed.
fn compact(id: &str) -> String {
    id.chars()
        .filter(|c| !matches!(c, '-' | '_') && !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

fn prepare_keywords<'c>(
    dictionary: &'c KeywordDictionary,
    catalog: &IconCatalog,
    normalizer: &TextNormalizer,
) -> Vec<PreparedKeyword<'c>> {
    dictionary
        .entries()
        .iter()
        .filter(|entry| {
            let known = catalog.contains(&entry.icon);
            if !known {
                log::debug!(
                    "Ignoring keyword '{}': icon '{}' not in catalog",
                    entry.keyword,
                    entry.icon
                );
            }
            known
        })
        .filter_map(|entry| {
            let key = normalizer.normalize(&entry.keyword);
            if key.is_empty() {
                return None;
            }
            let words = key.split(' ').map(str::to_string).collect();
            Some(PreparedKeyword {
                key,
                words,
                icon: entry.icon.as_str(),
            })
        })
        .collect()
}

/// Resolves icons against one catalog and dictionary.
#[derive(Debug, Clone)]
pub struct IconResolver<'c> {
    catalog: &'c IconCatalog,
    generic: &'c str,
    icons: Vec<PreparedIcon<'c>>,
    by_compact_id: HashMap<String, &'c str>,
    keywords: Vec<PreparedKeyword<'c>>,
    overrides: Vec<PreparedKeyword<'c>>,
}

impl<'c> IconResolver<'c> {
    /// Create a resolver, failing if the catalog lacks its generic icon.
    pub fn new(catalog: &'c IconCatalog, dictionary: &'c KeywordDictionary) -> Result<Self> {
        catalog.validate()?;

        let normalizer = TextNormalizer::new();
        let icons: Vec<PreparedIcon<'c>> = catalog
            .entries
            .iter()
            .map(|entry| PreparedIcon {
                id: entry.id.as_str(),
                spaced: normalizer.normalize(&entry.id),
                tags: entry
                    .tag_list()
                    .map(|tag| normalizer.normalize(tag))
                    .filter(|tag| !tag.is_empty())
                    .collect(),
            })
            .collect();

        let mut by_compact_id = HashMap::new();
        for icon in &icons {
            by_compact_id.entry(compact(icon.id)).or_insert(icon.id);
        }

        Ok(Self {
            catalog,
            generic: catalog.generic_icon.as_str(),
            icons,
            by_compact_id,
            keywords: prepare_keywords(dictionary, catalog, &normalizer),
            overrides: Vec::new(),
        })
    }

    /// Add theme-level keyword overrides.
    pub fn with_theme_overrides(mut self, overrides: &'c ThemeOverrides) -> Self {
        self.overrides = prepare_keywords(overrides, self.catalog, &TextNormalizer::new());
        self
    }

    pub fn generic(&self) -> &'c str {
        self.generic
    }

    /// Resolve an icon for a hint and slide text.
    ///
    /// `language` is the declared language tag; RTL is used if either the
    /// tag or the text itself says so.
    pub fn resolve(
        &self,
        hint: Option<&str>,
        title: &str,
        body: &str,
        language: Option<&str>,
    ) -> Outcome<IconMatch<'c>> {
        let hint = hint.map(str::trim).filter(|h| !h.is_empty());

        if let Some(hint) = hint {
            if let Some(found) = self.match_hint(hint) {
                log::debug!("Icon hint '{}' resolved to '{}' ({:?})", hint, found.id, found.stage);
                return Outcome::clean(found);
            }
        }

        let raw = [hint.unwrap_or_default(), title, body]
            .into_iter()
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        if raw.is_empty() {
            return Outcome::clean(self.generic_match());
        }

        let declared = language.and_then(TextDirection::from_language);
        let direction = if declared == Some(TextDirection::Rtl) {
            TextDirection::Rtl
        } else {
            deck_core::detect_direction(&raw)
        };
        let normalizer = TextNormalizer::new().with_direction(direction);

        if let Some(found) = self
            .match_text(&normalizer, &raw)
            .or_else(|| self.match_title_word(&normalizer, title))
        {
            log::debug!("Icon for '{}' resolved to '{}' ({:?})", title, found.id, found.stage);
            return Outcome::clean(found);
        }

        log::warn!("No icon matched '{}'; using '{}'", raw, self.generic);
        Outcome::with(self.generic_match(), Diagnostic::IconFallback { text: raw })
    }

    fn generic_match(&self) -> IconMatch<'c> {
        IconMatch {
            id: self.generic,
            stage: MatchStage::Generic,
        }
    }

    fn hit(id: &'c str, stage: MatchStage) -> Option<IconMatch<'c>> {
        Some(IconMatch { id, stage })
    }

    // ── Hint stages ─────────────────────────────────────────────────────

    fn match_hint(&self, hint: &str) -> Option<IconMatch<'c>> {
        self.hint_exact(hint)
            .or_else(|| self.hint_dictionary(hint))
            .or_else(|| self.hint_fuzzy(hint))
    }

    fn hint_exact(&self, hint: &str) -> Option<IconMatch<'c>> {
        let lowered = hint.to_lowercase();
        let variants = [
            lowered.clone(),
            lowered.replace('-', "_"),
            lowered.replace('_', "-"),
            lowered.replace(' ', "-"),
        ];

        for variant in &variants {
            if let Some(entry) = self.catalog.get(variant) {
                return Self::hit(entry.id.as_str(), MatchStage::HintExact);
            }
        }

        let id = *self.by_compact_id.get(&compact(&lowered))?;
        Self::hit(id, MatchStage::HintExact)
    }

    fn hint_dictionary(&self, hint: &str) -> Option<IconMatch<'c>> {
        let text = TextNormalizer::new().normalize(hint);
        self.keywords
            .iter()
            .find(|k| key_matches(&text, &k.key))
            .and_then(|k| Self::hit(k.icon, MatchStage::HintDictionary))
    }

    fn hint_fuzzy(&self, hint: &str) -> Option<IconMatch<'c>> {
        let text = TextNormalizer::new().normalize(hint);
        if text.is_empty() {
            return None;
        }

        let (score, icon) = self
            .icons
            .iter()
            .map(|icon| (combined_score(&text, &icon.spaced), icon))
            .fold(None, keep_best)?;

        if score >= HINT_FUZZY_THRESHOLD {
            Self::hit(icon.id, MatchStage::HintFuzzy)
        } else {
            None
        }
    }

    // ── Text stages ─────────────────────────────────────────────────────

    fn match_text(&self, normalizer: &TextNormalizer, raw: &str) -> Option<IconMatch<'c>> {
        let text = normalizer.normalize(raw);
        if text.is_empty() {
            return None;
        }
        let words: Vec<String> = text.split(' ').map(str::to_string).collect();

        self.text_dictionary(&text)
            .or_else(|| self.text_fuzzy(&words))
            .or_else(|| self.tag_exact(&text))
            .or_else(|| self.tag_fuzzy(&words))
            .or_else(|| self.theme_override(&text))
    }

    fn text_dictionary(&self, text: &str) -> Option<IconMatch<'c>> {
        self.keywords
            .iter()
            .find(|k| key_matches(text, &k.key))
            .and_then(|k| Self::hit(k.icon, MatchStage::TextDictionary))
    }

    fn text_fuzzy(&self, words: &[String]) -> Option<IconMatch<'c>> {
        let text_words: HashSet<&str> = words.iter().map(String::as_str).collect();

        let (score, keyword) = self
            .keywords
            .iter()
            .map(|k| {
                let mut score = best_window_ratio(&k.key, words);
                if k.words.iter().any(|w| text_words.contains(w.as_str())) {
                    score = (score + WORD_OVERLAP_BOOST).min(1.0);
                }
                (score, k)
            })
            .fold(None, keep_best)?;

        if score >= TEXT_FUZZY_THRESHOLD {
            Self::hit(keyword.icon, MatchStage::TextFuzzy)
        } else {
            None
        }
    }

    /// Entry whose tags occur most often in the text; ties go to catalog order.
    fn tag_exact(&self, text: &str) -> Option<IconMatch<'c>> {
        let (count, icon) = self
            .icons
            .iter()
            .map(|icon| {
                let count = icon.tags.iter().filter(|t| key_matches(text, t)).count();
                (count, icon)
            })
            .fold(None, |best: Option<(usize, &PreparedIcon<'c>)>, candidate| match best {
                Some(current) if current.0 >= candidate.0 => Some(current),
                _ => Some(candidate),
            })?;

        if count > 0 {
            Self::hit(icon.id, MatchStage::TagExact)
        } else {
            None
        }
    }

    fn tag_fuzzy(&self, words: &[String]) -> Option<IconMatch<'c>> {
        let (score, icon) = self
            .icons
            .iter()
            .flat_map(|icon| icon.tags.iter().map(move |tag| (best_window_ratio(tag, words), icon)))
            .fold(None, keep_best)?;

        if score >= TAG_FUZZY_THRESHOLD {
            Self::hit(icon.id, MatchStage::TagFuzzy)
        } else {
            None
        }
    }

    fn theme_override(&self, text: &str) -> Option<IconMatch<'c>> {
        self.overrides
            .iter()
            .find(|k| key_matches(text, &k.key))
            .and_then(|k| Self::hit(k.icon, MatchStage::ThemeOverride))
    }

    fn match_title_word(&self, normalizer: &TextNormalizer, title: &str) -> Option<IconMatch<'c>> {
        let words = normalizer.words(title);
        let word = words
            .iter()
            .find(|w| w.chars().count() >= 3 && !STOPWORDS.contains(&w.as_str()))?;

        let keyword_scores = self
            .keywords
            .iter()
            .map(|k| (ratio(word, &k.key), k.icon));
        let id_scores = self.icons.iter().flat_map(|icon| {
            icon.spaced
                .split(' ')
                .map(move |part| (ratio(word, part), icon.id))
        });

        let (score, id) = keyword_scores.chain(id_scores).fold(None, keep_best)?;
        if score >= TITLE_WORD_THRESHOLD {
            Self::hit(id, MatchStage::TitleWord)
        } else {
            None
        }
    }
}

/// Fold step keeping the highest score; the earliest candidate wins ties.
fn keep_best<T>(best: Option<(f64, T)>, candidate: (f64, T)) -> Option<(f64, T)> {
    match best {
        Some(current) if current.0 >= candidate.0 => Some(current),
        _ => Some(candidate),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use deck_core::{IconEntry, GREETING_ICON};

    fn catalog() -> IconCatalog {
        IconCatalog::new(vec![
            IconEntry::new("star", "favorite, generic"),
            IconEntry::new("calendar-check", "timeline, schedule, dates"),
            IconEntry::new("chart-bar", "statistics, bars"),
            IconEntry::new("users", "team, people"),
            IconEntry::new("hand-wave", "greeting, hello"),
            IconEntry::new("shield", "security"),
            IconEntry::new("rocket", "launch, startup"),
            IconEntry::new("bullseye", "goal, aim"),
        ])
    }

    fn resolve<'c>(
        resolver: &IconResolver<'c>,
        hint: Option<&str>,
        title: &str,
        body: &str,
    ) -> IconMatch<'c> {
        resolver.resolve(hint, title, body, None).value
    }

    #[test]
    fn test_hint_exact_variants() {
        let catalog = catalog();
        let dictionary = KeywordDictionary::builtin();
        let resolver = IconResolver::new(&catalog, &dictionary).unwrap();

        for hint in ["chart-bar", "chart_bar", "Chart Bar", "chartbar", "CHART-BAR"] {
            let found = resolve(&resolver, Some(hint), "", "");
            assert_eq!(found.id, "chart-bar", "hint {hint}");
            assert_eq!(found.stage, MatchStage::HintExact);
        }
    }

    #[test]
    fn test_hint_dictionary() {
        let catalog = catalog();
        let dictionary = KeywordDictionary::builtin();
        let resolver = IconResolver::new(&catalog, &dictionary).unwrap();

        let found = resolve(&resolver, Some("team-photo"), "", "");
        assert_eq!(found, IconMatch { id: "users", stage: MatchStage::HintDictionary });
    }

    #[test]
    fn test_hint_fuzzy() {
        let catalog = catalog();
        let dictionary = KeywordDictionary::new();
        let resolver = IconResolver::new(&catalog, &dictionary).unwrap();

        let found = resolve(&resolver, Some("chart"), "", "");
        assert_eq!(found, IconMatch { id: "chart-bar", stage: MatchStage::HintFuzzy });

        let found = resolve(&resolver, Some("rockets"), "", "");
        assert_eq!(found.id, "rocket");
    }

    #[test]
    fn test_tag_search_from_hint() {
        let catalog = catalog();
        let dictionary = KeywordDictionary::builtin();
        let resolver = IconResolver::new(&catalog, &dictionary).unwrap();

        let found = resolve(&resolver, Some("timeline-schedule"), "Delivery Plan", "");
        assert_eq!(found, IconMatch { id: "calendar-check", stage: MatchStage::TagExact });
    }

    #[test]
    fn test_text_dictionary() {
        let catalog = catalog();
        let dictionary = KeywordDictionary::builtin();
        let resolver = IconResolver::new(&catalog, &dictionary).unwrap();

        let found = resolve(&resolver, None, "Meet the Team", "");
        assert_eq!(found, IconMatch { id: "users", stage: MatchStage::TextDictionary });
    }

    #[test]
    fn test_dictionary_skips_icons_missing_from_catalog() {
        let catalog = catalog();
        let dictionary = KeywordDictionary::builtin();
        let resolver = IconResolver::new(&catalog, &dictionary).unwrap();

        // "revenue" maps to dollar-sign, which this catalog lacks
        let found = resolve(&resolver, None, "Revenue", "");
        assert!(catalog.contains(found.id));
        assert_ne!(found.id, "dollar-sign");
    }

    #[test]
    fn test_text_fuzzy() {
        let catalog = catalog();
        let dictionary = KeywordDictionary::new().with_entry("security", "shield");
        let resolver = IconResolver::new(&catalog, &dictionary).unwrap();

        let found = resolve(&resolver, None, "Securty review", "");
        assert_eq!(found, IconMatch { id: "shield", stage: MatchStage::TextFuzzy });
    }

    #[test]
    fn test_tag_fuzzy() {
        let catalog = catalog();
        let dictionary = KeywordDictionary::new();
        let resolver = IconResolver::new(&catalog, &dictionary).unwrap();

        // "lanch" is a typo of the "launch" tag, so only the fuzzy tag pass sees it
        let found = resolve(&resolver, None, "Product lanch", "");
        assert_eq!(found, IconMatch { id: "rocket", stage: MatchStage::TagFuzzy });
    }

    #[test]
    fn test_theme_override() {
        let catalog = catalog();
        let dictionary = KeywordDictionary::new();
        let overrides = ThemeOverrides::new().with_entry("north star", "bullseye");
        let resolver = IconResolver::new(&catalog, &dictionary)
            .unwrap()
            .with_theme_overrides(&overrides);

        let found = resolve(&resolver, None, "Our north star", "");
        assert_eq!(found, IconMatch { id: "bullseye", stage: MatchStage::ThemeOverride });
    }

    #[test]
    fn test_title_word() {
        let catalog = catalog();
        let dictionary = KeywordDictionary::new();
        let resolver = IconResolver::new(&catalog, &dictionary).unwrap();

        let found = resolve(&resolver, None, "Rocketry basics", "");
        assert_eq!(found, IconMatch { id: "rocket", stage: MatchStage::TitleWord });
    }

    #[test]
    fn test_rtl_thanks_resolves_to_greeting() {
        let catalog = catalog();
        let dictionary = KeywordDictionary::builtin();
        let resolver = IconResolver::new(&catalog, &dictionary).unwrap();

        for title in ["شكرا لكم", "شُكْرًا لَكُمْ", "شكــراً"] {
            let found = resolver.resolve(None, title, "", Some("ar")).value;
            assert_eq!(found.id, GREETING_ICON, "title {title}");
        }
    }

    #[test]
    fn test_empty_input_is_generic_without_diagnostic() {
        let catalog = catalog();
        let dictionary = KeywordDictionary::builtin();
        let resolver = IconResolver::new(&catalog, &dictionary).unwrap();

        let outcome = resolver.resolve(Some("  "), "", " ", None);
        assert_eq!(outcome.value, IconMatch { id: "star", stage: MatchStage::Generic });
        assert!(outcome.diagnostics.is_empty());
    }

    #[test]
    fn test_unmatched_input_is_generic_with_diagnostic() {
        let catalog = catalog();
        let dictionary = KeywordDictionary::new();
        let resolver = IconResolver::new(&catalog, &dictionary).unwrap();

        let outcome = resolver.resolve(None, "Zxqv", "", None);
        assert_eq!(outcome.value.stage, MatchStage::Generic);
        assert_eq!(outcome.diagnostics.len(), 1);
    }

    #[test]
    fn test_catalog_without_generic_is_rejected() {
        let catalog = IconCatalog::new(vec![IconEntry::new("users", "")]);
        let dictionary = KeywordDictionary::new();
        assert!(IconResolver::new(&catalog, &dictionary).is_err());
    }

    #[test]
    fn test_compact() {
        assert_eq!(compact("Calendar-Check"), "calendarcheck");
        assert_eq!(compact("chart_bar line"), "chartbarline");
    }
}
