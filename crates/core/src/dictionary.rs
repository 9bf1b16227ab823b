//! Curated keyword → icon dictionaries.
//!
//! Keys are bilingual (English and Arabic). Order matters: earlier entries
//! win when several keys match the same text.

use serde::{Deserialize, Serialize};

use crate::catalog::GREETING_ICON;

/// One keyword and the icon it points at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordEntry {
    pub keyword: String,
    pub icon: String,
}

impl KeywordEntry {
    pub fn new(keyword: impl Into<String>, icon: impl Into<String>) -> Self {
        Self {
            keyword: keyword.into(),
            icon: icon.into(),
        }
    }
}

/// Ordered keyword → icon dictionary.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeywordDictionary {
    entries: Vec<KeywordEntry>,
}

/// Built-in English/Arabic keywords grouped by icon.
const BUILTIN_KEYWORDS: &[(&str, &[&str])] = &[
    (
        GREETING_ICON,
        &[
            "thank you", "thanks", "welcome", "hello", "شكرا", "شكر", "مرحبا", "اهلا",
        ],
    ),
    (
        "circle-question",
        &["questions", "question", "q&a", "faq", "اسئله", "سؤال", "استفسارات"],
    ),
    ("list", &["agenda", "overview", "contents", "جدول الاعمال", "المحتويات"]),
    ("chart-line", &["growth", "increase", "trend", "نمو", "زياده", "اتجاه"]),
    (
        "dollar-sign",
        &["revenue", "sales", "profit", "budget", "cost", "ايرادات", "مبيعات", "ارباح", "ميزانيه"],
    ),
    ("chart-bar", &["data", "analytics", "metrics", "statistics", "بيانات", "تحليل", "احصائيات"]),
    ("users", &["team", "people", "staff", "employees", "فريق", "موظفين", "الفريق"]),
    ("handshake", &["partnership", "partners", "collaboration", "شراكه", "شركاء", "تعاون"]),
    ("bullseye", &["goals", "goal", "target", "objectives", "هدف", "اهداف"]),
    ("lightbulb", &["idea", "ideas", "innovation", "فكره", "افكار", "ابتكار"]),
    ("shield", &["security", "secure", "protection", "privacy", "امن", "حمايه", "خصوصيه"]),
    ("globe", &["global", "international", "world", "عالمي", "دولي", "العالم"]),
    ("gears", &["process", "workflow", "operations", "عمليه", "عمليات", "سير العمل"]),
    (
        "triangle-exclamation",
        &["risk", "risks", "challenges", "issues", "مخاطر", "تحديات", "مشاكل"],
    ),
    ("trophy", &["success", "achievement", "award", "نجاح", "انجاز", "انجازات"]),
    ("graduation-cap", &["education", "training", "learning", "تعليم", "تدريب", "تعلم"]),
    ("laptop-code", &["technology", "software", "digital", "تقنيه", "برمجيات", "رقمي"]),
    ("heart-pulse", &["health", "wellness", "care", "صحه", "رعايه"]),
    (
        "clipboard-check",
        &["summary", "conclusion", "recommendations", "ملخص", "خلاصه", "توصيات"],
    ),
];

impl KeywordDictionary {
    /// Create an empty dictionary.
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in bilingual dictionary.
    pub fn builtin() -> Self {
        let entries = BUILTIN_KEYWORDS
            .iter()
            .flat_map(|(icon, keywords)| {
                keywords
                    .iter()
                    .map(move |keyword| KeywordEntry::new(*keyword, *icon))
            })
            .collect();
        Self { entries }
    }

    /// Append an entry; it ranks after all existing entries.
    pub fn with_entry(mut self, keyword: impl Into<String>, icon: impl Into<String>) -> Self {
        self.entries.push(KeywordEntry::new(keyword, icon));
        self
    }

    pub fn entries(&self) -> &[KeywordEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

/// Theme-level keyword overrides, checked late in icon resolution.
pub type ThemeOverrides = KeywordDictionary;
