//! Domain types for representing authored deck content.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::coerce::{lenient_bullets, lenient_rows, lenient_text_list};

/// An entire deck as handed over by the content author.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Deck {
    /// Presentation title.
    #[serde(default)]
    pub title: String,

    /// Optional presentation subtitle.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,

    /// Optional author line.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,

    /// Deck-wide language tag (e.g. `en`, `ar`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,

    /// Slides in authored order.
    #[serde(default)]
    pub slides: Vec<SlideSpec>,
}

impl Deck {
    /// Create a new deck with the given title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Add a slide to the deck.
    pub fn add_slide(&mut self, slide: SlideSpec) {
        self.slides.push(slide);
    }

    /// Parse a deck from its JSON representation.
    pub fn from_json(json: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize the deck back to JSON.
    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Abstract description of one slide's intended content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlideSpec {
    /// Slide title.
    #[serde(default)]
    pub title: String,

    /// Subtitle; pagination appends continuation markers here.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,

    /// Free-text layout hint from the author.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout_hint: Option<String>,

    /// Free-text icon hint from the author.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon_hint: Option<String>,

    /// Per-slide language tag; falls back to the deck language.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,

    /// Marks the deck's terminal closing divider, which is never dropped.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub closing: bool,

    /// Kind-tagged payload.
    #[serde(flatten)]
    pub content: SlideContent,
}

impl SlideSpec {
    /// Create a new slide with the given title and payload.
    pub fn new(title: impl Into<String>, content: SlideContent) -> Self {
        Self {
            title: title.into(),
            subtitle: None,
            layout_hint: None,
            icon_hint: None,
            language: None,
            closing: false,
            content,
        }
    }

    pub fn with_subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = Some(subtitle.into());
        self
    }

    pub fn with_layout_hint(mut self, hint: impl Into<String>) -> Self {
        self.layout_hint = Some(hint.into());
        self
    }

    pub fn with_icon_hint(mut self, hint: impl Into<String>) -> Self {
        self.icon_hint = Some(hint.into());
        self
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    /// Mark this slide as the terminal closing divider.
    pub fn as_closing(mut self) -> Self {
        self.closing = true;
        self
    }

    /// The slide's content kind.
    pub fn kind(&self) -> ContentKind {
        self.content.kind()
    }

    /// Copy this slide's metadata around a replacement payload.
    pub fn with_content(&self, content: SlideContent) -> Self {
        Self {
            content,
            ..self.clone()
        }
    }
}

/// The tag distinguishing slide payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentKind {
    Section,
    Agenda,
    Bullets,
    Paragraph,
    Chart,
    Table,
    FourBox,
    TwoColumn,
}

impl ContentKind {
    /// All kinds, in declaration order.
    pub const ALL: [ContentKind; 8] = [
        Self::Section,
        Self::Agenda,
        Self::Bullets,
        Self::Paragraph,
        Self::Chart,
        Self::Table,
        Self::FourBox,
        Self::TwoColumn,
    ];

    /// Stable snake_case name, matching the serialized form.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Section => "section",
            Self::Agenda => "agenda",
            Self::Bullets => "bullets",
            Self::Paragraph => "paragraph",
            Self::Chart => "chart",
            Self::Table => "table",
            Self::FourBox => "four_box",
            Self::TwoColumn => "two_column",
        }
    }
}

impl std::fmt::Display for ContentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind-specific slide payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SlideContent {
    /// Section divider; carries only the title.
    Section,
    Agenda {
        #[serde(default, deserialize_with = "lenient_text_list")]
        items: Vec<String>,
    },
    Bullets {
        #[serde(default, deserialize_with = "lenient_bullets")]
        bullets: Vec<BulletItem>,
    },
    Paragraph {
        #[serde(default)]
        text: String,
    },
    Chart(ChartData),
    Table(TableData),
    FourBox {
        #[serde(default)]
        boxes: Vec<BoxItem>,
    },
    TwoColumn(TwoColumnData),
}

impl SlideContent {
    pub fn kind(&self) -> ContentKind {
        match self {
            Self::Section => ContentKind::Section,
            Self::Agenda { .. } => ContentKind::Agenda,
            Self::Bullets { .. } => ContentKind::Bullets,
            Self::Paragraph { .. } => ContentKind::Paragraph,
            Self::Chart(_) => ContentKind::Chart,
            Self::Table(_) => ContentKind::Table,
            Self::FourBox { .. } => ContentKind::FourBox,
            Self::TwoColumn(_) => ContentKind::TwoColumn,
        }
    }

    /// Check that the payload is populated and structurally sound.
    ///
    /// Section dividers have no payload and always pass.
    pub fn validate(&self) -> Result<(), PayloadDefect> {
        match self {
            Self::Section => Ok(()),
            Self::Agenda { items } => {
                if items.iter().all(|i| i.trim().is_empty()) {
                    Err(PayloadDefect::Empty)
                } else {
                    Ok(())
                }
            }
            Self::Bullets { bullets } => {
                if bullets.iter().all(BulletItem::is_blank) {
                    Err(PayloadDefect::Empty)
                } else {
                    Ok(())
                }
            }
            Self::Paragraph { text } => {
                if text.trim().is_empty() {
                    Err(PayloadDefect::Empty)
                } else {
                    Ok(())
                }
            }
            Self::Chart(chart) => chart.validate(),
            Self::Table(table) => table.validate(),
            Self::FourBox { boxes } => {
                if boxes.iter().all(BoxItem::is_blank) {
                    Err(PayloadDefect::Empty)
                } else {
                    Ok(())
                }
            }
            Self::TwoColumn(columns) => {
                let blank = |items: &[String]| items.iter().all(|i| i.trim().is_empty());
                if blank(&columns.left) && blank(&columns.right) {
                    Err(PayloadDefect::Empty)
                } else {
                    Ok(())
                }
            }
        }
    }

    /// Plain body text, used for icon matching.
    pub fn body_text(&self) -> String {
        let parts: Vec<&str> = match self {
            Self::Section => Vec::new(),
            Self::Agenda { items } => items.iter().map(String::as_str).collect(),
            Self::Bullets { bullets } => bullets
                .iter()
                .flat_map(|b| {
                    std::iter::once(b.text.as_str()).chain(b.sub_items.iter().map(String::as_str))
                })
                .collect(),
            Self::Paragraph { text } => vec![text.as_str()],
            Self::Chart(chart) => chart.categories.iter().map(String::as_str).collect(),
            Self::Table(table) => table.headers.iter().map(String::as_str).collect(),
            Self::FourBox { boxes } => boxes
                .iter()
                .flat_map(|b| [b.title.as_str(), b.text.as_str()])
                .collect(),
            Self::TwoColumn(columns) => columns
                .left
                .iter()
                .chain(columns.right.iter())
                .map(String::as_str)
                .collect(),
        };

        parts
            .into_iter()
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Why a payload was judged unusable.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PayloadDefect {
    #[error("payload is empty")]
    Empty,
    #[error("chart has no categories")]
    MissingCategories,
    #[error("chart has no series")]
    MissingSeries,
    #[error("series '{series}' has {values} values for {categories} categories")]
    SeriesLengthMismatch {
        series: String,
        values: usize,
        categories: usize,
    },
    #[error("chart values are all zero or not finite")]
    NoData,
    #[error("table has no headers")]
    MissingHeaders,
    #[error("table has no rows")]
    MissingRows,
}

/// A single bullet with optional sub-items.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BulletItem {
    pub text: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sub_items: Vec<String>,
}

impl BulletItem {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            sub_items: Vec::new(),
        }
    }

    pub fn with_sub_items<I, S>(mut self, items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.sub_items = items.into_iter().map(Into::into).collect();
        self
    }

    /// True when neither the bullet nor any sub-item carries text.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty() && self.sub_items.iter().all(|s| s.trim().is_empty())
    }
}

/// One of the four items in a four-box group.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BoxItem {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon_hint: Option<String>,
    /// Padding inserted by pagination, not authored.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub placeholder: bool,
}

impl BoxItem {
    pub fn new(title: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            text: text.into(),
            ..Self::default()
        }
    }

    /// An empty padding item.
    pub fn placeholder() -> Self {
        Self {
            placeholder: true,
            ..Self::default()
        }
    }

    pub fn is_blank(&self) -> bool {
        self.title.trim().is_empty() && self.text.trim().is_empty()
    }
}

/// Chart payload: categories along one axis and one or more value series.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ChartData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chart_type: Option<String>,
    #[serde(default, deserialize_with = "lenient_text_list")]
    pub categories: Vec<String>,
    #[serde(default)]
    pub series: Vec<ChartSeries>,
}

impl ChartData {
    /// Reject charts a renderer could not draw meaningfully.
    pub fn validate(&self) -> Result<(), PayloadDefect> {
        if self.categories.is_empty() {
            return Err(PayloadDefect::MissingCategories);
        }
        if self.series.is_empty() {
            return Err(PayloadDefect::MissingSeries);
        }

        for series in &self.series {
            if series.values.len() != self.categories.len() {
                return Err(PayloadDefect::SeriesLengthMismatch {
                    series: series.name.clone(),
                    values: series.values.len(),
                    categories: self.categories.len(),
                });
            }
        }

        let has_data = self
            .series
            .iter()
            .flat_map(|s| s.values.iter())
            .any(|v| v.is_finite() && *v != 0.0);
        if !has_data {
            return Err(PayloadDefect::NoData);
        }

        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ChartSeries {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub values: Vec<f64>,
}

/// Table payload: a header row plus data rows.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TableData {
    #[serde(default, deserialize_with = "lenient_text_list")]
    pub headers: Vec<String>,
    #[serde(default, deserialize_with = "lenient_rows")]
    pub rows: Vec<Vec<String>>,
}

impl TableData {
    pub fn validate(&self) -> Result<(), PayloadDefect> {
        if self.headers.iter().all(|h| h.trim().is_empty()) {
            return Err(PayloadDefect::MissingHeaders);
        }
        if self.rows.is_empty() {
            return Err(PayloadDefect::MissingRows);
        }
        Ok(())
    }

    /// True if `row` repeats the header row, ignoring case and surrounding space.
    pub fn is_header_row(&self, row: &[String]) -> bool {
        row.len() == self.headers.len()
            && row
                .iter()
                .zip(&self.headers)
                .all(|(cell, header)| cell.trim().to_lowercase() == header.trim().to_lowercase())
    }
}

/// Two-column (comparison) payload.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TwoColumnData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub left_title: Option<String>,
    #[serde(default, deserialize_with = "lenient_text_list")]
    pub left: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub right_title: Option<String>,
    #[serde(default, deserialize_with = "lenient_text_list")]
    pub right: Vec<String>,
}
