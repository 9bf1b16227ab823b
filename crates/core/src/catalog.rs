//! Read-only catalogs supplied at build start: layouts and icons.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::{Error, Result};

/// Icon every catalog is expected to carry as the terminal fallback.
pub const GENERIC_ICON: &str = "star";

/// Icon used for greetings, thanks and closing remarks.
pub const GREETING_ICON: &str = "hand-wave";

/// A visual template, opaque to the engine and consumed by the renderer.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LayoutDescriptor {
    /// Catalog key identifying this layout.
    pub key: String,

    /// Background treatment (image name, color, or style token).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,

    /// Placeholder geometry, in inches.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub placeholders: Vec<Placeholder>,
}

impl LayoutDescriptor {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            ..Self::default()
        }
    }

    pub fn with_background(mut self, background: impl Into<String>) -> Self {
        self.background = Some(background.into());
        self
    }

    pub fn with_placeholder(mut self, placeholder: Placeholder) -> Self {
        self.placeholders.push(placeholder);
        self
    }
}

/// A named placeholder box on a layout.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Placeholder {
    pub name: String,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// What a layout slot maps to: one key, or interchangeable variants to rotate through.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LayoutChoice {
    Single(String),
    Rotation(Vec<String>),
}

/// The layout catalog: descriptors keyed by layout key, plus the slot mapping.
///
/// Slots are named after content kinds (`bullets`, `section`, ...) and the
/// extra `four_box_icons` variant; each maps to a key or a rotation list.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LayoutCatalog {
    #[serde(default)]
    pub layouts: HashMap<String, LayoutDescriptor>,

    #[serde(default)]
    pub slots: HashMap<String, LayoutChoice>,

    /// Layout used whenever a resolved key is missing.
    #[serde(default)]
    pub default_layout: String,
}

impl LayoutCatalog {
    /// Create an empty catalog with the given default layout key.
    pub fn new(default_layout: impl Into<String>) -> Self {
        Self {
            default_layout: default_layout.into(),
            ..Self::default()
        }
    }

    /// Register a descriptor under its own key.
    pub fn with_layout(mut self, layout: LayoutDescriptor) -> Self {
        self.layouts.insert(layout.key.clone(), layout);
        self
    }

    /// Map a slot to a single layout key.
    pub fn with_slot(mut self, slot: impl Into<String>, key: impl Into<String>) -> Self {
        self.slots
            .insert(slot.into(), LayoutChoice::Single(key.into()));
        self
    }

    /// Map a slot to a rotation of interchangeable layout keys.
    pub fn with_rotation<I, S>(mut self, slot: impl Into<String>, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let keys = keys.into_iter().map(Into::into).collect();
        self.slots.insert(slot.into(), LayoutChoice::Rotation(keys));
        self
    }

    pub fn get(&self, key: &str) -> Option<&LayoutDescriptor> {
        self.layouts.get(key)
    }

    pub fn slot(&self, slot: &str) -> Option<&LayoutChoice> {
        self.slots.get(slot)
    }

    /// Return the default descriptor, failing if the catalog cannot provide one.
    pub fn default_descriptor(&self) -> Result<&LayoutDescriptor> {
        if self.default_layout.trim().is_empty() {
            return Err(Error::MissingDefaultLayout);
        }
        self.layouts
            .get(&self.default_layout)
            .ok_or_else(|| Error::UnknownDefaultLayout(self.default_layout.clone()))
    }
}

/// One icon in the catalog.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct IconEntry {
    pub id: String,

    /// Comma-separated human keywords.
    #[serde(default)]
    pub tags: String,

    /// Raw vector content, passed through to the rasterizer untouched.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub content: String,
}

impl IconEntry {
    pub fn new(id: impl Into<String>, tags: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            tags: tags.into(),
            content: String::new(),
        }
    }

    /// Individual tags, trimmed, with blanks removed.
    pub fn tag_list(&self) -> impl Iterator<Item = &str> {
        self.tags.split(',').map(str::trim).filter(|t| !t.is_empty())
    }
}

/// The icon catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IconCatalog {
    #[serde(default)]
    pub entries: Vec<IconEntry>,

    /// Identifier returned when nothing else matches.
    #[serde(default = "default_generic_icon")]
    pub generic_icon: String,
}

fn default_generic_icon() -> String {
    GENERIC_ICON.to_string()
}

impl Default for IconCatalog {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            generic_icon: default_generic_icon(),
        }
    }
}

impl IconCatalog {
    pub fn new(entries: Vec<IconEntry>) -> Self {
        Self {
            entries,
            ..Self::default()
        }
    }

    pub fn with_generic_icon(mut self, id: impl Into<String>) -> Self {
        self.generic_icon = id.into();
        self
    }

    pub fn get(&self, id: &str) -> Option<&IconEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Check the catalog can always produce the generic fallback.
    pub fn validate(&self) -> Result<()> {
        if self.entries.is_empty() {
            return Err(Error::EmptyIconCatalog);
        }
        if !self.contains(&self.generic_icon) {
            return Err(Error::MissingGenericIcon(self.generic_icon.clone()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_catalog_from_json() {
        let catalog: LayoutCatalog = serde_json::from_str(
            r#"{
                "default_layout": "bullets",
                "layouts": {
                    "bullets": {"key": "bullets"},
                    "section_a": {"key": "section_a", "background": "dark"}
                },
                "slots": {
                    "bullets": "bullets",
                    "section": ["section_a", "section_b"]
                }
            }"#,
        )
        .unwrap();

        assert_eq!(catalog.slot("bullets"), Some(&LayoutChoice::Single("bullets".into())));
        assert_eq!(
            catalog.slot("section"),
            Some(&LayoutChoice::Rotation(vec!["section_a".into(), "section_b".into()]))
        );
        assert_eq!(catalog.default_descriptor().unwrap().key, "bullets");
    }

    #[test]
    fn test_missing_default_layout() {
        assert!(matches!(
            LayoutCatalog::default().default_descriptor(),
            Err(Error::MissingDefaultLayout)
        ));
        assert!(matches!(
            LayoutCatalog::new("bullets").default_descriptor(),
            Err(Error::UnknownDefaultLayout(key)) if key == "bullets"
        ));
    }

    #[test]
    fn test_icon_tags() {
        let entry = IconEntry::new("calendar-check", "timeline, schedule ,, dates");
        assert_eq!(
            entry.tag_list().collect::<Vec<_>>(),
            vec!["timeline", "schedule", "dates"]
        );
    }

    #[test]
    fn test_icon_catalog_validation() {
        assert!(matches!(
            IconCatalog::default().validate(),
            Err(Error::EmptyIconCatalog)
        ));

        let catalog = IconCatalog::new(vec![IconEntry::new("users", "team")]);
        assert!(matches!(catalog.validate(), Err(Error::MissingGenericIcon(_))));

        let catalog = catalog.with_generic_icon("users");
        assert!(catalog.validate().is_ok());
    }
}
