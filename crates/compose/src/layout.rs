//! Layout resolution: content kind + author hint → catalog layout.

use deck_core::{ContentKind, Error, LayoutCatalog, LayoutChoice, LayoutDescriptor, Result};

use crate::context::CompositionContext;
use crate::diagnostics::{Diagnostic, Outcome};

/// Slot for the icon variant of the four-box layout.
pub const FOUR_BOX_ICONS_SLOT: &str = "four_box_icons";

/// Layout intents an author hint can express.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutIntent {
    Chart,
    Table,
    Agenda,
    FourBox,
    FourBoxIcons,
    Paragraph,
    TwoColumn,
}

/// Recognized hint spellings, compared after separator-insensitive folding.
const INTENT_ALIASES: &[(&str, LayoutIntent)] = &[
    ("chart", LayoutIntent::Chart),
    ("graph", LayoutIntent::Chart),
    ("table", LayoutIntent::Table),
    ("agenda", LayoutIntent::Agenda),
    ("toc", LayoutIntent::Agenda),
    ("tableofcontents", LayoutIntent::Agenda),
    ("fourboxicons", LayoutIntent::FourBoxIcons),
    ("fourboxwithicons", LayoutIntent::FourBoxIcons),
    ("iconboxes", LayoutIntent::FourBoxIcons),
    ("fourbox", LayoutIntent::FourBox),
    ("boxes", LayoutIntent::FourBox),
    ("quadrant", LayoutIntent::FourBox),
    ("paragraph", LayoutIntent::Paragraph),
    ("text", LayoutIntent::Paragraph),
    ("twocolumn", LayoutIntent::TwoColumn),
    ("twocolumns", LayoutIntent::TwoColumn),
    ("comparison", LayoutIntent::TwoColumn),
    ("compare", LayoutIntent::TwoColumn),
];

/// Lowercase and drop hyphens, underscores and spaces.
fn fold_hint(hint: &str) -> String {
    hint.chars()
        .filter(|c| !matches!(c, '-' | '_') && !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Slot names a catalog may map: every content kind plus the icon four-box.
fn is_known_slot(slot: &str) -> bool {
    slot == FOUR_BOX_ICONS_SLOT || ContentKind::ALL.iter().any(|kind| kind.as_str() == slot)
}

impl LayoutIntent {
    /// Match a free-text hint against the recognized intents.
    pub fn from_hint(hint: &str) -> Option<Self> {
        let folded = fold_hint(hint);
        if folded.is_empty() {
            return None;
        }
        INTENT_ALIASES
            .iter()
            .find(|(alias, _)| *alias == folded)
            .map(|(_, intent)| *intent)
    }

    /// Catalog slot this intent selects.
    pub fn slot(self) -> &'static str {
        match self {
            Self::Chart => ContentKind::Chart.as_str(),
            Self::Table => ContentKind::Table.as_str(),
            Self::Agenda => ContentKind::Agenda.as_str(),
            Self::FourBox => ContentKind::FourBox.as_str(),
            Self::FourBoxIcons => FOUR_BOX_ICONS_SLOT,
            Self::Paragraph => ContentKind::Paragraph.as_str(),
            Self::TwoColumn => ContentKind::TwoColumn.as_str(),
        }
    }
}

/// Resolves slides to layout descriptors from a validated catalog.
#[derive(Debug, Clone)]
pub struct LayoutResolver<'c> {
    catalog: &'c LayoutCatalog,
    default: &'c LayoutDescriptor,
}

impl<'c> LayoutResolver<'c> {
    /// Create a resolver, failing if the catalog has no usable default layout
    /// or maps a slot that no slide could ever select.
    pub fn new(catalog: &'c LayoutCatalog) -> Result<Self> {
        let default = catalog.default_descriptor()?;

        let mut slots: Vec<&String> = catalog.slots.keys().collect();
        slots.sort();
        if let Some(slot) = slots.into_iter().find(|slot| !is_known_slot(slot)) {
            return Err(Error::UnknownLayoutSlot(slot.clone()));
        }

        Ok(Self { catalog, default })
    }

    pub fn default_layout(&self) -> &'c LayoutDescriptor {
        self.default
    }

    /// Resolve the layout for one slide.
    ///
    /// A recognized hint selects its intent's slot; otherwise the content
    /// kind's slot is used. Rotating slots pick `list[counter % len]` and
    /// advance the slot's counter in `ctx`. A key missing from the catalog
    /// falls back to the default layout with a diagnostic.
    pub fn resolve(
        &self,
        kind: ContentKind,
        hint: Option<&str>,
        ctx: &mut CompositionContext,
    ) -> Outcome<&'c LayoutDescriptor> {
        let hinted = hint.and_then(LayoutIntent::from_hint).map(LayoutIntent::slot);

        let slot = hinted
            .filter(|slot| self.catalog.slot(slot).is_some())
            .unwrap_or_else(|| kind.as_str());

        let key = match self.catalog.slot(slot) {
            Some(LayoutChoice::Single(key)) => key.as_str(),
            Some(LayoutChoice::Rotation(keys)) if !keys.is_empty() => {
                let index = ctx.next_rotation(slot) % keys.len();
                log::debug!("Rotating '{}' layout to variant {} of {}", slot, index + 1, keys.len());
                keys[index].as_str()
            }
            _ => slot,
        };

        match self.catalog.get(key) {
            Some(layout) => Outcome::clean(layout),
            None => {
                log::warn!(
                    "Layout '{}' for {} slide not in catalog; using '{}'",
                    key,
                    kind,
                    self.default.key
                );
                Outcome::with(
                    self.default,
                    Diagnostic::LayoutFallback {
                        kind,
                        requested: key.to_string(),
                        used: self.default.key.clone(),
                    },
                )
            }
        }
    }
}
