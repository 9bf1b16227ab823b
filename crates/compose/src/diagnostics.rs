//! Non-fatal build diagnostics and the statistics they fold into.

use deck_core::{ContentKind, PayloadDefect};
use serde::Serialize;

/// Something a build step degraded on instead of failing.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Diagnostic {
    /// A slide with no populated payload was dropped.
    DroppedEmpty { title: String, kind: ContentKind },
    /// A slide with a structurally invalid payload was dropped.
    DroppedInvalid {
        title: String,
        kind: ContentKind,
        defect: PayloadDefect,
    },
    /// A section divider with nothing to introduce was dropped.
    DroppedSection { title: String },
    /// A slide was split into several parts.
    Split {
        title: String,
        kind: ContentKind,
        parts: usize,
    },
    /// A trailing singleton chunk borrowed an item from its neighbour.
    Rebalanced { title: String, kind: ContentKind },
    /// The resolved layout key was missing; the default layout was used.
    LayoutFallback {
        kind: ContentKind,
        requested: String,
        used: String,
    },
    /// No icon matched non-empty input; the generic icon was used.
    IconFallback { text: String },
}

/// A value together with the diagnostics raised while producing it.
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome<T> {
    pub value: T,
    pub diagnostics: Vec<Diagnostic>,
}

impl<T> Outcome<T> {
    /// A value with no diagnostics.
    pub fn clean(value: T) -> Self {
        Self {
            value,
            diagnostics: Vec::new(),
        }
    }

    /// A value with one diagnostic.
    pub fn with(value: T, diagnostic: Diagnostic) -> Self {
        Self {
            value,
            diagnostics: vec![diagnostic],
        }
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    /// Move the diagnostics into `stats` and return the bare value.
    pub fn record(self, stats: &mut BuildStats) -> T {
        stats.absorb(&self.diagnostics);
        self.value
    }
}

/// Counters accumulated over one build.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BuildStats {
    pub slides_in: usize,
    pub slides_out: usize,
    pub dropped_empty: usize,
    pub dropped_invalid: usize,
    pub dropped_sections: usize,
    pub split_slides: usize,
    pub continuation_slides: usize,
    pub rebalanced: usize,
    pub layout_fallbacks: usize,
    pub icon_fallbacks: usize,
}

impl BuildStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one diagnostic.
    pub fn add(&mut self, diagnostic: &Diagnostic) {
        match diagnostic {
            Diagnostic::DroppedEmpty { .. } => self.dropped_empty += 1,
            Diagnostic::DroppedInvalid { .. } => self.dropped_invalid += 1,
            Diagnostic::DroppedSection { .. } => self.dropped_sections += 1,
            Diagnostic::Split { parts, .. } => {
                self.split_slides += 1;
                self.continuation_slides += parts.saturating_sub(1);
            }
            Diagnostic::Rebalanced { .. } => self.rebalanced += 1,
            Diagnostic::LayoutFallback { .. } => self.layout_fallbacks += 1,
            Diagnostic::IconFallback { .. } => self.icon_fallbacks += 1,
        }
    }

    pub fn absorb<'a>(&mut self, diagnostics: impl IntoIterator<Item = &'a Diagnostic>) {
        for diagnostic in diagnostics {
            self.add(diagnostic);
        }
    }

    /// Total slides removed from the deck.
    pub fn dropped(&self) -> usize {
        self.dropped_empty + self.dropped_invalid + self.dropped_sections
    }
}
