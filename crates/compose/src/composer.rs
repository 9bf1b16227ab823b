//! Full build: paginate every authored slide, then resolve each result's
//! layout and icon.

use deck_core::{
    CapacityRules, ContentKind, Deck, IconCatalog, KeywordDictionary, LayoutCatalog,
    LayoutDescriptor, Result, SlideContent, SlideSpec, ThemeOverrides,
};
use serde::Serialize;

use crate::context::CompositionContext;
use crate::diagnostics::BuildStats;
use crate::icon::IconResolver;
use crate::layout::LayoutResolver;
use crate::paginate::Paginator;

/// A slide ready for the renderer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedSlide {
    /// 1-based position in the final deck.
    pub number: usize,

    /// Layout the renderer should draw this slide with.
    pub layout: LayoutDescriptor,

    /// Icon identifier for the slide, present in the icon catalog.
    pub icon: String,

    /// Per-box icon identifiers for four-box slides, in box order.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub box_icons: Vec<String>,

    /// The paginated slide content.
    #[serde(flatten)]
    pub slide: SlideSpec,
}

/// The output artifact: resolved slides plus build statistics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeckPlan {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    pub slides: Vec<ResolvedSlide>,
    pub stats: BuildStats,
}

impl DeckPlan {
    /// Number of slides handed to the renderer.
    pub fn len(&self) -> usize {
        self.slides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }
}

/// Drives the paginator and both resolvers over a deck.
#[derive(Debug, Clone)]
pub struct Composer<'c> {
    layouts: LayoutResolver<'c>,
    icons: IconResolver<'c>,
    paginator: Paginator,
}

impl<'c> Composer<'c> {
    /// Create a composer over validated catalogs with default capacity rules.
    ///
    /// Fails only when a catalog cannot supply its fallback (default layout
    /// or generic icon), since no build could then be guaranteed to finish.
    pub fn new(
        layouts: &'c LayoutCatalog,
        icons: &'c IconCatalog,
        dictionary: &'c KeywordDictionary,
    ) -> Result<Self> {
        Ok(Self {
            layouts: LayoutResolver::new(layouts)?,
            icons: IconResolver::new(icons, dictionary)?,
            paginator: Paginator::default(),
        })
    }

    pub fn with_rules(mut self, rules: CapacityRules) -> Self {
        self.paginator = Paginator::new(rules);
        self
    }

    pub fn with_theme_overrides(mut self, overrides: &'c ThemeOverrides) -> Self {
        self.icons = self.icons.with_theme_overrides(overrides);
        self
    }

    pub fn rules(&self) -> &CapacityRules {
        self.paginator.rules()
    }

    /// Build a deck plan with a fresh context.
    pub fn build(&self, deck: &Deck) -> DeckPlan {
        let mut ctx = CompositionContext::new();
        self.compose(deck, &mut ctx)
    }

    /// Build a deck plan using the caller's per-build context.
    ///
    /// Slides are processed strictly in authored order; the layout rotation
    /// counters in `ctx` depend on it.
    pub fn compose(&self, deck: &Deck, ctx: &mut CompositionContext) -> DeckPlan {
        let mut stats = BuildStats {
            slides_in: deck.slides.len(),
            ..BuildStats::default()
        };
        let mut slides = Vec::with_capacity(deck.slides.len());

        for (index, authored) in deck.slides.iter().enumerate() {
            let next = deck.slides.get(index + 1);
            let parts = self.paginator.paginate(authored, next).record(&mut stats);

            for mut slide in parts {
                if slide.language.is_none() {
                    slide.language = deck.language.clone();
                }
                let resolved = self.resolve_slide(slide, slides.len() + 1, ctx, &mut stats);
                slides.push(resolved);
            }
        }

        stats.slides_out = slides.len();
        log::debug!(
            "Built '{}': {} slides in, {} out, {} dropped, {} split",
            deck.title,
            stats.slides_in,
            stats.slides_out,
            stats.dropped(),
            stats.split_slides
        );

        DeckPlan {
            title: deck.title.clone(),
            subtitle: deck.subtitle.clone(),
            author: deck.author.clone(),
            language: deck.language.clone(),
            slides,
            stats,
        }
    }

    fn resolve_slide(
        &self,
        slide: SlideSpec,
        number: usize,
        ctx: &mut CompositionContext,
        stats: &mut BuildStats,
    ) -> ResolvedSlide {
        let kind: ContentKind = slide.kind();
        let language = slide.language.as_deref();

        let layout = self
            .layouts
            .resolve(kind, slide.layout_hint.as_deref(), ctx)
            .record(stats)
            .clone();

        let icon = self
            .icons
            .resolve(
                slide.icon_hint.as_deref(),
                &slide.title,
                &slide.content.body_text(),
                language,
            )
            .record(stats)
            .id
            .to_string();

        let box_icons = match &slide.content {
            SlideContent::FourBox { boxes } => boxes
                .iter()
                .map(|item| {
                    if item.placeholder {
                        return self.icons.generic().to_string();
                    }
                    self.icons
                        .resolve(item.icon_hint.as_deref(), &item.title, &item.text, language)
                        .record(stats)
                        .id
                        .to_string()
                })
                .collect(),
            _ => Vec::new(),
        };

        ResolvedSlide {
            number,
            layout,
            icon,
            box_icons,
            slide,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use deck_core::{BoxItem, BulletItem, IconEntry};

    fn layouts() -> LayoutCatalog {
        LayoutCatalog::new("bullets")
            .with_layout(LayoutDescriptor::new("bullets"))
            .with_layout(LayoutDescriptor::new("four_box"))
            .with_layout(LayoutDescriptor::new("section_a"))
            .with_layout(LayoutDescriptor::new("section_b"))
            .with_slot("bullets", "bullets")
            .with_slot("four_box", "four_box")
            .with_rotation("section", ["section_a", "section_b"])
    }

    fn icons() -> IconCatalog {
        IconCatalog::new(vec![
            IconEntry::new("star", ""),
            IconEntry::new("users", "team"),
            IconEntry::new("shield", "security"),
        ])
    }

    #[test]
    fn test_compose_numbers_and_inherits_language() {
        let layouts = layouts();
        let icons = icons();
        let dictionary = KeywordDictionary::builtin();
        let composer = Composer::new(&layouts, &icons, &dictionary).unwrap();

        let mut deck = Deck::new("Plan");
        deck.language = Some("en".into());
        deck.add_slide(SlideSpec::new("Intro", SlideContent::Section));
        deck.add_slide(SlideSpec::new(
            "Our team",
            SlideContent::Bullets {
                bullets: (1..=6).map(|i| BulletItem::new(format!("Member {i}"))).collect(),
            },
        ));

        let plan = composer.build(&deck);
        assert_eq!(plan.len(), 3);
        assert_eq!(
            plan.slides.iter().map(|s| s.number).collect::<Vec<_>>(),
            vec![1, 2, 3]
        );
        assert_eq!(plan.slides[0].layout.key, "section_a");
        assert_eq!(plan.slides[1].icon, "users");
        assert_eq!(plan.slides[2].slide.language.as_deref(), Some("en"));
        assert_eq!(plan.stats.slides_in, 2);
        assert_eq!(plan.stats.slides_out, 3);
        assert_eq!(plan.stats.split_slides, 1);
    }

    #[test]
    fn test_box_icons() {
        let layouts = layouts();
        let icons = icons();
        let dictionary = KeywordDictionary::new();
        let composer = Composer::new(&layouts, &icons, &dictionary).unwrap();

        let mut deck = Deck::new("Pillars");
        deck.add_slide(SlideSpec::new(
            "Pillars",
            SlideContent::FourBox {
                boxes: vec![
                    BoxItem {
                        icon_hint: Some("shield".into()),
                        ..BoxItem::new("Safety", "")
                    },
                    BoxItem::new("Team", "People first"),
                ],
            },
        ));

        let plan = composer.build(&deck);
        assert_eq!(plan.slides[0].box_icons, vec!["shield", "users", "star", "star"]);
    }

    #[test]
    fn test_context_carries_rotation_across_builds() {
        let layouts = layouts();
        let icons = icons();
        let dictionary = KeywordDictionary::new();
        let composer = Composer::new(&layouts, &icons, &dictionary).unwrap();

        let mut deck = Deck::new("Sections");
        deck.add_slide(SlideSpec::new("Closing", SlideContent::Section).as_closing());

        let mut ctx = CompositionContext::new();
        let first = composer.compose(&deck, &mut ctx);
        let second = composer.compose(&deck, &mut ctx);
        assert_eq!(first.slides[0].layout.key, "section_a");
        assert_eq!(second.slides[0].layout.key, "section_b");

        // A fresh build starts over
        assert_eq!(composer.build(&deck).slides[0].layout.key, "section_a");
    }

    #[test]
    fn test_missing_catalog_defaults_are_fatal() {
        let icons = icons();
        let dictionary = KeywordDictionary::new();
        let layouts = LayoutCatalog::default();
        assert!(Composer::new(&layouts, &icons, &dictionary).is_err());
    }
}
