//! Pagination: validate a slide and split overflowing content into
//! right-sized continuation slides.
//!
//! Splitting keeps the original title and hints on every part. Trailing
//! singleton chunks are avoided by borrowing an item from the chunk before.

use deck_core::{
    BoxItem, BulletItem, CapacityRules, ContentKind, PayloadDefect, SlideContent, SlideSpec,
    TableData,
};

use crate::diagnostics::{Diagnostic, Outcome};

/// Items in every four-box group.
pub const FOUR_BOX_SIZE: usize = 4;

/// Subtitle marker for agenda continuation slides.
pub const CONTINUED_MARKER: &str = "Continued";

/// Whether a slide gives a preceding section divider something to introduce.
///
/// Only non-empty bullets and paragraphs, tables with data rows, and charts
/// with valid series qualify.
pub fn is_qualifying_content(slide: &SlideSpec) -> bool {
    match &slide.content {
        SlideContent::Bullets { .. } | SlideContent::Paragraph { .. } | SlideContent::Chart(_) => {
            slide.content.validate().is_ok()
        }
        SlideContent::Table(table) => {
            table.validate().is_ok() && !dedupe_header_row(table).rows.is_empty()
        }
        _ => false,
    }
}

/// Drop the first data row when it repeats the header.
fn dedupe_header_row(table: &TableData) -> TableData {
    let mut table = table.clone();
    if table
        .rows
        .first()
        .is_some_and(|row| table.is_header_row(row))
    {
        table.rows.remove(0);
    }
    table
}

/// Move one item into a trailing singleton chunk from the chunk before it,
/// if that chunk has more than `threshold` items. Returns whether it moved.
fn rebalance_tail<T>(chunks: &mut [Vec<T>], threshold: usize) -> bool {
    let [.., previous, last] = chunks else {
        return false;
    };
    if last.len() != 1 || previous.len() <= threshold {
        return false;
    }
    match previous.pop() {
        Some(item) => {
            last.insert(0, item);
            true
        }
        None => false,
    }
}

/// Append a continuation marker to the authored subtitle, if there is one.
fn annotate_subtitle(subtitle: Option<&str>, marker: &str) -> String {
    match subtitle.map(str::trim) {
        Some(subtitle) if !subtitle.is_empty() => format!("{} {}", subtitle, marker),
        _ => marker.to_string(),
    }
}

/// Estimated wrapped line count for `text` at `chars_per_line`.
fn estimate_lines(text: &str, chars_per_line: usize) -> usize {
    let chars = text.trim().chars().count();
    chars.div_ceil(chars_per_line.max(1)).max(1)
}

/// Splits slides according to a set of capacity rules.
#[derive(Debug, Clone, Default)]
pub struct Paginator {
    rules: CapacityRules,
}

impl Paginator {
    pub fn new(rules: CapacityRules) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &CapacityRules {
        &self.rules
    }

    /// Paginate one slide.
    ///
    /// `next` is the slide that follows in authored order; it decides whether
    /// a section divider survives. An empty result means the slide is dropped.
    pub fn paginate(&self, slide: &SlideSpec, next: Option<&SlideSpec>) -> Outcome<Vec<SlideSpec>> {
        if let SlideContent::Section = slide.content {
            return self.filter_section(slide, next);
        }

        if let Err(defect) = slide.content.validate() {
            return drop_invalid(slide, defect);
        }

        match &slide.content {
            SlideContent::Agenda { items } => self.split_agenda(slide, items),
            SlideContent::FourBox { boxes } => self.split_four_box(slide, boxes),
            SlideContent::Table(table) => self.split_table(slide, table),
            SlideContent::Bullets { bullets } => self.split_bullets(slide, bullets),
            SlideContent::Section
            | SlideContent::Paragraph { .. }
            | SlideContent::Chart(_)
            | SlideContent::TwoColumn(_) => Outcome::clean(vec![slide.clone()]),
        }
    }

    fn filter_section(&self, slide: &SlideSpec, next: Option<&SlideSpec>) -> Outcome<Vec<SlideSpec>> {
        if slide.closing || next.is_some_and(is_qualifying_content) {
            return Outcome::clean(vec![slide.clone()]);
        }

        log::debug!("Dropping orphaned section divider '{}'", slide.title);
        Outcome::with(
            Vec::new(),
            Diagnostic::DroppedSection {
                title: slide.title.clone(),
            },
        )
    }

    // ── Agenda ──────────────────────────────────────────────────────────

    fn split_agenda(&self, slide: &SlideSpec, items: &[String]) -> Outcome<Vec<SlideSpec>> {
        let items: Vec<String> = items
            .iter()
            .filter(|i| !i.trim().is_empty())
            .cloned()
            .collect();
        let cap = self.rules.max_agenda_items.max(1);

        if items.len() <= cap + self.rules.agenda_slack {
            return Outcome::clean(vec![slide.with_content(SlideContent::Agenda { items })]);
        }

        let mut chunks: Vec<Vec<String>> = items.chunks(cap).map(<[String]>::to_vec).collect();
        let mut outcome = Outcome::clean(Vec::new());
        if rebalance_tail(&mut chunks, self.rules.rebalance_donor_threshold) {
            outcome.push(self.rebalanced(slide));
        }

        outcome.push(self.split(slide, chunks.len()));
        outcome.value = chunks
            .into_iter()
            .enumerate()
            .map(|(i, items)| {
                let mut part = slide.with_content(SlideContent::Agenda { items });
                if i > 0 {
                    part.subtitle =
                        Some(annotate_subtitle(slide.subtitle.as_deref(), CONTINUED_MARKER));
                }
                part
            })
            .collect();
        outcome
    }

    // ── Four-box ────────────────────────────────────────────────────────

    fn split_four_box(&self, slide: &SlideSpec, boxes: &[BoxItem]) -> Outcome<Vec<SlideSpec>> {
        let authored: Vec<BoxItem> = boxes.iter().filter(|b| !b.is_blank()).cloned().collect();

        let groups: Vec<Vec<BoxItem>> = authored
            .chunks(FOUR_BOX_SIZE)
            .map(|chunk| {
                let mut group = chunk.to_vec();
                group.resize_with(FOUR_BOX_SIZE, BoxItem::placeholder);
                group
            })
            .collect();

        let mut outcome = Outcome::clean(Vec::new());
        if groups.len() > 1 {
            outcome.push(self.split(slide, groups.len()));
        }
        outcome.value = groups
            .into_iter()
            .map(|boxes| slide.with_content(SlideContent::FourBox { boxes }))
            .collect();
        outcome
    }

    // ── Table ───────────────────────────────────────────────────────────

    fn split_table(&self, slide: &SlideSpec, table: &TableData) -> Outcome<Vec<SlideSpec>> {
        let table = dedupe_header_row(table);
        if table.rows.is_empty() {
            return drop_invalid(slide, PayloadDefect::MissingRows);
        }

        let cap = self.rules.max_table_rows_per_slide.max(1);
        if table.rows.len() <= cap {
            return Outcome::clean(vec![slide.with_content(SlideContent::Table(table))]);
        }

        let parts: Vec<&[Vec<String>]> = table.rows.chunks(cap).collect();
        let total = parts.len();

        let slides = parts
            .into_iter()
            .enumerate()
            .map(|(i, rows)| {
                let mut part = slide.with_content(SlideContent::Table(TableData {
                    headers: table.headers.clone(),
                    rows: rows.to_vec(),
                }));
                let marker = format!("(Part {} of {})", i + 1, total);
                part.subtitle = Some(annotate_subtitle(slide.subtitle.as_deref(), &marker));
                part
            })
            .collect();

        Outcome::with(slides, self.split(slide, total))
    }

    // ── Bullets ─────────────────────────────────────────────────────────

    /// Estimated rendered height of one bullet and its counted sub-items.
    pub fn bullet_height(&self, bullet: &BulletItem) -> f32 {
        let rules = &self.rules;
        let main = estimate_lines(&bullet.text, rules.chars_per_line) as f32 * rules.line_height;
        let subs: f32 = bullet
            .sub_items
            .iter()
            .take(rules.max_sub_bullets_per_bullet)
            .map(|s| estimate_lines(s, rules.sub_chars_per_line) as f32 * rules.sub_line_height)
            .sum();
        main + subs
    }

    /// Estimated height of a run of bullets, including inter-bullet spacing.
    pub fn bullets_height(&self, bullets: &[BulletItem]) -> f32 {
        let body: f32 = bullets.iter().map(|b| self.bullet_height(b)).sum();
        let gaps = bullets.len().saturating_sub(1) as f32 * self.rules.bullet_spacing;
        body + gaps
    }

    /// True if a bullet or one of its counted sub-items exceeds its character budget.
    fn bullet_too_long(&self, bullet: &BulletItem) -> bool {
        let main_budget = self.rules.bullet_char_budget();
        let sub_budget = self.rules.sub_bullet_char_budget();

        bullet.text.trim().chars().count() > main_budget
            || bullet
                .sub_items
                .iter()
                .take(self.rules.max_sub_bullets_per_bullet)
                .any(|s| s.trim().chars().count() > sub_budget)
    }

    /// Whether a bullet list overflows one slide.
    pub fn bullets_overflow(&self, bullets: &[BulletItem]) -> bool {
        bullets.len() > self.rules.max_bullets_per_slide
            || bullets.iter().any(|b| self.bullet_too_long(b))
            || self.bullets_height(bullets) > self.rules.max_content_height
    }

    fn split_bullets(&self, slide: &SlideSpec, bullets: &[BulletItem]) -> Outcome<Vec<SlideSpec>> {
        let bullets: Vec<BulletItem> = bullets.iter().filter(|b| !b.is_blank()).cloned().collect();

        if bullets.len() < 2 || !self.bullets_overflow(&bullets) {
            return Outcome::clean(vec![slide.with_content(SlideContent::Bullets { bullets })]);
        }

        let mut chunks = self.chunk_bullets(bullets);
        let mut outcome = Outcome::clean(Vec::new());
        if rebalance_tail(&mut chunks, self.rules.rebalance_donor_threshold) {
            outcome.push(self.rebalanced(slide));
        }

        log::debug!(
            "Split '{}' into {} parts: {:?}",
            slide.title,
            chunks.len(),
            chunks.iter().map(Vec::len).collect::<Vec<_>>()
        );

        outcome.push(self.split(slide, chunks.len()));
        outcome.value = chunks
            .into_iter()
            .enumerate()
            .map(|(i, bullets)| {
                let mut part = slide.with_content(SlideContent::Bullets { bullets });
                if i > 0 {
                    let marker = format!("Part {}", i + 1);
                    part.subtitle = Some(annotate_subtitle(slide.subtitle.as_deref(), &marker));
                }
                part
            })
            .collect();
        outcome
    }

    /// Chunk an overflowing bullet list.
    ///
    /// Lists that fit in two slides are halved. Longer lists are spread
    /// evenly over `ceil(n / cap)` slides, closing a chunk early when the
    /// height budget runs out or when continuing would strand one item.
    fn chunk_bullets(&self, bullets: Vec<BulletItem>) -> Vec<Vec<BulletItem>> {
        let total = bullets.len();
        let cap = self.rules.max_bullets_per_slide.max(1);

        if total <= cap * 2 {
            let mut first = bullets;
            let second = first.split_off(total.div_ceil(2));
            return vec![first, second];
        }

        let slides_needed = total.div_ceil(cap);
        let per_slide = total.div_ceil(slides_needed);

        let mut chunks = Vec::with_capacity(slides_needed);
        let mut current: Vec<BulletItem> = Vec::with_capacity(per_slide);
        let mut height = 0.0_f32;

        for (i, bullet) in bullets.into_iter().enumerate() {
            let bullet_height = self.bullet_height(&bullet);
            let remaining_after = total - i - 1;

            if !current.is_empty() {
                let full = current.len() >= per_slide;
                let too_tall =
                    height + self.rules.bullet_spacing + bullet_height > self.rules.max_content_height;
                let strands_last =
                    per_slide >= 2 && remaining_after == 1 && current.len() + 2 > per_slide;

                if full || too_tall || strands_last {
                    chunks.push(std::mem::take(&mut current));
                    height = 0.0;
                }
            }

            height += if current.is_empty() {
                bullet_height
            } else {
                self.rules.bullet_spacing + bullet_height
            };
            current.push(bullet);
        }

        if !current.is_empty() {
            chunks.push(current);
        }
        chunks
    }

    // ── Diagnostics ─────────────────────────────────────────────────────

    fn split(&self, slide: &SlideSpec, parts: usize) -> Diagnostic {
        Diagnostic::Split {
            title: slide.title.clone(),
            kind: slide.kind(),
            parts,
        }
    }

    fn rebalanced(&self, slide: &SlideSpec) -> Diagnostic {
        Diagnostic::Rebalanced {
            title: slide.title.clone(),
            kind: slide.kind(),
        }
    }
}

fn drop_invalid(slide: &SlideSpec, defect: PayloadDefect) -> Outcome<Vec<SlideSpec>> {
    let title = slide.title.clone();
    let kind: ContentKind = slide.kind();

    let diagnostic = if defect == PayloadDefect::Empty {
        log::debug!("Dropping empty {} slide '{}'", kind, title);
        Diagnostic::DroppedEmpty { title, kind }
    } else {
        log::warn!("Dropping {} slide '{}': {}", kind, title, defect);
        Diagnostic::DroppedInvalid {
            title,
            kind,
            defect,
        }
    };
    Outcome::with(Vec::new(), diagnostic)
}
