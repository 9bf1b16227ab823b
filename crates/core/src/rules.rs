//! Capacity rules for pagination.
//!
//! The height constants are calibrated against one renderer's body font
//! (roughly 18pt on a 16:9 slide) and are estimates, not measurements.
//! A different renderer needs its own values.

use serde::{Deserialize, Serialize};

/// Limits a slide's content must respect before pagination splits it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CapacityRules {
    /// Maximum main bullets per slide.
    pub max_bullets_per_slide: usize,
    /// Sub-items per bullet that count toward size estimates.
    pub max_sub_bullets_per_bullet: usize,
    /// Maximum data rows per table slide (header excluded).
    pub max_table_rows_per_slide: usize,
    /// Maximum agenda items per slide.
    pub max_agenda_items: usize,
    /// Extra agenda items tolerated before splitting.
    pub agenda_slack: usize,
    /// Characters that fit on one main-bullet line.
    pub chars_per_line: usize,
    /// Characters that fit on one sub-bullet line.
    pub sub_chars_per_line: usize,
    /// Lines a single bullet may wrap to before it overflows.
    pub max_lines_per_bullet: usize,
    /// Height of one main-bullet line, in points.
    pub line_height: f32,
    /// Height of one sub-bullet line, in points.
    pub sub_line_height: f32,
    /// Vertical gap between bullets, in points.
    pub bullet_spacing: f32,
    /// Usable height of the content box, in points.
    pub max_content_height: f32,
    /// A chunk only donates to a trailing singleton if it has more items than this.
    pub rebalance_donor_threshold: usize,
}

impl Default for CapacityRules {
    fn default() -> Self {
        Self {
            max_bullets_per_slide: 4,
            max_sub_bullets_per_bullet: 3,
            max_table_rows_per_slide: 3,
            max_agenda_items: 5,
            agenda_slack: 0,
            chars_per_line: 55,
            sub_chars_per_line: 45,
            max_lines_per_bullet: 2,
            line_height: 24.0,
            sub_line_height: 20.0,
            bullet_spacing: 12.0,
            max_content_height: 330.0,
            rebalance_donor_threshold: 2,
        }
    }
}

impl CapacityRules {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_bullets(mut self, max: usize) -> Self {
        self.max_bullets_per_slide = max.max(1);
        self
    }

    pub fn with_max_table_rows(mut self, max: usize) -> Self {
        self.max_table_rows_per_slide = max.max(1);
        self
    }

    pub fn with_max_agenda_items(mut self, max: usize) -> Self {
        self.max_agenda_items = max.max(1);
        self
    }

    pub fn with_agenda_slack(mut self, slack: usize) -> Self {
        self.agenda_slack = slack;
        self
    }

    pub fn with_max_content_height(mut self, height: f32) -> Self {
        self.max_content_height = height;
        self
    }

    /// Character budget for a main bullet before it overflows.
    pub fn bullet_char_budget(&self) -> usize {
        self.chars_per_line * self.max_lines_per_bullet
    }

    /// Character budget for a sub-bullet before it overflows.
    pub fn sub_bullet_char_budget(&self) -> usize {
        self.sub_chars_per_line * self.max_lines_per_bullet
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let rules = CapacityRules::default();
        assert_eq!(rules.max_bullets_per_slide, 4);
        assert_eq!(rules.max_table_rows_per_slide, 3);
        assert_eq!(rules.max_agenda_items, 5);
        assert_eq!(rules.bullet_char_budget(), 110);
        assert_eq!(rules.sub_bullet_char_budget(), 90);
        assert_eq!(rules.rebalance_donor_threshold, 2);
    }

    #[test]
    fn test_caps_never_zero() {
        let rules = CapacityRules::new().with_max_bullets(0).with_max_table_rows(0);
        assert_eq!(rules.max_bullets_per_slide, 1);
        assert_eq!(rules.max_table_rows_per_slide, 1);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let rules: CapacityRules =
            serde_json::from_str(r#"{"max_bullets_per_slide": 6}"#).unwrap();
        assert_eq!(rules.max_bullets_per_slide, 6);
        assert_eq!(rules.max_agenda_items, 5);
    }
}
