//! Core domain types, catalogs, script normalization and string similarity
//! for slide deck composition.

mod coerce;
pub mod catalog;
pub mod dictionary;
pub mod error;
pub mod normalize;
pub mod rules;
pub mod similarity;
pub mod types;

pub use catalog::{
    IconCatalog, IconEntry, LayoutCatalog, LayoutChoice, LayoutDescriptor, Placeholder,
    GENERIC_ICON, GREETING_ICON,
};
pub use dictionary::{KeywordDictionary, KeywordEntry, ThemeOverrides};
pub use error::{Error, Result};
pub use normalize::{detect_direction, TextDirection, TextNormalizer};
pub use rules::CapacityRules;
pub use types::{
    BoxItem, BulletItem, ChartData, ChartSeries, ContentKind, Deck, PayloadDefect, SlideContent,
    SlideSpec, TableData, TwoColumnData,
};
