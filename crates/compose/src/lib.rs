//! Layout resolution, pagination and icon resolution that turn an authored
//! deck into a renderer-ready slide plan.

pub mod cache;
pub mod composer;
pub mod context;
pub mod diagnostics;
pub mod icon;
pub mod layout;
pub mod paginate;

pub use cache::{IconKey, LruCache};
pub use composer::{Composer, DeckPlan, ResolvedSlide};
pub use context::{CompositionContext, Rasterizer};
pub use diagnostics::{BuildStats, Diagnostic, Outcome};
pub use icon::{IconMatch, IconResolver, MatchStage};
pub use layout::{LayoutIntent, LayoutResolver};
pub use paginate::Paginator;
