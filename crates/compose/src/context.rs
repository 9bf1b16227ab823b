//! Per-build mutable state.
//!
//! A `CompositionContext` belongs to exactly one build. It is passed by
//! `&mut` into the resolvers, so two builds can only share one by handing it
//! across sequentially; concurrent builds each construct their own.

use deck_core::IconEntry;
use std::collections::HashMap;
use std::sync::Arc;

use crate::cache::{IconKey, LruCache, DEFAULT_ICON_CACHE_CAPACITY};

/// External rasterization step for icon vector content.
pub trait Rasterizer {
    /// Render `entry` at `size` pixels in `color`, returning encoded image bytes.
    fn rasterize(&self, entry: &IconEntry, size: u32, color: &str) -> Vec<u8>;
}

/// Rotation counters and the rasterized-icon cache for one build.
#[derive(Debug)]
pub struct CompositionContext {
    rotation: HashMap<String, usize>,
    icon_cache: LruCache<IconKey, Arc<[u8]>>,
}

impl Default for CompositionContext {
    fn default() -> Self {
        Self::new()
    }
}

impl CompositionContext {
    /// Create a fresh context with the default icon cache capacity.
    pub fn new() -> Self {
        Self::with_cache_capacity(DEFAULT_ICON_CACHE_CAPACITY)
    }

    pub fn with_cache_capacity(capacity: usize) -> Self {
        Self {
            rotation: HashMap::new(),
            icon_cache: LruCache::new(capacity),
        }
    }

    /// Current counter for a rotating layout slot.
    pub fn rotation(&self, slot: &str) -> usize {
        self.rotation.get(slot).copied().unwrap_or(0)
    }

    /// Return the slot's counter and advance it.
    pub fn next_rotation(&mut self, slot: &str) -> usize {
        let counter = self.rotation.entry(slot.to_string()).or_insert(0);
        let current = *counter;
        *counter += 1;
        current
    }

    /// Rasterize an icon, reusing a cached result for the same id, size and color.
    pub fn rasterize<R: Rasterizer + ?Sized>(
        &mut self,
        entry: &IconEntry,
        size: u32,
        color: &str,
        rasterizer: &R,
    ) -> Arc<[u8]> {
        let key = IconKey::new(entry.id.as_str(), size, color);
        Arc::clone(self.icon_cache.get_or_insert_with(key, || {
            log::debug!("Rasterizing icon '{}' at {}px", entry.id, size);
            Arc::from(rasterizer.rasterize(entry, size, color))
        }))
    }

    /// Number of rasterized icons currently cached.
    pub fn cached_icons(&self) -> usize {
        self.icon_cache.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    struct CountingRasterizer {
        calls: Cell<usize>,
    }

    impl Rasterizer for CountingRasterizer {
        fn rasterize(&self, entry: &IconEntry, size: u32, _color: &str) -> Vec<u8> {
            self.calls.set(self.calls.get() + 1);
            format!("{}@{}", entry.id, size).into_bytes()
        }
    }

    #[test]
    fn test_rotation_counters_are_per_slot() {
        let mut ctx = CompositionContext::new();
        assert_eq!(ctx.next_rotation("section"), 0);
        assert_eq!(ctx.next_rotation("section"), 1);
        assert_eq!(ctx.next_rotation("four_box"), 0);
        assert_eq!(ctx.rotation("section"), 2);
        assert_eq!(ctx.rotation("chart"), 0);
    }

    #[test]
    fn test_rasterize_uses_cache() {
        let mut ctx = CompositionContext::new();
        let rasterizer = CountingRasterizer { calls: Cell::new(0) };
        let entry = IconEntry::new("users", "team");

        let first = ctx.rasterize(&entry, 64, "#fff", &rasterizer);
        let second = ctx.rasterize(&entry, 64, "#fff", &rasterizer);
        ctx.rasterize(&entry, 32, "#fff", &rasterizer);

        assert_eq!(&*first, b"users@64");
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(rasterizer.calls.get(), 2);
        assert_eq!(ctx.cached_icons(), 2);
    }

    #[test]
    fn test_cache_is_bounded() {
        let mut ctx = CompositionContext::with_cache_capacity(2);
        let rasterizer = CountingRasterizer { calls: Cell::new(0) };
        let entry = IconEntry::new("users", "team");

        for size in [16, 32, 64] {
            ctx.rasterize(&entry, size, "#fff", &rasterizer);
        }
        assert_eq!(ctx.cached_icons(), 2);

        // 16px was evicted and must be rendered again
        ctx.rasterize(&entry, 16, "#fff", &rasterizer);
        assert_eq!(rasterizer.calls.get(), 4);
    }
}
