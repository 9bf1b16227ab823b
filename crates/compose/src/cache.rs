//! Bounded least-recently-used cache for rasterized icon assets.

use std::collections::{BTreeMap, HashMap};
use std::hash::Hash;

/// Default number of rasterized icons kept per build.
pub const DEFAULT_ICON_CACHE_CAPACITY: usize = 100;

/// Cache key for one rasterization of an icon.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IconKey {
    pub id: String,
    pub size: u32,
    pub color: String,
}

impl IconKey {
    pub fn new(id: impl Into<String>, size: u32, color: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            size,
            color: color.into(),
        }
    }
}

/// LRU cache with a fixed capacity.
///
/// Recency is a monotonic tick per access; `order` maps ticks back to keys so
/// the oldest entry is always the first one in the map.
#[derive(Debug, Clone)]
pub struct LruCache<K, V> {
    capacity: usize,
    tick: u64,
    entries: HashMap<K, (V, u64)>,
    order: BTreeMap<u64, K>,
}

impl<K: Hash + Eq + Clone, V> LruCache<K, V> {
    /// Create a cache holding at most `capacity` entries (minimum 1).
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            tick: 0,
            entries: HashMap::new(),
            order: BTreeMap::new(),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Check for a key without touching its recency.
    pub fn contains(&self, key: &K) -> bool {
        self.entries.contains_key(key)
    }

    fn next_tick(&mut self) -> u64 {
        self.tick += 1;
        self.tick
    }

    /// Mark a present key as most recently used.
    fn touch(&mut self, key: &K) -> bool {
        let tick = self.next_tick();
        let Some((_, last_used)) = self.entries.get_mut(key) else {
            return false;
        };
        let previous = std::mem::replace(last_used, tick);
        self.order.remove(&previous);
        self.order.insert(tick, key.clone());
        true
    }

    /// Look up a key, marking it most recently used.
    pub fn get(&mut self, key: &K) -> Option<&V> {
        if !self.touch(key) {
            return None;
        }
        self.entries.get(key).map(|(value, _)| value)
    }

    /// Insert or replace a value, returning the evicted entry if capacity was exceeded.
    pub fn insert(&mut self, key: K, value: V) -> Option<(K, V)> {
        let tick = self.next_tick();
        if let Some((_, previous)) = self.entries.insert(key.clone(), (value, tick)) {
            self.order.remove(&previous);
        }
        self.order.insert(tick, key);

        if self.entries.len() <= self.capacity {
            return None;
        }

        let (_, oldest) = self.order.pop_first()?;
        let (value, _) = self.entries.remove(&oldest)?;
        Some((oldest, value))
    }

    /// Return the cached value, computing and inserting it on a miss.
    pub fn get_or_insert_with(&mut self, key: K, make: impl FnOnce() -> V) -> &V {
        if !self.touch(&key) {
            // The newest entry is never the one evicted.
            self.insert(key.clone(), make());
        }
        &self.entries[&key].0
    }
}
