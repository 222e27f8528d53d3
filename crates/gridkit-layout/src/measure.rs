//! Item height measurement.
//!
//! Natural item heights come from the host, which owns the rendering surface. The
//! engine only sees the [`MeasureItem`] capability.
//!
//! # Caching
//!
//! Measuring can be expensive and, for a resize, heights do not change.
//! [`HeightCache`] keeps measured heights per item id with epoch-based
//! invalidation: the host bumps the epoch when item content changes and every
//! entry from an older epoch is treated as stale.
//!
//! ```
//! use gridkit_layout::{place_and_measure, DashboardItem, HeightCache};
//!
//! let items = [DashboardItem::new(0), DashboardItem::new(1)];
//! let mut cache = HeightCache::new();
//!
//! let (_, rows) = place_and_measure(&items, 2, cache.measure_with(|_: &DashboardItem| 80.0));
//! assert_eq!(rows.heights(), &[80.0]);
//!
//! // Same epoch, the closure is not consulted again.
//! let (_, rows) = place_and_measure(&items, 1, cache.measure_with(|_: &DashboardItem| 10.0));
//! assert_eq!(rows.heights(), &[80.0, 80.0]);
//! ```

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::placement::{ItemId, LayoutItem};

/// Measures the natural height of an item in pixels.
pub trait MeasureItem<I: ?Sized> {
    fn measure(&mut self, item: &I) -> f32;
}

impl<I: ?Sized, F> MeasureItem<I> for F
where
    F: FnMut(&I) -> f32,
{
    fn measure(&mut self, item: &I) -> f32 {
        self(item)
    }
}

/// Every item has the same height.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedHeight(pub f32);

impl<I: ?Sized> MeasureItem<I> for FixedHeight {
    fn measure(&mut self, _item: &I) -> f32 {
        self.0
    }
}

/// Negative or non-finite heights count as zero.
pub(crate) fn sanitize_height(height: f32) -> f32 {
    if height.is_finite() && height > 0.0 {
        height
    } else {
        0.0
    }
}

/// Cache statistics for debugging and profiling.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheStats {
    pub lookups: usize,
    pub hits: usize,
    pub stores: usize,
}

impl CacheStats {
    /// Fraction of lookups answered from the cache.
    pub fn hit_rate(&self) -> f64 {
        if self.lookups == 0 {
            0.0
        } else {
            self.hits as f64 / self.lookups as f64
        }
    }
}

/// Measured heights keyed by item id, tagged with the epoch they were measured in.
#[derive(Debug, Clone)]
pub struct HeightCache {
    epoch: u64,
    entries: HashMap<ItemId, (u64, f32)>,
    stats: CacheStats,
}

impl Default for HeightCache {
    fn default() -> Self {
        Self::new()
    }
}

impl HeightCache {
    pub fn new() -> Self {
        Self {
            epoch: 1,
            entries: HashMap::new(),
            stats: CacheStats::default(),
        }
    }

    /// Current epoch.
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Switch to an explicit epoch. Entries tagged with another epoch are stale until
    /// that epoch is used again or they are re-measured.
    pub fn use_epoch(&mut self, epoch: u64) {
        self.epoch = epoch.max(1);
    }

    /// Start a new epoch; every existing entry becomes stale.
    pub fn bump_epoch(&mut self) -> u64 {
        self.use_epoch(self.epoch.wrapping_add(1));
        self.epoch
    }

    /// Cached height of an item, if measured in the current epoch.
    pub fn lookup(&mut self, item: ItemId) -> Option<f32> {
        self.stats.lookups += 1;
        let epoch = self.epoch;
        let hit = self
            .entries
            .get(&item)
            .and_then(|(entry_epoch, height)| (*entry_epoch == epoch).then_some(*height));
        if hit.is_some() {
            self.stats.hits += 1;
        }
        hit
    }

    /// Store a measured height for the current epoch.
    pub fn store(&mut self, item: ItemId, height: f32) {
        self.stats.stores += 1;
        self.entries.insert(item, (self.epoch, height));
    }

    /// Drop the entry of a single item (e.g. after its content changed).
    pub fn invalidate(&mut self, item: ItemId) {
        self.entries.remove(&item);
    }

    /// Drop entries that were not measured in the current epoch.
    pub fn prune_stale(&mut self) -> usize {
        let epoch = self.epoch;
        let before = self.entries.len();
        self.entries.retain(|_, (entry_epoch, _)| *entry_epoch == epoch);
        before - self.entries.len()
    }

    /// Number of entries, stale ones included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn stats(&self) -> CacheStats {
        self.stats
    }

    pub fn reset_stats(&mut self) {
        self.stats = CacheStats::default();
    }

    /// Wrap a measurer so that it is only consulted on cache misses.
    pub fn measure_with<M>(&mut self, inner: M) -> CachedMeasure<'_, M> {
        CachedMeasure { cache: self, inner }
    }
}

/// Measurer backed by a [`HeightCache`].
#[derive(Debug)]
pub struct CachedMeasure<'a, M> {
    cache: &'a mut HeightCache,
    inner: M,
}

impl<I, M> MeasureItem<I> for CachedMeasure<'_, M>
where
    I: LayoutItem,
    M: MeasureItem<I>,
{
    fn measure(&mut self, item: &I) -> f32 {
        let id = item.item_id();
        if let Some(height) = self.cache.lookup(id) {
            trace!(item = %id, height, "Height cache hit");
            return height;
        }

        let height = self.inner.measure(item);
        self.cache.store(id, height);
        height
    }
}
