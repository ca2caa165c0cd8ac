use std::num::NonZeroUsize;

use lru::LruCache;

use crate::backend::RgbaFrame;

const DEFAULT_MEMORY_BUDGET_BYTES: usize = 256 * 1024 * 1024;

/// Identifies a rendered page of one viewer instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RenderedPageKey {
    pub viewer: u64,
    pub page: usize,
}

impl RenderedPageKey {
    pub fn new(viewer: u64, page: usize) -> Self {
        Self { viewer, page }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CacheCounters {
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
}

#[derive(Debug)]
pub struct RenderedPageCache {
    memory_budget_bytes: usize,
    memory_bytes: usize,
    entries: LruCache<RenderedPageKey, RgbaFrame>,
    counters: CacheCounters,
}

impl RenderedPageCache {
    pub fn new(max_entries: usize) -> Self {
        Self::with_budget(max_entries, DEFAULT_MEMORY_BUDGET_BYTES)
    }

    pub fn with_budget(max_entries: usize, memory_budget_bytes: usize) -> Self {
        let capacity = NonZeroUsize::new(max_entries).unwrap_or(NonZeroUsize::MIN);
        Self {
            memory_budget_bytes: memory_budget_bytes.max(1),
            memory_bytes: 0,
            entries: LruCache::new(capacity),
            counters: CacheCounters::default(),
        }
    }

    pub fn get(&mut self, key: &RenderedPageKey) -> Option<&RgbaFrame> {
        if self.entries.contains(key) {
            self.counters.hits += 1;
            return self.entries.get(key);
        }
        self.counters.misses += 1;
        None
    }

    pub fn contains(&self, key: &RenderedPageKey) -> bool {
        self.entries.contains(key)
    }

    /// Inserts a frame, evicting least recently used frames until it fits.
    /// A frame larger than the whole budget is not cached.
    pub fn insert(&mut self, key: RenderedPageKey, frame: RgbaFrame) -> bool {
        let frame_bytes = frame.byte_len();
        if frame_bytes > self.memory_budget_bytes {
            return false;
        }

        if let Some(prev) = self.entries.pop(&key) {
            self.memory_bytes = self.memory_bytes.saturating_sub(prev.byte_len());
        }
        while self.memory_bytes + frame_bytes > self.memory_budget_bytes {
            if !self.evict_lru() {
                break;
            }
        }
        if let Some((_, evicted)) = self.entries.push(key, frame) {
            self.memory_bytes = self.memory_bytes.saturating_sub(evicted.byte_len());
            self.counters.evictions += 1;
        }
        self.memory_bytes += frame_bytes;
        true
    }

    /// Drops every frame rendered for `viewer`.
    pub fn purge_viewer(&mut self, viewer: u64) {
        let stale: Vec<RenderedPageKey> = self
            .entries
            .iter()
            .filter(|(key, _)| key.viewer == viewer)
            .map(|(key, _)| *key)
            .collect();
        for key in stale {
            if let Some(frame) = self.entries.pop(&key) {
                self.memory_bytes = self.memory_bytes.saturating_sub(frame.byte_len());
            }
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.memory_bytes = 0;
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn memory_bytes(&self) -> usize {
        self.memory_bytes
    }

    pub fn counters(&self) -> CacheCounters {
        self.counters
    }

    fn evict_lru(&mut self) -> bool {
        match self.entries.pop_lru() {
            Some((_, frame)) => {
                self.memory_bytes = self.memory_bytes.saturating_sub(frame.byte_len());
                self.counters.evictions += 1;
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::{RenderedPageCache, RenderedPageKey};
    use crate::backend::RgbaFrame;

    fn frame(bytes: usize) -> RgbaFrame {
        RgbaFrame {
            width: 1,
            height: (bytes / 4) as u32,
            pixels: Arc::from(vec![0_u8; bytes]),
        }
    }

    #[test]
    fn lru_entry_is_evicted_when_capacity_is_reached() {
        let mut cache = RenderedPageCache::new(2);
        cache.insert(RenderedPageKey::new(1, 0), frame(16));
        cache.insert(RenderedPageKey::new(1, 1), frame(16));
        assert!(cache.get(&RenderedPageKey::new(1, 0)).is_some());

        cache.insert(RenderedPageKey::new(1, 2), frame(16));
        assert!(cache.contains(&RenderedPageKey::new(1, 0)));
        assert!(!cache.contains(&RenderedPageKey::new(1, 1)));
        assert_eq!(cache.counters().evictions, 1);
        assert_eq!(cache.memory_bytes(), 32);
    }

    #[test]
    fn memory_budget_evicts_until_frame_fits() {
        let mut cache = RenderedPageCache::with_budget(8, 40);
        cache.insert(RenderedPageKey::new(1, 0), frame(16));
        cache.insert(RenderedPageKey::new(1, 1), frame(16));
        cache.insert(RenderedPageKey::new(1, 2), frame(16));
        assert_eq!(cache.len(), 2);
        assert!(cache.memory_bytes() <= 40);

        assert!(!cache.insert(RenderedPageKey::new(1, 3), frame(64)));
    }

    #[test]
    fn purge_viewer_drops_only_that_viewer() {
        let mut cache = RenderedPageCache::new(4);
        cache.insert(RenderedPageKey::new(1, 0), frame(8));
        cache.insert(RenderedPageKey::new(2, 0), frame(8));
        cache.purge_viewer(1);
        assert_eq!(cache.len(), 1);
        assert!(cache.contains(&RenderedPageKey::new(2, 0)));
        assert_eq!(cache.memory_bytes(), 8);
    }
}
