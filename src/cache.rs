//! Bounded memo of parsed queries, so a debounced search box retyping the
//! same prefix does not re-scan it.

use crate::query::{parse_query, QueryComponent};
use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use tracing::debug;

/// Keyed by the raw string as typed (before lowercasing) and the wildcard
/// flag, since both change the parse.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CacheKey {
    raw: String,
    enable_wildcard: bool,
}

pub struct QueryCache {
    entries: Mutex<LruCache<CacheKey, Vec<QueryComponent>>>,
    hits: AtomicUsize,
    misses: AtomicUsize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CacheStats {
    pub hits: usize,
    pub misses: usize,
}

impl CacheStats {
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

impl QueryCache {
    /// A capacity of zero is treated as one.
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: Mutex::new(LruCache::new(capacity)),
            hits: AtomicUsize::new(0),
            misses: AtomicUsize::new(0),
        }
    }

    pub fn get_or_parse(&self, raw: &str, enable_wildcard: bool) -> Vec<QueryComponent> {
        let key = CacheKey {
            raw: raw.to_string(),
            enable_wildcard,
        };
        if let Ok(mut entries) = self.entries.lock() {
            if let Some(components) = entries.get(&key) {
                self.hits.fetch_add(1, Ordering::Relaxed);
                return components.clone();
            }
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        let components = parse_query(raw, enable_wildcard);
        debug!(query = %raw, components = components.len(), "parsed search query");
        if let Ok(mut entries) = self.entries.lock() {
            if let Some((evicted, _)) = entries.push(key, components.clone()) {
                if evicted.raw != raw || evicted.enable_wildcard != enable_wildcard {
                    debug!(evicted = %evicted.raw, "query cache evicted entry");
                }
            }
        }
        components
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.lock().map(|entries| entries.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.entries
            .lock()
            .map(|entries| entries.cap().get())
            .unwrap_or(0)
    }

    pub fn clear(&self) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.clear();
        }
    }
}
