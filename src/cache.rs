//! Bounded, time-expiring cache of parsed paste records.

use crate::constants::{PASTE_CACHE_CAPACITY, PASTE_CACHE_TTL};
use crate::models::paste::PasteRecord;
use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::{Mutex, MutexGuard};
use std::time::{Duration, Instant};

struct CacheSlot {
    record: PasteRecord,
    raw: String,
    last_access: Instant,
}

/// LRU cache in front of the [`PasteStore`](crate::store::PasteStore).
///
/// Entries expire a fixed interval after their *last access*, not their
/// insertion: every hit refreshes the clock. Dropping or clearing the cache
/// is always safe; the store remains the source of truth.
pub struct PasteCache {
    entries: Mutex<LruCache<String, CacheSlot>>,
    ttl: Duration,
}

impl Default for PasteCache {
    fn default() -> Self {
        Self::new(PASTE_CACHE_CAPACITY, PASTE_CACHE_TTL)
    }
}

impl PasteCache {
    /// Create a cache holding at most `capacity` entries that stay fresh
    /// for `ttl` after their last access.
    pub fn new(capacity: usize, ttl: Duration) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: Mutex::new(LruCache::new(capacity)),
            ttl,
        }
    }

    fn lock(&self) -> MutexGuard<'_, LruCache<String, CacheSlot>> {
        match self.entries.lock() {
            Ok(guard) => guard,
            // A poisoned cache only ever holds rederivable data.
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    /// Look up a cached record, refreshing its expiry on a hit.
    ///
    /// # Returns
    /// The parsed record and its raw serialized form, or `None` on a miss
    /// or an expired entry.
    pub fn get(&self, id: &str) -> Option<(PasteRecord, String)> {
        let mut entries = self.lock();
        if let Some(slot) = entries.peek(id) {
            if slot.last_access.elapsed() >= self.ttl {
                entries.pop(id);
                tracing::debug!(paste_id = %id, "evicting expired cache entry");
                return None;
            }
        }
        let slot = entries.get_mut(id)?;
        slot.last_access = Instant::now();
        Some((slot.record.clone(), slot.raw.clone()))
    }

    /// Insert a record, evicting the least-recently-used entry on overflow.
    pub fn put(&self, id: &str, record: PasteRecord, raw: String) {
        self.lock().put(
            id.to_string(),
            CacheSlot {
                record,
                raw,
                last_access: Instant::now(),
            },
        );
    }

    /// Number of live entries (expired-but-unswept entries included).
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn record(id: &str) -> PasteRecord {
        let mut files = HashMap::new();
        files.insert("a".to_string(), "content".to_string());
        let mut record =
            PasteRecord::new("kvantum".to_string(), files, vec!["a".to_string()]);
        record.id = id.to_string();
        record
    }

    #[test]
    fn miss_then_hit() {
        let cache = PasteCache::default();
        assert!(cache.get("aa").is_none());
        cache.put("aa", record("aa"), "{}".to_string());
        let (hit, raw) = cache.get("aa").unwrap();
        assert_eq!(hit.id, "aa");
        assert_eq!(raw, "{}");
    }

    #[test]
    fn overflow_evicts_least_recently_used() {
        let cache = PasteCache::new(2, PASTE_CACHE_TTL);
        cache.put("aa", record("aa"), String::new());
        cache.put("bb", record("bb"), String::new());
        // Touch "aa" so "bb" is the eviction candidate.
        assert!(cache.get("aa").is_some());
        cache.put("cc", record("cc"), String::new());
        assert_eq!(cache.len(), 2);
        assert!(cache.get("aa").is_some());
        assert!(cache.get("bb").is_none());
        assert!(cache.get("cc").is_some());
    }

    #[test]
    fn entries_expire_after_ttl() {
        let cache = PasteCache::new(5, Duration::from_millis(20));
        cache.put("aa", record("aa"), String::new());
        std::thread::sleep(Duration::from_millis(40));
        assert!(cache.get("aa").is_none());
    }

    #[test]
    fn access_refreshes_expiry() {
        let cache = PasteCache::new(5, Duration::from_millis(100));
        cache.put("aa", record("aa"), String::new());
        std::thread::sleep(Duration::from_millis(60));
        // Refresh; without it the entry would expire 40ms from now.
        assert!(cache.get("aa").is_some());
        std::thread::sleep(Duration::from_millis(60));
        assert!(cache.get("aa").is_some());
    }
}
