//! TTL-bounded response cache.
//!
//! DashMap-backed so concurrent resolutions share it without a global lock.
//! Expiry is checked at read time; an expired entry is removed lazily by the
//! reader that finds it, so no background sweep is needed for correctness.

use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};
use tracewalk_application::ports::{CacheStatsSnapshot, CachedData, TraceCache};
use tracewalk_domain::RecordType;
use tracing::debug;

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
struct CacheKey {
    name: String,
    record_type: RecordType,
}

struct CacheEntry {
    data: CachedData,
    expires_at: Instant,
}

pub struct TtlCache {
    entries: DashMap<CacheKey, CacheEntry>,
    max_entries: usize,
    hits: AtomicU64,
    misses: AtomicU64,
    insertions: AtomicU64,
    evictions: AtomicU64,
}

impl TtlCache {
    pub fn new(max_entries: usize) -> Self {
        Self {
            entries: DashMap::new(),
            max_entries,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            insertions: AtomicU64::new(0),
            evictions: AtomicU64::new(0),
        }
    }

    /// A cache that stores nothing. Every walk runs cold, but the port
    /// contract stays satisfied.
    pub fn disabled() -> Self {
        Self::new(0)
    }

    fn key(name: &str, record_type: RecordType) -> CacheKey {
        CacheKey {
            name: name.to_string(),
            record_type,
        }
    }

    /// Drop an arbitrary entry to stay under capacity.
    fn evict_one(&self) {
        let victim = self.entries.iter().next().map(|entry| entry.key().clone());
        if let Some(key) = victim {
            self.entries.remove(&key);
            self.evictions.fetch_add(1, Ordering::Relaxed);
        }
    }

    #[cfg(test)]
    fn put_with_expiry(
        &self,
        name: &str,
        record_type: RecordType,
        data: CachedData,
        expires_at: Instant,
    ) {
        self.entries
            .insert(Self::key(name, record_type), CacheEntry { data, expires_at });
    }
}

impl TraceCache for TtlCache {
    fn get(&self, name: &str, record_type: RecordType) -> Option<CachedData> {
        let key = Self::key(name, record_type);

        let expired = match self.entries.get(&key) {
            Some(entry) if Instant::now() < entry.expires_at => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                return Some(entry.data.clone());
            }
            Some(_) => true,
            None => false,
        };

        if expired {
            self.entries.remove(&key);
            self.evictions.fetch_add(1, Ordering::Relaxed);
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        None
    }

    fn put(&self, name: &str, record_type: RecordType, data: CachedData, ttl_secs: u32) {
        if ttl_secs == 0 {
            debug!(domain = name, "rejecting cache write with zero TTL");
            return;
        }
        if self.max_entries == 0 {
            return;
        }

        let key = Self::key(name, record_type);
        if !self.entries.contains_key(&key) && self.entries.len() >= self.max_entries {
            self.evict_one();
        }

        self.entries.insert(
            key,
            CacheEntry {
                data,
                expires_at: Instant::now() + Duration::from_secs(u64::from(ttl_secs)),
            },
        );
        self.insertions.fetch_add(1, Ordering::Relaxed);
    }

    fn clear(&self) {
        self.entries.clear();
    }

    fn len(&self) -> usize {
        self.entries.len()
    }

    fn stats(&self) -> CacheStatsSnapshot {
        CacheStatsSnapshot {
            entries: self.entries.len(),
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            insertions: self.insertions.load(Ordering::Relaxed),
            evictions: self.evictions.load(Ordering::Relaxed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracewalk_application::ports::CachedAnswer;
    use tracewalk_domain::RecordSet;

    fn answer(ip: &str) -> CachedData {
        let mut set = RecordSet::new("example.com.", "A", 300);
        set.push(ip);
        CachedData::Answer(CachedAnswer {
            answer: vec![set],
            final_ips: vec![ip.to_string()],
            cname_chain: vec![],
            walk_ms: 42.0,
        })
    }

    fn final_ips(data: &CachedData) -> Vec<String> {
        match data {
            CachedData::Answer(answer) => answer.final_ips.clone(),
            CachedData::Negative { .. } => vec![],
        }
    }

    #[test]
    fn test_put_then_get_round_trips() {
        let cache = TtlCache::new(10);
        cache.put("example.com.", RecordType::A, answer("192.0.2.1"), 300);

        let got = cache.get("example.com.", RecordType::A).unwrap();
        assert_eq!(final_ips(&got), vec!["192.0.2.1"]);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_key_includes_record_type() {
        let cache = TtlCache::new(10);
        cache.put("example.com.", RecordType::A, answer("192.0.2.1"), 300);

        assert!(cache.get("example.com.", RecordType::AAAA).is_none());
        assert!(cache.get("example.com.", RecordType::A).is_some());
    }

    #[test]
    fn test_expired_entry_is_absent() {
        let cache = TtlCache::new(10);
        cache.put_with_expiry(
            "example.com.",
            RecordType::A,
            answer("192.0.2.1"),
            Instant::now() - Duration::from_secs(1),
        );

        assert!(cache.get("example.com.", RecordType::A).is_none());
        // the expired entry was dropped on read
        assert_eq!(cache.len(), 0);
    }

    #[test]
    fn test_zero_ttl_rejected() {
        let cache = TtlCache::new(10);
        cache.put("example.com.", RecordType::A, answer("192.0.2.1"), 0);
        assert_eq!(cache.len(), 0);
    }

    #[test]
    fn test_put_overwrites_existing_key() {
        let cache = TtlCache::new(10);
        cache.put("example.com.", RecordType::A, answer("192.0.2.1"), 300);
        cache.put("example.com.", RecordType::A, answer("192.0.2.2"), 300);

        let got = cache.get("example.com.", RecordType::A).unwrap();
        assert_eq!(final_ips(&got), vec!["192.0.2.2"]);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_capacity_bound_evicts() {
        let cache = TtlCache::new(2);
        cache.put("a.example.", RecordType::A, answer("192.0.2.1"), 300);
        cache.put("b.example.", RecordType::A, answer("192.0.2.2"), 300);
        cache.put("c.example.", RecordType::A, answer("192.0.2.3"), 300);

        assert_eq!(cache.len(), 2);
        assert_eq!(cache.stats().evictions, 1);
    }

    #[test]
    fn test_clear_empties() {
        let cache = TtlCache::new(10);
        cache.put("a.example.", RecordType::A, answer("192.0.2.1"), 300);
        cache.put("b.example.", RecordType::A, answer("192.0.2.2"), 300);
        cache.clear();
        assert_eq!(cache.len(), 0);
    }

    #[test]
    fn test_stats_counters() {
        let cache = TtlCache::new(10);
        cache.put("a.example.", RecordType::A, answer("192.0.2.1"), 300);
        cache.get("a.example.", RecordType::A);
        cache.get("b.example.", RecordType::A);

        let stats = cache.stats();
        assert_eq!(stats.entries, 1);
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.insertions, 1);
    }

    #[test]
    fn test_disabled_cache_stores_nothing() {
        let cache = TtlCache::disabled();
        cache.put("a.example.", RecordType::A, answer("192.0.2.1"), 300);
        assert!(cache.get("a.example.", RecordType::A).is_none());
        assert_eq!(cache.len(), 0);
    }

    #[test]
    fn test_negative_entries_round_trip() {
        let cache = TtlCache::new(10);
        cache.put(
            "missing.example.",
            RecordType::A,
            CachedData::Negative { walk_ms: 12.0 },
            300,
        );

        match cache.get("missing.example.", RecordType::A) {
            Some(CachedData::Negative { walk_ms }) => assert_eq!(walk_ms, 12.0),
            other => panic!("expected negative entry, got {:?}", other),
        }
    }
}
