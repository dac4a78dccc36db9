//! Tiered Cache Store Module
//!
//! Core cache engine: a bounded in-memory tier with TTL expiration and LRU
//! eviction, mirrored into a durable tier that is consulted on fast-tier
//! misses and survives restarts.

use std::collections::HashMap;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::warn;

use crate::cache::entry::now_ms;
use crate::cache::{codec, CacheEntry, CacheStats};
use crate::error::StoreError;
use crate::persist::PersistStore;

// == Tiered Cache ==
/// Two-tier key-value cache with per-entry expiry and a hard entry ceiling.
///
/// The fast tier is authoritative for keys it holds; the durable tier is a
/// best-effort mirror. Durable-tier failures never reach callers: lookups
/// degrade to misses and writes to no-ops. All operations are synchronous
/// and run to completion, so no two of them interleave.
pub struct TieredCache<T> {
    /// Fast-tier storage
    entries: HashMap<String, CacheEntry<T>>,
    /// Durable tier, injected as a capability
    persist: Box<dyn PersistStore>,
    /// Maximum number of fast-tier entries
    capacity: usize,
    /// TTL applied when a caller does not supply one
    default_ttl: Duration,
    /// Performance counters
    stats: CacheStats,
}

impl<T> TieredCache<T>
where
    T: Clone + Serialize + DeserializeOwned,
{
    // == Constructor ==
    /// Creates a cache over the given durable tier.
    ///
    /// # Arguments
    /// * `persist` - Durable substrate the cache mirrors into
    /// * `capacity` - Maximum number of fast-tier entries
    /// * `default_ttl` - TTL used when `set` is called without one
    pub fn new(persist: Box<dyn PersistStore>, capacity: usize, default_ttl: Duration) -> Self {
        Self {
            entries: HashMap::new(),
            persist,
            capacity,
            default_ttl,
            stats: CacheStats::new(),
        }
    }

    // == Set ==
    /// Stores a payload under `key` with the given TTL (default if `None`).
    ///
    /// Overwrites unconditionally; if the fast tier already holds `capacity`
    /// entries the LRU victim is evicted first, before the insert. The entry
    /// is also mirrored into the durable tier; a failed mirror write is
    /// logged and swallowed since the fast tier stays authoritative for the
    /// rest of the process lifetime.
    ///
    /// A zero TTL is not rejected: it produces an entry that the first
    /// lookup will observe as expired.
    pub fn set(&mut self, key: &str, data: T, ttl: Option<Duration>) {
        let entry = CacheEntry::new(data, ttl.unwrap_or(self.default_ttl));
        let encoded = codec::encode(&entry);

        // Eviction and fast-tier insert come first: if the victim happens to
        // be this same key, its stale durable copy goes with it before the
        // fresh mirror lands.
        self.insert_bounded(key, entry);

        match encoded {
            Ok(text) => {
                if let Err(e) = self.persist.write(key, &text) {
                    warn!(key, error = %e, "could not mirror entry to the durable tier");
                }
            }
            Err(e) => {
                warn!(key, error = %e, "could not encode entry for the durable tier");
            }
        }
    }

    // == Get ==
    /// Retrieves the payload for `key`, or `None` if nothing usable is
    /// cached.
    ///
    /// Checks the fast tier first; an unexpired hit refreshes the entry's
    /// recency. On a fast-tier miss (or expiry) the durable tier is
    /// consulted: a live durable entry is promoted back into the fast tier,
    /// an expired or undecodable one is dropped. Malformed durable content
    /// is a miss, never an error.
    pub fn get(&mut self, key: &str) -> Option<T> {
        let now = now_ms();

        if let Some(entry) = self.entries.get_mut(key) {
            if !entry.is_expired_at(now) {
                entry.last_accessed = now;
                self.stats.record_hit();
                return Some(entry.data.clone());
            }
            // Expired: drop the fast-tier copy only; the durable copy is
            // re-checked and cleaned up below.
            self.entries.remove(key);
        }

        match self.load_persisted(key) {
            Ok(Some(mut entry)) if !entry.is_expired_at(now) => {
                // Promotion goes through the same bounded insertion path as
                // set, with recency stamped to now.
                entry.last_accessed = now;
                let data = entry.data.clone();
                self.insert_bounded(key, entry);
                self.stats.record_hit();
                Some(data)
            }
            Ok(Some(_)) => {
                self.remove_persisted(key);
                self.stats.record_miss();
                None
            }
            Ok(None) => {
                self.stats.record_miss();
                None
            }
            Err(e) => {
                if matches!(e, StoreError::Malformed(_)) {
                    warn!(key, error = %e, "corrupt durable-tier entry, removing it");
                    self.remove_persisted(key);
                } else {
                    warn!(key, error = %e, "durable tier unreadable, treating as miss");
                }
                self.stats.record_miss();
                None
            }
        }
    }

    // == Clear ==
    /// Removes `key` from both tiers. Absent keys are a no-op.
    pub fn clear(&mut self, key: &str) {
        self.entries.remove(key);
        self.remove_persisted(key);
    }

    // == Clear All ==
    /// Empties the fast tier and wipes the durable tier's entire namespace,
    /// including keys this cache never wrote.
    pub fn clear_all(&mut self) {
        self.entries.clear();
        if let Err(e) = self.persist.clear_namespace() {
            warn!(error = %e, "could not wipe the durable tier");
        }
    }

    // == Stats ==
    /// Snapshot of the fast tier and the hit/miss/eviction counters. The
    /// durable tier is not inspected.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.size = self.entries.len();
        stats.keys = self.entries.keys().cloned().collect();
        stats
    }

    // == Length ==
    /// Current number of fast-tier entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    // == Is Empty ==
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Shared insertion path for `set` and promotion: evict exactly one LRU
    /// victim if the fast tier is at (or somehow beyond) capacity, then
    /// insert with last-write-wins semantics.
    fn insert_bounded(&mut self, key: &str, entry: CacheEntry<T>) {
        if self.entries.len() >= self.capacity {
            self.evict_lru();
        }
        self.entries.insert(key.to_string(), entry);
    }

    /// Scans the fast tier for the entry with the oldest `last_accessed` and
    /// removes it from both tiers. Ties go to the first entry encountered,
    /// which is stable for the duration of the scan.
    fn evict_lru(&mut self) {
        let victim = self
            .entries
            .iter()
            .min_by_key(|(_, entry)| entry.last_accessed)
            .map(|(key, _)| key.clone());

        if let Some(key) = victim {
            self.entries.remove(&key);
            self.remove_persisted(&key);
            self.stats.record_eviction();
        }
    }

    /// Reads and decodes the durable-tier entry for `key`.
    fn load_persisted(&self, key: &str) -> Result<Option<CacheEntry<T>>, StoreError> {
        match self.persist.read(key)? {
            Some(text) => Ok(Some(codec::decode(&text)?)),
            None => Ok(None),
        }
    }

    /// Best-effort removal from the durable tier.
    fn remove_persisted(&mut self, key: &str) {
        if let Err(e) = self.persist.remove(key) {
            warn!(key, error = %e, "could not remove entry from the durable tier");
        }
    }
}
