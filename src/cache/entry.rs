//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with TTL support.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

// == Cache Entry ==
/// A single cached payload with its expiry and recency metadata.
///
/// Entries are serializable so they can be mirrored into the durable tier
/// as-is; the fast tier holds them deserialized.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheEntry<T> {
    /// The stored payload
    pub data: T,
    /// Absolute expiration instant (Unix milliseconds)
    pub expiration: u64,
    /// Last successful read (Unix milliseconds); drives LRU eviction only
    pub last_accessed: u64,
}

impl<T> CacheEntry<T> {
    // == Constructor ==
    /// Creates an entry expiring `ttl` from now, stamped as just accessed.
    pub fn new(data: T, ttl: Duration) -> Self {
        let now = now_ms();
        Self {
            data,
            expiration: now.saturating_add(ttl.as_millis() as u64),
            last_accessed: now,
        }
    }

    // == Is Expired ==
    /// Checks whether the entry is logically absent.
    ///
    /// Boundary condition: an entry is expired once the current time reaches
    /// its expiration instant, i.e. it is live only while `expiration > now`.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(now_ms())
    }

    /// Expiry check against a caller-supplied instant, so one lookup uses a
    /// single consistent `now` for both tiers.
    pub fn is_expired_at(&self, now: u64) -> bool {
        self.expiration <= now
    }

    // == Time To Live ==
    /// Remaining lifetime in milliseconds; zero once expired.
    pub fn ttl_remaining_ms(&self) -> u64 {
        self.expiration.saturating_sub(now_ms())
    }
}

// == Utility Functions ==
/// Returns current Unix timestamp in milliseconds.
pub fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("Time went backwards")
        .as_millis() as u64
}
