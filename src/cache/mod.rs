//! Cache Module
//!
//! Two-tier caching with TTL expiration and LRU eviction: a bounded
//! in-memory tier over a durable spillover tier.

pub mod codec;
mod entry;
mod stats;
mod store;


// Re-export public types
pub use entry::CacheEntry;
pub use stats::CacheStats;
pub use store::TieredCache;

use std::time::Duration;

// == Public Constants ==
/// Maximum number of fast-tier entries unless configured otherwise
pub const DEFAULT_CAPACITY: usize = 100;

/// TTL applied when a caller does not specify one
pub const DEFAULT_TTL: Duration = Duration::from_secs(30 * 60);
