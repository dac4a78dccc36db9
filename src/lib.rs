//! restash - A two-tier response cache
//!
//! Bounded in-memory caching with TTL expiration and LRU eviction, mirrored
//! into a durable tier that survives restarts.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod persist;
pub mod tasks;

pub use api::AppState;
pub use cache::{CacheEntry, CacheStats, TieredCache};
pub use config::Config;
pub use persist::{FileStore, MemoryStore, PersistStore};
pub use tasks::spawn_report_task;
