//! Metrics Report Task
//!
//! Background task that periodically logs cache occupancy and hit rate.
//!
//! Expiry stays strictly lazy: this task only reads a stats snapshot and
//! never removes entries.

use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::TieredCache;

/// Spawns a background task that periodically logs cache statistics.
///
/// The task runs in an infinite loop, sleeping for the specified interval
/// between reports. It takes only a read lock, so it never delays cache
/// writers for longer than a snapshot.
///
/// # Arguments
/// * `cache` - Shared reference to the cache
/// * `report_interval_secs` - Interval in seconds between reports
///
/// # Returns
/// A JoinHandle for the spawned task, which can be used to abort the task
/// during graceful shutdown.
pub fn spawn_report_task(
    cache: Arc<RwLock<TieredCache<Value>>>,
    report_interval_secs: u64,
) -> JoinHandle<()> {
    let interval = Duration::from_secs(report_interval_secs);

    tokio::spawn(async move {
        info!(
            "Starting metrics report task with interval of {} seconds",
            report_interval_secs
        );

        loop {
            tokio::time::sleep(interval).await;

            let stats = {
                let cache_guard = cache.read().await;
                cache_guard.stats()
            };

            if stats.hits + stats.misses > 0 {
                info!(
                    size = stats.size,
                    hits = stats.hits,
                    misses = stats.misses,
                    evictions = stats.evictions,
                    hit_rate = stats.hit_rate(),
                    "cache metrics"
                );
            } else {
                debug!(size = stats.size, "cache metrics: no lookups yet");
            }
        }
    })
}
