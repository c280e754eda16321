//! Vacuum Task
//!
//! Detaches the two-phase cleanup pass after a write so the write's caller
//! never waits on it.

use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::cache::CacheEngine;

/// Spawns a vacuum pass on its own task and returns immediately.
///
/// The triggering write completes independently of this task's lifecycle.
/// Failures are logged and swallowed here; the store stays over its limit
/// only until the next write triggers another pass. Several of these tasks
/// may run concurrently, which is safe since both vacuum phases are
/// idempotent deletions.
///
/// # Example
/// ```ignore
/// let handle = spawn_vacuum(engine.clone());
/// // The caller is free to drop the handle; the task keeps running.
/// ```
pub fn spawn_vacuum(engine: CacheEngine) -> JoinHandle<()> {
    tokio::spawn(async move {
        match engine.vacuum().await {
            Ok(report) if report.expired > 0 || report.evicted > 0 => {
                info!(
                    expired = report.expired,
                    evicted = report.evicted,
                    "vacuum removed entries"
                );
            }
            Ok(_) => debug!("vacuum found nothing to remove"),
            Err(err) => warn!(error = %err, "vacuum failed"),
        }
    })
}
