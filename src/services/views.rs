//! View-count aggregation
//!
//! Reads are frequent and view counts are a best-effort metric, so a read
//! never writes the database directly. Pending increments accumulate in an
//! in-memory map; a background task drains the map on a fixed interval and
//! applies the whole batch in one transaction.
//!
//! If a flush transaction fails, that cycle's increments are dropped rather
//! than retried. At-most-once counting is intentional.

use crate::database::Repository;
use crate::error::Result;
use std::collections::HashMap;
use std::mem;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// Buffers view increments and flushes them to storage in batches
#[derive(Clone)]
pub struct ViewAggregator {
    pending: Arc<Mutex<HashMap<String, u64>>>,
    repo: Repository,
}

impl ViewAggregator {
    pub fn new(repo: Repository) -> Self {
        Self {
            pending: Arc::new(Mutex::new(HashMap::new())),
            repo,
        }
    }

    /// Record one view for an identifier.
    ///
    /// Never touches the database and never fails; unknown identifiers are
    /// filtered out at flush time.
    pub async fn record_view(&self, id: &str) {
        let mut pending = self.pending.lock().await;
        *pending.entry(id.to_string()).or_insert(0) += 1;
    }

    /// Drain the pending map and apply it in one batched transaction.
    ///
    /// The map is swapped out under the lock, so increments arriving during
    /// the flush land in the fresh map and are never lost. Returns the
    /// number of distinct identifiers flushed.
    pub async fn flush(&self) -> Result<usize> {
        let drained = {
            let mut pending = self.pending.lock().await;
            mem::take(&mut *pending)
        };

        if drained.is_empty() {
            return Ok(0);
        }

        let count = drained.len();
        self.repo.apply_view_delta(&drained).await?;

        Ok(count)
    }

    /// Spawn the background flush loop.
    ///
    /// Runs until the returned handle is aborted. A failed cycle is logged
    /// and its increments discarded; the loop always reaches the next tick.
    pub fn spawn_flush_loop(&self, interval: Duration) -> JoinHandle<()> {
        let aggregator = self.clone();

        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                ticker.tick().await;

                match aggregator.flush().await {
                    Ok(0) => {}
                    Ok(count) => {
                        tracing::debug!("flushed view counts for {} notes", count);
                    }
                    Err(e) => {
                        tracing::error!("view flush cycle failed: {}", e);
                    }
                }
            }
        })
    }
}
