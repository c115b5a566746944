//! Periodic synchronization of all resource types
//!
//! Runs a recurring full-refresh cycle (destinations, events, bookings,
//! analytics) through the request client to keep the cache warm. At most one
//! cycle runs at a time: a tick that fires while a cycle is in flight is
//! skipped, not queued. The running flag is released by a drop guard, so an
//! error in any resource fetch can never leave it stuck.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::{watch, Mutex, RwLock};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use crate::app::client::RequestClient;
use crate::app::models::{
    AnalyticsQuery, AnalyticsReport, BookingsEnvelope, DestinationsEnvelope, EventsEnvelope,
    ResourceType,
};
use crate::errors::RequestResult;

/// Outcome of a completed sync cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SyncStatus {
    /// At least one resource refreshed successfully
    Success,
    /// Every resource fetch in the cycle failed
    Failure,
}

/// Record of the most recent sync cycle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncRun {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub status: SyncStatus,
    /// Item counts per refreshed resource (analytics counts as one report)
    pub resource_counts: HashMap<String, usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl SyncRun {
    /// Elapsed wall-clock time of the cycle
    pub fn duration(&self) -> Duration {
        (self.finished_at - self.started_at)
            .to_std()
            .unwrap_or(Duration::ZERO)
    }
}

/// Releases the running flag when the cycle scope exits, on any path
struct RunningGuard<'a> {
    flag: &'a AtomicBool,
}

impl Drop for RunningGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::SeqCst);
    }
}

/// Handle to the spawned auto-sync task
struct AutoSyncHandle {
    shutdown: watch::Sender<bool>,
    task: JoinHandle<()>,
}

/// Cycle state shared between the scheduler and its background task
struct SyncCore {
    client: Arc<RequestClient>,
    running: AtomicBool,
    last_run: RwLock<Option<SyncRun>>,
}

impl SyncCore {
    /// Run one full sync cycle, unless one is already running
    async fn run_once(&self) -> Option<SyncRun> {
        if self.running.swap(true, Ordering::SeqCst) {
            debug!("Sync cycle already running; skipping");
            return None;
        }
        let _guard = RunningGuard {
            flag: &self.running,
        };

        let started_at = Utc::now();
        info!("Starting Alumia sync cycle");

        // The four resources are independent; refresh them concurrently
        let (destinations, events, bookings, analytics) = tokio::join!(
            self.refresh_destinations(),
            self.refresh_events(),
            self.refresh_bookings(),
            self.refresh_analytics(),
        );

        let mut resource_counts = HashMap::new();
        let mut failures = Vec::new();
        for (resource, result) in [
            (ResourceType::Destinations, destinations),
            (ResourceType::Events, events),
            (ResourceType::Bookings, bookings),
            (ResourceType::Analytics, analytics),
        ] {
            match result {
                Ok(count) => {
                    resource_counts.insert(resource.as_str().to_string(), count);
                }
                Err(e) => {
                    warn!("Sync failed for {}: {}", resource, e);
                    failures.push(format!("{resource}: {e}"));
                }
            }
        }

        let finished_at = Utc::now();
        let status = if resource_counts.is_empty() {
            SyncStatus::Failure
        } else {
            SyncStatus::Success
        };
        let run = SyncRun {
            started_at,
            finished_at,
            status,
            resource_counts,
            error_message: if failures.is_empty() {
                None
            } else {
                Some(failures.join("; "))
            },
        };

        match run.status {
            SyncStatus::Success => info!(
                "Sync cycle completed in {}ms ({} resources refreshed)",
                run.duration().as_millis(),
                run.resource_counts.len()
            ),
            SyncStatus::Failure => warn!(
                "Sync cycle failed for all resources after {}ms",
                run.duration().as_millis()
            ),
        }

        *self.last_run.write().await = Some(run.clone());
        Some(run)
    }

    async fn refresh_destinations(&self) -> RequestResult<usize> {
        let envelope: DestinationsEnvelope = self
            .client
            .fetch_resource(ResourceType::Destinations, &[])
            .await?;
        Ok(envelope.destinations.len())
    }

    async fn refresh_events(&self) -> RequestResult<usize> {
        let envelope: EventsEnvelope = self
            .client
            .fetch_resource(ResourceType::Events, &[])
            .await?;
        Ok(envelope.events.len())
    }

    async fn refresh_bookings(&self) -> RequestResult<usize> {
        let envelope: BookingsEnvelope = self
            .client
            .fetch_resource(ResourceType::Bookings, &[])
            .await?;
        Ok(envelope.bookings.len())
    }

    async fn refresh_analytics(&self) -> RequestResult<usize> {
        let _report: AnalyticsReport = self
            .client
            .fetch_resource(
                ResourceType::Analytics,
                &AnalyticsQuery::default().query_pairs(),
            )
            .await?;
        Ok(1)
    }
}

/// Drives recurring full-refresh cycles through the request client
pub struct SyncScheduler {
    core: Arc<SyncCore>,
    auto_sync: Mutex<Option<AutoSyncHandle>>,
}

impl SyncScheduler {
    /// Create a scheduler over a shared request client
    pub fn new(client: Arc<RequestClient>) -> Self {
        Self {
            core: Arc::new(SyncCore {
                client,
                running: AtomicBool::new(false),
                last_run: RwLock::new(None),
            }),
            auto_sync: Mutex::new(None),
        }
    }

    /// Run one full sync cycle, unless one is already running
    ///
    /// Returns `None` when another cycle holds the running flag; the
    /// in-flight cycle's eventual result is not disturbed. Per-resource
    /// failures are caught individually and do not abort the rest of the
    /// cycle; the run is marked `Failure` only if all four resources failed.
    pub async fn run_once(&self) -> Option<SyncRun> {
        self.core.run_once().await
    }

    /// Start the recurring sync timer
    ///
    /// Each tick attempts a cycle; ticks that fire while a cycle is in
    /// flight are skipped, and a failed cycle never kills the loop. Calling
    /// this while auto-sync is already started is a logged no-op.
    pub async fn start_auto_sync(&self, interval: Duration) {
        let mut slot = self.auto_sync.lock().await;
        if slot.is_some() {
            warn!("Auto-sync already started; ignoring");
            return;
        }

        let (shutdown_tx, mut shutdown_rx) = watch::channel(false);
        let core = Arc::clone(&self.core);
        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            // The first tick completes immediately; consume it so the first
            // cycle runs one interval from now, matching timer semantics
            ticker.tick().await;

            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        if core.run_once().await.is_none() {
                            debug!("Auto-sync tick skipped; cycle still running");
                        }
                    }
                    _ = shutdown_rx.changed() => {
                        debug!("Auto-sync task received shutdown signal");
                        break;
                    }
                }
            }
        });

        info!("Auto-sync started (interval {:?})", interval);
        *slot = Some(AutoSyncHandle {
            shutdown: shutdown_tx,
            task,
        });
    }

    /// Cancel the recurring timer; idempotent if not running
    ///
    /// An in-flight cycle is allowed to finish and release the running flag
    /// naturally; only the pending timer is cancelled.
    pub async fn stop_auto_sync(&self) {
        let handle = self.auto_sync.lock().await.take();
        if let Some(handle) = handle {
            let _ = handle.shutdown.send(true);
            if handle.task.await.is_err() {
                warn!("Auto-sync task terminated abnormally");
            }
            info!("Auto-sync stopped");
        }
    }

    /// Whether the auto-sync timer is currently started
    pub async fn auto_sync_started(&self) -> bool {
        self.auto_sync.lock().await.is_some()
    }

    /// Whether a cycle is currently running
    pub fn is_running(&self) -> bool {
        self.core.running.load(Ordering::SeqCst)
    }

    /// The most recent completed sync run, if any
    pub async fn last_run(&self) -> Option<SyncRun> {
        self.core.last_run.read().await.clone()
    }
}
