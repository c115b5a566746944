//! Integration facade for the Alumia provider
//!
//! `AlumiaService` is the single entry point the rest of the application
//! calls. It composes the connection manager, cache store, request client,
//! and sync scheduler, and guarantees that no error from this engine ever
//! reaches a caller: every getter degrades to fallback data with a logged
//! warning. Constructed explicitly and passed by reference to collaborators;
//! there is no global instance.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::app::cache::CacheStore;
use crate::app::client::{build_http_client, RequestClient};
use crate::app::connection::{ConnectionManager, ConnectionState};
use crate::app::fallback::FallbackProvider;
use crate::app::models::{
    AnalyticsQuery, AnalyticsReport, Booking, BookingFilters, BookingsEnvelope, Destination,
    DestinationFilters, DestinationsEnvelope, EventFilters, EventsEnvelope, ResourceType,
    TourismEvent,
};
use crate::app::scheduler::{SyncRun, SyncScheduler};
use crate::config::IntegrationConfig;
use crate::errors::Result;

/// Stable status snapshot for diagnostics and admin surfaces
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntegrationStatus {
    /// True iff the connection state is `Connected`
    pub enabled: bool,
    /// Connection state (Disconnected and Error behave identically for
    /// callers; they are distinguished here for diagnostics only)
    pub state: ConnectionState,
    /// Most recent completed sync cycle, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_sync: Option<SyncRun>,
    /// Number of entries currently held by the cache store
    pub cache_size: usize,
}

/// Facade over the integration cache/sync engine
pub struct AlumiaService {
    config: Arc<IntegrationConfig>,
    connection: Arc<ConnectionManager>,
    cache: Arc<CacheStore>,
    client: Arc<RequestClient>,
    scheduler: Arc<SyncScheduler>,
}

impl AlumiaService {
    /// Build the engine from configuration
    ///
    /// The service starts disconnected; call [`initialize`](Self::initialize)
    /// to probe the provider and enable live fetches.
    pub fn new(config: IntegrationConfig) -> Result<Self> {
        let config = Arc::new(config);
        let http = build_http_client(&config)?;
        let cache = Arc::new(CacheStore::new());
        let connection = Arc::new(ConnectionManager::new(Arc::clone(&config), http.clone()));
        let client = Arc::new(RequestClient::new(
            Arc::clone(&config),
            http,
            Arc::clone(&cache),
            Arc::clone(&connection),
        ));
        let scheduler = Arc::new(SyncScheduler::new(Arc::clone(&client)));

        Ok(Self {
            config,
            connection,
            cache,
            client,
            scheduler,
        })
    }

    /// Validate credentials, probe the provider, and start auto-sync
    ///
    /// Returns true iff the health probe succeeded. On success the recurring
    /// sync timer is started at the configured interval. Re-initialization is
    /// the recovery path from the `Error` state.
    pub async fn initialize(&self) -> bool {
        info!("Initializing Alumia integration");
        let connected = self.connection.initialize().await;
        if connected {
            self.scheduler
                .start_auto_sync(self.config.sync_interval)
                .await;
        }
        connected
    }

    /// Destination catalog, live or fallback
    pub async fn get_destinations(&self, filters: &DestinationFilters) -> Vec<Destination> {
        let result: crate::errors::RequestResult<DestinationsEnvelope> = self
            .client
            .fetch_resource(ResourceType::Destinations, &filters.query_pairs())
            .await;
        match result {
            Ok(envelope) => envelope.destinations,
            Err(e) => {
                warn!("Falling back to static destinations: {}", e);
                FallbackProvider::destinations()
            }
        }
    }

    /// Event listing, live or fallback
    pub async fn get_events(&self, filters: &EventFilters) -> Vec<TourismEvent> {
        let result: crate::errors::RequestResult<EventsEnvelope> = self
            .client
            .fetch_resource(ResourceType::Events, &filters.query_pairs())
            .await;
        match result {
            Ok(envelope) => envelope.events,
            Err(e) => {
                warn!("Falling back to static events: {}", e);
                FallbackProvider::events()
            }
        }
    }

    /// Booking listing, live or fallback
    pub async fn get_bookings(&self, filters: &BookingFilters) -> Vec<Booking> {
        let result: crate::errors::RequestResult<BookingsEnvelope> = self
            .client
            .fetch_resource(ResourceType::Bookings, &filters.query_pairs())
            .await;
        match result {
            Ok(envelope) => envelope.bookings,
            Err(e) => {
                warn!("Falling back to static bookings: {}", e);
                FallbackProvider::bookings()
            }
        }
    }

    /// Analytics report, live or fallback
    pub async fn get_analytics(&self, query: &AnalyticsQuery) -> AnalyticsReport {
        let result: crate::errors::RequestResult<AnalyticsReport> = self
            .client
            .fetch_resource(ResourceType::Analytics, &query.query_pairs())
            .await;
        match result {
            Ok(report) => report,
            Err(e) => {
                warn!("Falling back to static analytics: {}", e);
                FallbackProvider::analytics()
            }
        }
    }

    /// Trigger one sync cycle immediately
    ///
    /// Returns `None` when a cycle is already in flight (the tick is skipped,
    /// not queued).
    pub async fn sync_now(&self) -> Option<SyncRun> {
        self.scheduler.run_once().await
    }

    /// Current status snapshot
    pub async fn status(&self) -> IntegrationStatus {
        let state = self.connection.state().await;
        IntegrationStatus {
            enabled: state == ConnectionState::Connected,
            state,
            last_sync: self.scheduler.last_run().await,
            cache_size: self.cache.len().await,
        }
    }

    /// Remove all cached entries (operator action)
    pub async fn clear_cache(&self) {
        self.cache.clear().await;
    }

    /// Stop the recurring sync timer; an in-flight cycle finishes naturally
    pub async fn stop_auto_sync(&self) {
        self.scheduler.stop_auto_sync().await;
    }
}
