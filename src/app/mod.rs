//! Core engine for the Alumia integration
//!
//! This module contains the integration components: the request-level cache,
//! connection lifecycle, cache-first request client, fallback data, sync
//! scheduler, and the facade that composes them.
//!
//! # Examples
//!
//! ```rust,no_run
//! use alumia_sync::app::{AlumiaService, DestinationFilters};
//! use alumia_sync::config::IntegrationConfig;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = IntegrationConfig::load()?;
//! let service = AlumiaService::new(config)?;
//!
//! if service.initialize().await {
//!     println!("Alumia integration connected");
//! }
//!
//! // Never fails: degrades to fallback data when the provider is unavailable
//! let destinations = service.get_destinations(&DestinationFilters::default()).await;
//! println!("{} destinations", destinations.len());
//! # Ok(())
//! # }
//! ```

pub mod cache;
pub mod client;
pub mod connection;
pub mod fallback;
pub mod models;
pub mod scheduler;
pub mod service;

// Re-export main public API
pub use cache::{CacheKey, CacheStore};
pub use client::RequestClient;
pub use connection::{ConnectionManager, ConnectionState};
pub use fallback::FallbackProvider;
pub use models::{
    AnalyticsQuery, AnalyticsReport, Booking, BookingFilters, Destination, DestinationFilters,
    EventFilters, ResourceType, TourismEvent,
};
pub use scheduler::{SyncRun, SyncScheduler, SyncStatus};
pub use service::{AlumiaService, IntegrationStatus};
