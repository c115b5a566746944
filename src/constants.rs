//! Application constants for the Alumia integration engine
//!
//! This module centralizes all constants used throughout the crate,
//! organized by functional domain for maintainability and clarity.

use std::time::Duration;

/// Environment variable names for integration configuration
pub mod env {
    /// Environment variable name for the Alumia API key
    pub const API_KEY: &str = "ALUMIA_API_KEY";

    /// Environment variable name for the Alumia base URL
    pub const BASE_URL: &str = "ALUMIA_BASE_URL";

    /// Environment variable name for the sync interval (minutes)
    pub const SYNC_INTERVAL_MINUTES: &str = "ALUMIA_SYNC_INTERVAL_MINUTES";

    /// Environment variable name for the request timeout (seconds)
    pub const REQUEST_TIMEOUT_SECS: &str = "ALUMIA_REQUEST_TIMEOUT_SECS";

    /// Environment variable name for an alternate config file path
    pub const CONFIG_FILE: &str = "ALUMIA_CONFIG_FILE";
}

/// Upstream endpoint paths
pub mod endpoints {
    /// Default base URL for the Alumia provider API
    pub const DEFAULT_BASE_URL: &str = "https://api.alumia.com/v1";

    /// Health probe endpoint (not cached)
    pub const HEALTH: &str = "/health";

    /// Destinations listing endpoint
    pub const DESTINATIONS: &str = "/destinations";

    /// Events listing endpoint
    pub const EVENTS: &str = "/events";

    /// Bookings listing endpoint
    pub const BOOKINGS: &str = "/bookings";

    /// Analytics endpoint
    pub const ANALYTICS: &str = "/analytics";
}

/// Per-resource cache time-to-live policy
pub mod ttl {
    use super::Duration;

    /// Destinations change slowly; cache for 30 minutes
    pub const DESTINATIONS: Duration = Duration::from_secs(30 * 60);

    /// Events cache for 15 minutes
    pub const EVENTS: Duration = Duration::from_secs(15 * 60);

    /// Bookings are the most volatile resource; cache for 5 minutes
    pub const BOOKINGS: Duration = Duration::from_secs(5 * 60);

    /// Analytics aggregates; cache for 60 minutes
    pub const ANALYTICS: Duration = Duration::from_secs(60 * 60);
}

/// Synchronization cycle configuration
pub mod sync {
    /// Default interval between automatic sync cycles (minutes)
    pub const DEFAULT_INTERVAL_MINUTES: u64 = 15;

    /// Default analytics period requested during a sync cycle
    pub const DEFAULT_ANALYTICS_PERIOD: &str = "30d";
}

/// HTTP client configuration constants
pub mod http {
    use super::Duration;

    /// Default user agent for all HTTP requests
    pub const USER_AGENT: &str = concat!("alumia-sync/", env!("CARGO_PKG_VERSION"));

    /// Default per-request timeout
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

    /// Connection establishment timeout
    pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Connection pool idle timeout
    pub const POOL_IDLE_TIMEOUT: Duration = Duration::from_secs(90);

    /// Maximum connections per host in pool
    pub const POOL_MAX_PER_HOST: usize = 8;
}

/// Retry configuration for upstream requests
pub mod limits {
    /// Maximum retry attempts for transient upstream failures
    pub const MAX_RETRIES: u32 = 3;

    /// Base delay for exponential backoff (milliseconds)
    pub const RETRY_BASE_DELAY_MS: u64 = 500;
}

// Re-export commonly used constants for convenience
pub use endpoints::DEFAULT_BASE_URL;
pub use http::USER_AGENT;
pub use limits::{MAX_RETRIES, RETRY_BASE_DELAY_MS};
pub use sync::DEFAULT_INTERVAL_MINUTES;
