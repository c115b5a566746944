//! Configuration management for the Alumia integration engine
//!
//! Provides unified configuration with zero-config defaults, optional TOML
//! file loading, and environment variable overrides. Configuration is read
//! once when the integration is initialized; changing it requires
//! re-initialization, not live mutation.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

use crate::constants::{endpoints, env as env_vars, http, sync, ttl};
use crate::errors::{ConfigError, ConfigResult};

/// Logical resource endpoint paths on the provider API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EndpointMap {
    /// Health probe path (never cached)
    pub health: String,
    /// Destinations listing path
    pub destinations: String,
    /// Events listing path
    pub events: String,
    /// Bookings listing path
    pub bookings: String,
    /// Analytics path
    pub analytics: String,
}

impl Default for EndpointMap {
    fn default() -> Self {
        Self {
            health: endpoints::HEALTH.to_string(),
            destinations: endpoints::DESTINATIONS.to_string(),
            events: endpoints::EVENTS.to_string(),
            bookings: endpoints::BOOKINGS.to_string(),
            analytics: endpoints::ANALYTICS.to_string(),
        }
    }
}

/// Per-resource cache time-to-live policy
///
/// Kept as a configuration table rather than inline constants so TTL policy
/// can be tuned without touching fetch logic.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TtlPolicy {
    /// TTL for cached destination listings
    #[serde(with = "humantime_serde")]
    pub destinations: Duration,
    /// TTL for cached event listings
    #[serde(with = "humantime_serde")]
    pub events: Duration,
    /// TTL for cached booking listings
    #[serde(with = "humantime_serde")]
    pub bookings: Duration,
    /// TTL for cached analytics reports
    #[serde(with = "humantime_serde")]
    pub analytics: Duration,
}

impl Default for TtlPolicy {
    fn default() -> Self {
        Self {
            destinations: ttl::DESTINATIONS,
            events: ttl::EVENTS,
            bookings: ttl::BOOKINGS,
            analytics: ttl::ANALYTICS,
        }
    }
}

/// Immutable integration configuration
///
/// Created once at initialization and never mutated, only replaced wholesale
/// on re-initialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntegrationConfig {
    /// Credential token for the provider API. `None` means the integration
    /// cannot be enabled.
    pub api_key: Option<String>,
    /// Base address of the provider API
    pub base_url: String,
    /// Logical resource name to endpoint path mapping
    #[serde(default)]
    pub endpoints: EndpointMap,
    /// Interval between automatic sync cycles
    #[serde(with = "humantime_serde")]
    pub sync_interval: Duration,
    /// Per-request timeout for upstream calls
    #[serde(with = "humantime_serde")]
    pub request_timeout: Duration,
    /// Per-resource cache TTL policy
    #[serde(default)]
    pub ttl: TtlPolicy,
}

impl Default for IntegrationConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: endpoints::DEFAULT_BASE_URL.to_string(),
            endpoints: EndpointMap::default(),
            sync_interval: Duration::from_secs(sync::DEFAULT_INTERVAL_MINUTES * 60),
            request_timeout: http::DEFAULT_TIMEOUT,
            ttl: TtlPolicy::default(),
        }
    }
}

impl IntegrationConfig {
    /// Load configuration from all sources: defaults, then the optional TOML
    /// file, then environment variable overrides.
    ///
    /// The file path defaults to `alumia.toml` in the working directory and
    /// can be redirected with `ALUMIA_CONFIG_FILE`. A missing file is not an
    /// error; a malformed one is.
    pub fn load() -> ConfigResult<Self> {
        let path = std::env::var(env_vars::CONFIG_FILE).unwrap_or_else(|_| "alumia.toml".into());
        let mut config = if Path::new(&path).exists() {
            debug!("Loading integration config from {}", path);
            Self::from_file(&path)?
        } else {
            Self::default()
        };
        config.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Apply environment variable overrides on top of the current values
    fn apply_env_overrides(&mut self) -> ConfigResult<()> {
        if let Ok(key) = std::env::var(env_vars::API_KEY) {
            if !key.is_empty() {
                self.api_key = Some(key);
            }
        }
        if let Ok(url) = std::env::var(env_vars::BASE_URL) {
            if !url.is_empty() {
                self.base_url = url;
            }
        }
        if let Ok(minutes) = std::env::var(env_vars::SYNC_INTERVAL_MINUTES) {
            let minutes: u64 =
                minutes
                    .parse()
                    .map_err(|_| ConfigError::InvalidValue {
                        field: env_vars::SYNC_INTERVAL_MINUTES.to_string(),
                        value: minutes.clone(),
                        reason: "expected a positive integer number of minutes".to_string(),
                    })?;
            self.sync_interval = Duration::from_secs(minutes * 60);
        }
        if let Ok(secs) = std::env::var(env_vars::REQUEST_TIMEOUT_SECS) {
            let secs: u64 = secs.parse().map_err(|_| ConfigError::InvalidValue {
                field: env_vars::REQUEST_TIMEOUT_SECS.to_string(),
                value: secs.clone(),
                reason: "expected a positive integer number of seconds".to_string(),
            })?;
            self.request_timeout = Duration::from_secs(secs);
        }
        Ok(())
    }

    /// Validate configuration values that are required for operation
    pub fn validate(&self) -> ConfigResult<()> {
        Url::parse(&self.base_url).map_err(|e| ConfigError::InvalidBaseUrl {
            url: self.base_url.clone(),
            reason: e.to_string(),
        })?;
        if self.sync_interval.is_zero() {
            return Err(ConfigError::InvalidValue {
                field: "sync_interval".to_string(),
                value: "0".to_string(),
                reason: "sync interval must be non-zero".to_string(),
            });
        }
        if self.request_timeout.is_zero() {
            return Err(ConfigError::InvalidValue {
                field: "request_timeout".to_string(),
                value: "0".to_string(),
                reason: "request timeout must be non-zero".to_string(),
            });
        }
        Ok(())
    }

    /// Check whether a credential is present (non-empty)
    pub fn has_credential(&self) -> bool {
        self.api_key.as_deref().is_some_and(|k| !k.is_empty())
    }

    /// Build the full URL for an endpoint path
    ///
    /// The base URL is validated at load time, so this is plain joining with
    /// trailing-slash normalization.
    pub fn endpoint_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = IntegrationConfig::default();
        assert_eq!(config.base_url, endpoints::DEFAULT_BASE_URL);
        assert_eq!(config.sync_interval, Duration::from_secs(15 * 60));
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert!(!config.has_credential());
    }

    #[test]
    fn test_default_ttl_policy() {
        let ttl = TtlPolicy::default();
        assert_eq!(ttl.destinations, Duration::from_secs(30 * 60));
        assert_eq!(ttl.events, Duration::from_secs(15 * 60));
        assert_eq!(ttl.bookings, Duration::from_secs(5 * 60));
        assert_eq!(ttl.analytics, Duration::from_secs(60 * 60));
    }

    #[test]
    fn test_empty_api_key_is_not_a_credential() {
        let config = IntegrationConfig {
            api_key: Some(String::new()),
            ..Default::default()
        };
        assert!(!config.has_credential());
    }

    #[test]
    fn test_endpoint_url_joining() {
        let config = IntegrationConfig {
            base_url: "https://api.example.com/v1/".to_string(),
            ..Default::default()
        };
        let url = config.endpoint_url("/destinations");
        assert_eq!(url, "https://api.example.com/v1/destinations");
    }

    #[test]
    fn test_validate_rejects_bad_base_url() {
        let config = IntegrationConfig {
            base_url: "not a url".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_interval() {
        let config = IntegrationConfig {
            sync_interval: Duration::ZERO,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_from_file_round_trip() {
        let config = IntegrationConfig {
            api_key: Some("secret".to_string()),
            ..Default::default()
        };
        let serialized = toml::to_string(&config).unwrap();

        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(serialized.as_bytes()).unwrap();

        let loaded = IntegrationConfig::from_file(file.path()).unwrap();
        assert_eq!(loaded.api_key.as_deref(), Some("secret"));
        assert_eq!(loaded.sync_interval, config.sync_interval);
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"this is [not valid toml").unwrap();
        assert!(IntegrationConfig::from_file(file.path()).is_err());
    }
}
