//! Connection lifecycle for the Alumia integration
//!
//! Owns the integration credential check and the connection state machine:
//! `Disconnected -> Connected` on a successful health probe during
//! initialization, `-> Error` on probe failure or timeout, and `Error ->
//! Connected` only via explicit re-initialization. Live requests are only
//! performed while the state is `Connected`.

use std::sync::Arc;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::config::IntegrationConfig;

/// Connection state of the integration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionState {
    /// Not initialized, or initialization failed fast (no credential)
    Disconnected,
    /// Health probe succeeded; live requests are allowed
    Connected,
    /// Health probe or initialization failed; recover via re-initialize
    Error,
}

impl std::fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ConnectionState::Disconnected => "disconnected",
            ConnectionState::Connected => "connected",
            ConnectionState::Error => "error",
        };
        f.write_str(s)
    }
}

/// Manages integration credentials and the connection state machine
///
/// Performs a lightweight health probe to transition state. Has no side
/// effects beyond the state transition; never touches the cache.
#[derive(Debug)]
pub struct ConnectionManager {
    config: Arc<IntegrationConfig>,
    http: Client,
    state: RwLock<ConnectionState>,
}

impl ConnectionManager {
    /// Create a manager in the `Disconnected` state
    pub fn new(config: Arc<IntegrationConfig>, http: Client) -> Self {
        Self {
            config,
            http,
            state: RwLock::new(ConnectionState::Disconnected),
        }
    }

    /// Validate the credential and probe the provider's health endpoint
    ///
    /// Fails fast when no credential is configured: the state stays
    /// `Disconnected` and no network call is made. Otherwise the probe is
    /// bounded by the configured request timeout; success transitions to
    /// `Connected`, failure or timeout to `Error`.
    pub async fn initialize(&self) -> bool {
        if !self.config.has_credential() {
            warn!("Alumia API key not configured; integration stays disconnected");
            *self.state.write().await = ConnectionState::Disconnected;
            return false;
        }

        match self.probe_health().await {
            Ok(true) => {
                info!("Alumia health probe succeeded; integration connected");
                *self.state.write().await = ConnectionState::Connected;
                true
            }
            Ok(false) => {
                warn!("Alumia health probe returned a non-success status");
                *self.state.write().await = ConnectionState::Error;
                false
            }
            Err(e) => {
                warn!("Alumia health probe failed: {}", e);
                *self.state.write().await = ConnectionState::Error;
                false
            }
        }
    }

    /// Issue the bounded health probe request
    async fn probe_health(&self) -> Result<bool, reqwest::Error> {
        let url = self.config.endpoint_url(&self.config.endpoints.health);
        debug!("Probing Alumia health endpoint: {}", url);

        let response = self
            .http
            .get(&url)
            .bearer_auth(self.config.api_key.as_deref().unwrap_or_default())
            .send()
            .await?;

        Ok(response.status().is_success())
    }

    /// True iff the state is `Connected`
    pub async fn is_enabled(&self) -> bool {
        *self.state.read().await == ConnectionState::Connected
    }

    /// Current connection state
    pub async fn state(&self) -> ConnectionState {
        *self.state.read().await
    }

    /// Configuration this manager was initialized with
    pub fn config(&self) -> &IntegrationConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::client::build_http_client;
    use std::time::Duration;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_config(base_url: &str, api_key: Option<&str>) -> Arc<IntegrationConfig> {
        Arc::new(IntegrationConfig {
            api_key: api_key.map(|k| k.to_string()),
            base_url: base_url.to_string(),
            request_timeout: Duration::from_millis(500),
            ..Default::default()
        })
    }

    fn manager(config: Arc<IntegrationConfig>) -> ConnectionManager {
        let http = build_http_client(&config).unwrap();
        ConnectionManager::new(config, http)
    }

    #[tokio::test]
    async fn test_missing_credential_fails_fast_without_network() {
        let server = MockServer::start().await;
        // No mock registered: any request would 404, but none must be made
        let mgr = manager(test_config(&server.uri(), None));

        assert!(!mgr.initialize().await);
        assert_eq!(mgr.state().await, ConnectionState::Disconnected);
        assert!(!mgr.is_enabled().await);
        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_empty_credential_counts_as_missing() {
        let server = MockServer::start().await;
        let mgr = manager(test_config(&server.uri(), Some("")));

        assert!(!mgr.initialize().await);
        assert_eq!(mgr.state().await, ConnectionState::Disconnected);
    }

    #[tokio::test]
    async fn test_successful_probe_connects() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/health"))
            .and(header("authorization", "Bearer test-key"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let mgr = manager(test_config(&server.uri(), Some("test-key")));
        assert!(mgr.initialize().await);
        assert_eq!(mgr.state().await, ConnectionState::Connected);
        assert!(mgr.is_enabled().await);
    }

    #[tokio::test]
    async fn test_failed_probe_enters_error_state() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/health"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let mgr = manager(test_config(&server.uri(), Some("test-key")));
        assert!(!mgr.initialize().await);
        assert_eq!(mgr.state().await, ConnectionState::Error);
        assert!(!mgr.is_enabled().await);
    }

    #[tokio::test]
    async fn test_probe_timeout_enters_error_state() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/health"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(2)))
            .mount(&server)
            .await;

        let mgr = manager(test_config(&server.uri(), Some("test-key")));
        assert!(!mgr.initialize().await);
        assert_eq!(mgr.state().await, ConnectionState::Error);
    }

    #[tokio::test]
    async fn test_reinitialize_recovers_from_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/health"))
            .respond_with(ResponseTemplate::new(500))
            .up_to_n_times(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/health"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let mgr = manager(test_config(&server.uri(), Some("test-key")));
        assert!(!mgr.initialize().await);
        assert_eq!(mgr.state().await, ConnectionState::Error);

        assert!(mgr.initialize().await);
        assert_eq!(mgr.state().await, ConnectionState::Connected);
    }
}
