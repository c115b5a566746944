//! Cache-first request client for the Alumia provider API
//!
//! Performs a single logical fetch against one resource endpoint: consults
//! the cache store first, performs a bounded network call on miss or expiry,
//! updates the cache on success, and raises a typed failure on error. The
//! client never falls back to synthetic data itself; that contract belongs to
//! the facade ("give me fresh or tell me it failed").

use std::sync::Arc;
use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::app::cache::{CacheKey, CacheStore};
use crate::app::connection::ConnectionManager;
use crate::app::models::ResourceType;
use crate::config::IntegrationConfig;
use crate::constants::{http, limits};
use crate::errors::{RequestError, RequestResult};

/// Build the shared HTTP client with bounded timeouts
pub fn build_http_client(config: &IntegrationConfig) -> RequestResult<Client> {
    Client::builder()
        .timeout(config.request_timeout)
        .connect_timeout(http::CONNECT_TIMEOUT)
        .user_agent(http::USER_AGENT)
        .pool_idle_timeout(http::POOL_IDLE_TIMEOUT)
        .pool_max_idle_per_host(http::POOL_MAX_PER_HOST)
        .build()
        .map_err(RequestError::Http)
}

/// Performs cache-first fetches against the provider's resource endpoints
#[derive(Debug)]
pub struct RequestClient {
    config: Arc<IntegrationConfig>,
    http: Client,
    cache: Arc<CacheStore>,
    connection: Arc<ConnectionManager>,
}

impl RequestClient {
    /// Create a request client over shared components
    pub fn new(
        config: Arc<IntegrationConfig>,
        http: Client,
        cache: Arc<CacheStore>,
        connection: Arc<ConnectionManager>,
    ) -> Self {
        Self {
            config,
            http,
            cache,
            connection,
        }
    }

    /// Fetch one resource, serving from cache when a valid entry exists
    ///
    /// # Errors
    ///
    /// - `RequestError::Disabled` when the connection manager reports the
    ///   integration is not connected (no network call is attempted)
    /// - `RequestError::Timeout` when the bounded network call times out
    /// - `RequestError::Upstream` on a non-success provider response
    pub async fn fetch_resource<T: DeserializeOwned>(
        &self,
        resource: ResourceType,
        params: &[(String, String)],
    ) -> RequestResult<T> {
        if !self.connection.is_enabled().await {
            return Err(RequestError::Disabled);
        }

        let path = resource.endpoint_path(&self.config.endpoints);
        let key = CacheKey::new(path, params);

        if let Some(cached) = self.cache.get(&key).await {
            debug!(resource = %resource, key = %key, "serving resource from cache");
            return serde_json::from_value(cached).map_err(RequestError::Decode);
        }

        let value = self.fetch_live(path, params).await?;
        let ttl = resource.ttl(&self.config.ttl);
        self.cache.put(key, value.clone(), ttl).await;

        serde_json::from_value(value).map_err(RequestError::Decode)
    }

    /// Issue the network call with retry on transient provider pushback
    ///
    /// HTTP 429 and 503 are retried with exponential backoff up to
    /// `limits::MAX_RETRIES`; timeouts and other failures surface
    /// immediately so no call path blocks past its bound.
    async fn fetch_live(
        &self,
        path: &str,
        params: &[(String, String)],
    ) -> RequestResult<serde_json::Value> {
        let url = self.config.endpoint_url(path);
        let token = self.config.api_key.as_deref().unwrap_or_default();

        let mut retries = 0;
        loop {
            debug!("Requesting Alumia resource: {}", url);
            let result = self
                .http
                .get(&url)
                .query(params)
                .bearer_auth(token)
                .send()
                .await;

            match result {
                Ok(response) => {
                    let status = response.status();
                    if (status == StatusCode::TOO_MANY_REQUESTS
                        || status == StatusCode::SERVICE_UNAVAILABLE)
                        && retries < limits::MAX_RETRIES
                    {
                        retries += 1;
                        let delay = Duration::from_millis(
                            limits::RETRY_BASE_DELAY_MS * 2_u64.pow(retries),
                        );
                        warn!(
                            "Alumia pushed back (HTTP {}). Backing off for {}ms",
                            status.as_u16(),
                            delay.as_millis()
                        );
                        tokio::time::sleep(delay).await;
                        continue;
                    }

                    if !status.is_success() {
                        let message = response
                            .text()
                            .await
                            .ok()
                            .filter(|body| !body.is_empty())
                            .or_else(|| status.canonical_reason().map(String::from))
                            .unwrap_or_else(|| "unknown upstream error".to_string());
                        return Err(RequestError::Upstream {
                            status: status.as_u16(),
                            message,
                        });
                    }

                    return response.json().await.map_err(RequestError::Http);
                }
                Err(e) if e.is_timeout() => {
                    return Err(RequestError::Timeout {
                        seconds: self.config.request_timeout.as_secs(),
                    });
                }
                Err(e) => return Err(RequestError::Http(e)),
            }
        }
    }

    /// Cache store shared with the sync scheduler
    pub fn cache(&self) -> &Arc<CacheStore> {
        &self.cache
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::models::{DestinationsEnvelope, EventFilters, EventsEnvelope};
    use serde_json::json;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn connected_client(server: &MockServer) -> RequestClient {
        connected_client_with_timeout(server, Duration::from_millis(500)).await
    }

    async fn connected_client_with_timeout(
        server: &MockServer,
        timeout: Duration,
    ) -> RequestClient {
        Mock::given(method("GET"))
            .and(path("/health"))
            .respond_with(ResponseTemplate::new(200))
            .mount(server)
            .await;

        let config = Arc::new(IntegrationConfig {
            api_key: Some("test-key".to_string()),
            base_url: server.uri(),
            request_timeout: timeout,
            ..Default::default()
        });
        let http = build_http_client(&config).unwrap();
        let connection = Arc::new(ConnectionManager::new(Arc::clone(&config), http.clone()));
        assert!(connection.initialize().await);

        RequestClient::new(config, http, Arc::new(CacheStore::new()), connection)
    }

    fn destinations_body() -> serde_json::Value {
        json!({
            "destinations": [{
                "id": "d1",
                "name": "Gruta do Lago Azul",
                "description": "Cave with crystal-clear water",
                "location": {
                    "latitude": -21.12,
                    "longitude": -56.48,
                    "address": "Rodovia MS-178",
                    "city": "Bonito",
                    "state": "MS"
                },
                "category": "ecoturismo",
                "rating": 4.9,
                "price": "R$ 120",
                "images": [],
                "availability": true,
                "accessibility": [],
                "languages": ["pt-BR"],
                "contact": {"phone": "", "email": ""},
                "operatingHours": {"open": "08:00", "close": "17:00", "days": []},
                "capacity": {"max": 200, "current": 45}
            }]
        })
    }

    #[tokio::test]
    async fn test_disabled_client_refuses_without_network() {
        let server = MockServer::start().await;
        let config = Arc::new(IntegrationConfig {
            api_key: Some("test-key".to_string()),
            base_url: server.uri(),
            ..Default::default()
        });
        let http = build_http_client(&config).unwrap();
        let connection = Arc::new(ConnectionManager::new(Arc::clone(&config), http.clone()));
        // Never initialized: state stays Disconnected
        let client = RequestClient::new(config, http, Arc::new(CacheStore::new()), connection);

        let result: RequestResult<DestinationsEnvelope> = client
            .fetch_resource(ResourceType::Destinations, &[])
            .await;
        assert!(matches!(result, Err(RequestError::Disabled)));
        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_second_identical_fetch_hits_cache() {
        let server = MockServer::start().await;
        let client = connected_client(&server).await;

        Mock::given(method("GET"))
            .and(path("/events"))
            .and(query_param("category", "cultura"))
            .and(header("authorization", "Bearer test-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"events": []})))
            .expect(1)
            .mount(&server)
            .await;

        let filters = EventFilters {
            category: Some("cultura".to_string()),
            ..Default::default()
        };
        let first: EventsEnvelope = client
            .fetch_resource(ResourceType::Events, &filters.query_pairs())
            .await
            .unwrap();
        let second: EventsEnvelope = client
            .fetch_resource(ResourceType::Events, &filters.query_pairs())
            .await
            .unwrap();

        assert_eq!(first.events.len(), second.events.len());
        assert_eq!(client.cache().len().await, 1);
    }

    #[tokio::test]
    async fn test_successful_fetch_decodes_payload() {
        let server = MockServer::start().await;
        let client = connected_client(&server).await;

        Mock::given(method("GET"))
            .and(path("/destinations"))
            .respond_with(ResponseTemplate::new(200).set_body_json(destinations_body()))
            .mount(&server)
            .await;

        let envelope: DestinationsEnvelope = client
            .fetch_resource(ResourceType::Destinations, &[])
            .await
            .unwrap();
        assert_eq!(envelope.destinations.len(), 1);
        assert_eq!(envelope.destinations[0].location.city, "Bonito");
    }

    #[tokio::test]
    async fn test_upstream_error_is_typed() {
        let server = MockServer::start().await;
        let client = connected_client(&server).await;

        Mock::given(method("GET"))
            .and(path("/bookings"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let result: RequestResult<serde_json::Value> = client
            .fetch_resource(ResourceType::Bookings, &[])
            .await;
        match result {
            Err(RequestError::Upstream { status, message }) => {
                assert_eq!(status, 500);
                assert_eq!(message, "boom");
            }
            other => panic!("expected upstream error, got {other:?}"),
        }
        // Failures must not populate the cache
        assert_eq!(client.cache().len().await, 0);
    }

    #[tokio::test]
    async fn test_timeout_is_typed_and_bounded() {
        let server = MockServer::start().await;
        let client = connected_client_with_timeout(&server, Duration::from_millis(100)).await;

        Mock::given(method("GET"))
            .and(path("/analytics"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(5)))
            .mount(&server)
            .await;

        let result: RequestResult<serde_json::Value> = client
            .fetch_resource(ResourceType::Analytics, &[])
            .await;
        assert!(matches!(result, Err(RequestError::Timeout { .. })));
    }

    #[tokio::test]
    async fn test_service_unavailable_is_retried() {
        let server = MockServer::start().await;
        let client = connected_client(&server).await;

        Mock::given(method("GET"))
            .and(path("/events"))
            .respond_with(ResponseTemplate::new(503))
            .up_to_n_times(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/events"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"events": []})))
            .mount(&server)
            .await;

        let envelope: EventsEnvelope = client
            .fetch_resource(ResourceType::Events, &[])
            .await
            .unwrap();
        assert!(envelope.events.is_empty());
    }
}
