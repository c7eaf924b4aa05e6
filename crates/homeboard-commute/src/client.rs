//! Google-Directions-style HTTP client.

use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use crate::types::{CommuteError, RouteOption};

/// Default provider host
pub const DEFAULT_BASE_URL: &str = "https://maps.googleapis.com";

const DIRECTIONS_PATH: &str = "/maps/api/directions/json";
const REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone)]
pub struct DirectionsClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl DirectionsClient {
    pub fn new(api_key: impl Into<String>) -> Result<Self, CommuteError> {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    /// Client against a non-default host (tests, proxies).
    pub fn with_base_url(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Result<Self, CommuteError> {
        Self::build(api_key, base_url, Duration::from_secs(REQUEST_TIMEOUT_SECS))
    }

    #[cfg(test)]
    fn with_timeout(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, CommuteError> {
        Self::build(api_key, base_url, timeout)
    }

    fn build(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, CommuteError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            api_key: api_key.into(),
            base_url: base_url.into(),
        })
    }

    /// Driving routes from `origin` to `destination`, in provider order.
    ///
    /// `departure_time=now` asks the provider for live-traffic timing and
    /// `alternatives=true` for every distinct route it knows. No re-sorting,
    /// no deduplication, no limit on count.
    ///
    /// # Errors
    /// A provider status of `ZERO_RESULTS` is a valid empty result; any other
    /// non-OK status, a non-2xx response, or a payload missing the expected
    /// fields is a typed error. Panel callers use
    /// [`DirectionsClient::routes_or_empty`].
    pub async fn routes(
        &self,
        origin: &str,
        destination: &str,
    ) -> Result<Vec<RouteOption>, CommuteError> {
        let url = format!("{}{}", self.base_url, DIRECTIONS_PATH);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("origin", origin),
                ("destination", destination),
                ("mode", "driving"),
                ("departure_time", "now"),
                ("alternatives", "true"),
                ("key", self.api_key.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(CommuteError::Provider {
                status: status.to_string(),
            });
        }

        let body = response.text().await?;
        let payload: DirectionsPayload =
            serde_json::from_str(&body).map_err(|e| CommuteError::Malformed(e.to_string()))?;

        match payload.status.as_str() {
            "OK" => {}
            // A routable query with no drivable alternatives; not a failure.
            "ZERO_RESULTS" => return Ok(Vec::new()),
            other => {
                let status = match payload.error_message {
                    Some(message) => format!("{other}: {message}"),
                    None => other.to_string(),
                };
                return Err(CommuteError::Provider { status });
            }
        }

        payload
            .routes
            .iter()
            .map(|route| {
                let leg = route
                    .legs
                    .first()
                    .ok_or_else(|| CommuteError::Malformed("route has no legs".to_string()))?;

                Ok(RouteOption {
                    label: route.summary.clone(),
                    duration_text: leg.duration.text.clone(),
                })
            })
            .collect()
    }

    /// [`DirectionsClient::routes`], degraded to an empty list on any failure.
    pub async fn routes_or_empty(&self, origin: &str, destination: &str) -> Vec<RouteOption> {
        match self.routes(origin, destination).await {
            Ok(routes) => routes,
            Err(e) => {
                tracing::warn!(error = %e, "commute refresh failed");
                Vec::new()
            }
        }
    }
}

#[derive(Debug, Deserialize)]
struct DirectionsPayload {
    status: String,
    #[serde(default)]
    routes: Vec<Route>,
    error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Route {
    summary: String,
    legs: Vec<Leg>,
}

#[derive(Debug, Deserialize)]
struct Leg {
    duration: DurationText,
}

#[derive(Debug, Deserialize)]
struct DurationText {
    text: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn route(summary: &str, duration: &str) -> serde_json::Value {
        serde_json::json!({
            "summary": summary,
            "legs": [{"duration": {"text": duration, "value": 1620}}]
        })
    }

    #[tokio::test]
    async fn test_routes_preserve_provider_order() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/maps/api/directions/json"))
            .and(query_param("origin", "1 Main St"))
            .and(query_param("destination", "2 Oak Ave"))
            .and(query_param("mode", "driving"))
            .and(query_param("departure_time", "now"))
            .and(query_param("alternatives", "true"))
            .and(query_param("key", "test-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "status": "OK",
                "routes": [
                    route("I-95 S", "27 mins"),
                    route("US-29 S", "33 mins"),
                    route("MD-97 S", "35 mins"),
                ]
            })))
            .mount(&mock_server)
            .await;

        let client = DirectionsClient::with_base_url("test-key", mock_server.uri()).unwrap();
        let routes = client.routes("1 Main St", "2 Oak Ave").await.unwrap();

        assert_eq!(
            routes,
            vec![
                RouteOption {
                    label: "I-95 S".to_string(),
                    duration_text: "27 mins".to_string(),
                },
                RouteOption {
                    label: "US-29 S".to_string(),
                    duration_text: "33 mins".to_string(),
                },
                RouteOption {
                    label: "MD-97 S".to_string(),
                    duration_text: "35 mins".to_string(),
                },
            ]
        );
    }

    #[tokio::test]
    async fn test_single_route_is_preserved() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/maps/api/directions/json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "status": "OK",
                "routes": [route("I-95 S", "27 mins")]
            })))
            .mount(&mock_server)
            .await;

        let client = DirectionsClient::with_base_url("test-key", mock_server.uri()).unwrap();
        let routes = client.routes("a", "b").await.unwrap();

        assert_eq!(routes.len(), 1);
        assert_eq!(routes[0].label, "I-95 S");
    }

    #[tokio::test]
    async fn test_zero_results_is_a_valid_empty_list() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/maps/api/directions/json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "status": "ZERO_RESULTS",
                "routes": []
            })))
            .mount(&mock_server)
            .await;

        let client = DirectionsClient::with_base_url("test-key", mock_server.uri()).unwrap();
        let routes = client.routes("a", "b").await.unwrap();

        assert!(routes.is_empty());
    }

    #[tokio::test]
    async fn test_denied_request_is_a_provider_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/maps/api/directions/json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "status": "REQUEST_DENIED",
                "error_message": "The provided API key is invalid.",
                "routes": []
            })))
            .mount(&mock_server)
            .await;

        let client = DirectionsClient::with_base_url("bad-key", mock_server.uri()).unwrap();
        let result = client.routes("a", "b").await;

        match result {
            Err(CommuteError::Provider { status }) => {
                assert!(status.contains("REQUEST_DENIED"));
                assert!(status.contains("invalid"));
            }
            other => panic!("expected provider error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_http_error_is_a_provider_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/maps/api/directions/json"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&mock_server)
            .await;

        let client = DirectionsClient::with_base_url("test-key", mock_server.uri()).unwrap();
        let result = client.routes("a", "b").await;

        assert!(matches!(result, Err(CommuteError::Provider { .. })));
    }

    #[tokio::test]
    async fn test_routes_or_empty_on_timeout() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/maps/api/directions/json"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"status": "OK", "routes": []}))
                    .set_delay(Duration::from_millis(500)),
            )
            .mount(&mock_server)
            .await;

        let client = DirectionsClient::with_timeout(
            "test-key",
            mock_server.uri(),
            Duration::from_millis(50),
        )
        .unwrap();

        let routes = client.routes_or_empty("a", "b").await;
        assert!(routes.is_empty());
    }

    #[tokio::test]
    async fn test_routes_or_empty_on_connection_refused() {
        let client = DirectionsClient::with_base_url("test-key", "http://127.0.0.1:1").unwrap();
        let routes = client.routes_or_empty("a", "b").await;
        assert!(routes.is_empty());
    }

    #[tokio::test]
    async fn test_routes_or_empty_on_malformed_route() {
        let mock_server = MockServer::start().await;

        // Second route has no legs; the whole refresh degrades, not just the
        // broken entry.
        Mock::given(method("GET"))
            .and(path("/maps/api/directions/json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "status": "OK",
                "routes": [
                    route("I-95 S", "27 mins"),
                    {"summary": "US-29 S", "legs": []},
                ]
            })))
            .mount(&mock_server)
            .await;

        let client = DirectionsClient::with_base_url("test-key", mock_server.uri()).unwrap();

        assert!(matches!(
            client.routes("a", "b").await,
            Err(CommuteError::Malformed(_))
        ));
        assert!(client.routes_or_empty("a", "b").await.is_empty());
    }
}
