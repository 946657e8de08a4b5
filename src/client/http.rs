//! HTTP client for the band API.

use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

use super::{ClientError, RawReading, Reading, ReadingRequest, ReadingSource};
use crate::config::ApiConfig;

/// POSTs `{headband, run?}` to a fixed endpoint.
#[derive(Clone)]
pub struct BrainwaveClient {
    http: reqwest::Client,
    endpoint: String,
}

impl BrainwaveClient {
    /// Create a client. `timeout: None` means the request may wait forever.
    pub fn new(endpoint: &str, timeout: Option<Duration>) -> Result<Self, ClientError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self { http: builder.build()?, endpoint: endpoint.to_string() })
    }

    pub fn from_config(api: &ApiConfig) -> Result<Self, ClientError> {
        Self::new(&api.endpoint, api.timeout_secs.map(Duration::from_secs))
    }

    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Fetch and decode the raw response body.
    pub async fn fetch_raw(&self, request: ReadingRequest) -> Result<RawReading, ClientError> {
        debug!(endpoint = %self.endpoint, headband = request.headband, run = ?request.run, "Fetching reading");
        let resp = self.http.post(&self.endpoint).json(&request).send().await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(ClientError::ServerError(status));
        }
        let body = resp.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

#[async_trait]
impl ReadingSource for BrainwaveClient {
    async fn fetch(&self, request: ReadingRequest) -> Result<Reading, ClientError> {
        Ok(self.fetch_raw(request).await?.into_reading())
    }

    fn source_name(&self) -> &str {
        "http"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_from_default_config() {
        let client = BrainwaveClient::from_config(&ApiConfig::default()).unwrap();
        assert_eq!(client.endpoint(), crate::config::defaults::API_ENDPOINT);
    }

    /// Base URL of a local port nothing is listening on.
    async fn closed_port_url() -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        format!("http://{addr}/api")
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_http_error() {
        let client = BrainwaveClient::new(&closed_port_url().await, Some(Duration::from_secs(2))).unwrap();
        let err = client.fetch(ReadingRequest { headband: 1, run: None }).await.unwrap_err();
        assert!(matches!(err, ClientError::Http(_)));
    }

    #[tokio::test]
    async fn test_error_status_is_server_error() {
        let app = axum::Router::new().route(
            "/api",
            axum::routing::post(|| async { reqwest::StatusCode::SERVICE_UNAVAILABLE }),
        );
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move { axum::serve(listener, app).await });

        let client = BrainwaveClient::new(&format!("http://{addr}/api"), None).unwrap();
        let err = client.fetch(ReadingRequest { headband: 1, run: None }).await.unwrap_err();
        assert!(matches!(err, ClientError::ServerError(s) if s.as_u16() == 503));
    }
}
