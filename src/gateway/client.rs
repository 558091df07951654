//! HTTP client for forwarding gateway requests to the backend.

use std::time::Duration;

use axum::http::{StatusCode, header::CONTENT_TYPE};
use axum::response::{IntoResponse, Response};
use reqwest::Method;
use serde_json::Value;

use crate::api::middleware::SHARER_USER_HEADER;
use crate::config::GatewayConfig;
use crate::error::{AppError, AppResult};

/// Reqwest-backed client bound to the backend base URL.
///
/// reqwest::Client uses Arc internally, so Clone is cheap.
#[derive(Clone)]
pub struct BackendClient {
    http: reqwest::Client,
    base_url: String,
}

impl BackendClient {
    /// Builds a client with connection pooling and the configured timeout.
    pub fn new(config: &GatewayConfig) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout))
            .connect_timeout(Duration::from_secs(10))
            .pool_max_idle_per_host(10)
            .pool_idle_timeout(Duration::from_secs(90))
            .gzip(true)
            .build()
            .map_err(|e| AppError::Internal {
                source: anyhow::Error::from(e),
            })?;
        Ok(Self {
            http,
            base_url: config.backend_url.trim_end_matches('/').to_string(),
        })
    }

    /// Forwards a request to the backend and relays status and body verbatim.
    ///
    /// The user id, when present, travels in the X-Sharer-User-Id header
    /// exactly as the backend expects it.
    pub async fn forward(
        &self,
        method: Method,
        path: &str,
        user_id: Option<i64>,
        query: &[(&str, String)],
        body: Option<&Value>,
    ) -> AppResult<Response> {
        let url = format!("{}{}", self.base_url, path);
        let mut request = self.http.request(method, &url);
        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(id) = user_id {
            request = request.header(SHARER_USER_HEADER, id.to_string());
        }
        if let Some(json) = body {
            request = request.json(json);
        }

        let response = request.send().await?;
        let status = StatusCode::from_u16(response.status().as_u16())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("application/json")
            .to_string();
        let bytes = response.bytes().await?;

        Ok((status, [(CONTENT_TYPE, content_type)], bytes).into_response())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GatewayConfig;

    fn config() -> GatewayConfig {
        GatewayConfig {
            host: "0.0.0.0".to_string(),
            port: 8080,
            backend_url: "http://localhost:9090/".to_string(),
            request_timeout: 30,
        }
    }

    #[test]
    fn test_client_strips_trailing_slash_from_base_url() {
        let client = BackendClient::new(&config()).unwrap();
        assert_eq!(client.base_url, "http://localhost:9090");
    }
}
