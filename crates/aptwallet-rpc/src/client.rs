//! Base REST client.
//!
//! Provides `get()` / `get_optional()` / `post()` against a base URL, with an
//! optional API key, configurable timeout, and retry with exponential backoff.

use crate::error::RpcError;
use log::{debug, warn};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;

/// Configuration for a REST client.
#[derive(Debug, Clone)]
pub struct RpcConfig {
    /// Base URL (e.g., `http://127.0.0.1:8080/v1`).
    pub url: String,
    /// Optional API key sent as a bearer token.
    pub api_key: Option<String>,
    /// Request timeout.
    pub timeout: Duration,
    /// Number of retry attempts on transient failure.
    pub retries: u32,
    /// Initial delay between retries (doubles each attempt).
    pub retry_delay: Duration,
}

impl Default for RpcConfig {
    fn default() -> Self {
        Self {
            url: "http://127.0.0.1:8080/v1".to_string(),
            api_key: None,
            timeout: Duration::from_secs(30),
            retries: 2,
            retry_delay: Duration::from_millis(500),
        }
    }
}

/// Async JSON-over-HTTP client.
#[derive(Debug, Clone)]
pub struct RestClient {
    client: reqwest::Client,
    config: RpcConfig,
}

impl RestClient {
    /// Create a new client with the given base URL.
    pub fn new(url: &str) -> Result<Self, RpcError> {
        Self::with_config(RpcConfig {
            url: url.to_string(),
            ..Default::default()
        })
    }

    /// Create a new client with full configuration.
    pub fn with_config(mut config: RpcConfig) -> Result<Self, RpcError> {
        config.url = config.url.trim_end_matches('/').to_string();
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .pool_max_idle_per_host(4)
            .build()
            .map_err(|e| RpcError::Http {
                url: config.url.clone(),
                source: e,
            })?;

        Ok(Self { client, config })
    }

    /// Get the configured base URL.
    pub fn url(&self) -> &str {
        &self.config.url
    }

    pub fn config(&self) -> &RpcConfig {
        &self.config
    }

    fn build_headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        if let Some(key) = &self.config.api_key {
            if let Ok(value) = HeaderValue::from_str(&format!("Bearer {}", key)) {
                headers.insert(AUTHORIZATION, value);
            }
        }
        headers
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.config.url, path)
    }

    /// GET `path` and decode the JSON response.
    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, RpcError> {
        let val = self.send(Method::GET, path, query, None).await?;
        Ok(serde_json::from_value(val)?)
    }

    /// GET `path`, mapping HTTP 404 to `None`.
    pub async fn get_optional<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<Option<T>, RpcError> {
        match self.send(Method::GET, path, query, None).await {
            Ok(val) => Ok(Some(serde_json::from_value(val)?)),
            Err(e) if e.status() == Some(404) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// POST a JSON body to `path` and decode the JSON response.
    pub async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
        body: &B,
    ) -> Result<T, RpcError> {
        let body = serde_json::to_value(body)?;
        let val = self.send(Method::POST, path, query, Some(&body)).await?;
        Ok(serde_json::from_value(val)?)
    }

    /// POST with no body; parameters travel in the query string.
    pub async fn post_empty<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, RpcError> {
        let val = self.send(Method::POST, path, query, None).await?;
        Ok(serde_json::from_value(val)?)
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<&Value>,
    ) -> Result<Value, RpcError> {
        let url = self.endpoint(path);
        let attempts = self.config.retries + 1;
        let mut last_err = RpcError::Other(format!("no attempt made for {}", url));

        for attempt in 0..attempts {
            if attempt > 0 {
                let delay = self.config.retry_delay * 2u32.saturating_pow(attempt - 1);
                tokio::time::sleep(delay).await;
            }

            match self.do_send(method.clone(), &url, query, body).await {
                Ok(val) => return Ok(val),
                Err(e) => {
                    let should_retry = e.is_transient() && attempt + 1 < attempts;
                    if !should_retry {
                        return Err(e);
                    }
                    warn!("{} {} failed (attempt {}): {}", method, url, attempt + 1, e);
                    last_err = e;
                }
            }
        }

        Err(last_err)
    }

    async fn do_send(
        &self,
        method: Method,
        url: &str,
        query: &[(&str, String)],
        body: Option<&Value>,
    ) -> Result<Value, RpcError> {
        debug!("{} {}", method, url);
        let mut req = self
            .client
            .request(method, url)
            .headers(self.build_headers());
        if !query.is_empty() {
            req = req.query(query);
        }
        if let Some(body) = body {
            req = req.json(body);
        }

        let resp = req.send().await.map_err(|e| RpcError::Http {
            url: url.to_string(),
            source: e,
        })?;

        let status = resp.status().as_u16();
        if status >= 400 {
            let text = resp.text().await.unwrap_or_default();
            return Err(RpcError::api(url, status, &text));
        }

        let text = resp.text().await.map_err(|e| RpcError::Http {
            url: url.to_string(),
            source: e,
        })?;
        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_str(&text)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = RpcConfig::default();
        assert_eq!(config.url, "http://127.0.0.1:8080/v1");
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.retries, 2);
        assert!(config.api_key.is_none());
    }

    #[test]
    fn test_client_url_trims_slash() {
        let client = RestClient::new("https://fullnode.devnet.aptoslabs.com/v1/").unwrap();
        assert_eq!(client.url(), "https://fullnode.devnet.aptoslabs.com/v1");
        assert_eq!(
            client.endpoint("/accounts/0x1"),
            "https://fullnode.devnet.aptoslabs.com/v1/accounts/0x1"
        );
    }

    #[test]
    fn test_bearer_header() {
        let client = RestClient::with_config(RpcConfig {
            api_key: Some("secret".to_string()),
            ..Default::default()
        })
        .unwrap();
        let headers = client.build_headers();
        assert_eq!(headers.get(AUTHORIZATION).unwrap(), "Bearer secret");
        assert_eq!(headers.get(CONTENT_TYPE).unwrap(), "application/json");
    }

    #[test]
    fn test_no_auth_header_without_key() {
        let client = RestClient::new("http://localhost:8080/v1").unwrap();
        assert!(client.build_headers().get(AUTHORIZATION).is_none());
    }
}
