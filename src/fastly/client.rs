//! Fastly Client
//!
//! Main client for the Fastly configuration API, combining the API key,
//! the HTTP client and the base endpoint.

use super::auth::ApiKey;
use super::http::FastlyHttpClient;
use anyhow::{Context, Result};
use serde_json::Value;
use url::Url;

/// Production API endpoint
pub const DEFAULT_ENDPOINT: &str = "https://api.fastly.com";

/// Main Fastly client
#[derive(Clone)]
pub struct FastlyClient {
    pub http: FastlyHttpClient,
    endpoint: Url,
}

impl FastlyClient {
    /// Create a client against the production endpoint
    pub fn new(api_key: ApiKey) -> Result<Self> {
        Self::with_endpoint(api_key, DEFAULT_ENDPOINT)
    }

    /// Create a client against a custom endpoint (staging, mock servers)
    pub fn with_endpoint(api_key: ApiKey, endpoint: &str) -> Result<Self> {
        let endpoint = Url::parse(endpoint)
            .with_context(|| format!("Invalid API endpoint: {}", endpoint))?;
        if endpoint.cannot_be_a_base() {
            return Err(anyhow::anyhow!("Invalid API endpoint: {}", endpoint));
        }

        Ok(Self {
            http: FastlyHttpClient::new(api_key)?,
            endpoint,
        })
    }

    /// Build a full URL from an absolute API path
    pub fn url(&self, path: &str) -> String {
        format!(
            "{}{}",
            self.endpoint.as_str().trim_end_matches('/'),
            path
        )
    }

    /// Build the path of a service version
    pub fn version_path(&self, service: &str, version: u32) -> String {
        format!(
            "/service/{}/version/{}",
            urlencoding::encode(service),
            version
        )
    }

    /// Make a GET request to the Fastly API
    pub async fn get(&self, path: &str) -> Result<Value> {
        self.http.get(&self.url(path)).await
    }

    /// Make a form-encoded POST request to the Fastly API
    pub async fn post_form(&self, path: &str, params: &[(&str, &str)]) -> Result<Value> {
        self.http.post_form(&self.url(path), params).await
    }

    /// Make a form-encoded PUT request to the Fastly API
    pub async fn put_form(&self, path: &str, params: &[(&str, &str)]) -> Result<Value> {
        self.http.put_form(&self.url(path), params).await
    }

    /// Make a DELETE request to the Fastly API
    pub async fn delete(&self, path: &str) -> Result<Value> {
        self.http.delete(&self.url(path)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(endpoint: &str) -> FastlyClient {
        FastlyClient::with_endpoint(ApiKey::new("test-key").unwrap(), endpoint).unwrap()
    }

    #[test]
    fn test_url_joins_without_double_slash() {
        let c = client("https://api.fastly.com/");
        assert_eq!(c.url("/service/abc"), "https://api.fastly.com/service/abc");

        let c = client("http://127.0.0.1:8080");
        assert_eq!(c.url("/service/abc"), "http://127.0.0.1:8080/service/abc");
    }

    #[test]
    fn test_version_path() {
        let c = client(DEFAULT_ENDPOINT);
        assert_eq!(c.version_path("svc123", 3), "/service/svc123/version/3");
        assert_eq!(c.version_path("a/b", 1), "/service/a%2Fb/version/1");
    }

    #[test]
    fn test_rejects_invalid_endpoint() {
        let key = ApiKey::new("test-key").unwrap();
        assert!(FastlyClient::with_endpoint(key.clone(), "not a url").is_err());
        assert!(FastlyClient::with_endpoint(key, "mailto:ops@example.com").is_err());
    }
}
