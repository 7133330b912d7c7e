//! HTTP utilities for Fastly REST API calls

use super::auth::ApiKey;
use super::error::ApiStatusError;
use anyhow::{Context, Result};
use reqwest::{Client, RequestBuilder, StatusCode};
use serde_json::Value;

/// Maximum length of response body to log (to avoid logging sensitive data)
const MAX_LOG_BODY_LENGTH: usize = 200;

/// Header carrying the API token
const API_KEY_HEADER: &str = "Fastly-Key";

/// Sanitize response body for logging
/// Truncates long responses and strips control characters
fn sanitize_for_log(body: &str) -> String {
    let truncated = if body.len() > MAX_LOG_BODY_LENGTH {
        let mut end = MAX_LOG_BODY_LENGTH;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}... [truncated, {} bytes total]", &body[..end], body.len())
    } else {
        body.to_string()
    };

    truncated.replace(|c: char| !c.is_ascii_graphic() && c != ' ', "")
}

/// HTTP client wrapper for Fastly API calls
#[derive(Clone)]
pub struct FastlyHttpClient {
    client: Client,
    api_key: ApiKey,
}

impl FastlyHttpClient {
    /// Create a new HTTP client
    pub fn new(api_key: ApiKey) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("fastly-logging/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client, api_key })
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header(API_KEY_HEADER, self.api_key.as_str())
            .header(reqwest::header::ACCEPT, "application/json")
    }

    /// Make a GET request to the Fastly API
    pub async fn get(&self, url: &str) -> Result<Value> {
        tracing::debug!("GET {}", url);
        self.send(self.authorize(self.client.get(url))).await
    }

    /// Make a form-encoded POST request to the Fastly API
    pub async fn post_form(&self, url: &str, params: &[(&str, &str)]) -> Result<Value> {
        tracing::debug!("POST {} ({} params)", url, params.len());
        self.send(self.authorize(self.client.post(url)).form(params))
            .await
    }

    /// Make a form-encoded PUT request to the Fastly API
    pub async fn put_form(&self, url: &str, params: &[(&str, &str)]) -> Result<Value> {
        tracing::debug!("PUT {} ({} params)", url, params.len());
        self.send(self.authorize(self.client.put(url)).form(params))
            .await
    }

    /// Make a DELETE request to the Fastly API
    pub async fn delete(&self, url: &str) -> Result<Value> {
        tracing::debug!("DELETE {}", url);
        self.send(self.authorize(self.client.delete(url))).await
    }

    async fn send(&self, request: RequestBuilder) -> Result<Value> {
        let response = request.send().await.context("Failed to send request")?;

        let status = response.status();
        let body = response
            .text()
            .await
            .context("Failed to read response body")?;

        if !status.is_success() {
            // Security: Only log sanitized/truncated error body to avoid leaking sensitive data
            tracing::error!("API error: {} - {}", status, sanitize_for_log(&body));
            return Err(ApiStatusError { status }.into());
        }

        // Handle empty response
        if body.is_empty() {
            return Ok(Value::Null);
        }

        serde_json::from_str(&body).context("Failed to parse response JSON")
    }
}

/// Format a Fastly API error for display
/// Security: Sanitizes error messages to avoid leaking API details
pub fn format_api_error(error: &anyhow::Error) -> String {
    if let Some(ApiStatusError { status }) = error.downcast_ref::<ApiStatusError>() {
        return match *status {
            StatusCode::UNAUTHORIZED => {
                "Authentication failed. Check FASTLY_API_KEY or --api-key.".to_string()
            }
            StatusCode::FORBIDDEN => {
                "Permission denied. The API token lacks access to this service.".to_string()
            }
            StatusCode::NOT_FOUND => "Resource not found.".to_string(),
            StatusCode::CONFLICT => {
                "Resource conflict. The endpoint may already exist on this version.".to_string()
            }
            StatusCode::TOO_MANY_REQUESTS => {
                "Rate limit exceeded. Please try again later.".to_string()
            }
            StatusCode::BAD_REQUEST => {
                "Invalid request. Check your parameters (is the version locked?).".to_string()
            }
            s if s.is_server_error() => {
                "Fastly API temporarily unavailable. Please try again.".to_string()
            }
            _ => format!("Request failed with status {}.", status),
        };
    }

    // Transport failures (connect, timeout, body read) surface as reqwest errors
    if error.downcast_ref::<reqwest::Error>().is_some() {
        return "Request failed. Check your network connection and try again.".to_string();
    }

    let error_str = error.to_string();
    let sanitized = error_str
        .chars()
        .filter(|c| c.is_ascii_graphic() || *c == ' ')
        .take(80)
        .collect::<String>();

    if sanitized.len() < error_str.len() {
        format!("{}...", sanitized)
    } else {
        sanitized
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_truncates_long_bodies() {
        let body = "x".repeat(500);
        let sanitized = sanitize_for_log(&body);
        assert!(sanitized.starts_with(&"x".repeat(MAX_LOG_BODY_LENGTH)));
        assert!(sanitized.ends_with("[truncated, 500 bytes total]"));
    }

    #[test]
    fn test_sanitize_strips_control_characters() {
        assert_eq!(sanitize_for_log("bad\r\ninput"), "badinput");
    }

    #[test]
    fn test_format_api_error_maps_status() {
        let err: anyhow::Error = ApiStatusError {
            status: StatusCode::UNAUTHORIZED,
        }
        .into();
        assert!(format_api_error(&err).starts_with("Authentication failed"));

        let err: anyhow::Error = ApiStatusError {
            status: StatusCode::SERVICE_UNAVAILABLE,
        }
        .into();
        assert!(format_api_error(&err).starts_with("Fastly API temporarily unavailable"));

        let err: anyhow::Error = ApiStatusError {
            status: StatusCode::IM_A_TEAPOT,
        }
        .into();
        assert_eq!(
            format_api_error(&err),
            "Request failed with status 418 I'm a teapot."
        );
    }

    #[test]
    fn test_format_api_error_survives_context() {
        let err = anyhow::Error::from(ApiStatusError {
            status: StatusCode::NOT_FOUND,
        })
        .context("Failed to list endpoints");
        assert_eq!(format_api_error(&err), "Resource not found.");
    }

    #[test]
    fn test_format_api_error_ignores_digits_in_text() {
        let err = anyhow::anyhow!("Invalid API endpoint: http://localhost:4000 x");
        assert_eq!(
            format_api_error(&err),
            "Invalid API endpoint: http://localhost:4000 x"
        );
    }

    #[test]
    fn test_format_api_error_passes_short_messages() {
        let err = anyhow::anyhow!("missing required field \"name\"");
        assert_eq!(format_api_error(&err), "missing required field \"name\"");
    }
}
