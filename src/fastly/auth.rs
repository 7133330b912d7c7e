//! Fastly Authentication
//!
//! Resolves the API token used for the `Fastly-Key` header from the command
//! line, the environment, or the saved configuration.

use anyhow::Result;
use std::fmt;

/// Environment variable holding the API token
pub const API_KEY_ENV: &str = "FASTLY_API_KEY";

/// Fastly API token
/// Security: Debug output never includes the token itself
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Wrap a token after checking its format
    pub fn new(key: &str) -> Result<Self> {
        if !validate_api_key(key) {
            return Err(anyhow::anyhow!("Invalid Fastly API key format"));
        }
        Ok(Self(key.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(****)")
    }
}

/// Validate an API token format
/// Tokens are non-empty printable ASCII with no whitespace
fn validate_api_key(key: &str) -> bool {
    !key.is_empty() && key.chars().all(|c| c.is_ascii_graphic())
}

/// Resolve the API key (CLI > FASTLY_API_KEY > config)
/// Security: Invalid candidates are skipped rather than sent upstream
pub fn resolve_api_key(explicit: Option<&str>, configured: Option<&str>) -> Option<ApiKey> {
    let from_env = std::env::var(API_KEY_ENV).ok();
    pick_api_key([
        ("--api-key", explicit),
        (API_KEY_ENV, from_env.as_deref()),
        ("config", configured),
    ])
}

fn pick_api_key(candidates: [(&str, Option<&str>); 3]) -> Option<ApiKey> {
    for (source, candidate) in candidates {
        let Some(candidate) = candidate else {
            continue;
        };
        match ApiKey::new(candidate.trim()) {
            Ok(key) => {
                tracing::debug!("Using API key from {}", source);
                return Some(key);
            }
            Err(_) => tracing::warn!("Invalid API key format in {}", source),
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_api_key() {
        assert!(validate_api_key("abc123_-XYZ"));
        assert!(!validate_api_key(""));
        assert!(!validate_api_key("has space"));
        assert!(!validate_api_key("tab\tkey"));
    }

    #[test]
    fn test_debug_is_redacted() {
        let key = ApiKey::new("super-secret").unwrap();
        assert_eq!(format!("{:?}", key), "ApiKey(****)");
        assert_eq!(key.as_str(), "super-secret");
    }

    #[test]
    fn test_pick_prefers_first_valid() {
        let key = pick_api_key([("cli", None), ("env", Some("bad key")), ("config", Some("good"))]);
        assert_eq!(key.unwrap().as_str(), "good");

        let key = pick_api_key([("cli", Some("first")), ("env", Some("second")), ("config", None)]);
        assert_eq!(key.unwrap().as_str(), "first");
    }

    #[test]
    fn test_pick_none_when_all_missing() {
        assert!(pick_api_key([("cli", None), ("env", None), ("config", Some("   "))]).is_none());
    }
}
