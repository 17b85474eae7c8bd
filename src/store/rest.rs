//! REST Store Module
//!
//! Minimal adapter for a Redis-compatible REST endpoint: each command is sent
//! as a JSON array in the body of a `POST`, authenticated with a bearer token.
//! Only the commands the cache helpers need are supported.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, ClientBuilder};
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::config::{Config, TOKEN_VAR, URL_VAR};
use crate::error::{CacheError, Result};
use crate::store::KvStore;

/// Body of every command response.
#[derive(Debug, Deserialize)]
struct CommandResponse {
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    error: Option<String>,
}

// == Rest Store ==
/// Client handle for the remote store. Stateless between requests.
#[derive(Debug, Clone)]
pub struct RestStore {
    http: Client,
    url: String,
    token: String,
}

impl RestStore {
    // == Constructor ==
    /// Creates a client for `url` authenticated with `token`.
    pub fn new(url: impl Into<String>, token: impl Into<String>, timeout: Duration) -> Result<Self> {
        let url = url.into().trim_end_matches('/').to_string();
        let token = token.into();
        if url.is_empty() {
            return Err(CacheError::Config(format!("{} is empty", URL_VAR)));
        }
        if token.is_empty() {
            return Err(CacheError::Config(format!("{} is empty", TOKEN_VAR)));
        }

        let http = ClientBuilder::new()
            .timeout(timeout)
            .user_agent(concat!("rest_cache/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { http, url, token })
    }

    /// Creates a client from the loaded configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(
            config.rest_url.clone(),
            config.rest_token.clone(),
            Duration::from_secs(config.request_timeout),
        )
    }

    /// Endpoint this client talks to.
    pub fn url(&self) -> &str {
        &self.url
    }

    // == Command ==
    /// Sends one command and returns its `result` field.
    async fn command(&self, args: &[&str]) -> Result<Option<Value>> {
        debug!(command = args.first().copied().unwrap_or_default(), "rest store request");

        let response = self
            .http
            .post(&self.url)
            .bearer_auth(&self.token)
            .json(args)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        parse_response(status, &body)
    }
}

/// Interprets a command response body.
fn parse_response(status: reqwest::StatusCode, body: &str) -> Result<Option<Value>> {
    match serde_json::from_str::<CommandResponse>(body) {
        Ok(CommandResponse {
            error: Some(error), ..
        }) => Err(CacheError::Store(error)),
        Ok(CommandResponse { result, .. }) if status.is_success() => Ok(result),
        _ => Err(CacheError::Store(format!(
            "unexpected response ({}): {}",
            status,
            body.trim()
        ))),
    }
}

/// Stored values come back as strings; anything else is kept as its JSON text.
fn into_string(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    }
}

#[async_trait]
impl KvStore for RestStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let result = self.command(&["GET", key]).await?;
        Ok(result.and_then(into_string))
    }

    async fn set(&self, key: &str, value: &str, ttl_secs: u64) -> Result<()> {
        let ttl = ttl_secs.to_string();
        self.command(&["SET", key, value, "EX", &ttl]).await?;
        Ok(())
    }

    async fn del(&self, key: &str) -> Result<u64> {
        let result = self.command(&["DEL", key]).await?;
        Ok(result.as_ref().and_then(Value::as_u64).unwrap_or(0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;
    use serde_json::json;

    #[test]
    fn test_new_trims_trailing_slash() {
        let store = RestStore::new("https://eu1.example.io/", "token", Duration::from_secs(1)).unwrap();
        assert_eq!(store.url(), "https://eu1.example.io");
    }

    #[test]
    fn test_new_rejects_empty_credentials() {
        assert!(matches!(
            RestStore::new("", "token", Duration::from_secs(1)),
            Err(CacheError::Config(_))
        ));
        assert!(matches!(
            RestStore::new("https://eu1.example.io", "", Duration::from_secs(1)),
            Err(CacheError::Config(_))
        ));
    }

    #[test]
    fn test_parse_success() {
        let result = parse_response(StatusCode::OK, r#"{"result":"OK"}"#).unwrap();
        assert_eq!(result, Some(json!("OK")));

        let result = parse_response(StatusCode::OK, r#"{"result":null}"#).unwrap();
        assert_eq!(result, None);
    }

    #[test]
    fn test_parse_error_field() {
        let err = parse_response(
            StatusCode::BAD_REQUEST,
            r#"{"error":"ERR invalid expire time in 'set' command"}"#,
        )
        .unwrap_err();
        assert!(matches!(err, CacheError::Store(msg) if msg.contains("invalid expire time")));
    }

    #[test]
    fn test_parse_unauthorized_without_json() {
        let err = parse_response(StatusCode::UNAUTHORIZED, "Unauthorized").unwrap_err();
        assert!(matches!(err, CacheError::Store(msg) if msg.contains("401")));
    }

    #[test]
    fn test_into_string() {
        assert_eq!(into_string(Value::Null), None);
        assert_eq!(into_string(json!("abc")), Some("abc".to_string()));
        assert_eq!(into_string(json!(42)), Some("42".to_string()));
    }
}
