//! Configuration Module
//!
//! Loads the store endpoint, access token and server settings from environment variables.

use std::env;
use std::str::FromStr;

use crate::error::{CacheError, Result};

/// Environment variable holding the REST endpoint of the store.
pub const URL_VAR: &str = "UPSTASH_REDIS_REST_URL";
/// Environment variable holding the bearer token of the store.
pub const TOKEN_VAR: &str = "UPSTASH_REDIS_REST_TOKEN";

// == Backend ==
/// Which store the cache helpers talk to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    /// Remote store reached over the REST command protocol
    Rest,
    /// Process-local store, for development and tests
    Memory,
}

impl FromStr for Backend {
    type Err = CacheError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rest" | "upstash" => Ok(Backend::Rest),
            "memory" | "mem" => Ok(Backend::Memory),
            other => Err(CacheError::Config(format!("unknown cache backend '{}'", other))),
        }
    }
}

/// Service configuration parameters.
#[derive(Debug, Clone)]
pub struct Config {
    /// Store selection
    pub backend: Backend,
    /// REST endpoint of the store (required for `Backend::Rest`)
    pub rest_url: String,
    /// Bearer token for the REST endpoint (required for `Backend::Rest`)
    pub rest_token: String,
    /// TTL in seconds used by the raw `/set` route when none is given
    pub default_ttl: u64,
    /// HTTP server port
    pub server_port: u16,
    /// Timeout in seconds for a single store request
    pub request_timeout: u64,
    /// Expiry sweep interval in seconds (memory backend)
    pub cleanup_interval: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `UPSTASH_REDIS_REST_URL` - Store endpoint (required for the rest backend)
    /// - `UPSTASH_REDIS_REST_TOKEN` - Store token (required for the rest backend)
    /// - `CACHE_BACKEND` - `rest` or `memory` (default: rest)
    /// - `DEFAULT_TTL` - Default TTL in seconds (default: 300)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `REQUEST_TIMEOUT` - Store request timeout in seconds (default: 10)
    /// - `CLEANUP_INTERVAL` - Sweep frequency in seconds (default: 1)
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();
        let backend = match env::var("CACHE_BACKEND") {
            Ok(v) => v.parse()?,
            Err(_) => Backend::Rest,
        };

        let config = Self {
            backend,
            rest_url: env::var(URL_VAR).unwrap_or_default(),
            rest_token: env::var(TOKEN_VAR).unwrap_or_default(),
            default_ttl: parse_var("DEFAULT_TTL").unwrap_or(defaults.default_ttl),
            server_port: parse_var("SERVER_PORT").unwrap_or(defaults.server_port),
            request_timeout: parse_var("REQUEST_TIMEOUT").unwrap_or(defaults.request_timeout),
            cleanup_interval: parse_var("CLEANUP_INTERVAL").unwrap_or(defaults.cleanup_interval),
        };
        config.validate()?;
        Ok(config)
    }

    /// Checks that the selected backend has everything it needs.
    pub fn validate(&self) -> Result<()> {
        if self.backend == Backend::Rest {
            if self.rest_url.trim().is_empty() {
                return Err(CacheError::Config(format!("{} is not set", URL_VAR)));
            }
            if self.rest_token.trim().is_empty() {
                return Err(CacheError::Config(format!("{} is not set", TOKEN_VAR)));
            }
        }
        Ok(())
    }
}

fn parse_var<T: FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.parse().ok())
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend: Backend::Rest,
            rest_url: String::new(),
            rest_token: String::new(),
            default_ttl: 300,
            server_port: 3000,
            request_timeout: 10,
            cleanup_interval: 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.backend, Backend::Rest);
        assert_eq!(config.default_ttl, 300);
        assert_eq!(config.server_port, 3000);
        assert_eq!(config.request_timeout, 10);
        assert_eq!(config.cleanup_interval, 1);
    }

    #[test]
    fn test_backend_parse() {
        assert_eq!("rest".parse::<Backend>().unwrap(), Backend::Rest);
        assert_eq!(" Memory ".parse::<Backend>().unwrap(), Backend::Memory);
        assert!(matches!(
            "sled".parse::<Backend>(),
            Err(CacheError::Config(_))
        ));
    }

    #[test]
    fn test_rest_backend_requires_url_and_token() {
        let mut config = Config::default();
        assert!(matches!(config.validate(), Err(CacheError::Config(_))));

        config.rest_url = "https://example.upstash.io".to_string();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains(TOKEN_VAR));

        config.rest_token = "secret".to_string();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_memory_backend_needs_no_credentials() {
        let config = Config {
            backend: Backend::Memory,
            ..Config::default()
        };
        assert!(config.validate().is_ok());
    }
}
