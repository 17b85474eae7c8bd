//! Request DTOs for the cache service API
//!
//! Defines the structure of incoming HTTP request bodies.

use serde::Deserialize;

use crate::cache::MAX_KEY_LENGTH;

fn validate_key(key: &str) -> Option<String> {
    if key.is_empty() {
        return Some("Key cannot be empty".to_string());
    }
    if key.len() > MAX_KEY_LENGTH {
        return Some(format!(
            "Key exceeds maximum length of {} characters",
            MAX_KEY_LENGTH
        ));
    }
    None
}

/// Request body for the raw SET operation (PUT /set)
#[derive(Debug, Clone, Deserialize)]
pub struct SetRequest {
    /// The cache key
    pub key: String,
    /// The value to store
    pub value: String,
    /// Optional TTL in seconds
    #[serde(default)]
    pub ttl: Option<u64>,
}

impl SetRequest {
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        validate_key(&self.key)
    }
}

/// Request body for POST /remember
///
/// `value` is what the producer yields when the key misses.
#[derive(Debug, Clone, Deserialize)]
pub struct RememberRequest {
    pub key: String,
    pub value: String,
    #[serde(default)]
    pub ttl: Option<u64>,
}

impl RememberRequest {
    pub fn validate(&self) -> Option<String> {
        validate_key(&self.key)
    }
}

/// Request body for POST /invalidate
#[derive(Debug, Clone, Deserialize)]
pub struct InvalidateRequest {
    /// Keys to delete; may be empty
    #[serde(default)]
    pub keys: Vec<String>,
}

impl InvalidateRequest {
    pub fn validate(&self) -> Option<String> {
        self.keys.iter().find_map(|key| validate_key(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_request_deserialize() {
        let json = r#"{"key": "test", "value": "hello"}"#;
        let req: SetRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.key, "test");
        assert_eq!(req.value, "hello");
        assert!(req.ttl.is_none());
    }

    #[test]
    fn test_remember_request_with_ttl() {
        let json = r#"{"key": "test", "value": "hello", "ttl": 60}"#;
        let req: RememberRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.ttl, Some(60));
        assert!(req.validate().is_none());
    }

    #[test]
    fn test_validate_empty_key() {
        let req = SetRequest {
            key: "".to_string(),
            value: "test".to_string(),
            ttl: None,
        };
        assert!(req.validate().is_some());
    }

    #[test]
    fn test_validate_long_key() {
        let req = RememberRequest {
            key: "x".repeat(MAX_KEY_LENGTH + 1),
            value: "test".to_string(),
            ttl: None,
        };
        assert!(req.validate().is_some());
    }

    #[test]
    fn test_invalidate_request_defaults_to_no_keys() {
        let req: InvalidateRequest = serde_json::from_str("{}").unwrap();
        assert!(req.keys.is_empty());
        assert!(req.validate().is_none());
    }

    #[test]
    fn test_invalidate_request_rejects_empty_key() {
        let req: InvalidateRequest = serde_json::from_str(r#"{"keys": ["a", ""]}"#).unwrap();
        assert!(req.validate().is_some());
    }
}
