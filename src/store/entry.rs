//! Stored Entry Module
//!
//! A value held by the in-memory store together with its absolute expiry.

use std::time::{SystemTime, UNIX_EPOCH};

// == Stored Entry ==
/// A single value with the expiry computed from the TTL given at write time.
#[derive(Debug, Clone)]
pub struct StoredEntry {
    /// The stored payload
    pub value: String,
    /// Expiration timestamp (Unix milliseconds)
    pub expires_at: u64,
}

impl StoredEntry {
    // == Constructor ==
    /// Creates an entry that expires `ttl_secs` seconds from now.
    pub fn new(value: String, ttl_secs: u64) -> Self {
        Self {
            value,
            expires_at: current_timestamp_ms().saturating_add(ttl_secs.saturating_mul(1000)),
        }
    }

    // == Is Expired ==
    /// An entry is expired once the current time reaches its expiry.
    pub fn is_expired(&self) -> bool {
        current_timestamp_ms() >= self.expires_at
    }

    /// Remaining lifetime in whole seconds, rounded up; 0 once expired.
    pub fn ttl_remaining(&self) -> u64 {
        let remaining_ms = self.expires_at.saturating_sub(current_timestamp_ms());
        remaining_ms.div_ceil(1000)
    }
}

// == Utility Functions ==
/// Returns current Unix timestamp in milliseconds.
pub fn current_timestamp_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use std::thread::sleep;
    use std::time::Duration;

    #[test]
    fn test_entry_not_expired_within_ttl() {
        let entry = StoredEntry::new("value".to_string(), 60);

        assert_eq!(entry.value, "value");
        assert!(!entry.is_expired());
        assert_eq!(entry.ttl_remaining(), 60);
    }

    #[test]
    fn test_entry_expiration() {
        let entry = StoredEntry::new("value".to_string(), 1);
        assert!(!entry.is_expired());

        sleep(Duration::from_millis(1100));

        assert!(entry.is_expired());
        assert_eq!(entry.ttl_remaining(), 0);
    }

    #[test]
    fn test_expiration_boundary_condition() {
        let entry = StoredEntry {
            value: "test".to_string(),
            expires_at: current_timestamp_ms(),
        };

        assert!(entry.is_expired(), "Entry should be expired at boundary");
    }

    #[test]
    fn test_huge_ttl_does_not_overflow() {
        let entry = StoredEntry::new("value".to_string(), u64::MAX);
        assert!(!entry.is_expired());
    }
}
