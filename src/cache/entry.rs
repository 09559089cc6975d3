// Cache entry wrapper shared by both tiers.
// Persisted as `{data, timestamp, expiry}` with the expiry in milliseconds.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One cached payload with the metadata needed for lazy expiry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheEntry {
    /// The cached payload, kept as raw JSON so one cache serves any dataset.
    pub data: Value,
    /// When the entry was written.
    pub timestamp: DateTime<Utc>,
    /// Time-to-live measured from `timestamp`.
    #[serde(with = "expiry_millis")]
    pub expiry: Duration,
}

impl CacheEntry {
    pub fn new(data: Value, expiry: Duration) -> Self {
        Self {
            data,
            timestamp: Utc::now(),
            expiry,
        }
    }

    /// An entry is live while `now - timestamp < expiry`. Expiry is checked
    /// at read time only; there is no background sweep.
    pub fn is_expired(&self) -> bool {
        let elapsed = Utc::now()
            .signed_duration_since(self.timestamp)
            .to_std()
            .unwrap_or(Duration::MAX);

        elapsed >= self.expiry
    }

    pub fn is_live(&self) -> bool {
        !self.is_expired()
    }
}

mod expiry_millis {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let millis = u64::deserialize(deserializer)?;
        Ok(Duration::from_millis(millis))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_fresh_entry_is_live() {
        let entry = CacheEntry::new(json!({"answer": 42}), Duration::from_secs(600));
        assert!(entry.is_live());
        assert!(!entry.is_expired());
    }

    #[test]
    fn test_backdated_entry_expires() {
        let mut entry = CacheEntry::new(json!(1), Duration::from_secs(300));
        entry.timestamp = Utc::now() - chrono::Duration::seconds(600);
        assert!(entry.is_expired());
    }

    #[test]
    fn test_zero_ttl_expires_immediately() {
        let entry = CacheEntry::new(json!(1), Duration::ZERO);
        assert!(entry.is_expired());
    }

    #[test]
    fn test_persisted_layout() {
        let entry = CacheEntry::new(json!({"k": "v"}), Duration::from_secs(600));
        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(value["data"], json!({"k": "v"}));
        assert_eq!(value["expiry"], json!(600_000));
        assert!(value["timestamp"].is_string());
    }

    #[test]
    fn test_expiry_round_trips_through_millis() {
        let entry = CacheEntry::new(json!(null), Duration::from_millis(1500));
        let json = serde_json::to_string(&entry).unwrap();
        let back: CacheEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(back.expiry, Duration::from_millis(1500));
    }
}
