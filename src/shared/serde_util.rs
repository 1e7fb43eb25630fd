//! Custom serde helpers for indexer and provider wire formats.

/// Deserializes a JSON-RPC hex quantity (`"0x5f5e100"`) into `u64`.
pub mod hex_u64 {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn deserialize<'de, D>(deserializer: D) -> Result<u64, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        crate::shared::parse_quantity(&s)
            .ok_or_else(|| serde::de::Error::custom(format!("Invalid hex quantity: {}", s)))
    }

    pub fn serialize<S>(value: &u64, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&crate::shared::to_quantity(*value))
    }
}

/// Deserializes an RFC 3339 string (`"2024-01-15T10:30:00.000Z"`) into epoch
/// milliseconds. Unparseable values become `None` rather than failing the record.
pub mod rfc3339_ms_opt {
    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = Option::<String>::deserialize(deserializer)?;
        Ok(s.and_then(|s| chrono::DateTime::parse_from_rfc3339(&s).ok())
            .map(|dt| dt.timestamp_millis()))
    }
}
