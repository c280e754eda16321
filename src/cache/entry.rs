//! Cache Entry Module
//!
//! Defines the stored record and the projections served by list queries.

use std::str::FromStr;

use serde::Serialize;

use crate::error::CacheError;

// == Cache Entry ==
/// A single cache record as persisted by the storage adapter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CacheEntry {
    /// Unique key of the entry
    pub key: String,
    /// The cached payload, replaced wholesale on write
    pub value: String,
    /// Absolute expiry timestamp (Unix milliseconds)
    pub expiry: i64,
}

impl CacheEntry {
    /// Creates an entry expiring at the given absolute timestamp.
    pub fn new(key: impl Into<String>, value: impl Into<String>, expiry: i64) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            expiry,
        }
    }

    // == Is Stale ==
    /// Checks whether the entry has outlived its TTL at the given instant.
    ///
    /// An entry is stale strictly after its expiry: one whose `expiry`
    /// equals `now` is still served as fresh.
    pub fn is_stale(&self, now: i64) -> bool {
        self.expiry < now
    }

    // == Project ==
    /// Returns a copy of the entry reduced to the requested fields.
    pub fn project(&self, fields: &[Field]) -> PartialEntry {
        let mut partial = PartialEntry::default();
        for field in fields {
            match field {
                Field::Key => partial.key = Some(self.key.clone()),
                Field::Value => partial.value = Some(self.value.clone()),
                Field::Expiry => partial.expiry = Some(self.expiry),
            }
        }
        partial
    }
}

// == Field ==
/// Names of the projectable entry fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Key,
    Value,
    Expiry,
}

impl FromStr for Field {
    type Err = CacheError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "key" => Ok(Field::Key),
            "value" => Ok(Field::Value),
            "expiry" => Ok(Field::Expiry),
            other => Err(CacheError::InvalidArgument(format!(
                "Unknown property: {}",
                other
            ))),
        }
    }
}

// == Partial Entry ==
/// A projected entry holding only the requested fields.
///
/// Absent fields are omitted from the serialized output entirely.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PartialEntry {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiry: Option<i64>,
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_fresh_before_expiry() {
        let entry = CacheEntry::new("k", "v", 1000);
        assert!(!entry.is_stale(999));
    }

    #[test]
    fn test_entry_fresh_at_expiry_boundary() {
        let entry = CacheEntry::new("k", "v", 1000);
        assert!(!entry.is_stale(1000));
    }

    #[test]
    fn test_entry_stale_after_expiry() {
        let entry = CacheEntry::new("k", "v", 1000);
        assert!(entry.is_stale(1001));
    }

    #[test]
    fn test_field_parsing() {
        assert_eq!("key".parse::<Field>().unwrap(), Field::Key);
        assert_eq!("value".parse::<Field>().unwrap(), Field::Value);
        assert_eq!("expiry".parse::<Field>().unwrap(), Field::Expiry);
        assert!("bogus".parse::<Field>().is_err());
    }

    #[test]
    fn test_project_single_field() {
        let entry = CacheEntry::new("k1", "v1", 42);
        let partial = entry.project(&[Field::Value]);

        assert_eq!(partial.value.as_deref(), Some("v1"));
        assert!(partial.key.is_none());
        assert!(partial.expiry.is_none());
    }

    #[test]
    fn test_project_serializes_only_requested_fields() {
        let entry = CacheEntry::new("k1", "v1", 42);
        let partial = entry.project(&[Field::Key, Field::Expiry]);

        let json = serde_json::to_string(&partial).unwrap();
        assert!(json.contains("\"key\""));
        assert!(json.contains("\"expiry\""));
        assert!(!json.contains("\"value\""));
    }
}
