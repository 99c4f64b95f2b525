//! Key-value store with per-entry TTL
//!
//! A small durable settings/cache store, JSON-file backed like the other
//! repositories. Values are arbitrary JSON; each entry may carry an expiry,
//! after which reads treat it as absent. The store is injected through the
//! storage coordinator rather than accessed as ambient global state.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use chrono::{DateTime, Duration, Utc};
use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::error::OneDripError;

use super::file_io::{read_json, write_json_atomic};

/// A stored value with an optional expiry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KvEntry {
    pub value: serde_json::Value,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
}

impl KvEntry {
    fn is_expired(&self, now: DateTime<Utc>) -> bool {
        matches!(self.expires_at, Some(at) if at <= now)
    }
}

/// Serializable on-disk shape of the key-value store
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct KvData {
    #[serde(default)]
    entries: HashMap<String, KvEntry>,
}

/// JSON-file backed key-value store
pub struct KvStore {
    path: PathBuf,
    entries: RwLock<HashMap<String, KvEntry>>,
}

impl KvStore {
    /// Create a new key-value store
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Load entries from disk, dropping any that have already expired
    pub fn load(&self) -> Result<(), OneDripError> {
        let file_data: KvData = read_json(&self.path)?;
        let now = Utc::now();

        let mut entries = self
            .entries
            .write()
            .map_err(|e| OneDripError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        entries.clear();
        for (key, entry) in file_data.entries {
            if !entry.is_expired(now) {
                entries.insert(key, entry);
            }
        }

        Ok(())
    }

    /// Save entries to disk
    pub fn save(&self) -> Result<(), OneDripError> {
        let entries = self
            .entries
            .read()
            .map_err(|e| OneDripError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let file_data = KvData {
            entries: entries.clone(),
        };

        write_json_atomic(&self.path, &file_data)
    }

    /// Get a value by key; expired entries read as absent
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, OneDripError> {
        let entries = self
            .entries
            .read()
            .map_err(|e| OneDripError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        match entries.get(key) {
            Some(entry) if !entry.is_expired(Utc::now()) => {
                let value = serde_json::from_value(entry.value.clone()).map_err(|e| {
                    OneDripError::Storage(format!("Invalid stored value for '{}': {}", key, e))
                })?;
                Ok(Some(value))
            }
            _ => Ok(None),
        }
    }

    /// Set a value, optionally expiring after `ttl`
    pub fn set<T: Serialize>(
        &self,
        key: impl Into<String>,
        value: &T,
        ttl: Option<Duration>,
    ) -> Result<(), OneDripError> {
        let json = serde_json::to_value(value)
            .map_err(|e| OneDripError::Storage(format!("Failed to serialize value: {}", e)))?;

        let mut entries = self
            .entries
            .write()
            .map_err(|e| OneDripError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        entries.insert(
            key.into(),
            KvEntry {
                value: json,
                expires_at: ttl.map(|d| Utc::now() + d),
            },
        );
        Ok(())
    }

    /// Remove a key; returns false if it was absent
    pub fn remove(&self, key: &str) -> Result<bool, OneDripError> {
        let mut entries = self
            .entries
            .write()
            .map_err(|e| OneDripError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        Ok(entries.remove(key).is_some())
    }

    /// Remove all entries
    pub fn clear(&self) -> Result<(), OneDripError> {
        let mut entries = self
            .entries
            .write()
            .map_err(|e| OneDripError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        entries.clear();
        Ok(())
    }

    /// Drop expired entries, returning how many were removed
    pub fn purge_expired(&self) -> Result<usize, OneDripError> {
        let now = Utc::now();
        let mut entries = self
            .entries
            .write()
            .map_err(|e| OneDripError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        let before = entries.len();
        entries.retain(|_, entry| !entry.is_expired(now));
        Ok(before - entries.len())
    }

    /// Number of live (non-expired) entries
    pub fn len(&self) -> Result<usize, OneDripError> {
        let now = Utc::now();
        let entries = self
            .entries
            .read()
            .map_err(|e| OneDripError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(entries.values().filter(|e| !e.is_expired(now)).count())
    }

    /// Whether the store has no live entries
    pub fn is_empty(&self) -> Result<bool, OneDripError> {
        Ok(self.len()? == 0)
    }
}
