//! Provider credential records.
//!
//! Stored keys historically came in two shapes: a bare string (just the API
//! key) and an object with metadata. Both collapse into one versioned record,
//! migrated exactly once at read time, so call sites never branch on shape.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use guardian_core::types::Provider;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::RwLock;

/// Current record schema version.
pub const CREDENTIAL_VERSION: u8 = 2;

/// A stored provider credential.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CredentialRecord {
    pub version: u8,
    pub key: String,
    pub label: Option<String>,
    pub added_at: DateTime<Utc>,
}

impl CredentialRecord {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            version: CREDENTIAL_VERSION,
            key: key.into(),
            label: None,
            added_at: Utc::now(),
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Migrate a raw stored value to the current schema. Legacy values are
    /// bare strings; anything else must already be a versioned record.
    pub fn migrate(raw: serde_json::Value) -> anyhow::Result<CredentialRecord> {
        match raw {
            serde_json::Value::String(key) => Ok(CredentialRecord::new(key)),
            other => {
                let record: CredentialRecord = serde_json::from_value(other)?;
                Ok(record)
            }
        }
    }
}

/// Host-provided credential storage. The engine only asks which providers a
/// user can reach; hosts may back this with any persistent store.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    async fn get(&self, user_id: &str, provider: Provider) -> anyhow::Result<Option<CredentialRecord>>;
    async fn put(&self, user_id: &str, provider: Provider, record: CredentialRecord) -> anyhow::Result<()>;

    /// Providers for which the user holds a usable credential.
    async fn available_providers(&self, user_id: &str) -> anyhow::Result<Vec<Provider>> {
        let mut available = Vec::new();
        for provider in Provider::ALL {
            if self.get(user_id, provider).await?.is_some() {
                available.push(provider);
            }
        }
        Ok(available)
    }
}

/// In-memory credential store. Holds raw stored values and migrates on read,
/// persisting the migrated record back so migration happens once per key.
#[derive(Debug, Default)]
pub struct InMemoryCredentialStore {
    inner: RwLock<HashMap<(String, Provider), serde_json::Value>>,
}

impl InMemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a legacy bare-string key, as older deployments stored them.
    pub fn insert_legacy(&self, user_id: &str, provider: Provider, key: &str) {
        self.inner
            .write()
            .unwrap()
            .insert((user_id.to_string(), provider), serde_json::Value::String(key.to_string()));
    }
}

#[async_trait]
impl CredentialStore for InMemoryCredentialStore {
    async fn get(&self, user_id: &str, provider: Provider) -> anyhow::Result<Option<CredentialRecord>> {
        let slot = (user_id.to_string(), provider);
        let raw = match self.inner.read().unwrap().get(&slot) {
            Some(raw) => raw.clone(),
            None => return Ok(None),
        };
        let record = CredentialRecord::migrate(raw)?;
        self.inner
            .write()
            .unwrap()
            .insert(slot, serde_json::to_value(&record)?);
        Ok(Some(record))
    }

    async fn put(&self, user_id: &str, provider: Provider, record: CredentialRecord) -> anyhow::Result<()> {
        self.inner
            .write()
            .unwrap()
            .insert((user_id.to_string(), provider), serde_json::to_value(&record)?);
        Ok(())
    }
}
