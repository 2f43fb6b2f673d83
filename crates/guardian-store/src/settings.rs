//! Org-keyed notification settings behind an explicit store interface,
//! replacing process-wide mutable state so settings survive restarts and
//! multi-instance deployments. Delivery itself lives in the host.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::RwLock;

/// Spend-alert configuration for one organization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationSettings {
    pub alerts_enabled: bool,
    pub monthly_budget_usd: Option<f64>,
    /// Budget fractions (0..=1) at which alerts fire, ascending.
    pub thresholds: Vec<f64>,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            alerts_enabled: true,
            monthly_budget_usd: None,
            thresholds: vec![0.5, 0.8, 1.0],
        }
    }
}

/// Host-provided settings storage, keyed by organization.
#[async_trait]
pub trait SettingsStore: Send + Sync {
    async fn get(&self, org_id: &str) -> anyhow::Result<Option<NotificationSettings>>;
    async fn put(&self, org_id: &str, settings: NotificationSettings) -> anyhow::Result<()>;
}

/// In-memory settings store for tests and embedding.
#[derive(Debug, Default)]
pub struct InMemorySettingsStore {
    inner: RwLock<HashMap<String, NotificationSettings>>,
}

impl InMemorySettingsStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SettingsStore for InMemorySettingsStore {
    async fn get(&self, org_id: &str) -> anyhow::Result<Option<NotificationSettings>> {
        Ok(self.inner.read().unwrap().get(org_id).cloned())
    }

    async fn put(&self, org_id: &str, settings: NotificationSettings) -> anyhow::Result<()> {
        self.inner.write().unwrap().insert(org_id.to_string(), settings);
        Ok(())
    }
}
