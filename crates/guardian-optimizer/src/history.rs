//! Performance history: append-only records of how models actually behaved
//! for a user, and the aggregation that feeds personalization.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use guardian_core::types::{Provider, TaskType};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::RwLock;
use uuid::Uuid;

/// One observed model run, as reported by the caller.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceObservation {
    pub latency_ms: f64,
    pub cost_usd: f64,
    pub success: bool,
    /// Explicit 1-5 user rating; absent ratings are simply not factored in.
    pub user_rating: Option<u8>,
}

/// A stored observation. Append-only: past records are never rewritten,
/// only aggregated on read.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceRecord {
    pub id: String,
    pub user_id: String,
    pub provider: Provider,
    pub model: String,
    pub task_type: TaskType,
    pub latency_ms: f64,
    pub cost_usd: f64,
    pub success: bool,
    pub user_rating: Option<u8>,
    pub recorded_at: DateTime<Utc>,
}

impl PerformanceRecord {
    pub fn new(
        user_id: impl Into<String>,
        provider: Provider,
        model: impl Into<String>,
        task_type: TaskType,
        observation: PerformanceObservation,
    ) -> Self {
        Self {
            id: format!("perf_{}", Uuid::new_v4().simple()),
            user_id: user_id.into(),
            provider,
            model: model.into(),
            task_type,
            latency_ms: observation.latency_ms,
            cost_usd: observation.cost_usd,
            success: observation.success,
            user_rating: observation.user_rating.map(|r| r.clamp(1, 5)),
            recorded_at: Utc::now(),
        }
    }
}

/// Host-provided history storage. May be backed by network I/O; the engine
/// only requires read-before-score and append-after-track.
#[async_trait]
pub trait HistoryStore: Send + Sync {
    /// Records for one user and task type, newest first.
    async fn load(&self, user_id: &str, task_type: TaskType) -> anyhow::Result<Vec<PerformanceRecord>>;
    async fn append(&self, record: PerformanceRecord) -> anyhow::Result<()>;
}

/// In-memory history store for tests and embedding.
#[derive(Debug, Default)]
pub struct InMemoryHistoryStore {
    inner: RwLock<Vec<PerformanceRecord>>,
}

impl InMemoryHistoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.inner.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl HistoryStore for InMemoryHistoryStore {
    async fn load(&self, user_id: &str, task_type: TaskType) -> anyhow::Result<Vec<PerformanceRecord>> {
        let mut records: Vec<PerformanceRecord> = self
            .inner
            .read()
            .unwrap()
            .iter()
            .filter(|r| r.user_id == user_id && r.task_type == task_type)
            .cloned()
            .collect();
        records.sort_by(|a, b| b.recorded_at.cmp(&a.recorded_at));
        Ok(records)
    }

    async fn append(&self, record: PerformanceRecord) -> anyhow::Result<()> {
        self.inner.write().unwrap().push(record);
        Ok(())
    }
}

/// Aggregated view of one model's history.
#[derive(Debug, Clone, Default)]
pub struct ModelStats {
    pub uses: usize,
    pub successes: usize,
    rated: usize,
    rating_total: f64,
    latency_total: f64,
    cost_total: f64,
}

impl ModelStats {
    fn add(&mut self, record: &PerformanceRecord) {
        self.uses += 1;
        if record.success {
            self.successes += 1;
        }
        if let Some(rating) = record.user_rating {
            self.rated += 1;
            self.rating_total += f64::from(rating.clamp(1, 5));
        }
        self.latency_total += record.latency_ms;
        self.cost_total += record.cost_usd;
    }

    pub fn success_rate(&self) -> f64 {
        if self.uses == 0 {
            0.0
        } else {
            self.successes as f64 / self.uses as f64
        }
    }

    /// Average explicit rating; neutral 3.0 when nothing was rated.
    pub fn avg_rating(&self) -> f64 {
        if self.rated == 0 {
            3.0
        } else {
            self.rating_total / self.rated as f64
        }
    }

    pub fn avg_latency_ms(&self) -> f64 {
        if self.uses == 0 {
            0.0
        } else {
            self.latency_total / self.uses as f64
        }
    }

    pub fn avg_cost_usd(&self) -> f64 {
        if self.uses == 0 {
            0.0
        } else {
            self.cost_total / self.uses as f64
        }
    }
}

/// Aggregate records per (provider, model).
pub fn aggregate_by_model(records: &[PerformanceRecord]) -> HashMap<(Provider, String), ModelStats> {
    let mut stats: HashMap<(Provider, String), ModelStats> = HashMap::new();
    for record in records {
        stats
            .entry((record.provider, record.model.clone()))
            .or_default()
            .add(record);
    }
    stats
}
