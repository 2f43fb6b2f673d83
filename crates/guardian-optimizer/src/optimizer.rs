//! The optimizer: the public operations callers use.
//!
//! Every operation is a pure function of (catalog, requirements, available
//! providers, history) except `track_performance`, the only mutator.

use crate::filter::filter_candidates;
use crate::history::{aggregate_by_model, HistoryStore, ModelStats, PerformanceObservation, PerformanceRecord};
use crate::scorer::{quantize, score_candidates, sort_by_cost, sort_by_score, sort_for_fallback};
use crate::types::{FallbackChain, ModelRecommendation, ModelRef, TaskRequirements};
use chrono::{Duration, Utc};
use guardian_catalog::{ModelCatalog, MODEL_CATALOG};
use guardian_core::config::{OptimizerConfig, ScoringWeights};
use guardian_core::error::{GuardianError, Result};
use guardian_core::types::{Provider, QualityTier, TaskType};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

pub struct Optimizer {
    catalog: Arc<ModelCatalog>,
    history: Arc<dyn HistoryStore>,
    config: OptimizerConfig,
}

impl Optimizer {
    pub fn new(history: Arc<dyn HistoryStore>) -> Self {
        Self {
            catalog: Arc::new(MODEL_CATALOG.clone()),
            history,
            config: OptimizerConfig::default(),
        }
    }

    pub fn with_catalog(mut self, catalog: Arc<ModelCatalog>) -> Self {
        self.catalog = catalog;
        self
    }

    pub fn with_config(mut self, config: OptimizerConfig) -> Self {
        self.config = config;
        self
    }

    pub fn catalog(&self) -> &ModelCatalog {
        &self.catalog
    }

    pub fn config(&self) -> &OptimizerConfig {
        &self.config
    }

    /// Balanced ranking: filter, score, nudge by the caller's history for
    /// this task type, sort. Returns the full ranked list; callers truncate.
    pub async fn select_optimal_model(
        &self,
        requirements: &TaskRequirements,
        user_id: &str,
        available: &[Provider],
    ) -> Result<Vec<ModelRecommendation>> {
        requirements.validate()?;

        let report = filter_candidates(&self.catalog, requirements, available);
        let mut scored = score_candidates(
            report.candidates,
            &self.catalog,
            requirements.task_type,
            &self.config.weights,
        );

        let stats = self.load_stats(user_id, requirements.task_type).await;
        for s in &mut scored {
            let key = (s.candidate.entry.provider, s.candidate.entry.model.clone());
            if let Some(model_stats) = stats.get(&key) {
                let nudge = self.personalization_nudge(model_stats);
                if nudge != 0.0 {
                    s.score = (s.score * (1.0 + nudge)).clamp(0.0, 1.0);
                    s.reasons.push(history_reason(model_stats, requirements.task_type, nudge));
                }
            }
        }

        sort_by_score(&mut scored, self.config.score_epsilon);
        Ok(scored.into_iter().map(|s| s.into_recommendation()).collect())
    }

    /// Cheapest-first ranking with the quality floor forced up to at least
    /// `min_quality`. Output is ordered by non-decreasing estimated cost.
    pub fn optimize_for_cost(
        &self,
        requirements: &TaskRequirements,
        min_quality: QualityTier,
        available: &[Provider],
    ) -> Result<Vec<ModelRecommendation>> {
        requirements.validate()?;

        let floored = requirements
            .clone()
            .with_min_quality(requirements.min_quality.max(min_quality));
        let report = filter_candidates(&self.catalog, &floored, available);
        let mut scored = score_candidates(
            report.candidates,
            &self.catalog,
            floored.task_type,
            &ScoringWeights::cost_first(),
        );

        sort_by_cost(&mut scored, self.config.score_epsilon);
        Ok(scored.into_iter().map(|s| s.into_recommendation()).collect())
    }

    /// What has worked for this user on this task type before. Reads history
    /// only; no fresh requirements needed. Degrades to empty when the
    /// history store is unreachable.
    pub async fn personalized_recommendations(
        &self,
        user_id: &str,
        task_type: TaskType,
    ) -> Vec<ModelRecommendation> {
        let records = match self.history.load(user_id, task_type).await {
            Ok(records) => records,
            Err(error) => {
                tracing::warn!(%error, user_id, "history unavailable; no personalized view");
                return Vec::new();
            }
        };

        let cutoff = Utc::now() - Duration::days(self.config.history_window_days);
        let recent: Vec<PerformanceRecord> = records
            .into_iter()
            .filter(|r| r.success && r.recorded_at >= cutoff)
            .take(self.config.history_limit)
            .collect();

        let mut recommendations: Vec<ModelRecommendation> = aggregate_by_model(&recent)
            .into_iter()
            .map(|((provider, model), stats)| {
                let confidence = ((stats.uses as f64 / 10.0).min(1.0)
                    * (stats.avg_rating() / 5.0))
                    .clamp(0.0, 1.0);
                let task_fit = self.catalog.task_quality(task_type, &model);
                ModelRecommendation {
                    provider,
                    model,
                    score: confidence,
                    task_fit,
                    estimated_cost: stats.avg_cost_usd(),
                    estimated_latency_ms: stats.avg_latency_ms(),
                    reasons: vec![format!(
                        "Used {} times for {} with a {:.1}/5 average rating",
                        stats.uses,
                        task_type,
                        stats.avg_rating()
                    )],
                }
            })
            .collect();

        recommendations.sort_by(|a, b| {
            quantize(b.score, self.config.score_epsilon)
                .cmp(&quantize(a.score, self.config.score_epsilon))
                .then_with(|| a.provider.cmp(&b.provider))
                .then_with(|| a.model.cmp(&b.model))
        });
        recommendations
    }

    /// Ordered retry sequence starting at `primary`. Walks the scored
    /// candidates preferring providers not yet in the chain; same-provider
    /// entries join only once every other provider is exhausted.
    pub fn build_fallback_chain(
        &self,
        primary: &ModelRef,
        requirements: &TaskRequirements,
        available: &[Provider],
    ) -> Result<FallbackChain> {
        requirements.validate()?;
        if self.catalog.get(primary.provider, &primary.model).is_none() {
            return Err(GuardianError::UnknownModel {
                provider: primary.provider.to_string(),
                model: primary.model.clone(),
            });
        }

        let report = filter_candidates(&self.catalog, requirements, available);
        let mut scored = score_candidates(
            report.candidates,
            &self.catalog,
            requirements.task_type,
            &self.config.weights,
        );
        sort_for_fallback(&mut scored, self.config.score_epsilon);

        let mut models = vec![primary.clone()];
        let mut used_providers: HashSet<Provider> = HashSet::from([primary.provider]);
        let mut remaining: Vec<ModelRef> = scored
            .iter()
            .map(|s| ModelRef::new(s.candidate.entry.provider, s.candidate.entry.model.clone()))
            .filter(|m| m != primary)
            .collect();

        while models.len() < self.config.fallback_depth && !remaining.is_empty() {
            let position = remaining
                .iter()
                .position(|m| !used_providers.contains(&m.provider))
                .unwrap_or(0);
            let next = remaining.remove(position);
            used_providers.insert(next.provider);
            models.push(next);
        }

        Ok(FallbackChain { models })
    }

    /// Append one observation. The only mutator; history is append-only.
    pub async fn track_performance(
        &self,
        user_id: &str,
        model: &ModelRef,
        task_type: TaskType,
        observation: PerformanceObservation,
    ) -> Result<()> {
        if !observation.latency_ms.is_finite() || observation.latency_ms < 0.0 {
            return Err(GuardianError::InvalidRequirements(format!(
                "latency must be a non-negative number of milliseconds, got {}",
                observation.latency_ms
            )));
        }
        if !observation.cost_usd.is_finite() || observation.cost_usd < 0.0 {
            return Err(GuardianError::InvalidRequirements(format!(
                "cost must be a non-negative USD amount, got {}",
                observation.cost_usd
            )));
        }

        let record = PerformanceRecord::new(
            user_id,
            model.provider,
            model.model.clone(),
            task_type,
            observation,
        );
        self.history
            .append(record)
            .await
            .map_err(|e| GuardianError::HistoryUnavailable(e.to_string()))
    }

    /// History aggregation for the nudge; empty on store failure so
    /// personalization degrades instead of failing the request.
    async fn load_stats(
        &self,
        user_id: &str,
        task_type: TaskType,
    ) -> HashMap<(Provider, String), ModelStats> {
        match self.history.load(user_id, task_type).await {
            Ok(records) => {
                let cutoff = Utc::now() - Duration::days(self.config.history_window_days);
                let recent: Vec<PerformanceRecord> = records
                    .into_iter()
                    .filter(|r| r.recorded_at >= cutoff)
                    .take(self.config.history_limit)
                    .collect();
                aggregate_by_model(&recent)
            }
            Err(error) => {
                tracing::warn!(%error, user_id, "history unavailable; skipping personalization");
                HashMap::new()
            }
        }
    }

    /// Bounded nudge in [-cap, +cap]: success rate carries most of the
    /// signal, explicit ratings the rest, both discounted for small samples.
    fn personalization_nudge(&self, stats: &ModelStats) -> f64 {
        if stats.uses == 0 {
            return 0.0;
        }
        let sample_weight = (stats.uses as f64 / 10.0).min(1.0);
        let success_signal = stats.success_rate() * 2.0 - 1.0;
        let rating_signal = (stats.avg_rating() - 3.0) / 2.0;
        let signal = (0.6 * success_signal + 0.4 * rating_signal).clamp(-1.0, 1.0);
        self.config.personalization_cap * sample_weight * signal
    }
}

fn history_reason(stats: &ModelStats, task_type: TaskType, nudge: f64) -> String {
    if nudge > 0.0 {
        format!(
            "Strong history for {} tasks: {} of {} recent runs succeeded",
            task_type, stats.successes, stats.uses
        )
    } else {
        format!(
            "Weak history for {} tasks: {} of {} recent runs succeeded",
            task_type, stats.successes, stats.uses
        )
    }
}
