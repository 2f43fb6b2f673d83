//! Request/response facade: the composition the HTTP layer consumes.
//!
//! One call runs the full optimization flow (mode-aware ranking,
//! personalized view, fallback chains for the top picks, summary) so
//! transports stay thin.

use crate::filter::filter_candidates;
use crate::optimizer::Optimizer;
use crate::types::{FallbackChain, ModelRecommendation, ModelRef, OptimizeMode, TaskRequirements};
use guardian_core::error::Result;
use guardian_core::types::{Provider, QualityTier, TaskType};
use serde::{Deserialize, Serialize};

/// How many recommendations the response carries.
const MAX_RECOMMENDATIONS: usize = 5;

/// Fallback chains are built for this many top recommendations.
const FALLBACK_CHAIN_COUNT: usize = 3;

fn default_tokens() -> u64 {
    1000
}

/// One optimization request as the transport hands it over.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizeRequest {
    pub task_type: TaskType,
    #[serde(default = "default_tokens")]
    pub estimated_tokens: u64,
    #[serde(default)]
    pub requires_vision: bool,
    #[serde(default)]
    pub requires_function_calling: bool,
    #[serde(default)]
    pub requires_streaming: bool,
    #[serde(default)]
    pub max_latency_ms: Option<f64>,
    #[serde(default)]
    pub max_cost_usd: Option<f64>,
    #[serde(default)]
    pub min_quality: QualityTier,
    #[serde(default)]
    pub optimize_for: OptimizeMode,
}

impl OptimizeRequest {
    pub fn new(task_type: TaskType) -> Self {
        Self {
            task_type,
            estimated_tokens: default_tokens(),
            requires_vision: false,
            requires_function_calling: false,
            requires_streaming: false,
            max_latency_ms: None,
            max_cost_usd: None,
            min_quality: QualityTier::default(),
            optimize_for: OptimizeMode::default(),
        }
    }

    pub fn to_requirements(&self) -> TaskRequirements {
        TaskRequirements {
            task_type: self.task_type,
            estimated_tokens: self.estimated_tokens,
            requires_vision: self.requires_vision,
            requires_function_calling: self.requires_function_calling,
            requires_streaming: self.requires_streaming,
            max_latency_ms: self.max_latency_ms,
            max_cost_usd: self.max_cost_usd,
            min_quality: self.min_quality,
        }
    }
}

/// Headline numbers for the top recommendation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizeSummary {
    pub best_model: Option<ModelRef>,
    pub estimated_cost: f64,
    pub estimated_latency_ms: f64,
    pub confidence: f64,
}

/// Full optimization response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizeResponse {
    pub recommendations: Vec<ModelRecommendation>,
    pub personalized: Vec<ModelRecommendation>,
    pub fallback_chains: Vec<FallbackChain>,
    pub available_providers: Vec<Provider>,
    pub summary: OptimizeSummary,
    /// Set when nothing was eligible: why, for caller display.
    pub explanation: Option<String>,
}

impl Optimizer {
    /// Run the full flow for one request.
    pub async fn optimize(
        &self,
        request: &OptimizeRequest,
        user_id: &str,
        available: &[Provider],
    ) -> Result<OptimizeResponse> {
        let requirements = request.to_requirements();

        let mut recommendations = match request.optimize_for {
            OptimizeMode::Cost => {
                self.optimize_for_cost(&requirements, request.min_quality, available)?
            }
            _ => self.select_optimal_model(&requirements, user_id, available).await?,
        };

        // Quality-first and speed-first reorder the already-scored list;
        // the candidate set and reasons stay as scored.
        match request.optimize_for {
            OptimizeMode::Quality => {
                recommendations.sort_by(|a, b| b.task_fit.total_cmp(&a.task_fit));
            }
            OptimizeMode::Speed => {
                recommendations
                    .sort_by(|a, b| a.estimated_latency_ms.total_cmp(&b.estimated_latency_ms));
            }
            OptimizeMode::Balanced | OptimizeMode::Cost => {}
        }

        let explanation = if recommendations.is_empty() {
            filter_candidates(self.catalog(), &requirements, available).explanation()
        } else {
            None
        };

        let fallback_chains = recommendations
            .iter()
            .take(FALLBACK_CHAIN_COUNT)
            .map(|r| self.build_fallback_chain(&r.model_ref(), &requirements, available))
            .collect::<Result<Vec<FallbackChain>>>()?;

        let personalized =
            self.personalized_recommendations(user_id, requirements.task_type).await;

        let summary = match recommendations.first() {
            Some(best) => OptimizeSummary {
                best_model: Some(best.model_ref()),
                estimated_cost: best.estimated_cost,
                estimated_latency_ms: best.estimated_latency_ms,
                confidence: best.score,
            },
            None => OptimizeSummary {
                best_model: None,
                estimated_cost: 0.0,
                estimated_latency_ms: 0.0,
                confidence: 0.0,
            },
        };

        recommendations.truncate(MAX_RECOMMENDATIONS);

        Ok(OptimizeResponse {
            recommendations,
            personalized,
            fallback_chains,
            available_providers: available.to_vec(),
            summary,
            explanation,
        })
    }
}
