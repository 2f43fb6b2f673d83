use guardian_core::error::{GuardianError, Result};
use guardian_core::types::{Capabilities, Provider, QualityTier, TaskType};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Reference to one catalog model.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ModelRef {
    pub provider: Provider,
    pub model: String,
}

impl ModelRef {
    pub fn new(provider: Provider, model: impl Into<String>) -> Self {
        Self { provider, model: model.into() }
    }
}

impl fmt::Display for ModelRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.provider, self.model)
    }
}

/// Caller-supplied task profile. Built per request, never persisted here.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskRequirements {
    pub task_type: TaskType,
    pub estimated_tokens: u64,
    pub requires_vision: bool,
    pub requires_function_calling: bool,
    pub requires_streaming: bool,
    /// Hard ceiling: candidates estimated slower than this are excluded.
    pub max_latency_ms: Option<f64>,
    /// Hard ceiling: candidates estimated dearer than this are excluded.
    pub max_cost_usd: Option<f64>,
    pub min_quality: QualityTier,
}

impl TaskRequirements {
    pub fn new(task_type: TaskType) -> Self {
        Self {
            task_type,
            estimated_tokens: 1000,
            requires_vision: false,
            requires_function_calling: false,
            requires_streaming: false,
            max_latency_ms: None,
            max_cost_usd: None,
            min_quality: QualityTier::default(),
        }
    }

    pub fn with_tokens(mut self, tokens: u64) -> Self {
        self.estimated_tokens = tokens;
        self
    }

    pub fn with_vision(mut self) -> Self {
        self.requires_vision = true;
        self
    }

    pub fn with_function_calling(mut self) -> Self {
        self.requires_function_calling = true;
        self
    }

    pub fn with_streaming(mut self) -> Self {
        self.requires_streaming = true;
        self
    }

    pub fn with_max_latency_ms(mut self, ms: f64) -> Self {
        self.max_latency_ms = Some(ms);
        self
    }

    pub fn with_max_cost(mut self, usd: f64) -> Self {
        self.max_cost_usd = Some(usd);
        self
    }

    pub fn with_min_quality(mut self, tier: QualityTier) -> Self {
        self.min_quality = tier;
        self
    }

    pub fn required_capabilities(&self) -> Capabilities {
        Capabilities::new(
            self.requires_vision,
            self.requires_function_calling,
            self.requires_streaming,
        )
    }

    /// Token estimate floored to 1 so cost estimation never degenerates.
    pub fn effective_tokens(&self) -> u64 {
        self.estimated_tokens.max(1)
    }

    pub fn validate(&self) -> Result<()> {
        if let Some(ms) = self.max_latency_ms {
            if !ms.is_finite() || ms <= 0.0 {
                return Err(GuardianError::InvalidRequirements(format!(
                    "maxLatency must be a positive number of milliseconds, got {ms}"
                )));
            }
        }
        if let Some(usd) = self.max_cost_usd {
            if !usd.is_finite() || usd <= 0.0 {
                return Err(GuardianError::InvalidRequirements(format!(
                    "maxCost must be a positive USD amount, got {usd}"
                )));
            }
        }
        Ok(())
    }
}

/// One ranked candidate with its estimates and justification.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelRecommendation {
    pub provider: Provider,
    pub model: String,
    /// Composite score, 0..=1.
    pub score: f64,
    /// Task-fit quality, 0..=1.
    pub task_fit: f64,
    pub estimated_cost: f64,
    pub estimated_latency_ms: f64,
    pub reasons: Vec<String>,
}

impl ModelRecommendation {
    pub fn model_ref(&self) -> ModelRef {
        ModelRef::new(self.provider, self.model.clone())
    }
}

/// Ordered retry sequence, primary first. Providers repeat only once every
/// other eligible provider is already present.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FallbackChain {
    pub models: Vec<ModelRef>,
}

impl FallbackChain {
    pub fn primary(&self) -> &ModelRef {
        &self.models[0]
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    pub fn providers(&self) -> Vec<Provider> {
        self.models.iter().map(|m| m.provider).collect()
    }
}

/// What the caller wants the ranking to favor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptimizeMode {
    Balanced,
    Cost,
    Quality,
    Speed,
}

impl Default for OptimizeMode {
    fn default() -> Self {
        OptimizeMode::Balanced
    }
}
