use serde::{Deserialize, Serialize};

/// Sub-score weights for the composite score. Expected to sum to 1.0.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ScoringWeights {
    pub cost: f64,
    pub latency: f64,
    pub task_fit: f64,
}

impl ScoringWeights {
    /// Balanced mode: task fit leads, cost second, latency third.
    pub fn balanced() -> Self {
        Self { cost: 0.35, latency: 0.25, task_fit: 0.40 }
    }

    /// Cost-first mode: cost dominates.
    pub fn cost_first() -> Self {
        Self { cost: 0.70, latency: 0.10, task_fit: 0.20 }
    }
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self::balanced()
    }
}

/// Engine-wide tuning knobs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptimizerConfig {
    pub weights: ScoringWeights,
    /// Target fallback-chain length, primary included.
    pub fallback_depth: usize,
    /// Upper bound on the personalization nudge, as a fraction of the score.
    pub personalization_cap: f64,
    /// Scores closer than this are considered tied.
    pub score_epsilon: f64,
    /// History records newer than this many days feed personalization.
    pub history_window_days: i64,
    /// At most this many history records are aggregated per call.
    pub history_limit: usize,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            weights: ScoringWeights::balanced(),
            fallback_depth: 3,
            personalization_cap: 0.10,
            score_epsilon: 1e-6,
            history_window_days: 30,
            history_limit: 100,
        }
    }
}
