use guardian_core::types::{Capabilities, Provider, SpeedClass};
use serde::{Deserialize, Serialize};

/// Static descriptor of one (provider, model) pair. Reference data only,
/// never mutated after catalog construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelCatalogEntry {
    pub provider: Provider,
    pub model: String,
    pub display_name: String,
    pub context_window: u64,
    pub capabilities: Capabilities,
    pub speed: SpeedClass,
    /// USD per million input tokens.
    pub input_cost_per_million: f64,
    /// USD per million output tokens.
    pub output_cost_per_million: f64,
    /// Baseline quality across tasks, 0..=1.
    pub baseline_quality: f64,
    /// Baseline reliability, 0..=1.
    pub reliability: f64,
}
