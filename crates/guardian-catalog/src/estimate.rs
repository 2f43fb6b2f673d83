//! Cost and latency estimation against catalog pricing.

use crate::entry::ModelCatalogEntry;

/// Assumed input share of the token estimate; the rest is output.
const INPUT_TOKEN_SHARE: f64 = 0.7;

/// Per-token generation time in milliseconds on top of the base latency.
const PER_TOKEN_LATENCY_MS: f64 = 0.5;

/// Estimated USD cost of a request of `tokens` total tokens.
pub fn estimate_cost(entry: &ModelCatalogEntry, tokens: u64) -> f64 {
    let tokens = tokens.max(1) as f64;
    let input = tokens * INPUT_TOKEN_SHARE;
    let output = tokens * (1.0 - INPUT_TOKEN_SHARE);
    (input * entry.input_cost_per_million + output * entry.output_cost_per_million) / 1_000_000.0
}

/// Estimated end-to-end latency in milliseconds.
pub fn estimate_latency_ms(entry: &ModelCatalogEntry, tokens: u64) -> f64 {
    entry.speed.base_latency_ms() + tokens.max(1) as f64 * PER_TOKEN_LATENCY_MS
}
