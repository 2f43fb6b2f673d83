//! Composite scoring and deterministic ordering.
//!
//! Cost and latency sub-scores are normalized against the candidate set's
//! own min/max, so a score always reads "how good among what is eligible
//! right now", not against the whole catalog.

use crate::filter::Candidate;
use crate::types::ModelRecommendation;
use guardian_catalog::ModelCatalog;
use guardian_core::config::ScoringWeights;
use guardian_core::types::TaskType;

/// A candidate with its sub-scores, composite score and reasons.
#[derive(Debug, Clone)]
pub struct ScoredCandidate<'a> {
    pub candidate: Candidate<'a>,
    pub cost_score: f64,
    pub latency_score: f64,
    pub score: f64,
    pub reasons: Vec<String>,
}

impl ScoredCandidate<'_> {
    pub fn into_recommendation(self) -> ModelRecommendation {
        ModelRecommendation {
            provider: self.candidate.entry.provider,
            model: self.candidate.entry.model.clone(),
            score: self.score,
            task_fit: self.candidate.task_fit,
            estimated_cost: self.candidate.estimated_cost,
            estimated_latency_ms: self.candidate.estimated_latency_ms,
            reasons: self.reasons,
        }
    }
}

/// A sub-score's reason makes the cut when its weighted contribution is
/// within this fraction of the largest contribution.
const REASON_CONTRIBUTION_CUTOFF: f64 = 0.8;

fn normalized(value: f64, min: f64, max: f64) -> f64 {
    if (max - min).abs() < f64::EPSILON {
        1.0
    } else {
        (max - value) / (max - min)
    }
}

/// Score every candidate against the set it competes with.
pub fn score_candidates<'a>(
    candidates: Vec<Candidate<'a>>,
    catalog: &ModelCatalog,
    task_type: TaskType,
    weights: &ScoringWeights,
) -> Vec<ScoredCandidate<'a>> {
    if candidates.is_empty() {
        return Vec::new();
    }

    let min_cost = candidates.iter().map(|c| c.estimated_cost).fold(f64::INFINITY, f64::min);
    let max_cost = candidates.iter().map(|c| c.estimated_cost).fold(f64::NEG_INFINITY, f64::max);
    let min_latency =
        candidates.iter().map(|c| c.estimated_latency_ms).fold(f64::INFINITY, f64::min);
    let max_latency =
        candidates.iter().map(|c| c.estimated_latency_ms).fold(f64::NEG_INFINITY, f64::max);

    candidates
        .into_iter()
        .map(|candidate| {
            let cost_score = normalized(candidate.estimated_cost, min_cost, max_cost);
            let latency_score =
                normalized(candidate.estimated_latency_ms, min_latency, max_latency);
            let score = (weights.cost * cost_score
                + weights.latency * latency_score
                + weights.task_fit * candidate.task_fit)
                .clamp(0.0, 1.0);

            let contributions = [
                weights.task_fit * candidate.task_fit,
                weights.cost * cost_score,
                weights.latency * latency_score,
            ];
            let top = contributions.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            let cutoff = top * REASON_CONTRIBUTION_CUTOFF;

            let mut reasons = Vec::new();
            if contributions[0] >= cutoff {
                reasons.push(format!("Task fit: {:.0}%", candidate.task_fit * 100.0));
            }
            if contributions[1] >= cutoff {
                if candidate.estimated_cost <= min_cost {
                    reasons.push(format!(
                        "Lowest cost among eligible models at ${:.4} estimated",
                        candidate.estimated_cost
                    ));
                } else {
                    reasons.push(format!("Cost efficiency: {:.0}%", cost_score * 100.0));
                }
            }
            if contributions[2] >= cutoff {
                if candidate.estimated_latency_ms <= min_latency {
                    reasons.push(format!(
                        "Fastest expected response at {:.0} ms",
                        candidate.estimated_latency_ms
                    ));
                } else {
                    reasons.push(format!("Latency fitness: {:.0}%", latency_score * 100.0));
                }
            }
            if catalog.is_preferred(task_type, &candidate.entry.model) {
                reasons.push(format!("Recommended for {task_type} tasks"));
            }

            ScoredCandidate { candidate, cost_score, latency_score, score, reasons }
        })
        .collect()
}

/// Quantize a score so values within epsilon of each other compare equal.
pub fn quantize(score: f64, epsilon: f64) -> i64 {
    (score / epsilon).round() as i64
}

/// Rank by score, ties broken by lower cost, lower latency, catalog order.
pub fn sort_by_score(scored: &mut [ScoredCandidate<'_>], epsilon: f64) {
    scored.sort_by(|a, b| {
        quantize(b.score, epsilon)
            .cmp(&quantize(a.score, epsilon))
            .then_with(|| a.candidate.estimated_cost.total_cmp(&b.candidate.estimated_cost))
            .then_with(|| {
                a.candidate.estimated_latency_ms.total_cmp(&b.candidate.estimated_latency_ms)
            })
            .then_with(|| a.candidate.index.cmp(&b.candidate.index))
    });
}

/// Cheapest first; score breaks ties. Used by cost-first optimization.
pub fn sort_by_cost(scored: &mut [ScoredCandidate<'_>], epsilon: f64) {
    scored.sort_by(|a, b| {
        a.candidate
            .estimated_cost
            .total_cmp(&b.candidate.estimated_cost)
            .then_with(|| quantize(b.score, epsilon).cmp(&quantize(a.score, epsilon)))
            .then_with(|| a.candidate.index.cmp(&b.candidate.index))
    });
}

/// Fallback-chain preference: score, then reliability, then cost, then
/// catalog order.
pub fn sort_for_fallback(scored: &mut [ScoredCandidate<'_>], epsilon: f64) {
    scored.sort_by(|a, b| {
        quantize(b.score, epsilon)
            .cmp(&quantize(a.score, epsilon))
            .then_with(|| b.candidate.entry.reliability.total_cmp(&a.candidate.entry.reliability))
            .then_with(|| a.candidate.estimated_cost.total_cmp(&b.candidate.estimated_cost))
            .then_with(|| a.candidate.index.cmp(&b.candidate.index))
    });
}
