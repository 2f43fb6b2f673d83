//! Candidate filtering: reduce the catalog to entries usable for a request.
//!
//! Hard requirements exclude candidates outright; nothing here is merely
//! down-ranked. An empty result is a normal outcome, not a fault.

use crate::types::TaskRequirements;
use guardian_catalog::entry::ModelCatalogEntry;
use guardian_catalog::estimate::{estimate_cost, estimate_latency_ms};
use guardian_catalog::ModelCatalog;
use guardian_core::types::Provider;
use std::collections::BTreeMap;

/// A catalog entry that survived filtering, with its per-request estimates.
#[derive(Debug, Clone)]
pub struct Candidate<'a> {
    pub entry: &'a ModelCatalogEntry,
    /// Position in catalog order; the deterministic last tie-break.
    pub index: usize,
    pub estimated_cost: f64,
    pub estimated_latency_ms: f64,
    /// Task-specific quality, 0..=1.
    pub task_fit: f64,
}

/// Filter output: survivors plus per-constraint rejection counts, so the
/// orchestration layer can explain an empty result.
#[derive(Debug)]
pub struct FilterReport<'a> {
    pub candidates: Vec<Candidate<'a>>,
    pub rejections: BTreeMap<String, usize>,
    pub total_entries: usize,
}

/// Rejection label for entries the caller simply has no credential for.
const NO_CREDENTIAL: &str = "no credential for the provider";

impl FilterReport<'_> {
    /// Human-readable explanation when nothing survived. Missing credentials
    /// are only reported when no other constraint rejected anything; the
    /// caller already knows which providers it has keys for.
    pub fn explanation(&self) -> Option<String> {
        if !self.candidates.is_empty() {
            return None;
        }
        let substantive = self
            .rejections
            .iter()
            .filter(|(reason, _)| reason.as_str() != NO_CREDENTIAL)
            .max_by_key(|(_, count)| **count);
        match substantive {
            Some((reason, count)) => {
                Some(format!("No eligible model: {reason} ({count} excluded)"))
            }
            None => Some("No eligible model: no credential for any catalog provider".to_string()),
        }
    }
}

/// Apply the hard constraints in order: provider availability, capability
/// superset, quality floor, context window, latency ceiling, cost ceiling.
/// Each rejected entry is counted against the first constraint it failed.
pub fn filter_candidates<'a>(
    catalog: &'a ModelCatalog,
    requirements: &TaskRequirements,
    available: &[Provider],
) -> FilterReport<'a> {
    let tokens = requirements.effective_tokens();
    let required = requirements.required_capabilities();
    let floor = requirements.min_quality.floor();

    let mut candidates = Vec::new();
    let mut rejections: BTreeMap<String, usize> = BTreeMap::new();

    for (index, entry) in catalog.entries().iter().enumerate() {
        let rejected = if !available.contains(&entry.provider) {
            Some(NO_CREDENTIAL.to_string())
        } else if let Some(capability) = entry.capabilities.missing(&required) {
            Some(format!("required capability {capability}"))
        } else if entry.baseline_quality < floor {
            Some(format!("baseline quality below the {} floor", requirements.min_quality))
        } else if tokens > entry.context_window {
            Some("request exceeds the context window".to_string())
        } else {
            None
        };
        if let Some(reason) = rejected {
            *rejections.entry(reason).or_insert(0) += 1;
            continue;
        }

        let estimated_latency_ms = estimate_latency_ms(entry, tokens);
        if requirements.max_latency_ms.is_some_and(|max| estimated_latency_ms > max) {
            *rejections.entry("estimated latency above the ceiling".to_string()).or_insert(0) += 1;
            continue;
        }
        let estimated_cost = estimate_cost(entry, tokens);
        if requirements.max_cost_usd.is_some_and(|max| estimated_cost > max) {
            *rejections.entry("estimated cost above the ceiling".to_string()).or_insert(0) += 1;
            continue;
        }

        candidates.push(Candidate {
            entry,
            index,
            estimated_cost,
            estimated_latency_ms,
            task_fit: catalog.task_quality(requirements.task_type, &entry.model),
        });
    }

    FilterReport { candidates, rejections, total_entries: catalog.entries().len() }
}
