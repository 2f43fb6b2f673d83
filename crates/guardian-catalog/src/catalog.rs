//! Default catalog contents and lookup API.

use crate::entry::ModelCatalogEntry;
use guardian_core::types::{Capabilities, Provider, SpeedClass, TaskType};
use std::collections::HashMap;

/// Per-task preferences: models recommended for the task and their
/// task-specific quality scores.
#[derive(Debug, Clone, Default)]
pub struct TaskProfile {
    pub preferred: Vec<String>,
    pub quality: HashMap<String, f64>,
}

/// Read-only model catalog. Entry order is stable and meaningful: it is the
/// final tie-break for ranking, so identical inputs always rank identically.
#[derive(Debug, Clone)]
pub struct ModelCatalog {
    entries: Vec<ModelCatalogEntry>,
    task_profiles: HashMap<TaskType, TaskProfile>,
}

/// Quality assumed for models absent from a task's profile.
pub const DEFAULT_TASK_QUALITY: f64 = 0.7;

impl ModelCatalog {
    pub fn new(
        entries: Vec<ModelCatalogEntry>,
        task_profiles: HashMap<TaskType, TaskProfile>,
    ) -> Self {
        Self { entries, task_profiles }
    }

    /// All entries in stable catalog order.
    pub fn entries(&self) -> &[ModelCatalogEntry] {
        &self.entries
    }

    /// All entries for one provider; empty if the provider has none.
    pub fn models_for_provider(&self, provider: Provider) -> Vec<&ModelCatalogEntry> {
        self.entries.iter().filter(|e| e.provider == provider).collect()
    }

    pub fn get(&self, provider: Provider, model: &str) -> Option<&ModelCatalogEntry> {
        self.entries.iter().find(|e| e.provider == provider && e.model == model)
    }

    /// Position in catalog order, used as the deterministic last tie-break.
    pub fn index_of(&self, provider: Provider, model: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.provider == provider && e.model == model)
    }

    /// Task-specific quality for a model, defaulting when unlisted.
    pub fn task_quality(&self, task: TaskType, model: &str) -> f64 {
        self.task_profiles
            .get(&task)
            .and_then(|p| p.quality.get(model).copied())
            .unwrap_or(DEFAULT_TASK_QUALITY)
    }

    /// Whether the model is on the task's preferred list.
    pub fn is_preferred(&self, task: TaskType, model: &str) -> bool {
        self.task_profiles
            .get(&task)
            .map(|p| p.preferred.iter().any(|m| m == model))
            .unwrap_or(false)
    }
}

fn entry(
    provider: Provider,
    model: &str,
    display_name: &str,
    context_window: u64,
    caps: (bool, bool, bool),
    speed: SpeedClass,
    prices: (f64, f64),
    baseline_quality: f64,
    reliability: f64,
) -> ModelCatalogEntry {
    ModelCatalogEntry {
        provider,
        model: model.to_string(),
        display_name: display_name.to_string(),
        context_window,
        capabilities: Capabilities::new(caps.0, caps.1, caps.2),
        speed,
        input_cost_per_million: prices.0,
        output_cost_per_million: prices.1,
        baseline_quality,
        reliability,
    }
}

fn quality(pairs: &[(&str, f64)]) -> HashMap<String, f64> {
    pairs.iter().map(|(m, q)| (m.to_string(), *q)).collect()
}

fn preferred(models: &[&str]) -> Vec<String> {
    models.iter().map(|m| m.to_string()).collect()
}

/// Default catalog: current pricing and capability data for the supported
/// providers. Refreshed only by a deploy.
pub fn default_catalog() -> ModelCatalog {
    let entries = vec![
        // OpenAI
        entry(
            Provider::OpenAi, "gpt-4o", "GPT-4o", 128_000,
            (true, true, true), SpeedClass::Fast, (2.5, 10.0), 0.95, 0.99,
        ),
        entry(
            Provider::OpenAi, "gpt-4o-mini", "GPT-4o Mini", 128_000,
            (true, true, true), SpeedClass::Fast, (0.15, 0.6), 0.85, 0.99,
        ),
        entry(
            Provider::OpenAi, "gpt-4-turbo", "GPT-4 Turbo", 128_000,
            (true, true, true), SpeedClass::Medium, (10.0, 30.0), 0.90, 0.98,
        ),
        entry(
            Provider::OpenAi, "gpt-3.5-turbo", "GPT-3.5 Turbo", 16_385,
            (false, true, true), SpeedClass::Fast, (0.5, 1.5), 0.75, 0.99,
        ),
        // Claude
        entry(
            Provider::Claude, "claude-3.5-sonnet", "Claude 3.5 Sonnet", 200_000,
            (true, true, true), SpeedClass::Fast, (3.0, 15.0), 0.95, 0.99,
        ),
        entry(
            Provider::Claude, "claude-3-opus", "Claude 3 Opus", 200_000,
            (true, true, true), SpeedClass::Medium, (15.0, 75.0), 0.98, 0.98,
        ),
        entry(
            Provider::Claude, "claude-3-haiku", "Claude 3 Haiku", 200_000,
            (true, true, true), SpeedClass::Fast, (0.25, 1.25), 0.85, 0.99,
        ),
        // Gemini
        entry(
            Provider::Gemini, "gemini-1.5-pro", "Gemini 1.5 Pro", 2_000_000,
            (true, true, true), SpeedClass::Medium, (1.25, 5.0), 0.90, 0.97,
        ),
        entry(
            Provider::Gemini, "gemini-1.5-flash", "Gemini 1.5 Flash", 1_000_000,
            (true, true, true), SpeedClass::Fast, (0.075, 0.3), 0.82, 0.97,
        ),
        // Grok
        entry(
            Provider::Grok, "grok-2", "Grok 2", 32_768,
            (false, false, true), SpeedClass::Medium, (5.0, 15.0), 0.80, 0.95,
        ),
        // Perplexity
        entry(
            Provider::Perplexity, "llama-3.1-sonar-large", "Llama 3.1 Sonar Large", 127_072,
            (false, false, true), SpeedClass::Fast, (1.0, 1.0), 0.78, 0.96,
        ),
    ];

    let mut task_profiles = HashMap::new();
    task_profiles.insert(
        TaskType::Code,
        TaskProfile {
            preferred: preferred(&["gpt-4o", "claude-3.5-sonnet", "gpt-4-turbo"]),
            quality: quality(&[
                ("gpt-4o", 0.95),
                ("claude-3.5-sonnet", 0.95),
                ("gpt-4-turbo", 0.90),
                ("gpt-4o-mini", 0.80),
                ("claude-3-haiku", 0.75),
                ("gpt-3.5-turbo", 0.70),
            ]),
        },
    );
    task_profiles.insert(
        TaskType::Creative,
        TaskProfile {
            preferred: preferred(&["claude-3-opus", "gpt-4o", "claude-3.5-sonnet"]),
            quality: quality(&[
                ("claude-3-opus", 0.98),
                ("gpt-4o", 0.95),
                ("claude-3.5-sonnet", 0.93),
                ("gemini-1.5-pro", 0.90),
            ]),
        },
    );
    task_profiles.insert(
        TaskType::Analysis,
        TaskProfile {
            preferred: preferred(&["claude-3.5-sonnet", "gpt-4o", "gemini-1.5-pro"]),
            quality: quality(&[
                ("claude-3.5-sonnet", 0.95),
                ("claude-3-opus", 0.95),
                ("gpt-4o", 0.93),
                ("gemini-1.5-pro", 0.90),
            ]),
        },
    );
    task_profiles.insert(
        TaskType::Chat,
        TaskProfile {
            preferred: preferred(&["gpt-4o-mini", "claude-3-haiku", "gemini-1.5-flash"]),
            quality: quality(&[
                ("gpt-4o-mini", 0.85),
                ("claude-3-haiku", 0.85),
                ("gemini-1.5-flash", 0.80),
                ("gpt-3.5-turbo", 0.75),
            ]),
        },
    );
    task_profiles.insert(
        TaskType::Summarization,
        TaskProfile {
            preferred: preferred(&["gpt-4o-mini", "claude-3-haiku", "gemini-1.5-flash"]),
            quality: quality(&[
                ("gpt-4o-mini", 0.90),
                ("claude-3-haiku", 0.88),
                ("gemini-1.5-flash", 0.85),
            ]),
        },
    );
    task_profiles.insert(
        TaskType::Translation,
        TaskProfile {
            preferred: preferred(&["gpt-4o", "claude-3.5-sonnet", "gemini-1.5-pro"]),
            quality: quality(&[
                ("gpt-4o", 0.95),
                ("claude-3.5-sonnet", 0.93),
                ("gemini-1.5-pro", 0.90),
            ]),
        },
    );

    ModelCatalog::new(entries, task_profiles)
}

/// The default catalog instance, built once at first use.
pub static MODEL_CATALOG: std::sync::LazyLock<ModelCatalog> =
    std::sync::LazyLock::new(default_catalog);
