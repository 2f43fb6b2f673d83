use serde::{Deserialize, Serialize};
use std::fmt;

/// AI provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    OpenAi,
    Claude,
    Gemini,
    Grok,
    Perplexity,
}

impl Provider {
    pub const ALL: [Provider; 5] = [
        Provider::OpenAi,
        Provider::Claude,
        Provider::Gemini,
        Provider::Grok,
        Provider::Perplexity,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::OpenAi => "openai",
            Provider::Claude => "claude",
            Provider::Gemini => "gemini",
            Provider::Grok => "grok",
            Provider::Perplexity => "perplexity",
        }
    }

    pub fn parse(s: &str) -> Option<Provider> {
        Provider::ALL.iter().copied().find(|p| p.as_str() == s)
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Kind of work the caller intends to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskType {
    Chat,
    Completion,
    Code,
    Analysis,
    Creative,
    Translation,
    Summarization,
}

impl fmt::Display for TaskType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TaskType::Chat => "chat",
            TaskType::Completion => "completion",
            TaskType::Code => "code",
            TaskType::Analysis => "analysis",
            TaskType::Creative => "creative",
            TaskType::Translation => "translation",
            TaskType::Summarization => "summarization",
        };
        write!(f, "{}", s)
    }
}

/// Minimum acceptable quality tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QualityTier {
    Low,
    Medium,
    High,
    Premium,
}

impl QualityTier {
    /// Numeric floor a candidate's baseline quality must meet.
    pub fn floor(&self) -> f64 {
        match self {
            QualityTier::Low => 0.60,
            QualityTier::Medium => 0.75,
            QualityTier::High => 0.85,
            QualityTier::Premium => 0.90,
        }
    }
}

impl Default for QualityTier {
    fn default() -> Self {
        QualityTier::Medium
    }
}

impl fmt::Display for QualityTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            QualityTier::Low => "low",
            QualityTier::Medium => "medium",
            QualityTier::High => "high",
            QualityTier::Premium => "premium",
        };
        write!(f, "{}", s)
    }
}

/// Capability flags of a model (or required by a task).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capabilities {
    pub vision: bool,
    pub function_calling: bool,
    pub streaming: bool,
}

impl Capabilities {
    pub fn new(vision: bool, function_calling: bool, streaming: bool) -> Self {
        Self { vision, function_calling, streaming }
    }

    /// True when every flag set in `required` is also set here.
    pub fn satisfies(&self, required: &Capabilities) -> bool {
        (!required.vision || self.vision)
            && (!required.function_calling || self.function_calling)
            && (!required.streaming || self.streaming)
    }

    /// The first required flag this set is missing, for error reporting.
    pub fn missing(&self, required: &Capabilities) -> Option<&'static str> {
        if required.vision && !self.vision {
            Some("vision")
        } else if required.function_calling && !self.function_calling {
            Some("function-calling")
        } else if required.streaming && !self.streaming {
            Some("streaming")
        } else {
            None
        }
    }
}

/// Response-speed class of a model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpeedClass {
    Fast,
    Medium,
    Slow,
}

impl SpeedClass {
    /// Baseline latency in milliseconds before per-token time.
    pub fn base_latency_ms(&self) -> f64 {
        match self {
            SpeedClass::Fast => 500.0,
            SpeedClass::Medium => 1500.0,
            SpeedClass::Slow => 3000.0,
        }
    }
}
