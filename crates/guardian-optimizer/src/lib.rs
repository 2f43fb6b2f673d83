//! Model selection and cost optimization for multi-provider AI workloads.
//!
//! Filters the catalog down to what the caller can actually use, scores
//! candidates on cost, latency and task fit, personalizes the ranking with
//! the caller's own performance history, and builds provider-diverse
//! fallback chains for reliability.

pub mod api;
pub mod filter;
pub mod history;
pub mod optimizer;
pub mod scorer;
pub mod types;

pub use api::{OptimizeRequest, OptimizeResponse, OptimizeSummary};
pub use filter::{filter_candidates, Candidate, FilterReport};
pub use history::{HistoryStore, InMemoryHistoryStore, PerformanceObservation, PerformanceRecord};
pub use optimizer::Optimizer;
pub use types::{FallbackChain, ModelRecommendation, ModelRef, OptimizeMode, TaskRequirements};
