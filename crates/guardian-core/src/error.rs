use thiserror::Error;

#[derive(Error, Debug)]
pub enum GuardianError {
    #[error("Invalid requirements: {0}")]
    InvalidRequirements(String),
    #[error("Unknown model: {provider}/{model}")]
    UnknownModel { provider: String, model: String },
    #[error("History store unavailable: {0}")]
    HistoryUnavailable(String),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, GuardianError>;
