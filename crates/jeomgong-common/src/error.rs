use thiserror::Error;

/// A violated input contract. Raised before any arithmetic runs; the
/// `Display` text is meant to be shown to the user verbatim.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Quota must be greater than zero.")]
    ZeroQuota,

    #[error("Revealed count ({revealed}) cannot exceed the total number of applicants ({applicants}).")]
    RevealedExceedsApplicants { revealed: u32, applicants: u32 },

    #[error("At least one applicant must have revealed a score.")]
    NoRevealedApplicants,

    #[error("Your rank must be 1 or higher.")]
    RankBelowOne,

    #[error("Your rank ({rank}) cannot exceed the revealed count ({revealed}).")]
    RankExceedsRevealed { rank: u32, revealed: u32 },

    #[error("Manual weight must be between 0.1 and 1.0 (got {0}).")]
    ManualWeightOutOfRange(f64),
}

#[derive(Debug, Error)]
pub enum JeomgongError {
    #[error("Invalid input: {0}")]
    Validation(#[from] ValidationError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, JeomgongError>;
