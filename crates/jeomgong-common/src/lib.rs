//! jeomgong-common — Shared error types and scoring configuration used across
//! the Jeomgong crates.

pub mod error;
pub mod scoring_config;

// Re-export commonly used types
pub use error::{JeomgongError, Result, ValidationError};
pub use scoring_config::{ClassificationPolicy, ScoringConfig};
