//! Scoring configuration for the prediction engine.
//!
//! Loaded from the `[scoring]` table of `jeomgong.toml` by the shell and
//! handed to the engine by value.

use serde::{Deserialize, Serialize};

/// Which admission-likelihood table to classify projected ranks with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassificationPolicy {
    /// Four tiers keyed on the waiting-list number and the cutoff rank
    /// (`quota + additional passes`).
    #[default]
    Waitlist,
    /// Five tiers keyed on `projected_rank / quota` (0.8 / 1.0 / 1.3 / 1.6).
    /// No waiting-list concept; kept for comparison with older results.
    RatioTiers,
}

impl ClassificationPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClassificationPolicy::Waitlist   => "waitlist",
            ClassificationPolicy::RatioTiers => "ratio_tiers",
        }
    }
}

/// Engine-level scoring options.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScoringConfig {
    #[serde(default)]
    pub classification_policy: ClassificationPolicy,
}
