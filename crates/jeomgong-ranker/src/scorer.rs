//! Rank projection from the revealed pool onto the full applicant pool.
//!
//! hidden = round(unrevealed × (my_rank / revealed) × w)
//! projected = my_rank + hidden

use serde::{Deserialize, Serialize};

/// One scenario's projected standing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Projection {
    /// Unrevealed applicants estimated to outrank the user.
    pub hidden_superiors: u32,
    pub projected_rank: u32,
}

/// Share of the revealed pool at or above the user, in (0, 1].
/// Callers guarantee `revealed_count > 0`.
pub fn rank_ratio(my_rank: u32, revealed_count: u32) -> f64 {
    my_rank as f64 / revealed_count as f64
}

/// Project the user's rank for a scenario weight.
///
/// Rounds to the nearest integer (halves away from zero). Never returns a
/// rank above `my_rank + unrevealed_count` for weights in [0, 1].
pub fn project_rank(my_rank: u32, unrevealed_count: u32, rank_ratio: f64, weight: f64) -> Projection {
    let hidden = (unrevealed_count as f64 * rank_ratio * weight).round().max(0.0) as u32;
    Projection {
        hidden_superiors: hidden,
        projected_rank:   my_rank.saturating_add(hidden),
    }
}

/// Position on the waiting list: `<= 0` means inside the initial quota.
pub fn waiting_number(projected_rank: u32, quota: u32) -> i64 {
    projected_rank as i64 - quota as i64
}

/// Last rank expected to be admitted once the waiting list has moved.
pub fn cutoff_rank(quota: u32, additional_passes: u32) -> u32 {
    quota.saturating_add(additional_passes)
}
