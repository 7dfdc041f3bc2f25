//! Admission-likelihood classification of a projected rank.

use jeomgong_common::ClassificationPolicy;
use serde::{Deserialize, Serialize};

use crate::scorer::waiting_number;

/// Share of the quota (or cutoff) that counts as comfortably inside it.
pub const COMFORT_RATIO: f64 = 0.8;

/// Likelihood tiers across both classification policies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProbabilityTier {
    // Waitlist policy
    VerySafeAdmitted,
    SafeAdmitted,
    LikelyViaWaitlist,
    PossibleViaWaitlist,
    LikelyRejected,
    // Ratio-tier policy
    VerySafe,
    Safe,
    Probable,
    Risky,
    Danger,
}

impl ProbabilityTier {
    pub fn label(&self) -> &'static str {
        match self {
            ProbabilityTier::VerySafeAdmitted    => "Very Safe / Admitted",
            ProbabilityTier::SafeAdmitted        => "Safe / Admitted",
            ProbabilityTier::LikelyViaWaitlist   => "Likely via Waitlist",
            ProbabilityTier::PossibleViaWaitlist => "Possible via Waitlist",
            ProbabilityTier::LikelyRejected      => "Likely Rejected",
            ProbabilityTier::VerySafe            => "Very Safe",
            ProbabilityTier::Safe                => "Safe",
            ProbabilityTier::Probable            => "Probable",
            ProbabilityTier::Risky               => "Risky",
            ProbabilityTier::Danger              => "Danger",
        }
    }

    /// Label as shown to Korean users.
    pub fn label_ko(&self) -> &'static str {
        match self {
            ProbabilityTier::VerySafeAdmitted | ProbabilityTier::VerySafe => "최초합 확실",
            ProbabilityTier::SafeAdmitted | ProbabilityTier::Safe         => "최초합 적정",
            ProbabilityTier::LikelyViaWaitlist | ProbabilityTier::Probable => "추합 유력",
            ProbabilityTier::PossibleViaWaitlist | ProbabilityTier::Risky  => "추합 가능",
            ProbabilityTier::LikelyRejected | ProbabilityTier::Danger      => "불합격 유력",
        }
    }

    pub fn score(&self) -> u8 {
        match self {
            ProbabilityTier::VerySafeAdmitted    => 95,
            ProbabilityTier::SafeAdmitted        => 85,
            ProbabilityTier::LikelyViaWaitlist   => 65,
            ProbabilityTier::PossibleViaWaitlist => 45,
            ProbabilityTier::LikelyRejected      => 15,
            ProbabilityTier::VerySafe            => 95,
            ProbabilityTier::Safe                => 80,
            ProbabilityTier::Probable            => 60,
            ProbabilityTier::Risky               => 40,
            ProbabilityTier::Danger              => 10,
        }
    }

    /// True when the tier places the user inside the initial quota.
    pub fn is_initial_admit(&self) -> bool {
        matches!(
            self,
            ProbabilityTier::VerySafeAdmitted
                | ProbabilityTier::SafeAdmitted
                | ProbabilityTier::VerySafe
                | ProbabilityTier::Safe
        )
    }
}

/// Classification of one scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Probability {
    pub tier: ProbabilityTier,
    pub label: String,
    pub score: u8,
    /// `projected_rank - quota`; `<= 0` means no waiting list.
    pub waiting_number: i64,
}

impl Probability {
    fn new(tier: ProbabilityTier, waiting_number: i64) -> Self {
        Self {
            tier,
            label: tier.label().to_string(),
            score: tier.score(),
            waiting_number,
        }
    }
}

/// Classify a projected rank under `policy`.
pub fn classify(
    policy: ClassificationPolicy,
    projected_rank: u32,
    quota: u32,
    max_rank: u32,
) -> Probability {
    let waiting = waiting_number(projected_rank, quota);
    let tier = match policy {
        ClassificationPolicy::Waitlist   => waitlist_tier(projected_rank, waiting, quota, max_rank),
        ClassificationPolicy::RatioTiers => ratio_tier(projected_rank, quota),
    };
    Probability::new(tier, waiting)
}

fn waitlist_tier(projected_rank: u32, waiting: i64, quota: u32, max_rank: u32) -> ProbabilityTier {
    let rank = projected_rank as f64;
    if waiting <= 0 {
        if rank <= quota as f64 * COMFORT_RATIO {
            ProbabilityTier::VerySafeAdmitted
        } else {
            ProbabilityTier::SafeAdmitted
        }
    } else if rank <= max_rank as f64 * COMFORT_RATIO {
        ProbabilityTier::LikelyViaWaitlist
    } else if projected_rank <= max_rank {
        ProbabilityTier::PossibleViaWaitlist
    } else {
        ProbabilityTier::LikelyRejected
    }
}

fn ratio_tier(projected_rank: u32, quota: u32) -> ProbabilityTier {
    let ratio = projected_rank as f64 / quota as f64;
    if ratio <= 0.8 {
        ProbabilityTier::VerySafe
    } else if ratio <= 1.0 {
        ProbabilityTier::Safe
    } else if ratio <= 1.3 {
        ProbabilityTier::Probable
    } else if ratio <= 1.6 {
        ProbabilityTier::Risky
    } else {
        ProbabilityTier::Danger
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const W: ClassificationPolicy = ClassificationPolicy::Waitlist;
    const R: ClassificationPolicy = ClassificationPolicy::RatioTiers;

    #[test]
    fn test_waitlist_tiers() {
        // quota 35, cutoff 50: 0.8 × 35 = 28, 0.8 × 50 = 40
        assert_eq!(classify(W, 21, 35, 50).tier, ProbabilityTier::VerySafeAdmitted);
        assert_eq!(classify(W, 28, 35, 50).tier, ProbabilityTier::VerySafeAdmitted);
        assert_eq!(classify(W, 29, 35, 50).tier, ProbabilityTier::SafeAdmitted);
        assert_eq!(classify(W, 35, 35, 50).tier, ProbabilityTier::SafeAdmitted);
        assert_eq!(classify(W, 36, 35, 50).tier, ProbabilityTier::LikelyViaWaitlist);
        assert_eq!(classify(W, 40, 35, 50).tier, ProbabilityTier::LikelyViaWaitlist);
        assert_eq!(classify(W, 41, 35, 50).tier, ProbabilityTier::PossibleViaWaitlist);
        assert_eq!(classify(W, 50, 35, 50).tier, ProbabilityTier::PossibleViaWaitlist);
        assert_eq!(classify(W, 51, 35, 50).tier, ProbabilityTier::LikelyRejected);
    }

    #[test]
    fn test_waitlist_scores_and_waiting_number() {
        let p = classify(W, 21, 35, 50);
        assert_eq!(p.score, 95);
        assert_eq!(p.label, "Very Safe / Admitted");
        assert_eq!(p.waiting_number, -14);

        let p = classify(W, 44, 35, 50);
        assert_eq!(p.score, 45);
        assert_eq!(p.waiting_number, 9);
    }

    #[test]
    fn test_waitlist_with_no_additional_passes() {
        // cutoff == quota: anything past the quota is rejected outright
        assert_eq!(classify(W, 11, 10, 10).tier, ProbabilityTier::LikelyRejected);
    }

    #[test]
    fn test_ratio_tiers() {
        assert_eq!(classify(R, 8, 10, 15).tier, ProbabilityTier::VerySafe);
        assert_eq!(classify(R, 10, 10, 15).tier, ProbabilityTier::Safe);
        assert_eq!(classify(R, 13, 10, 15).tier, ProbabilityTier::Probable);
        assert_eq!(classify(R, 16, 10, 15).tier, ProbabilityTier::Risky);
        assert_eq!(classify(R, 17, 10, 15).tier, ProbabilityTier::Danger);
        assert_eq!(classify(R, 17, 10, 15).score, 10);
        // Waiting number is reported under either policy
        assert_eq!(classify(R, 17, 10, 15).waiting_number, 7);
    }

    #[test]
    fn test_korean_labels() {
        assert_eq!(ProbabilityTier::LikelyViaWaitlist.label_ko(), "추합 유력");
        assert_eq!(ProbabilityTier::Danger.label_ko(), "불합격 유력");
        assert!(ProbabilityTier::Safe.is_initial_admit());
        assert!(!ProbabilityTier::Probable.is_initial_admit());
    }
}
