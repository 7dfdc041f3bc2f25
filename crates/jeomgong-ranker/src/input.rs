//! Prediction input record and its validation.

use chrono::NaiveDateTime;
use jeomgong_common::ValidationError;
use serde::{Deserialize, Serialize};

/// Accepted range for a user-supplied weight.
pub const MANUAL_WEIGHT_MIN: f64 = 0.1;
pub const MANUAL_WEIGHT_MAX: f64 = 1.0;

/// Share of the quota assumed to be filled from the waiting list when the
/// user gives no estimate.
pub const DEFAULT_ADDITIONAL_PASS_RATIO: f64 = 0.5;

/// One score-reveal snapshot as entered by the applicant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionInput {
    /// Seats offered before additional passes.
    pub quota: u32,
    /// Total number of applicants.
    pub real_applicants: u32,
    /// Applicants who disclosed their scores.
    pub revealed_count: u32,
    /// The user's rank among revealers (1 = top).
    pub my_rank: u32,
    /// Overrides the auto-derived base weight when present.
    #[serde(default)]
    pub manual_weight: Option<f64>,
    /// Expected seats filled via the waiting list.
    #[serde(default)]
    pub additional_passes: Option<u32>,
    /// Point in time used for time decay; "now" when absent.
    #[serde(default)]
    pub analysis_timestamp: Option<NaiveDateTime>,
}

impl PredictionInput {
    pub fn new(quota: u32, real_applicants: u32, revealed_count: u32, my_rank: u32) -> Self {
        Self {
            quota,
            real_applicants,
            revealed_count,
            my_rank,
            manual_weight: None,
            additional_passes: None,
            analysis_timestamp: None,
        }
    }

    pub fn with_manual_weight(mut self, weight: f64) -> Self {
        self.manual_weight = Some(weight);
        self
    }

    pub fn with_additional_passes(mut self, passes: u32) -> Self {
        self.additional_passes = Some(passes);
        self
    }

    pub fn with_timestamp(mut self, at: NaiveDateTime) -> Self {
        self.analysis_timestamp = Some(at);
        self
    }

    /// Check every input contract. Order matters: the first violation found
    /// is the one reported.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.quota == 0 {
            return Err(ValidationError::ZeroQuota);
        }
        if self.revealed_count > self.real_applicants {
            return Err(ValidationError::RevealedExceedsApplicants {
                revealed:   self.revealed_count,
                applicants: self.real_applicants,
            });
        }
        if self.revealed_count == 0 {
            return Err(ValidationError::NoRevealedApplicants);
        }
        if self.my_rank == 0 {
            return Err(ValidationError::RankBelowOne);
        }
        if self.my_rank > self.revealed_count {
            return Err(ValidationError::RankExceedsRevealed {
                rank:     self.my_rank,
                revealed: self.revealed_count,
            });
        }
        if let Some(w) = self.manual_weight {
            // NaN fails both comparisons, so test for containment
            if !(MANUAL_WEIGHT_MIN..=MANUAL_WEIGHT_MAX).contains(&w) {
                return Err(ValidationError::ManualWeightOutOfRange(w));
            }
        }
        Ok(())
    }

    /// `additional_passes`, or half the quota rounded when not given.
    pub fn effective_additional_passes(&self) -> u32 {
        self.additional_passes
            .unwrap_or_else(|| (self.quota as f64 * DEFAULT_ADDITIONAL_PASS_RATIO).round() as u32)
    }

    /// Applicants who have not revealed a score.
    pub fn unrevealed_count(&self) -> u32 {
        self.real_applicants.saturating_sub(self.revealed_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> PredictionInput {
        PredictionInput::new(35, 245, 100, 12)
    }

    #[test]
    fn test_valid_input_passes() {
        assert_eq!(valid().validate(), Ok(()));
    }

    #[test]
    fn test_revealed_above_applicants_rejected() {
        let input = PredictionInput::new(10, 40, 50, 1);
        assert_eq!(
            input.validate(),
            Err(ValidationError::RevealedExceedsApplicants { revealed: 50, applicants: 40 })
        );
    }

    #[test]
    fn test_rank_above_revealed_rejected() {
        let input = PredictionInput::new(10, 40, 20, 21);
        assert_eq!(
            input.validate(),
            Err(ValidationError::RankExceedsRevealed { rank: 21, revealed: 20 })
        );
    }

    #[test]
    fn test_zero_quota_rejected() {
        let input = PredictionInput::new(0, 40, 20, 3);
        assert_eq!(input.validate(), Err(ValidationError::ZeroQuota));
    }

    #[test]
    fn test_zero_revealed_and_zero_rank_rejected() {
        // rank 0 <= revealed 0 satisfies the pairwise check; still invalid
        let input = PredictionInput::new(10, 40, 0, 0);
        assert_eq!(input.validate(), Err(ValidationError::NoRevealedApplicants));

        let input = PredictionInput::new(10, 40, 20, 0);
        assert_eq!(input.validate(), Err(ValidationError::RankBelowOne));
    }

    #[test]
    fn test_manual_weight_bounds() {
        assert!(valid().with_manual_weight(0.1).validate().is_ok());
        assert!(valid().with_manual_weight(1.0).validate().is_ok());
        assert!(valid().with_manual_weight(0.05).validate().is_err());
        assert!(valid().with_manual_weight(1.2).validate().is_err());
        assert!(valid().with_manual_weight(f64::NAN).validate().is_err());
    }

    #[test]
    fn test_default_additional_passes_is_half_quota_rounded() {
        assert_eq!(PredictionInput::new(35, 245, 100, 12).effective_additional_passes(), 18);
        assert_eq!(PredictionInput::new(10, 40, 20, 3).effective_additional_passes(), 5);
        assert_eq!(valid().with_additional_passes(15).effective_additional_passes(), 15);
        assert_eq!(valid().with_additional_passes(0).effective_additional_passes(), 0);
    }

    #[test]
    fn test_deserialises_flat_camel_case_record() {
        let input: PredictionInput = serde_json::from_str(
            r#"{"quota":35,"realApplicants":245,"revealedCount":100,"myRank":12,"manualWeight":0.5}"#,
        )
        .unwrap();
        assert_eq!(input.manual_weight, Some(0.5));
        assert_eq!(input.additional_passes, None);
        assert_eq!(input.analysis_timestamp, None);
    }
}
