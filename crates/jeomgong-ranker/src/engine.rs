//! The prediction entry point.
//!
//! 1. competition rate, revealed ratio
//! 2. time reference and decay (anchored at Jan 1st of the analysis year)
//! 3. base weight (manual, or auto-derived + external factor)
//! 4. per-scenario weights → projected ranks
//! 5. cutoff, waiting number, likelihood tier per scenario
//!
//! Pure: the same input, adjustment and `now` always give the same result.

use chrono::NaiveDateTime;
use jeomgong_common::{ScoringConfig, ValidationError};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::adjustment::ExternalAdjustment;
use crate::classify::{classify, Probability};
use crate::input::PredictionInput;
use crate::scorer::{cutoff_rank, project_rank, rank_ratio};
use crate::timing::TimeReference;
use crate::weights::{base_weight, ScenarioWeights};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioRanks {
    pub optimistic: u32,
    pub realistic: u32,
    pub pessimistic: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioProbabilities {
    pub optimistic: Probability,
    pub realistic: Probability,
    pub pessimistic: Probability,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metrics {
    /// applicants / quota
    pub competition_rate: f64,
    /// revealed / applicants, in (0, 1]
    pub revealed_ratio: f64,
    /// Effective additional passes (given, or half the quota).
    pub additional_passes: u32,
    /// Cutoff rank: quota + additional passes.
    pub max_rank: u32,
}

/// Intermediate values, for explanation only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Breakdown {
    pub base_weight: f64,
    pub manual_weight: bool,
    pub time_decay_percent: f64,
    pub hours_passed: i64,
    pub days_passed: i64,
    pub hours_left: i64,
    pub ratio_correction: f64,
    pub ai_factor: f64,
    pub ai_reason: String,
    pub unrevealed_count: u32,
    pub rank_ratio: f64,
    pub analyzed_at: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub ranks: ScenarioRanks,
    pub probabilities: ScenarioProbabilities,
    pub weights: ScenarioWeights,
    pub metrics: Metrics,
    pub breakdown: Breakdown,
}

/// Prediction engine bound to a scoring configuration.
#[derive(Debug, Clone, Default)]
pub struct PredictionEngine {
    config: ScoringConfig,
}

impl PredictionEngine {
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Predict the final rank for `input`.
    ///
    /// `now` is used only when `input.analysis_timestamp` is absent.
    /// Fails before any arithmetic when an input contract is violated.
    pub fn predict(
        &self,
        input: &PredictionInput,
        adjustment: &ExternalAdjustment,
        now: NaiveDateTime,
    ) -> Result<PredictionResult, ValidationError> {
        input.validate()?;

        let competition_rate = input.real_applicants as f64 / input.quota as f64;
        let revealed_ratio   = input.revealed_count as f64 / input.real_applicants as f64;

        let analyzed_at = input.analysis_timestamp.unwrap_or(now);
        let time = TimeReference::at(analyzed_at);

        let base = base_weight(
            input.manual_weight,
            competition_rate,
            revealed_ratio,
            &time,
            adjustment.factor,
        );
        let weights = ScenarioWeights::from_base(&base, &time);

        let unrevealed = input.unrevealed_count();
        let ratio = rank_ratio(input.my_rank, input.revealed_count);
        let [optimistic, realistic, pessimistic] =
            weights.as_array().map(|w| project_rank(input.my_rank, unrevealed, ratio, w));

        let additional_passes = input.effective_additional_passes();
        let max_rank = cutoff_rank(input.quota, additional_passes);
        let policy = self.config.classification_policy;
        let tier = |rank: u32| classify(policy, rank, input.quota, max_rank);

        let result = PredictionResult {
            ranks: ScenarioRanks {
                optimistic:  optimistic.projected_rank,
                realistic:   realistic.projected_rank,
                pessimistic: pessimistic.projected_rank,
            },
            probabilities: ScenarioProbabilities {
                optimistic:  tier(optimistic.projected_rank),
                realistic:   tier(realistic.projected_rank),
                pessimistic: tier(pessimistic.projected_rank),
            },
            weights,
            metrics: Metrics {
                competition_rate,
                revealed_ratio,
                additional_passes,
                max_rank,
            },
            breakdown: Breakdown {
                base_weight:        base.value,
                manual_weight:      base.manual,
                time_decay_percent: time.time_decay_percent(),
                hours_passed:       time.hours_passed,
                days_passed:        time.days_passed,
                hours_left:         time.hours_left,
                ratio_correction:   base.ratio_correction,
                ai_factor:          base.ai_factor,
                ai_reason:          adjustment.reason.clone(),
                unrevealed_count:   unrevealed,
                rank_ratio:         ratio,
                analyzed_at,
            },
        };

        debug!(
            base_weight = result.breakdown.base_weight,
            realistic_weight = result.weights.realistic,
            optimistic = result.ranks.optimistic,
            realistic = result.ranks.realistic,
            pessimistic = result.ranks.pessimistic,
            policy = policy.as_str(),
            "Prediction computed"
        );

        Ok(result)
    }
}

/// Predict with the default scoring configuration.
pub fn predict(
    input: &PredictionInput,
    adjustment: &ExternalAdjustment,
    now: NaiveDateTime,
) -> Result<PredictionResult, ValidationError> {
    PredictionEngine::default().predict(input, adjustment, now)
}
