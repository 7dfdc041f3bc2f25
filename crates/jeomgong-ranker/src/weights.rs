//! Weights applied to the unrevealed pool.
//!
//! A weight is the estimated fraction of unrevealed applicants who sit above
//! the user's revealed-pool percentile. The realistic scenario derives it
//! from the competition rate, the revealed ratio and the elapsed time; the
//! other two scenarios use fixed bounds.

use serde::{Deserialize, Serialize};

use crate::timing::TimeReference;

/// Most unrevealed applicants are assumed to score below the user.
pub const OPTIMISTIC_WEIGHT: f64 = 0.2;
/// Unrevealed applicants mirror the revealed pool exactly.
pub const PESSIMISTIC_WEIGHT: f64 = 1.0;

/// Starting weight before the competition-rate term.
pub const WEIGHT_INTERCEPT: f64 = 0.7;
/// Slope of the `ln(competition rate)` term.
pub const LOG_RATE_SLOPE: f64 = 0.15;
/// Competition rates below this are floored before taking the log.
pub const MIN_SAFE_RATE: f64 = 1.1;
/// Revealed ratio at which the ratio correction is zero.
pub const RATIO_PIVOT: f64 = 0.5;
pub const RATIO_CORRECTION_SCALE: f64 = 0.2;
/// During the first days the pool has not matured yet.
pub const EARLY_PERIOD_DAYS: i64 = 3;
pub const EARLY_PERIOD_FLOOR: f64 = 0.35;
/// Lowest base weight after every correction.
pub const BASE_WEIGHT_FLOOR: f64 = 0.15;

/// How the base weight was arrived at.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BaseWeight {
    pub value: f64,
    /// Applied `(0.5 - revealed_ratio) * 0.2` term; 0 for manual weights.
    pub ratio_correction: f64,
    /// Applied external factor; 0 for manual weights.
    pub ai_factor: f64,
    pub manual: bool,
}

/// Derive the base weight.
///
/// A manual weight is authoritative and skips every correction.
pub fn base_weight(
    manual_weight: Option<f64>,
    competition_rate: f64,
    revealed_ratio: f64,
    time: &TimeReference,
    ai_factor: f64,
) -> BaseWeight {
    if let Some(value) = manual_weight {
        return BaseWeight { value, ratio_correction: 0.0, ai_factor: 0.0, manual: true };
    }

    let safe_rate = competition_rate.max(MIN_SAFE_RATE);
    let mut w = WEIGHT_INTERCEPT - LOG_RATE_SLOPE * safe_rate.ln();

    let ratio_correction = (RATIO_PIVOT - revealed_ratio) * RATIO_CORRECTION_SCALE;
    w += ratio_correction;

    if time.days_passed <= EARLY_PERIOD_DAYS {
        w = w.max(EARLY_PERIOD_FLOOR);
    }

    // Bounded by the provider, not re-clamped here
    w += ai_factor;

    BaseWeight {
        value: w.max(BASE_WEIGHT_FLOOR),
        ratio_correction,
        ai_factor,
        manual: false,
    }
}

/// Per-scenario weights.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScenarioWeights {
    pub optimistic: f64,
    pub realistic: f64,
    pub pessimistic: f64,
}

impl ScenarioWeights {
    /// The realistic weight is `base * (1 - decay)`. An auto-derived weight
    /// is kept inside the fixed scenario bounds so the three projected ranks
    /// stay ordered; a manual weight is used as given.
    pub fn from_base(base: &BaseWeight, time: &TimeReference) -> Self {
        let decayed = base.value * (1.0 - time.time_decay);
        let realistic = if base.manual {
            decayed
        } else {
            decayed.clamp(OPTIMISTIC_WEIGHT, PESSIMISTIC_WEIGHT)
        };
        Self {
            optimistic: OPTIMISTIC_WEIGHT,
            realistic,
            pessimistic: PESSIMISTIC_WEIGHT,
        }
    }

    pub fn as_array(&self) -> [f64; 3] {
        [self.optimistic, self.realistic, self.pessimistic]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(days: i64) -> TimeReference {
        let hours = days * 24;
        TimeReference {
            hours_passed: hours,
            days_passed:  days,
            hours_left:   0,
            time_decay:   (hours as f64 * crate::timing::DECAY_PER_HOUR).min(crate::timing::MAX_DECAY),
        }
    }

    #[test]
    fn test_manual_weight_skips_corrections() {
        let b = base_weight(Some(0.5), 7.0, 0.1, &day(0), 0.09);
        assert_eq!(b.value, 0.5);
        assert_eq!(b.ratio_correction, 0.0);
        assert_eq!(b.ai_factor, 0.0);
        assert!(b.manual);
    }

    #[test]
    fn test_auto_weight_low_competition() {
        // rate 1.1, ratio 5/11
        let b = base_weight(None, 1.1, 5.0 / 11.0, &day(0), 0.0);
        let expected = 0.7 - 0.15 * 1.1f64.ln() + (0.5 - 5.0 / 11.0) * 0.2;
        assert!((b.value - expected).abs() < 1e-12);
        assert!((b.value - 0.6948).abs() < 1e-4);
        assert!((b.ratio_correction - 0.0091).abs() < 1e-4);
    }

    #[test]
    fn test_rate_below_floor_is_treated_as_floor() {
        let at_floor = base_weight(None, 1.1, 0.5, &day(10), 0.0);
        let below    = base_weight(None, 0.4, 0.5, &day(10), 0.0);
        assert_eq!(at_floor.value, below.value);
    }

    #[test]
    fn test_early_period_floor_only_in_first_days() {
        // ln(20) * 0.15 ≈ 0.449 → w ≈ 0.251 before the floor
        let early = base_weight(None, 20.0, 0.5, &day(3), 0.0);
        let late  = base_weight(None, 20.0, 0.5, &day(4), 0.0);
        assert!((early.value - EARLY_PERIOD_FLOOR).abs() < 1e-12);
        assert!(late.value < EARLY_PERIOD_FLOOR);
    }

    #[test]
    fn test_ai_factor_applies_after_early_floor() {
        let b = base_weight(None, 20.0, 0.5, &day(0), -0.09);
        assert!((b.value - (EARLY_PERIOD_FLOOR - 0.09)).abs() < 1e-12);
        assert_eq!(b.ai_factor, -0.09);
    }

    #[test]
    fn test_final_floor() {
        let b = base_weight(None, 500.0, 1.0, &day(30), -0.09);
        assert_eq!(b.value, BASE_WEIGHT_FLOOR);
    }

    fn auto(value: f64) -> BaseWeight {
        BaseWeight { value, ratio_correction: 0.0, ai_factor: 0.0, manual: false }
    }

    #[test]
    fn test_scenario_weights_realistic_decays() {
        let w = ScenarioWeights::from_base(&auto(0.6), &day(5));
        assert_eq!(w.optimistic, OPTIMISTIC_WEIGHT);
        assert_eq!(w.pessimistic, PESSIMISTIC_WEIGHT);
        assert!((w.realistic - 0.6 * 0.9).abs() < 1e-12);
    }

    #[test]
    fn test_scenario_weights_realistic_never_below_optimistic() {
        let w = ScenarioWeights::from_base(&auto(BASE_WEIGHT_FLOOR), &day(20));
        assert_eq!(w.realistic, OPTIMISTIC_WEIGHT);
        let [o, r, p] = w.as_array();
        assert!(o <= r && r <= p);
    }

    #[test]
    fn test_manual_weight_is_not_clamped() {
        let manual = base_weight(Some(0.1), 7.0, 0.4, &day(0), 0.0);
        assert_eq!(ScenarioWeights::from_base(&manual, &day(0)).realistic, 0.1);

        // Decay still applies to a manual weight
        let manual = base_weight(Some(0.15), 7.0, 0.4, &day(10), 0.0);
        let w = ScenarioWeights::from_base(&manual, &day(10));
        assert!((w.realistic - 0.15 * 0.8).abs() < 1e-12);
        assert!(w.realistic < w.optimistic);
    }
}
