//! Time reference and time decay.
//!
//! Elapsed time is measured from January 1st 00:00 of the analysis year.
//! High scorers tend to reveal early, so the realistic weight decays as the
//! reveal period matures.

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Decay gained per elapsed hour (2% per day).
pub const DECAY_PER_HOUR: f64 = 0.02 / 24.0;
/// Cumulative decay cap.
pub const MAX_DECAY: f64 = 0.3;

/// Elapsed time since the season anchor, plus the resulting decay.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeReference {
    pub hours_passed: i64,
    pub days_passed: i64,
    /// Hours past the last whole day.
    pub hours_left: i64,
    /// In [0, MAX_DECAY].
    pub time_decay: f64,
}

/// January 1st 00:00 of `at`'s year.
pub fn season_anchor(at: NaiveDateTime) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(at.year(), 1, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        // Jan 1st always exists; only reachable for years outside chrono's range
        .unwrap_or(at)
}

impl TimeReference {
    pub fn at(analysis: NaiveDateTime) -> Self {
        // Non-negative duration, so num_hours() truncation is a floor
        let hours_passed = (analysis - season_anchor(analysis)).num_hours().max(0);
        let time_decay = (hours_passed as f64 * DECAY_PER_HOUR).min(MAX_DECAY);
        Self {
            hours_passed,
            days_passed: hours_passed / 24,
            hours_left:  hours_passed % 24,
            time_decay,
        }
    }

    pub fn time_decay_percent(&self) -> f64 {
        self.time_decay * 100.0
    }
}
