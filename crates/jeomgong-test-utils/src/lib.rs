//! Shared fixtures for Jeomgong tests: fixed timestamps and canonical
//! score-reveal snapshots.

use chrono::{NaiveDate, NaiveDateTime};
use jeomgong_ranker::PredictionInput;

pub use pretty_assertions;

/// `y-m-d h:00`.
pub fn at(year: i32, month: u32, day: u32, hour: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|d| d.and_hms_opt(hour, 0, 0))
        .expect("valid fixture timestamp")
}

/// Jan 1st 00:00, the start of the reveal season.
pub fn season_start(year: i32) -> NaiveDateTime {
    at(year, 1, 1, 0)
}

/// quota 35, 245 applicants, 100 revealed, rank 12, manual weight 0.5,
/// 15 additional passes, analysed at the season start.
pub fn manual_weight_snapshot() -> PredictionInput {
    PredictionInput::new(35, 245, 100, 12)
        .with_manual_weight(0.5)
        .with_additional_passes(15)
        .with_timestamp(season_start(2025))
}

/// quota 10, 11 applicants, 5 revealed, rank 3, auto weight, season start.
pub fn low_competition_snapshot() -> PredictionInput {
    PredictionInput::new(10, 11, 5, 3).with_timestamp(season_start(2025))
}

/// A grid of valid snapshots spanning small and large departments, every
/// reveal ratio band, and both ends of the revealed ranking.
pub fn snapshot_grid() -> Vec<PredictionInput> {
    let mut out = Vec::new();
    for &(quota, applicants) in &[(1u32, 1u32), (5, 9), (10, 11), (35, 245), (120, 2400)] {
        for &reveal_pct in &[1u32, 20, 50, 80, 100] {
            let revealed = (applicants * reveal_pct / 100).max(1);
            for &rank in &[1, (revealed / 2).max(1), revealed] {
                out.push(PredictionInput::new(quota, applicants, revealed, rank));
            }
        }
    }
    out
}

/// Assert two floats agree within `eps`.
#[macro_export]
macro_rules! assert_close {
    ($left:expr, $right:expr, $eps:expr) => {{
        let (l, r): (f64, f64) = ($left, $right);
        assert!(
            (l - r).abs() < $eps,
            "assert_close failed: {} vs {} (eps {})",
            l, r, $eps
        );
    }};
}
