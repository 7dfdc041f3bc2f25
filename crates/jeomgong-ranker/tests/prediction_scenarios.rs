//! End-to-end prediction scenarios and invariants over a grid of snapshots.

use jeomgong_ranker::{predict, ExternalAdjustment, PredictionInput, ProbabilityTier};
use jeomgong_test_utils::pretty_assertions::assert_eq;
use jeomgong_test_utils::{
    assert_close, at, low_competition_snapshot, manual_weight_snapshot, season_start, snapshot_grid,
};

#[test]
fn manual_weight_snapshot_projects_rank_21() {
    let r = predict(&manual_weight_snapshot(), &ExternalAdjustment::default(), season_start(2025)).unwrap();

    assert_close!(r.metrics.competition_rate, 7.0, 1e-12);
    assert_eq!(r.breakdown.days_passed, 0);
    assert_eq!(r.breakdown.time_decay_percent, 0.0);
    assert_eq!(r.weights.realistic, 0.5);
    assert_eq!(r.breakdown.unrevealed_count, 145);
    assert_close!(r.breakdown.rank_ratio, 0.12, 1e-12);
    assert_eq!(r.ranks.realistic, 21);
    assert_eq!(r.metrics.additional_passes, 15);
    assert_eq!(r.metrics.max_rank, 50);

    let realistic = &r.probabilities.realistic;
    assert_eq!(realistic.waiting_number, -14);
    assert_eq!(realistic.tier, ProbabilityTier::VerySafeAdmitted);
    assert_eq!(realistic.score, 95);

    // 145 × 0.12 × 0.2 = 3.48 → 3; 145 × 0.12 × 1.0 = 17.4 → 17
    assert_eq!(r.ranks.optimistic, 15);
    assert_eq!(r.ranks.pessimistic, 29);
    assert_eq!(r.probabilities.pessimistic.tier, ProbabilityTier::SafeAdmitted);
}

#[test]
fn full_reveal_keeps_every_rank() {
    let input = PredictionInput {
        revealed_count: 245,
        ..manual_weight_snapshot()
    };
    let r = predict(&input, &ExternalAdjustment::default(), season_start(2025)).unwrap();
    assert_eq!(r.breakdown.unrevealed_count, 0);
    assert_eq!(r.ranks.optimistic, 12);
    assert_eq!(r.ranks.realistic, 12);
    assert_eq!(r.ranks.pessimistic, 12);
}

#[test]
fn low_competition_auto_weight() {
    let r = predict(&low_competition_snapshot(), &ExternalAdjustment::default(), season_start(2025)).unwrap();

    assert_close!(r.metrics.competition_rate, 1.1, 1e-12);
    assert_close!(r.metrics.revealed_ratio, 5.0 / 11.0, 1e-12);
    let expected = 0.7 - 0.15 * 1.1f64.ln() + (0.5 - 5.0 / 11.0) * 0.2;
    assert_close!(r.breakdown.base_weight, expected, 1e-12);
    assert_close!(r.breakdown.base_weight, 0.6948, 1e-4);
    assert_close!(r.breakdown.ratio_correction, 0.0091, 1e-4);
    assert_eq!(r.breakdown.ai_factor, 0.0);
    assert!(!r.breakdown.manual_weight);
    assert_close!(r.weights.realistic, expected, 1e-12);

    // unrevealed 6, ratio 0.6: 0.72 → 1, 2.501 → 3, 3.6 → 4
    assert_eq!(r.ranks.optimistic, 4);
    assert_eq!(r.ranks.realistic, 6);
    assert_eq!(r.ranks.pessimistic, 7);
    assert_eq!(r.metrics.additional_passes, 5);
    assert_eq!(r.metrics.max_rank, 15);
}

#[test]
fn external_factor_moves_realistic_weight() {
    let input = low_competition_snapshot();
    let base = predict(&input, &ExternalAdjustment::default(), season_start(2025)).unwrap();
    let up = predict(&input, &ExternalAdjustment::bounded(0.09, "late reveals expected"), season_start(2025)).unwrap();
    let down = predict(&input, &ExternalAdjustment::bounded(-0.09, "early reveals"), season_start(2025)).unwrap();

    assert_close!(up.breakdown.base_weight - base.breakdown.base_weight, 0.09, 1e-12);
    assert_close!(base.breakdown.base_weight - down.breakdown.base_weight, 0.09, 1e-12);
    assert_eq!(up.breakdown.ai_factor, 0.09);
    assert!(up.ranks.realistic >= base.ranks.realistic);
    assert!(down.ranks.realistic <= base.ranks.realistic);
}

#[test]
fn time_decay_lowers_realistic_weight() {
    let input = PredictionInput::new(35, 245, 100, 12).with_manual_weight(0.5);
    let day10 = predict(&input, &ExternalAdjustment::default(), at(2025, 1, 11, 0)).unwrap();
    assert_eq!(day10.breakdown.days_passed, 10);
    assert_close!(day10.breakdown.time_decay_percent, 20.0, 1e-9);
    assert_close!(day10.weights.realistic, 0.4, 1e-12);
    // 145 × 0.12 × 0.4 = 6.96 → 7
    assert_eq!(day10.ranks.realistic, 19);
}

#[test]
fn low_manual_weight_is_used_as_given() {
    // 145 × 0.5 × w: 0.1 → 7.25 → 7, 0.12 → 8.7 → 9, 0.15 → 10.875 → 11
    for (w, expected) in [(0.1, 57), (0.12, 59), (0.15, 61)] {
        let input = PredictionInput::new(35, 245, 100, 50).with_manual_weight(w);
        let r = predict(&input, &ExternalAdjustment::default(), season_start(2025)).unwrap();
        assert_eq!(r.breakdown.base_weight, w);
        assert_eq!(r.weights.realistic, w);
        assert_eq!(r.ranks.realistic, expected, "manual weight {w}");
    }
}

#[test]
fn manual_weight_ranks_stay_within_bounds() {
    let times = [season_start(2025), at(2025, 1, 9, 8), at(2025, 2, 20, 23)];
    for input in snapshot_grid() {
        for w in [0.1, 0.25, 0.5, 1.0] {
            for &now in &times {
                let r = predict(&input.clone().with_manual_weight(w), &ExternalAdjustment::default(), now).unwrap();
                assert!(r.ranks.realistic >= input.my_rank);
                assert!(r.ranks.realistic <= r.ranks.pessimistic, "{input:?} w={w} at {now}");
                assert!(r.ranks.optimistic <= r.ranks.pessimistic);
                if r.weights.realistic >= r.weights.optimistic {
                    assert!(r.ranks.optimistic <= r.ranks.realistic);
                }
            }
        }
    }
}

#[test]
fn revealed_above_applicants_fails() {
    let input = PredictionInput::new(10, 40, 50, 1);
    let err = predict(&input, &ExternalAdjustment::default(), season_start(2025)).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Revealed count (50) cannot exceed the total number of applicants (40)."
    );
}

#[test]
fn scenario_ranks_are_ordered_and_never_below_own_rank() {
    let times = [season_start(2025), at(2025, 1, 3, 14), at(2025, 1, 9, 8), at(2025, 2, 20, 23)];
    let adjustments = [
        ExternalAdjustment::default(),
        ExternalAdjustment::bounded(0.09, "up"),
        ExternalAdjustment::bounded(-0.09, "down"),
    ];
    for input in snapshot_grid() {
        for &now in &times {
            for adj in &adjustments {
                let r = predict(&input, adj, now).unwrap();
                assert!(
                    r.ranks.optimistic <= r.ranks.realistic && r.ranks.realistic <= r.ranks.pessimistic,
                    "{input:?} at {now}: {:?}",
                    r.ranks
                );
                assert!(r.ranks.optimistic >= input.my_rank);
                assert!(r.ranks.pessimistic <= input.real_applicants);
                assert!(r.weights.optimistic <= r.weights.realistic);
                assert!(r.weights.realistic <= r.weights.pessimistic);
            }
        }
    }
}

#[test]
fn last_revealer_has_rank_ratio_one() {
    let input = PredictionInput::new(35, 245, 100, 100).with_timestamp(season_start(2025));
    let r = predict(&input, &ExternalAdjustment::default(), season_start(2025)).unwrap();
    assert_eq!(r.breakdown.rank_ratio, 1.0);
    assert_eq!(r.ranks.pessimistic, 245);
}

#[test]
fn identical_calls_give_identical_results() {
    for input in snapshot_grid() {
        let adj = ExternalAdjustment::bounded(0.04, "steady");
        let a = predict(&input, &adj, at(2025, 1, 5, 7)).unwrap();
        let b = predict(&input, &adj, at(2025, 1, 5, 7)).unwrap();
        assert_eq!(a, b);
    }
}

#[test]
fn result_serialises_as_flat_camel_case_record() {
    let r = predict(&manual_weight_snapshot(), &ExternalAdjustment::default(), season_start(2025)).unwrap();
    let json = serde_json::to_value(&r).unwrap();
    assert_eq!(json["ranks"]["realistic"], 21);
    assert_eq!(json["metrics"]["maxRank"], 50);
    assert_eq!(json["probabilities"]["realistic"]["waitingNumber"], -14);
    assert_eq!(json["probabilities"]["realistic"]["tier"], "very_safe_admitted");
    assert_eq!(json["breakdown"]["unrevealedCount"], 145);
}
