//! Property-based tests for decision-criteria and IRR invariants.

use proptest::prelude::*;

use dw_core::{Criterion, Decision, IrrOptions, PayoffTable, Worth};

fn payoff_strategy() -> impl Strategy<Value = PayoffTable> {
    (1usize..6, 1usize..5)
        .prop_flat_map(|(m, n)| {
            (
                prop::collection::vec(prop::collection::vec(-1000.0f64..1000.0, n), m),
                prop::collection::vec(0.01f64..1.0, n),
            )
        })
        .prop_map(|(rows, raw_probs)| {
            let total: f64 = raw_probs.iter().sum();
            let mut grid = rows;
            grid.push(raw_probs.iter().map(|p| p / total).collect());
            PayoffTable::from_grid(grid).expect("well-shaped grid")
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(1000))]

    /// Pessimism never beats optimism: the maxmin value is bounded by the
    /// maxmax value.
    #[test]
    fn maxmin_never_beats_maxmax(table in payoff_strategy()) {
        let decision = Decision::new(table);
        let optimistic = decision.choice(Criterion::Maxmax).value;
        let pessimistic = decision.choice(Criterion::Maxmin).value;
        prop_assert!(
            pessimistic <= optimistic + 1e-9,
            "maxmin {pessimistic} exceeds maxmax {optimistic}"
        );
    }

    /// No alternative has a smaller worst-case regret than the minmax
    /// regret choice.
    #[test]
    fn regret_choice_minimizes_worst_case_regret(table in payoff_strategy()) {
        let decision = Decision::new(table);
        let chosen = decision.choice(Criterion::Regret).value;
        for row in decision.regret_matrix() {
            let worst = row.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            prop_assert!(
                chosen <= worst + 1e-9,
                "chosen regret {chosen} exceeds an alternative's worst case {worst}"
            );
        }
    }

    /// The ev choice's expected value dominates every alternative's.
    #[test]
    fn ev_choice_maximizes_expected_value(table in payoff_strategy()) {
        let decision = Decision::new(table);
        let best = decision.choice(Criterion::Ev).value;
        for row in &decision.table().values {
            let ev: f64 = row
                .iter()
                .zip(&decision.table().probabilities)
                .map(|(v, p)| v * p)
                .sum();
            prop_assert!(
                ev <= best + 1e-9,
                "expected value {ev} exceeds the chosen {best}"
            );
        }
    }

    /// The maximum-likelihood value is a payoff the chosen alternative
    /// actually attains in the most probable state's column.
    #[test]
    fn maxlik_value_comes_from_most_probable_column(table in payoff_strategy()) {
        let decision = Decision::new(table);
        let choice = decision.choice(Criterion::Maxlik);
        let table = decision.table();
        let best_state = table
            .probabilities
            .iter()
            .enumerate()
            .max_by(|(_, a), (_, b)| a.partial_cmp(b).expect("probabilities are finite"))
            .map(|(j, _)| j)
            .expect("at least one state");
        let column_max = table
            .values
            .iter()
            .map(|row| row[best_state])
            .fold(f64::NEG_INFINITY, f64::max);
        prop_assert!((choice.value - column_max).abs() <= 1e-12);
    }
}

fn investment_strategy() -> impl Strategy<Value = Vec<f64>> {
    // One up-front outlay followed by inflows: the conventional shape with
    // a single sign change and a well-behaved root.
    (
        -1200.0f64..-800.0,
        prop::collection::vec(200.0f64..600.0, 4..8),
    )
        .prop_map(|(outlay, inflows)| {
            let mut series = vec![outlay];
            series.extend(inflows);
            series
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    /// Feeding a converged IRR back into the present-worth formula lands
    /// within the convergence threshold of zero.
    #[test]
    fn irr_round_trip_zeroes_present_worth(series in investment_strategy()) {
        let worth = Worth::end_of_period(series);
        let options = IrrOptions {
            // Bound the property's runtime; non-convergence within the cap
            // is simply skipped rather than treated as a failure.
            max_iter: 10_000,
            ..IrrOptions::default()
        };
        if let Ok(solution) = worth.irr(&options) {
            let residual = worth.present_worth(solution.rate);
            prop_assert!(
                residual.abs() <= options.threshold,
                "present worth at IRR is {residual}"
            );
        }
    }
}
