//! Decision criteria over a payoff table.
//!
//! Implements the five classical criteria for decision-making under
//! uncertainty: maxmax (optimistic), maxmin (pessimistic), minmax regret
//! (opportunity cost), maximum likelihood, and expected value.
//!
//! # Dispatch model
//!
//! The criteria form a closed, enumerable set of compute strategies.
//! [`Criterion`] is the lookup key: parsing a name either lands on one of
//! the five strategies or fails as [`Error::UnknownCriterion`] before any
//! evaluation starts. Each strategy is independently invocable through
//! [`Decision::choice`]; [`Decision::evaluate`] runs the requested set and
//! returns the results map built once, so callers never observe partial
//! state.
//!
//! # Tie-breaks
//!
//! Every selection is stable: the first alternative (row order) attaining
//! the optimum wins, and the maximum-likelihood criterion picks the first
//! state (column order) among equally probable states.
//!
//! # Numeric semantics
//!
//! All reductions run on IEEE doubles. NaN payoffs (for example from
//! non-numeric cells passed through ingestion) make the chosen
//! alternative and value unspecified; NaN handling is deliberately not
//! defined here.

use std::collections::BTreeMap;
use std::str::FromStr;
use std::sync::OnceLock;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use dw_common::{Error, Result};

use crate::payoff::{Label, PayoffTable};

/// The closed set of decision criteria.
///
/// Declaration order is the fixed default evaluation order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum Criterion {
    /// Best best-case payoff (optimistic).
    Maxmax,
    /// Best worst-case payoff (pessimistic).
    Maxmin,
    /// Smallest worst-case regret (opportunity cost).
    Regret,
    /// Best payoff in the most probable state.
    Maxlik,
    /// Highest probability-weighted payoff.
    Ev,
}

impl Criterion {
    /// All criteria in the fixed default order.
    pub const ALL: [Criterion; 5] = [
        Criterion::Maxmax,
        Criterion::Maxmin,
        Criterion::Regret,
        Criterion::Maxlik,
        Criterion::Ev,
    ];

    /// Canonical lowercase name.
    pub fn name(&self) -> &'static str {
        match self {
            Criterion::Maxmax => "maxmax",
            Criterion::Maxmin => "maxmin",
            Criterion::Regret => "regret",
            Criterion::Maxlik => "maxlik",
            Criterion::Ev => "ev",
        }
    }
}

impl std::fmt::Display for Criterion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Criterion {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "maxmax" => Ok(Criterion::Maxmax),
            "maxmin" => Ok(Criterion::Maxmin),
            "regret" => Ok(Criterion::Regret),
            "maxlik" => Ok(Criterion::Maxlik),
            "ev" => Ok(Criterion::Ev),
            _ => Err(Error::UnknownCriterion {
                name: s.to_string(),
            }),
        }
    }
}

/// One criterion's result: the chosen alternative and its value.
///
/// For maxmax/maxmin/maxlik the value is a payoff from the matrix; for
/// regret it is the chosen alternative's worst-case regret; for ev it is
/// the chosen alternative's expected value.
#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
pub struct Choice {
    pub alternative: Label,
    pub value: f64,
}

/// A decision analysis over one payoff table.
///
/// Owns the table for the lifetime of the analysis; the regret matrix is
/// derived lazily and cached on first use of the regret criterion.
#[derive(Debug)]
pub struct Decision {
    table: PayoffTable,
    criteria: Vec<Criterion>,
    regret: OnceLock<Vec<Vec<f64>>>,
}

impl Decision {
    /// Analysis requesting all five criteria in the fixed default order.
    pub fn new(table: PayoffTable) -> Self {
        Self::with_criteria(table, Criterion::ALL.to_vec())
    }

    /// Analysis requesting an explicit criterion list.
    pub fn with_criteria(table: PayoffTable, criteria: Vec<Criterion>) -> Self {
        Self {
            table,
            criteria,
            regret: OnceLock::new(),
        }
    }

    /// Analysis from criterion names.
    ///
    /// Names are resolved up front, so an unknown name fails here, before
    /// any criterion is computed.
    pub fn from_names<S: AsRef<str>>(table: PayoffTable, names: &[S]) -> Result<Self> {
        let criteria = names
            .iter()
            .map(|name| name.as_ref().parse())
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::with_criteria(table, criteria))
    }

    /// The payoff table under analysis.
    pub fn table(&self) -> &PayoffTable {
        &self.table
    }

    /// The requested criteria, in evaluation order.
    pub fn criteria(&self) -> &[Criterion] {
        &self.criteria
    }

    /// The regret (opportunity-cost) matrix: per-state column maximum
    /// minus cell value. Computed on first use and cached.
    pub fn regret_matrix(&self) -> &[Vec<f64>] {
        self.regret.get_or_init(|| {
            let column_max: Vec<f64> = (0..self.table.n_states())
                .map(|j| fold_max(self.table.values.iter().map(|row| row[j])))
                .collect();
            self.table
                .values
                .iter()
                .map(|row| row.iter().zip(&column_max).map(|(v, m)| m - v).collect())
                .collect()
        })
    }

    /// Evaluate a single criterion.
    pub fn choice(&self, criterion: Criterion) -> Choice {
        match criterion {
            Criterion::Maxmax => self.best_row(|row| fold_max(row.iter().copied())),
            Criterion::Maxmin => self.best_row(|row| fold_min(row.iter().copied())),
            Criterion::Regret => {
                let worst: Vec<f64> = self
                    .regret_matrix()
                    .iter()
                    .map(|row| fold_max(row.iter().copied()))
                    .collect();
                let pick = argmin_first(&worst);
                Choice {
                    alternative: self.table.alternatives[pick].clone(),
                    value: worst[pick],
                }
            }
            Criterion::Maxlik => {
                let state = argmax_first(&self.table.probabilities);
                let column: Vec<f64> =
                    self.table.values.iter().map(|row| row[state]).collect();
                let pick = argmax_first(&column);
                Choice {
                    alternative: self.table.alternatives[pick].clone(),
                    value: column[pick],
                }
            }
            Criterion::Ev => self.best_row(|row| {
                row.iter()
                    .zip(&self.table.probabilities)
                    .map(|(v, p)| v * p)
                    .sum()
            }),
        }
    }

    /// Evaluate every requested criterion and return the complete results
    /// map, keyed by criterion.
    pub fn evaluate(&self) -> BTreeMap<Criterion, Choice> {
        self.criteria
            .iter()
            .map(|&criterion| (criterion, self.choice(criterion)))
            .collect()
    }

    /// Score each alternative's row and pick the highest scorer.
    fn best_row<F: Fn(&[f64]) -> f64>(&self, score: F) -> Choice {
        let scores: Vec<f64> = self.table.values.iter().map(|row| score(row)).collect();
        let pick = argmax_first(&scores);
        Choice {
            alternative: self.table.alternatives[pick].clone(),
            value: scores[pick],
        }
    }
}

fn fold_max(values: impl Iterator<Item = f64>) -> f64 {
    values.fold(f64::NEG_INFINITY, f64::max)
}

fn fold_min(values: impl Iterator<Item = f64>) -> f64 {
    values.fold(f64::INFINITY, f64::min)
}

/// Index of the maximum, first occurrence winning ties.
fn argmax_first(values: &[f64]) -> usize {
    let mut best = 0;
    for (i, v) in values.iter().enumerate().skip(1) {
        if *v > values[best] {
            best = i;
        }
    }
    best
}

/// Index of the minimum, first occurrence winning ties.
fn argmin_first(values: &[f64]) -> usize {
    let mut best = 0;
    for (i, v) in values.iter().enumerate().skip(1) {
        if *v < values[best] {
            best = i;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payoff::PayoffTable;

    fn two_by_two() -> PayoffTable {
        PayoffTable::from_grid(vec![
            vec![10.0, 40.0],
            vec![20.0, 30.0],
            vec![0.6, 0.4],
        ])
        .unwrap()
    }

    #[test]
    fn criterion_names_round_trip() {
        for criterion in Criterion::ALL {
            assert_eq!(criterion.name().parse::<Criterion>().unwrap(), criterion);
        }
    }

    #[test]
    fn unknown_name_is_a_lookup_miss() {
        let err = "hurwicz".parse::<Criterion>().unwrap_err();
        assert!(matches!(err, Error::UnknownCriterion { name } if name == "hurwicz"));
    }

    #[test]
    fn from_names_rejects_before_evaluating() {
        let err = Decision::from_names(two_by_two(), &["maxmax", "laplace"]).unwrap_err();
        assert!(matches!(err, Error::UnknownCriterion { .. }), "got {err:?}");
    }

    #[test]
    fn maxmax_picks_best_best_case() {
        let decision = Decision::new(two_by_two());
        let choice = decision.choice(Criterion::Maxmax);
        assert_eq!(choice.alternative, Label::Index(0));
        assert_eq!(choice.value, 40.0);
    }

    #[test]
    fn maxmin_picks_best_worst_case() {
        let decision = Decision::new(two_by_two());
        let choice = decision.choice(Criterion::Maxmin);
        assert_eq!(choice.alternative, Label::Index(1));
        assert_eq!(choice.value, 20.0);
    }

    #[test]
    fn regret_matrix_is_opportunity_cost() {
        let decision = Decision::new(two_by_two());
        // Column maxima are 20 and 40.
        assert_eq!(
            decision.regret_matrix().to_vec(),
            vec![vec![10.0, 0.0], vec![0.0, 10.0]]
        );
    }

    #[test]
    fn regret_ties_break_to_first_row() {
        let decision = Decision::new(two_by_two());
        // Both alternatives have worst-case regret 10; the first row wins.
        let choice = decision.choice(Criterion::Regret);
        assert_eq!(choice.alternative, Label::Index(0));
        assert_eq!(choice.value, 10.0);
    }

    #[test]
    fn maxlik_restricts_to_most_probable_state() {
        let decision = Decision::new(two_by_two());
        // State 0 is most probable; column is [10, 20].
        let choice = decision.choice(Criterion::Maxlik);
        assert_eq!(choice.alternative, Label::Index(1));
        assert_eq!(choice.value, 20.0);
    }

    #[test]
    fn maxlik_probability_ties_break_to_first_state() {
        let table = PayoffTable::from_grid(vec![
            vec![1.0, 9.0],
            vec![2.0, 8.0],
            vec![0.5, 0.5],
        ])
        .unwrap();
        let decision = Decision::new(table);
        // First equally probable state is column 0.
        let choice = decision.choice(Criterion::Maxlik);
        assert_eq!(choice.alternative, Label::Index(1));
        assert_eq!(choice.value, 2.0);
    }

    #[test]
    fn ev_weights_by_probabilities() {
        let decision = Decision::new(two_by_two());
        // EVs: 0.6*10 + 0.4*40 = 22 vs 0.6*20 + 0.4*30 = 24.
        let choice = decision.choice(Criterion::Ev);
        assert_eq!(choice.alternative, Label::Index(1));
        assert!((choice.value - 24.0).abs() < 1e-12);
    }

    #[test]
    fn evaluate_returns_one_entry_per_requested_criterion() {
        let decision = Decision::with_criteria(
            two_by_two(),
            vec![Criterion::Ev, Criterion::Maxmin],
        );
        let results = decision.evaluate();
        assert_eq!(results.len(), 2);
        assert!(results.contains_key(&Criterion::Ev));
        assert!(results.contains_key(&Criterion::Maxmin));
        assert!(!results.contains_key(&Criterion::Maxmax));
    }

    #[test]
    fn default_request_covers_all_five() {
        let decision = Decision::new(two_by_two());
        assert_eq!(decision.criteria(), &Criterion::ALL);
        assert_eq!(decision.evaluate().len(), 5);
    }

    #[test]
    fn criterion_serializes_to_lowercase_name() {
        let json = serde_json::to_string(&Criterion::Maxlik).unwrap();
        assert_eq!(json, "\"maxlik\"");
    }

    #[test]
    fn results_map_serializes_keyed_by_name() {
        let decision = Decision::with_criteria(two_by_two(), vec![Criterion::Maxmax]);
        let json = serde_json::to_string(&decision.evaluate()).unwrap();
        assert!(json.contains("\"maxmax\""), "got {json}");
        assert!(json.contains("\"alternative\":0"), "got {json}");
    }
}
