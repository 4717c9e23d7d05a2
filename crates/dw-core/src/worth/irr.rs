//! Internal rate of return via Newton-Raphson root-finding.
//!
//! The IRR is the rate at which a series' present worth is zero. The
//! solver walks the classic state machine INITIAL -> ITERATING ->
//! {CONVERGED, DIVERGED}: starting from a caller-supplied or derived
//! guess, each step evaluates the present worth and its rate derivative
//! and takes one Newton update, stopping when the present-worth magnitude
//! falls to the threshold or the iteration cap is exhausted.
//!
//! The convergence threshold applies to the present-worth magnitude, not
//! to the rate delta; the iteration cap is a separate bound. Exceeding
//! the cap is reported as [`Error::NonConvergence`] carrying the last
//! rate estimate, never as a crash or a silent fallback. Whole-percent
//! rate scales converge noticeably slower than fractional ones because
//! the threshold is measured in currency while steps move in rate units.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::debug;

use dw_common::{Error, Result};

use super::Worth;

/// Call-site configuration for one IRR solve.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct IrrOptions {
    /// Starting rate, in the configured scale. When absent the guess is
    /// `|cash_flow[0]| / sum(cash_flow[1..])`, scaled.
    pub guess: Option<f64>,
    /// Iteration cap before the solve is declared diverged.
    pub max_iter: u64,
    /// Present-worth magnitude at which the solve is converged.
    pub threshold: f64,
    /// Emit a per-iteration diagnostic event.
    pub verbose: bool,
    /// Emit a single summary event on convergence.
    pub summary: bool,
}

impl Default for IrrOptions {
    fn default() -> Self {
        Self {
            guess: None,
            max_iter: 10_000_000,
            threshold: 1e-5,
            verbose: false,
            summary: false,
        }
    }
}

/// A converged IRR solve.
#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
pub struct IrrSolution {
    /// The internal rate of return, in the configured scale.
    pub rate: f64,
    /// Newton steps taken.
    pub iterations: u64,
}

impl Worth {
    /// Solve for the internal rate of return of this series.
    ///
    /// Returns [`Error::NonConvergence`] with the last rate estimate when
    /// the iteration cap is exceeded, and [`Error::TableShape`] for an
    /// empty series (which has no period-0 flow to seed the guess).
    pub fn irr(&self, options: &IrrOptions) -> Result<IrrSolution> {
        let Some(first) = self.cash_flow().first() else {
            return Err(Error::TableShape(
                "cash-flow series is empty; IRR is undefined".into(),
            ));
        };
        let scale = self.factors().scale().divisor();

        let mut rate = match options.guess {
            Some(guess) => guess,
            None => {
                let tail: f64 = self.cash_flow()[1..].iter().sum();
                first.abs() / tail * scale
            }
        };

        let mut present_worth = self.present_worth(rate);
        let mut iterations = 0u64;

        while present_worth.abs() > options.threshold {
            iterations += 1;
            if iterations > options.max_iter {
                debug!(
                    iterations = options.max_iter,
                    last_rate = rate,
                    "irr diverged at iteration cap"
                );
                return Err(Error::NonConvergence {
                    iterations: options.max_iter,
                    last_rate: rate,
                });
            }

            let terms: Vec<f64> = self.discounted_terms(rate).collect();
            // d(PW)/d(rate) in fractional units: -1/(1+r) * sum(p * term_p).
            let fractional = rate / scale;
            let weighted: f64 = terms
                .iter()
                .enumerate()
                .map(|(period, term)| period as f64 * term)
                .sum();
            let derivative = -1.0 / (fractional + 1.0) * weighted;

            present_worth = terms.iter().sum();
            rate -= present_worth / derivative;

            if options.verbose {
                debug!(iteration = iterations, rate, present_worth, "irr newton step");
            }
        }

        if options.verbose || options.summary {
            debug!(iterations, rate, "irr converged");
        }
        Ok(IrrSolution { rate, iterations })
    }
}
