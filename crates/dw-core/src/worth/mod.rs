//! Cash-flow worth metrics and comparisons.
//!
//! A [`Worth`] value owns one cash-flow series (index 0 is period 0, the
//! present) and an equivalence-factor configuration, and computes the
//! series' present, annual, and future worth at a given rate. The IRR
//! solver lives in [`irr`], benefit-cost composition in [`bcr`], and
//! multi-alternative horizon reconciliation in [`horizon`].

pub mod bcr;
pub mod horizon;
pub mod irr;

pub use bcr::BenefitCost;
pub use horizon::common_horizon;
pub use irr::{IrrOptions, IrrSolution};

use dw_math::{Convention, Factors, RateScale};

/// Worth analysis of a single cash-flow series.
///
/// The series is read-only for the lifetime of the analysis. Amounts are
/// net per-period cash flows; no numeric validation is performed.
#[derive(Debug, Clone)]
pub struct Worth {
    cash_flow: Vec<f64>,
    factors: Factors,
}

impl Worth {
    pub fn new(cash_flow: Vec<f64>, convention: Convention, scale: RateScale) -> Self {
        Self {
            cash_flow,
            factors: Factors::new(convention, scale),
        }
    }

    /// End-of-period convention with fractional rates.
    pub fn end_of_period(cash_flow: Vec<f64>) -> Self {
        Self::new(cash_flow, Convention::End, RateScale::Fractional)
    }

    /// The cash-flow series under analysis.
    pub fn cash_flow(&self) -> &[f64] {
        &self.cash_flow
    }

    /// The factor configuration in use.
    pub fn factors(&self) -> Factors {
        self.factors
    }

    /// Present worth: each period's flow discounted back to period 0.
    pub fn present_worth(&self, rate: f64) -> f64 {
        self.discounted_terms(rate).sum()
    }

    /// Annual worth: present worth spread uniformly over the series
    /// length.
    pub fn annual_worth(&self, rate: f64) -> f64 {
        self.present_worth(rate) * self
            .factors
            .annuity_given_present(rate, self.cash_flow.len() as f64)
    }

    /// Future worth: present worth compounded to the series length.
    pub fn future_worth(&self, rate: f64) -> f64 {
        self.present_worth(rate) * self
            .factors
            .future_given_present(rate, self.cash_flow.len() as f64)
    }

    /// Per-period discounted terms, in period order.
    pub(crate) fn discounted_terms(&self, rate: f64) -> impl Iterator<Item = f64> + '_ {
        self.cash_flow
            .iter()
            .enumerate()
            .map(move |(period, flow)| flow * self.factors.present_given_future(rate, period as f64))
    }
}
