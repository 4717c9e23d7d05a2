//! Benefit-cost ratio composition.
//!
//! Composes two worth analyses, one for the benefit stream and one for
//! the cost stream, each discounted at its own rate. Both streams are
//! conventionally supplied as positive cash flows.

use tracing::warn;

use dw_common::{Error, Result};
use dw_math::{Convention, RateScale};

use super::Worth;

/// Benefit-cost analysis over a pair of cash-flow streams.
#[derive(Debug, Clone)]
pub struct BenefitCost {
    benefits: Worth,
    costs: Worth,
    benefit_rate: f64,
    cost_rate: f64,
}

impl BenefitCost {
    /// Build a benefit-cost analysis, resolving the discount rates.
    ///
    /// Rate resolution: a single `rate` applies to both streams;
    /// otherwise `benefit_rate` and `cost_rate` must be supplied
    /// together. Supplying exactly one per-stream rate is a contract
    /// violation ([`Error::RateSpecification`]) whether or not a shared
    /// rate is present. Supplying a shared rate alongside per-stream
    /// rates logs a warning and the shared rate silently overrides.
    pub fn new(
        benefit: Vec<f64>,
        cost: Vec<f64>,
        rate: Option<f64>,
        benefit_rate: Option<f64>,
        cost_rate: Option<f64>,
        convention: Convention,
        scale: RateScale,
    ) -> Result<Self> {
        if rate.is_some() && (benefit_rate.is_some() || cost_rate.is_some()) {
            warn!(
                "shared rate and per-stream rates both supplied; the shared rate \
                 overrides benefit_rate and cost_rate"
            );
        }
        if benefit_rate.is_some() != cost_rate.is_some() {
            return Err(Error::RateSpecification(
                "benefit_rate and cost_rate must be supplied together".into(),
            ));
        }

        let (benefit_rate, cost_rate) = match (rate, benefit_rate, cost_rate) {
            (Some(shared), _, _) => (shared, shared),
            (None, Some(b), Some(c)) => (b, c),
            (None, _, _) => {
                return Err(Error::RateSpecification(
                    "a shared rate or both per-stream rates are required".into(),
                ))
            }
        };

        Ok(Self {
            benefits: Worth::new(benefit, convention, scale),
            costs: Worth::new(cost, convention, scale),
            benefit_rate,
            cost_rate,
        })
    }

    /// Shared-rate construction under the end-of-period convention.
    pub fn with_rate(benefit: Vec<f64>, cost: Vec<f64>, rate: f64) -> Self {
        Self {
            benefits: Worth::end_of_period(benefit),
            costs: Worth::end_of_period(cost),
            benefit_rate: rate,
            cost_rate: rate,
        }
    }

    /// Present worth of the benefit stream at its resolved rate.
    pub fn benefit_present_worth(&self) -> f64 {
        self.benefits.present_worth(self.benefit_rate)
    }

    /// Present worth of the cost stream at its resolved rate.
    pub fn cost_present_worth(&self) -> f64 {
        self.costs.present_worth(self.cost_rate)
    }

    /// Benefit-cost ratio: benefit present worth over cost present worth.
    ///
    /// A zero-cost stream yields an infinite or NaN ratio; division is
    /// deliberately not guarded.
    pub fn ratio(&self) -> f64 {
        self.benefit_present_worth() / self.cost_present_worth()
    }
}
