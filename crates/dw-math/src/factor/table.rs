//! Single-payment and uniform-series equivalence factors.
//!
//! A [`Factors`] value performs the classical engineering-economy
//! conversions using standard notation: `present_given_future` is the
//! (P/F, i, n) factor, `annuity_given_present` is (A/P, i, n), and so on.
//! Factors apply to individual cash flows, so finding the present
//! equivalent of a $1000 flow five periods out reads
//! `1000.0 * factors.present_given_future(0.10, 5.0)`.
//!
//! Invariants & assumptions
//! ------------------------
//! - The timing convention and rate scale are fixed at construction and
//!   enter every formula through `Convention::period_offset` and
//!   `RateScale::divisor` alone.
//! - Under the mid-period convention, `n - 0.5` replaces `n` in the
//!   single-payment exponent; factors derived by recombination
//!   (`annuity_given_present`, `future_given_gradient`) compound over the
//!   raw `n`, matching the standard tables.
//! - `n` may be fractional; no integrality check is performed.
//! - Rates equal to zero produce infinities or NaN in the annuity and
//!   gradient families; inputs are not validated.

use serde::{Deserialize, Serialize};

use super::convention::{Convention, RateScale};

/// Equivalence-factor calculator with a fixed convention and rate scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Factors {
    convention: Convention,
    scale: RateScale,
}

impl Factors {
    pub fn new(convention: Convention, scale: RateScale) -> Self {
        Self { convention, scale }
    }

    pub fn convention(&self) -> Convention {
        self.convention
    }

    pub fn scale(&self) -> RateScale {
        self.scale
    }

    /// Input rate mapped onto its fractional value.
    pub(crate) fn fractional_rate(&self, i: f64) -> f64 {
        i / self.scale.divisor()
    }

    /// Period count with the convention's offset applied.
    pub(crate) fn effective_periods(&self, n: f64) -> f64 {
        n - self.convention.period_offset()
    }

    /// (P/F, i, n): present value of a single future cash flow.
    pub fn present_given_future(&self, i: f64, n: f64) -> f64 {
        let r = self.fractional_rate(i);
        (1.0 + r).powf(-self.effective_periods(n))
    }

    /// (F/P, i, n): future value of a single present cash flow.
    pub fn future_given_present(&self, i: f64, n: f64) -> f64 {
        1.0 / self.present_given_future(i, n)
    }

    /// (A/F, i, n): uniform series equivalent to a single future cash flow.
    pub fn annuity_given_future(&self, i: f64, n: f64) -> f64 {
        let r = self.fractional_rate(i);
        r / ((1.0 + r).powf(self.effective_periods(n)) - 1.0)
    }

    /// (F/A, i, n): future value of a uniform series.
    pub fn future_given_annuity(&self, i: f64, n: f64) -> f64 {
        1.0 / self.annuity_given_future(i, n)
    }

    /// (A/P, i, n): uniform series equivalent to a single present cash flow.
    ///
    /// Recombined as (F/P, i, n) x (A/F, i, n); the compounding term uses
    /// the raw `n` under either convention.
    pub fn annuity_given_present(&self, i: f64, n: f64) -> f64 {
        let r = self.fractional_rate(i);
        (1.0 + r).powf(n) * self.annuity_given_future(i, n)
    }

    /// (P/A, i, n): present value of a uniform series.
    pub fn present_given_annuity(&self, i: f64, n: f64) -> f64 {
        1.0 / self.annuity_given_present(i, n)
    }
}

impl Default for Factors {
    /// End-of-period timing with fractional rates.
    fn default() -> Self {
        Self::new(Convention::End, RateScale::Fractional)
    }
}
