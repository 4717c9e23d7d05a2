//! Arithmetic and geometric gradient equivalence factors.
//!
//! Gradient factors follow the convention that the first-period gradient
//! value is zero, so a shifted series usually combines a gradient factor
//! with the matching annuity factor at the call site. Under the
//! mid-period convention the same `n - 0.5` substitution used for single
//! payments recurses into every gradient formula; the compounding
//! multiplier of the derived (F/G) factor keeps the raw `n`.

use super::table::Factors;

impl Factors {
    /// (P/G, i, n): present value of an arithmetic-gradient series.
    pub fn present_given_gradient(&self, i: f64, n: f64) -> f64 {
        let r = self.fractional_rate(i);
        let n = self.effective_periods(n);
        let growth = (1.0 + r).powf(n);
        (growth - 1.0) / (r * r * growth) - n / (r * growth)
    }

    /// (A/G, i, n): uniform series equivalent to an arithmetic gradient.
    pub fn annuity_given_gradient(&self, i: f64, n: f64) -> f64 {
        let r = self.fractional_rate(i);
        let n = self.effective_periods(n);
        1.0 / r - n / ((1.0 + r).powf(n) - 1.0)
    }

    /// (F/G, i, n): future value of an arithmetic gradient, derived as
    /// (F/P, i, n) x (P/G, i, n).
    pub fn future_given_gradient(&self, i: f64, n: f64) -> f64 {
        let r = self.fractional_rate(i);
        (1.0 + r).powf(n) * self.present_given_gradient(i, n)
    }

    /// (P/g, i, g, n): present value of a geometric-gradient series with
    /// per-period growth `g` (negative `g` decays).
    ///
    /// When the scaled interest rate equals the scaled growth rate the
    /// general expression degenerates to `n / (1 + i)`, avoiding the
    /// division by zero.
    pub fn present_given_geometric(&self, i: f64, g: f64, n: f64) -> f64 {
        let r = self.fractional_rate(i);
        let g = self.fractional_rate(g);
        let n = self.effective_periods(n);
        if r == g {
            n / (1.0 + r)
        } else {
            (1.0 - (1.0 + g).powf(n) * (1.0 + r).powf(-n)) / (r - g)
        }
    }
}
