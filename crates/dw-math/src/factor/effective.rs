//! Effective interest rate conversion.

use super::convention::RateScale;

/// Effective rate for a nominal rate `r` compounded `m` times per period:
/// `((1 + r/m)^m - 1)`, expressed in the same [`RateScale`] as the input.
///
/// `m` is conventionally an integer but fractional compounding counts are
/// accepted unchecked.
pub fn effective_rate(r: f64, m: f64, scale: RateScale) -> f64 {
    let s = scale.divisor();
    ((1.0 + r / (s * m)).powf(m) - 1.0) * s
}
