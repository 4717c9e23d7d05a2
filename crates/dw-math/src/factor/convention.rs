//! Cash-flow timing conventions and rate representations.
//!
//! Both choices are fixed when a [`Factors`](super::table::Factors) value is
//! constructed and parameterize every formula through a single constant:
//! the convention contributes a period offset, the scale a rate divisor.
//! Beginning-of-period timing is not modeled; it can usually be expressed
//! by adjusting `n` at the call site.

use serde::{Deserialize, Serialize};

/// Timing convention for cash flows within a period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Convention {
    /// Cash flows occur at the end of each period.
    End,
    /// Cash flows occur at the middle of each period.
    Mid,
}

impl Convention {
    /// Offset subtracted from `n` in single-payment and gradient formulas.
    pub fn period_offset(&self) -> f64 {
        match self {
            Convention::End => 0.0,
            Convention::Mid => 0.5,
        }
    }

    /// Total-function lookup from a convention name.
    pub fn from_name(name: &str) -> Option<Convention> {
        match name {
            "end" => Some(Convention::End),
            "mid" => Some(Convention::Mid),
            _ => None,
        }
    }
}

impl std::fmt::Display for Convention {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Convention::End => write!(f, "end"),
            Convention::Mid => write!(f, "mid"),
        }
    }
}

/// How interest and growth rates are expressed at the API boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RateScale {
    /// Rates are fractions: 0.10 means 10%.
    Fractional,
    /// Rates are whole-number percentages: 10 means 10%.
    Percent,
}

impl RateScale {
    /// Divisor that maps an input rate onto its fractional value.
    pub fn divisor(&self) -> f64 {
        match self {
            RateScale::Fractional => 1.0,
            RateScale::Percent => 100.0,
        }
    }

    /// Total-function lookup from a scale name.
    pub fn from_name(name: &str) -> Option<RateScale> {
        match name {
            "fractional" => Some(RateScale::Fractional),
            "percent" => Some(RateScale::Percent),
            _ => None,
        }
    }
}

impl std::fmt::Display for RateScale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RateScale::Fractional => write!(f, "fractional"),
            RateScale::Percent => write!(f, "percent"),
        }
    }
}
