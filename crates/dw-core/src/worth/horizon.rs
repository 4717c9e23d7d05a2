//! Common-horizon reconciliation for multi-alternative comparison.
//!
//! Worth comparisons are only meaningful over a shared horizon. Given
//! named cash-flow series of differing lengths, this module broadcasts
//! each onto the least common multiple of their horizons (length minus
//! one, since index 0 is period 0) under the repeatability assumption:
//! each alternative is repurchased at the end of every cycle, with the
//! terminal (salvage) flow netted against the fresh initial outlay, and
//! the true terminal value restored in the final cycle.

use std::collections::BTreeMap;

use dw_common::{Error, Result};

/// Broadcast every series onto the least common multiple of all horizons.
///
/// The result maps the same keys to series of identical length
/// `lcm + 1`. Each repeated cycle nets the terminal value against the
/// initial outlay exactly once, and the last cycle restores the true
/// terminal value. A series needs at least two entries to define a
/// horizon; shorter series are rejected.
pub fn common_horizon(series: &BTreeMap<String, Vec<f64>>) -> Result<BTreeMap<String, Vec<f64>>> {
    for (name, flows) in series {
        if flows.len() < 2 {
            return Err(Error::TableShape(format!(
                "cash-flow series '{name}' has {} entr(ies); at least two periods are required to define a horizon",
                flows.len()
            )));
        }
    }

    let lcm_periods = series
        .values()
        .map(|flows| flows.len() - 1)
        .fold(1usize, lcm);

    let mut reconciled = BTreeMap::new();
    for (name, flows) in series {
        let horizon = flows.len() - 1;
        let cycles = lcm_periods / horizon;

        // Net the terminal value against a fresh initial outlay.
        let mut cycle = flows.clone();
        let last = cycle.len() - 1;
        cycle[last] += cycle[0];

        let mut expanded = cycle.clone();
        for _ in 1..cycles {
            expanded.extend_from_slice(&cycle[1..]);
        }

        // The final cycle has no repurchase: restore the true terminal value.
        let last = expanded.len() - 1;
        expanded[last] -= expanded[0];

        reconciled.insert(name.clone(), expanded);
    }

    Ok(reconciled)
}

fn gcd(mut a: usize, mut b: usize) -> usize {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

fn lcm(a: usize, b: usize) -> usize {
    a / gcd(a, b) * b
}
