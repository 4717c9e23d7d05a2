//! Decision Worth core engine.
//!
//! This crate provides:
//! - Payoff-table ingestion from four tabular shapes (`payoff`)
//! - The five classical decision criteria over a payoff table (`criteria`)
//! - Cash-flow worth metrics, IRR root-finding, benefit-cost composition,
//!   and common-horizon reconciliation (`worth`)
//!
//! All computation is synchronous and in-memory; every ingested table or
//! cash-flow series is an independently owned, read-only value for the
//! lifetime of one analysis.

pub mod criteria;
pub mod payoff;
pub mod worth;

pub use dw_common::{Error, Result};

pub use criteria::{Choice, Criterion, Decision};
pub use payoff::{Label, PayoffTable, TableFrame};
pub use worth::{common_horizon, BenefitCost, IrrOptions, IrrSolution, Worth};
