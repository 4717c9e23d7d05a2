//! Decision Worth equivalence-factor math.

pub mod factor;

pub use factor::convention::*;
pub use factor::effective::*;
pub use factor::table::*;
