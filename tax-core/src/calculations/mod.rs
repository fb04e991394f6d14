//! Tax computations: the per-regime bracket walk and the two-regime impact
//! comparison built on top of it.

pub mod common;
pub mod impact;
pub mod regime_calculator;

pub use impact::ImpactEngine;
pub use regime_calculator::{BandTax, RegimeCalculator};
