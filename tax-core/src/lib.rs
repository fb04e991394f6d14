//! Personal income tax impact engine.
//!
//! Compares liability under the 2024 PITA regime with the 2026 reform for a
//! monthly income and reports the relief the reform delivers.
//!
//! ```
//! use rust_decimal_macros::dec;
//!
//! let result = tax_core::calculate_tax_impact(dec!(500000)).unwrap();
//!
//! assert_eq!(result.annual_income, dec!(6000000));
//! assert_eq!(result.impact.annual_relief, dec!(26000.00));
//! assert_eq!(result.impact.percentage_change, dec!(2.90));
//! ```

pub mod calculations;
pub mod error;
pub mod income;
pub mod models;
pub mod regimes;

use rust_decimal::Decimal;

pub use calculations::{ImpactEngine, RegimeCalculator};
pub use error::{ConfigurationError, InvalidInputError, TaxImpactError};
pub use models::*;
pub use regimes::RegimeSet;

/// Computes the tax impact for `monthly_income` using the built-in regimes.
///
/// # Errors
///
/// Returns [`TaxImpactError::InvalidInput`] for a negative or unrepresentable
/// income and [`TaxImpactError::Configuration`] if the built-in tables fail
/// validation.
pub fn calculate_tax_impact(monthly_income: Decimal) -> Result<ImpactResult, TaxImpactError> {
    let regimes = RegimeSet::builtin()?;
    ImpactEngine::new(regimes).calculate(monthly_income)
}

/// Float entry point for callers at a JSON or tool boundary.
///
/// NaN and infinities are rejected with [`InvalidInputError::NonFinite`].
pub fn calculate_tax_impact_f64(monthly_income: f64) -> Result<ImpactResult, TaxImpactError> {
    calculate_tax_impact(income::from_f64(monthly_income)?)
}
