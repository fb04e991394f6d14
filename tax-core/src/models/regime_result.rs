use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Liability computed for one gross income under one regime.
///
/// Values carry full precision; only the impact summary is rounded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegimeResult {
    pub gross_income: Decimal,
    pub taxable_income: Decimal,
    pub consolidated_relief: Decimal,
    pub annual_tax: Decimal,
    pub monthly_tax: Decimal,
    pub effective_rate: Decimal,
}

impl RegimeResult {
    /// Result for an income inside the statutory exemption band: gross income
    /// is carried through and everything else is zero.
    pub fn zero(gross_income: Decimal) -> Self {
        Self {
            gross_income,
            taxable_income: Decimal::ZERO,
            consolidated_relief: Decimal::ZERO,
            annual_tax: Decimal::ZERO,
            monthly_tax: Decimal::ZERO,
            effective_rate: Decimal::ZERO,
        }
    }
}
