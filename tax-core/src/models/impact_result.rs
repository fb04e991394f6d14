use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::RegimeResult;

/// A [`RegimeResult`] tagged with the regime's display label.
///
/// Serializes flat: `{"label": "...", "gross_income": ..., ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabeledRegimeResult {
    pub label: String,
    #[serde(flatten)]
    pub result: RegimeResult,
}

/// Difference between the current and proposed regimes, rounded to 2 places.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ImpactSummary {
    pub monthly_relief: Decimal,
    /// Current annual tax minus proposed annual tax. Negative when the
    /// proposed regime costs more.
    pub annual_relief: Decimal,
    pub percentage_change: Decimal,
}

/// Full comparison returned by the impact engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImpactResult {
    pub monthly_income: Decimal,
    pub annual_income: Decimal,
    pub current: LabeledRegimeResult,
    pub proposed: LabeledRegimeResult,
    pub impact: ImpactSummary,
}
