use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculations::common::max;
use crate::error::ConfigurationError;

/// Consolidated relief allowance rule for one regime.
///
/// The allowance is `max(floor_amount, floor_rate * gross) + flat_rate * gross`.
/// A regime without relief uses [`ReliefRule::NONE`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReliefRule {
    /// Minimum value of the floor-or-percentage term.
    pub floor_amount: Decimal,

    /// Percentage of gross income competing with `floor_amount`.
    pub floor_rate: Decimal,

    /// Percentage of gross income always added on top.
    pub flat_rate: Decimal,
}

impl ReliefRule {
    pub const NONE: ReliefRule = ReliefRule {
        floor_amount: Decimal::ZERO,
        floor_rate: Decimal::ZERO,
        flat_rate: Decimal::ZERO,
    };

    /// Builds a validated relief rule.
    ///
    /// # Arguments
    ///
    /// * `floor_amount` - Minimum of the floor-or-percentage term
    /// * `floor_rate` - Share of gross income competing with the floor
    /// * `flat_rate` - Share of gross income always added
    ///
    /// # Returns
    ///
    /// The rule, or [`ConfigurationError::InvalidRelief`] when the floor is
    /// negative, a rate falls outside `[0, 1]`, or the rates sum above 1.
    ///
    /// # Examples
    ///
    /// ```
    /// use rust_decimal_macros::dec;
    /// use tax_core::ReliefRule;
    ///
    /// let cra = ReliefRule::new(dec!(200000), dec!(0.01), dec!(0.20)).unwrap();
    /// assert_eq!(cra.relief_for(dec!(6000000)), dec!(1400000));
    ///
    /// assert!(ReliefRule::new(dec!(0), dec!(0.6), dec!(0.6)).is_err());
    /// ```
    pub fn new(
        floor_amount: Decimal,
        floor_rate: Decimal,
        flat_rate: Decimal,
    ) -> Result<Self, ConfigurationError> {
        let rule = Self {
            floor_amount,
            floor_rate,
            flat_rate,
        };
        rule.validate()?;
        Ok(rule)
    }

    /// Checks the constants keep taxable income non-decreasing in gross income.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.floor_amount < Decimal::ZERO {
            return Err(ConfigurationError::InvalidRelief(format!(
                "floor amount must not be negative, got {}",
                self.floor_amount
            )));
        }
        for (name, rate) in [("floor", self.floor_rate), ("flat", self.flat_rate)] {
            if rate < Decimal::ZERO || rate > Decimal::ONE {
                return Err(ConfigurationError::InvalidRelief(format!(
                    "{name} rate must be between 0 and 1, got {rate}"
                )));
            }
        }
        if self.floor_rate + self.flat_rate > Decimal::ONE {
            return Err(ConfigurationError::InvalidRelief(format!(
                "floor rate {} plus flat rate {} exceeds 1",
                self.floor_rate, self.flat_rate
            )));
        }
        Ok(())
    }

    /// Relief allowed against `gross_income`.
    ///
    /// Saturates at [`Decimal::MAX`]; any relief that large already leaves no
    /// taxable income.
    pub fn relief_for(
        &self,
        gross_income: Decimal,
    ) -> Decimal {
        max(self.floor_amount, self.floor_rate * gross_income)
            .saturating_add(self.flat_rate * gross_income)
    }
}
