//! Comparison of the current and proposed regimes for one monthly income.
//!
//! The engine annualises the monthly income first, then either applies the
//! statutory exemption (annual income at or below the threshold, both
//! regimes zero) or runs both regime calculators. Whichever path is taken,
//! the relief figures are derived in one place from the two regime results.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::debug;

use crate::calculations::RegimeCalculator;
use crate::calculations::common::{MONTHS_PER_YEAR, ratio_or_zero, round_half_up};
use crate::error::{InvalidInputError, TaxImpactError};
use crate::models::{ImpactResult, ImpactSummary, LabeledRegimeResult, RegimeResult};
use crate::regimes::RegimeSet;

/// Runs the two-regime comparison against a [`RegimeSet`].
#[derive(Debug, Clone, Copy)]
pub struct ImpactEngine<'a> {
    regimes: &'a RegimeSet,
}

impl<'a> ImpactEngine<'a> {
    pub fn new(regimes: &'a RegimeSet) -> Self {
        Self { regimes }
    }

    /// Computes the impact of moving from the current to the proposed regime.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidInputError::Negative`] for a negative income and
    /// [`InvalidInputError::OutOfRange`] when annualising would overflow or the
    /// percentage change cannot be represented.
    pub fn calculate(
        &self,
        monthly_income: Decimal,
    ) -> Result<ImpactResult, TaxImpactError> {
        if monthly_income < Decimal::ZERO {
            return Err(InvalidInputError::Negative(monthly_income).into());
        }

        // Every branch below reads annual_income.
        let annual_income = self.annual_income(monthly_income)?;

        let (current, proposed) = if self.is_exempt(annual_income) {
            debug!(%annual_income, "income within exemption threshold");
            (
                RegimeResult::zero(annual_income),
                RegimeResult::zero(annual_income),
            )
        } else {
            (
                RegimeCalculator::new(self.regimes.current()).compute(annual_income)?,
                RegimeCalculator::new(self.regimes.proposed()).compute(annual_income)?,
            )
        };

        let impact = self.summarize(&current, &proposed)?;

        debug!(
            %monthly_income,
            current_tax = %current.annual_tax,
            proposed_tax = %proposed.annual_tax,
            annual_relief = %impact.annual_relief,
            "computed tax impact"
        );

        Ok(ImpactResult {
            monthly_income,
            annual_income,
            current: LabeledRegimeResult {
                label: self.regimes.current().label().to_string(),
                result: current,
            },
            proposed: LabeledRegimeResult {
                label: self.regimes.proposed().label().to_string(),
                result: proposed,
            },
            impact,
        })
    }

    fn annual_income(
        &self,
        monthly_income: Decimal,
    ) -> Result<Decimal, InvalidInputError> {
        monthly_income
            .checked_mul(MONTHS_PER_YEAR)
            .ok_or_else(|| InvalidInputError::OutOfRange(monthly_income.to_string()))
    }

    /// Inclusive: an income exactly at the threshold is exempt.
    fn is_exempt(
        &self,
        annual_income: Decimal,
    ) -> bool {
        annual_income <= self.regimes.exemption_threshold()
    }

    /// Relief figures, computed at full precision and rounded once.
    fn summarize(
        &self,
        current: &RegimeResult,
        proposed: &RegimeResult,
    ) -> Result<ImpactSummary, InvalidInputError> {
        let annual_relief = current.annual_tax - proposed.annual_tax;
        let monthly_relief = annual_relief / MONTHS_PER_YEAR;
        let percentage_change = ratio_or_zero(annual_relief, current.annual_tax)
            .and_then(|ratio| ratio.checked_mul(dec!(100)))
            .ok_or_else(|| InvalidInputError::OutOfRange(current.gross_income.to_string()))?;

        Ok(ImpactSummary {
            monthly_relief: round_half_up(monthly_relief),
            annual_relief: round_half_up(annual_relief),
            percentage_change: round_half_up(percentage_change),
        })
    }
}
