//! Marginal-rate tax computation for a single regime.
//!
//! The calculator applies the regime's relief rule to gross income, then
//! walks the bracket table taxing only the slice of taxable income inside
//! each band:
//!
//! | Step | Value |
//! |------|-------|
//! | 1    | Consolidated relief = relief rule applied to gross income |
//! | 2    | Taxable income = gross income - relief (minimum 0) |
//! | 3    | Annual tax = sum over bands of (slice in band x band rate) |
//! | 4    | Monthly tax = annual tax / 12 |
//! | 5    | Effective rate = annual tax / gross income (0 when gross is 0) |
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use tax_core::calculations::RegimeCalculator;
//! use tax_core::regimes;
//!
//! let regime = regimes::pita_2024().unwrap();
//! let result = RegimeCalculator::new(&regime).compute(dec!(6000000)).unwrap();
//!
//! assert_eq!(result.consolidated_relief, dec!(1400000));
//! assert_eq!(result.taxable_income, dec!(4600000));
//! assert_eq!(result.annual_tax, dec!(896000));
//! ```

use rust_decimal::Decimal;
use tracing::trace;

use crate::calculations::common::{MONTHS_PER_YEAR, max, ratio_or_zero};
use crate::error::InvalidInputError;
use crate::models::{Regime, RegimeResult, TaxBracket};

/// Tax raised by one band of the walk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BandTax<'a> {
    pub bracket: &'a TaxBracket,
    /// Portion of taxable income inside the band.
    pub taxable_portion: Decimal,
    pub tax: Decimal,
}

/// Computes liability under one [`Regime`].
#[derive(Debug, Clone, Copy)]
pub struct RegimeCalculator<'a> {
    regime: &'a Regime,
}

impl<'a> RegimeCalculator<'a> {
    pub fn new(regime: &'a Regime) -> Self {
        Self { regime }
    }

    /// Computes relief, taxable income and tax for `gross_income`.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidInputError::Negative`] when `gross_income` is below zero
    /// and [`InvalidInputError::OutOfRange`] when the effective rate cannot be
    /// represented.
    pub fn compute(
        &self,
        gross_income: Decimal,
    ) -> Result<RegimeResult, InvalidInputError> {
        if gross_income < Decimal::ZERO {
            return Err(InvalidInputError::Negative(gross_income));
        }

        let consolidated_relief = self.consolidated_relief(gross_income);
        let taxable_income = self.taxable_income(gross_income, consolidated_relief);
        let annual_tax = self.annual_tax(taxable_income);
        let monthly_tax = annual_tax / MONTHS_PER_YEAR;
        let effective_rate = ratio_or_zero(annual_tax, gross_income)
            .ok_or_else(|| InvalidInputError::OutOfRange(gross_income.to_string()))?;

        trace!(
            regime = self.regime.label(),
            %gross_income,
            %consolidated_relief,
            %taxable_income,
            %annual_tax,
            "computed regime liability"
        );

        Ok(RegimeResult {
            gross_income,
            taxable_income,
            consolidated_relief,
            annual_tax,
            monthly_tax,
            effective_rate,
        })
    }

    /// Per-band slices of `taxable_income`, lowest band first.
    ///
    /// Bands starting at or above `taxable_income` are omitted.
    pub fn band_breakdown(
        &self,
        taxable_income: Decimal,
    ) -> Vec<BandTax<'a>> {
        self.bands(taxable_income).collect()
    }

    fn bands(
        &self,
        taxable_income: Decimal,
    ) -> impl Iterator<Item = BandTax<'a>> + use<'a> {
        let regime: &'a Regime = self.regime;
        regime
            .brackets()
            .brackets()
            .iter()
            .take_while(move |b| b.lower_bound < taxable_income)
            .map(move |bracket| {
                let taxable_portion = bracket.portion_of(taxable_income);
                BandTax {
                    bracket,
                    taxable_portion,
                    tax: taxable_portion * bracket.rate,
                }
            })
    }

    fn consolidated_relief(
        &self,
        gross_income: Decimal,
    ) -> Decimal {
        self.regime.relief().relief_for(gross_income)
    }

    fn taxable_income(
        &self,
        gross_income: Decimal,
        consolidated_relief: Decimal,
    ) -> Decimal {
        max(gross_income - consolidated_relief, Decimal::ZERO)
    }

    fn annual_tax(
        &self,
        taxable_income: Decimal,
    ) -> Decimal {
        self.bands(taxable_income).map(|band| band.tax).sum()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::calculations::common::round_half_up;
    use crate::regimes::{pita_2024, reform_2026};

    // =========================================================================
    // compute tests: 2024 PITA
    // =========================================================================

    #[test]
    fn pita_2024_six_million() {
        let regime = pita_2024().unwrap();

        let result = RegimeCalculator::new(&regime).compute(dec!(6000000)).unwrap();

        // CRA: max(200000, 60000) + 1200000
        assert_eq!(result.consolidated_relief, dec!(1400000));
        assert_eq!(result.taxable_income, dec!(4600000));
        // 21000 + 33000 + 75000 + 95000 + 336000 + 1400000 * 0.24
        assert_eq!(result.annual_tax, dec!(896000));
        assert_eq!(round_half_up(result.monthly_tax), dec!(74666.67));
        assert_eq!(result.effective_rate.round_dp(4), dec!(0.1493));
    }

    #[test]
    fn pita_2024_percentage_floor_above_minimum() {
        let regime = pita_2024().unwrap();

        let result = RegimeCalculator::new(&regime).compute(dec!(30000000)).unwrap();

        // CRA: max(200000, 300000) + 6000000
        assert_eq!(result.consolidated_relief, dec!(6300000));
        assert_eq!(result.taxable_income, dec!(23700000));
        // 560000 through the fifth band + 20500000 * 0.24
        assert_eq!(result.annual_tax, dec!(5480000));
    }

    #[test]
    fn pita_2024_relief_exceeding_gross_leaves_nothing_taxable() {
        let regime = pita_2024().unwrap();

        let result = RegimeCalculator::new(&regime).compute(dec!(150000)).unwrap();

        assert_eq!(result.consolidated_relief, dec!(230000));
        assert_eq!(result.taxable_income, dec!(0));
        assert_eq!(result.annual_tax, dec!(0));
        assert_eq!(result.effective_rate, dec!(0));
    }

    // =========================================================================
    // compute tests: 2026 reform
    // =========================================================================

    #[test]
    fn reform_2026_six_million() {
        let regime = reform_2026().unwrap();

        let result = RegimeCalculator::new(&regime).compute(dec!(6000000)).unwrap();

        assert_eq!(result.consolidated_relief, dec!(0));
        assert_eq!(result.taxable_income, dec!(6000000));
        // 0 + 2200000 * 0.15 + 3000000 * 0.18
        assert_eq!(result.annual_tax, dec!(870000));
        assert_eq!(result.effective_rate, dec!(0.145));
    }

    #[test]
    fn reform_2026_top_band() {
        let regime = reform_2026().unwrap();

        let result = RegimeCalculator::new(&regime).compute(dec!(60000000)).unwrap();

        // 330000 + 1620000 + 2730000 + 5750000 + 10000000 * 0.25
        assert_eq!(result.annual_tax, dec!(12930000));
    }

    #[test]
    fn reform_2026_income_inside_zero_band_is_untaxed() {
        let regime = reform_2026().unwrap();

        let result = RegimeCalculator::new(&regime).compute(dec!(800000)).unwrap();

        assert_eq!(result.annual_tax, dec!(0));
    }

    // =========================================================================
    // edge cases
    // =========================================================================

    #[test]
    fn zero_income_yields_zero_tax_for_every_regime() {
        for regime in [pita_2024().unwrap(), reform_2026().unwrap()] {
            let result = RegimeCalculator::new(&regime).compute(dec!(0)).unwrap();

            assert_eq!(result.annual_tax, dec!(0));
            assert_eq!(result.monthly_tax, dec!(0));
            assert_eq!(result.effective_rate, dec!(0));
            assert!(result.consolidated_relief >= dec!(0));
        }
    }

    #[test]
    fn negative_income_is_rejected() {
        let regime = pita_2024().unwrap();

        let result = RegimeCalculator::new(&regime).compute(dec!(-1));

        assert_eq!(result, Err(InvalidInputError::Negative(dec!(-1))));
    }

    #[test]
    fn annual_tax_is_monotonic_in_gross_income() {
        for regime in [pita_2024().unwrap(), reform_2026().unwrap()] {
            let calculator = RegimeCalculator::new(&regime);
            let mut previous = Decimal::ZERO;

            // 0 to 100M in steps of 37,500 crosses every band edge of both tables.
            for step in 0..=2_667u32 {
                let gross = Decimal::from(step) * dec!(37500);
                let tax = calculator.compute(gross).unwrap().annual_tax;

                assert!(
                    tax >= previous,
                    "{}: tax fell from {previous} to {tax} at gross {gross}",
                    regime.label()
                );
                previous = tax;
            }
        }
    }

    #[test]
    fn result_fields_are_never_negative() {
        let regime = pita_2024().unwrap();
        let calculator = RegimeCalculator::new(&regime);

        for gross in [dec!(0), dec!(1), dec!(250000), dec!(999999.99), dec!(75000000)] {
            let result = calculator.compute(gross).unwrap();

            assert!(result.taxable_income >= dec!(0));
            assert!(result.consolidated_relief >= dec!(0));
            assert!(result.annual_tax >= dec!(0));
            assert!(result.monthly_tax >= dec!(0));
            assert!(result.effective_rate >= dec!(0));
        }
    }

    // =========================================================================
    // band_breakdown tests
    // =========================================================================

    #[test]
    fn band_breakdown_lists_only_reached_bands() {
        let regime = pita_2024().unwrap();
        let calculator = RegimeCalculator::new(&regime);

        let bands = calculator.band_breakdown(dec!(450000));

        assert_eq!(bands.len(), 2);
        assert_eq!(bands[0].taxable_portion, dec!(300000));
        assert_eq!(bands[0].tax, dec!(21000));
        assert_eq!(bands[1].taxable_portion, dec!(150000));
        assert_eq!(bands[1].tax, dec!(16500));
    }

    #[test]
    fn band_breakdown_sums_to_annual_tax() {
        let regime = pita_2024().unwrap();
        let calculator = RegimeCalculator::new(&regime);
        let result = calculator.compute(dec!(6000000)).unwrap();

        let total: Decimal = calculator
            .band_breakdown(result.taxable_income)
            .iter()
            .map(|b| b.tax)
            .sum();

        assert_eq!(total, result.annual_tax);
    }

    #[test]
    fn band_breakdown_is_empty_for_zero_taxable_income() {
        let regime = reform_2026().unwrap();

        assert!(RegimeCalculator::new(&regime).band_breakdown(dec!(0)).is_empty());
    }
}
