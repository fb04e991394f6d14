//! Built-in regime configuration.
//!
//! # 2024 PITA
//!
//! Consolidated relief allowance: the higher of 200,000 or 1% of gross
//! income, plus 20% of gross income.
//!
//! | Band              | Rate |
//! |-------------------|------|
//! | 0 - 300,000       | 7%   |
//! | 300,000 - 600,000 | 11%  |
//! | 600,000 - 1.1M    | 15%  |
//! | 1.1M - 1.6M       | 19%  |
//! | 1.6M - 3.2M       | 21%  |
//! | above 3.2M        | 24%  |
//!
//! # 2026 reform
//!
//! Schedule of the Nigeria Tax Act 2025. The consolidated relief allowance
//! is abolished, so the relief rule is [`ReliefRule::NONE`].
//!
//! | Band          | Rate |
//! |---------------|------|
//! | 0 - 800,000   | 0%   |
//! | 800,000 - 3M  | 15%  |
//! | 3M - 12M      | 18%  |
//! | 12M - 25M     | 21%  |
//! | 25M - 50M     | 23%  |
//! | above 50M     | 25%  |
//!
//! Either table can be replaced at runtime through a configuration file
//! loaded by `tax-data`.

use std::sync::LazyLock;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;

use crate::error::ConfigurationError;
use crate::models::{BracketTable, Regime, RegimeCode, ReliefRule, TaxBracket};

/// Annual income at or below which neither regime is evaluated.
pub const EXEMPTION_THRESHOLD: Decimal = dec!(800000);

type Band = (Decimal, Option<Decimal>, Decimal);

const PITA_2024_RELIEF: ReliefRule = ReliefRule {
    floor_amount: dec!(200000),
    floor_rate: dec!(0.01),
    flat_rate: dec!(0.20),
};

const PITA_2024_BANDS: [Band; 6] = [
    (dec!(0), Some(dec!(300000)), dec!(0.07)),
    (dec!(300000), Some(dec!(600000)), dec!(0.11)),
    (dec!(600000), Some(dec!(1100000)), dec!(0.15)),
    (dec!(1100000), Some(dec!(1600000)), dec!(0.19)),
    (dec!(1600000), Some(dec!(3200000)), dec!(0.21)),
    (dec!(3200000), None, dec!(0.24)),
];

const REFORM_2026_BANDS: [Band; 6] = [
    (dec!(0), Some(dec!(800000)), dec!(0)),
    (dec!(800000), Some(dec!(3000000)), dec!(0.15)),
    (dec!(3000000), Some(dec!(12000000)), dec!(0.18)),
    (dec!(12000000), Some(dec!(25000000)), dec!(0.21)),
    (dec!(25000000), Some(dec!(50000000)), dec!(0.23)),
    (dec!(50000000), None, dec!(0.25)),
];

static BUILTIN: LazyLock<Result<RegimeSet, ConfigurationError>> = LazyLock::new(|| {
    RegimeSet::new(pita_2024()?, reform_2026()?, EXEMPTION_THRESHOLD)
});

fn table(
    label: &str,
    bands: &[Band],
) -> Result<BracketTable, ConfigurationError> {
    let brackets = bands
        .iter()
        .map(|&(lower, upper, rate)| TaxBracket::new(lower, upper, rate))
        .collect();
    BracketTable::new(brackets).map_err(|e| e.in_regime(label))
}

/// The 2024 Personal Income Tax Act regime.
pub fn pita_2024() -> Result<Regime, ConfigurationError> {
    let code = RegimeCode::Pita2024;
    Regime::new(
        code,
        code.default_label(),
        PITA_2024_RELIEF,
        table(code.default_label(), &PITA_2024_BANDS)?,
    )
}

/// The 2026 reform regime.
pub fn reform_2026() -> Result<Regime, ConfigurationError> {
    let code = RegimeCode::Reform2026;
    Regime::new(
        code,
        code.default_label(),
        ReliefRule::NONE,
        table(code.default_label(), &REFORM_2026_BANDS)?,
    )
}

/// The pair of regimes being compared plus the exemption threshold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegimeSet {
    exemption_threshold: Decimal,
    current: Regime,
    proposed: Regime,
}

impl RegimeSet {
    /// Pairs the current and proposed regimes with the exemption threshold.
    ///
    /// # Arguments
    ///
    /// * `current` - Regime the comparison starts from
    /// * `proposed` - Regime the comparison moves to
    /// * `exemption_threshold` - Annual income at or below which both regimes
    ///   levy nothing
    ///
    /// # Returns
    ///
    /// The set, or [`ConfigurationError::NegativeThreshold`] when the
    /// threshold is below zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use rust_decimal_macros::dec;
    /// use tax_core::RegimeSet;
    /// use tax_core::regimes::{pita_2024, reform_2026};
    ///
    /// let set = RegimeSet::new(pita_2024().unwrap(), reform_2026().unwrap(), dec!(600000))
    ///     .unwrap();
    /// assert_eq!(set.exemption_threshold(), dec!(600000));
    ///
    /// assert!(RegimeSet::new(pita_2024().unwrap(), reform_2026().unwrap(), dec!(-1)).is_err());
    /// ```
    pub fn new(
        current: Regime,
        proposed: Regime,
        exemption_threshold: Decimal,
    ) -> Result<Self, ConfigurationError> {
        if exemption_threshold < Decimal::ZERO {
            return Err(ConfigurationError::NegativeThreshold(exemption_threshold));
        }
        Ok(Self {
            exemption_threshold,
            current,
            proposed,
        })
    }

    /// The process-wide built-in set, validated on first access.
    ///
    /// # Errors
    ///
    /// Returns the [`ConfigurationError`] raised while validating the
    /// built-in tables. The same error is returned on every call.
    pub fn builtin() -> Result<&'static RegimeSet, ConfigurationError> {
        BUILTIN.as_ref().map_err(Clone::clone)
    }

    pub fn current(&self) -> &Regime {
        &self.current
    }

    pub fn proposed(&self) -> &Regime {
        &self.proposed
    }

    pub fn exemption_threshold(&self) -> Decimal {
        self.exemption_threshold
    }
}
