use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::ConfigurationError;

/// One progressive income band.
///
/// `lower_bound` is inclusive, `upper_bound` exclusive. A `None` upper bound
/// marks the open-ended top band.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBracket {
    pub lower_bound: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upper_bound: Option<Decimal>,
    pub rate: Decimal,
}

impl TaxBracket {
    /// Creates a band. Validation happens when bands are assembled into a
    /// [`BracketTable`].
    ///
    /// # Arguments
    ///
    /// * `lower_bound` - Inclusive start of the band
    /// * `upper_bound` - Exclusive end of the band, `None` for the top band
    /// * `rate` - Rate applied to income inside the band, as a fraction
    ///
    /// # Examples
    ///
    /// ```
    /// use rust_decimal_macros::dec;
    /// use tax_core::TaxBracket;
    ///
    /// let band = TaxBracket::new(dec!(300000), Some(dec!(600000)), dec!(0.11));
    /// assert_eq!(band.portion_of(dec!(450000)), dec!(150000));
    /// assert_eq!(band.portion_of(dec!(100000)), dec!(0));
    /// ```
    pub fn new(
        lower_bound: Decimal,
        upper_bound: Option<Decimal>,
        rate: Decimal,
    ) -> Self {
        Self {
            lower_bound,
            upper_bound,
            rate,
        }
    }

    /// The slice of `taxable_income` that falls inside this band.
    pub fn portion_of(
        &self,
        taxable_income: Decimal,
    ) -> Decimal {
        let ceiling = match self.upper_bound {
            Some(upper) => taxable_income.min(upper),
            None => taxable_income,
        };
        (ceiling - self.lower_bound).max(Decimal::ZERO)
    }
}

/// An ordered, validated set of brackets.
///
/// Construction goes through [`BracketTable::new`], which enforces that the
/// bands start at zero, are contiguous and strictly increasing, carry rates
/// in `[0, 1]`, and end with a single unbounded band. Deserialization runs
/// the same checks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<TaxBracket>", into = "Vec<TaxBracket>")]
pub struct BracketTable {
    brackets: Vec<TaxBracket>,
}

impl BracketTable {
    /// Validates `brackets` and wraps them in a table.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigurationError`] found, scanning bands in order.
    pub fn new(brackets: Vec<TaxBracket>) -> Result<Self, ConfigurationError> {
        let Some(first) = brackets.first() else {
            return Err(ConfigurationError::EmptyTable);
        };
        if first.lower_bound != Decimal::ZERO {
            return Err(ConfigurationError::FirstBandNotAtZero(first.lower_bound));
        }

        let last_index = brackets.len() - 1;
        let mut previous_upper: Option<Decimal> = None;

        for (index, bracket) in brackets.iter().enumerate() {
            if bracket.rate < Decimal::ZERO || bracket.rate > Decimal::ONE {
                return Err(ConfigurationError::RateOutOfRange {
                    index,
                    rate: bracket.rate,
                });
            }

            if let Some(previous_upper) = previous_upper {
                if bracket.lower_bound != previous_upper {
                    return Err(ConfigurationError::NonContiguous {
                        index,
                        lower_bound: bracket.lower_bound,
                        previous_upper,
                    });
                }
            }

            match bracket.upper_bound {
                Some(upper_bound) if upper_bound <= bracket.lower_bound => {
                    return Err(ConfigurationError::NonIncreasing {
                        index,
                        lower_bound: bracket.lower_bound,
                        upper_bound,
                    });
                }
                None if index != last_index => {
                    return Err(ConfigurationError::UnboundedBeforeEnd(index));
                }
                _ => {}
            }

            previous_upper = bracket.upper_bound;
        }

        if previous_upper.is_some() {
            return Err(ConfigurationError::MissingUnboundedBand);
        }

        Ok(Self { brackets })
    }

    pub fn brackets(&self) -> &[TaxBracket] {
        &self.brackets
    }

    pub fn len(&self) -> usize {
        self.brackets.len()
    }

    /// Always false for a validated table.
    pub fn is_empty(&self) -> bool {
        self.brackets.is_empty()
    }
}

impl TryFrom<Vec<TaxBracket>> for BracketTable {
    type Error = ConfigurationError;

    fn try_from(brackets: Vec<TaxBracket>) -> Result<Self, Self::Error> {
        Self::new(brackets)
    }
}

impl From<BracketTable> for Vec<TaxBracket> {
    fn from(table: BracketTable) -> Self {
        table.brackets
    }
}
