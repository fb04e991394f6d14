//! Error taxonomy for the tax impact engine.
//!
//! Two families of failure exist: bad caller input ([`InvalidInputError`])
//! and malformed regime configuration ([`ConfigurationError`]). Neither is
//! ever retried or recovered internally. Division-by-zero conditions are
//! not errors; the calculators guard them and return zero.

use rust_decimal::Decimal;
use thiserror::Error;

/// The caller supplied an income that has no meaning for the engine.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum InvalidInputError {
    /// Income was below zero.
    #[error("income must not be negative, got {0}")]
    Negative(Decimal),

    /// A floating-point income was NaN or infinite.
    #[error("income must be a finite number, got {0}")]
    NonFinite(f64),

    /// Text input could not be read as a number.
    #[error("income must be numeric, got '{0}'")]
    NotNumeric(String),

    /// Income is outside the range the decimal arithmetic can represent.
    #[error("income {0} is out of range")]
    OutOfRange(String),
}

/// A regime's relief rule or bracket table is inconsistent.
///
/// Band indexes are zero-based positions in the table as supplied.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("bracket table has no bands")]
    EmptyTable,

    #[error("first band must start at 0, starts at {0}")]
    FirstBandNotAtZero(Decimal),

    #[error("band {index} starts at {lower_bound} but previous band ends at {previous_upper}")]
    NonContiguous {
        index: usize,
        lower_bound: Decimal,
        previous_upper: Decimal,
    },

    #[error("band {index} upper bound {upper_bound} is not above its lower bound {lower_bound}")]
    NonIncreasing {
        index: usize,
        lower_bound: Decimal,
        upper_bound: Decimal,
    },

    #[error("band {0} is unbounded but is not the last band")]
    UnboundedBeforeEnd(usize),

    #[error("last band must be unbounded")]
    MissingUnboundedBand,

    #[error("band {index} rate must be between 0 and 1, got {rate}")]
    RateOutOfRange { index: usize, rate: Decimal },

    #[error("invalid relief rule: {0}")]
    InvalidRelief(String),

    #[error("exemption threshold must not be negative, got {0}")]
    NegativeThreshold(Decimal),

    #[error("regime '{regime}': {source}")]
    Regime {
        regime: String,
        #[source]
        source: Box<ConfigurationError>,
    },
}

impl ConfigurationError {
    /// Attaches the regime label to an error raised while validating its tables.
    pub fn in_regime(
        self,
        regime: impl Into<String>,
    ) -> Self {
        Self::Regime {
            regime: regime.into(),
            source: Box::new(self),
        }
    }
}

/// Errors returned by the impact engine entry points.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum TaxImpactError {
    #[error(transparent)]
    InvalidInput(#[from] InvalidInputError),

    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
}
