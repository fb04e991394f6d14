//! CSV batch processing of monthly incomes.
//!
//! ## Input
//!
//! | Column           | Required | Notes |
//! |------------------|----------|-------|
//! | `monthly_income` | yes      | Numeric literal; `,` and `_` separators allowed |
//! | `id`             | no       | Free-form identifier echoed into the output |
//!
//! ```csv
//! id,monthly_income
//! alice,50000
//! bob,"500,000"
//! ```
//!
//! ## Output
//!
//! One row per input row, in input order:
//! `id, monthly_income, annual_income, current_annual_tax,
//! proposed_annual_tax, monthly_relief, annual_relief, percentage_change`.
//! Tax columns are rounded to two decimal places.

use std::io::{Read, Write};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tax_core::calculations::ImpactEngine;
use tax_core::calculations::common::round_half_up;
use tax_core::{ImpactResult, InvalidInputError, TaxImpactError, income};
use thiserror::Error;
use tracing::debug;

/// Errors raised while reading, computing or writing a batch.
///
/// Row numbers are 1-based and exclude the header.
#[derive(Debug, Error)]
pub enum BatchError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("row {row}: {source}")]
    InvalidIncome {
        row: usize,
        #[source]
        source: InvalidInputError,
    },

    #[error("row {row}: {source}")]
    Impact {
        row: usize,
        #[source]
        source: TaxImpactError,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Deserialize)]
struct CsvRow {
    #[serde(default)]
    id: Option<String>,
    monthly_income: String,
}

/// One parsed input row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncomeRecord {
    pub id: Option<String>,
    pub monthly_income: Decimal,
}

/// One output row summarising an [`ImpactResult`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImpactRow {
    pub id: Option<String>,
    pub monthly_income: Decimal,
    pub annual_income: Decimal,
    pub current_annual_tax: Decimal,
    pub proposed_annual_tax: Decimal,
    pub monthly_relief: Decimal,
    pub annual_relief: Decimal,
    pub percentage_change: Decimal,
}

impl ImpactRow {
    /// Flattens an [`ImpactResult`] into a CSV row.
    ///
    /// # Arguments
    ///
    /// * `id` - Identifier carried over from the input row, if any
    /// * `result` - The computed impact
    ///
    /// # Returns
    ///
    /// A row whose tax columns are rounded to two decimal places. The
    /// income columns are copied unchanged and the relief columns are
    /// already rounded by the engine.
    ///
    /// # Examples
    ///
    /// ```
    /// use rust_decimal_macros::dec;
    /// use tax_data::ImpactRow;
    ///
    /// let result = tax_core::calculate_tax_impact(dec!(500000)).unwrap();
    /// let row = ImpactRow::new(Some("manager".to_string()), &result);
    ///
    /// assert_eq!(row.current_annual_tax, dec!(896000.00));
    /// assert_eq!(row.proposed_annual_tax, dec!(870000.00));
    /// assert_eq!(row.monthly_relief, dec!(2166.67));
    /// ```
    pub fn new(
        id: Option<String>,
        result: &ImpactResult,
    ) -> Self {
        Self {
            id,
            monthly_income: result.monthly_income,
            annual_income: result.annual_income,
            current_annual_tax: round_half_up(result.current.result.annual_tax),
            proposed_annual_tax: round_half_up(result.proposed.result.annual_tax),
            monthly_relief: result.impact.monthly_relief,
            annual_relief: result.impact.annual_relief,
            percentage_change: result.impact.percentage_change,
        }
    }
}

/// Reads income rows from CSV. Columns are matched by header name.
pub fn read_incomes<R: Read>(reader: R) -> Result<Vec<IncomeRecord>, BatchError> {
    let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);

    csv_reader
        .deserialize::<CsvRow>()
        .enumerate()
        .map(|(idx, result)| -> Result<IncomeRecord, BatchError> {
            let row = result?;
            let monthly_income = income::parse(&row.monthly_income)
                .map_err(|source| BatchError::InvalidIncome { row: idx + 1, source })?;
            Ok(IncomeRecord {
                id: row.id.filter(|id| !id.is_empty()),
                monthly_income,
            })
        })
        .collect()
}

/// Runs the engine over every record, stopping at the first failure.
pub fn compute(
    engine: &ImpactEngine<'_>,
    records: &[IncomeRecord],
) -> Result<Vec<ImpactRow>, BatchError> {
    let rows = records
        .iter()
        .enumerate()
        .map(|(idx, record)| -> Result<ImpactRow, BatchError> {
            let result = engine
                .calculate(record.monthly_income)
                .map_err(|source| BatchError::Impact { row: idx + 1, source })?;
            Ok(ImpactRow::new(record.id.clone(), &result))
        })
        .collect::<Result<Vec<_>, _>>()?;

    debug!(rows = rows.len(), "computed batch");
    Ok(rows)
}

/// Writes rows as CSV with a header line.
pub fn write_rows<W: Write>(
    writer: W,
    rows: &[ImpactRow],
) -> Result<(), BatchError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for row in rows {
        csv_writer.serialize(row)?;
    }
    csv_writer.flush()?;
    Ok(())
}
