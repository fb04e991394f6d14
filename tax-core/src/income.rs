//! Conversions from boundary representations into a monthly income.
//!
//! The engine works in [`Decimal`], which is always finite. Callers holding
//! a float or a string convert here first so NaN, infinities and
//! non-numeric text are rejected before any computation starts.

use std::str::FromStr;

use rust_decimal::Decimal;

use crate::error::InvalidInputError;

/// Converts a float income, rejecting NaN and infinities.
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_core::income::from_f64;
///
/// assert_eq!(from_f64(500000.0).unwrap(), dec!(500000));
/// assert!(from_f64(f64::NAN).is_err());
/// ```
pub fn from_f64(value: f64) -> Result<Decimal, InvalidInputError> {
    if !value.is_finite() {
        return Err(InvalidInputError::NonFinite(value));
    }
    Decimal::try_from(value).map_err(|_| InvalidInputError::OutOfRange(value.to_string()))
}

/// Parses a numeric literal such as `500000`, `500,000.50` or `5e5`.
///
/// Surrounding whitespace is ignored. `,` and `_` are accepted only as
/// thousands separators in the integer part, so `1,000,000` parses while
/// `1,0` and `5.000,00` are rejected. A well-formed number too large or too
/// small for [`Decimal`] is [`InvalidInputError::OutOfRange`].
pub fn parse(input: &str) -> Result<Decimal, InvalidInputError> {
    let not_numeric = || InvalidInputError::NotNumeric(input.to_string());

    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(not_numeric());
    }
    let cleaned = strip_group_separators(trimmed).ok_or_else(not_numeric)?;

    Decimal::from_str(&cleaned)
        .or_else(|_| Decimal::from_scientific(&cleaned))
        .map_err(|_| match cleaned.parse::<f64>() {
            Ok(value) if value.is_finite() => InvalidInputError::OutOfRange(trimmed.to_string()),
            _ => not_numeric(),
        })
}

/// Removes thousands separators, or `None` if one is misplaced.
fn strip_group_separators(literal: &str) -> Option<String> {
    const SEPARATORS: [char; 2] = [',', '_'];

    let (integer, rest) = match literal.find(['.', 'e', 'E']) {
        Some(at) => literal.split_at(at),
        None => (literal, ""),
    };
    if rest.contains(SEPARATORS) {
        return None;
    }
    if !integer.contains(SEPARATORS) {
        return Some(literal.to_string());
    }

    let digits = integer.trim_start_matches(['+', '-']);
    let sign = &integer[..integer.len() - digits.len()];
    let mut groups = digits.split(SEPARATORS);

    let mut cleaned = String::with_capacity(literal.len());
    cleaned.push_str(sign);
    match groups.next() {
        Some(lead) if (1..=3).contains(&lead.len()) => cleaned.push_str(lead),
        _ => return None,
    }
    for group in groups {
        if group.len() != 3 {
            return None;
        }
        cleaned.push_str(group);
    }
    cleaned.push_str(rest);
    Some(cleaned)
}
