use serde::{Deserialize, Serialize};

use crate::error::ConfigurationError;
use crate::models::{BracketTable, ReliefRule};

/// Identifies which version of the tax law a regime represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RegimeCode {
    #[serde(rename = "2024")]
    Pita2024,
    #[serde(rename = "2026")]
    Reform2026,
}

impl RegimeCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pita2024 => "2024",
            Self::Reform2026 => "2026",
        }
    }

    /// Label reported alongside results computed under this regime.
    pub fn default_label(&self) -> &'static str {
        match self {
            Self::Pita2024 => "2024 PITA",
            Self::Reform2026 => "2026 Reform",
        }
    }
}

/// A complete, named relief rule plus bracket table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Regime {
    code: RegimeCode,
    label: String,
    relief: ReliefRule,
    brackets: BracketTable,
}

impl Regime {
    /// Builds a regime, validating its relief rule.
    ///
    /// The bracket table is already validated by construction.
    pub fn new(
        code: RegimeCode,
        label: impl Into<String>,
        relief: ReliefRule,
        brackets: BracketTable,
    ) -> Result<Self, ConfigurationError> {
        let label = label.into();
        relief
            .validate()
            .map_err(|e| e.in_regime(label.clone()))?;

        Ok(Self {
            code,
            label,
            relief,
            brackets,
        })
    }

    pub fn code(&self) -> RegimeCode {
        self.code
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn relief(&self) -> &ReliefRule {
        &self.relief
    }

    pub fn brackets(&self) -> &BracketTable {
        &self.brackets
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::models::TaxBracket;

    #[test]
    fn code_serializes_as_year() {
        let json = serde_json::to_string(&RegimeCode::Reform2026).unwrap();

        assert_eq!(json, "\"2026\"");
    }

    #[test]
    fn new_rejects_invalid_relief_with_regime_label() {
        let brackets =
            BracketTable::new(vec![TaxBracket::new(dec!(0), None, dec!(0.1))]).unwrap();
        let relief = ReliefRule {
            floor_amount: dec!(0),
            floor_rate: dec!(0.9),
            flat_rate: dec!(0.9),
        };

        let err = Regime::new(RegimeCode::Pita2024, "custom", relief, brackets).unwrap_err();

        assert!(err.to_string().starts_with("regime 'custom': invalid relief rule"));
    }
}
