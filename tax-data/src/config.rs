//! Regime configuration files.
//!
//! A TOML file replaces the built-in regime tables. Its layout mirrors the
//! serialized form of [`RegimeSet`], so the output of
//! `toml::to_string(&RegimeSet::builtin()?)` loads back unchanged.
//!
//! ```toml
//! exemption_threshold = "800000"
//!
//! [current]
//! code = "2024"
//! label = "2024 PITA"
//! relief = { floor_amount = "200000", floor_rate = "0.01", flat_rate = "0.20" }
//! brackets = [
//!     { lower_bound = "0", upper_bound = "300000", rate = "0.07" },
//!     { lower_bound = "300000", rate = "0.11" },
//! ]
//!
//! [proposed]
//! code = "2026"
//! brackets = [
//!     { lower_bound = "0", upper_bound = "800000", rate = "0" },
//!     { lower_bound = "800000", rate = "0.15" },
//! ]
//! ```
//!
//! | Key                   | Required | Default |
//! |-----------------------|----------|---------|
//! | `exemption_threshold` | no       | 800000 |
//! | `<regime>.code`       | yes      | `"2024"` or `"2026"` |
//! | `<regime>.label`      | no       | canonical label for the code |
//! | `<regime>.relief`     | no       | no relief |
//! | `<regime>.brackets`   | yes      | |

use std::path::{Path, PathBuf};

use rust_decimal::Decimal;
use serde::Deserialize;
use tax_core::regimes::EXEMPTION_THRESHOLD;
use tax_core::{
    BracketTable, ConfigurationError, Regime, RegimeCode, RegimeSet, ReliefRule, TaxBracket,
};
use thiserror::Error;
use tracing::debug;

/// Errors raised while loading a regime configuration file.
#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("cannot read config file '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("current and proposed regimes both use code {0}")]
    DuplicateCode(&'static str),

    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RegimeFile {
    #[serde(default = "default_threshold")]
    exemption_threshold: Decimal,
    current: RegimeSection,
    proposed: RegimeSection,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RegimeSection {
    code: RegimeCode,
    label: Option<String>,
    #[serde(default = "default_relief")]
    relief: ReliefRule,
    brackets: Vec<TaxBracket>,
}

fn default_threshold() -> Decimal {
    EXEMPTION_THRESHOLD
}

fn default_relief() -> ReliefRule {
    ReliefRule::NONE
}

impl RegimeSection {
    fn into_regime(self) -> Result<Regime, ConfigurationError> {
        let label = self
            .label
            .unwrap_or_else(|| self.code.default_label().to_string());
        let brackets = BracketTable::new(self.brackets).map_err(|e| e.in_regime(label.clone()))?;
        Regime::new(self.code, label, self.relief, brackets)
    }
}

/// Parses and validates a regime configuration.
pub fn load_from_str(contents: &str) -> Result<RegimeSet, ConfigLoadError> {
    let file: RegimeFile = toml::from_str(contents)?;

    if file.current.code == file.proposed.code {
        return Err(ConfigLoadError::DuplicateCode(file.current.code.as_str()));
    }

    let current = file.current.into_regime()?;
    let proposed = file.proposed.into_regime()?;
    let set = RegimeSet::new(current, proposed, file.exemption_threshold)?;

    debug!(
        current = set.current().label(),
        proposed = set.proposed().label(),
        threshold = %set.exemption_threshold(),
        "loaded regime configuration"
    );

    Ok(set)
}

/// Reads `path` from disk and delegates to [`load_from_str`].
pub fn load_from_file(path: &Path) -> Result<RegimeSet, ConfigLoadError> {
    let contents = std::fs::read_to_string(path).map_err(|source| ConfigLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    load_from_str(&contents)
}
