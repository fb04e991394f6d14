mod impact_result;
mod regime;
mod regime_result;
mod relief_rule;
mod tax_bracket;

pub use impact_result::{ImpactResult, ImpactSummary, LabeledRegimeResult};
pub use regime::{Regime, RegimeCode};
pub use regime_result::RegimeResult;
pub use relief_rule::ReliefRule;
pub use tax_bracket::{BracketTable, TaxBracket};
