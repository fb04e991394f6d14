pub mod batch;
pub mod config;

pub use batch::{BatchError, ImpactRow, IncomeRecord};
pub use config::ConfigLoadError;
