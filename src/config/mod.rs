//! Configuration loading for the payroll engine.
//!
//! Engine settings, statutory schemes, and ledger setup are read from YAML
//! files and normalized into the ordering the calculators rely on.

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{EngineSettings, LedgerFileConfig, OvertimeRule, SchemesConfig};
