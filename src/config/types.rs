//! Configuration types for the payroll engine.
//!
//! These structures mirror the YAML configuration files loaded by
//! [`super::ConfigLoader`]: engine-wide settings, statutory schemes per
//! jurisdiction, and the ledger setup.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{LedgerConfig, StatutoryScheme};

/// A jurisdiction- or company-level override of the overtime multiplier.
///
/// Rules are consulted in configured order with a short-circuiting
/// find-first; when none matches the engine falls back to the configured
/// default multiplier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OvertimeRule {
    /// The jurisdiction the rule applies to.
    pub jurisdiction: String,
    /// The multiplier to use instead of the default.
    pub multiplier: Decimal,
}

/// Engine-wide calculation settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineSettings {
    /// Standard weekly hours used to derive an hourly rate from an annual
    /// base (annual / (weekly hours x 52)).
    #[serde(default = "default_standard_weekly_hours")]
    pub standard_weekly_hours: Decimal,
    /// Overtime multiplier applied when no jurisdiction rule matches.
    #[serde(default = "default_overtime_multiplier")]
    pub overtime_multiplier: Decimal,
    /// Jurisdiction overrides of the overtime multiplier.
    #[serde(default)]
    pub overtime_rules: Vec<OvertimeRule>,
}

fn default_standard_weekly_hours() -> Decimal {
    Decimal::from(40)
}

fn default_overtime_multiplier() -> Decimal {
    Decimal::new(15, 1)
}

impl Default for EngineSettings {
    fn default() -> Self {
        EngineSettings {
            standard_weekly_hours: default_standard_weekly_hours(),
            overtime_multiplier: default_overtime_multiplier(),
            overtime_rules: vec![],
        }
    }
}

impl EngineSettings {
    /// Resolves the overtime multiplier for a jurisdiction.
    ///
    /// First matching rule wins; no match preserves the default.
    pub fn overtime_multiplier_for(&self, jurisdiction: &str) -> Decimal {
        self.overtime_rules
            .iter()
            .find(|r| r.jurisdiction == jurisdiction)
            .map(|r| r.multiplier)
            .unwrap_or(self.overtime_multiplier)
    }
}

/// Statutory scheme configuration, grouped per jurisdiction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemesConfig {
    /// All configured schemes, across jurisdictions.
    #[serde(default)]
    pub schemes: Vec<StatutoryScheme>,
}

/// Top-level ledger configuration file shape.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerFileConfig {
    /// The full GL configuration for the company.
    #[serde(default)]
    pub ledger: LedgerConfig,
}
