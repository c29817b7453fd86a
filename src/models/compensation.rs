//! Compensation source and period-actual input models.
//!
//! This module defines the tagged [`CompensationSource`] variants that feed
//! the aggregator, plus the period-actual records (overtime work records,
//! allowances, voluntary deductions, employer contributions) that arrive
//! from external collaborators already scoped to the pay period.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::PayFrequency;

/// How a partial-period amount is scaled down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProrationMethod {
    /// Count every calendar day in the overlap window.
    CalendarDays,
    /// Count only Monday-Friday days in the overlap window.
    WorkingDays,
    /// Never prorate; the full amount is paid regardless of overlap.
    None,
}

impl ProrationMethod {
    /// Resolves an optionally configured method to a concrete one.
    ///
    /// This is the single fallback point for "no method configured":
    /// calendar-day proration. Call sites must not re-derive the default.
    pub fn resolve(configured: Option<ProrationMethod>) -> ProrationMethod {
        configured.unwrap_or(ProrationMethod::CalendarDays)
    }
}

/// A source of recurring compensation, tagged by where it was configured.
///
/// An active employee-level override with the base flag set supersedes the
/// position-level baseline for the base-salary element; all other sources
/// are additive.
///
/// # Example
///
/// ```
/// use payroll_engine::models::{CompensationSource, PayFrequency};
/// use rust_decimal::Decimal;
///
/// let json = r#"{
///     "source_type": "position",
///     "position_id": "pos_001",
///     "amount": "60000",
///     "currency": "USD",
///     "frequency": "annual",
///     "active": true
/// }"#;
/// let source: CompensationSource = serde_json::from_str(json).unwrap();
/// assert!(source.is_active());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "source_type", rename_all = "snake_case")]
pub enum CompensationSource {
    /// Compensation configured on the position the employee holds.
    Position {
        /// The position this compensation belongs to.
        position_id: String,
        /// The recurring amount.
        amount: Decimal,
        /// ISO currency code of the amount.
        currency: String,
        /// How often the amount recurs.
        frequency: PayFrequency,
        /// Proration method configured for this source, if any.
        #[serde(default)]
        proration_method: Option<ProrationMethod>,
        /// Whether the source is currently in effect.
        active: bool,
    },
    /// Compensation configured directly on the employee.
    EmployeeOverride {
        /// A label for this compensation element (e.g. "base", "car allowance").
        description: String,
        /// The recurring amount.
        amount: Decimal,
        /// ISO currency code of the amount.
        currency: String,
        /// How often the amount recurs.
        frequency: PayFrequency,
        /// Proration method configured for this source, if any.
        #[serde(default)]
        proration_method: Option<ProrationMethod>,
        /// True if this override replaces the position-level base salary.
        #[serde(default)]
        is_base: bool,
        /// Whether the source is currently in effect.
        active: bool,
    },
}

impl CompensationSource {
    /// Returns true if the source is currently in effect.
    pub fn is_active(&self) -> bool {
        match self {
            CompensationSource::Position { active, .. } => *active,
            CompensationSource::EmployeeOverride { active, .. } => *active,
        }
    }

    /// Returns the recurring amount of the source.
    pub fn amount(&self) -> Decimal {
        match self {
            CompensationSource::Position { amount, .. } => *amount,
            CompensationSource::EmployeeOverride { amount, .. } => *amount,
        }
    }

    /// Returns the pay frequency of the source.
    pub fn frequency(&self) -> PayFrequency {
        match self {
            CompensationSource::Position { frequency, .. } => *frequency,
            CompensationSource::EmployeeOverride { frequency, .. } => *frequency,
        }
    }

    /// Returns the configured proration method of the source, if any.
    pub fn proration_method(&self) -> Option<ProrationMethod> {
        match self {
            CompensationSource::Position {
                proration_method, ..
            } => *proration_method,
            CompensationSource::EmployeeOverride {
                proration_method, ..
            } => *proration_method,
        }
    }

    /// Returns true for an active employee override flagged as base salary.
    pub fn is_base_override(&self) -> bool {
        matches!(
            self,
            CompensationSource::EmployeeOverride {
                is_base: true,
                active: true,
                ..
            }
        )
    }
}

/// Hours worked on a given date, supplied by external work records.
///
/// Only the overtime portion matters to the aggregator; ordinary hours are
/// already covered by the salaried base.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkRecord {
    /// The date the hours were worked.
    pub date: NaiveDate,
    /// Overtime hours worked on that date.
    pub overtime_hours: Decimal,
}

/// A period-actual allowance (e.g. travel, housing). Never prorated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Allowance {
    /// A label for the allowance.
    pub name: String,
    /// The amount payable for this period.
    pub amount: Decimal,
}

/// A non-statutory deduction (e.g. medical aid, union fees, garnishee).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OtherDeduction {
    /// A label for the deduction.
    pub name: String,
    /// The amount withheld for this period.
    pub amount: Decimal,
}

/// The category of an employer-paid contribution, used for GL routing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContributionCategory {
    /// Employer share of a benefit (e.g. medical).
    Benefit,
    /// Employer retirement/pension contribution.
    Retirement,
    /// Employer savings-plan contribution.
    Savings,
}

/// An employer-paid contribution for the period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployerContribution {
    /// A label for the contribution.
    pub name: String,
    /// Which ledger category the contribution posts under.
    pub category: ContributionCategory,
    /// The amount contributed for this period.
    pub amount: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_resolve_defaults_to_calendar_days() {
        assert_eq!(ProrationMethod::resolve(None), ProrationMethod::CalendarDays);
        assert_eq!(
            ProrationMethod::resolve(Some(ProrationMethod::WorkingDays)),
            ProrationMethod::WorkingDays
        );
        assert_eq!(
            ProrationMethod::resolve(Some(ProrationMethod::None)),
            ProrationMethod::None
        );
    }

    #[test]
    fn test_deserialize_position_source() {
        let json = r#"{
            "source_type": "position",
            "position_id": "pos_001",
            "amount": "5000.00",
            "currency": "USD",
            "frequency": "monthly",
            "active": true
        }"#;
        let source: CompensationSource = serde_json::from_str(json).unwrap();
        assert!(source.is_active());
        assert_eq!(source.amount(), dec("5000.00"));
        assert_eq!(source.frequency(), PayFrequency::Monthly);
        assert_eq!(source.proration_method(), None);
        assert!(!source.is_base_override());
    }

    #[test]
    fn test_deserialize_base_override_source() {
        let json = r#"{
            "source_type": "employee_override",
            "description": "negotiated base",
            "amount": "72000",
            "currency": "USD",
            "frequency": "annual",
            "proration_method": "working_days",
            "is_base": true,
            "active": true
        }"#;
        let source: CompensationSource = serde_json::from_str(json).unwrap();
        assert!(source.is_base_override());
        assert_eq!(
            source.proration_method(),
            Some(ProrationMethod::WorkingDays)
        );
    }

    #[test]
    fn test_inactive_base_override_is_not_base() {
        let source = CompensationSource::EmployeeOverride {
            description: "old base".to_string(),
            amount: dec("100"),
            currency: "USD".to_string(),
            frequency: PayFrequency::Monthly,
            proration_method: None,
            is_base: true,
            active: false,
        };
        assert!(!source.is_base_override());
        assert!(!source.is_active());
    }

    #[test]
    fn test_contribution_category_serialization() {
        assert_eq!(
            serde_json::to_string(&ContributionCategory::Retirement).unwrap(),
            "\"retirement\""
        );
    }
}
