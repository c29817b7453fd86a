//! Employee model.
//!
//! This module defines the [`EmployeeProfile`] struct describing the worker
//! a payroll calculation runs for.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// The employee context for a payroll calculation.
///
/// Employment start and end dates drive proration: an employee active for
/// the whole pay period receives a factor of exactly 1.0. The jurisdiction
/// selects which statutory schemes apply; age gates on rate bands use the
/// date of birth when it is known.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeProfile {
    /// Unique identifier for the employee.
    pub id: String,
    /// The statutory jurisdiction code (e.g. "ZA", "UK") the employee is taxed in.
    pub jurisdiction: String,
    /// The employee's date of birth, when known. Used for age-gated rate bands.
    #[serde(default)]
    pub date_of_birth: Option<NaiveDate>,
    /// The date the employee started employment, when known.
    #[serde(default)]
    pub employment_start_date: Option<NaiveDate>,
    /// The date employment ended, if it has.
    #[serde(default)]
    pub employment_end_date: Option<NaiveDate>,
    /// Tags for categorizing employees (e.g. departments, cost centers).
    #[serde(default)]
    pub tags: Vec<String>,
}

impl EmployeeProfile {
    /// Returns the employee's age in whole years on the given date.
    ///
    /// Returns `None` when the date of birth is not recorded; age-gated
    /// statutory bands then match only when they carry no age constraint.
    pub fn age_on(&self, date: NaiveDate) -> Option<u32> {
        let dob = self.date_of_birth?;
        Some(date.years_since(dob).unwrap_or(0))
    }
}
