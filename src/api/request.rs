//! Request types for the payroll engine API.
//!
//! This module defines the JSON request structure for the `/calculate`
//! endpoint. Reference data (statutory schemes, ledger setup, engine
//! settings) comes from the server's loaded configuration; the request
//! carries only the per-employee, per-period inputs.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::models::{
    Allowance, CompensationSource, EmployeeProfile, EmployerContribution, OpeningBalance,
    OtherDeduction, PayPeriod, WorkRecord,
};

/// Request body for the `/calculate` endpoint.
///
/// Contains all information needed to calculate pay and the GL journal for
/// one employee within one pay period.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculationRequest {
    /// The employee information.
    pub employee: EmployeeProfile,
    /// The pay period for the calculation.
    pub pay_period: PayPeriod,
    /// Position- and employee-level compensation sources.
    #[serde(default)]
    pub compensation_sources: Vec<CompensationSource>,
    /// Overtime hours from work records within the period.
    #[serde(default)]
    pub work_records: Vec<WorkRecord>,
    /// Period-actual allowances.
    #[serde(default)]
    pub allowances: Vec<Allowance>,
    /// Non-statutory deductions withheld from the employee.
    #[serde(default)]
    pub other_deductions: Vec<OtherDeduction>,
    /// Employer-paid contributions for the period.
    #[serde(default)]
    pub employer_contributions: Vec<EmployerContribution>,
    /// Opening year-to-date balances for the current tax year.
    #[serde(default)]
    pub opening_balance: OpeningBalance,
    /// Default values for GL segment composition.
    #[serde(default)]
    pub segment_defaults: BTreeMap<String, String>,
}
