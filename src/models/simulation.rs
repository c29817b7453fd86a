//! Simulation result and audit-trail models.
//!
//! A [`PayrollSimulation`] is the side-effect-free preview of a calculation
//! run, intended for human review before anything is committed: the earnings
//! breakdown, statutory deductions with their year-to-date annotations, the
//! derived net pay, and a complete audit trace of the rules applied.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{
    Allowance, DeductionRecord, EmployeeProfile, JournalBatch, OtherDeduction, PayPeriod,
};
use crate::calculation::ProrationResult;

/// A single step in the audit trace recording a calculation decision.
///
/// Each step captures the input, output, and reasoning for a rule
/// application, so a reviewer can replay how the result was reached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// A warning generated during calculation.
///
/// Warnings indicate conditions that don't prevent calculation but may
/// require attention, such as an unbalanced journal or an unconfigured
/// territory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The severity level (e.g. "low", "medium", "high").
    pub severity: String,
}

/// The complete audit trace for a calculation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditTrace {
    /// The sequence of calculation steps.
    pub steps: Vec<AuditStep>,
    /// Any warnings generated during calculation.
    pub warnings: Vec<AuditWarning>,
    /// The total calculation duration in microseconds.
    pub duration_us: u64,
}

/// One non-base compensation element included in the period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdditionalPay {
    /// A label for the element.
    pub description: String,
    /// The period amount after frequency conversion.
    pub amount: Decimal,
}

/// The earnings side of the simulation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EarningsBreakdown {
    /// Base salary for the period, after frequency conversion and proration.
    pub regular_pay: Decimal,
    /// Overtime pay (hours x hourly rate x multiplier).
    pub overtime_pay: Decimal,
    /// The derived hourly rate used for overtime.
    pub hourly_rate: Decimal,
    /// Non-base compensation elements, each frequency-converted.
    pub additional_comp: Vec<AdditionalPay>,
    /// Period-actual allowances, passed through unprorated.
    pub allowances: Vec<Allowance>,
    /// Sum of every earnings component above.
    pub total_gross: Decimal,
}

/// The structured preview of one payroll calculation.
///
/// Side-effect free: nothing is persisted by producing a simulation, and
/// calling the engine twice with the same inputs yields the same monetary
/// results (ids and timestamps differ per run).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayrollSimulation {
    /// Unique identifier for this calculation.
    pub calculation_id: Uuid,
    /// When the calculation was performed.
    pub timestamp: DateTime<Utc>,
    /// The version of the engine that performed the calculation.
    pub engine_version: String,
    /// The employee the calculation is for.
    pub employee: EmployeeProfile,
    /// The pay period for this calculation.
    pub pay_period: PayPeriod,
    /// Partial-period proration applied to the base salary.
    pub proration: ProrationResult,
    /// The earnings breakdown.
    pub earnings: EarningsBreakdown,
    /// Statutory deductions, with YTD annotations for cumulative schemes.
    pub statutory_deductions: Vec<DeductionRecord>,
    /// Voluntary/non-statutory deductions passed through from input.
    pub other_deductions: Vec<OtherDeduction>,
    /// Gross earnings minus employee-side deductions.
    pub net_pay: Decimal,
    /// Complete audit trace of the rules applied.
    pub audit_trace: AuditTrace,
}

/// The full output of one engine invocation: preview plus GL batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayrollCalculation {
    /// The human-reviewable preview.
    pub simulation: PayrollSimulation,
    /// The balanced (or warned) journal batch for the caller to persist.
    pub gl_batch: JournalBatch,
}
