//! The full calculation pipeline.
//!
//! Wires the pure components together for one employee and one pay period:
//! aggregation (with proration and frequency conversion), statutory
//! deductions over the aggregated taxable income, net pay derivation, and
//! GL posting. Produces a side-effect-free simulation preview alongside
//! the journal batch; persistence of either is entirely a caller concern,
//! as is guarding against double-posting.
//!
//! Every run is independent and re-entrant: no global state is touched, so
//! callers may run one task per employee in parallel over a shared,
//! read-only reference-data snapshot.

use std::collections::BTreeMap;
use std::time::Instant;

use chrono::Utc;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::calculation::{aggregate_compensation, calculate_statutory_deductions};
use crate::config::EngineSettings;
use crate::error::EngineResult;
use crate::ledger::{PostingTotals, post_journal};
use crate::models::{
    Allowance, AuditTrace, AuditWarning, CompensationSource, ContributionCategory,
    EmployeeProfile, EmployerContribution, LedgerConfig, OpeningBalance, OtherDeduction,
    PayPeriod, PayrollCalculation, PayrollSimulation, StatutoryScheme, WorkRecord,
};

/// The engine version stamped onto every simulation.
pub const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Everything one calculation run consumes, fully materialized up front.
///
/// The reference data (schemes, ledger, settings) is mutually independent
/// and should be fetched concurrently by the caller before invoking the
/// engine synchronously. Nothing in here is mutated by the run.
#[derive(Debug, Clone)]
pub struct CalculationInput {
    /// The employee the run is for.
    pub employee: EmployeeProfile,
    /// The pay period bounds, frequency, and recurring-unit count.
    pub pay_period: PayPeriod,
    /// Position- and employee-level compensation sources.
    pub compensation_sources: Vec<CompensationSource>,
    /// Overtime hours from external work records.
    pub work_records: Vec<WorkRecord>,
    /// Period-actual allowances.
    pub allowances: Vec<Allowance>,
    /// Non-statutory deductions withheld from the employee.
    pub other_deductions: Vec<OtherDeduction>,
    /// Employer-paid contributions for the period.
    pub employer_contributions: Vec<EmployerContribution>,
    /// Statutory schemes configured for the employee's jurisdiction.
    pub schemes: Vec<StatutoryScheme>,
    /// Opening year-to-date balances for the current tax year.
    pub opening_balance: OpeningBalance,
    /// GL accounts, mappings, segments, and override rules.
    pub ledger: LedgerConfig,
    /// Default values for GL segment composition.
    pub segment_defaults: BTreeMap<String, String>,
    /// Engine-wide calculation settings.
    pub settings: EngineSettings,
}

fn contribution_total(
    contributions: &[EmployerContribution],
    category: ContributionCategory,
) -> Decimal {
    contributions
        .iter()
        .filter(|c| c.category == category && c.amount > Decimal::ZERO)
        .map(|c| c.amount)
        .sum()
}

/// Runs the full calculation for one employee and period.
///
/// Fails only when the calculation cannot proceed at all (invalid period
/// bounds); every configuration-absence case degrades to an empty or
/// best-effort result with warnings, so a zero net pay is always a valid
/// outcome distinguishable from an error.
pub fn run_calculation(input: &CalculationInput) -> EngineResult<PayrollCalculation> {
    let started = Instant::now();
    input.pay_period.validate()?;

    let mut warnings: Vec<AuditWarning> = Vec::new();

    // Earnings
    let aggregation = aggregate_compensation(
        &input.compensation_sources,
        &input.work_records,
        &input.allowances,
        &input.pay_period,
        input.employee.employment_start_date,
        input.employee.employment_end_date,
        &input.employee.jurisdiction,
        &input.settings,
        1,
    );
    let mut steps = aggregation.audit_steps;
    let next_step = steps.len() as u32 + 1;

    // Statutory deductions on the aggregated taxable income
    if input.schemes.is_empty() {
        warnings.push(AuditWarning {
            code: "NO_STATUTORY_SCHEMES".to_string(),
            message: format!(
                "no statutory deductions configured for jurisdiction '{}'",
                input.employee.jurisdiction
            ),
            severity: "low".to_string(),
        });
    }
    let age = input.employee.age_on(input.pay_period.end_date);
    let statutory = calculate_statutory_deductions(
        &input.schemes,
        aggregation.earnings.total_gross,
        age,
        &input.opening_balance,
        input.pay_period.recurring_unit_count,
        next_step,
    );
    steps.extend(statutory.audit_steps.clone());

    // Net pay: gross minus every employee-side withholding. A negative net
    // is legitimate data (e.g. deductions exceeding a short period's pay)
    // and is reported rather than clamped.
    let other_deduction_total: Decimal = input
        .other_deductions
        .iter()
        .filter(|d| d.amount > Decimal::ZERO)
        .map(|d| d.amount)
        .sum();
    let net_pay =
        aggregation.earnings.total_gross - statutory.total_employee() - other_deduction_total;
    if net_pay < Decimal::ZERO {
        warnings.push(AuditWarning {
            code: "NEGATIVE_NET_PAY".to_string(),
            message: format!("net pay {} is negative", net_pay.normalize()),
            severity: "high".to_string(),
        });
    }

    // Journal
    let totals = PostingTotals {
        gross_pay: aggregation.earnings.total_gross,
        net_pay,
        employee_tax: statutory.total_employee(),
        employer_tax: statutory.total_employer(),
        benefit_deductions: other_deduction_total,
        employer_benefits: contribution_total(
            &input.employer_contributions,
            ContributionCategory::Benefit,
        ),
        employer_retirement: contribution_total(
            &input.employer_contributions,
            ContributionCategory::Retirement,
        ),
        employer_savings: contribution_total(
            &input.employer_contributions,
            ContributionCategory::Savings,
        ),
    };
    let gl_batch = post_journal(&totals, &input.ledger, &input.segment_defaults);
    for warning in &gl_batch.warnings {
        warnings.push(AuditWarning {
            code: "GL_POSTING".to_string(),
            message: warning.clone(),
            severity: "medium".to_string(),
        });
    }

    let simulation = PayrollSimulation {
        calculation_id: Uuid::new_v4(),
        timestamp: Utc::now(),
        engine_version: ENGINE_VERSION.to_string(),
        employee: input.employee.clone(),
        pay_period: input.pay_period.clone(),
        proration: aggregation.proration,
        earnings: aggregation.earnings,
        statutory_deductions: statutory.deductions,
        other_deductions: input.other_deductions.clone(),
        net_pay,
        audit_trace: AuditTrace {
            steps,
            warnings,
            duration_us: started.elapsed().as_micros() as u64,
        },
    };

    Ok(PayrollCalculation {
        simulation,
        gl_batch,
    })
}
