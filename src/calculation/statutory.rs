//! Statutory deduction calculation.
//!
//! Evaluates every configured statutory scheme for an employee's
//! jurisdiction against this period's taxable income, the employee's age,
//! and the opening year-to-date balances. Cumulative-progressive schemes
//! carry YTD continuity; the remaining methods match a single rate band
//! with short-circuiting first-match semantics.

use rust_decimal::Decimal;

use crate::models::{
    AuditStep, CalculationMethod, DeductionRecord, OpeningBalance, RateBand, StatutoryScheme,
    YtdSnapshot,
};

/// The result of evaluating all schemes for one period.
#[derive(Debug, Clone, PartialEq)]
pub struct StatutoryResult {
    /// Deduction records, in scheme order; zero-amount schemes omitted.
    pub deductions: Vec<DeductionRecord>,
    /// Audit steps, one per scheme that produced a record.
    pub audit_steps: Vec<AuditStep>,
}

impl StatutoryResult {
    /// Sum of employee-side amounts across all deductions.
    pub fn total_employee(&self) -> Decimal {
        self.deductions.iter().map(|d| d.employee_amount).sum()
    }

    /// Sum of employer-side amounts across all deductions.
    pub fn total_employer(&self) -> Decimal {
        self.deductions.iter().map(|d| d.employer_amount).sum()
    }
}

/// Total marginal tax owed on a cumulative taxable amount.
///
/// Sums, over every band whose lower bound has been reached, the band rate
/// applied to the slice of income falling inside that band. Monotonically
/// non-decreasing in the taxable amount.
fn progressive_tax_due(bands: &[RateBand], cumulative_taxable: Decimal) -> Decimal {
    bands
        .iter()
        .filter(|band| cumulative_taxable >= band.min_amount)
        .map(|band| {
            let upper = band
                .max_amount
                .map_or(cumulative_taxable, |max| cumulative_taxable.min(max));
            (upper - band.min_amount).max(Decimal::ZERO) * band.employee_rate
        })
        .sum()
}

/// Finds the first band matching income and age, in ascending band order.
///
/// First match wins; later overlapping bands are never consulted. No match
/// is a silent no-op since many schemes are income- or age-gated by design.
fn find_matching_band(
    bands: &[RateBand],
    income: Decimal,
    age: Option<u32>,
) -> Option<&RateBand> {
    bands
        .iter()
        .find(|band| band.contains_income(income) && band.matches_age(age))
}

/// Evaluates one non-cumulative scheme against the matched band.
///
/// Returns the (employee, employer) amounts. Fixed and per-recurring-unit
/// charges are employee-side; the employer side applies only to the
/// percentage method.
fn band_amounts(
    method: CalculationMethod,
    band: &RateBand,
    income: Decimal,
    recurring_unit_count: u32,
) -> (Decimal, Decimal) {
    match method {
        CalculationMethod::Percentage => {
            (income * band.employee_rate, income * band.employer_rate)
        }
        CalculationMethod::Fixed => (band.fixed_amount, Decimal::ZERO),
        CalculationMethod::PerRecurringUnit => (
            band.fixed_amount * Decimal::from(recurring_unit_count),
            Decimal::ZERO,
        ),
        // handled separately by the caller
        CalculationMethod::CumulativeProgressive => (Decimal::ZERO, Decimal::ZERO),
    }
}

/// Calculates all statutory deductions for one employee and period.
///
/// Each scheme is an independent state machine: cumulative-progressive
/// schemes derive this period's liability as the increment of total tax
/// owed on the new cumulative taxable income over tax already paid,
/// clamped at zero (over-withholding never issues a refund within the
/// calculation); the other methods match a single band. Schemes producing
/// zero on both sides are omitted entirely, and an empty scheme list (an
/// unconfigured jurisdiction) legitimately yields an empty result.
pub fn calculate_statutory_deductions(
    schemes: &[StatutoryScheme],
    taxable_income: Decimal,
    age: Option<u32>,
    opening: &OpeningBalance,
    recurring_unit_count: u32,
    first_step_number: u32,
) -> StatutoryResult {
    let mut deductions = Vec::new();
    let mut audit_steps = Vec::new();
    let mut step = first_step_number;
    let taxable_income = taxable_income.max(Decimal::ZERO);

    for scheme in schemes {
        let record = match scheme.method {
            CalculationMethod::CumulativeProgressive => {
                let taxable_after = opening.ytd_taxable_income + taxable_income;
                let total_due = progressive_tax_due(&scheme.bands, taxable_after);
                let this_period = (total_due - opening.ytd_tax_paid).max(Decimal::ZERO);
                if this_period.is_zero() {
                    None
                } else {
                    audit_steps.push(AuditStep {
                        step_number: step,
                        rule_id: format!("statutory_{}", scheme.code.to_lowercase()),
                        rule_name: scheme.name.clone(),
                        input: serde_json::json!({
                            "taxable_income": taxable_income.normalize().to_string(),
                            "ytd_taxable_before": opening.ytd_taxable_income.normalize().to_string(),
                            "ytd_tax_paid_before": opening.ytd_tax_paid.normalize().to_string(),
                        }),
                        output: serde_json::json!({
                            "cumulative_tax_due": total_due.normalize().to_string(),
                            "this_period": this_period.normalize().to_string(),
                        }),
                        reasoning: format!(
                            "Cumulative tax due {} minus {} already paid = {}",
                            total_due.normalize(),
                            opening.ytd_tax_paid.normalize(),
                            this_period.normalize()
                        ),
                    });
                    step += 1;
                    Some(DeductionRecord {
                        scheme_id: scheme.id.clone(),
                        scheme_code: scheme.code.clone(),
                        name: scheme.name.clone(),
                        method: scheme.method,
                        employee_amount: this_period,
                        employer_amount: Decimal::ZERO,
                        ytd: Some(YtdSnapshot {
                            taxable_before: opening.ytd_taxable_income,
                            taxable_after,
                            tax_paid_before: opening.ytd_tax_paid,
                            tax_paid_after: opening.ytd_tax_paid + this_period,
                        }),
                    })
                }
            }
            method => {
                let matched = find_matching_band(&scheme.bands, taxable_income, age);
                match matched {
                    None => None,
                    Some(band) => {
                        let (employee_amount, employer_amount) =
                            band_amounts(method, band, taxable_income, recurring_unit_count);
                        if employee_amount <= Decimal::ZERO && employer_amount <= Decimal::ZERO {
                            None
                        } else {
                            audit_steps.push(AuditStep {
                                step_number: step,
                                rule_id: format!("statutory_{}", scheme.code.to_lowercase()),
                                rule_name: scheme.name.clone(),
                                input: serde_json::json!({
                                    "taxable_income": taxable_income.normalize().to_string(),
                                    "age": age,
                                    "band_min": band.min_amount.normalize().to_string(),
                                    "band_max": band.max_amount.map(|m| m.normalize().to_string()),
                                }),
                                output: serde_json::json!({
                                    "employee_amount": employee_amount.normalize().to_string(),
                                    "employer_amount": employer_amount.normalize().to_string(),
                                }),
                                reasoning: match method {
                                    CalculationMethod::Percentage => format!(
                                        "{} x {} employee / {} employer",
                                        taxable_income.normalize(),
                                        band.employee_rate.normalize(),
                                        band.employer_rate.normalize()
                                    ),
                                    CalculationMethod::Fixed => {
                                        format!("Fixed charge {}", band.fixed_amount.normalize())
                                    }
                                    CalculationMethod::PerRecurringUnit => format!(
                                        "{} x {} recurring units",
                                        band.fixed_amount.normalize(),
                                        recurring_unit_count
                                    ),
                                    CalculationMethod::CumulativeProgressive => unreachable!(),
                                },
                            });
                            step += 1;
                            Some(DeductionRecord {
                                scheme_id: scheme.id.clone(),
                                scheme_code: scheme.code.clone(),
                                name: scheme.name.clone(),
                                method,
                                employee_amount: employee_amount.max(Decimal::ZERO),
                                employer_amount: employer_amount.max(Decimal::ZERO),
                                ytd: None,
                            })
                        }
                    }
                }
            }
        };

        if let Some(record) = record {
            deductions.push(record);
        }
    }

    StatutoryResult {
        deductions,
        audit_steps,
    }
}
