//! Multi-source compensation aggregation.
//!
//! This module merges position-level and employee-level compensation
//! sources into a single period earnings baseline: a prorated base salary,
//! overtime derived from work records, additional compensation elements,
//! and pass-through allowances.

use rust_decimal::Decimal;

use crate::calculation::frequency::{annualize, convert_amount};
use crate::calculation::proration::{
    ProrationResult, apply_proration, calculate_proration,
};
use crate::config::EngineSettings;
use crate::models::{
    AdditionalPay, Allowance, AuditStep, CompensationSource, EarningsBreakdown, PayFrequency,
    PayPeriod, ProrationMethod, WorkRecord,
};

/// The result of aggregating all compensation sources for one period.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregationResult {
    /// The period earnings snapshot.
    pub earnings: EarningsBreakdown,
    /// The proration applied to the base-salary component.
    pub proration: ProrationResult,
    /// Audit steps documenting base resolution, proration, and overtime.
    pub audit_steps: Vec<AuditStep>,
}

/// The resolved base salary before conversion to the period frequency.
struct ResolvedBase {
    annual_amount: Decimal,
    proration_method: ProrationMethod,
    source: &'static str,
}

/// Resolves the base salary from the available sources.
///
/// An active employee override flagged as base supersedes the position
/// baseline entirely; otherwise every active position-level source is
/// normalized to monthly and summed. Absent sources resolve to a zero base
/// rather than an error.
fn resolve_base(sources: &[CompensationSource]) -> ResolvedBase {
    if let Some(base) = sources.iter().find(|s| s.is_base_override()) {
        return ResolvedBase {
            annual_amount: annualize(base.amount().max(Decimal::ZERO), base.frequency()),
            proration_method: ProrationMethod::resolve(base.proration_method()),
            source: "employee_override",
        };
    }

    let positions: Vec<&CompensationSource> = sources
        .iter()
        .filter(|s| matches!(s, CompensationSource::Position { .. }) && s.is_active())
        .collect();

    let monthly_sum: Decimal = positions
        .iter()
        .filter(|s| s.amount() > Decimal::ZERO)
        .map(|s| convert_amount(s.amount(), s.frequency(), PayFrequency::Monthly))
        .sum();

    ResolvedBase {
        annual_amount: annualize(monthly_sum, PayFrequency::Monthly),
        proration_method: ProrationMethod::resolve(
            positions.first().and_then(|s| s.proration_method()),
        ),
        source: "position_sum",
    }
}

/// Aggregates compensation sources, work records, and allowances into a
/// period earnings snapshot.
///
/// The base salary is the only component subject to proration; overtime,
/// additional compensation, and allowances are period-actuals and pass
/// through at full value. The derived hourly rate (annual base divided by
/// standard weekly hours x 52) is used for overtime only, never for the
/// base-salary line itself.
///
/// Never fails: missing optional data simply contributes zero, and the
/// total gross is non-negative whenever all inputs are non-negative.
pub fn aggregate_compensation(
    sources: &[CompensationSource],
    work_records: &[WorkRecord],
    allowances: &[Allowance],
    period: &PayPeriod,
    employment_start: Option<chrono::NaiveDate>,
    employment_end: Option<chrono::NaiveDate>,
    jurisdiction: &str,
    settings: &EngineSettings,
    first_step_number: u32,
) -> AggregationResult {
    let mut audit_steps = Vec::new();
    let mut step = first_step_number;

    // Base resolution
    let base = resolve_base(sources);
    audit_steps.push(AuditStep {
        step_number: step,
        rule_id: "base_resolution".to_string(),
        rule_name: "Base Salary Resolution".to_string(),
        input: serde_json::json!({
            "source_count": sources.len(),
        }),
        output: serde_json::json!({
            "annual_base": base.annual_amount.normalize().to_string(),
            "source": base.source,
        }),
        reasoning: format!(
            "Resolved annual base {} from {}",
            base.annual_amount.normalize(),
            base.source
        ),
    });
    step += 1;

    // Hourly rate, used only for overtime
    let annual_hours = settings.standard_weekly_hours * Decimal::from(52);
    let hourly_rate = if annual_hours.is_zero() {
        Decimal::ZERO
    } else {
        base.annual_amount / annual_hours
    };

    // Proration applies to the base-salary component only
    let proration = calculate_proration(period, employment_start, employment_end, base.proration_method);
    let period_base = convert_amount(base.annual_amount, PayFrequency::Annual, period.frequency);
    let regular_pay = apply_proration(period_base, &proration);
    audit_steps.push(AuditStep {
        step_number: step,
        rule_id: "base_proration".to_string(),
        rule_name: "Base Salary Proration".to_string(),
        input: serde_json::json!({
            "period_base": period_base.normalize().to_string(),
            "method": proration.method,
            "days_worked": proration.days_worked,
            "total_days": proration.total_days,
        }),
        output: serde_json::json!({
            "factor": proration.factor.normalize().to_string(),
            "regular_pay": regular_pay.normalize().to_string(),
            "prorated": proration.is_prorated,
        }),
        reasoning: if proration.is_prorated {
            format!(
                "{} x {}/{} days = {}",
                period_base.normalize(),
                proration.days_worked,
                proration.total_days,
                regular_pay.normalize()
            )
        } else {
            "Employee active for the full period; no proration".to_string()
        },
    });
    step += 1;

    // Additional compensation: active non-base overrides, each converted
    // independently to the period frequency
    let additional_comp: Vec<AdditionalPay> = sources
        .iter()
        .filter_map(|s| match s {
            CompensationSource::EmployeeOverride {
                description,
                is_base: false,
                active: true,
                ..
            } if s.amount() > Decimal::ZERO => Some(AdditionalPay {
                description: description.clone(),
                amount: convert_amount(s.amount(), s.frequency(), period.frequency),
            }),
            _ => None,
        })
        .collect();
    let additional_total: Decimal = additional_comp.iter().map(|a| a.amount).sum();

    // Overtime from external work records; negative hours are bad upstream
    // data and contribute nothing
    let overtime_hours: Decimal = work_records
        .iter()
        .map(|w| w.overtime_hours.max(Decimal::ZERO))
        .sum();
    let multiplier = settings.overtime_multiplier_for(jurisdiction);
    let overtime_pay = overtime_hours * hourly_rate * multiplier;
    audit_steps.push(AuditStep {
        step_number: step,
        rule_id: "overtime".to_string(),
        rule_name: "Overtime Pay".to_string(),
        input: serde_json::json!({
            "overtime_hours": overtime_hours.normalize().to_string(),
            "hourly_rate": hourly_rate.normalize().to_string(),
            "multiplier": multiplier.normalize().to_string(),
            "jurisdiction": jurisdiction,
        }),
        output: serde_json::json!({
            "overtime_pay": overtime_pay.normalize().to_string(),
        }),
        reasoning: format!(
            "{} h x {} x {} = {}",
            overtime_hours.normalize(),
            hourly_rate.normalize(),
            multiplier.normalize(),
            overtime_pay.normalize()
        ),
    });

    // Allowances pass through unprorated; skip non-positive amounts
    let allowances: Vec<Allowance> = allowances
        .iter()
        .filter(|a| a.amount > Decimal::ZERO)
        .cloned()
        .collect();
    let allowances_total: Decimal = allowances.iter().map(|a| a.amount).sum();

    let total_gross = regular_pay + overtime_pay + additional_total + allowances_total;

    AggregationResult {
        earnings: EarningsBreakdown {
            regular_pay,
            overtime_pay,
            hourly_rate,
            additional_comp,
            allowances,
            total_gross,
        },
        proration,
        audit_steps,
    }
}
