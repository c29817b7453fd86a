//! Partial-period proration.
//!
//! This module computes the factor by which a full-period amount is scaled
//! down when an employee's start or end date truncates the pay period.

use chrono::{Datelike, NaiveDate, Weekday};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{PayPeriod, ProrationMethod};

/// The outcome of a proration calculation.
///
/// Invariant: `factor` is within `[0, 1]` and `is_prorated` is true exactly
/// when the employee's dates truncate the period (`factor < 1`).
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::{calculate_proration, apply_proration};
/// use payroll_engine::models::{PayFrequency, PayPeriod, ProrationMethod};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let period = PayPeriod {
///     start_date: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
///     end_date: NaiveDate::from_ymd_opt(2026, 1, 31).unwrap(),
///     frequency: PayFrequency::Monthly,
///     recurring_unit_count: 4,
/// };
/// let result = calculate_proration(
///     &period,
///     Some(NaiveDate::from_ymd_opt(2026, 1, 16).unwrap()),
///     None,
///     ProrationMethod::CalendarDays,
/// );
/// assert!(result.is_prorated);
/// assert_eq!(result.days_worked, 16);
/// assert_eq!(result.total_days, 31);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProrationResult {
    /// True when the employee's dates truncate the period.
    pub is_prorated: bool,
    /// The scaling factor, within `[0, 1]`.
    pub factor: Decimal,
    /// Days counted in the overlap window under the chosen method.
    pub days_worked: u32,
    /// Days counted in the full period under the same method.
    pub total_days: u32,
    /// The counting method that was applied.
    pub method: ProrationMethod,
}

impl ProrationResult {
    /// A full-period result: factor exactly 1, nothing truncated.
    pub fn full_period(total_days: u32, method: ProrationMethod) -> Self {
        ProrationResult {
            is_prorated: false,
            factor: Decimal::ONE,
            days_worked: total_days,
            total_days,
            method,
        }
    }
}

/// Counts days in `[from, to]` inclusive under the given method.
///
/// Working-day counting excludes Saturdays and Sundays; the weekend set is
/// fixed, not configurable.
fn count_days(from: NaiveDate, to: NaiveDate, method: ProrationMethod) -> u32 {
    if to < from {
        return 0;
    }
    match method {
        ProrationMethod::CalendarDays | ProrationMethod::None => {
            (to - from).num_days() as u32 + 1
        }
        ProrationMethod::WorkingDays => from
            .iter_days()
            .take_while(|d| *d <= to)
            .filter(|d| !matches!(d.weekday(), Weekday::Sat | Weekday::Sun))
            .count() as u32,
    }
}

/// Computes the partial-period factor for an employee within a pay period.
///
/// An employee whose start date is unset or on/before the period start and
/// whose end date is unset or on/after the period end is not prorated and
/// receives a factor of exactly 1. Otherwise the factor is the ratio of
/// days counted in the overlap window `[max(period.start, start),
/// min(period.end, end)]` to days counted in the full period, clamped to
/// `[0, 1]`. An empty overlap (employee not active during the period at
/// all) yields a factor of 0 with `is_prorated` set.
///
/// The [`ProrationMethod::None`] method always yields a factor of 1.
pub fn calculate_proration(
    period: &PayPeriod,
    employment_start: Option<NaiveDate>,
    employment_end: Option<NaiveDate>,
    method: ProrationMethod,
) -> ProrationResult {
    let total_days = count_days(period.start_date, period.end_date, method);

    if method == ProrationMethod::None {
        return ProrationResult::full_period(total_days, method);
    }

    let starts_before = employment_start.is_none_or(|d| d <= period.start_date);
    let ends_after = employment_end.is_none_or(|d| d >= period.end_date);
    if starts_before && ends_after {
        return ProrationResult::full_period(total_days, method);
    }

    let overlap_start = employment_start
        .map(|d| d.max(period.start_date))
        .unwrap_or(period.start_date);
    let overlap_end = employment_end
        .map(|d| d.min(period.end_date))
        .unwrap_or(period.end_date);

    let days_worked = count_days(overlap_start, overlap_end, method);

    let factor = if total_days == 0 {
        Decimal::ZERO
    } else {
        (Decimal::from(days_worked) / Decimal::from(total_days))
            .clamp(Decimal::ZERO, Decimal::ONE)
    };

    ProrationResult {
        is_prorated: factor < Decimal::ONE,
        factor,
        days_worked,
        total_days,
        method,
    }
}

/// Applies a proration factor to an amount. Pure, no side effects.
pub fn apply_proration(amount: Decimal, result: &ProrationResult) -> Decimal {
    amount * result.factor
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PayFrequency;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn january() -> PayPeriod {
        PayPeriod {
            start_date: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2026, 1, 31).unwrap(),
            frequency: PayFrequency::Monthly,
            recurring_unit_count: 4,
        }
    }

    /// PR-001: full-period employment yields factor exactly 1
    #[test]
    fn test_full_period_employment_not_prorated() {
        let result = calculate_proration(&january(), None, None, ProrationMethod::CalendarDays);
        assert!(!result.is_prorated);
        assert_eq!(result.factor, Decimal::ONE);
        assert_eq!(result.days_worked, 31);
        assert_eq!(result.total_days, 31);
    }

    /// PR-002: mid-period start, Jan 16 in a 31-day month
    #[test]
    fn test_mid_period_start_calendar_days() {
        let result = calculate_proration(
            &january(),
            Some(NaiveDate::from_ymd_opt(2026, 1, 16).unwrap()),
            None,
            ProrationMethod::CalendarDays,
        );
        assert!(result.is_prorated);
        assert_eq!(result.days_worked, 16);
        assert_eq!(result.total_days, 31);
        assert_eq!(result.factor, dec("16") / dec("31"));
        // factor ~ 0.516
        assert!(result.factor > dec("0.51") && result.factor < dec("0.52"));
    }

    /// PR-003: mid-period end truncates the tail
    #[test]
    fn test_mid_period_end_calendar_days() {
        let result = calculate_proration(
            &january(),
            None,
            Some(NaiveDate::from_ymd_opt(2026, 1, 10).unwrap()),
            ProrationMethod::CalendarDays,
        );
        assert!(result.is_prorated);
        assert_eq!(result.days_worked, 10);
        assert_eq!(result.factor, dec("10") / dec("31"));
    }

    /// PR-004: employee not active during the period at all
    #[test]
    fn test_empty_overlap_yields_zero_factor() {
        let result = calculate_proration(
            &january(),
            Some(NaiveDate::from_ymd_opt(2026, 2, 1).unwrap()),
            None,
            ProrationMethod::CalendarDays,
        );
        assert!(result.is_prorated);
        assert_eq!(result.factor, Decimal::ZERO);
        assert_eq!(result.days_worked, 0);
    }

    /// PR-005: employment ended before the period started
    #[test]
    fn test_employment_ended_before_period() {
        let result = calculate_proration(
            &january(),
            None,
            Some(NaiveDate::from_ymd_opt(2025, 12, 15).unwrap()),
            ProrationMethod::CalendarDays,
        );
        assert!(result.is_prorated);
        assert_eq!(result.factor, Decimal::ZERO);
    }

    /// PR-006: working-days counting excludes weekends
    #[test]
    fn test_working_days_excludes_weekends() {
        // January 2026 has 22 weekdays; Jan 16 onward (Fri 16th) has 11.
        let result = calculate_proration(
            &january(),
            Some(NaiveDate::from_ymd_opt(2026, 1, 16).unwrap()),
            None,
            ProrationMethod::WorkingDays,
        );
        assert_eq!(result.total_days, 22);
        assert_eq!(result.days_worked, 11);
        assert_eq!(result.factor, dec("0.5"));
    }

    /// PR-007: None method never prorates
    #[test]
    fn test_none_method_never_prorates() {
        let result = calculate_proration(
            &january(),
            Some(NaiveDate::from_ymd_opt(2026, 1, 20).unwrap()),
            None,
            ProrationMethod::None,
        );
        assert!(!result.is_prorated);
        assert_eq!(result.factor, Decimal::ONE);
    }

    #[test]
    fn test_start_on_period_start_is_full_period() {
        let result = calculate_proration(
            &january(),
            Some(NaiveDate::from_ymd_opt(2026, 1, 1).unwrap()),
            None,
            ProrationMethod::CalendarDays,
        );
        assert!(!result.is_prorated);
        assert_eq!(result.factor, Decimal::ONE);
    }

    #[test]
    fn test_end_on_period_end_is_full_period() {
        let result = calculate_proration(
            &january(),
            None,
            Some(NaiveDate::from_ymd_opt(2026, 1, 31).unwrap()),
            ProrationMethod::CalendarDays,
        );
        assert!(!result.is_prorated);
    }

    #[test]
    fn test_both_dates_truncate() {
        let result = calculate_proration(
            &january(),
            Some(NaiveDate::from_ymd_opt(2026, 1, 10).unwrap()),
            Some(NaiveDate::from_ymd_opt(2026, 1, 20).unwrap()),
            ProrationMethod::CalendarDays,
        );
        assert_eq!(result.days_worked, 11);
        assert_eq!(result.factor, dec("11") / dec("31"));
    }

    #[test]
    fn test_apply_proration_scales_amount() {
        let result = calculate_proration(
            &january(),
            Some(NaiveDate::from_ymd_opt(2026, 1, 16).unwrap()),
            None,
            ProrationMethod::CalendarDays,
        );
        let prorated = apply_proration(dec("3100"), &result);
        // 16/31 is an inexact quotient; compare against the same expression
        assert_eq!(prorated, dec("3100") * (dec("16") / dec("31")));
        assert_eq!(prorated.round_dp(2), dec("1600.00"));
    }

    #[test]
    fn test_apply_proration_full_factor_is_identity() {
        let result = ProrationResult::full_period(31, ProrationMethod::CalendarDays);
        assert_eq!(apply_proration(dec("5000"), &result), dec("5000"));
    }

    #[test]
    fn test_factor_always_within_unit_interval() {
        let dates = [
            None,
            Some(NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()),
            Some(NaiveDate::from_ymd_opt(2026, 1, 15).unwrap()),
            Some(NaiveDate::from_ymd_opt(2026, 3, 1).unwrap()),
        ];
        for start in dates {
            for end in dates {
                for method in [
                    ProrationMethod::CalendarDays,
                    ProrationMethod::WorkingDays,
                    ProrationMethod::None,
                ] {
                    let result = calculate_proration(&january(), start, end, method);
                    assert!(result.factor >= Decimal::ZERO);
                    assert!(result.factor <= Decimal::ONE);
                    assert_eq!(result.is_prorated, result.factor < Decimal::ONE);
                }
            }
        }
    }
}
