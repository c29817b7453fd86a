//! Pay period and pay frequency models.
//!
//! This module contains the [`PayFrequency`] and [`PayPeriod`] types that
//! define the calculation context for a payroll run.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// How often an amount recurs.
///
/// Frequencies are converted through a fixed annualized intermediate:
/// weekly x52, biweekly x26, semimonthly x24, monthly x12, annual x1.
/// Every component in the engine shares these exact multipliers; using a
/// different basis anywhere would make year-to-date reconciliation drift.
///
/// # Example
///
/// ```
/// use payroll_engine::models::PayFrequency;
/// use rust_decimal::Decimal;
///
/// assert_eq!(PayFrequency::Monthly.periods_per_year(), Decimal::from(12));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayFrequency {
    /// Paid every week (52 periods per year).
    Weekly,
    /// Paid every two weeks (26 periods per year).
    Biweekly,
    /// Paid twice a month (24 periods per year).
    SemiMonthly,
    /// Paid monthly (12 periods per year).
    Monthly,
    /// Paid once a year.
    Annual,
}

impl PayFrequency {
    /// Returns the number of pay periods of this frequency in a year.
    pub fn periods_per_year(&self) -> Decimal {
        match self {
            PayFrequency::Weekly => Decimal::from(52),
            PayFrequency::Biweekly => Decimal::from(26),
            PayFrequency::SemiMonthly => Decimal::from(24),
            PayFrequency::Monthly => Decimal::from(12),
            PayFrequency::Annual => Decimal::ONE,
        }
    }
}

/// A pay period with its date range, frequency, and recurring-unit count.
///
/// The recurring-unit count is the number of a designated weekly anchor day
/// (for example, Mondays) falling within the period; per-unit statutory
/// charges multiply their configured amount by this count. The period is
/// immutable once calculation begins.
///
/// # Example
///
/// ```
/// use payroll_engine::models::{PayFrequency, PayPeriod};
/// use chrono::NaiveDate;
///
/// let period = PayPeriod {
///     start_date: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
///     end_date: NaiveDate::from_ymd_opt(2026, 1, 31).unwrap(),
///     frequency: PayFrequency::Monthly,
///     recurring_unit_count: 4,
/// };
/// assert_eq!(period.total_days(), 31);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayPeriod {
    /// The start date of the pay period (inclusive).
    pub start_date: NaiveDate,
    /// The end date of the pay period (inclusive).
    pub end_date: NaiveDate,
    /// The pay frequency this period represents.
    pub frequency: PayFrequency,
    /// Number of weekly anchor days (e.g. Mondays) within the period.
    #[serde(default)]
    pub recurring_unit_count: u32,
}

impl PayPeriod {
    /// Returns the inclusive number of calendar days in the period.
    ///
    /// Returns 0 if the period bounds are inverted; callers validate bounds
    /// before calculation via [`PayPeriod::validate`].
    pub fn total_days(&self) -> u32 {
        if self.end_date < self.start_date {
            return 0;
        }
        (self.end_date - self.start_date).num_days() as u32 + 1
    }

    /// Checks if a given date falls within this pay period (inclusive).
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date <= self.end_date
    }

    /// Validates that the period bounds are usable for calculation.
    ///
    /// Inverted bounds are a hard failure: the calculation cannot proceed,
    /// as opposed to legitimately producing a zero-valued result.
    pub fn validate(&self) -> crate::error::EngineResult<()> {
        if self.end_date < self.start_date {
            return Err(crate::error::EngineError::InvalidPayPeriod {
                start: self.start_date,
                end: self.end_date,
                message: "end date before start date".to_string(),
            });
        }
        Ok(())
    }
}
