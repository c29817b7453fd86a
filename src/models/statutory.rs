//! Statutory scheme configuration and deduction result models.
//!
//! A [`StatutoryScheme`] describes one legally mandated withholding (income
//! tax, social security, a per-week levy) as an ordered set of
//! [`RateBand`]s plus a calculation method. The calculator in
//! [`crate::calculation`] evaluates these against period income, employee
//! age, and opening year-to-date balances.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// How a statutory scheme computes its amounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CalculationMethod {
    /// A percentage of period income, with separate employee/employer rates.
    Percentage,
    /// A constant amount per period.
    Fixed,
    /// A constant amount per recurring unit (e.g. per Monday in the period).
    PerRecurringUnit,
    /// Progressive brackets over cumulative year-to-date income, with the
    /// period liability being the increment over tax already withheld.
    CumulativeProgressive,
}

/// One bracket of a statutory scheme.
///
/// Bands within a scheme are disjoint and sorted ascending by `min_amount`
/// (the configuration loader enforces the ordering). For non-cumulative
/// schemes at most one band matches a given income and age; the matcher
/// stops at the first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateBand {
    /// Lower income bound (inclusive).
    pub min_amount: Decimal,
    /// Upper income bound (inclusive); `None` means open-ended.
    #[serde(default)]
    pub max_amount: Option<Decimal>,
    /// Employee-side rate for percentage and cumulative methods.
    #[serde(default)]
    pub employee_rate: Decimal,
    /// Employer-side rate for the percentage method.
    #[serde(default)]
    pub employer_rate: Decimal,
    /// Constant amount for fixed and per-recurring-unit methods.
    #[serde(default)]
    pub fixed_amount: Decimal,
    /// Minimum employee age (inclusive) for the band to apply.
    #[serde(default)]
    pub min_age: Option<u32>,
    /// Maximum employee age (inclusive) for the band to apply.
    #[serde(default)]
    pub max_age: Option<u32>,
}

impl RateBand {
    /// Returns true if `income` falls within this band's bounds.
    pub fn contains_income(&self, income: Decimal) -> bool {
        income >= self.min_amount && self.max_amount.is_none_or(|max| income <= max)
    }

    /// Returns true if the (possibly unknown) age satisfies this band's gate.
    ///
    /// An unknown age satisfies only bands without age constraints; an
    /// age-gated band never matches an employee whose age is unrecorded.
    pub fn matches_age(&self, age: Option<u32>) -> bool {
        match (self.min_age, self.max_age) {
            (None, None) => true,
            (min, max) => match age {
                Some(a) => min.is_none_or(|m| a >= m) && max.is_none_or(|m| a <= m),
                None => false,
            },
        }
    }
}

/// A configured statutory withholding scheme for one jurisdiction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatutoryScheme {
    /// Unique identifier for the scheme.
    pub id: String,
    /// The jurisdiction the scheme belongs to (e.g. "ZA").
    pub jurisdiction: String,
    /// Short code used on payslips and ledger descriptions (e.g. "PAYE").
    pub code: String,
    /// Human-readable scheme name.
    pub name: String,
    /// How amounts are computed.
    pub method: CalculationMethod,
    /// Ordered rate bands, ascending by `min_amount`.
    pub bands: Vec<RateBand>,
}

/// Opening year-to-date balances for one employee and tax year.
///
/// Read-only to the engine; period-close mutates these externally. The
/// cumulative tax calculation reads them to derive "tax due this period =
/// cumulative tax owed minus YTD tax paid", clamped at zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpeningBalance {
    /// Taxable income accumulated so far this tax year.
    pub ytd_taxable_income: Decimal,
    /// Tax withheld so far this tax year.
    pub ytd_tax_paid: Decimal,
    /// Gross pay accumulated so far this tax year.
    pub ytd_gross: Decimal,
}

/// Year-to-date positions before and after this period, for audit display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YtdSnapshot {
    /// Taxable income before this period.
    pub taxable_before: Decimal,
    /// Taxable income including this period.
    pub taxable_after: Decimal,
    /// Tax paid before this period.
    pub tax_paid_before: Decimal,
    /// Tax paid including this period's liability.
    pub tax_paid_after: Decimal,
}

/// One statutory deduction computed for the period.
///
/// Only schemes with a non-zero employee or employer amount produce a
/// record; zero-amount schemes are omitted entirely.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeductionRecord {
    /// The scheme that produced this deduction.
    pub scheme_id: String,
    /// The scheme's short code (e.g. "PAYE", "UIF").
    pub scheme_code: String,
    /// Human-readable scheme name.
    pub name: String,
    /// The calculation method that was applied.
    pub method: CalculationMethod,
    /// Amount withheld from the employee.
    pub employee_amount: Decimal,
    /// Amount borne by the employer.
    pub employer_amount: Decimal,
    /// YTD before/after positions, present for cumulative schemes only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ytd: Option<YtdSnapshot>,
}
