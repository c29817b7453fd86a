//! Property-based tests for the calculation invariants.
//!
//! Exercises the pure calculation functions over generated inputs:
//! proration bounds, frequency conversion round-trips, cumulative tax
//! monotonicity and non-negativity, and journal balance.

use std::collections::BTreeMap;

use chrono::{Duration, NaiveDate};
use proptest::prelude::*;
use rust_decimal::Decimal;

use payroll_engine::calculation::{
    annualize, calculate_proration, calculate_statutory_deductions, convert_amount,
};
use payroll_engine::ledger::{PostingTotals, post_journal};
use payroll_engine::models::{
    CalculationMethod, GLAccount, GLMapping, LedgerConfig, OpeningBalance, PayFrequency,
    PayPeriod, ProrationMethod, RateBand, StatutoryScheme,
};

fn money() -> impl Strategy<Value = Decimal> {
    // 0.00 to 10,000,000.00 in cents
    (0i64..=1_000_000_000).prop_map(|cents| Decimal::new(cents, 2))
}

fn any_frequency() -> impl Strategy<Value = PayFrequency> {
    prop_oneof![
        Just(PayFrequency::Weekly),
        Just(PayFrequency::Biweekly),
        Just(PayFrequency::SemiMonthly),
        Just(PayFrequency::Monthly),
        Just(PayFrequency::Annual),
    ]
}

fn any_proration_method() -> impl Strategy<Value = ProrationMethod> {
    prop_oneof![
        Just(ProrationMethod::CalendarDays),
        Just(ProrationMethod::WorkingDays),
        Just(ProrationMethod::None),
    ]
}

fn day(offset: i64) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 1, 1).unwrap() + Duration::days(offset)
}

fn progressive_scheme() -> StatutoryScheme {
    StatutoryScheme {
        id: "paye".to_string(),
        jurisdiction: "ZA".to_string(),
        code: "PAYE".to_string(),
        name: "Pay As You Earn".to_string(),
        method: CalculationMethod::CumulativeProgressive,
        bands: vec![
            RateBand {
                min_amount: Decimal::ZERO,
                max_amount: Some(Decimal::new(20000, 0)),
                employee_rate: Decimal::new(18, 2),
                employer_rate: Decimal::ZERO,
                fixed_amount: Decimal::ZERO,
                min_age: None,
                max_age: None,
            },
            RateBand {
                min_amount: Decimal::new(20000, 0),
                max_amount: Some(Decimal::new(50000, 0)),
                employee_rate: Decimal::new(26, 2),
                employer_rate: Decimal::ZERO,
                fixed_amount: Decimal::ZERO,
                min_age: None,
                max_age: None,
            },
            RateBand {
                min_amount: Decimal::new(50000, 0),
                max_amount: None,
                employee_rate: Decimal::new(31, 2),
                employer_rate: Decimal::ZERO,
                fixed_amount: Decimal::ZERO,
                min_age: None,
                max_age: None,
            },
        ],
    }
}

fn employee_amount(schemes: &[StatutoryScheme], income: Decimal, paid: Decimal) -> Decimal {
    let opening = OpeningBalance {
        ytd_taxable_income: Decimal::ZERO,
        ytd_tax_paid: paid,
        ytd_gross: Decimal::ZERO,
    };
    calculate_statutory_deductions(schemes, income, None, &opening, 0, 1)
        .deductions
        .first()
        .map(|d| d.employee_amount)
        .unwrap_or(Decimal::ZERO)
}

fn balanced_ledger() -> LedgerConfig {
    let account = |id: &str, code: &str| GLAccount {
        id: id.to_string(),
        code: code.to_string(),
        name: code.to_string(),
    };
    let debit = |mapping_type: &str, id: &str| GLMapping {
        mapping_type: mapping_type.to_string(),
        debit_account_id: Some(id.to_string()),
        credit_account_id: None,
        priority: 0,
    };
    let credit = |mapping_type: &str, id: &str| GLMapping {
        mapping_type: mapping_type.to_string(),
        debit_account_id: None,
        credit_account_id: Some(id.to_string()),
        priority: 0,
    };
    let mut ledger = LedgerConfig {
        accounts: vec![
            account("a_gross", "5010"),
            account("a_net", "2100"),
            account("a_tax", "2200"),
            account("a_ben", "2300"),
        ],
        mappings: vec![
            debit("gross_pay", "a_gross"),
            credit("net_pay", "a_net"),
            credit("employee_tax", "a_tax"),
            credit("benefit_deductions", "a_ben"),
        ],
        segments: vec![],
        override_rules: vec![],
    };
    ledger.normalize();
    ledger
}

proptest! {
    /// The proration factor never leaves [0, 1] and days worked never
    /// exceed the period's day count, for any overlap of employment dates
    /// with the period.
    #[test]
    fn proration_factor_bounded(
        period_len in 1i64..366,
        start_offset in -400i64..400,
        tenure in 0i64..800,
        method in any_proration_method(),
    ) {
        let period = PayPeriod {
            start_date: day(0),
            end_date: day(period_len - 1),
            frequency: PayFrequency::Monthly,
            recurring_unit_count: 0,
        };
        let employment_start = day(start_offset);
        let employment_end = day(start_offset + tenure);

        let result = calculate_proration(
            &period,
            Some(employment_start),
            Some(employment_end),
            method,
        );

        prop_assert!(result.factor >= Decimal::ZERO);
        prop_assert!(result.factor <= Decimal::ONE);
        prop_assert!(result.days_worked <= result.total_days);
    }

    /// Converting between frequencies through the annualized intermediate
    /// and back recovers the original amount within tolerance.
    #[test]
    fn frequency_round_trip(
        amount in money(),
        from in any_frequency(),
        to in any_frequency(),
    ) {
        let there = convert_amount(amount, from, to);
        let back = convert_amount(there, to, from);
        let tolerance = Decimal::new(1, 7);
        prop_assert!((back - amount).abs() <= tolerance, "{} -> {} -> {}", amount, there, back);
    }

    /// Annualizing is linear: twice the amount annualizes to twice the
    /// annual figure.
    #[test]
    fn annualize_is_linear(amount in money(), frequency in any_frequency()) {
        let double = annualize(amount + amount, frequency);
        prop_assert_eq!(double, annualize(amount, frequency) + annualize(amount, frequency));
    }

    /// Cumulative progressive tax is monotonically non-decreasing in
    /// income and never negative, whatever has already been paid.
    #[test]
    fn cumulative_tax_monotone_and_non_negative(
        income_a in money(),
        income_b in money(),
        paid in money(),
    ) {
        let schemes = [progressive_scheme()];
        let (low, high) = if income_a <= income_b {
            (income_a, income_b)
        } else {
            (income_b, income_a)
        };
        let tax_low = employee_amount(&schemes, low, paid);
        let tax_high = employee_amount(&schemes, high, paid);
        prop_assert!(tax_low >= Decimal::ZERO);
        prop_assert!(tax_high >= tax_low);
    }

    /// Splitting income across two periods with YTD carried forward
    /// withholds the same total as a single period, so period boundaries
    /// never change the annual liability.
    #[test]
    fn cumulative_tax_split_invariant(part_a in money(), part_b in money()) {
        let schemes = [progressive_scheme()];
        let first = employee_amount(&schemes, part_a, Decimal::ZERO);
        let opening = OpeningBalance {
            ytd_taxable_income: part_a,
            ytd_tax_paid: first,
            ytd_gross: part_a,
        };
        let second = calculate_statutory_deductions(
            &schemes, part_b, None, &opening, 0, 1,
        )
        .deductions
        .first()
        .map(|d| d.employee_amount)
        .unwrap_or(Decimal::ZERO);
        let combined = employee_amount(&schemes, part_a + part_b, Decimal::ZERO);
        prop_assert_eq!(first + second, combined);
    }

    /// A journal over totals satisfying the payroll identity always
    /// balances, for any split of gross into net, tax, and deductions.
    #[test]
    fn journal_balances_under_payroll_identity(
        gross in money(),
        tax_share in 0u32..=100,
        deduction_share in 0u32..=100,
    ) {
        let employee_tax = gross * Decimal::from(tax_share) / Decimal::from(100);
        let remaining = gross - employee_tax;
        let benefit_deductions =
            remaining * Decimal::from(deduction_share) / Decimal::from(100);
        let net_pay = gross - employee_tax - benefit_deductions;

        let totals = PostingTotals {
            gross_pay: gross,
            net_pay,
            employee_tax,
            employer_tax: Decimal::ZERO,
            benefit_deductions,
            employer_benefits: Decimal::ZERO,
            employer_retirement: Decimal::ZERO,
            employer_savings: Decimal::ZERO,
        };
        let batch = post_journal(&totals, &balanced_ledger(), &BTreeMap::new());

        prop_assert!(batch.balanced, "debits {} credits {}", batch.total_debits, batch.total_credits);
        prop_assert_eq!(batch.total_debits, batch.total_credits);
    }
}
