//! Pay frequency conversion.
//!
//! Monetary amounts move between pay frequencies through a fixed annualized
//! intermediate: the amount is multiplied by the source frequency's periods
//! per year, then divided by the target's. This is a deliberate, lossy
//! approximation (a calendar month is ~4.33 weeks, not 52/12); the whole
//! engine shares the multipliers on [`PayFrequency::periods_per_year`] so
//! year-to-date reconciliation cannot drift between components.

use rust_decimal::Decimal;

use crate::models::PayFrequency;

/// Converts an amount to its annual equivalent.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::annualize;
/// use payroll_engine::models::PayFrequency;
/// use rust_decimal::Decimal;
///
/// assert_eq!(
///     annualize(Decimal::from(1000), PayFrequency::Monthly),
///     Decimal::from(12000)
/// );
/// ```
pub fn annualize(amount: Decimal, frequency: PayFrequency) -> Decimal {
    amount * frequency.periods_per_year()
}

/// Converts an amount from one pay frequency to another.
///
/// Pure function; with the [`PayFrequency`] enum every multiplier is a
/// fixed non-zero constant, so no division-by-zero case exists.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::convert_amount;
/// use payroll_engine::models::PayFrequency;
/// use rust_decimal::Decimal;
///
/// let weekly = convert_amount(
///     Decimal::from(5200),
///     PayFrequency::Annual,
///     PayFrequency::Weekly,
/// );
/// assert_eq!(weekly, Decimal::from(100));
/// ```
pub fn convert_amount(amount: Decimal, from: PayFrequency, to: PayFrequency) -> Decimal {
    if from == to {
        return amount;
    }
    annualize(amount, from) / to.periods_per_year()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    const ALL: [PayFrequency; 5] = [
        PayFrequency::Weekly,
        PayFrequency::Biweekly,
        PayFrequency::SemiMonthly,
        PayFrequency::Monthly,
        PayFrequency::Annual,
    ];

    /// FC-001: monthly to annual multiplies by 12
    #[test]
    fn test_monthly_to_annual() {
        assert_eq!(
            convert_amount(dec("1000"), PayFrequency::Monthly, PayFrequency::Annual),
            dec("12000")
        );
    }

    /// FC-002: annual to weekly divides by 52
    #[test]
    fn test_annual_to_weekly() {
        assert_eq!(
            convert_amount(dec("52000"), PayFrequency::Annual, PayFrequency::Weekly),
            dec("1000")
        );
    }

    /// FC-003: weekly to monthly uses 52/12, not 4 weeks
    #[test]
    fn test_weekly_to_monthly_is_lossy_approximation() {
        let monthly = convert_amount(dec("300"), PayFrequency::Weekly, PayFrequency::Monthly);
        assert_eq!(monthly, dec("15600") / dec("12"));
        assert_eq!(monthly, dec("1300"));
    }

    /// FC-004: biweekly to semimonthly crosses 26 and 24
    #[test]
    fn test_biweekly_to_semimonthly() {
        let result = convert_amount(dec("1200"), PayFrequency::Biweekly, PayFrequency::SemiMonthly);
        assert_eq!(result, dec("31200") / dec("24"));
        assert_eq!(result, dec("1300"));
    }

    /// FC-005: identity conversion returns the amount unchanged
    #[test]
    fn test_identity_conversion() {
        for freq in ALL {
            assert_eq!(convert_amount(dec("1234.56"), freq, freq), dec("1234.56"));
        }
    }

    /// FC-006: round trip across any pair stays within tolerance
    #[test]
    fn test_round_trip_within_tolerance() {
        let tolerance = dec("0.0000001");
        for from in ALL {
            for to in ALL {
                let there = convert_amount(dec("2417.93"), from, to);
                let back = convert_amount(there, to, from);
                let diff = (back - dec("2417.93")).abs();
                assert!(
                    diff < tolerance,
                    "round trip {:?} -> {:?} drifted by {}",
                    from,
                    to,
                    diff
                );
            }
        }
    }

    #[test]
    fn test_annualize_zero_amount() {
        assert_eq!(annualize(Decimal::ZERO, PayFrequency::Weekly), Decimal::ZERO);
    }

    #[test]
    fn test_annualize_weekly() {
        assert_eq!(annualize(dec("500"), PayFrequency::Weekly), dec("26000"));
    }
}
