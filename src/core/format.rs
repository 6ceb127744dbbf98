//! Value formatters shared by axis ticks, pie labels and tooltips.
//!
//! Fixed-precision output rounds half away from zero on the exact binary
//! value of the input, so `2.5` at zero digits prints `3`.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

/// Formats `value` with exactly `digits` fractional digits.
#[must_use]
pub fn to_fixed(value: f64, digits: u32) -> String {
    let width = digits as usize;
    if !value.is_finite() {
        return "nan".to_owned();
    }
    match Decimal::from_f64_retain(value) {
        Some(decimal) => format_decimal_fixed(decimal, digits),
        None => format!("{value:.width$}"),
    }
}

/// Formats an exact decimal with exactly `digits` fractional digits.
#[must_use]
pub fn format_decimal_fixed(value: Decimal, digits: u32) -> String {
    let width = digits as usize;
    let rounded = value.round_dp_with_strategy(digits, RoundingStrategy::MidpointAwayFromZero);
    format!("{rounded:.width$}")
}

/// Shortest plain representation: integers without a fraction, other values
/// with as many digits as needed (`1.0` -> `1`, `1.5` -> `1.5`).
#[must_use]
pub fn format_plain_number(value: f64) -> String {
    if !value.is_finite() {
        return "nan".to_owned();
    }
    if value.fract() == 0.0 && value.abs() < 1e15 {
        return format!("{}", value as i64);
    }
    format!("{value}")
}

/// Percentage label for a pie share in `[0, 1]`, rounded to whole percent.
#[must_use]
pub fn format_share_percent(share: f64) -> String {
    format!("{}%", to_fixed(share * 100.0, 0))
}

/// Fractional digits used for a USD axis tick of magnitude `value`.
#[must_use]
pub fn usd_tick_precision(value: f64) -> u32 {
    if value >= 1.0 {
        0
    } else if value >= 0.01 {
        2
    } else if value >= 0.000_1 {
        4
    } else {
        6
    }
}

/// Currency tick label with precision adapted to the value's magnitude.
#[must_use]
pub fn format_usd_tick(value: f64) -> String {
    format!("${}", to_fixed(value, usd_tick_precision(value)))
}

/// Abbreviates values >= 1000 as `Nk`; smaller values print plainly.
#[must_use]
pub fn format_thousands_tick(value: f64) -> String {
    if value >= 1_000.0 {
        return format!("{}k", to_fixed(value / 1_000.0, 0));
    }
    format_plain_number(value)
}

/// en-US digit grouping (`50000` -> `50,000`).
#[must_use]
pub fn format_grouped_integer(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

/// Converts an exact decimal to `f64` for pixel projection.
#[must_use]
pub fn decimal_to_f64(value: Decimal) -> f64 {
    value.to_f64().unwrap_or(f64::NAN)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn usd_ticks_adapt_precision_to_magnitude() {
        assert_eq!(format_usd_tick(1.26), "$1");
        assert_eq!(format_usd_tick(0.0042), "$0.0042");
        assert_eq!(format_usd_tick(0.000_042), "$0.000042");
        assert_eq!(format_usd_tick(0.000_003), "$0.000003");
        assert_eq!(format_usd_tick(10.0), "$10");
        assert_eq!(format_usd_tick(0.1), "$0.10");
    }

    #[test]
    fn to_fixed_rounds_ties_away_from_zero() {
        assert_eq!(to_fixed(2.5, 0), "3");
        assert_eq!(to_fixed(0.125, 2), "0.13");
        assert_eq!(to_fixed(1.0, 1), "1.0");
    }

    #[test]
    fn thousands_ticks_abbreviate() {
        assert_eq!(format_thousands_tick(0.0), "0");
        assert_eq!(format_thousands_tick(999.0), "999");
        assert_eq!(format_thousands_tick(20_000.0), "20k");
        assert_eq!(format_thousands_tick(1_000.0), "1k");
    }

    #[test]
    fn plain_numbers_drop_zero_fraction() {
        assert_eq!(format_plain_number(1.0), "1");
        assert_eq!(format_plain_number(1.5), "1.5");
        assert_eq!(format_plain_number(0.25), "0.25");
    }

    #[test]
    fn grouped_integers_use_commas() {
        assert_eq!(format_grouped_integer(0), "0");
        assert_eq!(format_grouped_integer(1_000), "1,000");
        assert_eq!(format_grouped_integer(50_000), "50,000");
        assert_eq!(format_grouped_integer(1_234_567), "1,234,567");
    }

    #[test]
    fn share_percent_has_no_decimals() {
        assert_eq!(format_share_percent(0.35), "35%");
        assert_eq!(format_share_percent(0.1), "10%");
    }

    proptest! {
        #[test]
        fn usd_tick_always_has_currency_prefix_and_expected_digits(value in 1e-9f64..1e6) {
            let text = format_usd_tick(value);
            prop_assert!(text.starts_with('$'));
            let digits = usd_tick_precision(value) as usize;
            let fraction_len = text.split('.').nth(1).map_or(0, str::len);
            prop_assert_eq!(fraction_len, digits);
        }

        #[test]
        fn grouping_preserves_digits(value in 0u64..10_000_000_000) {
            let grouped = format_grouped_integer(value);
            prop_assert_eq!(grouped.replace(',', ""), value.to_string());
        }
    }
}
