//! Number formatting for tooltips and tick labels.

const DEFAULT_MAX_FRACTION_DIGITS: usize = 3;

/// Formats `value` the way an en-US locale number formatter does by default:
/// comma thousands separators, at most three fraction digits, no trailing
/// zeros.
#[must_use]
pub fn format_grouped(value: f64) -> String {
    if !value.is_finite() {
        return format_non_finite(value);
    }
    let fixed = format!("{:.*}", DEFAULT_MAX_FRACTION_DIGITS, value.abs());
    let trimmed = match fixed.split_once('.') {
        Some((integer, fraction)) => {
            let fraction = fraction.trim_end_matches('0');
            if fraction.is_empty() {
                integer.to_owned()
            } else {
                format!("{integer}.{fraction}")
            }
        }
        None => fixed,
    };
    with_sign(value, group_integer_part(&trimmed))
}

/// Formats `value` with exactly `decimals` fraction digits and grouping.
#[must_use]
pub fn format_grouped_fixed(value: f64, decimals: usize) -> String {
    if !value.is_finite() {
        return format_non_finite(value);
    }
    let fixed = format!("{:.*}", decimals, value.abs());
    with_sign(value, group_integer_part(&fixed))
}

/// Number of fraction digits needed to print multiples of `step` exactly.
#[must_use]
pub fn precision_for_step(step: f64) -> usize {
    if !step.is_finite() || step <= 0.0 {
        return 0;
    }
    let exponent = step.abs().log10().floor();
    if exponent >= 0.0 {
        0
    } else {
        (-exponent) as usize
    }
}

/// Inserts `,` every three digits of the integer part of an unsigned
/// decimal string.
fn group_integer_part(digits: &str) -> String {
    let (integer, fraction) = match digits.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (digits, None),
    };

    let mut grouped = String::with_capacity(digits.len() + integer.len() / 3);
    for (index, ch) in integer.chars().enumerate() {
        if index > 0 && (integer.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if let Some(fraction) = fraction {
        grouped.push('.');
        grouped.push_str(fraction);
    }
    grouped
}

fn with_sign(value: f64, magnitude: String) -> String {
    let is_zero = magnitude.chars().all(|ch| matches!(ch, '0' | '.' | ','));
    if value < 0.0 && !is_zero {
        format!("-{magnitude}")
    } else {
        magnitude
    }
}

fn format_non_finite(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_owned()
    } else if value > 0.0 {
        "∞".to_owned()
    } else {
        "-∞".to_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_thousands() {
        assert_eq!(format_grouped(42830.0), "42,830");
        assert_eq!(format_grouped(1_234_567.0), "1,234,567");
        assert_eq!(format_grouped(999.0), "999");
        assert_eq!(format_grouped(0.0), "0");
    }

    #[test]
    fn keeps_up_to_three_fraction_digits() {
        assert_eq!(format_grouped(12.5), "12.5");
        assert_eq!(format_grouped(1234.56789), "1,234.568");
        assert_eq!(format_grouped(-5000.25), "-5,000.25");
        assert_eq!(format_grouped(-0.0001), "0");
    }

    #[test]
    fn fixed_formatting_follows_tick_precision() {
        assert_eq!(precision_for_step(5000.0), 0);
        assert_eq!(precision_for_step(0.5), 1);
        assert_eq!(precision_for_step(0.02), 2);
        assert_eq!(format_grouped_fixed(45000.0, 0), "45,000");
        assert_eq!(format_grouped_fixed(10.5, 1), "10.5");
    }
}
