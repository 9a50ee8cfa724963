//! Monetary amounts as they are stored and displayed: text with a comma as
//! the decimal separator ("1234,56"), no thousands separators.
//!
//! All arithmetic happens on `BigDecimal` so cashback values never pick up
//! binary floating point noise.

use bigdecimal::BigDecimal;
use std::str::FromStr;

/// Parses a comma-decimal amount ("12,34") into a decimal value.
///
/// Accepts an optional sign, digits and at most one `,` or `.` followed by
/// more digits. Thousands separators, exponents, letters and empty text are
/// rejected.
pub fn parse_amount(raw: &str) -> Option<BigDecimal> {
    let raw = raw.trim();
    if !is_plain_decimal(raw) {
        return None;
    }
    BigDecimal::from_str(&raw.replacen(',', ".", 1)).ok()
}

fn is_plain_decimal(raw: &str) -> bool {
    let unsigned = raw.strip_prefix(&['+', '-'][..]).unwrap_or(raw);
    let (units, fraction) = match unsigned.split_once(&[',', '.'][..]) {
        Some((units, fraction)) => (units, Some(fraction)),
        None => (unsigned, None),
    };
    let all_digits = |part: &str| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit());

    all_digits(units) && fraction.map_or(true, all_digits)
}

/// Rounds to 2 fractional digits, halves away from zero.
pub fn round_to_cents(value: &BigDecimal) -> BigDecimal {
    let half_cent = BigDecimal::from(5) / BigDecimal::from(1000);
    if value < &BigDecimal::from(0) {
        -((-value.clone()) + half_cent).with_scale(2)
    } else {
        (value + half_cent).with_scale(2)
    }
}

/// Renders a value rounded to cents as "1234,56".
pub fn format_amount(value: &BigDecimal) -> String {
    let (digits, _) = round_to_cents(value).as_bigint_and_exponent();
    let digits = digits.to_string();
    let (sign, magnitude) = match digits.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", digits.as_str()),
    };
    let padded = format!("{:0>3}", magnitude);
    let (units, cents) = padded.split_at(padded.len() - 2);
    format!("{}{},{}", sign, units, cents)
}

/// `amount * percentage / 100`, rounded and formatted.
pub fn percentage_of(amount: &BigDecimal, percentage: u32) -> String {
    let share = amount * BigDecimal::from(percentage) / BigDecimal::from(100);
    format_amount(&share)
}
