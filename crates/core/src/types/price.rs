//! Price formatting and parsing helpers.
//!
//! Prices are carried as [`rust_decimal::Decimal`] amounts in INR throughout
//! the catalog. Formatting uses the Indian digit grouping convention
//! (thousand first, then lakhs/crores in pairs): `₹12,34,567`.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

/// Format a decimal amount as an INR display string (e.g., `₹1,00,000`).
///
/// Whole-rupee amounts omit the paise; fractional amounts show two decimal
/// places (`₹499.50`). Negative amounts keep the sign before the rupee mark.
#[must_use]
pub fn format_inr(amount: Decimal) -> String {
    let negative = amount.is_sign_negative();
    // Round to paise first so the fractional part is an exact 0..=99.
    let amount = amount.abs().round_dp(2);

    let rupees = amount.trunc();
    let paise = (amount.fract() * Decimal::from(100)).to_u32().unwrap_or(0);

    let grouped = group_indian(&rupees.to_string());
    let sign = if negative { "-" } else { "" };

    if paise == 0 {
        format!("{sign}₹{grouped}")
    } else {
        format!("{sign}₹{grouped}.{paise:02}")
    }
}

/// Parse a decimal amount from a string, tolerating surrounding whitespace.
///
/// Returns `None` for non-numeric input rather than an error; callers at the
/// normalize boundary substitute their documented default (usually zero).
#[must_use]
pub fn parse_decimal(raw: &str) -> Option<Decimal> {
    raw.trim().parse::<Decimal>().ok()
}

/// Group an unsigned integer string per the Indian numbering system.
fn group_indian(digits: &str) -> String {
    let len = digits.len();
    if len <= 3 {
        return digits.to_owned();
    }

    let split = len - 3;
    let (head, tail) = digits.split_at(split);

    let mut groups = Vec::new();
    let head_chars: Vec<char> = head.chars().collect();
    let mut idx = head_chars.len();
    while idx > 0 {
        let start = idx.saturating_sub(2);
        groups.push(head_chars.get(start..idx).unwrap_or_default().iter().collect::<String>());
        idx = start;
    }
    groups.reverse();

    let mut out = groups.join(",");
    out.push(',');
    out.push_str(tail);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn test_format_inr_small_amount() {
        assert_eq!(format_inr(Decimal::from(499)), "₹499");
    }

    #[test]
    fn test_format_inr_thousands() {
        assert_eq!(format_inr(Decimal::from(5000)), "₹5,000");
        assert_eq!(format_inr(Decimal::from(12500)), "₹12,500");
    }

    #[test]
    fn test_format_inr_lakhs_and_crores() {
        assert_eq!(format_inr(Decimal::from(100_000)), "₹1,00,000");
        assert_eq!(format_inr(Decimal::from(1_234_567)), "₹12,34,567");
        assert_eq!(format_inr(Decimal::from(12_345_678)), "₹1,23,45,678");
    }

    #[test]
    fn test_format_inr_fractional() {
        let amount = Decimal::new(49950, 2); // 499.50
        assert_eq!(format_inr(amount), "₹499.50");
    }

    #[test]
    fn test_format_inr_zero_and_negative() {
        assert_eq!(format_inr(Decimal::ZERO), "₹0");
        assert_eq!(format_inr(Decimal::from(-5000)), "-₹5,000");
    }

    #[test]
    fn test_parse_decimal() {
        assert_eq!(parse_decimal("5000"), Some(Decimal::from(5000)));
        assert_eq!(parse_decimal(" 499.50 "), Some(Decimal::new(49950, 2)));
        assert_eq!(parse_decimal("not-a-price"), None);
        assert_eq!(parse_decimal(""), None);
    }
}
