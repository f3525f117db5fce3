//! Delivery availability check.
//!
//! The product page lets a shopper probe serviceability by pincode. A
//! malformed pincode is an inline validation outcome, never an error, and
//! a valid one currently answers available with a five-day estimate. The
//! current date is a parameter so the check stays a pure function.

use chrono::{Days, NaiveDate};

/// Days quoted between order and doorstep.
const DELIVERY_LEAD_DAYS: u64 = 5;

/// Outcome of a delivery check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryStatus {
    /// Deliverable, with the expected arrival date.
    Available { expected: NaiveDate },
    /// The pincode is not a valid 6-digit Indian pincode.
    Invalid,
}

/// Whether `pincode` is exactly six ASCII digits.
#[must_use]
pub fn is_valid_pincode(pincode: &str) -> bool {
    pincode.len() == 6 && pincode.chars().all(|c| c.is_ascii_digit())
}

/// Check delivery to `pincode` as of `today`.
#[must_use]
pub fn check_delivery(pincode: &str, today: NaiveDate) -> DeliveryStatus {
    if !is_valid_pincode(pincode) {
        return DeliveryStatus::Invalid;
    }

    let expected = today
        .checked_add_days(Days::new(DELIVERY_LEAD_DAYS))
        .unwrap_or(today);
    DeliveryStatus::Available { expected }
}
