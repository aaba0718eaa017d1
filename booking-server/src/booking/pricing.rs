//! Stay pricing
//!
//! Nights are whole days rounded up (hospitality billing: a partial day
//! counts as a full night). Price arithmetic uses rust_decimal, stored as
//! f64 rounded to 2 decimal places, half-up.

use chrono::{DateTime, Utc};
use rust_decimal::prelude::*;

const DECIMAL_PLACES: u32 = 2;
const SECONDS_PER_DAY: i64 = 86_400;

#[inline]
fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_default()
}

#[inline]
fn to_f64(value: Decimal) -> f64 {
    value
        .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or_default()
}

/// Number of nights between check-in and check-out.
///
/// Returns 0 when check-out is not strictly after check-in; callers must
/// treat 0 as invalid rather than proceed.
pub fn nights(check_in: DateTime<Utc>, check_out: DateTime<Utc>) -> i64 {
    let seconds = (check_out - check_in).num_seconds();
    if seconds <= 0 {
        return 0;
    }
    // Ceiling division; seconds is positive here
    (seconds + SECONDS_PER_DAY - 1) / SECONDS_PER_DAY
}

/// Total price for a stay: nights x unit price, clamped to 0 when
/// nights <= 0.
pub fn total_price(nights: i64, unit_price: f64) -> f64 {
    if nights <= 0 {
        return 0.0;
    }
    let total = Decimal::from(nights) * to_decimal(unit_price);
    to_f64(total.max(Decimal::ZERO))
}

/// Nights and total in one step, the shape the booking service consumes.
pub fn price_stay(
    check_in: DateTime<Utc>,
    check_out: DateTime<Utc>,
    unit_price: f64,
) -> (i64, f64) {
    let n = nights(check_in, check_out);
    (n, total_price(n, unit_price))
}
