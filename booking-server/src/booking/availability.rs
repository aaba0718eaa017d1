//! Room availability
//!
//! Bookings occupy half-open intervals [check_in, check_out): a stay ending
//! on the day another begins does not conflict. The check is advisory - the
//! store does not serialize it against concurrent writes, so the service
//! re-validates against stored bookings before confirming.

use chrono::{DateTime, Utc};
use shared::models::{Booking, BookingStatus, Room};

/// Half-open interval overlap test
pub fn overlaps(
    a_start: DateTime<Utc>,
    a_end: DateTime<Utc>,
    b_start: DateTime<Utc>,
    b_end: DateTime<Utc>,
) -> bool {
    a_start < b_end && a_end > b_start
}

/// First non-cancelled booking conflicting with the requested interval.
///
/// `exclude` skips the booking being edited so it does not conflict with
/// itself.
pub fn find_conflict<'a>(
    existing: &'a [Booking],
    check_in: DateTime<Utc>,
    check_out: DateTime<Utc>,
    exclude: Option<i64>,
) -> Option<&'a Booking> {
    existing.iter().find(|b| {
        b.status != BookingStatus::Cancelled
            && exclude != Some(b.id)
            && overlaps(b.check_in_date, b.check_out_date, check_in, check_out)
    })
}

/// Whether a room can take the requested interval.
///
/// The administrative `is_available` flag wins unconditionally: a room
/// switched off is unavailable regardless of dates.
pub fn is_available(
    room: &Room,
    existing: &[Booking],
    check_in: DateTime<Utc>,
    check_out: DateTime<Utc>,
    exclude: Option<i64>,
) -> bool {
    room.is_available && find_conflict(existing, check_in, check_out, exclude).is_none()
}
