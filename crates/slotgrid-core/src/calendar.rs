//! Date-level availability over a booking horizon.
//!
//! Answers "which dates can this provider take bookings at all" — the feed
//! for a date picker. Slot-level detail lives in [`crate::slots`].

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime};

use crate::types::{parse_hhmm, Availability, MAX_BOOKING_HORIZON_DAYS};

/// Whether a provider can take bookings on `day` at all.
///
/// False for dates before `today`, blocked dates, and dates whose weekday
/// has no working-day entry that is available with well-formed,
/// non-inverted hours. When this returns true, [`crate::generate_slots`]
/// for the date emits at least one slot before bookings and the clock are
/// applied.
pub fn is_date_bookable(availability: &Availability, day: NaiveDate, today: NaiveDate) -> bool {
    if day < today || availability.is_date_blocked(day) {
        return false;
    }
    let dow = day.weekday().num_days_from_sunday() as u8;
    match availability.working_day(dow) {
        Some(working) if working.is_available => {
            match (parse_hhmm(&working.start_time), parse_hhmm(&working.end_time)) {
                (Some(open), Some(close)) => open < close,
                _ => false,
            }
        }
        _ => false,
    }
}

/// The bookable dates from tomorrow through `now + days_ahead`, ascending,
/// as `YYYY-MM-DD` strings.
///
/// `days_ahead` is clamped to [`MAX_BOOKING_HORIZON_DAYS`]. Today is never
/// offered here; same-day slots remain reachable through
/// [`crate::generate_slots`] directly.
pub fn bookable_dates(
    availability: &Availability,
    days_ahead: u32,
    now: NaiveDateTime,
) -> Vec<String> {
    let today = now.date();
    let horizon = days_ahead.min(MAX_BOOKING_HORIZON_DAYS);
    (1..=i64::from(horizon))
        .filter_map(|offset| today.checked_add_signed(Duration::days(offset)))
        .filter(|day| is_date_bookable(availability, *day, today))
        .map(|day| day.format("%Y-%m-%d").to_string())
        .collect()
}
