//! Slot generation and the point bookability check.
//!
//! Walks a working day's hours in fixed steps, marking each candidate slot
//! against blocked entries, existing bookings and the injected clock. The
//! bulk walk and the point check share one rule set, so a slot reported
//! available stays bookable under the same inputs.

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime};

use crate::error::{Result, SlotError};
use crate::types::{
    format_hhmm, parse_blocked_slot, parse_hhmm, parse_iso_date, Availability, Booking, TimeSlot,
};

/// Upper bound on slot intervals and booking durations: one full day.
const MAX_INTERVAL_MINUTES: u32 = 24 * 60;

/// Generate the ordered candidate slots for one provider and date.
///
/// Past dates, blocked dates and weekdays without usable working hours
/// yield an empty list. Otherwise one slot is emitted per
/// `interval_minutes` step, each flagged available unless its start equals
/// a blocked sub-range start for the date, its interval overlaps an
/// occupying booking (`slot.start < booking.end && booking.start <
/// slot.end`), or the date is today and the start has already passed `now`.
///
/// The walk stops once a slot *start* reaches closing time, so when the
/// window does not divide evenly the final slot's end overruns closing
/// (09:00-10:15 at 30 minutes yields 09:00, 09:30 and 10:00-10:30). Callers
/// that want hard-clipped slots can filter on `end_time`.
///
/// Bookings are re-filtered here: entries for another provider or date,
/// cancelled entries and entries with unparseable fields block nothing.
///
/// # Errors
///
/// [`SlotError::InvalidInterval`] when `interval_minutes` is zero or
/// longer than a day; [`SlotError::InvalidDate`] when `date` is not a
/// strict `YYYY-MM-DD` calendar date. An availability with no working days
/// at all is an empty result, never an error.
pub fn generate_slots(
    availability: &Availability,
    date: &str,
    interval_minutes: u32,
    bookings: &[Booking],
    now: NaiveDateTime,
) -> Result<Vec<TimeSlot>> {
    if interval_minutes == 0 || interval_minutes > MAX_INTERVAL_MINUTES {
        return Err(SlotError::InvalidInterval(interval_minutes));
    }
    let day = parse_iso_date(date).ok_or_else(|| SlotError::InvalidDate(date.to_string()))?;

    if day < now.date() || availability.is_date_blocked(day) {
        return Ok(Vec::new());
    }
    let Some((open, close)) = usable_hours(availability, day) else {
        return Ok(Vec::new());
    };

    let blocked_starts = blocked_starts_for(availability, day);
    let busy = occupied_intervals(availability, bookings, day);
    let today = day == now.date();

    let mut slots = Vec::new();
    let mut cursor = open;
    while cursor < close {
        let end = cursor + interval_minutes;
        let free = !blocked_starts.contains(&cursor)
            && !busy
                .iter()
                .any(|&(busy_start, busy_end)| cursor < busy_end && busy_start < end)
            && !(today && start_already_passed(day, cursor, now));
        slots.push(TimeSlot {
            start_time: format_hhmm(cursor),
            end_time: format_hhmm(end),
            available: free,
        });
        cursor += interval_minutes;
    }
    Ok(slots)
}

/// Check one candidate slot `[start_time, start_time + duration_minutes)`
/// without generating the whole day.
///
/// Applies exactly the rules [`generate_slots`] applies to each slot it
/// emits, including the boundary rule: the start must lie inside the
/// working window while the end may overrun closing. Every slot reported
/// available by [`generate_slots`] therefore passes this check under the
/// same inputs.
///
/// A booking flow must re-run this immediately before committing; see
/// [`crate::store::BookingDesk::book`].
///
/// # Errors
///
/// [`SlotError::InvalidInterval`] when `duration_minutes` is zero or
/// longer than a day; [`SlotError::InvalidDate`] / [`SlotError::InvalidTime`]
/// for a malformed `date` / `start_time` argument.
pub fn is_slot_bookable(
    availability: &Availability,
    date: &str,
    start_time: &str,
    duration_minutes: u32,
    bookings: &[Booking],
    now: NaiveDateTime,
) -> Result<bool> {
    if duration_minutes == 0 || duration_minutes > MAX_INTERVAL_MINUTES {
        return Err(SlotError::InvalidInterval(duration_minutes));
    }
    let day = parse_iso_date(date).ok_or_else(|| SlotError::InvalidDate(date.to_string()))?;
    let start =
        parse_hhmm(start_time).ok_or_else(|| SlotError::InvalidTime(start_time.to_string()))?;
    let end = start + duration_minutes;

    if day < now.date() || availability.is_date_blocked(day) {
        return Ok(false);
    }
    let Some((open, close)) = usable_hours(availability, day) else {
        return Ok(false);
    };
    if start < open || start >= close {
        return Ok(false);
    }
    if blocked_starts_for(availability, day).contains(&start) {
        return Ok(false);
    }
    let overlapping = occupied_intervals(availability, bookings, day)
        .iter()
        .any(|&(busy_start, busy_end)| start < busy_end && busy_start < end);
    if overlapping {
        return Ok(false);
    }
    if day == now.date() && start_already_passed(day, start, now) {
        return Ok(false);
    }
    Ok(true)
}

/// Working hours for the date's weekday, when an entry exists, is marked
/// available and both times parse strictly. Anything else means no slots.
fn usable_hours(availability: &Availability, day: NaiveDate) -> Option<(u32, u32)> {
    let dow = day.weekday().num_days_from_sunday() as u8;
    let working = availability.working_day(dow)?;
    if !working.is_available {
        return None;
    }
    Some((
        parse_hhmm(&working.start_time)?,
        parse_hhmm(&working.end_time)?,
    ))
}

/// Start minutes of the blocked sub-ranges recorded for this date. Blocking
/// matches on the slot start, not on interval overlap.
fn blocked_starts_for(availability: &Availability, day: NaiveDate) -> Vec<u32> {
    availability
        .blocked_time_slots
        .iter()
        .filter_map(|raw| parse_blocked_slot(raw))
        .filter(|&(blocked_day, _, _)| blocked_day == day)
        .map(|(_, start, _)| start)
        .collect()
}

/// Busy `[start, end)` minute intervals from bookings that actually hold a
/// slot for this provider and date.
fn occupied_intervals(
    availability: &Availability,
    bookings: &[Booking],
    day: NaiveDate,
) -> Vec<(u32, u32)> {
    bookings
        .iter()
        .filter(|b| b.provider_id == availability.provider_id)
        .filter(|b| b.status.occupies_slot())
        .filter(|b| parse_iso_date(&b.date) == Some(day))
        .filter_map(|b| Some((parse_hhmm(&b.start_time)?, parse_hhmm(&b.end_time)?)))
        .collect()
}

/// Whether a slot starting at `start_minutes` on `day` lies strictly before
/// `now`. Seconds count: at 10:00:30 the 10:00 slot has already started.
fn start_already_passed(day: NaiveDate, start_minutes: u32, now: NaiveDateTime) -> bool {
    NaiveTime::from_num_seconds_from_midnight_opt(start_minutes * 60, 0)
        .map(|start| day.and_time(start) < now)
        .unwrap_or(false)
}
