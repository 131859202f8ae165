//! Core data model for provider availability and bookings.
//!
//! Structs serialize in the camelCase wire shape of the provider and booking
//! APIs (`providerId`, `workingDays`, ...), statuses in SCREAMING_SNAKE_CASE
//! (`PENDING`, `CONFIRMED`, ...). Times and dates stay plain `HH:mm` /
//! `YYYY-MM-DD` strings in the model; the engine parses them strictly at the
//! point of use, so malformed data is observable instead of silently coerced.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Slot granularity used when the caller does not pick one, in minutes.
pub const DEFAULT_SLOT_INTERVAL_MINUTES: u32 = 30;

/// Booking-calendar lookahead used when the caller does not pick one, in days.
pub const DEFAULT_BOOKING_HORIZON_DAYS: u32 = 30;

/// Hard ceiling on how far ahead the booking calendar reaches, in days.
pub const MAX_BOOKING_HORIZON_DAYS: u32 = 90;

/// Lifecycle state of a booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Cancelled,
    Completed,
}

impl BookingStatus {
    /// Whether a booking in this state still holds its time slot.
    /// Only cancellation releases the slot.
    pub fn occupies_slot(self) -> bool {
        !matches!(self, BookingStatus::Cancelled)
    }
}

/// One weekday's working hours in a provider's weekly schedule.
///
/// `day_of_week` runs 0-6 with 0 = Sunday. An [`Availability`] may carry at
/// most one entry per weekday; [`crate::validate_availability_update`]
/// enforces that.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkingDay {
    pub day_of_week: u8,
    pub start_time: String,
    pub end_time: String,
    pub is_available: bool,
}

/// A provider's whole availability configuration.
///
/// Updates replace the object wholesale (last write wins); the engine never
/// merges or normalizes it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Availability {
    pub provider_id: String,
    pub working_days: Vec<WorkingDay>,
    /// Whole days off, as `YYYY-MM-DD` strings.
    #[serde(default)]
    pub blocked_dates: Vec<String>,
    /// One-off blocked sub-ranges, as `"YYYY-MM-DD HH:mm-HH:mm"` strings.
    #[serde(default)]
    pub blocked_time_slots: Vec<String>,
}

impl Availability {
    /// An availability with no working hours at all, the state a freshly
    /// registered provider starts in.
    pub fn empty(provider_id: impl Into<String>) -> Self {
        Availability {
            provider_id: provider_id.into(),
            working_days: Vec::new(),
            blocked_dates: Vec::new(),
            blocked_time_slots: Vec::new(),
        }
    }

    /// The working-day entry for a weekday (0 = Sunday), if configured.
    pub fn working_day(&self, day_of_week: u8) -> Option<&WorkingDay> {
        self.working_days
            .iter()
            .find(|day| day.day_of_week == day_of_week)
    }

    /// Whether a date is on the blocked-date list. Entries that fail strict
    /// date parsing never match.
    pub fn is_date_blocked(&self, day: NaiveDate) -> bool {
        self.blocked_dates
            .iter()
            .filter_map(|raw| parse_iso_date(raw))
            .any(|blocked| blocked == day)
    }
}

/// A booking as stored. The slot math reads only `provider_id`, `date`,
/// `start_time`, `end_time` and `status`; the rest is identity and audit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: String,
    pub user_id: String,
    pub provider_id: String,
    pub service_id: String,
    pub date: String,
    pub start_time: String,
    pub end_time: String,
    pub status: BookingStatus,
    #[serde(default)]
    pub notes: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// What a customer submits to book a slot. Identity is explicit; there is
/// no ambient "current user" anywhere in the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequest {
    pub user_id: String,
    pub provider_id: String,
    pub service_id: String,
    pub date: String,
    pub start_time: String,
    pub duration_minutes: u32,
    #[serde(default)]
    pub notes: Option<String>,
}

/// One candidate booking slot, derived on every request and never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSlot {
    pub start_time: String,
    pub end_time: String,
    pub available: bool,
}

/// Parse a strict 24-hour `HH:mm` string into minutes since midnight.
///
/// Exactly five zero-padded characters, hour 00-23, minute 00-59. Returns
/// `None` for anything else (`"9:00"`, `"24:00"`, `"09:60"`, ...).
pub fn parse_hhmm(s: &str) -> Option<u32> {
    let b = s.as_bytes();
    if b.len() != 5 || b[2] != b':' {
        return None;
    }
    let digits = [b[0], b[1], b[3], b[4]].iter().all(u8::is_ascii_digit);
    if !digits {
        return None;
    }
    let hour = u32::from(b[0] - b'0') * 10 + u32::from(b[1] - b'0');
    let minute = u32::from(b[3] - b'0') * 10 + u32::from(b[4] - b'0');
    if hour > 23 || minute > 59 {
        return None;
    }
    Some(hour * 60 + minute)
}

/// Render minutes since midnight as an `HH:mm` wall-clock string.
///
/// Values past midnight wrap, so a slot overrunning a 23:45 close renders
/// its end as `00:15` the way a wall clock would.
pub fn format_hhmm(minutes: u32) -> String {
    let m = minutes % (24 * 60);
    format!("{:02}:{:02}", m / 60, m % 60)
}

/// Parse a strict `YYYY-MM-DD` string into a calendar date.
///
/// Exactly ten zero-padded characters naming a real Gregorian date; `None`
/// otherwise (`"2026-3-16"`, `"2026-02-30"`, `"16/03/2026"`, ...).
pub fn parse_iso_date(s: &str) -> Option<NaiveDate> {
    let b = s.as_bytes();
    if b.len() != 10 || b[4] != b'-' || b[7] != b'-' {
        return None;
    }
    let digits = b
        .iter()
        .enumerate()
        .all(|(i, c)| i == 4 || i == 7 || c.is_ascii_digit());
    if !digits {
        return None;
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

/// Parse a `"YYYY-MM-DD HH:mm-HH:mm"` blocked-slot entry into its date and
/// start/end minutes. Both times must be strict `HH:mm`; the range is not
/// checked here.
pub fn parse_blocked_slot(s: &str) -> Option<(NaiveDate, u32, u32)> {
    let (date_part, times) = s.split_once(' ')?;
    let date = parse_iso_date(date_part)?;
    let (start, end) = times.split_once('-')?;
    Some((date, parse_hhmm(start)?, parse_hhmm(end)?))
}
