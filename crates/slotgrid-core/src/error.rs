//! Error types for slotgrid operations.

use thiserror::Error;

/// Failures of slot generation and the point bookability check.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SlotError {
    #[error("Invalid date: '{0}' (expected YYYY-MM-DD)")]
    InvalidDate(String),

    #[error("Invalid slot interval: {0} minutes (expected 1 to 1440)")]
    InvalidInterval(u32),

    #[error("Invalid time: '{0}' (expected 24-hour HH:mm)")]
    InvalidTime(String),
}

/// Rejections of an availability update, one reason per variant so the
/// editing surface can report the offending field verbatim.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Day of week {day_of_week} is out of range (expected 0-6, 0 = Sunday)")]
    BadDayOfWeek { day_of_week: u8 },

    #[error("More than one working-day entry for day {day_of_week}")]
    DuplicateDay { day_of_week: u8 },

    #[error("Working hours for day {day_of_week} are inverted: {start} >= {end}")]
    BadTimeRange {
        day_of_week: u8,
        start: String,
        end: String,
    },

    #[error("Time '{value}' is not a strict 24-hour HH:mm string")]
    BadTimeFormat { value: String },

    #[error("Blocked date '{value}' is not a valid YYYY-MM-DD calendar date")]
    BadBlockedDate { value: String },

    #[error("Blocked time slot '{value}' is not 'YYYY-MM-DD HH:mm-HH:mm' with start before end")]
    BadBlockedSlot { value: String },
}

/// Failures of the booking flow and its data sources.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BookingError {
    #[error("Unknown provider: {0}")]
    UnknownProvider(String),

    #[error("Unknown booking: {0}")]
    UnknownBooking(String),

    #[error("Availability payload is for provider '{payload}', not '{requested}'")]
    ProviderMismatch { requested: String, payload: String },

    #[error("Slot {date} {start_time} is no longer available, please pick another time")]
    SlotUnavailable { date: String, start_time: String },

    #[error("A booking already holds {date} {start_time} for this provider")]
    AlreadyBooked { date: String, start_time: String },

    #[error("Slot computation failed: {0}")]
    Slot(#[from] SlotError),

    #[error("Availability rejected: {0}")]
    Validation(#[from] ValidationError),
}

pub type Result<T> = std::result::Result<T, SlotError>;
