//! Validation applied when a provider edits their schedule.
//!
//! Strictly rejecting, never coercing: a candidate either replaces the
//! stored availability exactly as submitted or is refused with a reason
//! naming the offending field.

use crate::error::ValidationError;
use crate::types::{parse_blocked_slot, parse_hhmm, parse_iso_date, Availability};

/// Validate a whole-object availability update. First failure wins.
///
/// Rejects when:
///
/// - a `day_of_week` is outside 0-6 or appears more than once
/// - a working day's `start_time` or `end_time` is not strict 24-hour
///   `HH:mm` (checked even for days marked unavailable)
/// - a day marked available has `start_time >= end_time`
/// - a blocked date is not a real `YYYY-MM-DD` calendar date
/// - a blocked time slot is not `"YYYY-MM-DD HH:mm-HH:mm"` with start
///   before end
///
/// On success the candidate comes back unchanged: the update model is
/// replace-whole-object, last write wins, with no normalization.
pub fn validate_availability_update(
    candidate: Availability,
) -> Result<Availability, ValidationError> {
    let mut seen = [false; 7];
    for day in &candidate.working_days {
        let dow = day.day_of_week;
        if dow > 6 {
            return Err(ValidationError::BadDayOfWeek { day_of_week: dow });
        }
        if seen[dow as usize] {
            return Err(ValidationError::DuplicateDay { day_of_week: dow });
        }
        seen[dow as usize] = true;

        let start = parse_hhmm(&day.start_time).ok_or_else(|| ValidationError::BadTimeFormat {
            value: day.start_time.clone(),
        })?;
        let end = parse_hhmm(&day.end_time).ok_or_else(|| ValidationError::BadTimeFormat {
            value: day.end_time.clone(),
        })?;
        if day.is_available && start >= end {
            return Err(ValidationError::BadTimeRange {
                day_of_week: dow,
                start: day.start_time.clone(),
                end: day.end_time.clone(),
            });
        }
    }

    for raw in &candidate.blocked_dates {
        if parse_iso_date(raw).is_none() {
            return Err(ValidationError::BadBlockedDate { value: raw.clone() });
        }
    }
    for raw in &candidate.blocked_time_slots {
        match parse_blocked_slot(raw) {
            Some((_, start, end)) if start < end => {}
            _ => return Err(ValidationError::BadBlockedSlot { value: raw.clone() }),
        }
    }

    Ok(candidate)
}
