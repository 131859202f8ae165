//! # slotgrid-python
//!
//! Python bindings for the slotgrid availability and time-slot engine,
//! built with PyO3.
//!
//! Exposes the following functions to Python as the `slotgrid` module:
//!
//! - `generate_slots(...)` -- slot table for one provider and date -> JSON string
//! - `is_slot_bookable(...)` -- point check for one candidate slot -> bool
//! - `validate_availability(json)` -- reject malformed schedules before saving
//! - `bookable_dates(...)` -- dates with at least one bookable slot -> JSON string

use chrono::NaiveDateTime;
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use slotgrid_core::{Availability, Booking};

/// Parse the `now` argument, accepting `"2026-03-16T08:00:00"` (what
/// `datetime.isoformat(timespec="seconds")` produces) and the
/// space-separated `"2026-03-16 08:00:00"` form.
fn parse_now(s: &str) -> PyResult<NaiveDateTime> {
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S") {
        return Ok(dt);
    }
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
        .map_err(|e| PyValueError::new_err(format!("Invalid datetime '{}': {}", s, e)))
}

fn parse_availability(json: &str) -> PyResult<Availability> {
    serde_json::from_str(json)
        .map_err(|e| PyValueError::new_err(format!("Invalid availability JSON: {}", e)))
}

fn parse_bookings(json: &str) -> PyResult<Vec<Booking>> {
    serde_json::from_str(json)
        .map_err(|e| PyValueError::new_err(format!("Invalid bookings JSON: {}", e)))
}

/// Generate the slot table for one provider and date.
///
/// Args:
///     availability_json: The provider's availability document as JSON.
///     date: Target date ("YYYY-MM-DD").
///     interval_minutes: Slot width in minutes.
///     bookings_json: A JSON array of existing bookings (may be "[]").
///     now: The current datetime (e.g., "2026-03-16T08:00:00").
///
/// Returns:
///     A JSON string containing an array of
///     {"startTime", "endTime", "available"} objects.
///
/// Raises:
///     ValueError: If any argument fails to parse.
#[pyfunction]
fn generate_slots(
    availability_json: &str,
    date: &str,
    interval_minutes: u32,
    bookings_json: &str,
    now: &str,
) -> PyResult<String> {
    let availability = parse_availability(availability_json)?;
    let bookings = parse_bookings(bookings_json)?;
    let now = parse_now(now)?;

    let slots = slotgrid_core::generate_slots(&availability, date, interval_minutes, &bookings, now)
        .map_err(|e| PyValueError::new_err(e.to_string()))?;

    serde_json::to_string(&slots).map_err(|e| PyValueError::new_err(e.to_string()))
}

/// Check whether one candidate slot can be booked.
///
/// Applies the same rules as `generate_slots` to a single start time and
/// duration.
///
/// Args:
///     availability_json: The provider's availability document as JSON.
///     date: Target date ("YYYY-MM-DD").
///     start_time: Candidate start time ("HH:mm").
///     duration_minutes: Candidate duration in minutes.
///     bookings_json: A JSON array of existing bookings (may be "[]").
///     now: The current datetime (e.g., "2026-03-16T08:00:00").
///
/// Returns:
///     True when the slot can be booked.
///
/// Raises:
///     ValueError: If any argument fails to parse.
#[pyfunction]
fn is_slot_bookable(
    availability_json: &str,
    date: &str,
    start_time: &str,
    duration_minutes: u32,
    bookings_json: &str,
    now: &str,
) -> PyResult<bool> {
    let availability = parse_availability(availability_json)?;
    let bookings = parse_bookings(bookings_json)?;
    let now = parse_now(now)?;

    slotgrid_core::is_slot_bookable(&availability, date, start_time, duration_minutes, &bookings, now)
        .map_err(|e| PyValueError::new_err(e.to_string()))
}

/// Validate an availability document before it is saved.
///
/// Args:
///     availability_json: The candidate availability document as JSON.
///
/// Returns:
///     The document back as a JSON string when it passes, so callers can
///     persist exactly what was checked.
///
/// Raises:
///     ValueError: If the document is malformed or violates a schedule
///     rule (duplicate weekday, inverted hours, loose time strings, ...).
#[pyfunction]
fn validate_availability(availability_json: &str) -> PyResult<String> {
    let candidate = parse_availability(availability_json)?;

    let validated = slotgrid_core::validate_availability_update(candidate)
        .map_err(|e| PyValueError::new_err(e.to_string()))?;

    serde_json::to_string(&validated).map_err(|e| PyValueError::new_err(e.to_string()))
}

/// List the dates a provider can be booked on, starting tomorrow.
///
/// Args:
///     availability_json: The provider's availability document as JSON.
///     days_ahead: How many days ahead to scan (capped at 90).
///     now: The current datetime (e.g., "2026-03-16T08:00:00").
///
/// Returns:
///     A JSON string containing an array of "YYYY-MM-DD" strings.
///
/// Raises:
///     ValueError: If any argument fails to parse.
#[pyfunction]
fn bookable_dates(availability_json: &str, days_ahead: u32, now: &str) -> PyResult<String> {
    let availability = parse_availability(availability_json)?;
    let now = parse_now(now)?;

    let dates = slotgrid_core::bookable_dates(&availability, days_ahead, now);

    serde_json::to_string(&dates).map_err(|e| PyValueError::new_err(e.to_string()))
}

/// The `slotgrid` Python module, implemented in Rust via PyO3.
#[pymodule]
fn slotgrid(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(generate_slots, m)?)?;
    m.add_function(wrap_pyfunction!(is_slot_bookable, m)?)?;
    m.add_function(wrap_pyfunction!(validate_availability, m)?)?;
    m.add_function(wrap_pyfunction!(bookable_dates, m)?)?;
    Ok(())
}
