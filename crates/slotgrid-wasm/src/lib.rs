//! WASM bindings for slotgrid.
//!
//! Exposes slot generation, the point bookability check, availability
//! validation, and the bookable-date scan to JavaScript via `wasm-bindgen`.
//! All complex types are passed as JSON strings so the boundary stays a
//! plain string API.
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p slotgrid-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target nodejs --out-dir packages/slotgrid-js/wasm/ \
//!   target/wasm32-unknown-unknown/release/slotgrid_wasm.wasm
//! ```

use chrono::NaiveDateTime;
use slotgrid_core::{Availability, Booking};
use wasm_bindgen::prelude::*;

// ---------------------------------------------------------------------------
// Helpers: parse the JSON and datetime strings crossing the boundary
// ---------------------------------------------------------------------------

/// Parse a datetime string into a `NaiveDateTime`.
///
/// Accepts `"2026-03-16T08:00:00"` (what `Date.prototype.toISOString`
/// produces once the `Z` and milliseconds are sliced off) and the
/// space-separated `"2026-03-16 08:00:00"` form.
fn parse_now(s: &str) -> Result<NaiveDateTime, JsValue> {
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S") {
        return Ok(dt);
    }
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
        .map_err(|e| JsValue::from_str(&format!("Invalid datetime '{}': {}", s, e)))
}

/// Parse an availability document from JSON.
fn parse_availability_json(json: &str) -> Result<Availability, JsValue> {
    serde_json::from_str(json)
        .map_err(|e| JsValue::from_str(&format!("Invalid availability JSON: {}", e)))
}

/// Parse a JSON array of bookings.
fn parse_bookings_json(json: &str) -> Result<Vec<Booking>, JsValue> {
    serde_json::from_str(json)
        .map_err(|e| JsValue::from_str(&format!("Invalid bookings JSON: {}", e)))
}

// ---------------------------------------------------------------------------
// WASM exports
// ---------------------------------------------------------------------------

/// Generate the slot table for one provider and date.
///
/// Returns a JSON string containing an array of
/// `{startTime, endTime, available}` objects.
///
/// # Arguments
/// - `availability_json` -- the provider's availability document
/// - `date` -- target date (`YYYY-MM-DD`)
/// - `interval_minutes` -- slot width in minutes
/// - `bookings_json` -- JSON array of existing bookings (may be `"[]"`)
/// - `now` -- the current datetime (e.g., `"2026-03-16T08:00:00"`)
#[wasm_bindgen(js_name = "generateSlots")]
pub fn generate_slots(
    availability_json: &str,
    date: &str,
    interval_minutes: u32,
    bookings_json: &str,
    now: &str,
) -> Result<String, JsValue> {
    let availability = parse_availability_json(availability_json)?;
    let bookings = parse_bookings_json(bookings_json)?;
    let now = parse_now(now)?;

    let slots = slotgrid_core::generate_slots(&availability, date, interval_minutes, &bookings, now)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;

    serde_json::to_string(&slots)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

/// Check whether one candidate slot can be booked.
///
/// Applies the same rules as `generateSlots` to a single
/// `start_time` / `duration_minutes` pair and returns the verdict as a
/// boolean.
#[wasm_bindgen(js_name = "isSlotBookable")]
pub fn is_slot_bookable(
    availability_json: &str,
    date: &str,
    start_time: &str,
    duration_minutes: u32,
    bookings_json: &str,
    now: &str,
) -> Result<bool, JsValue> {
    let availability = parse_availability_json(availability_json)?;
    let bookings = parse_bookings_json(bookings_json)?;
    let now = parse_now(now)?;

    slotgrid_core::is_slot_bookable(&availability, date, start_time, duration_minutes, &bookings, now)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Validate an availability document before it is saved.
///
/// Returns the document back as a JSON string when it passes, so callers
/// can persist exactly what was checked. A rejected document produces an
/// error carrying the first failure.
#[wasm_bindgen(js_name = "validateAvailability")]
pub fn validate_availability(availability_json: &str) -> Result<String, JsValue> {
    let candidate = parse_availability_json(availability_json)?;

    let validated = slotgrid_core::validate_availability_update(candidate)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;

    serde_json::to_string(&validated)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

/// List the dates a provider can be booked on, starting tomorrow.
///
/// Returns a JSON string containing an array of `YYYY-MM-DD` strings.
/// `days_ahead` is capped at 90.
#[wasm_bindgen(js_name = "bookableDates")]
pub fn bookable_dates(
    availability_json: &str,
    days_ahead: u32,
    now: &str,
) -> Result<String, JsValue> {
    let availability = parse_availability_json(availability_json)?;
    let now = parse_now(now)?;

    let dates = slotgrid_core::bookable_dates(&availability, days_ahead, now);

    serde_json::to_string(&dates)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}
