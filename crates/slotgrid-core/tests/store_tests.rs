//! Tests for the in-memory stores and the booking desk's commit flow.

use chrono::{NaiveDate, NaiveDateTime};
use slotgrid_core::{
    Availability, AvailabilityStore, BookingDesk, BookingError, BookingRequest, BookingStatus,
    BookingStore, InMemoryAvailabilityStore, InMemoryBookingStore, ValidationError, WorkingDay,
};

// ── Helpers ─────────────────────────────────────────────────────────────────

const MONDAY: &str = "2026-03-16"; // a Monday
const TUESDAY: &str = "2026-03-17";

fn at(date: &str, hour: u32, minute: u32) -> NaiveDateTime {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .unwrap()
        .and_hms_opt(hour, minute, 0)
        .unwrap()
}

fn clock() -> NaiveDateTime {
    at("2026-03-02", 8, 0)
}

fn working_day(day_of_week: u8) -> WorkingDay {
    WorkingDay {
        day_of_week,
        start_time: "09:00".to_string(),
        end_time: "18:00".to_string(),
        is_available: true,
    }
}

/// Monday through Friday, 09:00-18:00.
fn weekday_schedule(provider_id: &str) -> Availability {
    Availability {
        provider_id: provider_id.to_string(),
        working_days: (1..=5).map(working_day).collect(),
        blocked_dates: vec![],
        blocked_time_slots: vec![],
    }
}

/// A desk with "prov-1" registered and on the weekday schedule.
fn desk() -> BookingDesk<InMemoryAvailabilityStore, InMemoryBookingStore> {
    let mut availability = InMemoryAvailabilityStore::new();
    availability.register_provider("prov-1");
    let mut desk = BookingDesk::new(availability, InMemoryBookingStore::new());
    desk.set_availability("prov-1", weekday_schedule("prov-1"))
        .unwrap();
    desk
}

fn request(date: &str, start: &str, duration_minutes: u32) -> BookingRequest {
    BookingRequest {
        user_id: "user-7".to_string(),
        provider_id: "prov-1".to_string(),
        service_id: "svc-2".to_string(),
        date: date.to_string(),
        start_time: start.to_string(),
        duration_minutes,
        notes: None,
    }
}

// ── Test 1: A fresh provider has empty availability, not an error ───────────

#[test]
fn fresh_provider_has_empty_availability() {
    let mut store = InMemoryAvailabilityStore::new();
    store.register_provider("prov-9");

    let availability = store.availability("prov-9").unwrap();
    assert!(availability.working_days.is_empty());

    // Registering again does not reset anything later stored.
    store
        .update_availability("prov-9", weekday_schedule("prov-9"))
        .unwrap();
    store.register_provider("prov-9");
    assert_eq!(store.availability("prov-9").unwrap().working_days.len(), 5);
}

// ── Test 2: Unknown providers are an error, not empty data ──────────────────

#[test]
fn unknown_provider_is_an_error() {
    let store = InMemoryAvailabilityStore::new();
    assert_eq!(
        store.availability("ghost"),
        Err(BookingError::UnknownProvider("ghost".to_string()))
    );

    let desk = desk();
    assert!(matches!(
        desk.slots("ghost", MONDAY, 30, clock()),
        Err(BookingError::UnknownProvider(_))
    ));
}

// ── Test 3: Booking happy path ──────────────────────────────────────────────

#[test]
fn booking_happy_path() {
    let mut desk = desk();
    let now = clock();

    let booking = desk.book(request(MONDAY, "10:00", 30), now).unwrap();

    assert_eq!(booking.id, "bk-1");
    assert_eq!(booking.status, BookingStatus::Pending);
    assert_eq!(booking.end_time, "10:30");
    assert_eq!(booking.created_at, "2026-03-02T08:00:00");

    // The stored copy matches and the slot table reflects it.
    let stored = desk.booking_store().booking("bk-1").unwrap();
    assert_eq!(stored, booking);

    let slots = desk.slots("prov-1", MONDAY, 30, now).unwrap();
    let taken = slots.iter().find(|s| s.start_time == "10:00").unwrap();
    assert!(!taken.available);
}

// ── Test 4: End times carry the hour, not just the minutes ──────────────────

#[test]
fn end_time_carries_the_hour() {
    let mut desk = desk();

    // 10:45 + 30 minutes is 11:15, not "10:75".
    let booking = desk.book(request(MONDAY, "10:45", 30), clock()).unwrap();
    assert_eq!(booking.end_time, "11:15");

    let long = desk.book(request(MONDAY, "13:00", 90), clock()).unwrap();
    assert_eq!(long.end_time, "14:30");
}

// ── Test 5: The same slot cannot be booked twice ────────────────────────────

#[test]
fn same_slot_cannot_be_booked_twice() {
    let mut desk = desk();

    desk.book(request(MONDAY, "10:00", 30), clock()).unwrap();
    let second = desk.book(request(MONDAY, "10:00", 30), clock());

    assert_eq!(
        second,
        Err(BookingError::SlotUnavailable {
            date: MONDAY.to_string(),
            start_time: "10:00".to_string(),
        })
    );
}

// ── Test 6: Overlapping bookings are refused by the commit re-check ─────────

#[test]
fn overlapping_booking_is_refused() {
    let mut desk = desk();

    // 10:00-11:00 occupies two half-hour slots.
    desk.book(request(MONDAY, "10:00", 60), clock()).unwrap();
    let overlapping = desk.book(request(MONDAY, "10:30", 30), clock());

    assert!(matches!(
        overlapping,
        Err(BookingError::SlotUnavailable { .. })
    ));

    // A booking on the neighbouring slot is fine.
    assert!(desk.book(request(MONDAY, "11:00", 30), clock()).is_ok());
}

// ── Test 7: The store-level uniqueness backstop ─────────────────────────────

#[test]
fn direct_create_hits_uniqueness_backstop() {
    // Bypass the desk's re-check and hit the store directly: the
    // (provider, date, start) constraint still refuses the second writer.
    let mut store = InMemoryBookingStore::new();
    store
        .create(request(MONDAY, "10:00", 30), "10:30".to_string(), clock())
        .unwrap();

    let second = store.create(request(MONDAY, "10:00", 30), "10:30".to_string(), clock());
    assert_eq!(
        second,
        Err(BookingError::AlreadyBooked {
            date: MONDAY.to_string(),
            start_time: "10:00".to_string(),
        })
    );
}

// ── Test 8: Cancelling frees the slot ───────────────────────────────────────

#[test]
fn cancelling_frees_the_slot() {
    let mut desk = desk();

    let booking = desk.book(request(MONDAY, "10:00", 30), clock()).unwrap();
    let cancelled = desk
        .cancel(&booking.id, at("2026-03-03", 9, 0))
        .unwrap();

    assert_eq!(cancelled.status, BookingStatus::Cancelled);
    assert_eq!(cancelled.updated_at, "2026-03-03T09:00:00");
    assert_eq!(cancelled.created_at, "2026-03-02T08:00:00");

    // The slot is bookable again; the store assigns a fresh id.
    let rebooked = desk.book(request(MONDAY, "10:00", 30), clock()).unwrap();
    assert_eq!(rebooked.id, "bk-2");
}

// ── Test 9: Status updates flow through the desk ────────────────────────────

#[test]
fn status_updates_flow_through_the_desk() {
    let mut desk = desk();

    let booking = desk.book(request(MONDAY, "10:00", 30), clock()).unwrap();
    let confirmed = desk
        .update_status(&booking.id, BookingStatus::Confirmed, clock())
        .unwrap();
    assert_eq!(confirmed.status, BookingStatus::Confirmed);

    // A confirmed booking still occupies its slot.
    let retry = desk.book(request(MONDAY, "10:00", 30), clock());
    assert!(matches!(retry, Err(BookingError::SlotUnavailable { .. })));

    assert_eq!(
        desk.cancel("bk-99", clock()),
        Err(BookingError::UnknownBooking("bk-99".to_string()))
    );
}

// ── Test 10: Listing filters by date and sorts ──────────────────────────────

#[test]
fn listing_filters_by_date_and_sorts() {
    let mut desk = desk();

    desk.book(request(TUESDAY, "11:00", 30), clock()).unwrap();
    desk.book(request(MONDAY, "14:00", 30), clock()).unwrap();
    desk.book(request(MONDAY, "09:00", 30), clock()).unwrap();

    let monday_only = desk
        .booking_store()
        .bookings("prov-1", Some(MONDAY))
        .unwrap();
    assert_eq!(monday_only.len(), 2);
    assert_eq!(monday_only[0].start_time, "09:00");
    assert_eq!(monday_only[1].start_time, "14:00");

    let all = desk.booking_store().bookings("prov-1", None).unwrap();
    assert_eq!(all.len(), 3);
    assert_eq!(all[2].date, TUESDAY);

    let other = desk.booking_store().bookings("prov-2", None).unwrap();
    assert!(other.is_empty());
}

// ── Test 11: Availability updates are validated before storage ──────────────

#[test]
fn availability_updates_are_validated_before_storage() {
    let mut desk = desk();

    let mut bad = weekday_schedule("prov-1");
    bad.working_days.push(working_day(1)); // duplicate Monday

    let rejected = desk.set_availability("prov-1", bad);
    assert_eq!(
        rejected,
        Err(BookingError::Validation(ValidationError::DuplicateDay {
            day_of_week: 1
        }))
    );

    // The stored schedule is untouched.
    let slots = desk.slots("prov-1", MONDAY, 30, clock()).unwrap();
    assert_eq!(slots.len(), 18);
}

// ── Test 12: Updates replace the whole object, last write wins ──────────────

#[test]
fn updates_replace_the_whole_object() {
    let mut desk = desk();

    let replacement = Availability {
        provider_id: "prov-1".to_string(),
        working_days: vec![WorkingDay {
            day_of_week: 1,
            start_time: "10:00".to_string(),
            end_time: "12:00".to_string(),
            is_available: true,
        }],
        blocked_dates: vec![],
        blocked_time_slots: vec![],
    };
    desk.set_availability("prov-1", replacement).unwrap();

    // Monday shrank to four slots; Tuesday is gone entirely.
    assert_eq!(desk.slots("prov-1", MONDAY, 30, clock()).unwrap().len(), 4);
    assert!(desk.slots("prov-1", TUESDAY, 30, clock()).unwrap().is_empty());
}

// ── Test 13: A payload for another provider is refused ──────────────────────

#[test]
fn payload_for_another_provider_is_refused() {
    let mut desk = desk();

    let result = desk.set_availability("prov-1", weekday_schedule("prov-2"));
    assert_eq!(
        result,
        Err(BookingError::ProviderMismatch {
            requested: "prov-1".to_string(),
            payload: "prov-2".to_string(),
        })
    );
}

// ── Test 14: Booking against an unknown provider fails early ────────────────

#[test]
fn booking_against_unknown_provider_fails() {
    let mut desk = desk();

    let mut foreign = request(MONDAY, "10:00", 30);
    foreign.provider_id = "prov-9".to_string();

    assert_eq!(
        desk.book(foreign, clock()),
        Err(BookingError::UnknownProvider("prov-9".to_string()))
    );
}

// ── Test 15: Bookable dates flow through the desk ───────────────────────────

#[test]
fn bookable_dates_flow_through_the_desk() {
    let desk = desk();
    let dates = desk
        .bookable_dates("prov-1", 7, at(MONDAY, 10, 0))
        .unwrap();

    assert_eq!(dates.first().map(String::as_str), Some(TUESDAY));
    // The weekend is not offered.
    assert!(!dates.contains(&"2026-03-21".to_string()));
    assert!(!dates.contains(&"2026-03-22".to_string()));
}

// ── Test 16: Reviving a cancelled booking re-contends for the slot ──────────

#[test]
fn reviving_a_cancelled_booking_recontends_for_the_slot() {
    let mut desk = desk();

    let first = desk.book(request(MONDAY, "10:00", 30), clock()).unwrap();
    desk.cancel(&first.id, clock()).unwrap();
    let second = desk.book(request(MONDAY, "10:00", 30), clock()).unwrap();

    // The slot now belongs to the second booking; the first cannot come
    // back out of CANCELLED.
    assert_eq!(
        desk.update_status(&first.id, BookingStatus::Confirmed, clock()),
        Err(BookingError::AlreadyBooked {
            date: MONDAY.to_string(),
            start_time: "10:00".to_string(),
        })
    );

    // Exactly one occupying booking holds 10:00.
    let holders = desk
        .booking_store()
        .bookings("prov-1", Some(MONDAY))
        .unwrap()
        .into_iter()
        .filter(|b| b.start_time == "10:00" && b.status.occupies_slot())
        .count();
    assert_eq!(holders, 1);

    // Once the competing booking cancels, the revival goes through.
    desk.cancel(&second.id, clock()).unwrap();
    let revived = desk
        .update_status(&first.id, BookingStatus::Confirmed, clock())
        .unwrap();
    assert_eq!(revived.status, BookingStatus::Confirmed);
}
