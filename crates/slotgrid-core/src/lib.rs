//! # slotgrid-core
//!
//! Availability and time-slot computation for appointment booking.
//!
//! Given a provider's weekly working hours, blocked dates, blocked
//! sub-ranges and existing bookings, slotgrid computes the bookable time
//! slots for any date and validates bookings against that derived
//! availability. Every operation is a pure, synchronous function of its
//! inputs and an injected clock: no global time, no hidden state, no IO.
//! Data sources are traits the caller implements; in-memory ones ship for
//! tests and tools.
//!
//! ## Modules
//!
//! - [`slots`] — slot generation and the point bookability check
//! - [`validate`] — availability-update validation
//! - [`calendar`] — date-level availability over a booking horizon
//! - [`store`] — data-source traits, in-memory stores, booking flow
//! - [`types`] — data model, constants, strict time/date parsing
//! - [`error`] — error types
//!
//! ## Quick start
//!
//! ```rust
//! use chrono::NaiveDate;
//! use slotgrid_core::{generate_slots, Availability, WorkingDay};
//!
//! let availability = Availability {
//!     provider_id: "prov-1".into(),
//!     working_days: vec![WorkingDay {
//!         day_of_week: 1, // Monday
//!         start_time: "09:00".into(),
//!         end_time: "12:00".into(),
//!         is_available: true,
//!     }],
//!     blocked_dates: vec![],
//!     blocked_time_slots: vec![],
//! };
//!
//! let now = NaiveDate::from_ymd_opt(2026, 3, 2)
//!     .unwrap()
//!     .and_hms_opt(8, 0, 0)
//!     .unwrap();
//!
//! // 2026-03-16 is a Monday: six half-hour slots between 09:00 and 12:00.
//! let slots = generate_slots(&availability, "2026-03-16", 30, &[], now).unwrap();
//! assert_eq!(slots.len(), 6);
//! assert!(slots.iter().all(|slot| slot.available));
//! ```

pub mod calendar;
pub mod error;
pub mod slots;
pub mod store;
pub mod types;
pub mod validate;

pub use calendar::{bookable_dates, is_date_bookable};
pub use error::{BookingError, SlotError, ValidationError};
pub use slots::{generate_slots, is_slot_bookable};
pub use store::{
    AvailabilityStore, BookingDesk, BookingStore, InMemoryAvailabilityStore, InMemoryBookingStore,
};
pub use types::{
    Availability, Booking, BookingRequest, BookingStatus, TimeSlot, WorkingDay,
    DEFAULT_BOOKING_HORIZON_DAYS, DEFAULT_SLOT_INTERVAL_MINUTES, MAX_BOOKING_HORIZON_DAYS,
};
pub use validate::validate_availability_update;
