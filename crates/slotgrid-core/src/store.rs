//! Injected data sources and the booking commit flow.
//!
//! The engine never fetches anything itself; callers hand it availability
//! and bookings. This module defines the two collaborator interfaces, the
//! in-memory implementations used by tests and tools, and [`BookingDesk`],
//! the coordinator that wires validation, slot checking and persistence
//! into the end-to-end booking flow.

use std::collections::HashMap;

use chrono::NaiveDateTime;

use crate::calendar;
use crate::error::{BookingError, SlotError};
use crate::slots::{generate_slots, is_slot_bookable};
use crate::types::{
    format_hhmm, parse_hhmm, Availability, Booking, BookingRequest, BookingStatus, TimeSlot,
};
use crate::validate::validate_availability_update;

/// Read/write access to provider availability configurations.
pub trait AvailabilityStore {
    /// The stored availability for a provider.
    ///
    /// An unknown provider is an error; a known provider with no working
    /// days is a normal, empty availability.
    fn availability(&self, provider_id: &str) -> Result<Availability, BookingError>;

    /// Replace a provider's availability wholesale, last write wins.
    ///
    /// Validity is the caller's job; see
    /// [`BookingDesk::set_availability`].
    fn update_availability(
        &mut self,
        provider_id: &str,
        candidate: Availability,
    ) -> Result<Availability, BookingError>;
}

/// Read/write access to bookings.
///
/// `create` must refuse a second occupying booking for the same
/// (provider, date, start time), and `update_status` must run the same
/// check before reviving a cancelled booking — the persistence-level
/// backstop against double booking when two writers race past the slot
/// check.
pub trait BookingStore {
    /// All bookings for a provider, optionally narrowed to one date,
    /// sorted by date and start time.
    fn bookings(&self, provider_id: &str, date: Option<&str>) -> Result<Vec<Booking>, BookingError>;

    /// One booking by id.
    fn booking(&self, booking_id: &str) -> Result<Booking, BookingError>;

    /// Persist a new PENDING booking with the given end time.
    fn create(
        &mut self,
        request: BookingRequest,
        end_time: String,
        now: NaiveDateTime,
    ) -> Result<Booking, BookingError>;

    /// Set a booking's status and bump its `updatedAt`.
    ///
    /// A transition out of a non-occupying status re-contends for the
    /// slot: when another occupying booking already holds the same
    /// (provider, date, start time), the update fails with
    /// [`BookingError::AlreadyBooked`].
    fn update_status(
        &mut self,
        booking_id: &str,
        status: BookingStatus,
        now: NaiveDateTime,
    ) -> Result<Booking, BookingError>;
}

/// HashMap-backed [`AvailabilityStore`]. Providers are registered
/// explicitly and start with empty availability.
#[derive(Debug, Default)]
pub struct InMemoryAvailabilityStore {
    providers: HashMap<String, Availability>,
}

impl InMemoryAvailabilityStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a provider with empty availability. Registering an already
    /// known provider leaves its stored availability untouched.
    pub fn register_provider(&mut self, provider_id: &str) {
        self.providers
            .entry(provider_id.to_string())
            .or_insert_with(|| Availability::empty(provider_id));
    }
}

impl AvailabilityStore for InMemoryAvailabilityStore {
    fn availability(&self, provider_id: &str) -> Result<Availability, BookingError> {
        self.providers
            .get(provider_id)
            .cloned()
            .ok_or_else(|| BookingError::UnknownProvider(provider_id.to_string()))
    }

    fn update_availability(
        &mut self,
        provider_id: &str,
        candidate: Availability,
    ) -> Result<Availability, BookingError> {
        if candidate.provider_id != provider_id {
            return Err(BookingError::ProviderMismatch {
                requested: provider_id.to_string(),
                payload: candidate.provider_id,
            });
        }
        let stored = self
            .providers
            .get_mut(provider_id)
            .ok_or_else(|| BookingError::UnknownProvider(provider_id.to_string()))?;
        *stored = candidate.clone();
        Ok(candidate)
    }
}

/// HashMap-backed [`BookingStore`] with sequential `bk-N` ids and
/// timestamps formatted from the injected clock.
#[derive(Debug, Default)]
pub struct InMemoryBookingStore {
    bookings: HashMap<String, Booking>,
    next_id: u64,
}

impl InMemoryBookingStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl BookingStore for InMemoryBookingStore {
    fn bookings(&self, provider_id: &str, date: Option<&str>) -> Result<Vec<Booking>, BookingError> {
        let mut found: Vec<Booking> = self
            .bookings
            .values()
            .filter(|b| b.provider_id == provider_id)
            .filter(|b| date.is_none_or(|d| b.date == d))
            .cloned()
            .collect();
        found.sort_by(|a, b| {
            (&a.date, &a.start_time, &a.id).cmp(&(&b.date, &b.start_time, &b.id))
        });
        Ok(found)
    }

    fn booking(&self, booking_id: &str) -> Result<Booking, BookingError> {
        self.bookings
            .get(booking_id)
            .cloned()
            .ok_or_else(|| BookingError::UnknownBooking(booking_id.to_string()))
    }

    fn create(
        &mut self,
        request: BookingRequest,
        end_time: String,
        now: NaiveDateTime,
    ) -> Result<Booking, BookingError> {
        let taken = self.bookings.values().any(|b| {
            b.provider_id == request.provider_id
                && b.date == request.date
                && b.start_time == request.start_time
                && b.status.occupies_slot()
        });
        if taken {
            return Err(BookingError::AlreadyBooked {
                date: request.date,
                start_time: request.start_time,
            });
        }

        self.next_id += 1;
        let stamp = timestamp(now);
        let booking = Booking {
            id: format!("bk-{}", self.next_id),
            user_id: request.user_id,
            provider_id: request.provider_id,
            service_id: request.service_id,
            date: request.date,
            start_time: request.start_time,
            end_time,
            status: BookingStatus::Pending,
            notes: request.notes,
            created_at: stamp.clone(),
            updated_at: stamp,
        };
        self.bookings.insert(booking.id.clone(), booking.clone());
        Ok(booking)
    }

    fn update_status(
        &mut self,
        booking_id: &str,
        status: BookingStatus,
        now: NaiveDateTime,
    ) -> Result<Booking, BookingError> {
        let current = self
            .bookings
            .get(booking_id)
            .ok_or_else(|| BookingError::UnknownBooking(booking_id.to_string()))?;

        // Reviving out of a non-occupying status re-contends for the slot.
        if !current.status.occupies_slot() && status.occupies_slot() {
            let taken = self.bookings.values().any(|b| {
                b.id != booking_id
                    && b.provider_id == current.provider_id
                    && b.date == current.date
                    && b.start_time == current.start_time
                    && b.status.occupies_slot()
            });
            if taken {
                return Err(BookingError::AlreadyBooked {
                    date: current.date.clone(),
                    start_time: current.start_time.clone(),
                });
            }
        }

        let booking = self
            .bookings
            .get_mut(booking_id)
            .ok_or_else(|| BookingError::UnknownBooking(booking_id.to_string()))?;
        booking.status = status;
        booking.updated_at = timestamp(now);
        Ok(booking.clone())
    }
}

/// Coordinates availability, validation and booking commits.
///
/// Owns one store of each kind and runs the flows a booking product needs:
/// compute a slot table, list bookable dates, replace a provider's schedule
/// after validation, and book or cancel slots with the commit-time
/// re-check.
pub struct BookingDesk<A, B> {
    availability: A,
    bookings: B,
}

impl<A: AvailabilityStore, B: BookingStore> BookingDesk<A, B> {
    pub fn new(availability: A, bookings: B) -> Self {
        BookingDesk {
            availability,
            bookings,
        }
    }

    /// The underlying availability store.
    pub fn availability_store(&self) -> &A {
        &self.availability
    }

    /// The underlying booking store.
    pub fn booking_store(&self) -> &B {
        &self.bookings
    }

    /// Slot table for one provider and date; see
    /// [`generate_slots`](crate::generate_slots).
    pub fn slots(
        &self,
        provider_id: &str,
        date: &str,
        interval_minutes: u32,
        now: NaiveDateTime,
    ) -> Result<Vec<TimeSlot>, BookingError> {
        let availability = self.availability.availability(provider_id)?;
        let bookings = self.bookings.bookings(provider_id, Some(date))?;
        Ok(generate_slots(
            &availability,
            date,
            interval_minutes,
            &bookings,
            now,
        )?)
    }

    /// Bookable dates from tomorrow over the given horizon; see
    /// [`bookable_dates`](crate::bookable_dates).
    pub fn bookable_dates(
        &self,
        provider_id: &str,
        days_ahead: u32,
        now: NaiveDateTime,
    ) -> Result<Vec<String>, BookingError> {
        let availability = self.availability.availability(provider_id)?;
        Ok(calendar::bookable_dates(&availability, days_ahead, now))
    }

    /// Validate and store a whole-object availability replacement.
    pub fn set_availability(
        &mut self,
        provider_id: &str,
        candidate: Availability,
    ) -> Result<Availability, BookingError> {
        let validated = validate_availability_update(candidate)?;
        self.availability.update_availability(provider_id, validated)
    }

    /// Book a slot: re-check it against the bookings stored right now, then
    /// persist a PENDING booking with a computed end time.
    ///
    /// A slot that was free when the user picked it but has been taken
    /// since fails with [`BookingError::SlotUnavailable`] — the "slot no
    /// longer available, please pick another time" outcome, distinct from
    /// any infrastructure failure.
    pub fn book(
        &mut self,
        request: BookingRequest,
        now: NaiveDateTime,
    ) -> Result<Booking, BookingError> {
        let start = parse_hhmm(&request.start_time)
            .ok_or_else(|| SlotError::InvalidTime(request.start_time.clone()))?;
        let availability = self.availability.availability(&request.provider_id)?;
        let existing = self
            .bookings
            .bookings(&request.provider_id, Some(&request.date))?;
        let free = is_slot_bookable(
            &availability,
            &request.date,
            &request.start_time,
            request.duration_minutes,
            &existing,
            now,
        )?;
        if !free {
            return Err(BookingError::SlotUnavailable {
                date: request.date,
                start_time: request.start_time,
            });
        }
        let end_time = format_hhmm(start + request.duration_minutes);
        self.bookings.create(request, end_time, now)
    }

    /// Cancel a booking, releasing its slot.
    pub fn cancel(
        &mut self,
        booking_id: &str,
        now: NaiveDateTime,
    ) -> Result<Booking, BookingError> {
        self.bookings
            .update_status(booking_id, BookingStatus::Cancelled, now)
    }

    /// Set a booking's lifecycle status (confirm, complete, ...).
    pub fn update_status(
        &mut self,
        booking_id: &str,
        status: BookingStatus,
        now: NaiveDateTime,
    ) -> Result<Booking, BookingError> {
        self.bookings.update_status(booking_id, status, now)
    }
}

fn timestamp(now: NaiveDateTime) -> String {
    now.format("%Y-%m-%dT%H:%M:%S").to_string()
}
