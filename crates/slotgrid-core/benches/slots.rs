//! Criterion benchmarks for slot generation and the point check.

use std::hint::black_box;

use chrono::{NaiveDate, NaiveDateTime};
use criterion::{criterion_group, criterion_main, Criterion};
use slotgrid_core::types::format_hhmm;
use slotgrid_core::{
    generate_slots, is_slot_bookable, Availability, Booking, BookingStatus, WorkingDay,
};

const MONDAY: &str = "2026-03-16";

fn clock() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 3, 2)
        .unwrap()
        .and_hms_opt(8, 0, 0)
        .unwrap()
}

/// Seven-day schedule with a handful of blocked entries, the busy-provider
/// shape the engine sees in production.
fn full_week() -> Availability {
    Availability {
        provider_id: "prov-1".to_string(),
        working_days: (0..=6)
            .map(|dow| WorkingDay {
                day_of_week: dow,
                start_time: "08:00".to_string(),
                end_time: "20:00".to_string(),
                is_available: true,
            })
            .collect(),
        blocked_dates: vec!["2026-03-20".to_string()],
        blocked_time_slots: vec![
            format!("{MONDAY} 12:00-13:00"),
            format!("{MONDAY} 16:30-17:00"),
        ],
    }
}

/// Every other half-hour of the day booked solid.
fn day_of_bookings() -> Vec<Booking> {
    (0u32..12)
        .map(|i| {
            let start = 8 * 60 + i * 60;
            Booking {
                id: format!("bk-{i}"),
                user_id: "user-7".to_string(),
                provider_id: "prov-1".to_string(),
                service_id: "svc-2".to_string(),
                date: MONDAY.to_string(),
                start_time: format_hhmm(start),
                end_time: format_hhmm(start + 30),
                status: BookingStatus::Confirmed,
                notes: None,
                created_at: "2026-03-01T12:00:00".to_string(),
                updated_at: "2026-03-01T12:00:00".to_string(),
            }
        })
        .collect()
}

fn bench_slots(c: &mut Criterion) {
    let availability = full_week();
    let bookings = day_of_bookings();
    let now = clock();

    c.bench_function("generate_slots/30min_day", |b| {
        b.iter(|| {
            generate_slots(
                black_box(&availability),
                black_box(MONDAY),
                30,
                black_box(&bookings),
                now,
            )
        })
    });

    c.bench_function("generate_slots/5min_day", |b| {
        b.iter(|| {
            generate_slots(
                black_box(&availability),
                black_box(MONDAY),
                5,
                black_box(&bookings),
                now,
            )
        })
    });

    c.bench_function("is_slot_bookable/point", |b| {
        b.iter(|| {
            is_slot_bookable(
                black_box(&availability),
                black_box(MONDAY),
                black_box("14:30"),
                30,
                black_box(&bookings),
                now,
            )
        })
    });
}

criterion_group!(benches, bench_slots);
criterion_main!(benches);
