//! `slotgrid` — compute bookable time slots from availability schedules.
//!
//! ## Usage
//!
//! ```sh
//! # Print the slot table for a provider on a date
//! slotgrid slots -a availability.json -d 2026-03-16
//!
//! # Factor in existing bookings and pin the clock
//! slotgrid slots -a availability.json -b bookings.json -d 2026-03-16 \
//!     --now 2026-03-16T08:00:00
//!
//! # Check one candidate slot (exit code 1 when it is not bookable)
//! slotgrid check -a availability.json -d 2026-03-16 -s 10:00 --duration 45
//!
//! # Validate an edited schedule before saving it
//! slotgrid validate -a availability.json
//!
//! # List bookable dates over the next two weeks
//! slotgrid dates -a availability.json --days 14
//! ```

use anyhow::{Context, Result};
use chrono::{Local, NaiveDateTime};
use clap::{Parser, Subcommand};
use std::process;

use slotgrid_core::{
    bookable_dates, generate_slots, is_slot_bookable, validate_availability_update, Availability,
    Booking, TimeSlot, DEFAULT_BOOKING_HORIZON_DAYS, DEFAULT_SLOT_INTERVAL_MINUTES,
};

#[derive(Parser)]
#[command(
    name = "slotgrid",
    version,
    about = "Availability and time-slot engine for appointment booking"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the slot table for a provider on a date
    Slots {
        /// Availability JSON file
        #[arg(short = 'a', long)]
        availability: String,

        /// Bookings JSON file (array; omitted means no bookings)
        #[arg(short = 'b', long)]
        bookings: Option<String>,

        /// Target date (YYYY-MM-DD)
        #[arg(short = 'd', long)]
        date: String,

        /// Slot width in minutes
        #[arg(short = 'i', long, default_value_t = DEFAULT_SLOT_INTERVAL_MINUTES)]
        interval: u32,

        /// Override the clock (YYYY-MM-DDTHH:MM:SS, defaults to local time)
        #[arg(long)]
        now: Option<String>,

        /// Print the raw JSON slot array instead of the table
        #[arg(long)]
        json: bool,
    },
    /// Check whether one candidate slot is bookable
    Check {
        /// Availability JSON file
        #[arg(short = 'a', long)]
        availability: String,

        /// Bookings JSON file (array; omitted means no bookings)
        #[arg(short = 'b', long)]
        bookings: Option<String>,

        /// Target date (YYYY-MM-DD)
        #[arg(short = 'd', long)]
        date: String,

        /// Candidate start time (HH:mm)
        #[arg(short = 's', long)]
        start: String,

        /// Candidate duration in minutes
        #[arg(long, default_value_t = DEFAULT_SLOT_INTERVAL_MINUTES)]
        duration: u32,

        /// Override the clock (YYYY-MM-DDTHH:MM:SS, defaults to local time)
        #[arg(long)]
        now: Option<String>,
    },
    /// Validate an availability document and report what it rejects
    Validate {
        /// Availability JSON file
        #[arg(short = 'a', long)]
        availability: String,
    },
    /// List the dates a provider can be booked on
    Dates {
        /// Availability JSON file
        #[arg(short = 'a', long)]
        availability: String,

        /// How many days ahead to scan (capped at 90)
        #[arg(long, default_value_t = DEFAULT_BOOKING_HORIZON_DAYS)]
        days: u32,

        /// Override the clock (YYYY-MM-DDTHH:MM:SS, defaults to local time)
        #[arg(long)]
        now: Option<String>,

        /// Print the raw JSON date array instead of one date per line
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Slots {
            availability,
            bookings,
            date,
            interval,
            now,
            json,
        } => {
            let availability = read_availability(&availability)?;
            let bookings = read_bookings(bookings.as_deref())?;
            let now = resolve_now(now.as_deref())?;

            let slots = generate_slots(&availability, &date, interval, &bookings, now)
                .context("Failed to compute slots")?;

            if json {
                println!("{}", serde_json::to_string_pretty(&slots)?);
            } else {
                print_slot_table(&availability.provider_id, &date, interval, &slots);
            }
        }
        Commands::Check {
            availability,
            bookings,
            date,
            start,
            duration,
            now,
        } => {
            let availability = read_availability(&availability)?;
            let bookings = read_bookings(bookings.as_deref())?;
            let now = resolve_now(now.as_deref())?;

            let free = is_slot_bookable(&availability, &date, &start, duration, &bookings, now)
                .context("Failed to check the slot")?;

            if free {
                println!("{} {} ({} min): bookable", date, start, duration);
            } else {
                println!("{} {} ({} min): not bookable", date, start, duration);
                process::exit(1);
            }
        }
        Commands::Validate { availability } => {
            let candidate = read_availability(&availability)?;
            let validated =
                validate_availability_update(candidate).context("Availability rejected")?;

            println!(
                "Availability for provider {} is valid ({} working days, {} blocked dates)",
                validated.provider_id,
                validated.working_days.len(),
                validated.blocked_dates.len()
            );
        }
        Commands::Dates {
            availability,
            days,
            now,
            json,
        } => {
            let availability = read_availability(&availability)?;
            let now = resolve_now(now.as_deref())?;

            let dates = bookable_dates(&availability, days, now);

            if json {
                println!("{}", serde_json::to_string_pretty(&dates)?);
            } else if dates.is_empty() {
                println!("No bookable dates in the next {} days", days);
            } else {
                for date in dates {
                    println!("{}", date);
                }
            }
        }
    }

    Ok(())
}

/// Read and parse an availability JSON file.
fn read_availability(path: &str) -> Result<Availability> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read file: {}", path))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse availability JSON: {}", path))
}

/// Read and parse a bookings JSON file (an array of bookings). A missing
/// `-b` flag means there are no bookings to consider.
fn read_bookings(path: Option<&str>) -> Result<Vec<Booking>> {
    match path {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read file: {}", path))?;
            serde_json::from_str(&raw)
                .with_context(|| format!("Failed to parse bookings JSON: {}", path))
        }
        None => Ok(Vec::new()),
    }
}

/// Resolve `--now`, falling back to the local wall-clock time. The engine
/// itself never consults a clock; this flag is the single injection point,
/// which is what makes the integration tests deterministic.
fn resolve_now(raw: Option<&str>) -> Result<NaiveDateTime> {
    match raw {
        Some(raw) => NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S").with_context(|| {
            format!("Failed to parse --now '{}' (expected YYYY-MM-DDTHH:MM:SS)", raw)
        }),
        None => Ok(Local::now().naive_local()),
    }
}

/// Render the slot table the way a booking screen would show it: one line
/// per slot plus a summary count.
fn print_slot_table(provider_id: &str, date: &str, interval: u32, slots: &[TimeSlot]) {
    if slots.is_empty() {
        println!("No slots for provider {} on {}", provider_id, date);
        return;
    }

    println!("Slots for provider {} on {} ({} min):", provider_id, date, interval);
    for slot in slots {
        let marker = if slot.available { "available" } else { "unavailable" };
        println!("  {}-{}  {}", slot.start_time, slot.end_time, marker);
    }

    let open = slots.iter().filter(|slot| slot.available).count();
    println!("{} slots, {} available", slots.len(), open);
}
