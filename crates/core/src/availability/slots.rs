//! Pure slot derivation
//!
//! Turns provider-declared UTC time ranges on a date into local-time,
//! fixed-interval slots. Known limitations, preserved deliberately:
//! ranges are processed independently in input order, so overlapping or
//! adjacent ranges can yield duplicate or unsorted times, and the default
//! policy offers any 15-minute mark inside a range even when the remaining
//! window is shorter than the selected services' total duration.
//! `SlotPolicy::FitsDuration` opts into the stricter behavior.

use chrono::{NaiveDate, NaiveTime, TimeZone, Timelike, Utc};
use chrono_tz::Tz;
use salonkit_domain::constants::{
    SLOT_INTERVAL_MINUTES, TIME_FORMAT_MINUTES, TIME_FORMAT_SECONDS,
};
use salonkit_domain::{TimeRange, TimeSlot};
use tracing::debug;

/// How slot offering treats the selection's total duration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotPolicy {
    /// Offer every mark within `[start, end]` regardless of duration
    Permissive,
    /// Offer a mark only if the range still fits the given total duration
    FitsDuration { total_minutes: u32 },
}

/// Derive bookable slots for `date` from its availability ranges.
///
/// Ranges tagged unavailable are ignored. For each available range the UTC
/// wall-clock endpoints are converted to `tz`, and one slot is emitted every
/// 15 minutes from the local start minute through the local end minute
/// inclusive, formatted zero-padded "HH:MM". Output order follows input
/// range order; no de-duplication or sorting is performed.
pub fn derive_slots(
    date: NaiveDate,
    ranges: &[TimeRange],
    tz: Tz,
    policy: SlotPolicy,
) -> Vec<TimeSlot> {
    let mut slots = Vec::new();

    for range in ranges.iter().filter(|r| r.is_available) {
        let (Some(start), Some(end)) =
            (parse_wire_time(&range.start_time), parse_wire_time(&range.end_time))
        else {
            debug!(
                start = %range.start_time,
                end = %range.end_time,
                "Skipping availability range with unparseable endpoints"
            );
            continue;
        };

        let start_minute = local_minute_of_day(date, start, tz);
        let end_minute = local_minute_of_day(date, end, tz);

        let mut minute = start_minute;
        while minute <= end_minute {
            let offered = match policy {
                SlotPolicy::Permissive => true,
                SlotPolicy::FitsDuration { total_minutes } => {
                    end_minute - minute >= total_minutes
                }
            };
            if offered {
                slots.push(TimeSlot {
                    time: format!("{:02}:{:02}", minute / 60, minute % 60),
                    available: true,
                });
            }
            minute += SLOT_INTERVAL_MINUTES;
        }
    }

    slots
}

/// Accepts both time formats the endpoint has shipped
fn parse_wire_time(value: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(value, TIME_FORMAT_SECONDS)
        .or_else(|_| NaiveTime::parse_from_str(value, TIME_FORMAT_MINUTES))
        .ok()
}

/// Minute of day of a UTC wall-clock time on `date`, seen from `tz`
fn local_minute_of_day(date: NaiveDate, time: NaiveTime, tz: Tz) -> u32 {
    let utc = Utc.from_utc_datetime(&date.and_time(time));
    let local = utc.with_timezone(&tz);
    local.hour() * 60 + local.minute()
}
