//! Candidate slot generation.
//!
//! Enumerates every start time that fits a service of a given duration
//! inside the effective hours of a date. Conflict filtering against
//! existing appointments happens separately in [`super::conflict`].

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::Serialize;

use super::availability::EffectiveHours;
use super::schedule::minute_of_day;

/// An ephemeral bookable candidate. Never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, utoipa::ToSchema)]
pub struct Slot {
    pub date: NaiveDate,
    #[serde(with = "super::schedule::hhmm")]
    #[schema(value_type = String, example = "09:00")]
    pub start: NaiveTime,
    #[serde(with = "super::schedule::hhmm")]
    #[schema(value_type = String, example = "09:30")]
    pub end: NaiveTime,
}

/// Enumerate candidate start times for `date`, in ascending order.
///
/// Starts at the opening time and steps by `granularity_minutes` while
/// `start + service_duration_minutes` still fits before closing. Dates
/// before `now`'s date yield nothing, and slots on today's date whose
/// start is not strictly after `now`'s time of day are discarded, so the
/// read path never advertises a slot the booking path would reject as
/// past. Closed hours, or a service longer than the whole open interval,
/// produce an empty vec.
pub fn generate_slots(
    hours: &EffectiveHours,
    date: NaiveDate,
    granularity_minutes: u32,
    service_duration_minutes: u32,
    now: NaiveDateTime,
) -> Vec<Slot> {
    let (open, close) = match hours {
        EffectiveHours::Open { open, close } => (*open, *close),
        EffectiveHours::Closed { .. } => return Vec::new(),
    };
    if granularity_minutes == 0 || service_duration_minutes == 0 || date < now.date() {
        return Vec::new();
    }

    let open_min = minute_of_day(open);
    let close_min = minute_of_day(close);
    let duration = i64::from(service_duration_minutes);
    let step = i64::from(granularity_minutes);
    let today = date == now.date();
    let now_min = minute_of_day(now.time());

    let mut slots = Vec::new();
    let mut start = open_min;
    while start + duration <= close_min {
        if !today || start > now_min {
            slots.push(Slot {
                date,
                start: from_minute(start),
                end: from_minute(start + duration),
            });
        }
        start += step;
    }
    slots
}

fn from_minute(minute: i64) -> NaiveTime {
    // Bounded by `close <= 23:59`, so the cast and lookup cannot fail.
    NaiveTime::from_num_seconds_from_midnight_opt(minute as u32 * 60, 0)
        .unwrap_or(NaiveTime::MIN)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn nine_to_five() -> EffectiveHours {
        EffectiveHours::Open {
            open: t(9, 0),
            close: t(17, 0),
        }
    }

    /// `now` on a different date so today-filtering never applies.
    fn elsewhere() -> NaiveDateTime {
        d(2025, 1, 1).and_time(t(0, 0))
    }

    #[test]
    fn full_day_at_thirty_minute_granularity() {
        let slots = generate_slots(&nine_to_five(), d(2025, 8, 4), 30, 30, elsewhere());
        assert_eq!(slots.len(), 16);
        assert_eq!(slots[0].start, t(9, 0));
        assert_eq!(slots[1].start, t(9, 30));
        // 16:30 + 30 == 17:00 <= close, so 16:30 is the last valid start.
        assert_eq!(slots.last().unwrap().start, t(16, 30));
        assert_eq!(slots.last().unwrap().end, t(17, 0));
    }

    #[test]
    fn slots_stay_within_effective_hours() {
        let slots = generate_slots(&nine_to_five(), d(2025, 8, 4), 15, 45, elsewhere());
        for slot in &slots {
            assert!(slot.start >= t(9, 0));
            assert!(slot.end <= t(17, 0));
        }
    }

    #[test]
    fn closed_hours_yield_no_slots() {
        let closed = EffectiveHours::Closed { reason: None };
        assert!(generate_slots(&closed, d(2025, 8, 4), 30, 30, elsewhere()).is_empty());
    }

    #[test]
    fn service_longer_than_open_interval_yields_no_slots() {
        let hours = EffectiveHours::Open {
            open: t(9, 0),
            close: t(10, 0),
        };
        assert!(generate_slots(&hours, d(2025, 8, 4), 30, 90, elsewhere()).is_empty());
    }

    #[test]
    fn past_starts_are_dropped_on_today() {
        let now = d(2025, 8, 4).and_time(t(12, 0));
        let slots = generate_slots(&nine_to_five(), d(2025, 8, 4), 30, 30, now);
        // 12:00 itself is not strictly after now, so 12:30 is first.
        assert_eq!(slots[0].start, t(12, 30));
    }

    #[test]
    fn dates_before_today_yield_no_slots() {
        let now = d(2025, 8, 4).and_time(t(12, 0));
        assert!(generate_slots(&nine_to_five(), d(2025, 8, 3), 30, 30, now).is_empty());
    }

    #[test]
    fn other_dates_ignore_current_time() {
        let now = d(2025, 8, 4).and_time(t(23, 0));
        let slots = generate_slots(&nine_to_five(), d(2025, 8, 5), 30, 30, now);
        assert_eq!(slots[0].start, t(9, 0));
    }

    #[test]
    fn ascending_order() {
        let slots = generate_slots(&nine_to_five(), d(2025, 8, 4), 15, 30, elsewhere());
        assert!(slots.windows(2).all(|w| w[0].start < w[1].start));
    }

    #[test]
    fn granularity_coarser_than_duration() {
        let hours = EffectiveHours::Open {
            open: t(9, 0),
            close: t(12, 0),
        };
        let slots = generate_slots(&hours, d(2025, 8, 4), 60, 30, elsewhere());
        let starts: Vec<_> = slots.iter().map(|s| s.start).collect();
        assert_eq!(starts, vec![t(9, 0), t(10, 0), t(11, 0)]);
    }
}
