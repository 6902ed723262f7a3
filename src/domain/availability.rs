//! Effective-hours resolution.
//!
//! Combines the weekly schedule with the exception overlay to answer
//! "is this business open on date D, and between which bounds?".
//! Precedence is fixed: closure exception > special-hours exception >
//! weekly default.

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, Weekday};
use serde::Serialize;

use super::exception::{resolve_for_date, Exception, ExceptionKind};
use super::schedule::{format_hhmm, WeeklySchedule};

/// Number of days scanned forward when looking for the next open date.
pub const NEXT_OPEN_HORIZON_DAYS: u64 = 7;

/// The open/close interval that actually governs a calendar date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EffectiveHours {
    Open {
        open: NaiveTime,
        close: NaiveTime,
    },
    Closed {
        /// Exception title when a closure governs the date.
        reason: Option<String>,
    },
}

impl EffectiveHours {
    pub fn is_open(&self) -> bool {
        matches!(self, EffectiveHours::Open { .. })
    }
}

/// Resolve the hours governing `date`.
pub fn resolve_hours(
    schedule: &WeeklySchedule,
    exceptions: &[Exception],
    date: NaiveDate,
) -> EffectiveHours {
    if let Some(exception) = resolve_for_date(exceptions, date) {
        return match (exception.kind, &exception.custom_hours) {
            (ExceptionKind::Closure, _) => EffectiveHours::Closed {
                reason: Some(exception.title.clone()),
            },
            (ExceptionKind::SpecialHours, Some(hours)) if hours.is_open => EffectiveHours::Open {
                open: hours.open,
                close: hours.close,
            },
            // Validation rejects special hours without custom hours; a row
            // that slipped through is treated as closed rather than guessed.
            (ExceptionKind::SpecialHours, _) => EffectiveHours::Closed {
                reason: Some(exception.title.clone()),
            },
        };
    }

    let hours = schedule.for_weekday(date.weekday());
    if hours.is_open {
        EffectiveHours::Open {
            open: hours.open,
            close: hours.close,
        }
    } else {
        EffectiveHours::Closed { reason: None }
    }
}

/// Current open/closed state, with a hint at the next opening.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, utoipa::ToSchema)]
pub struct OpenStatus {
    pub open: bool,
    /// Human-readable next opening, e.g. `"Monday at 09:00"`. `None` when
    /// open now or when no open day exists within the scan horizon.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_open: Option<String>,
}

/// Determine whether the business is open at `now`, and if not, when it
/// next opens within [`NEXT_OPEN_HORIZON_DAYS`].
pub fn open_status_at(
    schedule: &WeeklySchedule,
    exceptions: &[Exception],
    now: NaiveDateTime,
) -> OpenStatus {
    if let EffectiveHours::Open { open, close } = resolve_hours(schedule, exceptions, now.date()) {
        if open <= now.time() && now.time() < close {
            return OpenStatus {
                open: true,
                next_open: None,
            };
        }
        // Not yet open today: today still counts as the next opening.
        if now.time() < open {
            return OpenStatus {
                open: false,
                next_open: Some(describe_opening(now.date().weekday(), open)),
            };
        }
    }

    OpenStatus {
        open: false,
        next_open: next_opening(schedule, exceptions, now.date()),
    }
}

/// Scan forward day-by-day for the next open date after `from`.
fn next_opening(
    schedule: &WeeklySchedule,
    exceptions: &[Exception],
    from: NaiveDate,
) -> Option<String> {
    (1..=NEXT_OPEN_HORIZON_DAYS)
        .filter_map(|offset| from.checked_add_days(chrono::Days::new(offset)))
        .find_map(|date| match resolve_hours(schedule, exceptions, date) {
            EffectiveHours::Open { open, .. } => Some(describe_opening(date.weekday(), open)),
            EffectiveHours::Closed { .. } => None,
        })
}

fn describe_opening(weekday: Weekday, open: NaiveTime) -> String {
    format!("{} at {}", weekday_name(weekday), format_hhmm(open))
}

fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::exception::ExceptionReason;
    use crate::domain::schedule::DayHours;
    use chrono::Utc;
    use uuid::Uuid;

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    /// Open Mon-Thu 09:00-17:00, closed Fri-Sun.
    fn weekday_schedule() -> WeeklySchedule {
        let open = DayHours::open(t(9, 0), t(17, 0));
        WeeklySchedule {
            sunday: DayHours::closed(),
            monday: open,
            tuesday: open,
            wednesday: open,
            thursday: open,
            friday: DayHours::closed(),
            saturday: DayHours::closed(),
        }
    }

    fn closure(start: NaiveDate, end: NaiveDate) -> Exception {
        Exception {
            id: Uuid::new_v4(),
            business_id: Uuid::new_v4(),
            kind: ExceptionKind::Closure,
            start_date: start,
            end_date: end,
            reason: ExceptionReason::Vacation,
            custom_hours: None,
            title: "Summer break".to_string(),
            description: String::new(),
            created_at: Utc::now(),
        }
    }

    fn special_hours(date: NaiveDate, open: NaiveTime, close: NaiveTime) -> Exception {
        Exception {
            kind: ExceptionKind::SpecialHours,
            custom_hours: Some(DayHours::open(open, close)),
            title: "Late opening".to_string(),
            ..closure(date, date)
        }
    }

    #[test]
    fn weekly_default_applies_without_exceptions() {
        // 2025-08-04 is a Monday.
        let hours = resolve_hours(&weekday_schedule(), &[], d(2025, 8, 4));
        assert_eq!(
            hours,
            EffectiveHours::Open {
                open: t(9, 0),
                close: t(17, 0)
            }
        );
        assert!(!resolve_hours(&weekday_schedule(), &[], d(2025, 8, 8)).is_open());
    }

    #[test]
    fn closure_overrides_open_weekday() {
        let exceptions = vec![closure(d(2025, 8, 1), d(2025, 8, 7))];
        let hours = resolve_hours(&weekday_schedule(), &exceptions, d(2025, 8, 4));
        assert_eq!(
            hours,
            EffectiveHours::Closed {
                reason: Some("Summer break".to_string())
            }
        );
    }

    #[test]
    fn special_hours_override_weekly_default() {
        // Saturday is normally closed; special hours open it.
        let exceptions = vec![special_hours(d(2025, 8, 9), t(12, 0), t(15, 0))];
        let hours = resolve_hours(&weekday_schedule(), &exceptions, d(2025, 8, 9));
        assert_eq!(
            hours,
            EffectiveHours::Open {
                open: t(12, 0),
                close: t(15, 0)
            }
        );
    }

    #[test]
    fn closure_beats_special_hours_when_newer() {
        let special = special_hours(d(2025, 8, 4), t(12, 0), t(15, 0));
        let mut close = closure(d(2025, 8, 4), d(2025, 8, 4));
        close.created_at = special.created_at + chrono::Duration::hours(1);
        let hours = resolve_hours(&weekday_schedule(), &[special, close], d(2025, 8, 4));
        assert!(!hours.is_open());
    }

    #[test]
    fn open_now_within_hours() {
        let now = d(2025, 8, 4).and_time(t(10, 30));
        let status = open_status_at(&weekday_schedule(), &[], now);
        assert!(status.open);
        assert_eq!(status.next_open, None);
    }

    #[test]
    fn before_opening_points_at_today() {
        let now = d(2025, 8, 4).and_time(t(7, 0));
        let status = open_status_at(&weekday_schedule(), &[], now);
        assert!(!status.open);
        assert_eq!(status.next_open.as_deref(), Some("Monday at 09:00"));
    }

    #[test]
    fn after_closing_scans_to_next_open_day() {
        // Thursday evening: Friday-Sunday closed, next open Monday.
        let now = d(2025, 8, 7).and_time(t(18, 0));
        let status = open_status_at(&weekday_schedule(), &[], now);
        assert!(!status.open);
        assert_eq!(status.next_open.as_deref(), Some("Monday at 09:00"));
    }

    #[test]
    fn no_opening_within_horizon_yields_none() {
        // A week-long closure hides every open day in the scan window.
        let now = d(2025, 8, 3).and_time(t(12, 0));
        let exceptions = vec![closure(d(2025, 8, 3), d(2025, 8, 11))];
        let status = open_status_at(&weekday_schedule(), &exceptions, now);
        assert!(!status.open);
        assert_eq!(status.next_open, None);
    }
}
