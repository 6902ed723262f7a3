//! Weekly schedule model and normalization.
//!
//! Businesses store their recurring hours as loosely-typed JSON. Two
//! historical encodings exist: the canonical per-day object and a legacy
//! free-text form (`"09:00-17:00"` or `"closed"`). All format sniffing is
//! isolated here; everything downstream sees only [`WeeklySchedule`].

use chrono::{NaiveTime, Weekday};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

/// Marker used by the legacy free-text format for a closed day.
const LEGACY_CLOSED_MARKER: &str = "closed";

/// Errors produced while normalizing a raw schedule.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    #[error("missing hours for {0}")]
    MissingDay(&'static str),

    #[error("{day}: opening time {open} must be before closing time {close}")]
    InvertedHours {
        day: &'static str,
        open: NaiveTime,
        close: NaiveTime,
    },

    #[error("{day}: cannot parse hours from {value:?}")]
    Unparseable { day: &'static str, value: String },
}

/// Open/close bounds for a single day.
///
/// Invariant: `open < close` whenever `is_open` is true. Enforced by
/// [`WeeklySchedule::normalize`] and [`DayHours::checked`]; closed days
/// carry zeroed times that are never read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DayHours {
    pub is_open: bool,
    #[serde(with = "hhmm")]
    #[schema(value_type = String, example = "09:00")]
    pub open: NaiveTime,
    #[serde(with = "hhmm")]
    #[schema(value_type = String, example = "17:00")]
    pub close: NaiveTime,
}

impl DayHours {
    /// Open interval with the given bounds.
    pub fn open(open: NaiveTime, close: NaiveTime) -> Self {
        Self {
            is_open: true,
            open,
            close,
        }
    }

    /// A day with no hours.
    pub fn closed() -> Self {
        Self {
            is_open: false,
            open: NaiveTime::MIN,
            close: NaiveTime::MIN,
        }
    }

    /// Validate the `open < close` invariant for open days.
    pub fn checked(self, day: &'static str) -> Result<Self, ScheduleError> {
        if self.is_open && self.open >= self.close {
            return Err(ScheduleError::InvertedHours {
                day,
                open: self.open,
                close: self.close,
            });
        }
        Ok(self)
    }
}

/// Canonical per-weekday hours for a business.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct WeeklySchedule {
    pub sunday: DayHours,
    pub monday: DayHours,
    pub tuesday: DayHours,
    pub wednesday: DayHours,
    pub thursday: DayHours,
    pub friday: DayHours,
    pub saturday: DayHours,
}

impl WeeklySchedule {
    /// Normalize a raw (canonical or legacy) schedule into canonical form.
    ///
    /// Fails if a weekday key is missing, a legacy string cannot be parsed,
    /// or an open day has `open >= close`. Pure transform, no side effects.
    pub fn normalize(raw: RawWeeklySchedule) -> Result<Self, ScheduleError> {
        Ok(Self {
            sunday: normalize_day("sunday", raw.sunday)?,
            monday: normalize_day("monday", raw.monday)?,
            tuesday: normalize_day("tuesday", raw.tuesday)?,
            wednesday: normalize_day("wednesday", raw.wednesday)?,
            thursday: normalize_day("thursday", raw.thursday)?,
            friday: normalize_day("friday", raw.friday)?,
            saturday: normalize_day("saturday", raw.saturday)?,
        })
    }

    /// Hours for the given weekday.
    pub fn for_weekday(&self, weekday: Weekday) -> &DayHours {
        match weekday {
            Weekday::Sun => &self.sunday,
            Weekday::Mon => &self.monday,
            Weekday::Tue => &self.tuesday,
            Weekday::Wed => &self.wednesday,
            Weekday::Thu => &self.thursday,
            Weekday::Fri => &self.friday,
            Weekday::Sat => &self.saturday,
        }
    }

    /// A schedule that is closed all week (default for new businesses).
    pub fn closed_all_week() -> Self {
        let closed = DayHours::closed();
        Self {
            sunday: closed,
            monday: closed,
            tuesday: closed,
            wednesday: closed,
            thursday: closed,
            friday: closed,
            saturday: closed,
        }
    }
}

/// Raw schedule as stored on the business record.
///
/// Every weekday key must be present; each value may be either canonical
/// hours or a legacy string.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct RawWeeklySchedule {
    pub sunday: Option<RawDayHours>,
    pub monday: Option<RawDayHours>,
    pub tuesday: Option<RawDayHours>,
    pub wednesday: Option<RawDayHours>,
    pub thursday: Option<RawDayHours>,
    pub friday: Option<RawDayHours>,
    pub saturday: Option<RawDayHours>,
}

/// One day in the raw schedule: canonical hours or a legacy string
/// (`"HH:MM-HH:MM"` or `"closed"`).
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum RawDayHours {
    Canonical(DayHours),
    Legacy(String),
}

fn normalize_day(day: &'static str, raw: Option<RawDayHours>) -> Result<DayHours, ScheduleError> {
    let raw = raw.ok_or(ScheduleError::MissingDay(day))?;
    match raw {
        RawDayHours::Canonical(hours) => hours.checked(day),
        RawDayHours::Legacy(text) => parse_legacy(day, &text)?.checked(day),
    }
}

/// Parse the legacy free-text day format.
fn parse_legacy(day: &'static str, text: &str) -> Result<DayHours, ScheduleError> {
    let trimmed = text.trim();
    if trimmed.eq_ignore_ascii_case(LEGACY_CLOSED_MARKER) {
        return Ok(DayHours::closed());
    }

    let unparseable = || ScheduleError::Unparseable {
        day,
        value: text.to_string(),
    };

    let (open, close) = trimmed.split_once('-').ok_or_else(unparseable)?;
    let open = parse_hhmm(open.trim()).ok_or_else(unparseable)?;
    let close = parse_hhmm(close.trim()).ok_or_else(unparseable)?;
    Ok(DayHours::open(open, close))
}

/// Parse `HH:MM` (or `HH:MM:SS`) into a time of day.
pub fn parse_hhmm(value: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(value, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M:%S"))
        .ok()
}

/// Format a time of day as `HH:MM`.
pub fn format_hhmm(time: NaiveTime) -> String {
    time.format("%H:%M").to_string()
}

/// Minute-of-day arithmetic avoids `NaiveTime` midnight wraparound.
pub(crate) fn minute_of_day(time: NaiveTime) -> i64 {
    use chrono::Timelike;
    i64::from(time.hour()) * 60 + i64::from(time.minute())
}

/// Serde helper: times as `"HH:MM"` strings (tolerates `"HH:MM:SS"`).
pub mod hhmm {
    use chrono::NaiveTime;
    use serde::{self, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::format_hhmm(*time))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let text = String::deserialize(deserializer)?;
        super::parse_hhmm(&text)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid time of day: {text:?}")))
    }
}
