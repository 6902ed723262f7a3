//! Date-range exceptions layered over the weekly schedule.
//!
//! An exception either closes the business outright or substitutes special
//! hours for a span of dates. Nothing prevents two exceptions from covering
//! the same date; [`resolve_for_date`] picks a deterministic winner.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::schedule::DayHours;

/// What the exception does to the affected dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ExceptionKind {
    /// Business is closed for the whole date range.
    Closure,
    /// Business is open with `custom_hours` instead of the weekly default.
    SpecialHours,
}

impl ExceptionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExceptionKind::Closure => "closure",
            ExceptionKind::SpecialHours => "special_hours",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "closure" => Some(ExceptionKind::Closure),
            "special_hours" => Some(ExceptionKind::SpecialHours),
            _ => None,
        }
    }
}

/// Owner-facing categorization of the exception.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ExceptionReason {
    Holiday,
    Vacation,
    Maintenance,
    SpecialEvent,
    Other,
}

impl ExceptionReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExceptionReason::Holiday => "holiday",
            ExceptionReason::Vacation => "vacation",
            ExceptionReason::Maintenance => "maintenance",
            ExceptionReason::SpecialEvent => "special_event",
            ExceptionReason::Other => "other",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "holiday" => Some(ExceptionReason::Holiday),
            "vacation" => Some(ExceptionReason::Vacation),
            "maintenance" => Some(ExceptionReason::Maintenance),
            "special_event" => Some(ExceptionReason::SpecialEvent),
            "other" => Some(ExceptionReason::Other),
            _ => None,
        }
    }
}

/// A date-range override of normal business hours.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct Exception {
    pub id: Uuid,
    pub business_id: Uuid,
    pub kind: ExceptionKind,
    /// First affected date.
    pub start_date: NaiveDate,
    /// Last affected date, inclusive. Must be `>= start_date`.
    pub end_date: NaiveDate,
    pub reason: ExceptionReason,
    /// Required (and valid) iff `kind == SpecialHours`.
    pub custom_hours: Option<DayHours>,
    pub title: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

/// A single field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, utoipa::ToSchema)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl Exception {
    /// Whether this exception governs the given date.
    pub fn covers(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }

    /// Validate the exception before persistence.
    ///
    /// This is the only enforcement point; the data model itself does not
    /// prevent invalid states. Returns every failure, not just the first.
    pub fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();

        if self.title.trim().is_empty() {
            errors.push(FieldError::new("title", "title must not be empty"));
        }

        if self.start_date > self.end_date {
            errors.push(FieldError::new(
                "end_date",
                format!(
                    "end date {} must not be before start date {}",
                    self.end_date, self.start_date
                ),
            ));
        }

        match (self.kind, &self.custom_hours) {
            (ExceptionKind::SpecialHours, None) => {
                errors.push(FieldError::new(
                    "custom_hours",
                    "special hours exception requires custom hours",
                ));
            }
            (ExceptionKind::SpecialHours, Some(hours)) => {
                if !hours.is_open {
                    errors.push(FieldError::new(
                        "custom_hours",
                        "special hours must be marked open",
                    ));
                } else if hours.open >= hours.close {
                    errors.push(FieldError::new(
                        "custom_hours",
                        format!(
                            "opening time {} must be before closing time {}",
                            hours.open, hours.close
                        ),
                    ));
                }
            }
            (ExceptionKind::Closure, _) => {}
        }

        errors
    }
}

/// Find the exception governing `date`, if any.
///
/// When several ranges overlap the same date, the most recently created
/// exception wins; ids break creation-time ties so resolution is fully
/// deterministic regardless of storage order.
pub fn resolve_for_date(exceptions: &[Exception], date: NaiveDate) -> Option<&Exception> {
    exceptions
        .iter()
        .filter(|e| e.covers(date))
        .max_by_key(|e| (e.created_at, e.id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveTime, TimeZone};

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn exception(start: NaiveDate, end: NaiveDate, created_hour: u32) -> Exception {
        Exception {
            id: Uuid::new_v4(),
            business_id: Uuid::new_v4(),
            kind: ExceptionKind::Closure,
            start_date: start,
            end_date: end,
            reason: ExceptionReason::Holiday,
            custom_hours: None,
            title: "Closed".to_string(),
            description: String::new(),
            created_at: Utc.with_ymd_and_hms(2025, 7, 1, created_hour, 0, 0).unwrap(),
        }
    }

    #[test]
    fn resolve_matches_inclusive_bounds() {
        let ex = exception(d(2025, 8, 1), d(2025, 8, 7), 0);
        let all = vec![ex];
        assert!(resolve_for_date(&all, d(2025, 8, 1)).is_some());
        assert!(resolve_for_date(&all, d(2025, 8, 7)).is_some());
        assert!(resolve_for_date(&all, d(2025, 8, 8)).is_none());
        assert!(resolve_for_date(&all, d(2025, 7, 31)).is_none());
    }

    #[test]
    fn most_recently_created_wins_on_overlap() {
        let older = exception(d(2025, 8, 1), d(2025, 8, 10), 1);
        let newer = exception(d(2025, 8, 5), d(2025, 8, 7), 2);
        let newer_id = newer.id;

        // Storage order must not matter.
        let older_first = [older.clone(), newer.clone()];
        let resolved = resolve_for_date(&older_first, d(2025, 8, 6)).unwrap();
        assert_eq!(resolved.id, newer_id);
        let newer_first = [newer, older];
        let resolved = resolve_for_date(&newer_first, d(2025, 8, 6)).unwrap();
        assert_eq!(resolved.id, newer_id);
    }

    #[test]
    fn validate_accepts_well_formed_closure() {
        let ex = exception(d(2025, 8, 1), d(2025, 8, 7), 0);
        assert!(ex.validate().is_empty());
    }

    #[test]
    fn validate_collects_all_errors() {
        let mut ex = exception(d(2025, 8, 7), d(2025, 8, 1), 0);
        ex.title = "  ".to_string();
        ex.kind = ExceptionKind::SpecialHours;
        let errors = ex.validate();
        let fields: Vec<_> = errors.iter().map(|e| e.field).collect();
        assert_eq!(fields, vec!["title", "end_date", "custom_hours"]);
    }

    #[test]
    fn validate_rejects_inverted_special_hours() {
        let mut ex = exception(d(2025, 8, 1), d(2025, 8, 1), 0);
        ex.kind = ExceptionKind::SpecialHours;
        ex.custom_hours = Some(DayHours::open(
            NaiveTime::from_hms_opt(14, 0, 0).unwrap(),
            NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
        ));
        let errors = ex.validate();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "custom_hours");
    }

    #[test]
    fn kind_and_reason_round_trip_as_strings() {
        assert_eq!(
            ExceptionKind::parse(ExceptionKind::SpecialHours.as_str()),
            Some(ExceptionKind::SpecialHours)
        );
        assert_eq!(
            ExceptionReason::parse(ExceptionReason::SpecialEvent.as_str()),
            Some(ExceptionReason::SpecialEvent)
        );
        assert_eq!(ExceptionKind::parse("weekend"), None);
    }
}
