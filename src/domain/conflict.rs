//! Appointment conflict checking.
//!
//! A single half-open overlap predicate backs both the read path (slot
//! filtering) and the authoritative commit-time check, so the two can
//! never diverge.

use chrono::NaiveTime;
use uuid::Uuid;

use super::appointment::Appointment;
use super::schedule::minute_of_day;
use super::slots::Slot;

/// Half-open interval overlap on minutes of the day.
///
/// Touching endpoints (one ends exactly when the other starts) do not
/// conflict.
pub fn overlaps(a_start: NaiveTime, a_len_minutes: u32, b_start: NaiveTime, b_len_minutes: u32) -> bool {
    let a0 = minute_of_day(a_start);
    let a1 = a0 + i64::from(a_len_minutes);
    let b0 = minute_of_day(b_start);
    let b1 = b0 + i64::from(b_len_minutes);
    a0 < b1 && b0 < a1
}

/// Remove slots that overlap any non-cancelled appointment on their date.
///
/// Pure and idempotent: filtering an already-filtered list is a no-op.
pub fn filter_available(slots: Vec<Slot>, appointments: &[Appointment]) -> Vec<Slot> {
    slots
        .into_iter()
        .filter(|slot| {
            let slot_len = (minute_of_day(slot.end) - minute_of_day(slot.start)).max(0) as u32;
            !appointments.iter().any(|apt| {
                apt.blocks_slots()
                    && apt.date == slot.date
                    && overlaps(slot.start, slot_len, apt.start_time, apt.duration_minutes)
            })
        })
        .collect()
}

/// Check a proposed booking against existing appointments.
///
/// Returns the id of the first conflicting non-cancelled appointment.
/// Shared by the pre-flight UI filter and the commit-time re-check.
pub fn validate_booking(
    proposed_start: NaiveTime,
    proposed_duration_minutes: u32,
    appointments: &[Appointment],
) -> Result<(), Uuid> {
    match appointments.iter().find(|apt| {
        apt.blocks_slots()
            && overlaps(
                proposed_start,
                proposed_duration_minutes,
                apt.start_time,
                apt.duration_minutes,
            )
    }) {
        Some(conflicting) => Err(conflicting.id),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::appointment::{Appointment, AppointmentStatus, CustomerInfo};
    use chrono::{NaiveDate, Utc};

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 8, 4).unwrap()
    }

    fn appointment(start: NaiveTime, duration: u32, status: AppointmentStatus) -> Appointment {
        Appointment {
            id: Uuid::new_v4(),
            business_id: Uuid::new_v4(),
            service_id: Uuid::new_v4(),
            date: date(),
            start_time: start,
            duration_minutes: duration,
            status,
            customer: CustomerInfo {
                name: "Ada".to_string(),
                email: "ada@example.com".to_string(),
                phone: None,
            },
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn slot(start: NaiveTime, end: NaiveTime) -> Slot {
        Slot {
            date: date(),
            start,
            end,
        }
    }

    #[test]
    fn overlap_is_half_open() {
        assert!(overlaps(t(10, 0), 30, t(10, 15), 30));
        assert!(overlaps(t(10, 0), 60, t(10, 0), 30));
        // Touching endpoints are not conflicts.
        assert!(!overlaps(t(10, 0), 30, t(10, 30), 30));
        assert!(!overlaps(t(10, 30), 30, t(10, 0), 30));
    }

    #[test]
    fn filter_removes_overlapping_slots() {
        // Existing 10:00 for 60 minutes: 10:00-10:30 conflicts, 11:00 does not.
        let existing = vec![appointment(t(10, 0), 60, AppointmentStatus::Confirmed)];
        let slots = vec![
            slot(t(10, 0), t(10, 30)),
            slot(t(10, 30), t(11, 0)),
            slot(t(11, 0), t(11, 30)),
        ];
        let available = filter_available(slots, &existing);
        let starts: Vec<_> = available.iter().map(|s| s.start).collect();
        assert_eq!(starts, vec![t(11, 0)]);
    }

    #[test]
    fn cancelled_appointments_do_not_block() {
        let existing = vec![appointment(t(10, 0), 60, AppointmentStatus::Cancelled)];
        let slots = vec![slot(t(10, 0), t(10, 30))];
        assert_eq!(filter_available(slots, &existing).len(), 1);
    }

    #[test]
    fn filter_is_idempotent() {
        let existing = vec![
            appointment(t(9, 0), 30, AppointmentStatus::Confirmed),
            appointment(t(13, 0), 90, AppointmentStatus::Pending),
        ];
        let slots: Vec<_> = (0..16)
            .map(|i| slot(t(9 + i / 2, (i % 2) * 30), t(9 + (i + 1) / 2, ((i + 1) % 2) * 30)))
            .collect();
        let once = filter_available(slots, &existing);
        let twice = filter_available(once.clone(), &existing);
        assert_eq!(once, twice);
    }

    #[test]
    fn validate_reports_conflicting_id() {
        let existing = vec![appointment(t(10, 0), 60, AppointmentStatus::Confirmed)];
        let conflicting_id = existing[0].id;
        assert_eq!(validate_booking(t(10, 30), 30, &existing), Err(conflicting_id));
        assert_eq!(validate_booking(t(11, 0), 30, &existing), Ok(()));
    }

    #[test]
    fn pending_appointments_also_block() {
        let existing = vec![appointment(t(14, 0), 30, AppointmentStatus::Pending)];
        assert!(validate_booking(t(14, 0), 30, &existing).is_err());
    }
}
