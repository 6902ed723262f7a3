//! Appointment entity and booking status state machine.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::schedule::format_hhmm;

/// Appointment lifecycle.
///
/// `Pending -> {Confirmed, Cancelled}`, `Confirmed -> {Completed, Cancelled}`.
/// `Completed` and `Cancelled` are terminal. Cancelled appointments are
/// kept for history but never block slots again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    Pending,
    Confirmed,
    Completed,
    Cancelled,
}

impl AppointmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AppointmentStatus::Pending => "pending",
            AppointmentStatus::Confirmed => "confirmed",
            AppointmentStatus::Completed => "completed",
            AppointmentStatus::Cancelled => "cancelled",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "pending" => Some(AppointmentStatus::Pending),
            "confirmed" => Some(AppointmentStatus::Confirmed),
            "completed" => Some(AppointmentStatus::Completed),
            "cancelled" => Some(AppointmentStatus::Cancelled),
            _ => None,
        }
    }

    /// Whether the state machine allows moving to `next`.
    pub fn can_transition_to(&self, next: AppointmentStatus) -> bool {
        use AppointmentStatus::*;
        matches!(
            (self, next),
            (Pending, Confirmed) | (Pending, Cancelled) | (Confirmed, Completed) | (Confirmed, Cancelled)
        )
    }

    /// Whether an appointment in this status occupies its interval.
    pub fn blocks_slots(&self) -> bool {
        !matches!(self, AppointmentStatus::Cancelled)
    }
}

impl std::fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Booking customer details.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CustomerInfo {
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

/// A booked (or historical) appointment.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Appointment {
    pub id: Uuid,
    pub business_id: Uuid,
    pub service_id: Uuid,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub duration_minutes: u32,
    pub status: AppointmentStatus,
    pub customer: CustomerInfo,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Appointment {
    /// Whether this appointment still occupies its interval.
    pub fn blocks_slots(&self) -> bool {
        self.status.blocks_slots()
    }
}

/// Insert payload for the booking transaction.
#[derive(Debug, Clone)]
pub struct NewAppointment {
    pub business_id: Uuid,
    pub service_id: Uuid,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub duration_minutes: u32,
    pub status: AppointmentStatus,
    pub customer: CustomerInfo,
}

/// Appointment representation returned to clients.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AppointmentResponse {
    pub id: Uuid,
    pub business_id: Uuid,
    pub service_id: Uuid,
    #[schema(value_type = String, example = "2025-08-04")]
    pub date: NaiveDate,
    #[schema(example = "10:00")]
    pub start_time: String,
    #[schema(example = "10:30")]
    pub end_time: String,
    pub duration_minutes: u32,
    pub status: AppointmentStatus,
    pub customer: CustomerInfo,
    pub created_at: DateTime<Utc>,
}

impl From<Appointment> for AppointmentResponse {
    fn from(apt: Appointment) -> Self {
        let end_minute = super::schedule::minute_of_day(apt.start_time) + i64::from(apt.duration_minutes);
        let end = NaiveTime::from_num_seconds_from_midnight_opt((end_minute as u32).min(24 * 60 - 1) * 60, 0)
            .unwrap_or(apt.start_time);
        Self {
            id: apt.id,
            business_id: apt.business_id,
            service_id: apt.service_id,
            date: apt.date,
            start_time: format_hhmm(apt.start_time),
            end_time: format_hhmm(end),
            duration_minutes: apt.duration_minutes,
            status: apt.status,
            customer: apt.customer,
            created_at: apt.created_at,
        }
    }
}
