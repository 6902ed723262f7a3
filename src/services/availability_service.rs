//! Availability service - the read path.
//!
//! Pure composition of the domain core over repository reads: resolve
//! effective hours, generate candidate slots, drop the ones that collide
//! with existing appointments. No shared mutable state; safe under
//! unguarded concurrent reads.

use async_trait::async_trait;
use chrono::{Datelike, NaiveDate, NaiveDateTime};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::{
    filter_available, format_hhmm, generate_slots, open_status_at, resolve_hours, Appointment,
    Business, EffectiveHours, OpenStatus, ServiceOffering,
};
use crate::errors::{AppError, AppResult};
use crate::infra::UnitOfWork;

/// One bookable slot, formatted for clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct SlotTimes {
    /// Slot start, `HH:MM`
    #[schema(example = "09:00")]
    pub start_time: String,
    /// Slot end, `HH:MM`
    #[schema(example = "09:30")]
    pub end_time: String,
}

/// Availability of a single date.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DayAvailability {
    pub open: bool,
    pub slots: Vec<SlotTimes>,
    /// Exception title when a closure governs the date.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    /// Next opening hint when closed, e.g. `"Monday at 09:00"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_open: Option<String>,
}

/// One cell of the month calendar grid.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct MonthDay {
    #[schema(value_type = String, example = "2025-08-04")]
    pub date: NaiveDate,
    pub open: bool,
    pub slot_count: usize,
}

/// Availability queries exposed to the API layer.
#[async_trait]
pub trait AvailabilityService: Send + Sync {
    /// Bookable slots for one business, service and date.
    async fn day_availability(
        &self,
        business_id: Uuid,
        service_id: Uuid,
        date: NaiveDate,
        granularity_minutes: u32,
    ) -> AppResult<DayAvailability>;

    /// Per-date open flag and slot count across a whole month.
    async fn month_availability(
        &self,
        business_id: Uuid,
        service_id: Uuid,
        year: i32,
        month: u32,
        granularity_minutes: u32,
    ) -> AppResult<Vec<MonthDay>>;

    /// Whether the business is open right now, with a next-open hint.
    async fn open_now(&self, business_id: Uuid) -> AppResult<OpenStatus>;
}

/// Concrete implementation of [`AvailabilityService`] using Unit of Work.
pub struct AvailabilityEngine<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> AvailabilityEngine<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }

    async fn load_business(&self, business_id: Uuid) -> AppResult<Business> {
        self.uow
            .businesses()
            .find_by_id(business_id)
            .await?
            .ok_or(AppError::NotFound)
    }

    async fn load_service(
        &self,
        business_id: Uuid,
        service_id: Uuid,
    ) -> AppResult<ServiceOffering> {
        let service = self
            .uow
            .services()
            .find_by_id(service_id)
            .await?
            .ok_or(AppError::NotFound)?;
        if service.business_id != business_id {
            return Err(AppError::NotFound);
        }
        Ok(service)
    }
}

/// The single local timezone the platform operates in.
pub(crate) fn now_local() -> NaiveDateTime {
    chrono::Local::now().naive_local()
}

fn to_slot_times(slots: Vec<crate::domain::Slot>) -> Vec<SlotTimes> {
    slots
        .into_iter()
        .map(|slot| SlotTimes {
            start_time: format_hhmm(slot.start),
            end_time: format_hhmm(slot.end),
        })
        .collect()
}

/// Inclusive date bounds of a calendar month.
fn month_bounds(year: i32, month: u32) -> AppResult<(NaiveDate, NaiveDate)> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| AppError::bad_request(format!("invalid month {}-{:02}", year, month)))?;
    let first_of_next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    }
    .ok_or_else(|| AppError::bad_request("month arithmetic overflow".to_string()))?;
    let last = first_of_next
        .pred_opt()
        .ok_or_else(|| AppError::bad_request("month arithmetic overflow".to_string()))?;
    Ok((first, last))
}

#[async_trait]
impl<U: UnitOfWork> AvailabilityService for AvailabilityEngine<U> {
    async fn day_availability(
        &self,
        business_id: Uuid,
        service_id: Uuid,
        date: NaiveDate,
        granularity_minutes: u32,
    ) -> AppResult<DayAvailability> {
        let business = self.load_business(business_id).await?;
        let service = self.load_service(business_id, service_id).await?;
        let exceptions = self.uow.exceptions().list_for_business(business_id).await?;

        let now = now_local();
        let hours = resolve_hours(&business.schedule, &exceptions, date);
        if let EffectiveHours::Closed { reason } = &hours {
            let status = open_status_at(&business.schedule, &exceptions, now);
            return Ok(DayAvailability {
                open: false,
                slots: Vec::new(),
                reason: reason.clone(),
                next_open: status.next_open,
            });
        }

        let slots = generate_slots(
            &hours,
            date,
            granularity_minutes,
            service.duration_minutes,
            now,
        );
        let appointments = self
            .uow
            .appointments()
            .find_active_for_date(business_id, date)
            .await?;
        let available = filter_available(slots, &appointments);

        Ok(DayAvailability {
            open: true,
            slots: to_slot_times(available),
            reason: None,
            next_open: None,
        })
    }

    async fn month_availability(
        &self,
        business_id: Uuid,
        service_id: Uuid,
        year: i32,
        month: u32,
        granularity_minutes: u32,
    ) -> AppResult<Vec<MonthDay>> {
        let business = self.load_business(business_id).await?;
        let service = self.load_service(business_id, service_id).await?;
        let exceptions = self.uow.exceptions().list_for_business(business_id).await?;

        let (first, last) = month_bounds(year, month)?;
        let appointments = self
            .uow
            .appointments()
            .find_active_in_range(business_id, first, last)
            .await?;

        let mut by_date: HashMap<NaiveDate, Vec<Appointment>> = HashMap::new();
        for appointment in appointments {
            by_date.entry(appointment.date).or_default().push(appointment);
        }

        let now = now_local();
        let empty = Vec::new();
        let days = (1..=last.day())
            .filter_map(|day| NaiveDate::from_ymd_opt(year, month, day))
            .map(|date| {
                let hours = resolve_hours(&business.schedule, &exceptions, date);
                let slots = generate_slots(
                    &hours,
                    date,
                    granularity_minutes,
                    service.duration_minutes,
                    now,
                );
                let existing = by_date.get(&date).unwrap_or(&empty);
                let available = filter_available(slots, existing);
                MonthDay {
                    date,
                    open: !available.is_empty(),
                    slot_count: available.len(),
                }
            })
            .collect();

        Ok(days)
    }

    async fn open_now(&self, business_id: Uuid) -> AppResult<OpenStatus> {
        let business = self.load_business(business_id).await?;
        let exceptions = self.uow.exceptions().list_for_business(business_id).await?;
        Ok(open_status_at(&business.schedule, &exceptions, now_local()))
    }
}
