//! Booking service - the write path.
//!
//! Cheap pre-checks (business open, slot inside hours, not in the past)
//! run outside the transaction. The authoritative conflict check runs
//! again inside a serializable transaction together with the insert, so
//! two racing requests for the same slot cannot both commit.

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime};
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::schedule::minute_of_day;
use crate::domain::{
    open_status_at, resolve_hours, validate_booking, Appointment, AppointmentStatus, CustomerInfo,
    EffectiveHours, NewAppointment, ServiceOffering,
};
use crate::errors::{AppError, AppResult};
use crate::infra::UnitOfWork;

use super::availability_service::now_local;

/// Validated input for [`BookingService::book`].
#[derive(Debug, Clone)]
pub struct BookingRequest {
    pub business_id: Uuid,
    pub service_id: Uuid,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub customer: CustomerInfo,
}

/// Appointment lifecycle operations exposed to the API layer.
#[async_trait]
pub trait BookingService: Send + Sync {
    /// Book a slot. Returns the confirmed appointment, or `SlotTaken`
    /// when another booking won the slot first.
    async fn book(&self, request: BookingRequest) -> AppResult<Appointment>;

    /// Cancel an appointment. Allowed from `pending` and `confirmed`.
    async fn cancel(&self, appointment_id: Uuid) -> AppResult<Appointment>;

    /// Mark an appointment completed. Allowed from `confirmed` only.
    async fn complete(&self, appointment_id: Uuid) -> AppResult<Appointment>;
}

/// Concrete implementation of [`BookingService`] using Unit of Work.
pub struct BookingManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> BookingManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }

    /// Pre-checks against effective hours. These catch honest mistakes
    /// early; the transaction re-check is what guarantees correctness.
    async fn check_bookable(
        &self,
        request: &BookingRequest,
        service: &ServiceOffering,
    ) -> AppResult<()> {
        let business = self
            .uow
            .businesses()
            .find_by_id(request.business_id)
            .await?
            .ok_or(AppError::NotFound)?;
        let exceptions = self
            .uow
            .exceptions()
            .list_for_business(request.business_id)
            .await?;

        let hours = resolve_hours(&business.schedule, &exceptions, request.date);
        let (open, close) = match hours {
            EffectiveHours::Open { open, close } => (open, close),
            EffectiveHours::Closed { reason } => {
                let status = open_status_at(&business.schedule, &exceptions, now_local());
                return Err(AppError::BusinessClosed {
                    reason,
                    next_open: status.next_open,
                });
            }
        };

        let start = minute_of_day(request.start_time);
        let end = start + i64::from(service.duration_minutes);
        if start < minute_of_day(open) || end > minute_of_day(close) {
            return Err(AppError::validation(
                "requested time is outside business hours",
            ));
        }

        let now = now_local();
        if request.date < now.date()
            || (request.date == now.date() && request.start_time <= now.time())
        {
            return Err(AppError::validation("cannot book a slot in the past"));
        }

        Ok(())
    }

    async fn transition(
        &self,
        appointment_id: Uuid,
        target: AppointmentStatus,
    ) -> AppResult<Appointment> {
        self.uow
            .transaction(move |ctx| {
                Box::pin(async move {
                    let appointment = ctx
                        .appointments()
                        .find_by_id(appointment_id)
                        .await?
                        .ok_or(AppError::NotFound)?;
                    if !appointment.status.can_transition_to(target) {
                        return Err(AppError::validation(format!(
                            "cannot move appointment from {} to {}",
                            appointment.status, target
                        )));
                    }
                    ctx.appointments().set_status(appointment_id, target).await
                })
            })
            .await
    }
}

#[async_trait]
impl<U: UnitOfWork> BookingService for BookingManager<U> {
    async fn book(&self, request: BookingRequest) -> AppResult<Appointment> {
        let service = self
            .uow
            .services()
            .find_by_id(request.service_id)
            .await?
            .ok_or(AppError::NotFound)?;
        if service.business_id != request.business_id {
            return Err(AppError::NotFound);
        }

        self.check_bookable(&request, &service).await?;

        let new = NewAppointment {
            business_id: request.business_id,
            service_id: request.service_id,
            date: request.date,
            start_time: request.start_time,
            duration_minutes: service.duration_minutes,
            status: AppointmentStatus::Confirmed,
            customer: request.customer,
        };

        let appointment = self
            .uow
            .transaction_serializable(move |ctx| {
                Box::pin(async move {
                    let existing = ctx
                        .appointments()
                        .find_active_for_date(new.business_id, new.date)
                        .await?;
                    validate_booking(new.start_time, new.duration_minutes, &existing)
                        .map_err(|conflicting_id| AppError::SlotTaken { conflicting_id })?;
                    ctx.appointments().insert(new).await
                })
            })
            .await?;

        tracing::info!(
            appointment_id = %appointment.id,
            business_id = %appointment.business_id,
            date = %appointment.date,
            "Appointment booked"
        );
        Ok(appointment)
    }

    async fn cancel(&self, appointment_id: Uuid) -> AppResult<Appointment> {
        let appointment = self
            .transition(appointment_id, AppointmentStatus::Cancelled)
            .await?;
        tracing::info!(appointment_id = %appointment.id, "Appointment cancelled");
        Ok(appointment)
    }

    async fn complete(&self, appointment_id: Uuid) -> AppResult<Appointment> {
        self.transition(appointment_id, AppointmentStatus::Completed)
            .await
    }
}
