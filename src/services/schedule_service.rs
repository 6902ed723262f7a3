//! Schedule management service.
//!
//! Owner-facing operations: businesses, their weekly hours, service
//! offerings and schedule exceptions. All writes go through domain
//! validation before they reach a repository.

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use std::sync::Arc;
use uuid::Uuid;

use crate::config::MAX_SERVICE_DURATION_MINUTES;
use crate::domain::{
    Appointment, Business, DayHours, Exception, ExceptionKind, ExceptionReason,
    RawWeeklySchedule, ServiceOffering, WeeklySchedule,
};
use crate::errors::{AppError, AppResult};
use crate::infra::UnitOfWork;
use crate::types::PaginationParams;

/// Input for creating a schedule exception.
#[derive(Debug, Clone)]
pub struct NewException {
    pub business_id: Uuid,
    pub kind: ExceptionKind,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub reason: ExceptionReason,
    pub custom_hours: Option<DayHours>,
    pub title: String,
    pub description: String,
}

/// Business, hours and exception management exposed to the API layer.
#[async_trait]
pub trait ScheduleService: Send + Sync {
    /// Create a business. With no hours given, every day starts closed.
    async fn create_business(
        &self,
        name: String,
        hours: Option<RawWeeklySchedule>,
    ) -> AppResult<Business>;

    /// Fetch a business.
    async fn get_business(&self, business_id: Uuid) -> AppResult<Business>;

    /// Replace a business's weekly hours.
    async fn update_hours(
        &self,
        business_id: Uuid,
        hours: RawWeeklySchedule,
    ) -> AppResult<Business>;

    /// Create a service offering.
    async fn create_service(
        &self,
        business_id: Uuid,
        name: String,
        price_cents: i64,
        duration_minutes: u32,
    ) -> AppResult<ServiceOffering>;

    /// List a business's service offerings.
    async fn list_services(&self, business_id: Uuid) -> AppResult<Vec<ServiceOffering>>;

    /// Create a schedule exception.
    async fn create_exception(&self, input: NewException) -> AppResult<Exception>;

    /// List a business's exceptions, ordered by start date.
    async fn list_exceptions(&self, business_id: Uuid) -> AppResult<Vec<Exception>>;

    /// Delete an exception.
    async fn delete_exception(&self, business_id: Uuid, exception_id: Uuid) -> AppResult<()>;

    /// List a business's appointments, optionally filtered by date.
    /// Returns the page and the total row count.
    async fn list_appointments(
        &self,
        business_id: Uuid,
        date: Option<NaiveDate>,
        pagination: PaginationParams,
    ) -> AppResult<(Vec<Appointment>, u64)>;
}

/// Concrete implementation of [`ScheduleService`] using Unit of Work.
pub struct ScheduleManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> ScheduleManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }

    async fn require_business(&self, business_id: Uuid) -> AppResult<Business> {
        self.uow
            .businesses()
            .find_by_id(business_id)
            .await?
            .ok_or(AppError::NotFound)
    }
}

#[async_trait]
impl<U: UnitOfWork> ScheduleService for ScheduleManager<U> {
    async fn create_business(
        &self,
        name: String,
        hours: Option<RawWeeklySchedule>,
    ) -> AppResult<Business> {
        if name.trim().is_empty() {
            return Err(AppError::validation("business name must not be empty"));
        }
        let schedule = match hours {
            Some(raw) => WeeklySchedule::normalize(raw)?,
            None => WeeklySchedule::closed_all_week(),
        };
        let business = self.uow.businesses().create(name, schedule).await?;
        tracing::info!(business_id = %business.id, "Business created");
        Ok(business)
    }

    async fn get_business(&self, business_id: Uuid) -> AppResult<Business> {
        self.require_business(business_id).await
    }

    async fn update_hours(
        &self,
        business_id: Uuid,
        hours: RawWeeklySchedule,
    ) -> AppResult<Business> {
        self.require_business(business_id).await?;
        let schedule = WeeklySchedule::normalize(hours)?;
        self.uow.businesses().update_hours(business_id, schedule).await
    }

    async fn create_service(
        &self,
        business_id: Uuid,
        name: String,
        price_cents: i64,
        duration_minutes: u32,
    ) -> AppResult<ServiceOffering> {
        self.require_business(business_id).await?;
        if name.trim().is_empty() {
            return Err(AppError::validation("service name must not be empty"));
        }
        if price_cents < 0 {
            return Err(AppError::validation("price must not be negative"));
        }
        if duration_minutes == 0 || duration_minutes > MAX_SERVICE_DURATION_MINUTES {
            return Err(AppError::validation(format!(
                "duration must be between 1 and {} minutes",
                MAX_SERVICE_DURATION_MINUTES
            )));
        }
        self.uow
            .services()
            .create(business_id, name, price_cents, duration_minutes)
            .await
    }

    async fn list_services(&self, business_id: Uuid) -> AppResult<Vec<ServiceOffering>> {
        self.require_business(business_id).await?;
        self.uow.services().list_for_business(business_id).await
    }

    async fn create_exception(&self, input: NewException) -> AppResult<Exception> {
        self.require_business(input.business_id).await?;

        let exception = Exception {
            id: Uuid::new_v4(),
            business_id: input.business_id,
            kind: input.kind,
            start_date: input.start_date,
            end_date: input.end_date,
            reason: input.reason,
            custom_hours: input.custom_hours,
            title: input.title,
            description: input.description,
            created_at: Utc::now(),
        };

        let errors = exception.validate();
        if !errors.is_empty() {
            return Err(AppError::InvalidException(errors));
        }

        let exception = self.uow.exceptions().insert(exception).await?;
        tracing::info!(
            exception_id = %exception.id,
            business_id = %exception.business_id,
            kind = exception.kind.as_str(),
            "Schedule exception created"
        );
        Ok(exception)
    }

    async fn list_exceptions(&self, business_id: Uuid) -> AppResult<Vec<Exception>> {
        self.require_business(business_id).await?;
        self.uow.exceptions().list_for_business(business_id).await
    }

    async fn delete_exception(&self, business_id: Uuid, exception_id: Uuid) -> AppResult<()> {
        self.require_business(business_id).await?;
        self.uow.exceptions().delete(business_id, exception_id).await
    }

    async fn list_appointments(
        &self,
        business_id: Uuid,
        date: Option<NaiveDate>,
        pagination: PaginationParams,
    ) -> AppResult<(Vec<Appointment>, u64)> {
        self.require_business(business_id).await?;
        self.uow
            .appointments()
            .list_for_business(business_id, date, pagination)
            .await
    }
}
