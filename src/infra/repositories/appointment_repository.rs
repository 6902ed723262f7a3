//! Appointment repository (read path).
//!
//! Writes to the appointment store go through the unit of work's
//! transactional repository, never through this one; see
//! `crate::infra::unit_of_work`.

use async_trait::async_trait;
use chrono::NaiveDate;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
};
use uuid::Uuid;

use super::entities::appointment::{self, Entity as AppointmentEntity};
use crate::domain::{Appointment, AppointmentStatus};
use crate::errors::{AppError, AppResult};
use crate::types::PaginationParams;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Read access to persisted appointments.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait AppointmentRepository: Send + Sync {
    /// Non-cancelled appointments for a business on one date.
    async fn find_active_for_date(
        &self,
        business_id: Uuid,
        date: NaiveDate,
    ) -> AppResult<Vec<Appointment>>;

    /// Non-cancelled appointments for a business over an inclusive date range.
    async fn find_active_in_range(
        &self,
        business_id: Uuid,
        from: NaiveDate,
        to: NaiveDate,
    ) -> AppResult<Vec<Appointment>>;

    /// Find an appointment by ID.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Appointment>>;

    /// Page through a business's appointments, optionally for one date.
    /// Includes cancelled appointments (history view). Returns the page and
    /// the total count.
    async fn list_for_business(
        &self,
        business_id: Uuid,
        date: Option<NaiveDate>,
        pagination: PaginationParams,
    ) -> AppResult<(Vec<Appointment>, u64)>;
}

/// SeaORM-backed implementation of [`AppointmentRepository`].
pub struct AppointmentStore {
    db: DatabaseConnection,
}

impl AppointmentStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl AppointmentRepository for AppointmentStore {
    async fn find_active_for_date(
        &self,
        business_id: Uuid,
        date: NaiveDate,
    ) -> AppResult<Vec<Appointment>> {
        let models = AppointmentEntity::find()
            .filter(appointment::Column::BusinessId.eq(business_id))
            .filter(appointment::Column::Date.eq(date))
            .filter(appointment::Column::Status.ne(AppointmentStatus::Cancelled.as_str()))
            .order_by_asc(appointment::Column::StartTime)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        models.into_iter().map(Appointment::try_from).collect()
    }

    async fn find_active_in_range(
        &self,
        business_id: Uuid,
        from: NaiveDate,
        to: NaiveDate,
    ) -> AppResult<Vec<Appointment>> {
        let models = AppointmentEntity::find()
            .filter(appointment::Column::BusinessId.eq(business_id))
            .filter(appointment::Column::Date.gte(from))
            .filter(appointment::Column::Date.lte(to))
            .filter(appointment::Column::Status.ne(AppointmentStatus::Cancelled.as_str()))
            .order_by_asc(appointment::Column::Date)
            .order_by_asc(appointment::Column::StartTime)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        models.into_iter().map(Appointment::try_from).collect()
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Appointment>> {
        let model = AppointmentEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        model.map(Appointment::try_from).transpose()
    }

    async fn list_for_business(
        &self,
        business_id: Uuid,
        date: Option<NaiveDate>,
        pagination: PaginationParams,
    ) -> AppResult<(Vec<Appointment>, u64)> {
        let mut query = AppointmentEntity::find()
            .filter(appointment::Column::BusinessId.eq(business_id));
        if let Some(date) = date {
            query = query.filter(appointment::Column::Date.eq(date));
        }
        let query = query
            .order_by_asc(appointment::Column::Date)
            .order_by_asc(appointment::Column::StartTime);

        let paginator = query.paginate(&self.db, pagination.limit());
        let total = paginator.num_items().await?;
        let models = paginator
            .fetch_page(pagination.page.saturating_sub(1))
            .await?;

        let appointments: AppResult<Vec<_>> =
            models.into_iter().map(Appointment::try_from).collect();
        Ok((appointments?, total))
    }
}
