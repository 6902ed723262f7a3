//! Schedule exception repository.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use super::entities::schedule_exception::{self, ActiveModel, Entity as ExceptionEntity};
use crate::domain::Exception;
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Schedule exception persistence operations.
///
/// Exceptions reach this layer already validated; the repository persists
/// and retrieves without re-checking.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait ExceptionRepository: Send + Sync {
    /// Persist a validated exception.
    async fn insert(&self, exception: Exception) -> AppResult<Exception>;

    /// List a business's exceptions, ordered by start date.
    async fn list_for_business(&self, business_id: Uuid) -> AppResult<Vec<Exception>>;

    /// Delete an exception; `NotFound` if it does not belong to the business.
    async fn delete(&self, business_id: Uuid, exception_id: Uuid) -> AppResult<()>;
}

/// SeaORM-backed implementation of [`ExceptionRepository`].
pub struct ExceptionStore {
    db: DatabaseConnection,
}

impl ExceptionStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ExceptionRepository for ExceptionStore {
    async fn insert(&self, exception: Exception) -> AppResult<Exception> {
        let custom_hours = exception
            .custom_hours
            .as_ref()
            .map(serde_json::to_value)
            .transpose()
            .map_err(|e| AppError::internal(format!("cannot serialize custom hours: {}", e)))?;

        let model = ActiveModel {
            id: Set(exception.id),
            business_id: Set(exception.business_id),
            kind: Set(exception.kind.as_str().to_string()),
            start_date: Set(exception.start_date),
            end_date: Set(exception.end_date),
            reason: Set(exception.reason.as_str().to_string()),
            custom_hours: Set(custom_hours),
            title: Set(exception.title.clone()),
            description: Set(exception.description.clone()),
            created_at: Set(exception.created_at),
        };

        let model = model.insert(&self.db).await.map_err(AppError::from)?;
        Exception::try_from(model)
    }

    async fn list_for_business(&self, business_id: Uuid) -> AppResult<Vec<Exception>> {
        let models = ExceptionEntity::find()
            .filter(schedule_exception::Column::BusinessId.eq(business_id))
            .order_by_asc(schedule_exception::Column::StartDate)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        models.into_iter().map(Exception::try_from).collect()
    }

    async fn delete(&self, business_id: Uuid, exception_id: Uuid) -> AppResult<()> {
        let result = ExceptionEntity::delete_many()
            .filter(schedule_exception::Column::Id.eq(exception_id))
            .filter(schedule_exception::Column::BusinessId.eq(business_id))
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }
        Ok(())
    }
}
