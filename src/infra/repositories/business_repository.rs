//! Business repository.

use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set};
use uuid::Uuid;

use super::entities::business::{ActiveModel, Entity as BusinessEntity};
use crate::domain::{Business, WeeklySchedule};
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Business persistence operations.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait BusinessRepository: Send + Sync {
    /// Create a business with the given (already normalized) schedule.
    async fn create(&self, name: String, schedule: WeeklySchedule) -> AppResult<Business>;

    /// Find a business by ID.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Business>>;

    /// Replace the stored weekly hours.
    async fn update_hours(&self, id: Uuid, schedule: WeeklySchedule) -> AppResult<Business>;
}

/// SeaORM-backed implementation of [`BusinessRepository`].
pub struct BusinessStore {
    db: DatabaseConnection,
}

impl BusinessStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn schedule_to_json(schedule: &WeeklySchedule) -> AppResult<serde_json::Value> {
    serde_json::to_value(schedule)
        .map_err(|e| AppError::internal(format!("cannot serialize weekly hours: {}", e)))
}

#[async_trait]
impl BusinessRepository for BusinessStore {
    async fn create(&self, name: String, schedule: WeeklySchedule) -> AppResult<Business> {
        let now = chrono::Utc::now();
        let model = ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(name),
            weekly_hours: Set(schedule_to_json(&schedule)?),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let model = model.insert(&self.db).await.map_err(AppError::from)?;
        Business::try_from(model)
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Business>> {
        let model = BusinessEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        model.map(Business::try_from).transpose()
    }

    async fn update_hours(&self, id: Uuid, schedule: WeeklySchedule) -> AppResult<Business> {
        let model = BusinessEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut active: ActiveModel = model.into();
        active.weekly_hours = Set(schedule_to_json(&schedule)?);
        active.updated_at = Set(chrono::Utc::now());

        let model = active.update(&self.db).await.map_err(AppError::from)?;
        Business::try_from(model)
    }
}
