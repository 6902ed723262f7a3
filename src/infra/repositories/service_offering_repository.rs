//! Service offering repository.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use super::entities::service_offering::{self, ActiveModel, Entity as ServiceOfferingEntity};
use crate::domain::ServiceOffering;
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Service offering persistence operations.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait ServiceOfferingRepository: Send + Sync {
    /// Create a service for a business.
    async fn create(
        &self,
        business_id: Uuid,
        name: String,
        price_cents: i64,
        duration_minutes: u32,
    ) -> AppResult<ServiceOffering>;

    /// Find a service by ID.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<ServiceOffering>>;

    /// List all services published by a business.
    async fn list_for_business(&self, business_id: Uuid) -> AppResult<Vec<ServiceOffering>>;
}

/// SeaORM-backed implementation of [`ServiceOfferingRepository`].
pub struct ServiceOfferingStore {
    db: DatabaseConnection,
}

impl ServiceOfferingStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ServiceOfferingRepository for ServiceOfferingStore {
    async fn create(
        &self,
        business_id: Uuid,
        name: String,
        price_cents: i64,
        duration_minutes: u32,
    ) -> AppResult<ServiceOffering> {
        let model = ActiveModel {
            id: Set(Uuid::new_v4()),
            business_id: Set(business_id),
            name: Set(name),
            price_cents: Set(price_cents),
            duration_minutes: Set(duration_minutes as i32),
            created_at: Set(chrono::Utc::now()),
        };

        let model = model.insert(&self.db).await.map_err(AppError::from)?;
        Ok(ServiceOffering::from(model))
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<ServiceOffering>> {
        let model = ServiceOfferingEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(model.map(ServiceOffering::from))
    }

    async fn list_for_business(&self, business_id: Uuid) -> AppResult<Vec<ServiceOffering>> {
        let models = ServiceOfferingEntity::find()
            .filter(service_offering::Column::BusinessId.eq(business_id))
            .order_by_asc(service_offering::Column::Name)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(ServiceOffering::from).collect())
    }
}
