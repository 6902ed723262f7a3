//! Business table entity.

use sea_orm::entity::prelude::*;

use crate::domain::{Business, RawWeeklySchedule, WeeklySchedule};
use crate::errors::AppError;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "businesses")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    /// Weekly hours as stored JSON; canonical or legacy per-day encoding.
    pub weekly_hours: Json,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl TryFrom<Model> for Business {
    type Error = AppError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        let raw: RawWeeklySchedule = serde_json::from_value(model.weekly_hours)
            .map_err(|e| AppError::internal(format!("stored weekly hours unreadable: {}", e)))?;
        let schedule = WeeklySchedule::normalize(raw)?;

        Ok(Business {
            id: model.id,
            name: model.name,
            schedule,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}
