//! Schedule exception table entity.

use sea_orm::entity::prelude::*;

use crate::domain::{DayHours, Exception, ExceptionKind, ExceptionReason};
use crate::errors::AppError;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "schedule_exceptions")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub business_id: Uuid,
    pub kind: String,
    pub start_date: Date,
    pub end_date: Date,
    pub reason: String,
    /// Present iff `kind == "special_hours"`.
    pub custom_hours: Option<Json>,
    pub title: String,
    pub description: String,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl TryFrom<Model> for Exception {
    type Error = AppError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        let kind = ExceptionKind::parse(&model.kind)
            .ok_or_else(|| AppError::internal(format!("unknown exception kind {:?}", model.kind)))?;
        let reason = ExceptionReason::parse(&model.reason).ok_or_else(|| {
            AppError::internal(format!("unknown exception reason {:?}", model.reason))
        })?;
        let custom_hours = model
            .custom_hours
            .map(serde_json::from_value::<DayHours>)
            .transpose()
            .map_err(|e| AppError::internal(format!("stored custom hours unreadable: {}", e)))?;

        Ok(Exception {
            id: model.id,
            business_id: model.business_id,
            kind,
            start_date: model.start_date,
            end_date: model.end_date,
            reason,
            custom_hours,
            title: model.title,
            description: model.description,
            created_at: model.created_at,
        })
    }
}
