//! Appointment table entity.

use sea_orm::entity::prelude::*;

use crate::domain::{Appointment, AppointmentStatus, CustomerInfo};
use crate::errors::AppError;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "appointments")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub business_id: Uuid,
    pub service_id: Uuid,
    pub date: Date,
    pub start_time: Time,
    pub duration_minutes: i32,
    pub status: String,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: Option<String>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl TryFrom<Model> for Appointment {
    type Error = AppError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        let status = AppointmentStatus::parse(&model.status).ok_or_else(|| {
            AppError::internal(format!("unknown appointment status {:?}", model.status))
        })?;

        Ok(Appointment {
            id: model.id,
            business_id: model.business_id,
            service_id: model.service_id,
            date: model.date,
            start_time: model.start_time,
            duration_minutes: model.duration_minutes.max(0) as u32,
            status,
            customer: CustomerInfo {
                name: model.customer_name,
                email: model.customer_email,
                phone: model.customer_phone,
            },
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}
