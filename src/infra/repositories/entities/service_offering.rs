//! Service offering table entity.

use sea_orm::entity::prelude::*;

use crate::domain::ServiceOffering;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "service_offerings")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub business_id: Uuid,
    pub name: String,
    pub price_cents: i64,
    pub duration_minutes: i32,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for ServiceOffering {
    fn from(model: Model) -> Self {
        ServiceOffering {
            id: model.id,
            business_id: model.business_id,
            name: model.name,
            price_cents: model.price_cents,
            duration_minutes: model.duration_minutes.max(0) as u32,
            created_at: model.created_at,
        }
    }
}
