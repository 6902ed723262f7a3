//! Business and service-offering entities.

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use super::schedule::WeeklySchedule;

/// A business with a published weekly schedule.
///
/// The schedule is stored as JSON on the business record and decoded
/// through [`WeeklySchedule::normalize`] at the storage boundary, so this
/// struct always holds validated canonical hours.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Business {
    pub id: Uuid,
    pub name: String,
    pub schedule: WeeklySchedule,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A bookable service published by a business.
///
/// `duration_minutes` is authoritative for appointment interval length;
/// booking callers cannot supply their own duration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct ServiceOffering {
    pub id: Uuid,
    pub business_id: Uuid,
    pub name: String,
    pub price_cents: i64,
    pub duration_minutes: u32,
    pub created_at: DateTime<Utc>,
}

/// Business representation returned to clients.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct BusinessResponse {
    pub id: Uuid,
    pub name: String,
    #[schema(value_type = Object)]
    pub schedule: WeeklySchedule,
    pub created_at: DateTime<Utc>,
}

impl From<Business> for BusinessResponse {
    fn from(business: Business) -> Self {
        Self {
            id: business.id,
            name: business.name,
            schedule: business.schedule,
            created_at: business.created_at,
        }
    }
}
