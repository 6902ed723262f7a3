//! Availability handlers - day grid, month grid and open-now.

use axum::{
    extract::{Path, Query, State},
    response::Json,
    routing::get,
    Router,
};
use chrono::NaiveDate;
use serde::Deserialize;
use utoipa::IntoParams;
use uuid::Uuid;

use crate::api::AppState;
use crate::config::{
    DEFAULT_SLOT_GRANULARITY_MINUTES, MAX_SLOT_GRANULARITY_MINUTES, MIN_SLOT_GRANULARITY_MINUTES,
};
use crate::domain::OpenStatus;
use crate::errors::{AppError, AppResult};
use crate::services::{DayAvailability, MonthDay};

/// Query parameters for the day availability grid
#[derive(Debug, Deserialize, IntoParams)]
pub struct DayAvailabilityQuery {
    /// Service whose duration sizes the slots
    pub service_id: Uuid,
    /// Date to query, `YYYY-MM-DD`
    pub date: NaiveDate,
    /// Slot step in minutes, defaults to 30
    pub granularity: Option<u32>,
}

/// Query parameters for the month availability grid
#[derive(Debug, Deserialize, IntoParams)]
pub struct MonthAvailabilityQuery {
    /// Service whose duration sizes the slots
    pub service_id: Uuid,
    pub year: i32,
    /// Calendar month, 1-12
    pub month: u32,
    /// Slot step in minutes, defaults to 30
    pub granularity: Option<u32>,
}

/// Create availability routes (nested under /businesses)
pub fn availability_routes() -> Router<AppState> {
    Router::new()
        .route("/:id/availability", get(day_availability))
        .route("/:id/availability/month", get(month_availability))
        .route("/:id/open-now", get(open_now))
}

/// Resolve the slot step, rejecting values outside the supported range.
fn check_granularity(granularity: Option<u32>) -> AppResult<u32> {
    let granularity = granularity.unwrap_or(DEFAULT_SLOT_GRANULARITY_MINUTES);
    if !(MIN_SLOT_GRANULARITY_MINUTES..=MAX_SLOT_GRANULARITY_MINUTES).contains(&granularity) {
        return Err(AppError::validation(format!(
            "granularity must be between {} and {} minutes",
            MIN_SLOT_GRANULARITY_MINUTES, MAX_SLOT_GRANULARITY_MINUTES
        )));
    }
    Ok(granularity)
}

/// Bookable slots for a business, service and date
#[utoipa::path(
    get,
    path = "/businesses/{id}/availability",
    tag = "Availability",
    params(
        ("id" = Uuid, Path, description = "Business ID"),
        DayAvailabilityQuery
    ),
    responses(
        (status = 200, description = "Availability for the date", body = DayAvailability),
        (status = 404, description = "Business or service not found")
    )
)]
pub async fn day_availability(
    State(state): State<AppState>,
    Path(business_id): Path<Uuid>,
    Query(query): Query<DayAvailabilityQuery>,
) -> AppResult<Json<DayAvailability>> {
    let granularity = check_granularity(query.granularity)?;
    let availability = state
        .availability_service
        .day_availability(business_id, query.service_id, query.date, granularity)
        .await?;

    Ok(Json(availability))
}

/// Per-date availability summary for a calendar month
#[utoipa::path(
    get,
    path = "/businesses/{id}/availability/month",
    tag = "Availability",
    params(
        ("id" = Uuid, Path, description = "Business ID"),
        MonthAvailabilityQuery
    ),
    responses(
        (status = 200, description = "Month availability grid", body = [MonthDay]),
        (status = 400, description = "Invalid year or month"),
        (status = 404, description = "Business or service not found")
    )
)]
pub async fn month_availability(
    State(state): State<AppState>,
    Path(business_id): Path<Uuid>,
    Query(query): Query<MonthAvailabilityQuery>,
) -> AppResult<Json<Vec<MonthDay>>> {
    let granularity = check_granularity(query.granularity)?;
    let days = state
        .availability_service
        .month_availability(
            business_id,
            query.service_id,
            query.year,
            query.month,
            granularity,
        )
        .await?;

    Ok(Json(days))
}

/// Whether the business is open right now
#[utoipa::path(
    get,
    path = "/businesses/{id}/open-now",
    tag = "Availability",
    params(("id" = Uuid, Path, description = "Business ID")),
    responses(
        (status = 200, description = "Current open status", body = OpenStatus),
        (status = 404, description = "Business not found")
    )
)]
pub async fn open_now(
    State(state): State<AppState>,
    Path(business_id): Path<Uuid>,
) -> AppResult<Json<OpenStatus>> {
    let status = state.availability_service.open_now(business_id).await?;
    Ok(Json(status))
}
