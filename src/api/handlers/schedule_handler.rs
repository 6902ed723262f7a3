//! Business, hours and exception management handlers.

use axum::{
    extract::{Path, Query, State},
    response::Json,
    routing::{get, post, put},
    Router,
};
use chrono::NaiveDate;
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::AppState;
use crate::config::{DEFAULT_PAGE_NUMBER, DEFAULT_PAGE_SIZE};
use crate::domain::{
    AppointmentResponse, BusinessResponse, DayHours, Exception, ExceptionKind, ExceptionReason,
    RawWeeklySchedule, ServiceOffering,
};
use crate::errors::AppResult;
use crate::services::NewException;
use crate::types::{Created, NoContent, Paginated, PaginationParams};

/// Business creation request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateBusinessRequest {
    /// Business display name
    #[validate(length(min = 1, message = "Business name is required"))]
    #[schema(example = "Corner Barbershop")]
    pub name: String,
    /// Weekly hours; omitted days and an omitted field mean closed
    pub hours: Option<RawWeeklySchedule>,
}

/// Service offering creation request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateServiceRequest {
    /// Service display name
    #[validate(length(min = 1, message = "Service name is required"))]
    #[schema(example = "Haircut")]
    pub name: String,
    /// Price in cents
    #[validate(range(min = 0, message = "Price must not be negative"))]
    #[schema(example = 2500)]
    pub price_cents: i64,
    /// Appointment length in minutes
    #[validate(range(
        min = 1,
        max = 480,
        message = "Duration must be between 1 and 480 minutes"
    ))]
    #[schema(example = 30)]
    pub duration_minutes: u32,
}

/// Schedule exception creation request
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateExceptionRequest {
    pub kind: ExceptionKind,
    /// First affected date, `YYYY-MM-DD`
    #[schema(value_type = String, example = "2025-12-24")]
    pub start_date: NaiveDate,
    /// Last affected date, inclusive
    #[schema(value_type = String, example = "2025-12-26")]
    pub end_date: NaiveDate,
    pub reason: ExceptionReason,
    /// Replacement hours, required for `special_hours`
    pub custom_hours: Option<DayHours>,
    #[schema(example = "Christmas break")]
    pub title: String,
    #[serde(default)]
    pub description: String,
}

/// Query parameters for the appointment list
#[derive(Debug, Default, Deserialize)]
pub struct AppointmentListQuery {
    /// Restrict to one date, `YYYY-MM-DD`
    pub date: Option<NaiveDate>,
    pub page: Option<u64>,
    pub per_page: Option<u64>,
}

/// Create business management routes
pub fn business_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_business))
        .route("/:id", get(get_business))
        .route("/:id/hours", put(update_hours))
        .route("/:id/services", post(create_service).get(list_services))
        .route("/:id/exceptions", post(create_exception).get(list_exceptions))
        .route("/:id/exceptions/:exception_id", axum::routing::delete(delete_exception))
        .route("/:id/appointments", get(list_appointments))
}

/// Create a business
#[utoipa::path(
    post,
    path = "/businesses",
    tag = "Businesses",
    request_body = CreateBusinessRequest,
    responses(
        (status = 201, description = "Business created", body = BusinessResponse),
        (status = 422, description = "Invalid name or weekly hours")
    )
)]
pub async fn create_business(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateBusinessRequest>,
) -> AppResult<Created<BusinessResponse>> {
    let business = state
        .schedule_service
        .create_business(payload.name, payload.hours)
        .await?;

    Ok(Created(BusinessResponse::from(business)))
}

/// Get a business with its weekly hours
#[utoipa::path(
    get,
    path = "/businesses/{id}",
    tag = "Businesses",
    params(("id" = Uuid, Path, description = "Business ID")),
    responses(
        (status = 200, description = "Business found", body = BusinessResponse),
        (status = 404, description = "Business not found")
    )
)]
pub async fn get_business(
    State(state): State<AppState>,
    Path(business_id): Path<Uuid>,
) -> AppResult<Json<BusinessResponse>> {
    let business = state.schedule_service.get_business(business_id).await?;
    Ok(Json(BusinessResponse::from(business)))
}

/// Replace a business's weekly hours
#[utoipa::path(
    put,
    path = "/businesses/{id}/hours",
    tag = "Businesses",
    params(("id" = Uuid, Path, description = "Business ID")),
    request_body = RawWeeklySchedule,
    responses(
        (status = 200, description = "Hours updated", body = BusinessResponse),
        (status = 404, description = "Business not found"),
        (status = 422, description = "Invalid weekly hours")
    )
)]
pub async fn update_hours(
    State(state): State<AppState>,
    Path(business_id): Path<Uuid>,
    Json(hours): Json<RawWeeklySchedule>,
) -> AppResult<Json<BusinessResponse>> {
    let business = state
        .schedule_service
        .update_hours(business_id, hours)
        .await?;

    Ok(Json(BusinessResponse::from(business)))
}

/// Create a service offering
#[utoipa::path(
    post,
    path = "/businesses/{id}/services",
    tag = "Businesses",
    params(("id" = Uuid, Path, description = "Business ID")),
    request_body = CreateServiceRequest,
    responses(
        (status = 201, description = "Service created", body = ServiceOffering),
        (status = 404, description = "Business not found"),
        (status = 422, description = "Validation error")
    )
)]
pub async fn create_service(
    State(state): State<AppState>,
    Path(business_id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<CreateServiceRequest>,
) -> AppResult<Created<ServiceOffering>> {
    let service = state
        .schedule_service
        .create_service(
            business_id,
            payload.name,
            payload.price_cents,
            payload.duration_minutes,
        )
        .await?;

    Ok(Created(service))
}

/// List a business's service offerings
#[utoipa::path(
    get,
    path = "/businesses/{id}/services",
    tag = "Businesses",
    params(("id" = Uuid, Path, description = "Business ID")),
    responses(
        (status = 200, description = "Service offerings", body = [ServiceOffering]),
        (status = 404, description = "Business not found")
    )
)]
pub async fn list_services(
    State(state): State<AppState>,
    Path(business_id): Path<Uuid>,
) -> AppResult<Json<Vec<ServiceOffering>>> {
    let services = state.schedule_service.list_services(business_id).await?;
    Ok(Json(services))
}

/// Create a schedule exception
#[utoipa::path(
    post,
    path = "/businesses/{id}/exceptions",
    tag = "Exceptions",
    params(("id" = Uuid, Path, description = "Business ID")),
    request_body = CreateExceptionRequest,
    responses(
        (status = 201, description = "Exception created", body = Exception),
        (status = 404, description = "Business not found"),
        (status = 422, description = "Invalid exception")
    )
)]
pub async fn create_exception(
    State(state): State<AppState>,
    Path(business_id): Path<Uuid>,
    Json(payload): Json<CreateExceptionRequest>,
) -> AppResult<Created<Exception>> {
    let exception = state
        .schedule_service
        .create_exception(NewException {
            business_id,
            kind: payload.kind,
            start_date: payload.start_date,
            end_date: payload.end_date,
            reason: payload.reason,
            custom_hours: payload.custom_hours,
            title: payload.title,
            description: payload.description,
        })
        .await?;

    Ok(Created(exception))
}

/// List a business's schedule exceptions
#[utoipa::path(
    get,
    path = "/businesses/{id}/exceptions",
    tag = "Exceptions",
    params(("id" = Uuid, Path, description = "Business ID")),
    responses(
        (status = 200, description = "Exceptions ordered by start date", body = [Exception]),
        (status = 404, description = "Business not found")
    )
)]
pub async fn list_exceptions(
    State(state): State<AppState>,
    Path(business_id): Path<Uuid>,
) -> AppResult<Json<Vec<Exception>>> {
    let exceptions = state.schedule_service.list_exceptions(business_id).await?;
    Ok(Json(exceptions))
}

/// Delete a schedule exception
#[utoipa::path(
    delete,
    path = "/businesses/{id}/exceptions/{exception_id}",
    tag = "Exceptions",
    params(
        ("id" = Uuid, Path, description = "Business ID"),
        ("exception_id" = Uuid, Path, description = "Exception ID")
    ),
    responses(
        (status = 204, description = "Exception deleted"),
        (status = 404, description = "Exception not found")
    )
)]
pub async fn delete_exception(
    State(state): State<AppState>,
    Path((business_id, exception_id)): Path<(Uuid, Uuid)>,
) -> AppResult<NoContent> {
    state
        .schedule_service
        .delete_exception(business_id, exception_id)
        .await?;

    Ok(NoContent)
}

/// List a business's appointments
#[utoipa::path(
    get,
    path = "/businesses/{id}/appointments",
    tag = "Appointments",
    params(
        ("id" = Uuid, Path, description = "Business ID"),
        ("date" = Option<String>, Query, description = "Restrict to one date, YYYY-MM-DD"),
        ("page" = Option<u64>, Query, description = "Page number, 1-indexed"),
        ("per_page" = Option<u64>, Query, description = "Items per page, capped at 100")
    ),
    responses(
        (status = 200, description = "Appointments page"),
        (status = 404, description = "Business not found")
    )
)]
pub async fn list_appointments(
    State(state): State<AppState>,
    Path(business_id): Path<Uuid>,
    Query(query): Query<AppointmentListQuery>,
) -> AppResult<Json<Paginated<AppointmentResponse>>> {
    let pagination = PaginationParams {
        page: query.page.unwrap_or(DEFAULT_PAGE_NUMBER),
        per_page: query.per_page.unwrap_or(DEFAULT_PAGE_SIZE),
    };
    let page = pagination.page;
    let per_page = pagination.limit();
    let (appointments, total) = state
        .schedule_service
        .list_appointments(business_id, query.date, pagination)
        .await?;

    let data = appointments
        .into_iter()
        .map(AppointmentResponse::from)
        .collect();

    Ok(Json(Paginated::new(data, page, per_page, total)))
}
