//! Appointment booking handlers.

use axum::{
    extract::{Path, State},
    response::Json,
    routing::post,
    Router,
};
use chrono::NaiveDate;
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::AppState;
use crate::domain::{parse_hhmm, AppointmentResponse, CustomerInfo};
use crate::errors::{AppError, AppResult};
use crate::services::BookingRequest;
use crate::types::Created;

/// Booking request payload
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct BookAppointmentRequest {
    pub business_id: Uuid,
    pub service_id: Uuid,
    /// Appointment date, `YYYY-MM-DD`
    #[schema(value_type = String, example = "2025-08-04")]
    pub date: NaiveDate,
    /// Slot start time, `HH:MM`
    #[schema(example = "10:00")]
    pub start_time: String,
    /// Customer display name
    #[validate(length(min = 1, message = "Customer name is required"))]
    #[schema(example = "Ada Lovelace")]
    pub customer_name: String,
    /// Customer email address
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "ada@example.com")]
    pub customer_email: String,
    /// Optional customer phone number
    pub customer_phone: Option<String>,
}

/// Create appointment routes
pub fn appointment_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(book_appointment))
        .route("/:id/cancel", post(cancel_appointment))
        .route("/:id/complete", post(complete_appointment))
}

/// Book an appointment slot
#[utoipa::path(
    post,
    path = "/appointments",
    tag = "Appointments",
    request_body = BookAppointmentRequest,
    responses(
        (status = 201, description = "Appointment booked", body = AppointmentResponse),
        (status = 404, description = "Business or service not found"),
        (status = 409, description = "Slot already taken or business closed"),
        (status = 422, description = "Validation error")
    )
)]
pub async fn book_appointment(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<BookAppointmentRequest>,
) -> AppResult<Created<AppointmentResponse>> {
    let start_time = parse_hhmm(&payload.start_time)
        .ok_or_else(|| AppError::validation("start_time must be HH:MM"))?;

    let appointment = state
        .booking_service
        .book(BookingRequest {
            business_id: payload.business_id,
            service_id: payload.service_id,
            date: payload.date,
            start_time,
            customer: CustomerInfo {
                name: payload.customer_name,
                email: payload.customer_email,
                phone: payload.customer_phone,
            },
        })
        .await?;

    Ok(Created(AppointmentResponse::from(appointment)))
}

/// Cancel an appointment
#[utoipa::path(
    post,
    path = "/appointments/{id}/cancel",
    tag = "Appointments",
    params(("id" = Uuid, Path, description = "Appointment ID")),
    responses(
        (status = 200, description = "Appointment cancelled", body = AppointmentResponse),
        (status = 404, description = "Appointment not found"),
        (status = 422, description = "Status does not allow cancellation")
    )
)]
pub async fn cancel_appointment(
    State(state): State<AppState>,
    Path(appointment_id): Path<Uuid>,
) -> AppResult<Json<AppointmentResponse>> {
    let appointment = state.booking_service.cancel(appointment_id).await?;
    Ok(Json(AppointmentResponse::from(appointment)))
}

/// Mark an appointment as completed
#[utoipa::path(
    post,
    path = "/appointments/{id}/complete",
    tag = "Appointments",
    params(("id" = Uuid, Path, description = "Appointment ID")),
    responses(
        (status = 200, description = "Appointment completed", body = AppointmentResponse),
        (status = 404, description = "Appointment not found"),
        (status = 422, description = "Status does not allow completion")
    )
)]
pub async fn complete_appointment(
    State(state): State<AppState>,
    Path(appointment_id): Path<Uuid>,
) -> AppResult<Json<AppointmentResponse>> {
    let appointment = state.booking_service.complete(appointment_id).await?;
    Ok(Json(AppointmentResponse::from(appointment)))
}
