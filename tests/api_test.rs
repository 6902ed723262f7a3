//! Integration tests for API surface types.
//!
//! Exercises response wrappers, error-to-status mapping and request
//! payload parsing without requiring a database connection.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use chrono::NaiveDate;
use serde_json::json;
use uuid::Uuid;

use slotbook::api::handlers::booking_handler::BookAppointmentRequest;
use slotbook::api::handlers::schedule_handler::{CreateBusinessRequest, CreateExceptionRequest};
use slotbook::domain::{ExceptionKind, ExceptionReason, WeeklySchedule};
use slotbook::errors::AppError;
use slotbook::types::{ApiResponse, Created, NoContent, Paginated};

// =============================================================================
// Response wrapper tests
// =============================================================================

#[tokio::test]
async fn test_api_response_structure() {
    let response: ApiResponse<String> = ApiResponse::success("test data".to_string());
    assert!(response.success);
    assert_eq!(response.data.unwrap(), "test data");
    assert!(response.message.is_none());
}

#[tokio::test]
async fn test_api_response_with_message() {
    let response: ApiResponse<i32> = ApiResponse::with_message(42, "Operation completed");
    assert!(response.success);
    assert_eq!(response.data.unwrap(), 42);
    assert_eq!(response.message.unwrap(), "Operation completed");
}

#[tokio::test]
async fn test_created_maps_to_201() {
    let response = Created("booked".to_string()).into_response();
    assert_eq!(response.status(), StatusCode::CREATED);
}

#[tokio::test]
async fn test_no_content_maps_to_204() {
    let response = NoContent.into_response();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_paginated_meta() {
    let page: Paginated<u32> = Paginated::new(vec![1, 2, 3], 2, 3, 7);
    assert_eq!(page.meta.page, 2);
    assert_eq!(page.meta.per_page, 3);
    assert_eq!(page.meta.total, 7);
    assert_eq!(page.meta.total_pages, 3);
}

// =============================================================================
// Error mapping tests
// =============================================================================

#[tokio::test]
async fn test_not_found_maps_to_404() {
    let response = AppError::NotFound.into_response();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_slot_taken_maps_to_409() {
    let response = AppError::SlotTaken {
        conflicting_id: Uuid::new_v4(),
    }
    .into_response();
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_business_closed_maps_to_409() {
    let response = AppError::BusinessClosed {
        reason: Some("Christmas break".to_string()),
        next_open: Some("Monday at 09:00".to_string()),
    }
    .into_response();
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_invalid_schedule_maps_to_422() {
    let raw = serde_json::from_value(json!({
        "monday": "09:00-08:00",
        "tuesday": "closed",
        "wednesday": "closed",
        "thursday": "closed",
        "friday": "closed",
        "saturday": "closed",
        "sunday": "closed"
    }))
    .unwrap();
    let err = WeeklySchedule::normalize(raw).unwrap_err();

    let response = AppError::from(err).into_response();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_validation_maps_to_400() {
    let response = AppError::validation("start_time must be HH:MM").into_response();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// =============================================================================
// Request payload parsing tests
// =============================================================================

#[tokio::test]
async fn test_book_request_parses() {
    let request: BookAppointmentRequest = serde_json::from_value(json!({
        "business_id": Uuid::new_v4(),
        "service_id": Uuid::new_v4(),
        "date": "2030-06-03",
        "start_time": "10:00",
        "customer_name": "Ada Lovelace",
        "customer_email": "ada@example.com"
    }))
    .unwrap();

    assert_eq!(request.date, NaiveDate::from_ymd_opt(2030, 6, 3).unwrap());
    assert_eq!(request.start_time, "10:00");
    assert!(request.customer_phone.is_none());
}

#[tokio::test]
async fn test_create_business_request_accepts_legacy_hours() {
    let request: CreateBusinessRequest = serde_json::from_value(json!({
        "name": "Corner Barbershop",
        "hours": {
            "monday": "09:00-17:00",
            "tuesday": "09:00-17:00",
            "wednesday": "09:00-17:00",
            "thursday": "09:00-17:00",
            "friday": "09:00-17:00",
            "saturday": "10:00-14:00",
            "sunday": "closed"
        }
    }))
    .unwrap();

    let schedule = WeeklySchedule::normalize(request.hours.unwrap()).unwrap();
    assert!(schedule.monday.is_open);
    assert!(!schedule.sunday.is_open);
    assert_eq!(
        schedule.saturday.open,
        chrono::NaiveTime::from_hms_opt(10, 0, 0).unwrap()
    );
}

#[tokio::test]
async fn test_create_exception_request_defaults_description() {
    let request: CreateExceptionRequest = serde_json::from_value(json!({
        "kind": "closure",
        "start_date": "2030-12-24",
        "end_date": "2030-12-26",
        "reason": "holiday",
        "title": "Christmas break"
    }))
    .unwrap();

    assert_eq!(request.kind, ExceptionKind::Closure);
    assert_eq!(request.reason, ExceptionReason::Holiday);
    assert!(request.description.is_empty());
    assert!(request.custom_hours.is_none());
}
