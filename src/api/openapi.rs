//! OpenAPI documentation configuration.
//!
//! Provides Swagger UI for API exploration and testing.

use utoipa::OpenApi;

use crate::api::handlers::{availability_handler, booking_handler, schedule_handler};
use crate::domain::{
    AppointmentResponse, AppointmentStatus, BusinessResponse, CustomerInfo, DayHours, Exception,
    ExceptionKind, ExceptionReason, FieldError, RawWeeklySchedule, ServiceOffering, WeeklySchedule,
};
use crate::domain::{OpenStatus, RawDayHours};
use crate::services::{DayAvailability, MonthDay, SlotTimes};

/// OpenAPI documentation for the Slotbook scheduling API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Slotbook",
        version = "0.1.0",
        description = "Availability and booking engine for appointment scheduling",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "http://localhost:3000", description = "Local development server")
    ),
    paths(
        // Business management
        schedule_handler::create_business,
        schedule_handler::get_business,
        schedule_handler::update_hours,
        schedule_handler::create_service,
        schedule_handler::list_services,
        schedule_handler::create_exception,
        schedule_handler::list_exceptions,
        schedule_handler::delete_exception,
        schedule_handler::list_appointments,
        // Availability
        availability_handler::day_availability,
        availability_handler::month_availability,
        availability_handler::open_now,
        // Appointments
        booking_handler::book_appointment,
        booking_handler::cancel_appointment,
        booking_handler::complete_appointment,
    ),
    components(
        schemas(
            // Domain types
            DayHours,
            WeeklySchedule,
            RawWeeklySchedule,
            RawDayHours,
            Exception,
            ExceptionKind,
            ExceptionReason,
            FieldError,
            AppointmentStatus,
            CustomerInfo,
            AppointmentResponse,
            BusinessResponse,
            ServiceOffering,
            OpenStatus,
            // Availability types
            SlotTimes,
            DayAvailability,
            MonthDay,
            // Request types
            schedule_handler::CreateBusinessRequest,
            schedule_handler::CreateServiceRequest,
            schedule_handler::CreateExceptionRequest,
            booking_handler::BookAppointmentRequest,
        )
    ),
    tags(
        (name = "Businesses", description = "Business and schedule management"),
        (name = "Exceptions", description = "Date-range schedule overrides"),
        (name = "Availability", description = "Slot and open-now queries"),
        (name = "Appointments", description = "Booking and appointment lifecycle")
    )
)]
pub struct ApiDoc;
