//! HTTP request handlers.

pub mod availability_handler;
pub mod booking_handler;
pub mod schedule_handler;

pub use availability_handler::availability_routes;
pub use booking_handler::appointment_routes;
pub use schedule_handler::business_routes;
