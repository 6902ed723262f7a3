//! SeaORM entity definitions
//!
//! These are database-specific entities separate from domain models.
//! Conversions into domain types run the validating decoders for the JSON
//! schedule columns, so malformed storage never leaks downstream.

pub mod appointment;
pub mod business;
pub mod schedule_exception;
pub mod service_offering;

// Re-exports for public API convenience
#[allow(unused_imports)]
pub use appointment::{Entity as AppointmentEntity, Model as AppointmentModel};
#[allow(unused_imports)]
pub use business::{Entity as BusinessEntity, Model as BusinessModel};
#[allow(unused_imports)]
pub use schedule_exception::{Entity as ScheduleExceptionEntity, Model as ScheduleExceptionModel};
#[allow(unused_imports)]
pub use service_offering::{Entity as ServiceOfferingEntity, Model as ServiceOfferingModel};
