//! Application services layer - Use cases and business logic.
//!
//! Services orchestrate domain logic and infrastructure to fulfill
//! application use cases. They depend on abstractions (traits) for
//! dependency inversion.
//!
//! All services use Unit of Work pattern for centralized repository
//! access and transaction management.

mod availability_service;
mod booking_service;
pub mod container;
mod schedule_service;

// Service Container
pub use container::{ServiceContainer, Services};

// Service traits and implementations
pub use availability_service::{
    AvailabilityEngine, AvailabilityService, DayAvailability, MonthDay, SlotTimes,
};
pub use booking_service::{BookingManager, BookingRequest, BookingService};
pub use schedule_service::{NewException, ScheduleManager, ScheduleService};

#[cfg(any(test, feature = "test-utils"))]
pub use container::MockServiceContainer;
