//! Repository layer - Data access abstraction
//!
//! Repositories provide an abstraction over data persistence,
//! following the Repository pattern for clean separation of concerns.

mod appointment_repository;
mod business_repository;
pub(crate) mod entities;
mod exception_repository;
mod service_offering_repository;

pub use appointment_repository::{AppointmentRepository, AppointmentStore};
pub use business_repository::{BusinessRepository, BusinessStore};
pub use exception_repository::{ExceptionRepository, ExceptionStore};
pub use service_offering_repository::{ServiceOfferingRepository, ServiceOfferingStore};

// Export mocks for tests (both unit and integration)
#[cfg(any(test, feature = "test-utils"))]
pub use appointment_repository::MockAppointmentRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use business_repository::MockBusinessRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use exception_repository::MockExceptionRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use service_offering_repository::MockServiceOfferingRepository;
