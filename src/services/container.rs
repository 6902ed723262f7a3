//! Service container - centralized service access.

use std::sync::Arc;

use super::{AvailabilityService, BookingService, ScheduleService};
use crate::infra::Persistence;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Service container trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
pub trait ServiceContainer: Send + Sync {
    /// Get availability service
    fn availability(&self) -> Arc<dyn AvailabilityService>;

    /// Get booking service
    fn booking(&self) -> Arc<dyn BookingService>;

    /// Get schedule management service
    fn schedule(&self) -> Arc<dyn ScheduleService>;
}

/// Concrete implementation of ServiceContainer
pub struct Services {
    availability_service: Arc<dyn AvailabilityService>,
    booking_service: Arc<dyn BookingService>,
    schedule_service: Arc<dyn ScheduleService>,
}

impl Services {
    /// Create a new service container with all services initialized
    pub fn new(
        availability_service: Arc<dyn AvailabilityService>,
        booking_service: Arc<dyn BookingService>,
        schedule_service: Arc<dyn ScheduleService>,
    ) -> Self {
        Self {
            availability_service,
            booking_service,
            schedule_service,
        }
    }

    /// Create service container from a database connection
    pub fn from_connection(db: sea_orm::DatabaseConnection) -> Self {
        use super::{AvailabilityEngine, BookingManager, ScheduleManager};

        let uow = Arc::new(Persistence::new(db));
        let availability_service = Arc::new(AvailabilityEngine::new(uow.clone()));
        let booking_service = Arc::new(BookingManager::new(uow.clone()));
        let schedule_service = Arc::new(ScheduleManager::new(uow));

        Self {
            availability_service,
            booking_service,
            schedule_service,
        }
    }
}

impl ServiceContainer for Services {
    fn availability(&self) -> Arc<dyn AvailabilityService> {
        self.availability_service.clone()
    }

    fn booking(&self) -> Arc<dyn BookingService> {
        self.booking_service.clone()
    }

    fn schedule(&self) -> Arc<dyn ScheduleService> {
        self.schedule_service.clone()
    }
}
