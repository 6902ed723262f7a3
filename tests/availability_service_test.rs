//! Availability service unit tests.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime, Utc, Weekday};
use mockall::predicate::eq;
use uuid::Uuid;

use slotbook::domain::{
    Appointment, AppointmentStatus, Business, CustomerInfo, DayHours, Exception, ExceptionKind,
    ExceptionReason, ServiceOffering, WeeklySchedule,
};
use slotbook::errors::{AppError, AppResult};
use slotbook::infra::repositories::{
    MockAppointmentRepository, MockBusinessRepository, MockExceptionRepository,
    MockServiceOfferingRepository,
};
use slotbook::infra::{
    AppointmentRepository, BusinessRepository, ExceptionRepository, ServiceOfferingRepository,
    TransactionContext, UnitOfWork,
};
use slotbook::services::{AvailabilityEngine, AvailabilityService};

fn time(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

/// Monday-Friday 09:00-17:00, weekend closed.
fn weekday_schedule() -> WeeklySchedule {
    let open = DayHours::open(time(9, 0), time(17, 0));
    WeeklySchedule {
        sunday: DayHours::closed(),
        monday: open,
        tuesday: open,
        wednesday: open,
        thursday: open,
        friday: open,
        saturday: DayHours::closed(),
    }
}

fn test_business(id: Uuid, schedule: WeeklySchedule) -> Business {
    Business {
        id,
        name: "Corner Barbershop".to_string(),
        schedule,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

fn test_service(id: Uuid, business_id: Uuid, duration_minutes: u32) -> ServiceOffering {
    ServiceOffering {
        id,
        business_id,
        name: "Haircut".to_string(),
        price_cents: 2500,
        duration_minutes,
        created_at: Utc::now(),
    }
}

fn test_appointment(
    business_id: Uuid,
    date: NaiveDate,
    start: NaiveTime,
    duration_minutes: u32,
) -> Appointment {
    Appointment {
        id: Uuid::new_v4(),
        business_id,
        service_id: Uuid::new_v4(),
        date,
        start_time: start,
        duration_minutes,
        status: AppointmentStatus::Confirmed,
        customer: CustomerInfo {
            name: "Test Customer".to_string(),
            email: "customer@example.com".to_string(),
            phone: None,
        },
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

/// A far-future date with a known weekday, so the today-filter never
/// interferes with slot expectations.
fn future_date(weekday: Weekday) -> NaiveDate {
    NaiveDate::from_isoywd_opt(2030, 23, weekday).unwrap()
}

/// Test mock for UnitOfWork that wraps mockall repositories
struct TestUnitOfWork {
    business_repo: Arc<MockBusinessRepository>,
    service_repo: Arc<MockServiceOfferingRepository>,
    exception_repo: Arc<MockExceptionRepository>,
    appointment_repo: Arc<MockAppointmentRepository>,
}

impl TestUnitOfWork {
    fn new(
        business_repo: MockBusinessRepository,
        service_repo: MockServiceOfferingRepository,
        exception_repo: MockExceptionRepository,
        appointment_repo: MockAppointmentRepository,
    ) -> Self {
        Self {
            business_repo: Arc::new(business_repo),
            service_repo: Arc::new(service_repo),
            exception_repo: Arc::new(exception_repo),
            appointment_repo: Arc::new(appointment_repo),
        }
    }
}

#[async_trait]
impl UnitOfWork for TestUnitOfWork {
    fn businesses(&self) -> Arc<dyn BusinessRepository> {
        self.business_repo.clone()
    }

    fn services(&self) -> Arc<dyn ServiceOfferingRepository> {
        self.service_repo.clone()
    }

    fn exceptions(&self) -> Arc<dyn ExceptionRepository> {
        self.exception_repo.clone()
    }

    fn appointments(&self) -> Arc<dyn AppointmentRepository> {
        self.appointment_repo.clone()
    }

    async fn transaction<F, T>(&self, _f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> std::pin::Pin<
                Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
            > + Send,
        T: Send,
    {
        // Transaction not supported in test mock
        Err(AppError::internal("Transactions not supported in test mock"))
    }

    async fn transaction_serializable<F, T>(&self, _f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> std::pin::Pin<
                Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
            > + Send,
        T: Send,
    {
        // Transaction not supported in test mock
        Err(AppError::internal("Transactions not supported in test mock"))
    }
}

struct Fixture {
    business_id: Uuid,
    service_id: Uuid,
    business_repo: MockBusinessRepository,
    service_repo: MockServiceOfferingRepository,
    exception_repo: MockExceptionRepository,
    appointment_repo: MockAppointmentRepository,
}

impl Fixture {
    fn new(schedule: WeeklySchedule, duration_minutes: u32) -> Self {
        let business_id = Uuid::new_v4();
        let service_id = Uuid::new_v4();

        let mut business_repo = MockBusinessRepository::new();
        let schedule_clone = schedule.clone();
        business_repo
            .expect_find_by_id()
            .with(eq(business_id))
            .returning(move |id| Ok(Some(test_business(id, schedule_clone.clone()))));

        let mut service_repo = MockServiceOfferingRepository::new();
        let owner = business_id;
        service_repo
            .expect_find_by_id()
            .with(eq(service_id))
            .returning(move |id| Ok(Some(test_service(id, owner, duration_minutes))));

        let mut exception_repo = MockExceptionRepository::new();
        exception_repo
            .expect_list_for_business()
            .returning(|_| Ok(vec![]));

        let mut appointment_repo = MockAppointmentRepository::new();
        appointment_repo
            .expect_find_active_for_date()
            .returning(|_, _| Ok(vec![]));
        appointment_repo
            .expect_find_active_in_range()
            .returning(|_, _, _| Ok(vec![]));

        Self {
            business_id,
            service_id,
            business_repo,
            service_repo,
            exception_repo,
            appointment_repo,
        }
    }

    fn into_service(self) -> AvailabilityEngine<TestUnitOfWork> {
        AvailabilityEngine::new(Arc::new(TestUnitOfWork::new(
            self.business_repo,
            self.service_repo,
            self.exception_repo,
            self.appointment_repo,
        )))
    }
}

#[tokio::test]
async fn test_day_availability_full_open_day() {
    let fixture = Fixture::new(weekday_schedule(), 30);
    let (business_id, service_id) = (fixture.business_id, fixture.service_id);
    let service = fixture.into_service();

    let result = service
        .day_availability(business_id, service_id, future_date(Weekday::Mon), 30)
        .await
        .unwrap();

    assert!(result.open);
    // 09:00 through 16:30, 30-minute steps
    assert_eq!(result.slots.len(), 16);
    assert_eq!(result.slots[0].start_time, "09:00");
    assert_eq!(result.slots[0].end_time, "09:30");
    assert_eq!(result.slots[15].start_time, "16:30");
    assert_eq!(result.slots[15].end_time, "17:00");
    assert!(result.reason.is_none());
}

#[tokio::test]
async fn test_day_availability_past_date_has_no_slots() {
    let fixture = Fixture::new(weekday_schedule(), 30);
    let (business_id, service_id) = (fixture.business_id, fixture.service_id);
    let service = fixture.into_service();

    // A Monday well in the past; booking would reject every slot on it
    let date = NaiveDate::from_isoywd_opt(2020, 2, Weekday::Mon).unwrap();
    let result = service
        .day_availability(business_id, service_id, date, 30)
        .await
        .unwrap();

    assert!(result.slots.is_empty());
}

#[tokio::test]
async fn test_day_availability_closed_weekday() {
    let fixture = Fixture::new(weekday_schedule(), 30);
    let (business_id, service_id) = (fixture.business_id, fixture.service_id);
    let service = fixture.into_service();

    let result = service
        .day_availability(business_id, service_id, future_date(Weekday::Sun), 30)
        .await
        .unwrap();

    assert!(!result.open);
    assert!(result.slots.is_empty());
}

#[tokio::test]
async fn test_day_availability_closure_exception_wins() {
    let mut fixture = Fixture::new(weekday_schedule(), 30);
    let date = future_date(Weekday::Mon);

    let business_id = fixture.business_id;
    fixture.exception_repo = MockExceptionRepository::new();
    fixture
        .exception_repo
        .expect_list_for_business()
        .returning(move |_| {
            Ok(vec![Exception {
                id: Uuid::new_v4(),
                business_id,
                kind: ExceptionKind::Closure,
                start_date: future_date(Weekday::Mon),
                end_date: future_date(Weekday::Fri),
                reason: ExceptionReason::Vacation,
                custom_hours: None,
                title: "Summer break".to_string(),
                description: String::new(),
                created_at: Utc::now(),
            }])
        });

    let service_id = fixture.service_id;
    let service = fixture.into_service();

    let result = service
        .day_availability(business_id, service_id, date, 30)
        .await
        .unwrap();

    assert!(!result.open);
    assert!(result.slots.is_empty());
    assert_eq!(result.reason.as_deref(), Some("Summer break"));
}

#[tokio::test]
async fn test_day_availability_booked_slots_removed() {
    let mut fixture = Fixture::new(weekday_schedule(), 30);
    let date = future_date(Weekday::Mon);
    let business_id = fixture.business_id;

    fixture.appointment_repo = MockAppointmentRepository::new();
    fixture
        .appointment_repo
        .expect_find_active_for_date()
        .returning(move |_, date| {
            // A one-hour appointment at 10:00 removes the 10:00 and 10:30 slots
            Ok(vec![test_appointment(business_id, date, time(10, 0), 60)])
        });

    let service_id = fixture.service_id;
    let service = fixture.into_service();

    let result = service
        .day_availability(business_id, service_id, date, 30)
        .await
        .unwrap();

    assert_eq!(result.slots.len(), 14);
    assert!(!result.slots.iter().any(|s| s.start_time == "10:00"));
    assert!(!result.slots.iter().any(|s| s.start_time == "10:30"));
    assert!(result.slots.iter().any(|s| s.start_time == "11:00"));
    // Slot ending exactly at 10:00 survives: intervals are half-open
    assert!(result.slots.iter().any(|s| s.start_time == "09:30"));
}

#[tokio::test]
async fn test_day_availability_unknown_business() {
    let mut business_repo = MockBusinessRepository::new();
    business_repo.expect_find_by_id().returning(|_| Ok(None));

    let uow = TestUnitOfWork::new(
        business_repo,
        MockServiceOfferingRepository::new(),
        MockExceptionRepository::new(),
        MockAppointmentRepository::new(),
    );
    let service = AvailabilityEngine::new(Arc::new(uow));

    let result = service
        .day_availability(Uuid::new_v4(), Uuid::new_v4(), future_date(Weekday::Mon), 30)
        .await;

    assert!(matches!(result.unwrap_err(), AppError::NotFound));
}

#[tokio::test]
async fn test_day_availability_service_of_other_business() {
    let fixture = Fixture::new(weekday_schedule(), 30);
    let business_id = fixture.business_id;

    let mut service_repo = MockServiceOfferingRepository::new();
    service_repo.expect_find_by_id().returning(|id| {
        // Service exists but belongs to a different business
        Ok(Some(test_service(id, Uuid::new_v4(), 30)))
    });

    let uow = TestUnitOfWork::new(
        fixture.business_repo,
        service_repo,
        fixture.exception_repo,
        fixture.appointment_repo,
    );
    let service = AvailabilityEngine::new(Arc::new(uow));

    let result = service
        .day_availability(business_id, Uuid::new_v4(), future_date(Weekday::Mon), 30)
        .await;

    assert!(matches!(result.unwrap_err(), AppError::NotFound));
}

#[tokio::test]
async fn test_month_availability_covers_every_day() {
    let fixture = Fixture::new(weekday_schedule(), 30);
    let (business_id, service_id) = (fixture.business_id, fixture.service_id);
    let service = fixture.into_service();

    let days = service
        .month_availability(business_id, service_id, 2030, 6, 30)
        .await
        .unwrap();

    assert_eq!(days.len(), 30);
    assert_eq!(days[0].date, NaiveDate::from_ymd_opt(2030, 6, 1).unwrap());
    assert_eq!(days[29].date, NaiveDate::from_ymd_opt(2030, 6, 30).unwrap());

    for day in &days {
        let weekday = chrono::Datelike::weekday(&day.date);
        if weekday == Weekday::Sat || weekday == Weekday::Sun {
            assert!(!day.open, "{} should be closed", day.date);
            assert_eq!(day.slot_count, 0);
        } else {
            assert!(day.open, "{} should be open", day.date);
            assert_eq!(day.slot_count, 16);
        }
    }
}

#[tokio::test]
async fn test_month_availability_rejects_invalid_month() {
    let fixture = Fixture::new(weekday_schedule(), 30);
    let (business_id, service_id) = (fixture.business_id, fixture.service_id);
    let service = fixture.into_service();

    let result = service
        .month_availability(business_id, service_id, 2030, 13, 30)
        .await;

    assert!(result.is_err());
}

#[tokio::test]
async fn test_open_now_unknown_business() {
    let mut business_repo = MockBusinessRepository::new();
    business_repo.expect_find_by_id().returning(|_| Ok(None));

    let uow = TestUnitOfWork::new(
        business_repo,
        MockServiceOfferingRepository::new(),
        MockExceptionRepository::new(),
        MockAppointmentRepository::new(),
    );
    let service = AvailabilityEngine::new(Arc::new(uow));

    let result = service.open_now(Uuid::new_v4()).await;
    assert!(matches!(result.unwrap_err(), AppError::NotFound));
}
