//! Unit of Work pattern implementation.
//!
//! Centralizes repository access and transaction lifecycle. The booking
//! write path runs its conflict re-check and insert inside one
//! serializable transaction obtained here; that transaction is the only
//! way the appointment store is ever mutated.

use async_trait::async_trait;
use chrono::NaiveDate;
use sea_orm::{
    AccessMode, ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction,
    EntityTrait, IsolationLevel, QueryFilter, QueryOrder, Set, TransactionTrait,
};
use std::sync::Arc;
use uuid::Uuid;

use super::repositories::entities::appointment::{self, ActiveModel, Entity as AppointmentEntity};
use super::repositories::{
    AppointmentRepository, AppointmentStore, BusinessRepository, BusinessStore,
    ExceptionRepository, ExceptionStore, ServiceOfferingRepository, ServiceOfferingStore,
};
use crate::domain::{Appointment, AppointmentStatus, NewAppointment};
use crate::errors::{AppError, AppResult};

/// Transactional access to the appointment store.
///
/// Implemented by the SeaORM transaction repository in production and by
/// in-memory fakes in tests, so the commit-time re-check logic in the
/// booking service is exercised against both.
#[async_trait]
pub trait AppointmentTx: Send + Sync {
    /// Non-cancelled appointments for a business on one date, as seen by
    /// this transaction.
    async fn find_active_for_date(
        &self,
        business_id: Uuid,
        date: NaiveDate,
    ) -> AppResult<Vec<Appointment>>;

    /// Insert a new appointment.
    async fn insert(&self, appointment: NewAppointment) -> AppResult<Appointment>;

    /// Find an appointment by ID.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Appointment>>;

    /// Update an appointment's status.
    async fn set_status(&self, id: Uuid, status: AppointmentStatus) -> AppResult<Appointment>;
}

/// Repository access within a transaction.
pub struct TransactionContext<'a> {
    appointments: &'a dyn AppointmentTx,
}

impl<'a> TransactionContext<'a> {
    /// Create a context over any transactional appointment store.
    pub fn new(appointments: &'a dyn AppointmentTx) -> Self {
        Self { appointments }
    }

    /// Appointment store scoped to this transaction.
    pub fn appointments(&self) -> &dyn AppointmentTx {
        self.appointments
    }
}

/// Unit of Work trait for dependency injection.
#[async_trait]
pub trait UnitOfWork: Send + Sync {
    /// Get business repository
    fn businesses(&self) -> Arc<dyn BusinessRepository>;

    /// Get service offering repository
    fn services(&self) -> Arc<dyn ServiceOfferingRepository>;

    /// Get schedule exception repository
    fn exceptions(&self) -> Arc<dyn ExceptionRepository>;

    /// Get appointment repository (read path)
    fn appointments(&self) -> Arc<dyn AppointmentRepository>;

    /// Execute a closure within a transaction.
    ///
    /// Committed on success, rolled back on error. ReadCommitted isolation.
    async fn transaction<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> std::pin::Pin<
                Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
            > + Send,
        T: Send;

    /// Execute a closure within a serializable transaction.
    ///
    /// The booking commit uses this: conflict re-check and insert must be
    /// one atomic unit against the persisted appointment set.
    async fn transaction_serializable<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> std::pin::Pin<
                Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
            > + Send,
        T: Send;
}

/// Concrete implementation of UnitOfWork
pub struct Persistence {
    db: DatabaseConnection,
    business_repo: Arc<BusinessStore>,
    service_repo: Arc<ServiceOfferingStore>,
    exception_repo: Arc<ExceptionStore>,
    appointment_repo: Arc<AppointmentStore>,
}

impl Persistence {
    /// Create new UnitOfWork instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            business_repo: Arc::new(BusinessStore::new(db.clone())),
            service_repo: Arc::new(ServiceOfferingStore::new(db.clone())),
            exception_repo: Arc::new(ExceptionStore::new(db.clone())),
            appointment_repo: Arc::new(AppointmentStore::new(db.clone())),
            db,
        }
    }

    /// Internal transaction execution with configurable isolation level
    async fn execute_transaction<F, T>(&self, isolation: IsolationLevel, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> std::pin::Pin<
                Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
            > + Send,
        T: Send,
    {
        let txn = self
            .db
            .begin_with_config(Some(isolation), Some(AccessMode::ReadWrite))
            .await
            .map_err(AppError::from)?;

        let repo = TxAppointmentRepository::new(&txn);
        let ctx = TransactionContext::new(&repo);

        match f(ctx).await {
            Ok(result) => {
                txn.commit().await.map_err(AppError::from)?;
                Ok(result)
            }
            Err(e) => {
                if let Err(rollback_err) = txn.rollback().await {
                    tracing::error!("Transaction rollback failed: {}", rollback_err);
                }
                Err(e)
            }
        }
    }
}

#[async_trait]
impl UnitOfWork for Persistence {
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

    async fn transaction<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> std::pin::Pin<
                Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
            > + Send,
        T: Send,
    {
        self.execute_transaction(IsolationLevel::ReadCommitted, f).await
    }

    async fn transaction_serializable<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> std::pin::Pin<
                Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
            > + Send,
        T: Send,
    {
        self.execute_transaction(IsolationLevel::Serializable, f).await
    }
}

/// Transaction-aware appointment repository.
///
/// Executes all operations within the provided transaction.
pub struct TxAppointmentRepository<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> TxAppointmentRepository<'a> {
    fn new(txn: &'a DatabaseTransaction) -> Self {
        Self { txn }
    }
}

#[async_trait]
impl AppointmentTx for TxAppointmentRepository<'_> {
    async fn find_active_for_date(
        &self,
        business_id: Uuid,
        date: NaiveDate,
    ) -> AppResult<Vec<Appointment>> {
        let models = AppointmentEntity::find()
            .filter(appointment::Column::BusinessId.eq(business_id))
            .filter(appointment::Column::Date.eq(date))
            .filter(appointment::Column::Status.ne(AppointmentStatus::Cancelled.as_str()))
            .order_by_asc(appointment::Column::StartTime)
            .all(self.txn)
            .await
            .map_err(AppError::from)?;

        models.into_iter().map(Appointment::try_from).collect()
    }

    async fn insert(&self, new: NewAppointment) -> AppResult<Appointment> {
        let now = chrono::Utc::now();
        let model = ActiveModel {
            id: Set(Uuid::new_v4()),
            business_id: Set(new.business_id),
            service_id: Set(new.service_id),
            date: Set(new.date),
            start_time: Set(new.start_time),
            duration_minutes: Set(new.duration_minutes as i32),
            status: Set(new.status.as_str().to_string()),
            customer_name: Set(new.customer.name),
            customer_email: Set(new.customer.email),
            customer_phone: Set(new.customer.phone),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let model = model.insert(self.txn).await.map_err(AppError::from)?;
        Appointment::try_from(model)
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Appointment>> {
        let model = AppointmentEntity::find_by_id(id)
            .one(self.txn)
            .await
            .map_err(AppError::from)?;

        model.map(Appointment::try_from).transpose()
    }

    async fn set_status(&self, id: Uuid, status: AppointmentStatus) -> AppResult<Appointment> {
        let model = AppointmentEntity::find_by_id(id)
            .one(self.txn)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut active: ActiveModel = model.into();
        active.status = Set(status.as_str().to_string());
        active.updated_at = Set(chrono::Utc::now());

        let model = active.update(self.txn).await.map_err(AppError::from)?;
        Appointment::try_from(model)
    }
}
