mod mysql;

pub use self::mysql::MysqlStore;

use std::sync::Arc;

use actix_web::{error::BlockingError, web};
use anyhow::Context;
use diesel::{r2d2::ConnectionManager, MysqlConnection};
use r2d2::PooledConnection;
use thiserror::Error;

use crate::models::{
    appointments::{AppointmentFilter, AppointmentRow, BookingRecord, NewBooking},
    doctors::DoctorData,
    staff::StaffRecord,
};

pub type DbPool = r2d2::Pool<ConnectionManager<MysqlConnection>>;
pub type DbConn = PooledConnection<ConnectionManager<MysqlConnection>>;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("DB connection: {0}")]
    Pool(#[from] r2d2::Error),
    #[error("DB error: {0}")]
    Database(#[from] diesel::result::Error),
    #[error("doctor {0} does not exist")]
    DoctorNotFound(u64),
    #[error("Doctor {doctor_id} does not work in department {department_id}")]
    DepartmentMismatch { doctor_id: u64, department_id: u64 },
    #[error("blocking DB task was canceled")]
    Canceled,
}

/// Everything the HTTP layer needs from persistent storage.
///
/// Calls block the current thread; handlers go through [`run`] so they land
/// on the blocking thread pool.
pub trait ClinicStore: Send + Sync {
    /// Staff credential whose username matches case-insensitively.
    fn find_staff(&self, username: &str) -> Result<Option<StaffRecord>, StoreError>;

    /// Resolves the doctor and writes patient plus appointment atomically.
    fn create_booking(&self, booking: &NewBooking) -> Result<BookingRecord, StoreError>;

    /// Ordered by appointment date, then time slot.
    fn list_appointments(
        &self,
        filter: &AppointmentFilter,
    ) -> Result<Vec<AppointmentRow>, StoreError>;

    /// Ordered by doctor name.
    fn list_doctors(&self, department_id: u64) -> Result<Vec<DoctorData>, StoreError>;
}

pub type SharedStore = Arc<dyn ClinicStore>;

no_arg_sql_function!(
    last_insert_id,
    diesel::sql_types::Unsigned<diesel::sql_types::Bigint>,
    "MySQL `LAST_INSERT_ID()`: the id generated by the latest insert on this connection."
);

pub fn build_pool(database_url: &str, max_size: u32) -> anyhow::Result<DbPool> {
    let manager = ConnectionManager::<MysqlConnection>::new(database_url);
    r2d2::Pool::builder()
        .max_size(max_size)
        .build(manager)
        .context("Failed to create pool")
}

pub async fn run<F, T>(store: &SharedStore, f: F) -> Result<T, StoreError>
where
    F: FnOnce(&dyn ClinicStore) -> Result<T, StoreError> + Send + 'static,
    T: Send + 'static,
{
    let store = Arc::clone(store);
    web::block(move || f(store.as_ref()))
        .await
        .map_err(|err| match err {
            BlockingError::Error(err) => err,
            BlockingError::Canceled => StoreError::Canceled,
        })
}
