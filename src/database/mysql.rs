use diesel::{prelude::*, sql_types::Text};

use super::{last_insert_id, ClinicStore, DbConn, DbPool, StoreError};
use crate::models::{
    appointments::{AppointmentFilter, AppointmentRow, BookingRecord, NewAppointment, NewBooking},
    doctors::{DoctorData, DoctorProfile},
    staff::StaffRecord,
};

sql_function!(fn lower(x: Text) -> Text);

/// [`ClinicStore`] backed by a MySQL connection pool.
#[derive(Clone)]
pub struct MysqlStore {
    pool: DbPool,
}

impl MysqlStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn get_db_conn(&self) -> Result<DbConn, StoreError> {
        Ok(self.pool.get()?)
    }
}

impl ClinicStore for MysqlStore {
    fn find_staff(&self, username: &str) -> Result<Option<StaffRecord>, StoreError> {
        use crate::schema::{doctors, staff};

        let conn = self.get_db_conn()?;
        let record = staff::table
            .inner_join(doctors::table.on(staff::doctor_id.eq(doctors::id)))
            .filter(lower(staff::username).eq(lower(username)))
            .select((
                staff::id,
                staff::username,
                staff::password_hash,
                doctors::name,
            ))
            .first::<StaffRecord>(&conn)
            .optional()?;
        Ok(record)
    }

    fn create_booking(&self, booking: &NewBooking) -> Result<BookingRecord, StoreError> {
        use crate::schema::{appointments, departments, doctors, patients};

        let conn = self.get_db_conn()?;
        conn.transaction::<_, StoreError, _>(|| {
            let doctor = doctors::table
                .inner_join(departments::table.on(doctors::department_id.eq(departments::id)))
                .filter(doctors::id.eq(booking.doctor_id))
                .select((
                    doctors::id,
                    doctors::name,
                    doctors::department_id,
                    departments::name,
                ))
                .first::<DoctorProfile>(&conn)
                .optional()?
                .ok_or(StoreError::DoctorNotFound(booking.doctor_id))?;
            if doctor.department_id != booking.department_id {
                return Err(StoreError::DepartmentMismatch {
                    doctor_id: doctor.id,
                    department_id: booking.department_id,
                });
            }

            diesel::insert_into(patients::table)
                .values(&booking.patient)
                .execute(&conn)?;
            let patient_id = diesel::select(last_insert_id).first::<u64>(&conn)?;

            let data = NewAppointment {
                patient_id,
                department_id: booking.department_id,
                doctor_id: doctor.id,
                appointment_date: booking.date,
                time_slot: &booking.time_slot,
                problem: &booking.problem,
            };
            diesel::insert_into(appointments::table)
                .values(&data)
                .execute(&conn)?;
            let appointment_id = diesel::select(last_insert_id).first::<u64>(&conn)?;

            Ok(BookingRecord {
                appointment_id,
                patient_id,
                doctor_name: doctor.name,
                department_name: doctor.department_name,
            })
        })
    }

    fn list_appointments(
        &self,
        filter: &AppointmentFilter,
    ) -> Result<Vec<AppointmentRow>, StoreError> {
        use crate::schema::{appointments, departments, doctors, patients};

        let conn = self.get_db_conn()?;
        let mut query = appointments::table
            .inner_join(patients::table.on(appointments::patient_id.eq(patients::id)))
            .inner_join(departments::table.on(appointments::department_id.eq(departments::id)))
            .inner_join(doctors::table.on(appointments::doctor_id.eq(doctors::id)))
            .select((
                appointments::id,
                appointments::patient_id,
                appointments::appointment_date,
                appointments::time_slot,
                patients::name,
                departments::name,
                doctors::name,
                patients::phone,
                patients::email,
                appointments::problem,
            ))
            .into_boxed();

        if let Some(department_id) = filter.department_id {
            query = query.filter(appointments::department_id.eq(department_id));
        }
        if let Some(range) = filter.dates {
            query = query.filter(appointments::appointment_date.between(range.from, range.to));
        }

        let rows = query
            .order((
                appointments::appointment_date.asc(),
                appointments::time_slot.asc(),
            ))
            .load::<AppointmentRow>(&conn)?;
        Ok(rows)
    }

    fn list_doctors(&self, department_id: u64) -> Result<Vec<DoctorData>, StoreError> {
        use crate::schema::doctors;

        let conn = self.get_db_conn()?;
        let docs = doctors::table
            .filter(doctors::department_id.eq(department_id))
            .order(doctors::name.asc())
            .load::<DoctorData>(&conn)?;
        Ok(docs)
    }
}
