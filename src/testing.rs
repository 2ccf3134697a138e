//! In-memory doubles for the store and the notifier.

use std::{path::PathBuf, sync::Arc, sync::Mutex};

use anyhow::bail;
use chrono::NaiveDate;

use crate::{
    auth::{password, token::TokenSigner},
    database::{ClinicStore, StoreError},
    models::{
        appointments::{AppointmentFilter, AppointmentRow, BookingRecord, NewBooking},
        doctors::DoctorData,
        patients::NewPatient,
        staff::StaffRecord,
    },
    notify::{Confirmation, Delivery, Notifier},
    AppContext,
};

pub const TEST_SECRET: &str = "test-secret-test-secret-test-secret!";

struct StoredAppointment {
    id: u64,
    patient_id: u64,
    department_id: u64,
    doctor_id: u64,
    date: NaiveDate,
    time_slot: String,
    problem: String,
}

#[derive(Default)]
struct State {
    departments: Vec<(u64, String)>,
    doctors: Vec<DoctorData>,
    staff: Vec<(u64, String, String, u64)>,
    patients: Vec<(u64, NewPatient)>,
    appointments: Vec<StoredAppointment>,
    fail_writes: bool,
}

#[derive(Default)]
pub struct MemoryStore {
    state: Mutex<State>,
}

impl MemoryStore {
    /// Departments 1 and 2 with doctors 3, 7 and 8; department 5 has none.
    /// Staff `drrao` (doctor 7) has password `molar-42`.
    pub fn seeded() -> Self {
        let store = Self::default();
        store.add_department(1, "General Dentistry");
        store.add_department(2, "Endodontics");
        store.add_department(5, "Pediatric Dentistry");
        store.add_doctor(3, "Dr. Okafor", 1);
        store.add_doctor(7, "Dr. Rao", 2);
        store.add_doctor(8, "Dr. Lindqvist", 2);
        store.add_staff(1, "drrao", "molar-42", 7);
        store
    }

    pub fn add_department(&self, id: u64, name: &str) {
        self.lock().departments.push((id, name.to_string()));
    }

    pub fn add_doctor(&self, id: u64, name: &str, department_id: u64) {
        self.lock().doctors.push(DoctorData {
            id,
            name: name.to_string(),
            department_id,
        });
    }

    pub fn add_staff(&self, id: u64, username: &str, password: &str, doctor_id: u64) {
        let hash = password::hash_password(password).unwrap();
        self.lock()
            .staff
            .push((id, username.to_string(), hash, doctor_id));
    }

    pub fn fail_writes(&self) {
        self.lock().fail_writes = true;
    }

    pub fn patient_count(&self) -> usize {
        self.lock().patients.len()
    }

    pub fn appointment_count(&self) -> usize {
        self.lock().appointments.len()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, State> {
        self.state.lock().unwrap()
    }
}

fn department_name(state: &State, id: u64) -> String {
    state
        .departments
        .iter()
        .find(|(did, _)| *did == id)
        .map(|(_, name)| name.clone())
        .unwrap_or_default()
}

impl ClinicStore for MemoryStore {
    fn find_staff(&self, username: &str) -> Result<Option<StaffRecord>, StoreError> {
        let state = self.lock();
        let record = state
            .staff
            .iter()
            .find(|(_, name, _, _)| name.to_lowercase() == username.to_lowercase())
            .map(|(id, name, hash, doctor_id)| StaffRecord {
                id: *id,
                username: name.clone(),
                password_hash: hash.clone(),
                name: state
                    .doctors
                    .iter()
                    .find(|doc| doc.id == *doctor_id)
                    .map(|doc| doc.name.clone())
                    .unwrap_or_default(),
            });
        Ok(record)
    }

    fn create_booking(&self, booking: &NewBooking) -> Result<BookingRecord, StoreError> {
        let mut state = self.lock();
        let doctor = state
            .doctors
            .iter()
            .find(|doc| doc.id == booking.doctor_id)
            .cloned()
            .ok_or(StoreError::DoctorNotFound(booking.doctor_id))?;
        if doctor.department_id != booking.department_id {
            return Err(StoreError::DepartmentMismatch {
                doctor_id: doctor.id,
                department_id: booking.department_id,
            });
        }
        if state.fail_writes {
            return Err(StoreError::Database(diesel::result::Error::RollbackTransaction));
        }

        let patient_id = state.patients.len() as u64 + 1;
        state.patients.push((patient_id, booking.patient.clone()));
        let appointment_id = state.appointments.len() as u64 + 1;
        state.appointments.push(StoredAppointment {
            id: appointment_id,
            patient_id,
            department_id: booking.department_id,
            doctor_id: doctor.id,
            date: booking.date,
            time_slot: booking.time_slot.clone(),
            problem: booking.problem.clone(),
        });

        Ok(BookingRecord {
            appointment_id,
            patient_id,
            department_name: department_name(&state, doctor.department_id),
            doctor_name: doctor.name,
        })
    }

    fn list_appointments(
        &self,
        filter: &AppointmentFilter,
    ) -> Result<Vec<AppointmentRow>, StoreError> {
        let state = self.lock();
        let mut rows: Vec<AppointmentRow> = state
            .appointments
            .iter()
            .filter(|appo| filter.department_id.map_or(true, |id| appo.department_id == id))
            .filter(|appo| filter.dates.map_or(true, |range| range.contains(appo.date)))
            .map(|appo| {
                let patient = &state
                    .patients
                    .iter()
                    .find(|(id, _)| *id == appo.patient_id)
                    .unwrap()
                    .1;
                AppointmentRow {
                    id: appo.id,
                    patient_id: appo.patient_id,
                    appointment_date: appo.date,
                    time_slot: appo.time_slot.clone(),
                    patient_name: patient.name.clone(),
                    department_name: department_name(&state, appo.department_id),
                    doctor_name: state
                        .doctors
                        .iter()
                        .find(|doc| doc.id == appo.doctor_id)
                        .map(|doc| doc.name.clone())
                        .unwrap_or_default(),
                    phone: patient.phone.clone(),
                    email: patient.email.clone(),
                    problem: appo.problem.clone(),
                }
            })
            .collect();
        rows.sort_by(|a, b| {
            (a.appointment_date, &a.time_slot).cmp(&(b.appointment_date, &b.time_slot))
        });
        Ok(rows)
    }

    fn list_doctors(&self, department_id: u64) -> Result<Vec<DoctorData>, StoreError> {
        let mut docs: Vec<DoctorData> = self
            .lock()
            .doctors
            .iter()
            .filter(|doc| doc.department_id == department_id)
            .cloned()
            .collect();
        docs.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(docs)
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    sent: Mutex<Vec<Confirmation>>,
    fail: bool,
}

impl RecordingNotifier {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    pub fn sent(&self) -> Vec<Confirmation> {
        self.sent.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn send(&self, confirmation: &Confirmation) -> anyhow::Result<Delivery> {
        if self.fail {
            bail!("relay refused the message");
        }
        self.sent.lock().unwrap().push(confirmation.clone());
        Ok(Delivery::Sent)
    }
}

pub fn context(store: Arc<MemoryStore>, notifier: Arc<RecordingNotifier>) -> AppContext {
    AppContext {
        store,
        signer: TokenSigner::new(TEST_SECRET),
        notifier,
        static_dir: PathBuf::from("public"),
    }
}

/// Builds the full application around the given context.
#[macro_export]
macro_rules! test_app {
    ( $ctx:expr ) => {
        actix_web::test::init_service(
            actix_web::App::new()
                .app_data(actix_web::web::Data::new($ctx))
                .app_data($crate::utils::json_config())
                .app_data($crate::utils::query_config())
                .configure(|cfg| $crate::config(cfg)),
        )
        .await
    };
}
