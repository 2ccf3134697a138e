use crate::{models::patients::NewPatient, schema::appointments};
use chrono::NaiveDate;

#[derive(Insertable)]
#[table_name = "appointments"]
pub struct NewAppointment<'a> {
    pub patient_id: u64,
    pub department_id: u64,
    pub doctor_id: u64,
    pub appointment_date: NaiveDate,
    pub time_slot: &'a str,
    pub problem: &'a str,
}

/// One row of the dashboard listing: an appointment joined with its patient,
/// department and doctor.
#[derive(Queryable, Clone, Debug, PartialEq)]
pub struct AppointmentRow {
    pub id: u64,
    pub patient_id: u64,
    pub appointment_date: NaiveDate,
    pub time_slot: String,
    pub patient_name: String,
    pub department_name: String,
    pub doctor_name: String,
    pub phone: String,
    pub email: String,
    pub problem: String,
}

/// A validated booking, written as one patient plus one appointment.
#[derive(Clone, Debug, PartialEq)]
pub struct NewBooking {
    pub patient: NewPatient,
    pub department_id: u64,
    pub doctor_id: u64,
    pub date: NaiveDate,
    pub time_slot: String,
    pub problem: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct BookingRecord {
    pub appointment_id: u64,
    pub patient_id: u64,
    pub doctor_name: String,
    pub department_name: String,
}

/// Inclusive range of appointment dates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DateRange {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl DateRange {
    pub fn day(date: NaiveDate) -> Self {
        Self {
            from: date,
            to: date,
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.from <= date && date <= self.to
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct AppointmentFilter {
    pub department_id: Option<u64>,
    pub dates: Option<DateRange>,
}
