use serde::Deserialize;

use crate::{
    error::ApiError,
    models::{appointments::NewBooking, patients::NewPatient},
};

/// Column widths of the `patients` and `appointments` tables, in characters.
const MAX_NAME: usize = 100;
const MAX_ADDRESS: usize = 255;
const MAX_EMAIL: usize = 255;
const MAX_PHONE: usize = 32;
const MAX_TIME_SLOT: usize = 16;

fn check_length(field: &str, value: &str, max: usize) -> Result<(), ApiError> {
    if value.chars().count() > max {
        return Err(ApiError::validation(format!(
            "{} must be at most {} characters",
            field, max
        )));
    }
    Ok(())
}

/// Intake fields merged with the scheduling choice, as posted by the
/// appointment form.
#[derive(Deserialize)]
pub struct AppointmentRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub problem: String,
    #[serde(default, deserialize_with = "crate::utils::deserialize_optional_id")]
    pub dentist: Option<u64>,
    #[serde(default, deserialize_with = "crate::utils::deserialize_optional_id")]
    pub department: Option<u64>,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub time: String,
}

impl AppointmentRequest {
    pub fn into_booking(self) -> Result<NewBooking, ApiError> {
        let doctor_id = self
            .dentist
            .ok_or_else(|| ApiError::validation("Please choose a dentist"))?;
        let department_id = self
            .department
            .ok_or_else(|| ApiError::validation("Please choose a department"))?;
        let date = crate::utils::parse_date_str(&self.date)?;
        let time_slot = self.time.trim().to_string();
        if time_slot.is_empty() {
            return Err(ApiError::validation("Please choose a time slot"));
        }

        check_length("Time slot", &time_slot, MAX_TIME_SLOT)?;

        let patient = NewPatient {
            name: self.name.trim().to_string(),
            address: self.address.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: self.phone.trim().to_string(),
        };
        check_length("Name", &patient.name, MAX_NAME)?;
        check_length("Address", &patient.address, MAX_ADDRESS)?;
        check_length("Email", &patient.email, MAX_EMAIL)?;
        check_length("Phone", &patient.phone, MAX_PHONE)?;

        Ok(NewBooking {
            patient,
            department_id,
            doctor_id,
            date,
            time_slot,
            problem: self.problem,
        })
    }
}
