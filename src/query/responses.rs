use serde::Serialize;

use crate::models::{appointments::AppointmentRow, doctors::DoctorData};

#[derive(Debug, Serialize)]
pub struct AppointmentItem {
    pub id: u64,
    pub patient_id: u64,
    pub appointment_date: String,
    pub time_slot: String,
    pub patient_name: String,
    pub department_name: String,
    pub doctor_name: String,
    pub phone: String,
    pub email: String,
    pub problem: String,
}

impl From<AppointmentRow> for AppointmentItem {
    fn from(row: AppointmentRow) -> Self {
        Self {
            id: row.id,
            patient_id: row.patient_id,
            appointment_date: crate::utils::format_date_str(&row.appointment_date),
            time_slot: row.time_slot,
            patient_name: row.patient_name,
            department_name: row.department_name,
            doctor_name: row.doctor_name,
            phone: row.phone,
            email: row.email,
            problem: row.problem,
        }
    }
}

/// `doctor_id` duplicates `id` for form scripts that read either key.
#[derive(Debug, Serialize)]
pub struct DentistItem {
    pub id: u64,
    pub doctor_id: u64,
    pub name: String,
}

impl From<DoctorData> for DentistItem {
    fn from(data: DoctorData) -> Self {
        Self {
            id: data.id,
            doctor_id: data.id,
            name: data.name,
        }
    }
}
