use serde::Serialize;

use crate::notify::Delivery;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitAppointmentResponse {
    pub success: bool,
    pub appointment_id: u64,
    pub email_sent: bool,
    pub email_status: Delivery,
}
