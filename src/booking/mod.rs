mod requests;
mod responses;

use actix_web::{post, web, HttpResponse};

use crate::{
    database,
    error::ApiError,
    notify::{self, Confirmation, Delivery},
    AppContext,
};

use self::{requests::AppointmentRequest, responses::SubmitAppointmentResponse};

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(submit_appointment);
}

crate::json_funcs! {
    (post, submit_appointment, "/submit-appointment", info: web::Json<AppointmentRequest>),
}

async fn submit_appointment_impl(
    ctx: web::Data<AppContext>,
    info: web::Json<AppointmentRequest>,
) -> Result<SubmitAppointmentResponse, ApiError> {
    let booking = info.into_inner().into_booking()?;
    log::info!(
        "Booking doctor {} (department {}) on {} at {}",
        booking.doctor_id,
        booking.department_id,
        booking.date,
        booking.time_slot
    );

    let pending = booking.clone();
    let record = database::run(&ctx.store, move |store| store.create_booking(&pending))
        .await
        .map_err(|err| {
            log::warn!("Booking with doctor {} failed: {}", booking.doctor_id, err);
            ApiError::from(err)
        })?;
    log::info!(
        "Appointment {} created for patient {}",
        record.appointment_id,
        record.patient_id
    );

    let delivery = notify::deliver(&ctx.notifier, Confirmation::new(&booking, &record)).await;

    Ok(SubmitAppointmentResponse {
        success: true,
        appointment_id: record.appointment_id,
        email_sent: delivery == Delivery::Sent,
        email_status: delivery,
    })
}
