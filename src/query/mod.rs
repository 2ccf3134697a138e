mod requests;
mod responses;

use actix_web::{get, web, HttpResponse};
use chrono::Local;

use crate::{auth::StaffSession, database, error::ApiError, AppContext};

use self::{
    requests::{AppointmentsRequest, DentistsRequest},
    responses::{AppointmentItem, DentistItem},
};

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(appointments).service(dentists);
}

crate::json_funcs! {
    (get, appointments, "/api/appointments", session: StaffSession, info: web::Query<AppointmentsRequest>),
    (get, dentists, "/api/dentists", info: web::Query<DentistsRequest>),
}

async fn appointments_impl(
    ctx: web::Data<AppContext>,
    session: StaffSession,
    info: web::Query<AppointmentsRequest>,
) -> Result<Vec<AppointmentItem>, ApiError> {
    let today = Local::now().date_naive();
    let filter = info.into_inner().into_filter(today)?;
    log::debug!(
        "Staff {} listing appointments with {:?}",
        session.0.username,
        filter
    );

    let rows = database::run(&ctx.store, move |store| store.list_appointments(&filter)).await?;
    Ok(rows.into_iter().map(AppointmentItem::from).collect())
}

async fn dentists_impl(
    ctx: web::Data<AppContext>,
    info: web::Query<DentistsRequest>,
) -> Result<Vec<DentistItem>, ApiError> {
    let department_id = info
        .into_inner()
        .department
        .ok_or_else(|| ApiError::validation("Department ID is required"))?;

    let docs = database::run(&ctx.store, move |store| store.list_doctors(department_id)).await?;
    Ok(docs.into_iter().map(DentistItem::from).collect())
}
