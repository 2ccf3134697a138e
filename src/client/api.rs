use actix_web::client::Client;
use anyhow::anyhow;
use futures::future::{FutureExt, LocalBoxFuture};
use serde::Deserialize;

use super::AppointmentPayload;

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Dentist {
    pub id: u64,
    pub name: String,
}

/// Server reply to a booking, successful or not.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SubmitOutcome {
    pub success: bool,
    #[serde(default)]
    pub appointment_id: Option<u64>,
    #[serde(default)]
    pub email_sent: bool,
    #[serde(default)]
    pub error: Option<String>,
}

pub trait BookingApi {
    fn list_dentists(&self, department_id: u64) -> LocalBoxFuture<'_, anyhow::Result<Vec<Dentist>>>;

    fn submit_appointment<'a>(
        &'a self,
        payload: &'a AppointmentPayload,
    ) -> LocalBoxFuture<'a, anyhow::Result<SubmitOutcome>>;
}

/// [`BookingApi`] speaking to the booking server over HTTP.
pub struct HttpBookingApi {
    client: Client,
    base_url: String,
}

impl HttpBookingApi {
    pub fn new<S: Into<String>>(base_url: S) -> Self {
        Self {
            client: Client::default(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }
}

impl BookingApi for HttpBookingApi {
    fn list_dentists(&self, department_id: u64) -> LocalBoxFuture<'_, anyhow::Result<Vec<Dentist>>> {
        let url = format!("{}/api/dentists?department={}", self.base_url, department_id);
        async move {
            let mut response = self
                .client
                .get(url)
                .send()
                .await
                .map_err(|err| anyhow!("Failed to reach server: {}", err))?;
            if !response.status().is_success() {
                return Err(anyhow!("Server answered {}", response.status()));
            }
            response
                .json::<Vec<Dentist>>()
                .await
                .map_err(|err| anyhow!("Unexpected dentist list: {}", err))
        }
        .boxed_local()
    }

    fn submit_appointment<'a>(
        &'a self,
        payload: &'a AppointmentPayload,
    ) -> LocalBoxFuture<'a, anyhow::Result<SubmitOutcome>> {
        let url = format!("{}/submit-appointment", self.base_url);
        async move {
            let mut response = self
                .client
                .post(url)
                .send_json(payload)
                .await
                .map_err(|err| anyhow!("Failed to reach server: {}", err))?;
            response
                .json::<SubmitOutcome>()
                .await
                .map_err(|err| anyhow!("Unexpected booking reply: {}", err))
        }
        .boxed_local()
    }
}
