//! Two-step booking form logic: an intake page that parks the patient's
//! details in local storage, and an appointment page that merges them with
//! the chosen dentist and slot and submits the booking.
//!
//! Forms hold only widget state; the UI driving them renders that state and
//! acts on the returned [`Effect`]s.

mod api;
mod storage;

pub use self::{
    api::{BookingApi, Dentist, HttpBookingApi, SubmitOutcome},
    storage::{FileStorage, LocalStorage, MemoryStorage},
};

use anyhow::Context;
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

pub const PATIENT_DATA_KEY: &str = "patientData";

const DOCTOR_PLACEHOLDER: &str = "Choose a dentist";
const DOCTOR_LOADING: &str = "Loading...";
const SUBMIT_LABEL: &str = "Book Appointment";
const SUBMIT_BUSY_LABEL: &str = "Booking...";
const MISSING_INTAKE: &str = "Please fill out patient information first!";
const BOOKED: &str = "Appointment booked successfully!";
const BOOKING_FAILED: &str = "Error booking appointment. Please try again.";
const DENTISTS_FAILED: &str = "Error loading dentists. Please try again.";
const PAST_DATE: &str = "Please choose a date from today onwards.";

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Intake {
    pub name: String,
    pub address: String,
    pub email: String,
    pub phone: String,
    pub problem: String,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct AppointmentChoice {
    pub dentist: String,
    pub department: String,
    pub date: String,
    pub time: String,
}

/// Body of `POST /submit-appointment`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AppointmentPayload {
    #[serde(flatten)]
    pub intake: Intake,
    pub dentist: String,
    pub department: String,
    pub date: String,
    pub time: String,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Page {
    Landing,
    Intake,
    Appointment,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Effect {
    Navigate(Page),
    Alert(String),
}

#[derive(Clone, Debug, PartialEq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

impl SelectOption {
    fn placeholder(label: &str) -> Self {
        Self {
            value: String::new(),
            label: label.to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct DoctorSelect {
    pub options: Vec<SelectOption>,
    pub disabled: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SubmitButton {
    pub label: String,
    pub disabled: bool,
}

pub struct IntakeForm;

impl IntakeForm {
    pub fn submit<S: LocalStorage>(storage: &mut S, intake: &Intake) -> anyhow::Result<Effect> {
        let raw = serde_json::to_string(intake).context("Failed to encode patient data")?;
        storage.set_item(PATIENT_DATA_KEY, raw)?;
        Ok(Effect::Navigate(Page::Appointment))
    }
}

pub struct AppointmentForm {
    pub doctor_select: DoctorSelect,
    pub submit_button: SubmitButton,
    /// Earliest date the date picker offers.
    pub min_date: NaiveDate,
}

impl Default for AppointmentForm {
    fn default() -> Self {
        Self::starting(Local::now().date_naive())
    }
}

impl AppointmentForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn starting(min_date: NaiveDate) -> Self {
        Self {
            doctor_select: DoctorSelect {
                options: vec![SelectOption::placeholder(DOCTOR_PLACEHOLDER)],
                disabled: false,
            },
            submit_button: SubmitButton {
                label: SUBMIT_LABEL.to_string(),
                disabled: false,
            },
            min_date,
        }
    }

    pub async fn select_department<A: BookingApi>(
        &mut self,
        api: &A,
        department: &str,
    ) -> Vec<Effect> {
        let department_id = match department.trim().parse::<u64>() {
            Ok(id) => id,
            Err(_) => {
                self.doctor_select = DoctorSelect {
                    options: vec![SelectOption::placeholder(DOCTOR_PLACEHOLDER)],
                    disabled: false,
                };
                return Vec::new();
            }
        };

        self.begin_dentist_load();
        let result = api.list_dentists(department_id).await;
        self.finish_dentist_load(result)
    }

    pub fn begin_dentist_load(&mut self) {
        self.doctor_select = DoctorSelect {
            options: vec![SelectOption::placeholder(DOCTOR_LOADING)],
            disabled: true,
        };
    }

    pub fn finish_dentist_load(&mut self, result: anyhow::Result<Vec<Dentist>>) -> Vec<Effect> {
        let mut options = vec![SelectOption::placeholder(DOCTOR_PLACEHOLDER)];
        let mut effects = Vec::new();
        match result {
            Ok(dentists) => options.extend(dentists.into_iter().map(|dentist| SelectOption {
                value: dentist.id.to_string(),
                label: dentist.name,
            })),
            Err(err) => {
                log::error!("Error fetching dentists: {:#}", err);
                effects.push(Effect::Alert(DENTISTS_FAILED.to_string()));
            }
        }
        self.doctor_select = DoctorSelect {
            options,
            disabled: false,
        };
        effects
    }

    pub async fn submit<S: LocalStorage, A: BookingApi>(
        &mut self,
        storage: &mut S,
        api: &A,
        choice: AppointmentChoice,
    ) -> Vec<Effect> {
        let payload = match self.prepare(storage, choice) {
            Ok(payload) => payload,
            Err(effects) => return effects,
        };

        self.begin_submit();
        let outcome = api.submit_appointment(&payload).await;
        let effects = Self::settle(storage, outcome);
        self.finish_submit();
        effects
    }

    /// Merges stored intake with the choice. Redirects back to intake when
    /// none is stored and refuses dates before `min_date`.
    pub fn prepare<S: LocalStorage>(
        &self,
        storage: &S,
        choice: AppointmentChoice,
    ) -> Result<AppointmentPayload, Vec<Effect>> {
        let intake = storage
            .get_item(PATIENT_DATA_KEY)
            .and_then(|raw| serde_json::from_str::<Intake>(&raw).ok());
        let intake = match intake {
            Some(intake) => intake,
            None => {
                return Err(vec![
                    Effect::Alert(MISSING_INTAKE.to_string()),
                    Effect::Navigate(Page::Intake),
                ])
            }
        };

        // Unparsable dates are left for the server to reject.
        if let Ok(date) = NaiveDate::parse_from_str(choice.date.trim(), "%Y-%m-%d") {
            if date < self.min_date {
                return Err(vec![Effect::Alert(PAST_DATE.to_string())]);
            }
        }

        Ok(AppointmentPayload {
            intake,
            dentist: choice.dentist,
            department: choice.department,
            date: choice.date,
            time: choice.time,
        })
    }

    pub fn begin_submit(&mut self) {
        self.submit_button = SubmitButton {
            label: SUBMIT_BUSY_LABEL.to_string(),
            disabled: true,
        };
    }

    /// Restores the submit control whatever the outcome was.
    pub fn finish_submit(&mut self) {
        self.submit_button = SubmitButton {
            label: SUBMIT_LABEL.to_string(),
            disabled: false,
        };
    }

    fn settle<S: LocalStorage>(
        storage: &mut S,
        outcome: anyhow::Result<SubmitOutcome>,
    ) -> Vec<Effect> {
        match outcome {
            Ok(outcome) if outcome.success => {
                if let Err(err) = storage.remove_item(PATIENT_DATA_KEY) {
                    log::warn!("Failed to clear stored patient data: {:#}", err);
                }
                vec![
                    Effect::Alert(BOOKED.to_string()),
                    Effect::Navigate(Page::Landing),
                ]
            }
            Ok(outcome) => {
                let message = outcome
                    .error
                    .filter(|error| !error.is_empty())
                    .unwrap_or_else(|| BOOKING_FAILED.to_string());
                vec![Effect::Alert(message)]
            }
            Err(err) => {
                log::error!("Error submitting appointment: {:#}", err);
                vec![Effect::Alert(BOOKING_FAILED.to_string())]
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use anyhow::anyhow;
    use futures::future::{ready, FutureExt, LocalBoxFuture};

    use super::*;

    #[derive(Default)]
    struct FakeApi {
        dentists: Option<Vec<Dentist>>,
        outcome: Option<SubmitOutcome>,
        submitted: RefCell<Vec<AppointmentPayload>>,
    }

    impl BookingApi for FakeApi {
        fn list_dentists(&self, _: u64) -> LocalBoxFuture<'_, anyhow::Result<Vec<Dentist>>> {
            let result = self
                .dentists
                .clone()
                .ok_or_else(|| anyhow!("connection refused"));
            ready(result).boxed_local()
        }

        fn submit_appointment<'a>(
            &'a self,
            payload: &'a AppointmentPayload,
        ) -> LocalBoxFuture<'a, anyhow::Result<SubmitOutcome>> {
            self.submitted.borrow_mut().push(payload.clone());
            let result = self
                .outcome
                .clone()
                .ok_or_else(|| anyhow!("connection refused"));
            ready(result).boxed_local()
        }
    }

    fn patel() -> Intake {
        Intake {
            name: "A. Patel".to_string(),
            address: "1 Main St".to_string(),
            email: "a@x.com".to_string(),
            phone: "555-1111".to_string(),
            problem: "toothache".to_string(),
        }
    }

    fn form() -> AppointmentForm {
        AppointmentForm::starting(NaiveDate::from_ymd_opt(2025, 3, 1).unwrap())
    }

    fn choice() -> AppointmentChoice {
        AppointmentChoice {
            dentist: "7".to_string(),
            department: "2".to_string(),
            date: "2025-03-10".to_string(),
            time: "09:30".to_string(),
        }
    }

    #[test]
    fn intake_is_parked_in_storage() {
        let mut storage = MemoryStorage::default();
        let effect = IntakeForm::submit(&mut storage, &patel()).unwrap();
        assert_eq!(effect, Effect::Navigate(Page::Appointment));

        let stored: Intake =
            serde_json::from_str(&storage.get_item(PATIENT_DATA_KEY).unwrap()).unwrap();
        assert_eq!(stored, patel());
    }

    #[test]
    fn payload_merges_intake_and_choice() {
        let mut storage = MemoryStorage::default();
        IntakeForm::submit(&mut storage, &patel()).unwrap();
        let payload = form().prepare(&storage, choice()).unwrap();

        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["name"], "A. Patel");
        assert_eq!(json["problem"], "toothache");
        assert_eq!(json["dentist"], "7");
        assert_eq!(json["department"], "2");
        assert_eq!(json["date"], "2025-03-10");
        assert_eq!(json["time"], "09:30");
    }

    #[actix_rt::test]
    async fn past_dates_never_reach_the_server() {
        let mut storage = MemoryStorage::default();
        IntakeForm::submit(&mut storage, &patel()).unwrap();
        let api = FakeApi::default();
        let mut form = form();

        let mut past = choice();
        past.date = "2025-02-28".to_string();
        let effects = form.submit(&mut storage, &api, past).await;
        assert_eq!(
            effects,
            vec![Effect::Alert("Please choose a date from today onwards.".to_string())]
        );
        assert!(api.submitted.borrow().is_empty());
        assert!(!form.submit_button.disabled);

        let mut first_day = choice();
        first_day.date = "2025-03-01".to_string();
        assert!(form.prepare(&storage, first_day).is_ok());
    }

    #[test]
    fn doctor_select_is_locked_while_loading() {
        let mut form = form();
        form.begin_dentist_load();
        assert!(form.doctor_select.disabled);
        assert_eq!(form.doctor_select.options[0].label, "Loading...");

        let effects = form.finish_dentist_load(Ok(vec![Dentist {
            id: 7,
            name: "Dr. Rao".to_string(),
        }]));
        assert!(effects.is_empty());
        assert!(!form.doctor_select.disabled);
        assert_eq!(
            form.doctor_select.options,
            vec![
                SelectOption::placeholder("Choose a dentist"),
                SelectOption {
                    value: "7".to_string(),
                    label: "Dr. Rao".to_string(),
                },
            ]
        );
    }

    #[actix_rt::test]
    async fn failed_dentist_load_alerts_and_unlocks() {
        let mut form = form();
        let effects = form.select_department(&FakeApi::default(), "2").await;
        assert_eq!(
            effects,
            vec![Effect::Alert("Error loading dentists. Please try again.".to_string())]
        );
        assert!(!form.doctor_select.disabled);
        assert_eq!(form.doctor_select.options.len(), 1);
    }

    #[actix_rt::test]
    async fn missing_intake_sends_patient_back() {
        let mut storage = MemoryStorage::default();
        let api = FakeApi::default();
        let mut form = form();

        let effects = form.submit(&mut storage, &api, choice()).await;
        assert_eq!(
            effects,
            vec![
                Effect::Alert("Please fill out patient information first!".to_string()),
                Effect::Navigate(Page::Intake),
            ]
        );
        assert!(api.submitted.borrow().is_empty());
    }

    #[actix_rt::test]
    async fn successful_booking_clears_storage() {
        let mut storage = MemoryStorage::default();
        IntakeForm::submit(&mut storage, &patel()).unwrap();
        let api = FakeApi {
            outcome: Some(SubmitOutcome {
                success: true,
                appointment_id: Some(11),
                email_sent: true,
                error: None,
            }),
            ..Default::default()
        };
        let mut form = form();

        let effects = form.submit(&mut storage, &api, choice()).await;
        assert_eq!(effects[1], Effect::Navigate(Page::Landing));
        assert_eq!(storage.get_item(PATIENT_DATA_KEY), None);
        assert_eq!(api.submitted.borrow().len(), 1);
        assert_eq!(form.submit_button.label, "Book Appointment");
        assert!(!form.submit_button.disabled);
    }

    #[actix_rt::test]
    async fn rejected_booking_keeps_intake_and_unlocks_button() {
        let mut storage = MemoryStorage::default();
        IntakeForm::submit(&mut storage, &patel()).unwrap();
        let api = FakeApi {
            outcome: Some(SubmitOutcome {
                error: Some("Doctor with ID 7 not found".to_string()),
                ..Default::default()
            }),
            ..Default::default()
        };
        let mut form = form();
        form.begin_submit();
        assert!(form.submit_button.disabled);
        assert_eq!(form.submit_button.label, "Booking...");

        let effects = form.submit(&mut storage, &api, choice()).await;
        assert_eq!(
            effects,
            vec![Effect::Alert("Doctor with ID 7 not found".to_string())]
        );
        assert!(storage.get_item(PATIENT_DATA_KEY).is_some());
        assert!(!form.submit_button.disabled);

        let offline = FakeApi::default();
        let effects = form.submit(&mut storage, &offline, choice()).await;
        assert_eq!(
            effects,
            vec![Effect::Alert("Error booking appointment. Please try again.".to_string())]
        );
        assert!(!form.submit_button.disabled);
    }
}
