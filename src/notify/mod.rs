//! Booking confirmations.
//!
//! Delivery never decides whether a booking succeeded; its outcome is
//! reported next to the appointment id instead.

mod smtp;

pub use self::smtp::SmtpNotifier;

use std::{sync::Arc, time::Duration};

use actix_web::{rt::time::timeout, web};
use serde::Serialize;

use crate::models::appointments::{BookingRecord, NewBooking};

#[derive(Clone, Debug, PartialEq)]
pub struct Confirmation {
    pub appointment_id: u64,
    pub patient_name: String,
    pub patient_email: String,
    pub date: String,
    pub time_slot: String,
    pub doctor_name: String,
    pub department_name: String,
    pub problem: String,
}

impl Confirmation {
    pub fn new(booking: &NewBooking, record: &BookingRecord) -> Self {
        Self {
            appointment_id: record.appointment_id,
            patient_name: booking.patient.name.clone(),
            patient_email: booking.patient.email.trim().to_string(),
            date: crate::utils::format_date_str(&booking.date),
            time_slot: booking.time_slot.clone(),
            doctor_name: record.doctor_name.clone(),
            department_name: record.department_name.clone(),
            problem: booking.problem.clone(),
        }
    }

    pub fn subject(&self) -> String {
        format!("Your dental appointment on {} at {}", self.date, self.time_slot)
    }

    pub fn body(&self) -> String {
        format!(
            "Dear {},\n\n\
             Your appointment has been booked.\n\n\
             Date: {}\n\
             Time: {}\n\
             Doctor: {}\n\
             Department: {}\n\
             Reason for visit: {}\n\n\
             Please arrive 10 minutes early. Reply to this email if you need to reschedule.\n",
            self.patient_name,
            self.date,
            self.time_slot,
            self.doctor_name,
            self.department_name,
            self.problem,
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Delivery {
    /// Handed to the mail relay.
    Sent,
    /// No relay configured; the confirmation went to the log.
    Logged,
    /// Patient left no email address.
    Skipped,
    Failed,
}

pub trait Notifier: Send + Sync {
    fn send(&self, confirmation: &Confirmation) -> anyhow::Result<Delivery>;
}

/// Used when no SMTP relay is configured.
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn send(&self, confirmation: &Confirmation) -> anyhow::Result<Delivery> {
        log::info!(
            "Confirmation for appointment {} to <{}>: {}",
            confirmation.appointment_id,
            confirmation.patient_email,
            confirmation.subject()
        );
        Ok(Delivery::Logged)
    }
}

/// Upper bound on how long a booking waits for its confirmation.
pub const CONFIRMATION_TIMEOUT: Duration = Duration::from_secs(10);

pub async fn deliver(notifier: &Arc<dyn Notifier>, confirmation: Confirmation) -> Delivery {
    deliver_within(notifier, confirmation, CONFIRMATION_TIMEOUT).await
}

/// A relay slower than `limit` counts as failed; the send keeps running on
/// the blocking pool and its result is dropped.
pub async fn deliver_within(
    notifier: &Arc<dyn Notifier>,
    confirmation: Confirmation,
    limit: Duration,
) -> Delivery {
    let appointment_id = confirmation.appointment_id;
    if confirmation.patient_email.is_empty() {
        log::info!(
            "Appointment {} has no patient email, skipping confirmation",
            appointment_id
        );
        return Delivery::Skipped;
    }

    let notifier = Arc::clone(notifier);
    match timeout(limit, web::block(move || notifier.send(&confirmation))).await {
        Ok(Ok(delivery)) => delivery,
        Ok(Err(err)) => {
            log::error!(
                "Failed to send confirmation for appointment {}: {}",
                appointment_id,
                err
            );
            Delivery::Failed
        }
        Err(_) => {
            log::error!(
                "Confirmation for appointment {} timed out after {:?}",
                appointment_id,
                limit
            );
            Delivery::Failed
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        models::patients::NewPatient,
        testing::RecordingNotifier,
    };
    use chrono::NaiveDate;

    fn confirmation(email: &str) -> Confirmation {
        let booking = NewBooking {
            patient: NewPatient {
                name: "A. Patel".to_string(),
                address: "1 Main St".to_string(),
                email: email.to_string(),
                phone: "555-1111".to_string(),
            },
            department_id: 2,
            doctor_id: 7,
            date: NaiveDate::from_ymd_opt(2025, 3, 10).unwrap(),
            time_slot: "09:30".to_string(),
            problem: "toothache".to_string(),
        };
        let record = BookingRecord {
            appointment_id: 11,
            patient_id: 4,
            doctor_name: "Dr. Rao".to_string(),
            department_name: "Endodontics".to_string(),
        };
        Confirmation::new(&booking, &record)
    }

    #[test]
    fn confirmation_mentions_the_visit() {
        let confirmation = confirmation("a@x.com");
        assert_eq!(
            confirmation.subject(),
            "Your dental appointment on 2025-03-10 at 09:30"
        );
        let body = confirmation.body();
        assert!(body.starts_with("Dear A. Patel,"));
        assert!(body.contains("Doctor: Dr. Rao"));
        assert!(body.contains("Department: Endodontics"));
        assert!(body.contains("Reason for visit: toothache"));
    }

    #[actix_rt::test]
    async fn delivery_reports_outcome() {
        let ok: Arc<dyn Notifier> = Arc::new(RecordingNotifier::default());
        assert_eq!(deliver(&ok, confirmation("a@x.com")).await, Delivery::Sent);

        let failing: Arc<dyn Notifier> = Arc::new(RecordingNotifier::failing());
        assert_eq!(
            deliver(&failing, confirmation("a@x.com")).await,
            Delivery::Failed
        );

        let logged: Arc<dyn Notifier> = Arc::new(LogNotifier);
        assert_eq!(
            deliver(&logged, confirmation("a@x.com")).await,
            Delivery::Logged
        );
    }

    struct StalledRelay;

    impl Notifier for StalledRelay {
        fn send(&self, _: &Confirmation) -> anyhow::Result<Delivery> {
            std::thread::sleep(Duration::from_millis(500));
            Ok(Delivery::Sent)
        }
    }

    #[actix_rt::test]
    async fn stalled_relay_times_out() {
        let stalled: Arc<dyn Notifier> = Arc::new(StalledRelay);
        let started = std::time::Instant::now();
        let delivery =
            deliver_within(&stalled, confirmation("a@x.com"), Duration::from_millis(50)).await;
        assert_eq!(delivery, Delivery::Failed);
        assert!(started.elapsed() < Duration::from_millis(400));
    }

    #[actix_rt::test]
    async fn missing_email_is_skipped() {
        let notifier = Arc::new(RecordingNotifier::default());
        let shared: Arc<dyn Notifier> = notifier.clone();
        assert_eq!(deliver(&shared, confirmation("  ")).await, Delivery::Skipped);
        assert!(notifier.sent().is_empty());
    }
}
