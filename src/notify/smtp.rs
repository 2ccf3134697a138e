use anyhow::Context;
use lettre::{
    message::Mailbox, transport::smtp::authentication::Credentials, Message, SmtpTransport,
    Transport,
};

use super::{Confirmation, Delivery, Notifier};

pub struct SmtpNotifier {
    transport: SmtpTransport,
    from: Mailbox,
}

impl SmtpNotifier {
    pub fn new(
        host: &str,
        credentials: Option<(String, String)>,
        from: &str,
    ) -> anyhow::Result<Self> {
        let mut builder = SmtpTransport::relay(host).context("SMTP relay")?;
        if let Some((username, password)) = credentials {
            builder = builder.credentials(Credentials::new(username, password));
        }
        let from = from.parse::<Mailbox>().context("Invalid sender address")?;

        Ok(Self {
            transport: builder.build(),
            from,
        })
    }
}

impl Notifier for SmtpNotifier {
    fn send(&self, confirmation: &Confirmation) -> anyhow::Result<Delivery> {
        let to = Mailbox::new(
            Some(confirmation.patient_name.clone()),
            confirmation
                .patient_email
                .parse()
                .context("Invalid patient email")?,
        );
        let email = Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject(confirmation.subject())
            .body(confirmation.body())
            .context("Failed to build confirmation email")?;

        self.transport
            .send(&email)
            .context("SMTP delivery failed")?;
        log::info!(
            "Confirmation for appointment {} sent to <{}>",
            confirmation.appointment_id,
            confirmation.patient_email
        );
        Ok(Delivery::Sent)
    }
}
