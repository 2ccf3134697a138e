use std::io::{self, BufRead, Write};

use anyhow::Context;
use clinic::client::{
    AppointmentChoice, AppointmentForm, Effect, FileStorage, HttpBookingApi, Intake, IntakeForm,
    Page,
};
use envconfig::Envconfig;

#[derive(Envconfig)]
struct KioskConfig {
    #[envconfig(from = "CLINIC_URL", default = "http://127.0.0.1:3000")]
    clinic_url: String,

    #[envconfig(from = "KIOSK_STORAGE", default = ".kiosk-storage.json")]
    storage_path: String,
}

fn prompt(lines: &mut impl Iterator<Item = io::Result<String>>, label: &str) -> anyhow::Result<String> {
    print!("{}: ", label);
    io::stdout().flush()?;
    let line = lines.next().context("Input closed")??;
    Ok(line.trim().to_string())
}

/// Returns the page the kiosk should show next.
fn apply(effects: Vec<Effect>) -> Option<Page> {
    let mut next = None;
    for effect in effects {
        match effect {
            Effect::Alert(message) => println!("\n*** {} ***\n", message),
            Effect::Navigate(page) => next = Some(page),
        }
    }
    next
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("warn"));
    let config = KioskConfig::init_from_env().context("Invalid kiosk configuration")?;

    let api = HttpBookingApi::new(config.clinic_url);
    let mut storage = FileStorage::open(&config.storage_path)?;
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    let mut page = Page::Intake;
    loop {
        match page {
            Page::Landing => {
                println!("Thank you! Press Enter to book another visit, or Ctrl-D to leave.");
                if lines.next().is_none() {
                    return Ok(());
                }
                page = Page::Intake;
            }
            Page::Intake => {
                println!("== Patient information ==");
                let intake = Intake {
                    name: prompt(&mut lines, "Full name")?,
                    address: prompt(&mut lines, "Address")?,
                    email: prompt(&mut lines, "Email")?,
                    phone: prompt(&mut lines, "Phone")?,
                    problem: prompt(&mut lines, "Describe your problem")?,
                };
                page = apply(vec![IntakeForm::submit(&mut storage, &intake)?])
                    .unwrap_or(Page::Intake);
            }
            Page::Appointment => {
                println!("== Appointment ==");
                let mut form = AppointmentForm::new();
                let department = prompt(&mut lines, "Department id")?;
                if let Some(next) = apply(form.select_department(&api, &department).await) {
                    page = next;
                    continue;
                }
                for option in form.doctor_select.options.iter().skip(1) {
                    println!("  [{}] {}", option.value, option.label);
                }

                let choice = AppointmentChoice {
                    dentist: prompt(&mut lines, "Dentist id")?,
                    department,
                    date: prompt(
                        &mut lines,
                        &format!("Date (YYYY-MM-DD, from {})", form.min_date.format("%Y-%m-%d")),
                    )?,
                    time: prompt(&mut lines, "Time (HH:MM)")?,
                };
                let effects = form.submit(&mut storage, &api, choice).await;
                page = apply(effects).unwrap_or(Page::Appointment);
            }
        }
    }
}
