use anyhow::{bail, Context};
use clinic::{
    auth::password::hash_password,
    database::last_insert_id,
    models::{departments::NewDepart, doctors::NewDoctor, staff::NewStaff},
    schema::{departments, doctors, staff},
};
use diesel::{prelude::*, MysqlConnection};

/// Department name with its doctors; each doctor gets a staff login named
/// by the second element.
fn get_seed_data() -> Vec<(&'static str, Vec<(&'static str, &'static str)>)> {
    vec![
        (
            "General Dentistry",
            vec![("Dr. Amelia Okafor", "aokafor"), ("Dr. Ben Hartley", "bhartley")],
        ),
        (
            "Orthodontics",
            vec![("Dr. Chen Wei", "cwei"), ("Dr. Dana Moreau", "dmoreau")],
        ),
        ("Endodontics", vec![("Dr. Priya Rao", "prao")]),
        ("Oral Surgery", vec![("Dr. Tomas Lindqvist", "tlindqvist")]),
        ("Pediatric Dentistry", vec![]),
    ]
}

fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL not found")?;
    let staff_password =
        std::env::var("SEED_STAFF_PASSWORD").context("SEED_STAFF_PASSWORD not found")?;
    if staff_password.len() < 8 {
        bail!("SEED_STAFF_PASSWORD must be at least 8 characters");
    }

    let conn = MysqlConnection::establish(&database_url).context("DB connection")?;

    let existing = departments::table
        .count()
        .get_result::<i64>(&conn)
        .context("DB error")?;
    if existing > 0 {
        log::info!("Database already holds {} departments, nothing to seed", existing);
        return Ok(());
    }

    let password_hash = hash_password(&staff_password)?;
    conn.transaction::<_, anyhow::Error, _>(|| {
        for (depart_name, docs) in get_seed_data() {
            diesel::insert_into(departments::table)
                .values(NewDepart { name: depart_name })
                .execute(&conn)
                .context("DB error")?;
            let department_id = diesel::select(last_insert_id).first::<u64>(&conn)?;

            for (doctor_name, username) in docs {
                diesel::insert_into(doctors::table)
                    .values(NewDoctor {
                        name: doctor_name,
                        department_id,
                    })
                    .execute(&conn)
                    .context("DB error")?;
                let doctor_id = diesel::select(last_insert_id).first::<u64>(&conn)?;

                diesel::insert_into(staff::table)
                    .values(NewStaff {
                        username,
                        password_hash: &password_hash,
                        doctor_id,
                    })
                    .execute(&conn)
                    .context("DB error")?;
                log::info!("Seeded {} ({}) in {}", doctor_name, username, depart_name);
            }
        }
        Ok(())
    })?;

    log::info!("Seeding complete");
    Ok(())
}
