use anyhow::{bail, Context};
use envconfig::Envconfig;

const MIN_SECRET_LEN: usize = 32;

#[derive(Envconfig)]
pub struct Config {
    #[envconfig(from = "DATABASE_URL")]
    pub database_url: String,

    #[envconfig(from = "BIND_ADDR", default = "127.0.0.1:3000")]
    pub bind_addr: String,

    #[envconfig(from = "DB_POOL_SIZE", default = "10")]
    pub db_pool_size: u32,

    #[envconfig(from = "STATIC_DIR", default = "public")]
    pub static_dir: String,

    #[envconfig(from = "TOKEN_SECRET")]
    pub token_secret: String,

    #[envconfig(from = "SMTP_HOST")]
    pub smtp_host: Option<String>,

    #[envconfig(from = "SMTP_USERNAME")]
    pub smtp_username: Option<String>,

    #[envconfig(from = "SMTP_PASSWORD")]
    pub smtp_password: Option<String>,

    #[envconfig(from = "MAIL_FROM", default = "Dental Clinic <no-reply@localhost>")]
    pub mail_from: String,
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        dotenv::dotenv().ok();
        let config = Config::init_from_env().context("Invalid configuration")?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.token_secret.len() < MIN_SECRET_LEN {
            bail!("TOKEN_SECRET must be at least {} bytes", MIN_SECRET_LEN);
        }
        if self.db_pool_size == 0 {
            bail!("DB_POOL_SIZE must be positive");
        }
        Ok(())
    }

    pub fn smtp_credentials(&self) -> Option<(String, String)> {
        match (&self.smtp_username, &self.smtp_password) {
            (Some(username), Some(password)) => Some((username.clone(), password.clone())),
            _ => None,
        }
    }
}
