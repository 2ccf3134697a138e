use std::{path::PathBuf, sync::Arc};

use actix_files::Files;
use actix_web::{middleware::Logger, web, App, HttpServer};
use anyhow::Context;
use clinic::{
    auth::token::TokenSigner,
    config::Config,
    database::{self, MysqlStore},
    notify::{LogNotifier, Notifier, SmtpNotifier},
    utils, AppContext,
};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let config = Config::load()?;
    let pool = database::build_pool(&config.database_url, config.db_pool_size)?;

    let notifier: Arc<dyn Notifier> = match &config.smtp_host {
        Some(host) => Arc::new(SmtpNotifier::new(
            host,
            config.smtp_credentials(),
            &config.mail_from,
        )?),
        None => {
            log::warn!("SMTP_HOST not set, booking confirmations will only be logged");
            Arc::new(LogNotifier)
        }
    };

    let static_dir = PathBuf::from(&config.static_dir);
    let ctx = web::Data::new(AppContext {
        store: Arc::new(MysqlStore::new(pool)),
        signer: TokenSigner::new(config.token_secret.as_bytes()),
        notifier,
        static_dir: static_dir.clone(),
    });

    log::info!("Server running at http://{}", config.bind_addr);
    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(ctx.clone())
            .app_data(utils::json_config())
            .app_data(utils::query_config())
            .configure(clinic::config)
            .service(Files::new("/", &static_dir))
    })
    .bind(&config.bind_addr)
    .with_context(|| format!("Failed to bind {}", config.bind_addr))?
    .run()
    .await
    .context("Server error")
}
