use actix_files::NamedFile;
use actix_web::{get, web, Result};

use crate::AppContext;

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(index)
        .service(dentist_dashboard)
        .service(dentist_login);
}

fn page(ctx: &AppContext, file: &str) -> Result<NamedFile> {
    Ok(NamedFile::open(ctx.static_dir.join(file))?)
}

#[get("/")]
async fn index(ctx: web::Data<AppContext>) -> Result<NamedFile> {
    page(&ctx, "index.html")
}

#[get("/dentist-dashboard")]
async fn dentist_dashboard(ctx: web::Data<AppContext>) -> Result<NamedFile> {
    page(&ctx, "dentist-dashboard.html")
}

#[get("/dentist-login")]
async fn dentist_login(ctx: web::Data<AppContext>) -> Result<NamedFile> {
    page(&ctx, "dentist-login.html")
}
