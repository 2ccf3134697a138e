pub mod password;
mod requests;
mod responses;
pub mod token;

use actix_web::{dev::Payload, post, web, FromRequest, HttpRequest, HttpResponse};
use chrono::Utc;
use futures::future::{ready, Ready};

use crate::{database, error::ApiError, AppContext};

use self::{
    requests::LoginRequest,
    responses::{LoginResponse, StaffProfile},
    token::Claims,
};

const INVALID_CREDENTIALS: &str = "Invalid username or password";

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(dentist_login);
}

crate::json_funcs! {
    (post, dentist_login, "/api/dentist-login", info: web::Json<LoginRequest>),
}

async fn dentist_login_impl(
    ctx: web::Data<AppContext>,
    info: web::Json<LoginRequest>,
) -> Result<LoginResponse, ApiError> {
    let info = info.into_inner();
    let username = info.username.trim().to_string();
    if username.is_empty() || info.password.is_empty() {
        return Err(ApiError::validation("Username and password are required"));
    }

    let lookup = username.clone();
    let staff = database::run(&ctx.store, move |store| store.find_staff(&lookup)).await?;

    // Unknown usernames still pay for a full hash check.
    let password = info.password;
    let stored_hash = staff
        .as_ref()
        .map(|staff| staff.password_hash.clone())
        .unwrap_or_else(|| password::UNKNOWN_USER_HASH.to_string());
    let verified = web::block(move || password::verify_password(&password, &stored_hash))
        .await
        .map_err(|err| ApiError::Internal(err.to_string()))?;

    let staff = match staff {
        Some(staff) if verified => staff,
        Some(_) => {
            log::warn!("Login rejected for '{}': wrong password", username);
            return Err(ApiError::Unauthorized(INVALID_CREDENTIALS.to_string()));
        }
        None => {
            log::warn!("Login rejected for '{}': no such staff account", username);
            return Err(ApiError::Unauthorized(INVALID_CREDENTIALS.to_string()));
        }
    };

    let token = ctx
        .signer
        .issue(staff.id, &staff.username, &staff.name, Utc::now())
        .map_err(|err| ApiError::Internal(err.to_string()))?;
    log::info!("Staff {} ({}) logged in", staff.id, staff.username);

    Ok(LoginResponse {
        success: true,
        token,
        user: StaffProfile {
            id: staff.id,
            username: staff.username,
            name: staff.name,
        },
    })
}

/// Verified claims of the bearer token on the current request.
///
/// The scheme name is matched case-insensitively. A missing or non-Bearer
/// `Authorization` header yields 401; a token that
/// fails verification yields 403.
#[derive(Debug)]
pub struct StaffSession(pub Claims);

impl FromRequest for StaffSession {
    type Error = ApiError;
    type Future = Ready<Result<Self, Self::Error>>;
    type Config = ();

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(authorize(req))
    }
}

fn authorize(req: &HttpRequest) -> Result<StaffSession, ApiError> {
    let ctx = req
        .app_data::<web::Data<AppContext>>()
        .ok_or_else(|| ApiError::Internal("application context is not registered".to_string()))?;
    let token = bearer_token(req)?;

    ctx.signer
        .verify(token, Utc::now())
        .map(StaffSession)
        .map_err(|err| {
            log::warn!("Rejected session token: {}", err);
            ApiError::Forbidden("Invalid or expired token".to_string())
        })
}

fn bearer_token(req: &HttpRequest) -> Result<&str, ApiError> {
    let header = req
        .headers()
        .get("Authorization")
        .ok_or_else(|| ApiError::Unauthorized("Access token required".to_string()))?
        .to_str()
        .map_err(|_| ApiError::Unauthorized("Invalid Authorization header".to_string()))?;

    let mut parts = header.trim().splitn(2, ' ');
    let scheme = parts.next().unwrap_or_default();
    let token = parts.next().map(str::trim).unwrap_or_default();
    if scheme.eq_ignore_ascii_case("Bearer") && !token.is_empty() {
        Ok(token)
    } else {
        Err(ApiError::Unauthorized(
            "Authorization header must use the Bearer scheme".to_string(),
        ))
    }
}
