#[macro_use]
extern crate diesel;

pub mod auth;
pub mod booking;
pub mod client;
pub mod config;
pub mod database;
pub mod error;
pub mod models;
pub mod notify;
pub mod pages;
pub mod protocol;
pub mod query;
pub mod schema;
pub mod utils;

#[cfg(test)]
mod testing;

use std::{path::PathBuf, sync::Arc};

use actix_web::web;

use crate::{auth::token::TokenSigner, database::SharedStore, notify::Notifier};

/// Shared, immutable state handed to every handler.
pub struct AppContext {
    pub store: SharedStore,
    pub signer: TokenSigner,
    pub notifier: Arc<dyn Notifier>,
    pub static_dir: PathBuf,
}

pub fn config(cfg: &mut web::ServiceConfig) {
    auth::config(cfg);
    query::config(cfg);
    booking::config(cfg);
    pages::config(cfg);
}
