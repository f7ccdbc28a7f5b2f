pub mod client;
pub mod config;
pub mod error;
pub mod fallback;
pub mod handlers;
pub mod intent;
pub mod models;
pub mod profile;
pub mod service;
pub mod synth;
pub mod transcript;
pub mod transport;

use std::sync::Arc;

use axum::Router;

use crate::config::Config;
use crate::error::Result;
use crate::handlers::AppState;
use crate::profile::Profile;
use crate::service::ReplyService;

/// Build the HTTP application: load the profile, wire the Gemini fallback, mount the routes.
pub fn app(cfg: &Config) -> Result<Router> {
    let profile = Arc::new(Profile::load(cfg.assistant.profile_path.as_deref())?);
    let service = ReplyService::from_config(cfg, profile)?;
    Ok(handlers::router(AppState::new(service), &cfg.server.ask_path))
}
