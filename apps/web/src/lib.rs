//! # Tipsplit Web
//!
//! axum server for the public calculator and the admin dashboard.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Web Server                                     │
//! │                                                                         │
//! │  Browser / JSON client                                                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Router (routes/) ──► RequireAdmin (auth.rs) on /admin/dashboard        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  services/submission.rs     services/dashboard.rs                       │
//! │       │                            │                                    │
//! │       └────────────┬───────────────┘                                    │
//! │                    ▼                                                    │
//! │           tipsplit-db (SQLite)                                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod auth;
pub mod config;
pub mod error;
pub mod payload;
pub mod routes;
pub mod services;
pub mod views;

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use tipsplit_db::Database;

use crate::auth::SessionGate;
use crate::config::WebConfig;

/// Shared application state.
pub struct AppState {
    pub db: Database,
    pub gate: SessionGate,
}

impl AppState {
    pub fn new(db: Database, config: &WebConfig) -> Self {
        AppState {
            db,
            gate: SessionGate::new(
                config.admin_username.clone(),
                config.admin_password.clone(),
                &config.session_secret,
            ),
        }
    }
}

pub type SharedState = Arc<AppState>;

/// Builds the application router.
pub fn build_router(state: SharedState) -> Router {
    Router::new()
        .route("/", get(routes::calculations::new_form))
        .route("/calculations/new", get(routes::calculations::new_form))
        .route("/calculations", post(routes::calculations::create))
        .route(
            "/admin/login",
            get(routes::admin::login_form).post(routes::admin::login),
        )
        .route(
            "/admin/logout",
            post(routes::admin::logout).delete(routes::admin::logout),
        )
        .route("/admin/dashboard", get(routes::admin::dashboard))
        .route("/health", get(routes::health::health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
