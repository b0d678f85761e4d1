//! HTTP routes
//!
//! Wires the handlers into an axum router with the session layer applied.

pub mod catalog;
pub mod handlers;
pub mod responses;
pub mod views;

use axum::Router;
use axum::middleware::from_fn_with_state;
use axum::routing::{get, post};

use crate::middleware::resolve_viewer;
use crate::server::state::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::home))
        .route(
            "/signup",
            get(handlers::signup_form).post(handlers::signup_submit),
        )
        .route(
            "/login",
            get(handlers::login_form).post(handlers::login_submit),
        )
        .route("/profile", get(handlers::profile))
        .route("/logout", post(handlers::logout))
        .route("/theme/:mode", get(handlers::set_theme))
        .route("/preferences", get(handlers::preferences))
        .route("/sessions", get(handlers::sessions))
        .layer(from_fn_with_state(state.clone(), resolve_viewer))
        .with_state(state)
}
