//! Error handlers
//!
//! Maps handler errors onto HTTP responses and reports them to the operator.

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use log::error;

use crate::error::types::AppError;

/// Report an error on the operator channel
pub fn handle_error(err: &AppError) {
    error!("Portal Server Error: {}", err);
}

/// Convert error to HTTP status code
pub fn error_to_status(err: &AppError) -> StatusCode {
    match err {
        AppError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        AppError::Session(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        handle_error(&self);
        // Internal details stay in the operator log
        let body = Html("<h1>Error interno del servidor</h1>");
        (error_to_status(&self), body).into_response()
    }
}
