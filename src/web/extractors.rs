//! Request extractors
//!
//! [`JsonBody`] behaves like `axum::Json` but reports malformed or oversized
//! bodies through [`AppError`], so every error response shares one shape.

use axum::{extract::rejection::JsonRejection, extract::FromRequest, http::StatusCode};

use crate::errors::AppError;

#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct JsonBody<T>(pub T);

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        let status = rejection.status();
        if status == StatusCode::PAYLOAD_TOO_LARGE {
            AppError::PayloadTooLarge
        } else {
            AppError::validation(rejection.body_text())
        }
    }
}
