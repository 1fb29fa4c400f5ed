pub mod activities;
pub mod site;

use axum::{
    Json,
    extract::rejection::QueryRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use signup_core::SignupError;
use tracing::{error, info};

/// Standard API error response
#[derive(Serialize)]
pub struct ErrorResponse {
    pub detail: String,
}

/// Plain confirmation returned by mutating endpoints
#[derive(Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Convert anyhow errors to HTTP responses
#[derive(Debug)]
pub struct AppError(anyhow::Error);

impl AppError {
    fn status(&self) -> StatusCode {
        if let Some(err) = self.0.downcast_ref::<SignupError>() {
            return match err {
                SignupError::ActivityNotFound(_) => StatusCode::NOT_FOUND,
                err if err.is_conflict() => StatusCode::BAD_REQUEST,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            };
        }

        if self.0.downcast_ref::<QueryRejection>().is_some() {
            return StatusCode::UNPROCESSABLE_ENTITY;
        }

        StatusCode::INTERNAL_SERVER_ERROR
    }
}

impl AppError {
    /// Activity and email of a rejected signup or unregister.
    fn roster_conflict(&self) -> Option<(&str, &str)> {
        match self.0.downcast_ref::<SignupError>()? {
            SignupError::AlreadySignedUp { activity, email }
            | SignupError::NotSignedUp { activity, email } => {
                Some((activity.as_str(), email.as_str()))
            }
            _ => None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(error = %self.0, "Request failed");
        }
        if let Some((activity, email)) = self.roster_conflict() {
            info!(%activity, %email, "Rejected roster change: {}", self.0);
        }

        let body = Json(ErrorResponse {
            detail: self.0.to_string(),
        });
        (status, body).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}
