use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::{error, warn};

use crate::domain::DomainError;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Malformed payload: {0}")]
    BadRequest(String),

    #[error("Invalid email or password")]
    Unauthorized,

    #[error("{0}")]
    Conflict(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Store unavailable")]
    StoreUnavailable(String),

    #[error("Store timed out")]
    Timeout,
}

impl From<DomainError> for AppError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::InvalidInput(msg) => AppError::BadRequest(msg),
            DomainError::Conflict(msg) => AppError::Conflict(msg),
            DomainError::NotFound(msg) => AppError::NotFound(msg),
            DomainError::StoreUnavailable(msg) => AppError::StoreUnavailable(msg),
            DomainError::Timeout(_) => AppError::Timeout,
        }
    }
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::StoreUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Timeout => StatusCode::GATEWAY_TIMEOUT,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Store details stay in the log; clients get the generic message.
        match &self {
            AppError::StoreUnavailable(detail) => error!("Store unavailable: {detail}"),
            AppError::Timeout => error!("Store timed out"),
            other => warn!("Request rejected: {other}"),
        }

        (status, Json(json!({ "message": self.to_string() }))).into_response()
    }
}
