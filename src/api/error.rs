//! Transport-level errors and their JSON rendering

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::WaccError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error(transparent)]
    Validation(#[from] WaccError),
    /// Unexpected fault. Only a generic message reaches the caller.
    #[error("Server error")]
    Internal(#[source] anyhow::Error),
}

/// `{ "error": <message> }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self { error: error.into() }
    }
}

impl ApiError {
    pub fn status_code(&self) -> u16 {
        match self {
            ApiError::InvalidJson(_) | ApiError::Validation(_) => 400,
            ApiError::Internal(_) => 500,
        }
    }

    pub fn body(&self) -> ErrorBody {
        ErrorBody::new(self.to_string())
    }

    /// Log at a level matching the fault class
    pub fn log(&self) {
        match self {
            ApiError::InvalidJson(e) => log::warn!("Rejected malformed request body: {}", e),
            ApiError::Validation(e) => log::warn!("Rejected WACC input: {}", e),
            ApiError::Internal(e) => log::error!("Internal fault while handling request: {:#}", e),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        self.log();
        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self.body())).into_response()
    }
}
