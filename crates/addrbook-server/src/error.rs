//! HTTP error type
//!
//! Every failure leaves the service as a status code plus `{"error": ...}`.
//! Store causes are logged, never returned to the caller.

use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    NotFound(&'static str),

    #[error("{message}")]
    Store {
        message: &'static str,
        cause: anyhow::Error,
    },

    #[error(transparent)]
    Json(#[from] JsonRejection),

    #[error(transparent)]
    Query(#[from] QueryRejection),
}

impl ApiError {
    /// Wraps a store failure under an operation-specific message.
    pub fn store(message: &'static str) -> impl FnOnce(anyhow::Error) -> Self {
        move |cause| ApiError::Store { message, cause }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Store { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Json(rejection) => rejection.status(),
            ApiError::Query(rejection) => rejection.status(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let message = match &self {
            ApiError::Store { message, cause } => {
                tracing::error!("{}: {:#}", message, cause);
                message.to_string()
            }
            ApiError::Json(rejection) => rejection.body_text(),
            ApiError::Query(rejection) => rejection.body_text(),
            ApiError::NotFound(message) => message.to_string(),
        };

        (self.status(), Json(json!({ "error": message }))).into_response()
    }
}
