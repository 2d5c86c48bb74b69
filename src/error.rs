// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application error types with consistent API responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::services::normalizer::NormalizeError;

/// Application error type that converts to HTTP responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(String),

    #[error("Unknown activity category: {0}")]
    UnknownCategory(String),

    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<NormalizeError> for AppError {
    fn from(err: NormalizeError) -> Self {
        match err {
            NormalizeError::InvalidQuantity { .. } => AppError::InvalidQuantity(err.to_string()),
            NormalizeError::UnknownCategory(unknown) => AppError::UnknownCategory(unknown.0),
        }
    }
}

/// JSON error response body
#[derive(Serialize)]
struct ErrorResponse {
    success: bool,
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, details) = match &self {
            AppError::InvalidQuantity(msg) => (
                StatusCode::BAD_REQUEST,
                "invalid_quantity",
                Some(msg.clone()),
            ),
            AppError::UnknownCategory(tag) => (
                StatusCode::NOT_FOUND,
                "unknown_category",
                Some(format!("Unknown activity category: {}", tag)),
            ),
            AppError::BadRequest(msg) => (
                StatusCode::BAD_REQUEST,
                "bad_request",
                Some(msg.clone()),
            ),
            AppError::Internal(err) => {
                tracing::error!(error = %err, "Internal server error");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", None)
            }
        };

        let body = ErrorResponse {
            success: false,
            error: error.to_string(),
            details,
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for handlers
pub type Result<T> = std::result::Result<T, AppError>;
