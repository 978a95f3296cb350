// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application error types with consistent API responses.
//!
//! Store failures are classified here, at the boundary between the MongoDB
//! client and the handlers, so every error reaches the caller with a status
//! code and a machine-readable kind instead of an opaque string.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use mongodb::error::{ErrorKind, WriteFailure};
use serde::Serialize;

/// MongoDB server error code for a unique index violation.
pub const DUPLICATE_KEY_CODE: i32 = 11000;

/// Application error type that converts to HTTP responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Blank path parameter, malformed JSON body or failed field validation.
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    /// Unique `msisdn` constraint violated.
    #[error("{0}")]
    Conflict(String),

    /// Any other failure reported by the document store.
    #[error("{0}")]
    Store(String),

    /// A handler panicked. The detail is logged, never returned.
    #[error("Internal server error")]
    Internal(String),
}

impl AppError {
    /// Machine-readable error kind, stable across message changes.
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "validation_error",
            AppError::NotFound(_) => "not_found",
            AppError::Conflict(_) => "conflict",
            AppError::Store(_) => "store_error",
            AppError::Internal(_) => "internal_error",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Store(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<mongodb::error::Error> for AppError {
    fn from(err: mongodb::error::Error) -> Self {
        let duplicate = match &*err.kind {
            ErrorKind::Write(WriteFailure::WriteError(write_error))
                if write_error.code == DUPLICATE_KEY_CODE =>
            {
                Some(write_error.message.clone())
            }
            ErrorKind::Command(command_error) if command_error.code == DUPLICATE_KEY_CODE => {
                Some(command_error.message.clone())
            }
            _ => None,
        };

        match duplicate {
            Some(message) => AppError::Conflict(message),
            None => AppError::Store(err.to_string()),
        }
    }
}

/// JSON error response body.
///
/// `response` keeps the human-readable text older clients look at.
#[derive(Serialize)]
struct ErrorResponse {
    response: String,
    error: &'static str,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            AppError::Store(msg) => tracing::error!(error = %msg, "Database error"),
            AppError::Internal(msg) => tracing::error!(error = %msg, "Handler panicked"),
            AppError::Conflict(msg) => tracing::info!(error = %msg, "Duplicate msisdn rejected"),
            _ => tracing::debug!(error = %self, kind = self.kind(), "Request rejected"),
        }

        let body = ErrorResponse {
            response: self.to_string(),
            error: self.kind(),
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for handlers
pub type Result<T> = std::result::Result<T, AppError>;
