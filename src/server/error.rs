// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! HTTP error mapping. Every failure becomes `{"error": "..."}` with a status.

use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::logs::LogError;
use crate::store::StoreError;
use crate::validation::ValidationError;

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Storage failure; `context` is what the client sees.
    #[error("{context}: {source}")]
    Store {
        context: &'static str,
        #[source]
        source: StoreError,
    },

    #[error(transparent)]
    Logs(#[from] LogError),

    #[error("{context}: {message}")]
    Internal {
        context: &'static str,
        message: String,
    },

    #[error("Request timed out")]
    Timeout,

    #[error("Not found")]
    NotFound,
}

impl ApiError {
    pub fn store(context: &'static str) -> impl FnOnce(StoreError) -> ApiError {
        move |source| ApiError::Store { context, source }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rej: JsonRejection) -> Self {
        ApiError::Validation(ValidationError::Malformed(rej.body_text()))
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rej: QueryRejection) -> Self {
        ApiError::Validation(ValidationError::Malformed(rej.body_text()))
    }
}

impl From<PathRejection> for ApiError {
    fn from(rej: PathRejection) -> Self {
        ApiError::Validation(ValidationError::Malformed(rej.body_text()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::Validation(e) => (StatusCode::BAD_REQUEST, e.to_string()),
            ApiError::Store { context, source } => {
                tracing::error!("{}: {}", context, source);
                (StatusCode::INTERNAL_SERVER_ERROR, context.to_string())
            }
            ApiError::Logs(LogError::NotFound { path }) => {
                tracing::error!("Log file not found at path: {}", path.display());
                (StatusCode::NOT_FOUND, "Log file not found".to_string())
            }
            ApiError::Logs(LogError::PermissionDenied { path }) => {
                tracing::error!("No permission to read log file: {}", path.display());
                (
                    StatusCode::FORBIDDEN,
                    "No permission to read log file".to_string(),
                )
            }
            ApiError::Logs(e @ LogError::Io { .. }) => {
                tracing::error!("Error fetching logs: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to fetch logs".to_string(),
                )
            }
            ApiError::Internal { context, message } => {
                tracing::error!("{}: {}", context, message);
                (StatusCode::INTERNAL_SERVER_ERROR, context.to_string())
            }
            ApiError::Timeout => {
                tracing::warn!("Request timed out");
                (StatusCode::REQUEST_TIMEOUT, "Request timed out".to_string())
            }
            ApiError::NotFound => (StatusCode::NOT_FOUND, "Not found".to_string()),
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
