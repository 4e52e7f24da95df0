// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use axum::{
    Json,
    extract::{
        Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::{HeaderName, HeaderValue},
    response::IntoResponse,
};
use serde_json::{Value, json};

use super::error::{ApiError, ApiResult};
use super::state::AppState;
use crate::logs::{self, LogRecord};
use crate::validation::LogQueryParams;

pub const SKIPPED_LINES_HEADER: &str = "x-skipped-lines";

/// GET /api/logs?level=..&startDate=..&endDate=..
///
/// Responds with the matching entries; the number of undecodable lines goes in
/// the `x-skipped-lines` header.
pub async fn query_logs(
    State(state): State<AppState>,
    query: Result<Query<LogQueryParams>, QueryRejection>,
) -> ApiResult<impl IntoResponse> {
    let Query(params) = query?;
    let q = params.into_query();
    let path = state.log_path().to_path_buf();
    let scan = tokio::task::spawn_blocking(move || logs::query_logs(&path, &q))
        .await
        .map_err(|e| ApiError::Internal {
            context: "Failed to fetch logs",
            message: e.to_string(),
        })??;

    let skipped = (
        HeaderName::from_static(SKIPPED_LINES_HEADER),
        HeaderValue::from(scan.skipped.len()),
    );
    Ok(([skipped], Json(scan.entries)))
}

/// POST /api/logs - append a client-side record to the log file.
pub async fn append_log(
    State(state): State<AppState>,
    payload: Result<Json<LogRecord>, JsonRejection>,
) -> ApiResult<Json<Value>> {
    let Json(record) = payload?;
    let sink = state.sink().clone();
    tokio::task::spawn_blocking(move || sink.append(record))
        .await
        .map_err(|e| ApiError::Internal {
            context: "Failed to record log",
            message: e.to_string(),
        })?
        .map_err(|e| ApiError::Internal {
            context: "Failed to record log",
            message: e.to_string(),
        })?;
    Ok(Json(json!({ "message": "Log recorded" })))
}
