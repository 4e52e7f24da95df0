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
    http::StatusCode,
};

use super::error::{ApiError, ApiResult};
use super::state::AppState;
use crate::models::{Bill, WriteResult};
use crate::validation::{CreateBillRequest, DateRangeParams};

/// GET /api/bills
pub async fn list_bills(State(state): State<AppState>) -> ApiResult<Json<Vec<Bill>>> {
    let bills = state
        .store()
        .list_bills()
        .map_err(ApiError::store("Failed to fetch bills"))?;
    Ok(Json(bills))
}

/// GET /api/bills/range?startDate=..&endDate=..
pub async fn list_bills_by_range(
    State(state): State<AppState>,
    query: Result<Query<DateRangeParams>, QueryRejection>,
) -> ApiResult<Json<Vec<Bill>>> {
    let Query(params) = query?;
    let (start, end) = params.validate()?;
    let bills = state
        .store()
        .list_bills_by_date_range(&start, &end)
        .map_err(ApiError::store("Failed to fetch bills"))?;
    Ok(Json(bills))
}

/// POST /api/bills
pub async fn create_bill(
    State(state): State<AppState>,
    payload: Result<Json<CreateBillRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<WriteResult>)> {
    let Json(req) = payload?;
    let bill = req.validate()?;
    let res = state
        .store()
        .create_bill(&bill)
        .map_err(ApiError::store("Failed to create bill"))?;
    Ok((StatusCode::CREATED, Json(res)))
}
