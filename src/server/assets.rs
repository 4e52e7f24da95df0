// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use axum::{
    Json,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::StatusCode,
};

use super::error::{ApiError, ApiResult};
use super::state::AppState;
use crate::models::{Asset, WriteResult};
use crate::validation::{CreateAssetRequest, UpdateAssetRequest};

/// GET /api/assets
pub async fn list_assets(State(state): State<AppState>) -> ApiResult<Json<Vec<Asset>>> {
    let assets = state
        .store()
        .list_assets()
        .map_err(ApiError::store("Failed to fetch assets"))?;
    Ok(Json(assets))
}

/// POST /api/assets
pub async fn create_asset(
    State(state): State<AppState>,
    payload: Result<Json<CreateAssetRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<WriteResult>)> {
    let Json(req) = payload?;
    let asset = req.validate()?;
    let res = state
        .store()
        .create_asset(&asset)
        .map_err(ApiError::store("Failed to create asset"))?;
    Ok((StatusCode::CREATED, Json(res)))
}

/// PUT /api/assets/{id}. An unknown id answers 200 with `rowsAffected: 0`.
pub async fn update_asset(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<UpdateAssetRequest>, JsonRejection>,
) -> ApiResult<Json<WriteResult>> {
    let Path(id) = id?;
    let Json(req) = payload?;
    let amount = req.validate()?;
    let res = state
        .store()
        .update_asset_amount(id, amount)
        .map_err(ApiError::store("Failed to update asset"))?;
    Ok(Json(res))
}
