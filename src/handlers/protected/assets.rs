use axum::extract::{Path, State};

use super::utils::parse_id;
use crate::database::models::{Asset, CreateAssetPayload, UpdateAssetPayload};
use crate::middleware::{ApiResponse, ApiResult, AuthUser, ValidJson};
use crate::server::AppState;

/// GET /api/assets - The caller's assets, newest first
pub async fn list(State(state): State<AppState>, user: AuthUser) -> ApiResult<Vec<Asset>> {
    let assets = state.asset_service().list(user.id).await?;
    Ok(ApiResponse::success(assets))
}

/// POST /api/assets - Create an asset
///
/// Expected Input:
/// ```json
/// { "name": "Delivery van", "description": "Plate ABC-1234" }
/// ```
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    ValidJson(payload): ValidJson<CreateAssetPayload>,
) -> ApiResult<Asset> {
    let asset = state.asset_service().create(user.id, payload).await?;
    Ok(ApiResponse::created(asset))
}

/// GET /api/assets/:assetId
pub async fn get(
    State(state): State<AppState>,
    user: AuthUser,
    Path(asset_id): Path<String>,
) -> ApiResult<Asset> {
    let asset_id = parse_id(&asset_id, "asset")?;
    let asset = state.asset_service().get(user.id, asset_id).await?;
    Ok(ApiResponse::success(asset))
}

/// PUT /api/assets/:assetId - Partial update; `description: null` clears it
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    Path(asset_id): Path<String>,
    ValidJson(payload): ValidJson<UpdateAssetPayload>,
) -> ApiResult<Asset> {
    let asset_id = parse_id(&asset_id, "asset")?;
    let asset = state.asset_service().update(user.id, asset_id, payload).await?;
    Ok(ApiResponse::success(asset))
}

/// DELETE /api/assets/:assetId - Also removes the asset's maintenance history
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path(asset_id): Path<String>,
) -> ApiResult<()> {
    let asset_id = parse_id(&asset_id, "asset")?;
    state.asset_service().delete(user.id, asset_id).await?;
    Ok(ApiResponse::no_content())
}
