use axum::extract::{Path, State};

use super::utils::parse_id;
use crate::database::models::{CreateMaintenancePayload, MaintenanceRecord, UpdateMaintenancePayload};
use crate::middleware::{ApiResponse, ApiResult, AuthUser, ValidJson};
use crate::server::AppState;

/// GET /api/assets/:assetId/maintenance - History, most recent service first
pub async fn list(
    State(state): State<AppState>,
    user: AuthUser,
    Path(asset_id): Path<String>,
) -> ApiResult<Vec<MaintenanceRecord>> {
    let asset_id = parse_id(&asset_id, "asset")?;
    let records = state.maintenance_service().list_for_asset(user.id, asset_id).await?;
    Ok(ApiResponse::success(records))
}

/// POST /api/assets/:assetId/maintenance - Log a service
///
/// Expected Input:
/// ```json
/// {
///   "service_description": "Oil change",
///   "date_performed": "2024-03-01",
///   "notes": "5W-30",
///   "next_maintenance_due_date": "2024-09-01",
///   "next_maintenance_condition": "or 10,000 km"
/// }
/// ```
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    Path(asset_id): Path<String>,
    ValidJson(payload): ValidJson<CreateMaintenancePayload>,
) -> ApiResult<MaintenanceRecord> {
    let asset_id = parse_id(&asset_id, "asset")?;
    let record = state.maintenance_service().create(user.id, asset_id, payload).await?;
    Ok(ApiResponse::created(record))
}

/// GET /api/maintenance/:recordId
pub async fn get(
    State(state): State<AppState>,
    user: AuthUser,
    Path(record_id): Path<String>,
) -> ApiResult<MaintenanceRecord> {
    let record_id = parse_id(&record_id, "maintenance record")?;
    let record = state.maintenance_service().get(user.id, record_id).await?;
    Ok(ApiResponse::success(record))
}

/// PUT /api/maintenance/:recordId - Partial update; `null` clears optional fields
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    Path(record_id): Path<String>,
    ValidJson(payload): ValidJson<UpdateMaintenancePayload>,
) -> ApiResult<MaintenanceRecord> {
    let record_id = parse_id(&record_id, "maintenance record")?;
    let record = state.maintenance_service().update(user.id, record_id, payload).await?;
    Ok(ApiResponse::success(record))
}

/// DELETE /api/maintenance/:recordId
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path(record_id): Path<String>,
) -> ApiResult<()> {
    let record_id = parse_id(&record_id, "maintenance record")?;
    state.maintenance_service().delete(user.id, record_id).await?;
    Ok(ApiResponse::no_content())
}
