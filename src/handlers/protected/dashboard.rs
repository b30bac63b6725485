use axum::extract::State;

use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::server::AppState;
use crate::upcoming::UpcomingEntry;

/// GET /api/dashboard/upcoming - Next service per asset, most urgent first
///
/// Expected Output:
/// ```json
/// [
///   {
///     "asset_id": 2,
///     "asset_name": "Forklift",
///     "asset_description": null,
///     "last_service_description": "Hydraulics check",
///     "next_maintenance_due_date": "2024-06-05",
///     "next_maintenance_condition": null,
///     "maintenance_record_id": 14,
///     "status": { "kind": "overdue" },
///     "status_label": "Overdue"
///   }
/// ]
/// ```
pub async fn upcoming(State(state): State<AppState>, user: AuthUser) -> ApiResult<Vec<UpcomingEntry>> {
    let entries = state.dashboard_service().upcoming(user.id).await?;
    Ok(ApiResponse::success(entries))
}
