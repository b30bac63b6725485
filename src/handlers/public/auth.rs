use axum::extract::State;

use crate::database::models::AuthPayload;
use crate::middleware::{ApiResponse, ApiResult, ValidJson};
use crate::server::AppState;
use crate::services::AuthResponse;

/// POST /api/auth/register - Create an account and return a token
///
/// Expected Input:
/// ```json
/// { "email": "owner@example.com", "password": "secret1" }
/// ```
///
/// Responds 201 with `{ message, user, token }`.
pub async fn register(
    State(state): State<AppState>,
    ValidJson(payload): ValidJson<AuthPayload>,
) -> ApiResult<AuthResponse> {
    let response = state.auth_service().register(payload).await?;
    Ok(ApiResponse::created(response))
}

/// POST /api/auth/login - Exchange credentials for a token
pub async fn login(
    State(state): State<AppState>,
    ValidJson(payload): ValidJson<AuthPayload>,
) -> ApiResult<AuthResponse> {
    let response = state.auth_service().login(payload).await?;
    Ok(ApiResponse::success(response))
}
