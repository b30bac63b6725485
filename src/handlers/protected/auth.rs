use axum::extract::State;

use crate::database::models::User;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::server::AppState;

/// GET /api/auth/whoami - The account behind the bearer token
pub async fn whoami(State(state): State<AppState>, user: AuthUser) -> ApiResult<User> {
    let user = state.auth_service().whoami(user.id).await?;
    Ok(ApiResponse::success(user))
}
