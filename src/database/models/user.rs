use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: i32,
    pub email: String,
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Body of POST /api/auth/register and POST /api/auth/login
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthPayload {
    pub email: Option<String>,
    pub password: Option<String>,
}
