use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};

use super::ServiceError;
use crate::auth::{self, PasswordError};
use crate::config::SecurityConfig;
use crate::database::models::{AuthPayload, User};
use crate::store::Store;

/// Body returned by register and login
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub message: String,
    pub user: User,
    pub token: String,
}

pub struct AuthService {
    store: Arc<dyn Store>,
    security: SecurityConfig,
}

impl AuthService {
    pub fn new(store: Arc<dyn Store>, security: SecurityConfig) -> Self {
        Self { store, security }
    }

    pub async fn register(&self, payload: AuthPayload) -> Result<AuthResponse, ServiceError> {
        let (email, password) = credentials(payload)?;
        if password.chars().count() < self.security.min_password_length {
            return Err(ServiceError::field(
                "password",
                format!(
                    "Password must be at least {} characters long",
                    self.security.min_password_length
                ),
            ));
        }

        if self.store.find_user_by_email(&email).await?.is_some() {
            return Err(ServiceError::Conflict("User already exists with this email".to_string()));
        }

        let password_hash = tokio::task::spawn_blocking(move || auth::hash_password(&password))
            .await
            .map_err(|e| ServiceError::Internal(e.to_string()))?
            .map_err(|e| ServiceError::Internal(e.to_string()))?;

        let user = self.store.create_user(&email, &password_hash).await?;
        let token = auth::generate_jwt(&self.security, user.id, &user.email)?;
        info!("Registered user {}", user.id);

        Ok(AuthResponse {
            message: "User registered successfully".to_string(),
            user,
            token,
        })
    }

    pub async fn login(&self, payload: AuthPayload) -> Result<AuthResponse, ServiceError> {
        let (email, password) = credentials(payload)?;

        let Some(user) = self.store.find_user_by_email(&email).await? else {
            warn!("Login failed: unknown email");
            return Err(ServiceError::InvalidCredentials);
        };

        let stored_hash = user.password_hash.clone();
        let matches = tokio::task::spawn_blocking(move || auth::verify_password(&password, &stored_hash))
            .await
            .map_err(|e| ServiceError::Internal(e.to_string()))?
            .map_err(|e: PasswordError| ServiceError::Internal(e.to_string()))?;

        if !matches {
            warn!("Login failed for user {}", user.id);
            return Err(ServiceError::InvalidCredentials);
        }

        let token = auth::generate_jwt(&self.security, user.id, &user.email)?;
        Ok(AuthResponse {
            message: "Login successful".to_string(),
            user,
            token,
        })
    }

    /// The user behind a verified token
    pub async fn whoami(&self, user_id: i32) -> Result<User, ServiceError> {
        self.store
            .find_user_by_id(user_id)
            .await?
            .ok_or_else(|| ServiceError::NotFound("User not found".to_string()))
    }
}

fn credentials(payload: AuthPayload) -> Result<(String, String), ServiceError> {
    let email = payload.email.map(|e| e.trim().to_string()).filter(|e| !e.is_empty());
    let password = payload.password.filter(|p| !p.is_empty());
    match (email, password) {
        (Some(email), Some(password)) => Ok((email, password)),
        _ => Err(ServiceError::validation("Email and password are required")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::store::MemoryStore;

    fn service() -> AuthService {
        let mut security = AppConfig::development().security;
        security.jwt_secret = "test-secret".to_string();
        AuthService::new(Arc::new(MemoryStore::new()), security)
    }

    fn payload(email: &str, password: &str) -> AuthPayload {
        AuthPayload {
            email: Some(email.to_string()),
            password: Some(password.to_string()),
        }
    }

    #[tokio::test]
    async fn register_then_login() {
        let service = service();
        let registered = service.register(payload("owner@example.com", "secret1")).await.unwrap();
        assert_eq!(registered.message, "User registered successfully");
        assert_ne!(registered.user.password_hash, "secret1");

        let logged_in = service.login(payload("owner@example.com", "secret1")).await.unwrap();
        assert_eq!(logged_in.user.id, registered.user.id);

        let claims = auth::validate_jwt("test-secret", &logged_in.token).unwrap();
        assert_eq!(claims.id, registered.user.id);
        assert_eq!(claims.email, "owner@example.com");
    }

    #[tokio::test]
    async fn rejects_missing_and_short_credentials() {
        let service = service();
        let missing = AuthPayload {
            email: Some("owner@example.com".to_string()),
            password: None,
        };
        assert!(matches!(service.register(missing).await, Err(ServiceError::Validation { .. })));
        assert!(matches!(
            service.register(payload("owner@example.com", "12345")).await,
            Err(ServiceError::Validation { .. })
        ));
    }

    #[tokio::test]
    async fn duplicate_registration_conflicts() {
        let service = service();
        service.register(payload("owner@example.com", "secret1")).await.unwrap();
        assert!(matches!(
            service.register(payload("owner@example.com", "secret2")).await,
            Err(ServiceError::Conflict(_))
        ));
    }

    #[tokio::test]
    async fn wrong_password_and_unknown_email_look_the_same() {
        let service = service();
        service.register(payload("owner@example.com", "secret1")).await.unwrap();

        assert!(matches!(
            service.login(payload("owner@example.com", "wrong-pass")).await,
            Err(ServiceError::InvalidCredentials)
        ));
        assert!(matches!(
            service.login(payload("nobody@example.com", "secret1")).await,
            Err(ServiceError::InvalidCredentials)
        ));
    }
}
