// Business rules between the HTTP handlers and the store
use chrono::NaiveDate;
use thiserror::Error;

use crate::auth::JwtError;
use crate::database::DatabaseError;

pub mod asset_service;
pub mod auth_service;
pub mod dashboard_service;
pub mod maintenance_service;

pub use asset_service::AssetService;
pub use auth_service::{AuthResponse, AuthService};
pub use dashboard_service::DashboardService;
pub use maintenance_service::MaintenanceService;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{message}")]
    Validation { message: String, field: Option<String> },

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error(transparent)]
    Database(#[from] DatabaseError),

    #[error(transparent)]
    Token(#[from] JwtError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ServiceError {
    pub fn validation(message: impl Into<String>) -> Self {
        ServiceError::Validation {
            message: message.into(),
            field: None,
        }
    }

    /// Validation failure attributed to one input field
    pub fn field(field: impl Into<String>, message: impl Into<String>) -> Self {
        ServiceError::Validation {
            message: message.into(),
            field: Some(field.into()),
        }
    }
}

/// Blank strings are stored as NULL
pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Strict `YYYY-MM-DD`
pub(crate) fn parse_date(field: &str, raw: &str) -> Result<NaiveDate, ServiceError> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|_| ServiceError::field(field, format!("Invalid {}: expected a YYYY-MM-DD date", field)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_strings_become_none() {
        assert_eq!(non_blank(Some("  ".to_string())), None);
        assert_eq!(non_blank(Some(String::new())), None);
        assert_eq!(non_blank(Some("x".to_string())), Some("x".to_string()));
        assert_eq!(non_blank(None), None);
    }

    #[test]
    fn parses_calendar_dates_only() {
        assert_eq!(
            parse_date("date_performed", "2024-03-01").unwrap(),
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
        );
        assert!(parse_date("date_performed", "2024-02-30").is_err());
        assert!(parse_date("date_performed", "03/01/2024").is_err());

        match parse_date("next_maintenance_due_date", "soon") {
            Err(ServiceError::Validation { field, .. }) => {
                assert_eq!(field.as_deref(), Some("next_maintenance_due_date"))
            }
            other => panic!("unexpected: {:?}", other),
        }
    }
}
