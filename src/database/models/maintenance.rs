use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::deserialize_some;

/// One service performed on an asset, optionally announcing the next one
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct MaintenanceRecord {
    pub id: i32,
    pub asset_id: i32,
    pub service_description: String,
    pub date_performed: NaiveDate,
    pub notes: Option<String>,
    pub next_maintenance_due_date: Option<NaiveDate>,
    pub next_maintenance_condition: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl MaintenanceRecord {
    /// Whether the record announces a next service by date or by condition
    pub fn has_next_signal(&self) -> bool {
        self.next_maintenance_due_date.is_some() || self.next_maintenance_condition.is_some()
    }
}

/// A record joined with the user id owning its parent asset
#[derive(Debug, Clone, FromRow)]
pub struct OwnedMaintenanceRecord {
    #[sqlx(flatten)]
    pub record: MaintenanceRecord,
    pub owner_id: i32,
}

/// Body of POST /api/assets/:assetId/maintenance. Dates are `YYYY-MM-DD`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateMaintenancePayload {
    pub service_description: Option<String>,
    pub date_performed: Option<String>,
    pub notes: Option<String>,
    pub next_maintenance_due_date: Option<String>,
    pub next_maintenance_condition: Option<String>,
}

/// Body of PUT /api/maintenance/:recordId
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateMaintenancePayload {
    #[serde(default, deserialize_with = "deserialize_some", skip_serializing_if = "Option::is_none")]
    pub service_description: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_some", skip_serializing_if = "Option::is_none")]
    pub date_performed: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_some", skip_serializing_if = "Option::is_none")]
    pub notes: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_some", skip_serializing_if = "Option::is_none")]
    pub next_maintenance_due_date: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_some", skip_serializing_if = "Option::is_none")]
    pub next_maintenance_condition: Option<Option<String>>,
}

impl UpdateMaintenancePayload {
    pub fn is_empty(&self) -> bool {
        self.service_description.is_none()
            && self.date_performed.is_none()
            && self.notes.is_none()
            && self.next_maintenance_due_date.is_none()
            && self.next_maintenance_condition.is_none()
    }
}

/// Validated input for inserting a record
#[derive(Debug, Clone, PartialEq)]
pub struct NewMaintenanceRecord {
    pub service_description: String,
    pub date_performed: NaiveDate,
    pub notes: Option<String>,
    pub next_maintenance_due_date: Option<NaiveDate>,
    pub next_maintenance_condition: Option<String>,
}

/// Validated partial update; `Some(None)` clears a nullable column
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MaintenanceChanges {
    pub service_description: Option<String>,
    pub date_performed: Option<NaiveDate>,
    pub notes: Option<Option<String>>,
    pub next_maintenance_due_date: Option<Option<NaiveDate>>,
    pub next_maintenance_condition: Option<Option<String>>,
}

impl MaintenanceChanges {
    pub fn is_empty(&self) -> bool {
        self.service_description.is_none()
            && self.date_performed.is_none()
            && self.notes.is_none()
            && self.next_maintenance_due_date.is_none()
            && self.next_maintenance_condition.is_none()
    }
}
