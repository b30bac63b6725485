use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::deserialize_some;

/// A piece of equipment or a vehicle owned by one user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Asset {
    pub id: i32,
    pub user_id: i32,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Body of POST /api/assets
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateAssetPayload {
    pub name: Option<String>,
    pub description: Option<String>,
}

/// Body of PUT /api/assets/:assetId. `description: null` clears it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateAssetPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_some", skip_serializing_if = "Option::is_none")]
    pub description: Option<Option<String>>,
}

impl UpdateAssetPayload {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none()
    }
}

/// Validated input for inserting an asset
#[derive(Debug, Clone, PartialEq)]
pub struct NewAsset {
    pub name: String,
    pub description: Option<String>,
}

/// Validated partial update; `None` leaves a column untouched
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AssetChanges {
    pub name: Option<String>,
    pub description: Option<Option<String>>,
}

impl AssetChanges {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_payload_distinguishes_null_from_absent() {
        let absent: UpdateAssetPayload = serde_json::from_str(r#"{"name":"Truck"}"#).unwrap();
        assert_eq!(absent.description, None);

        let cleared: UpdateAssetPayload = serde_json::from_str(r#"{"description":null}"#).unwrap();
        assert_eq!(cleared.description, Some(None));
        assert!(!cleared.is_empty());

        let empty: UpdateAssetPayload = serde_json::from_str("{}").unwrap();
        assert!(empty.is_empty());
    }

    #[test]
    fn update_payload_serializes_only_present_fields() {
        let payload = UpdateAssetPayload {
            name: None,
            description: Some(None),
        };
        let value = serde_json::to_value(&payload).unwrap();
        assert!(value.get("name").is_none());
        assert!(value["description"].is_null());
    }
}
