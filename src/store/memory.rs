use async_trait::async_trait;
use chrono::Utc;
use std::cmp::Reverse;
use tokio::sync::RwLock;

use super::Store;
use crate::database::models::{
    Asset, AssetChanges, DashboardUpcomingItem, MaintenanceChanges, MaintenanceRecord, NewAsset,
    NewMaintenanceRecord, OwnedMaintenanceRecord, User,
};
use crate::database::DatabaseError;
use crate::upcoming::collect_upcoming;

#[derive(Default)]
struct State {
    users: Vec<User>,
    assets: Vec<Asset>,
    records: Vec<MaintenanceRecord>,
    next_user_id: i32,
    next_asset_id: i32,
    next_record_id: i32,
}

fn next_id(counter: &mut i32) -> i32 {
    *counter += 1;
    *counter
}

/// Process-local store with the same observable behaviour as `PgStore`.
/// Used by `STORE_BACKEND=memory` and the test suites.
#[derive(Default)]
pub struct MemoryStore {
    state: RwLock<State>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn ping(&self) -> Result<(), DatabaseError> {
        Ok(())
    }

    async fn create_user(&self, email: &str, password_hash: &str) -> Result<User, DatabaseError> {
        let mut state = self.state.write().await;
        if state.users.iter().any(|u| u.email == email) {
            return Err(DatabaseError::Conflict("User already exists with this email".to_string()));
        }

        let now = Utc::now();
        let user = User {
            id: next_id(&mut state.next_user_id),
            email: email.to_string(),
            password_hash: password_hash.to_string(),
            created_at: now,
            updated_at: now,
        };
        state.users.push(user.clone());
        Ok(user)
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, DatabaseError> {
        let state = self.state.read().await;
        Ok(state.users.iter().find(|u| u.email == email).cloned())
    }

    async fn find_user_by_id(&self, user_id: i32) -> Result<Option<User>, DatabaseError> {
        let state = self.state.read().await;
        Ok(state.users.iter().find(|u| u.id == user_id).cloned())
    }

    async fn create_asset(&self, user_id: i32, asset: &NewAsset) -> Result<Asset, DatabaseError> {
        let mut state = self.state.write().await;
        if !state.users.iter().any(|u| u.id == user_id) {
            return Err(DatabaseError::QueryError(format!("user {} does not exist", user_id)));
        }

        let now = Utc::now();
        let asset = Asset {
            id: next_id(&mut state.next_asset_id),
            user_id,
            name: asset.name.clone(),
            description: asset.description.clone(),
            created_at: now,
            updated_at: now,
        };
        state.assets.push(asset.clone());
        Ok(asset)
    }

    async fn list_assets(&self, user_id: i32) -> Result<Vec<Asset>, DatabaseError> {
        let state = self.state.read().await;
        let mut assets: Vec<Asset> = state.assets.iter().filter(|a| a.user_id == user_id).cloned().collect();
        assets.sort_by_key(|a| Reverse((a.created_at, a.id)));
        Ok(assets)
    }

    async fn find_asset(&self, asset_id: i32, user_id: i32) -> Result<Option<Asset>, DatabaseError> {
        let state = self.state.read().await;
        Ok(state
            .assets
            .iter()
            .find(|a| a.id == asset_id && a.user_id == user_id)
            .cloned())
    }

    async fn update_asset(
        &self,
        asset_id: i32,
        user_id: i32,
        changes: &AssetChanges,
    ) -> Result<Option<Asset>, DatabaseError> {
        let mut state = self.state.write().await;
        let Some(asset) = state
            .assets
            .iter_mut()
            .find(|a| a.id == asset_id && a.user_id == user_id)
        else {
            return Ok(None);
        };

        if changes.is_empty() {
            return Ok(Some(asset.clone()));
        }
        if let Some(name) = &changes.name {
            asset.name = name.clone();
        }
        if let Some(description) = &changes.description {
            asset.description = description.clone();
        }
        asset.updated_at = Utc::now();
        Ok(Some(asset.clone()))
    }

    async fn delete_asset(&self, asset_id: i32, user_id: i32) -> Result<bool, DatabaseError> {
        let mut state = self.state.write().await;
        let before = state.assets.len();
        state.assets.retain(|a| !(a.id == asset_id && a.user_id == user_id));
        if state.assets.len() == before {
            return Ok(false);
        }
        state.records.retain(|r| r.asset_id != asset_id);
        Ok(true)
    }

    async fn create_maintenance(
        &self,
        asset_id: i32,
        record: &NewMaintenanceRecord,
    ) -> Result<MaintenanceRecord, DatabaseError> {
        let mut state = self.state.write().await;
        if !state.assets.iter().any(|a| a.id == asset_id) {
            return Err(DatabaseError::QueryError(format!("asset {} does not exist", asset_id)));
        }

        let now = Utc::now();
        let record = MaintenanceRecord {
            id: next_id(&mut state.next_record_id),
            asset_id,
            service_description: record.service_description.clone(),
            date_performed: record.date_performed,
            notes: record.notes.clone(),
            next_maintenance_due_date: record.next_maintenance_due_date,
            next_maintenance_condition: record.next_maintenance_condition.clone(),
            created_at: now,
            updated_at: now,
        };
        state.records.push(record.clone());
        Ok(record)
    }

    async fn list_maintenance(&self, asset_id: i32) -> Result<Vec<MaintenanceRecord>, DatabaseError> {
        let state = self.state.read().await;
        let mut records: Vec<MaintenanceRecord> =
            state.records.iter().filter(|r| r.asset_id == asset_id).cloned().collect();
        records.sort_by_key(|r| Reverse((r.date_performed, r.created_at, r.id)));
        Ok(records)
    }

    async fn find_maintenance(&self, record_id: i32) -> Result<Option<OwnedMaintenanceRecord>, DatabaseError> {
        let state = self.state.read().await;
        let Some(record) = state.records.iter().find(|r| r.id == record_id) else {
            return Ok(None);
        };
        Ok(state
            .assets
            .iter()
            .find(|a| a.id == record.asset_id)
            .map(|asset| OwnedMaintenanceRecord {
                record: record.clone(),
                owner_id: asset.user_id,
            }))
    }

    async fn update_maintenance(
        &self,
        record_id: i32,
        changes: &MaintenanceChanges,
    ) -> Result<Option<MaintenanceRecord>, DatabaseError> {
        let mut state = self.state.write().await;
        let Some(record) = state.records.iter_mut().find(|r| r.id == record_id) else {
            return Ok(None);
        };

        if changes.is_empty() {
            return Ok(Some(record.clone()));
        }
        if let Some(description) = &changes.service_description {
            record.service_description = description.clone();
        }
        if let Some(date) = changes.date_performed {
            record.date_performed = date;
        }
        if let Some(notes) = &changes.notes {
            record.notes = notes.clone();
        }
        if let Some(due) = changes.next_maintenance_due_date {
            record.next_maintenance_due_date = due;
        }
        if let Some(condition) = &changes.next_maintenance_condition {
            record.next_maintenance_condition = condition.clone();
        }
        record.updated_at = Utc::now();
        Ok(Some(record.clone()))
    }

    async fn delete_maintenance(&self, record_id: i32) -> Result<bool, DatabaseError> {
        let mut state = self.state.write().await;
        let before = state.records.len();
        state.records.retain(|r| r.id != record_id);
        Ok(state.records.len() < before)
    }

    async fn latest_upcoming(&self, user_id: i32) -> Result<Vec<DashboardUpcomingItem>, DatabaseError> {
        let state = self.state.read().await;
        let assets: Vec<Asset> = state.assets.iter().filter(|a| a.user_id == user_id).cloned().collect();
        Ok(collect_upcoming(&assets, &state.records))
    }
}
