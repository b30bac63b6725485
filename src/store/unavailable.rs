use async_trait::async_trait;

use super::Store;
use crate::database::models::{
    Asset, AssetChanges, DashboardUpcomingItem, MaintenanceChanges, MaintenanceRecord, NewAsset,
    NewMaintenanceRecord, OwnedMaintenanceRecord, User,
};
use crate::database::DatabaseError;

/// Store whose backend is never reachable; every call times out on the pool
pub struct UnavailableStore;

fn down<T>() -> Result<T, DatabaseError> {
    Err(DatabaseError::Sqlx(sqlx::Error::PoolTimedOut))
}

#[async_trait]
impl Store for UnavailableStore {
    async fn ping(&self) -> Result<(), DatabaseError> {
        down()
    }

    async fn create_user(&self, _email: &str, _password_hash: &str) -> Result<User, DatabaseError> {
        down()
    }

    async fn find_user_by_email(&self, _email: &str) -> Result<Option<User>, DatabaseError> {
        down()
    }

    async fn find_user_by_id(&self, _user_id: i32) -> Result<Option<User>, DatabaseError> {
        down()
    }

    async fn create_asset(&self, _user_id: i32, _asset: &NewAsset) -> Result<Asset, DatabaseError> {
        down()
    }

    async fn list_assets(&self, _user_id: i32) -> Result<Vec<Asset>, DatabaseError> {
        down()
    }

    async fn find_asset(&self, _asset_id: i32, _user_id: i32) -> Result<Option<Asset>, DatabaseError> {
        down()
    }

    async fn update_asset(
        &self,
        _asset_id: i32,
        _user_id: i32,
        _changes: &AssetChanges,
    ) -> Result<Option<Asset>, DatabaseError> {
        down()
    }

    async fn delete_asset(&self, _asset_id: i32, _user_id: i32) -> Result<bool, DatabaseError> {
        down()
    }

    async fn create_maintenance(
        &self,
        _asset_id: i32,
        _record: &NewMaintenanceRecord,
    ) -> Result<MaintenanceRecord, DatabaseError> {
        down()
    }

    async fn list_maintenance(&self, _asset_id: i32) -> Result<Vec<MaintenanceRecord>, DatabaseError> {
        down()
    }

    async fn find_maintenance(&self, _record_id: i32) -> Result<Option<OwnedMaintenanceRecord>, DatabaseError> {
        down()
    }

    async fn update_maintenance(
        &self,
        _record_id: i32,
        _changes: &MaintenanceChanges,
    ) -> Result<Option<MaintenanceRecord>, DatabaseError> {
        down()
    }

    async fn delete_maintenance(&self, _record_id: i32) -> Result<bool, DatabaseError> {
        down()
    }

    async fn latest_upcoming(&self, _user_id: i32) -> Result<Vec<DashboardUpcomingItem>, DatabaseError> {
        down()
    }
}
