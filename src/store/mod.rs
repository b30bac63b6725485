// Persistence seam between the services and the backing database
use async_trait::async_trait;

use crate::database::models::{
    Asset, AssetChanges, DashboardUpcomingItem, MaintenanceChanges, MaintenanceRecord, NewAsset,
    NewMaintenanceRecord, OwnedMaintenanceRecord, User,
};
use crate::database::DatabaseError;

pub mod memory;
pub mod postgres;
#[cfg(test)]
pub(crate) mod unavailable;

pub use memory::MemoryStore;
pub use postgres::PgStore;

/// Every operation is a single read or a single statement. Ownership checks
/// live in the services; asset queries are additionally scoped by `user_id`.
#[async_trait]
pub trait Store: Send + Sync {
    /// Connectivity probe used by the health endpoint
    async fn ping(&self) -> Result<(), DatabaseError>;

    /// `DatabaseError::Conflict` when the email is taken
    async fn create_user(&self, email: &str, password_hash: &str) -> Result<User, DatabaseError>;
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, DatabaseError>;
    async fn find_user_by_id(&self, user_id: i32) -> Result<Option<User>, DatabaseError>;

    async fn create_asset(&self, user_id: i32, asset: &NewAsset) -> Result<Asset, DatabaseError>;
    /// Newest first
    async fn list_assets(&self, user_id: i32) -> Result<Vec<Asset>, DatabaseError>;
    async fn find_asset(&self, asset_id: i32, user_id: i32) -> Result<Option<Asset>, DatabaseError>;
    async fn update_asset(
        &self,
        asset_id: i32,
        user_id: i32,
        changes: &AssetChanges,
    ) -> Result<Option<Asset>, DatabaseError>;
    /// Cascades to the asset's maintenance records
    async fn delete_asset(&self, asset_id: i32, user_id: i32) -> Result<bool, DatabaseError>;

    async fn create_maintenance(
        &self,
        asset_id: i32,
        record: &NewMaintenanceRecord,
    ) -> Result<MaintenanceRecord, DatabaseError>;
    /// `date_performed` DESC, then `created_at` DESC
    async fn list_maintenance(&self, asset_id: i32) -> Result<Vec<MaintenanceRecord>, DatabaseError>;
    /// The record with the id of the user owning its asset
    async fn find_maintenance(&self, record_id: i32) -> Result<Option<OwnedMaintenanceRecord>, DatabaseError>;
    async fn update_maintenance(
        &self,
        record_id: i32,
        changes: &MaintenanceChanges,
    ) -> Result<Option<MaintenanceRecord>, DatabaseError>;
    async fn delete_maintenance(&self, record_id: i32) -> Result<bool, DatabaseError>;

    /// For each of the user's assets, its latest record when that record
    /// announces a next service. Unordered.
    async fn latest_upcoming(&self, user_id: i32) -> Result<Vec<DashboardUpcomingItem>, DatabaseError>;
}
