pub mod asset;
pub mod dashboard;
pub mod maintenance;
pub mod user;

pub use asset::{Asset, AssetChanges, CreateAssetPayload, NewAsset, UpdateAssetPayload};
pub use dashboard::DashboardUpcomingItem;
pub use maintenance::{
    CreateMaintenancePayload, MaintenanceChanges, MaintenanceRecord, NewMaintenanceRecord,
    OwnedMaintenanceRecord, UpdateMaintenancePayload,
};
pub use user::{AuthPayload, User};

use serde::{Deserialize, Deserializer};

/// Lets `Option<Option<T>>` tell an absent field (`None`) from an explicit
/// `null` (`Some(None)`). Pair with `#[serde(default)]`.
pub(crate) fn deserialize_some<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    T::deserialize(deserializer).map(Some)
}
