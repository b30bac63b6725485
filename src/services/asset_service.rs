use std::sync::Arc;
use tracing::debug;

use super::{non_blank, ServiceError};
use crate::database::models::{Asset, AssetChanges, CreateAssetPayload, NewAsset, UpdateAssetPayload};
use crate::store::Store;

pub struct AssetService {
    store: Arc<dyn Store>,
}

impl AssetService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    pub async fn create(&self, user_id: i32, payload: CreateAssetPayload) -> Result<Asset, ServiceError> {
        let name = non_blank(payload.name).ok_or_else(|| ServiceError::field("name", "Asset name is required"))?;
        let asset = NewAsset {
            name,
            description: non_blank(payload.description),
        };

        let asset = self.store.create_asset(user_id, &asset).await?;
        debug!("Created asset {} for user {}", asset.id, user_id);
        Ok(asset)
    }

    pub async fn list(&self, user_id: i32) -> Result<Vec<Asset>, ServiceError> {
        Ok(self.store.list_assets(user_id).await?)
    }

    pub async fn get(&self, user_id: i32, asset_id: i32) -> Result<Asset, ServiceError> {
        self.store
            .find_asset(asset_id, user_id)
            .await?
            .ok_or_else(|| ServiceError::NotFound("Asset not found or access denied".to_string()))
    }

    pub async fn update(
        &self,
        user_id: i32,
        asset_id: i32,
        payload: UpdateAssetPayload,
    ) -> Result<Asset, ServiceError> {
        let changes = asset_changes(payload)?;
        self.store
            .update_asset(asset_id, user_id, &changes)
            .await?
            .ok_or_else(|| ServiceError::NotFound("Asset not found or access denied for update".to_string()))
    }

    /// Removes the asset and, through the store, its maintenance history
    pub async fn delete(&self, user_id: i32, asset_id: i32) -> Result<(), ServiceError> {
        if !self.store.delete_asset(asset_id, user_id).await? {
            return Err(ServiceError::NotFound(
                "Asset not found or access denied for deletion".to_string(),
            ));
        }
        debug!("Deleted asset {} for user {}", asset_id, user_id);
        Ok(())
    }
}

fn asset_changes(payload: UpdateAssetPayload) -> Result<AssetChanges, ServiceError> {
    if payload.is_empty() {
        return Err(ServiceError::validation("No update data provided"));
    }

    let name = match payload.name {
        Some(name) if name.trim().is_empty() => {
            return Err(ServiceError::field("name", "Asset name cannot be empty"))
        }
        other => other,
    };

    Ok(AssetChanges {
        name,
        description: payload.description.map(non_blank),
    })
}
