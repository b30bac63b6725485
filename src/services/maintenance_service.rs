use std::sync::Arc;
use tracing::{debug, warn};

use super::{non_blank, parse_date, ServiceError};
use crate::database::models::{
    CreateMaintenancePayload, MaintenanceChanges, MaintenanceRecord, NewMaintenanceRecord,
    UpdateMaintenancePayload,
};
use crate::store::Store;

const ASSET_DENIED: &str = "Access to asset denied or asset does not exist for this user.";
const RECORD_DENIED: &str = "Access to this maintenance record is denied.";
const RECORD_NOT_FOUND: &str = "Maintenance record not found or access denied";

/// Maintenance history, guarded by ownership of the parent asset
pub struct MaintenanceService {
    store: Arc<dyn Store>,
}

impl MaintenanceService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    async fn ensure_asset_owned(&self, user_id: i32, asset_id: i32) -> Result<(), ServiceError> {
        if self.store.find_asset(asset_id, user_id).await?.is_none() {
            warn!("Asset ownership check failed: asset={} user={}", asset_id, user_id);
            return Err(ServiceError::Forbidden(ASSET_DENIED.to_string()));
        }
        Ok(())
    }

    pub async fn create(
        &self,
        user_id: i32,
        asset_id: i32,
        payload: CreateMaintenancePayload,
    ) -> Result<MaintenanceRecord, ServiceError> {
        self.ensure_asset_owned(user_id, asset_id).await?;
        let record = new_record(payload)?;

        let record = self.store.create_maintenance(asset_id, &record).await?;
        debug!("Created maintenance record {} on asset {}", record.id, asset_id);
        Ok(record)
    }

    pub async fn list_for_asset(&self, user_id: i32, asset_id: i32) -> Result<Vec<MaintenanceRecord>, ServiceError> {
        self.ensure_asset_owned(user_id, asset_id).await?;
        Ok(self.store.list_maintenance(asset_id).await?)
    }

    /// Missing record is 404; a record under someone else's asset is 403
    pub async fn get(&self, user_id: i32, record_id: i32) -> Result<MaintenanceRecord, ServiceError> {
        let owned = self
            .store
            .find_maintenance(record_id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(RECORD_NOT_FOUND.to_string()))?;

        if owned.owner_id != user_id {
            warn!("Maintenance record access denied: record={} user={}", record_id, user_id);
            return Err(ServiceError::Forbidden(RECORD_DENIED.to_string()));
        }
        Ok(owned.record)
    }

    pub async fn update(
        &self,
        user_id: i32,
        record_id: i32,
        payload: UpdateMaintenancePayload,
    ) -> Result<MaintenanceRecord, ServiceError> {
        let changes = maintenance_changes(payload)?;
        self.get(user_id, record_id).await?;

        self.store
            .update_maintenance(record_id, &changes)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("{} for update", RECORD_NOT_FOUND)))
    }

    pub async fn delete(&self, user_id: i32, record_id: i32) -> Result<(), ServiceError> {
        self.get(user_id, record_id).await?;

        if !self.store.delete_maintenance(record_id).await? {
            return Err(ServiceError::NotFound(format!("{} for deletion", RECORD_NOT_FOUND)));
        }
        debug!("Deleted maintenance record {}", record_id);
        Ok(())
    }
}

fn new_record(payload: CreateMaintenancePayload) -> Result<NewMaintenanceRecord, ServiceError> {
    let service_description = non_blank(payload.service_description);
    let date_performed = non_blank(payload.date_performed);
    let (Some(service_description), Some(date_performed)) = (service_description, date_performed) else {
        return Err(ServiceError::validation(
            "Service description and date performed are required",
        ));
    };

    let next_maintenance_due_date = non_blank(payload.next_maintenance_due_date)
        .map(|raw| parse_date("next_maintenance_due_date", &raw))
        .transpose()?;

    Ok(NewMaintenanceRecord {
        service_description,
        date_performed: parse_date("date_performed", &date_performed)?,
        notes: non_blank(payload.notes),
        next_maintenance_due_date,
        next_maintenance_condition: non_blank(payload.next_maintenance_condition),
    })
}

fn maintenance_changes(payload: UpdateMaintenancePayload) -> Result<MaintenanceChanges, ServiceError> {
    if payload.is_empty() {
        return Err(ServiceError::validation("No update data provided"));
    }

    let service_description = match payload.service_description {
        None => None,
        Some(value) => Some(
            non_blank(value)
                .ok_or_else(|| ServiceError::field("service_description", "Service description cannot be empty"))?,
        ),
    };

    let date_performed = match payload.date_performed {
        None => None,
        Some(value) => {
            let raw = non_blank(value)
                .ok_or_else(|| ServiceError::field("date_performed", "Date performed cannot be empty"))?;
            Some(parse_date("date_performed", &raw)?)
        }
    };

    let next_maintenance_due_date = match payload.next_maintenance_due_date {
        None => None,
        Some(value) => Some(
            non_blank(value)
                .map(|raw| parse_date("next_maintenance_due_date", &raw))
                .transpose()?,
        ),
    };

    Ok(MaintenanceChanges {
        service_description,
        date_performed,
        notes: payload.notes.map(non_blank),
        next_maintenance_due_date,
        next_maintenance_condition: payload.next_maintenance_condition.map(non_blank),
    })
}
