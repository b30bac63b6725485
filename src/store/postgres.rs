use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};

use super::Store;
use crate::database::models::{
    Asset, AssetChanges, DashboardUpcomingItem, MaintenanceChanges, MaintenanceRecord, NewAsset,
    NewMaintenanceRecord, OwnedMaintenanceRecord, User,
};
use crate::database::{DatabaseError, DatabaseManager};

const LATEST_UPCOMING_SQL: &str = r#"
    WITH latest AS (
        SELECT
            mr.id AS maintenance_record_id,
            mr.asset_id,
            mr.service_description AS last_service_description,
            mr.next_maintenance_due_date,
            mr.next_maintenance_condition,
            ROW_NUMBER() OVER (
                PARTITION BY mr.asset_id
                ORDER BY mr.date_performed DESC, mr.created_at DESC, mr.id DESC
            ) AS rn
        FROM maintenance_records mr
        JOIN assets a ON mr.asset_id = a.id
        WHERE a.user_id = $1
    )
    SELECT
        a.id AS asset_id,
        a.name AS asset_name,
        a.description AS asset_description,
        l.last_service_description,
        l.next_maintenance_due_date,
        l.next_maintenance_condition,
        l.maintenance_record_id
    FROM latest l
    JOIN assets a ON l.asset_id = a.id
    WHERE l.rn = 1
      AND (l.next_maintenance_due_date IS NOT NULL OR l.next_maintenance_condition IS NOT NULL)
    ORDER BY a.id
"#;

/// Postgres-backed store over the shared pool
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn from_manager(manager: &DatabaseManager) -> Self {
        Self::new(manager.pool().clone())
    }
}

#[async_trait]
impl Store for PgStore {
    async fn ping(&self) -> Result<(), DatabaseError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn create_user(&self, email: &str, password_hash: &str) -> Result<User, DatabaseError> {
        sqlx::query_as::<_, User>("INSERT INTO users (email, password_hash) VALUES ($1, $2) RETURNING *")
            .bind(email)
            .bind(password_hash)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                if DatabaseError::is_unique_violation(&e) {
                    DatabaseError::Conflict("User already exists with this email".to_string())
                } else {
                    DatabaseError::Sqlx(e)
                }
            })
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, DatabaseError> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    async fn find_user_by_id(&self, user_id: i32) -> Result<Option<User>, DatabaseError> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    async fn create_asset(&self, user_id: i32, asset: &NewAsset) -> Result<Asset, DatabaseError> {
        let asset = sqlx::query_as::<_, Asset>(
            "INSERT INTO assets (user_id, name, description) VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(user_id)
        .bind(&asset.name)
        .bind(&asset.description)
        .fetch_one(&self.pool)
        .await?;
        Ok(asset)
    }

    async fn list_assets(&self, user_id: i32) -> Result<Vec<Asset>, DatabaseError> {
        let assets = sqlx::query_as::<_, Asset>(
            "SELECT * FROM assets WHERE user_id = $1 ORDER BY created_at DESC, id DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(assets)
    }

    async fn find_asset(&self, asset_id: i32, user_id: i32) -> Result<Option<Asset>, DatabaseError> {
        let asset = sqlx::query_as::<_, Asset>("SELECT * FROM assets WHERE id = $1 AND user_id = $2")
            .bind(asset_id)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(asset)
    }

    async fn update_asset(
        &self,
        asset_id: i32,
        user_id: i32,
        changes: &AssetChanges,
    ) -> Result<Option<Asset>, DatabaseError> {
        if changes.is_empty() {
            return self.find_asset(asset_id, user_id).await;
        }

        let mut qb: QueryBuilder<Postgres> = QueryBuilder::new("UPDATE assets SET ");
        {
            let mut set = qb.separated(", ");
            if let Some(name) = &changes.name {
                set.push("name = ").push_bind_unseparated(name.clone());
            }
            if let Some(description) = &changes.description {
                set.push("description = ").push_bind_unseparated(description.clone());
            }
            set.push("updated_at = CURRENT_TIMESTAMP");
        }
        qb.push(" WHERE id = ")
            .push_bind(asset_id)
            .push(" AND user_id = ")
            .push_bind(user_id)
            .push(" RETURNING *");

        let asset = qb.build_query_as::<Asset>().fetch_optional(&self.pool).await?;
        Ok(asset)
    }

    async fn delete_asset(&self, asset_id: i32, user_id: i32) -> Result<bool, DatabaseError> {
        let result = sqlx::query("DELETE FROM assets WHERE id = $1 AND user_id = $2")
            .bind(asset_id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn create_maintenance(
        &self,
        asset_id: i32,
        record: &NewMaintenanceRecord,
    ) -> Result<MaintenanceRecord, DatabaseError> {
        let record = sqlx::query_as::<_, MaintenanceRecord>(
            r#"
            INSERT INTO maintenance_records
                (asset_id, service_description, date_performed, notes,
                 next_maintenance_due_date, next_maintenance_condition)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(asset_id)
        .bind(&record.service_description)
        .bind(record.date_performed)
        .bind(&record.notes)
        .bind(record.next_maintenance_due_date)
        .bind(&record.next_maintenance_condition)
        .fetch_one(&self.pool)
        .await?;
        Ok(record)
    }

    async fn list_maintenance(&self, asset_id: i32) -> Result<Vec<MaintenanceRecord>, DatabaseError> {
        let records = sqlx::query_as::<_, MaintenanceRecord>(
            r#"
            SELECT * FROM maintenance_records
            WHERE asset_id = $1
            ORDER BY date_performed DESC, created_at DESC, id DESC
            "#,
        )
        .bind(asset_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(records)
    }

    async fn find_maintenance(&self, record_id: i32) -> Result<Option<OwnedMaintenanceRecord>, DatabaseError> {
        let record = sqlx::query_as::<_, OwnedMaintenanceRecord>(
            r#"
            SELECT mr.*, a.user_id AS owner_id
            FROM maintenance_records mr
            JOIN assets a ON mr.asset_id = a.id
            WHERE mr.id = $1
            "#,
        )
        .bind(record_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(record)
    }

    async fn update_maintenance(
        &self,
        record_id: i32,
        changes: &MaintenanceChanges,
    ) -> Result<Option<MaintenanceRecord>, DatabaseError> {
        if changes.is_empty() {
            return Ok(self.find_maintenance(record_id).await?.map(|owned| owned.record));
        }

        let mut qb: QueryBuilder<Postgres> = QueryBuilder::new("UPDATE maintenance_records SET ");
        {
            let mut set = qb.separated(", ");
            if let Some(description) = &changes.service_description {
                set.push("service_description = ").push_bind_unseparated(description.clone());
            }
            if let Some(date) = changes.date_performed {
                set.push("date_performed = ").push_bind_unseparated(date);
            }
            if let Some(notes) = &changes.notes {
                set.push("notes = ").push_bind_unseparated(notes.clone());
            }
            if let Some(due) = changes.next_maintenance_due_date {
                set.push("next_maintenance_due_date = ").push_bind_unseparated(due);
            }
            if let Some(condition) = &changes.next_maintenance_condition {
                set.push("next_maintenance_condition = ").push_bind_unseparated(condition.clone());
            }
            set.push("updated_at = CURRENT_TIMESTAMP");
        }
        qb.push(" WHERE id = ").push_bind(record_id).push(" RETURNING *");

        let record = qb
            .build_query_as::<MaintenanceRecord>()
            .fetch_optional(&self.pool)
            .await?;
        Ok(record)
    }

    async fn delete_maintenance(&self, record_id: i32) -> Result<bool, DatabaseError> {
        let result = sqlx::query("DELETE FROM maintenance_records WHERE id = $1")
            .bind(record_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn latest_upcoming(&self, user_id: i32) -> Result<Vec<DashboardUpcomingItem>, DatabaseError> {
        let items = sqlx::query_as::<_, DashboardUpcomingItem>(LATEST_UPCOMING_SQL)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(items)
    }
}
