use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Latest forward-looking maintenance signal of one asset. Derived, never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct DashboardUpcomingItem {
    pub asset_id: i32,
    pub asset_name: String,
    pub asset_description: Option<String>,
    pub last_service_description: String,
    pub next_maintenance_due_date: Option<NaiveDate>,
    pub next_maintenance_condition: Option<String>,
    pub maintenance_record_id: i32,
}
