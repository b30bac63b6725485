use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use super::status::{MaintenanceStatus, StatusClassifier};
use crate::database::models::DashboardUpcomingItem;

/// A dashboard item together with its computed status
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpcomingEntry {
    #[serde(flatten)]
    pub item: DashboardUpcomingItem,
    pub status: MaintenanceStatus,
    pub status_label: String,
}

impl UpcomingEntry {
    pub fn new(item: DashboardUpcomingItem, today: NaiveDate, classifier: &StatusClassifier) -> Self {
        let status = classifier.classify(
            today,
            item.next_maintenance_due_date,
            item.next_maintenance_condition.as_deref(),
        );
        Self {
            status_label: status.label(),
            item,
            status,
        }
    }
}

/// Dashboard order: severity bucket, due date (missing last), asset name,
/// then ids so that no two distinct entries compare equal.
pub fn compare_entries(a: &UpcomingEntry, b: &UpcomingEntry) -> Ordering {
    a.status
        .severity_bucket()
        .cmp(&b.status.severity_bucket())
        .then_with(|| compare_due_dates(a.item.next_maintenance_due_date, b.item.next_maintenance_due_date))
        .then_with(|| a.item.asset_name.cmp(&b.item.asset_name))
        .then_with(|| a.item.asset_id.cmp(&b.item.asset_id))
        .then_with(|| a.item.maintenance_record_id.cmp(&b.item.maintenance_record_id))
}

/// Earlier dates first, missing dates last
pub fn compare_due_dates(a: Option<NaiveDate>, b: Option<NaiveDate>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Classify every item against `today` and return them in dashboard order
pub fn rank_upcoming(
    items: Vec<DashboardUpcomingItem>,
    today: NaiveDate,
    classifier: &StatusClassifier,
) -> Vec<UpcomingEntry> {
    let mut entries: Vec<UpcomingEntry> = items
        .into_iter()
        .map(|item| UpcomingEntry::new(item, today, classifier))
        .collect();
    entries.sort_by(compare_entries);
    entries
}
