use std::collections::{BTreeMap, HashMap};

use crate::database::models::{Asset, DashboardUpcomingItem, MaintenanceRecord};

/// True when `candidate` is more recent than `current`: later service date,
/// then later insertion, then higher id.
pub fn is_more_recent(candidate: &MaintenanceRecord, current: &MaintenanceRecord) -> bool {
    (candidate.date_performed, candidate.created_at, candidate.id)
        > (current.date_performed, current.created_at, current.id)
}

/// Latest record per asset id, independent of input order
pub fn latest_per_asset<'a, I>(records: I) -> BTreeMap<i32, &'a MaintenanceRecord>
where
    I: IntoIterator<Item = &'a MaintenanceRecord>,
{
    let mut latest: BTreeMap<i32, &'a MaintenanceRecord> = BTreeMap::new();
    for record in records {
        match latest.get(&record.asset_id) {
            Some(current) if !is_more_recent(record, current) => {}
            _ => {
                latest.insert(record.asset_id, record);
            }
        }
    }
    latest
}

/// One item per asset whose latest record announces a next service.
/// Records of assets not in `assets` are ignored. Unordered beyond asset id.
pub fn collect_upcoming(assets: &[Asset], records: &[MaintenanceRecord]) -> Vec<DashboardUpcomingItem> {
    let by_id: HashMap<i32, &Asset> = assets.iter().map(|a| (a.id, a)).collect();

    latest_per_asset(records.iter().filter(|r| by_id.contains_key(&r.asset_id)))
        .into_values()
        .filter(|record| record.has_next_signal())
        .filter_map(|record| {
            let asset = by_id.get(&record.asset_id)?;
            Some(DashboardUpcomingItem {
                asset_id: asset.id,
                asset_name: asset.name.clone(),
                asset_description: asset.description.clone(),
                last_service_description: record.service_description.clone(),
                next_maintenance_due_date: record.next_maintenance_due_date,
                next_maintenance_condition: record.next_maintenance_condition.clone(),
                maintenance_record_id: record.id,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn at(offset_secs: i64) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap() + Duration::seconds(offset_secs)
    }

    fn asset(id: i32, name: &str) -> Asset {
        Asset {
            id,
            user_id: 1,
            name: name.to_string(),
            description: None,
            created_at: at(0),
            updated_at: at(0),
        }
    }

    fn record(id: i32, asset_id: i32, performed: NaiveDate, created: i64) -> MaintenanceRecord {
        MaintenanceRecord {
            id,
            asset_id,
            service_description: format!("service {}", id),
            date_performed: performed,
            notes: None,
            next_maintenance_due_date: None,
            next_maintenance_condition: None,
            created_at: at(created),
            updated_at: at(created),
        }
    }

    #[test]
    fn picks_latest_service_date_regardless_of_order() {
        let january = record(1, 10, date(2024, 1, 1), 0);
        let march = record(2, 10, date(2024, 3, 1), 60);

        let forward = vec![january.clone(), march.clone()];
        let backward = vec![march.clone(), january.clone()];

        assert_eq!(latest_per_asset(&forward)[&10].id, 2);
        assert_eq!(latest_per_asset(&backward)[&10].id, 2);
    }

    #[test]
    fn same_day_ties_break_on_insertion_time() {
        let first = record(5, 10, date(2024, 3, 1), 0);
        let second = record(4, 10, date(2024, 3, 1), 30);

        let latest = latest_per_asset(vec![&second, &first]);
        assert_eq!(latest[&10].id, 4);
    }

    #[test]
    fn full_ties_break_on_id() {
        let a = record(8, 10, date(2024, 3, 1), 0);
        let b = record(9, 10, date(2024, 3, 1), 0);

        assert_eq!(latest_per_asset(vec![&b, &a])[&10].id, 9);
        assert_eq!(latest_per_asset(vec![&a, &b])[&10].id, 9);
    }

    #[test]
    fn superseded_history_is_excluded() {
        let assets = vec![asset(10, "Compressor")];
        let mut older = record(1, 10, date(2024, 1, 1), 0);
        older.next_maintenance_due_date = Some(date(2024, 6, 1));
        let newer = record(2, 10, date(2024, 3, 1), 60);

        assert!(collect_upcoming(&assets, &[older, newer]).is_empty());
    }

    #[test]
    fn collects_one_item_per_asset_from_latest_record() {
        let assets = vec![asset(10, "Truck"), asset(11, "Generator")];

        let mut truck_old = record(1, 10, date(2024, 1, 1), 0);
        truck_old.next_maintenance_due_date = Some(date(2024, 2, 1));
        let mut truck_new = record(2, 10, date(2024, 4, 1), 10);
        truck_new.next_maintenance_due_date = Some(date(2024, 10, 1));
        let mut generator = record(3, 11, date(2024, 5, 1), 20);
        generator.next_maintenance_condition = Some("500 hours".to_string());

        let items = collect_upcoming(&assets, &[truck_old, generator, truck_new]);
        assert_eq!(items.len(), 2);

        let truck = items.iter().find(|i| i.asset_id == 10).unwrap();
        assert_eq!(truck.maintenance_record_id, 2);
        assert_eq!(truck.last_service_description, "service 2");
        assert_eq!(truck.next_maintenance_due_date, Some(date(2024, 10, 1)));

        let generator = items.iter().find(|i| i.asset_id == 11).unwrap();
        assert_eq!(generator.asset_name, "Generator");
        assert_eq!(generator.next_maintenance_condition.as_deref(), Some("500 hours"));
    }

    #[test]
    fn ignores_records_of_other_assets() {
        let assets = vec![asset(10, "Truck")];
        let mut foreign = record(1, 99, date(2024, 1, 1), 0);
        foreign.next_maintenance_due_date = Some(date(2024, 2, 1));

        assert!(collect_upcoming(&assets, &[foreign]).is_empty());
    }
}
