mod common;

use anyhow::Result;
use common::day;
use serde_json::{json, Value};

fn names(items: &[Value]) -> Vec<&str> {
    items.iter().filter_map(|i| i["asset_name"].as_str()).collect()
}

async fn asset_due(server: &common::TestServer, token: &str, name: &str, next: Value) -> Result<i64> {
    let asset = server.create_asset(token, name).await?;
    let mut body = json!({ "service_description": format!("{} service", name), "date_performed": day(-30) });
    if let (Some(body), Some(next)) = (body.as_object_mut(), next.as_object()) {
        body.extend(next.clone());
    }
    server.log_maintenance(token, asset, body).await?;
    Ok(asset)
}

#[tokio::test]
async fn upcoming_is_ordered_by_urgency() -> Result<()> {
    let server = common::TestServer::spawn().await?;
    let (token, _) = server.register().await?;

    asset_due(&server, &token, "Upcoming", json!({ "next_maintenance_due_date": day(30) })).await?;
    asset_due(&server, &token, "Condition", json!({ "next_maintenance_condition": "10,000 km" })).await?;
    asset_due(&server, &token, "Soon", json!({ "next_maintenance_due_date": day(3) })).await?;
    asset_due(&server, &token, "Today", json!({ "next_maintenance_due_date": day(0) })).await?;
    asset_due(&server, &token, "Late", json!({ "next_maintenance_due_date": day(-2) })).await?;
    asset_due(&server, &token, "Very late", json!({ "next_maintenance_due_date": day(-20) })).await?;

    let items = server.upcoming(&token).await?;
    assert_eq!(
        names(&items),
        vec!["Very late", "Late", "Today", "Soon", "Upcoming", "Condition"]
    );

    let labels: Vec<&str> = items.iter().filter_map(|i| i["status_label"].as_str()).collect();
    assert_eq!(
        labels,
        vec!["Overdue", "Overdue", "Due Today", "Due in 3 day(s)", "Upcoming in 30 days", "By Condition"]
    );
    assert_eq!(items[0]["status"]["kind"], "overdue");
    assert_eq!(items[3]["status"], json!({ "kind": "due_soon", "days": 3 }));
    Ok(())
}

#[tokio::test]
async fn only_the_latest_record_per_asset_counts() -> Result<()> {
    let server = common::TestServer::spawn().await?;
    let (token, _) = server.register().await?;
    let asset = server.create_asset(&token, "Van").await?;

    // Superseded: an overdue reminder from an older service.
    server
        .log_maintenance(
            &token,
            asset,
            json!({
                "service_description": "Oil change",
                "date_performed": day(-200),
                "next_maintenance_due_date": day(-20),
            }),
        )
        .await?;
    let latest = server
        .log_maintenance(
            &token,
            asset,
            json!({
                "service_description": "Oil change again",
                "date_performed": day(-5),
                "next_maintenance_due_date": day(90),
            }),
        )
        .await?;

    let items = server.upcoming(&token).await?;
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["maintenance_record_id"], latest);
    assert_eq!(items[0]["last_service_description"], "Oil change again");
    assert_eq!(items[0]["status_label"], "Upcoming in 90 days");
    Ok(())
}

#[tokio::test]
async fn latest_record_without_next_signal_hides_the_asset() -> Result<()> {
    let server = common::TestServer::spawn().await?;
    let (token, _) = server.register().await?;
    let asset = server.create_asset(&token, "Mower").await?;

    server
        .log_maintenance(
            &token,
            asset,
            json!({
                "service_description": "Blade sharpening",
                "date_performed": day(-100),
                "next_maintenance_due_date": day(-1),
            }),
        )
        .await?;
    server
        .log_maintenance(&token, asset, json!({ "service_description": "Wash", "date_performed": day(-1) }))
        .await?;

    assert!(server.upcoming(&token).await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn same_day_records_break_ties_by_insertion() -> Result<()> {
    let server = common::TestServer::spawn().await?;
    let (token, _) = server.register().await?;
    let asset = server.create_asset(&token, "Pump").await?;

    for (description, next) in [("Morning check", day(1)), ("Evening check", day(14))] {
        server
            .log_maintenance(
                &token,
                asset,
                json!({
                    "service_description": description,
                    "date_performed": day(0),
                    "next_maintenance_due_date": next,
                }),
            )
            .await?;
    }

    let items = server.upcoming(&token).await?;
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["last_service_description"], "Evening check");
    Ok(())
}

#[tokio::test]
async fn dashboard_is_scoped_and_follows_deletes() -> Result<()> {
    let server = common::TestServer::spawn().await?;
    let (alice, _) = server.register().await?;
    let (bob, _) = server.register().await?;

    let boat = asset_due(&server, &alice, "Boat", json!({ "next_maintenance_due_date": day(2) })).await?;
    asset_due(&server, &alice, "Bike", json!({ "next_maintenance_condition": "every spring" })).await?;

    assert!(server.upcoming(&bob).await?.is_empty());
    assert_eq!(names(&server.upcoming(&alice).await?), vec!["Boat", "Bike"]);

    server.delete(&format!("/assets/{}", boat), &alice).send().await?;
    assert_eq!(names(&server.upcoming(&alice).await?), vec!["Bike"]);
    Ok(())
}

#[tokio::test]
async fn asset_names_break_ties_within_a_bucket() -> Result<()> {
    let server = common::TestServer::spawn().await?;
    let (token, _) = server.register().await?;

    for name in ["Zamboni", "Aircompressor", "Mixer"] {
        asset_due(&server, &token, name, json!({ "next_maintenance_due_date": day(-3) })).await?;
    }

    assert_eq!(
        names(&server.upcoming(&token).await?),
        vec!["Aircompressor", "Mixer", "Zamboni"]
    );
    Ok(())
}
