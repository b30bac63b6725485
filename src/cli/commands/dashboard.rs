use anyhow::Context;
use chrono::{Local, NaiveDate};
use std::cmp::Ordering;
use clap::Subcommand;
use serde::Serialize;
use serde_json::Value;

use crate::cli::utils::{or_dash, output_empty_collection, output_value};
use crate::cli::CliContext;
use crate::upcoming::{
    compare_due_dates, parse_due_date, MaintenanceStatus, Severity, StatusClassifier, DEFAULT_DUE_SOON_DAYS,
};

#[derive(Subcommand)]
pub enum DashboardCommands {
    #[command(about = "Latest next-service signal per asset, most urgent first")]
    Upcoming {
        #[arg(long, help = "Classify against this date instead of today (YYYY-MM-DD)")]
        today: Option<String>,
        #[arg(long, default_value_t = DEFAULT_DUE_SOON_DAYS, help = "Days counted as due soon")]
        due_soon_days: i64,
    },
}

/// One dashboard line as the CLI renders it
#[derive(Debug, Clone, Serialize)]
pub struct UpcomingRow {
    pub asset_id: i64,
    pub asset_name: String,
    pub last_service_description: String,
    pub next_maintenance_due_date: Option<String>,
    pub next_maintenance_condition: Option<String>,
    pub status: MaintenanceStatus,
    pub status_label: String,
}

impl UpcomingRow {
    /// Build a row from a raw server item, deriving the status locally so a
    /// malformed due date surfaces as `Invalid Date` instead of an error
    pub fn from_value(item: &Value, today: NaiveDate, classifier: &StatusClassifier) -> Self {
        let text = |key: &str| item.get(key).and_then(Value::as_str).map(str::to_string);
        let due = text("next_maintenance_due_date");
        let condition = text("next_maintenance_condition");
        let status = classifier.classify_raw(today, due.as_deref(), condition.as_deref());

        Self {
            asset_id: item.get("asset_id").and_then(Value::as_i64).unwrap_or_default(),
            asset_name: text("asset_name").unwrap_or_default(),
            last_service_description: text("last_service_description").unwrap_or_default(),
            next_maintenance_due_date: due,
            next_maintenance_condition: condition,
            status_label: status.label(),
            status,
        }
    }

    fn due_date(&self) -> Option<NaiveDate> {
        self.next_maintenance_due_date.as_deref().and_then(parse_due_date)
    }
}

/// Dashboard order for rows classified against the local date, so labels and
/// order always agree: bucket, due date (missing or unparseable last), name, id.
pub fn compare_rows(a: &UpcomingRow, b: &UpcomingRow) -> Ordering {
    a.status
        .severity_bucket()
        .cmp(&b.status.severity_bucket())
        .then_with(|| compare_due_dates(a.due_date(), b.due_date()))
        .then_with(|| a.asset_name.cmp(&b.asset_name))
        .then_with(|| a.asset_id.cmp(&b.asset_id))
}

/// Classify raw server items against `today` and put them in dashboard order
pub fn rank_rows(items: &[Value], today: NaiveDate, classifier: &StatusClassifier) -> Vec<UpcomingRow> {
    let mut rows: Vec<UpcomingRow> = items
        .iter()
        .map(|item| UpcomingRow::from_value(item, today, classifier))
        .collect();
    rows.sort_by(compare_rows);
    rows
}

pub async fn handle(cmd: DashboardCommands, ctx: &CliContext) -> anyhow::Result<()> {
    match cmd {
        DashboardCommands::Upcoming { today, due_soon_days } => {
            let today = match today {
                Some(raw) => NaiveDate::parse_from_str(&raw, "%Y-%m-%d")
                    .with_context(|| format!("Invalid --today date '{}', expected YYYY-MM-DD", raw))?,
                None => Local::now().date_naive(),
            };
            let classifier = StatusClassifier::new(due_soon_days);

            let items = ctx.client()?.upcoming().await?;
            if items.is_empty() {
                return output_empty_collection(&ctx.output, "No upcoming maintenance");
            }

            // The server ranked against its own clock; re-rank against ours.
            let rows = rank_rows(&items, today, &classifier);

            output_value(&ctx.output, &rows, |rows| {
                for row in rows {
                    let marker = match row.status.severity() {
                        Severity::Critical => "!!",
                        Severity::Warning => "! ",
                        Severity::Info => "  ",
                    };
                    let next = row
                        .next_maintenance_due_date
                        .as_deref()
                        .or(row.next_maintenance_condition.as_deref());
                    println!(
                        "{} {:<20}  {:<24}  {:<20}  after: {}",
                        marker,
                        row.status_label,
                        row.asset_name,
                        or_dash(next),
                        row.last_service_description
                    );
                }
            })
        }
    }
}
