use clap::{Args, Subcommand};
use serde_json::json;

use crate::cli::utils::{or_dash, output_empty_collection, output_success, output_value};
use crate::cli::CliContext;
use crate::database::models::{CreateMaintenancePayload, MaintenanceRecord, UpdateMaintenancePayload};

#[derive(Subcommand)]
pub enum MaintenanceCommands {
    #[command(about = "Service history of an asset, most recent first")]
    List {
        #[arg(help = "Asset ID")]
        asset_id: i32,
    },

    #[command(about = "Show one maintenance record")]
    Get {
        #[arg(help = "Record ID")]
        id: i32,
    },

    #[command(about = "Log a service performed on an asset")]
    Add {
        #[arg(help = "Asset ID")]
        asset_id: i32,
        #[arg(long, help = "What was done")]
        description: String,
        #[arg(long, help = "Date performed (YYYY-MM-DD)")]
        date: String,
        #[arg(long, help = "Notes")]
        notes: Option<String>,
        #[arg(long, help = "Next service due date (YYYY-MM-DD)")]
        next_due: Option<String>,
        #[arg(long, help = "Next service condition, e.g. \"10,000 km\"")]
        next_condition: Option<String>,
    },

    #[command(about = "Update a maintenance record")]
    Update(UpdateArgs),

    #[command(about = "Delete a maintenance record")]
    Delete {
        #[arg(help = "Record ID")]
        id: i32,
    },
}

#[derive(Args)]
pub struct UpdateArgs {
    #[arg(help = "Record ID")]
    pub id: i32,
    #[arg(long, help = "What was done")]
    pub description: Option<String>,
    #[arg(long, help = "Date performed (YYYY-MM-DD)")]
    pub date: Option<String>,
    #[arg(long, conflicts_with = "clear_notes")]
    pub notes: Option<String>,
    #[arg(long)]
    pub clear_notes: bool,
    #[arg(long, conflicts_with = "clear_next_due")]
    pub next_due: Option<String>,
    #[arg(long)]
    pub clear_next_due: bool,
    #[arg(long, conflicts_with = "clear_next_condition")]
    pub next_condition: Option<String>,
    #[arg(long)]
    pub clear_next_condition: bool,
}

impl UpdateArgs {
    fn payload(self) -> UpdateMaintenancePayload {
        fn field(value: Option<String>, clear: bool) -> Option<Option<String>> {
            if clear {
                Some(None)
            } else {
                value.map(Some)
            }
        }

        UpdateMaintenancePayload {
            service_description: self.description.map(Some),
            date_performed: self.date.map(Some),
            notes: field(self.notes, self.clear_notes),
            next_maintenance_due_date: field(self.next_due, self.clear_next_due),
            next_maintenance_condition: field(self.next_condition, self.clear_next_condition),
        }
    }
}

fn print_record(record: &MaintenanceRecord) {
    let next = match (record.next_maintenance_due_date, record.next_maintenance_condition.as_deref()) {
        (Some(due), Some(condition)) => format!("{} or {}", due, condition),
        (Some(due), None) => due.to_string(),
        (None, Some(condition)) => condition.to_string(),
        (None, None) => "-".to_string(),
    };
    println!(
        "{:>6}  {}  {:<30}  next: {}",
        record.id, record.date_performed, record.service_description, next
    );
    if let Some(notes) = record.notes.as_deref() {
        println!("        {}", notes);
    }
}

pub async fn handle(cmd: MaintenanceCommands, ctx: &CliContext) -> anyhow::Result<()> {
    let client = ctx.client()?;

    match cmd {
        MaintenanceCommands::List { asset_id } => {
            let records = client.list_maintenance(asset_id).await?;
            if records.is_empty() {
                return output_empty_collection(&ctx.output, "No maintenance recorded for this asset");
            }
            output_value(&ctx.output, &records, |records| records.iter().for_each(print_record))
        }
        MaintenanceCommands::Get { id } => {
            let record = client.get_maintenance(id).await?;
            output_value(&ctx.output, &record, |record| {
                println!("ID:             {}", record.id);
                println!("Asset:          {}", record.asset_id);
                println!("Service:        {}", record.service_description);
                println!("Performed:      {}", record.date_performed);
                println!("Notes:          {}", or_dash(record.notes.as_deref()));
                println!(
                    "Next due:       {}",
                    record
                        .next_maintenance_due_date
                        .map(|d| d.to_string())
                        .unwrap_or_else(|| "-".to_string())
                );
                println!("Next condition: {}", or_dash(record.next_maintenance_condition.as_deref()));
            })
        }
        MaintenanceCommands::Add {
            asset_id,
            description,
            date,
            notes,
            next_due,
            next_condition,
        } => {
            let payload = CreateMaintenancePayload {
                service_description: Some(description),
                date_performed: Some(date),
                notes,
                next_maintenance_due_date: next_due,
                next_maintenance_condition: next_condition,
            };
            let record = client.create_maintenance(asset_id, &payload).await?;
            output_success(
                &ctx.output,
                &format!("Logged maintenance record {} on asset {}", record.id, asset_id),
                Some(json!({ "record": record })),
            )
        }
        MaintenanceCommands::Update(args) => {
            let id = args.id;
            let payload = args.payload();
            if payload.is_empty() {
                anyhow::bail!("Nothing to update");
            }
            let record = client.update_maintenance(id, &payload).await?;
            output_success(
                &ctx.output,
                &format!("Updated maintenance record {}", record.id),
                Some(json!({ "record": record })),
            )
        }
        MaintenanceCommands::Delete { id } => {
            client.delete_maintenance(id).await?;
            output_success(&ctx.output, &format!("Deleted maintenance record {}", id), None)
        }
    }
}
