use clap::Subcommand;
use tracing::info;

use crate::cli::utils::output_success;
use crate::cli::CliContext;
use crate::config::config;
use crate::database::manager::DatabaseManager;

#[derive(Subcommand)]
pub enum DbCommands {
    #[command(about = "Create the users, assets and maintenance_records tables if missing")]
    Migrate,

    #[command(about = "Check that the configured database is reachable")]
    Ping,
}

pub async fn handle(cmd: DbCommands, ctx: &CliContext) -> anyhow::Result<()> {
    let db_config = &config().database;
    let manager = DatabaseManager::connect(db_config).await?;

    let result = match cmd {
        DbCommands::Migrate => {
            manager.migrate().await?;
            info!("Schema migration finished");
            output_success(&ctx.output, "Database schema is up to date", None)
        }
        DbCommands::Ping => {
            manager.health_check().await?;
            output_success(&ctx.output, "Database is reachable", None)
        }
    };

    manager.close().await;
    result
}
