use clap::Subcommand;

use crate::cli::utils::{output_error, output_value};
use crate::cli::CliContext;

#[derive(Subcommand)]
pub enum ServerCommands {
    #[command(about = "Check the health endpoint of the configured server")]
    Health,
}

pub async fn handle(cmd: ServerCommands, ctx: &CliContext) -> anyhow::Result<()> {
    match cmd {
        ServerCommands::Health => {
            let session = ctx.session()?;
            match ctx.client()?.health().await {
                Ok(body) => output_value(&ctx.output, &body, |body| {
                    let status = body.get("status").and_then(|s| s.as_str()).unwrap_or("unknown");
                    let database = body.get("database").and_then(|s| s.as_str()).unwrap_or("unknown");
                    println!("{}: {} (database {})", session.server, status, database);
                }),
                Err(err) => {
                    output_error(&ctx.output, &format!("{} is not healthy: {}", session.server, err));
                    Err(err)
                }
            }
        }
    }
}
