use clap::Subcommand;
use serde_json::json;

use crate::cli::utils::{or_dash, output_empty_collection, output_success, output_value};
use crate::cli::CliContext;
use crate::database::models::{CreateAssetPayload, UpdateAssetPayload};

#[derive(Subcommand)]
pub enum AssetCommands {
    #[command(about = "List your assets, newest first")]
    List,

    #[command(about = "Show one asset")]
    Get {
        #[arg(help = "Asset ID")]
        id: i32,
    },

    #[command(about = "Create an asset")]
    Create {
        #[arg(help = "Asset name")]
        name: String,
        #[arg(long, help = "Free-text description")]
        description: Option<String>,
    },

    #[command(about = "Update an asset")]
    Update {
        #[arg(help = "Asset ID")]
        id: i32,
        #[arg(long, help = "New name")]
        name: Option<String>,
        #[arg(long, help = "New description", conflicts_with = "clear_description")]
        description: Option<String>,
        #[arg(long, help = "Remove the description")]
        clear_description: bool,
    },

    #[command(about = "Delete an asset and its maintenance history")]
    Delete {
        #[arg(help = "Asset ID")]
        id: i32,
    },
}

pub async fn handle(cmd: AssetCommands, ctx: &CliContext) -> anyhow::Result<()> {
    let client = ctx.client()?;

    match cmd {
        AssetCommands::List => {
            let assets = client.list_assets().await?;
            if assets.is_empty() {
                return output_empty_collection(&ctx.output, "No assets yet");
            }
            output_value(&ctx.output, &assets, |assets| {
                for asset in assets {
                    println!("{:>6}  {:<30}  {}", asset.id, asset.name, or_dash(asset.description.as_deref()));
                }
            })
        }
        AssetCommands::Get { id } => {
            let asset = client.get_asset(id).await?;
            output_value(&ctx.output, &asset, |asset| {
                println!("ID:          {}", asset.id);
                println!("Name:        {}", asset.name);
                println!("Description: {}", or_dash(asset.description.as_deref()));
                println!("Created:     {}", asset.created_at.format("%Y-%m-%d %H:%M"));
            })
        }
        AssetCommands::Create { name, description } => {
            let asset = client
                .create_asset(&CreateAssetPayload {
                    name: Some(name),
                    description,
                })
                .await?;
            output_success(
                &ctx.output,
                &format!("Created asset {} ({})", asset.id, asset.name),
                Some(json!({ "asset": asset })),
            )
        }
        AssetCommands::Update {
            id,
            name,
            description,
            clear_description,
        } => {
            let payload = UpdateAssetPayload {
                name,
                description: if clear_description { Some(None) } else { description.map(Some) },
            };
            if payload.is_empty() {
                anyhow::bail!("Nothing to update: pass --name, --description or --clear-description");
            }
            let asset = client.update_asset(id, &payload).await?;
            output_success(
                &ctx.output,
                &format!("Updated asset {}", asset.id),
                Some(json!({ "asset": asset })),
            )
        }
        AssetCommands::Delete { id } => {
            client.delete_asset(id).await?;
            output_success(&ctx.output, &format!("Deleted asset {}", id), None)
        }
    }
}
