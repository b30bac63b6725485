mod common;

use anyhow::Result;
use serde_json::json;

use maintrack_api::cli::client::ApiClient;
use maintrack_api::cli::commands::asset::AssetCommands;
use maintrack_api::cli::commands::auth::AuthCommands;
use maintrack_api::cli::commands::dashboard::DashboardCommands;
use maintrack_api::cli::config::{MemorySessionStore, Session, SessionStore};
use maintrack_api::cli::{dispatch, CliContext, Commands, OutputFormat};
use maintrack_api::database::models::{CreateAssetPayload, CreateMaintenancePayload};

fn context(server: &common::TestServer) -> CliContext {
    CliContext {
        output: OutputFormat::Json,
        sessions: Box::new(MemorySessionStore::new()),
        server_override: Some(server.base_url.clone()),
    }
}

#[tokio::test]
async fn login_persists_the_session() -> Result<()> {
    let server = common::TestServer::spawn().await?;
    let ctx = context(&server);

    dispatch(
        Commands::Auth {
            cmd: AuthCommands::Register {
                email: "cli@example.com".to_string(),
                password: "hunter22".to_string(),
            },
        },
        &ctx,
    )
    .await?;

    let session = ctx.sessions.load()?;
    assert!(session.is_authenticated());
    assert_eq!(session.user.as_ref().map(|u| u.email.as_str()), Some("cli@example.com"));

    dispatch(Commands::Asset { cmd: AssetCommands::Create { name: "Kayak".into(), description: None } }, &ctx).await?;
    dispatch(Commands::Asset { cmd: AssetCommands::List }, &ctx).await?;

    dispatch(Commands::Auth { cmd: AuthCommands::Logout }, &ctx).await?;
    assert!(!ctx.sessions.load()?.is_authenticated());

    let err = dispatch(Commands::Asset { cmd: AssetCommands::List }, &ctx).await.unwrap_err();
    assert!(err.to_string().contains("Not authorized"), "unexpected error: {err}");
    Ok(())
}

#[tokio::test]
async fn client_round_trips_maintenance_and_dashboard() -> Result<()> {
    let server = common::TestServer::spawn().await?;
    let (token, _) = server.register().await?;

    let session = Session {
        server: server.base_url.clone(),
        token: Some(token),
        user: None,
    };
    let client = ApiClient::new(&session)?;

    let asset = client
        .create_asset(&CreateAssetPayload {
            name: Some("Chainsaw".to_string()),
            description: None,
        })
        .await?;
    let record = client
        .create_maintenance(
            asset.id,
            &CreateMaintenancePayload {
                service_description: Some("Chain sharpened".to_string()),
                date_performed: Some(common::day(-10)),
                next_maintenance_due_date: Some(common::day(-1)),
                ..Default::default()
            },
        )
        .await?;
    assert_eq!(client.list_maintenance(asset.id).await?, vec![record.clone()]);

    let upcoming = client.upcoming().await?;
    assert_eq!(upcoming.len(), 1);
    assert_eq!(upcoming[0]["status_label"], json!("Overdue"));

    let ctx = CliContext {
        output: OutputFormat::Text,
        sessions: Box::new(MemorySessionStore::with_session(session)),
        server_override: None,
    };
    dispatch(
        Commands::Dashboard {
            cmd: DashboardCommands::Upcoming {
                today: Some(common::day(0)),
                due_soon_days: 7,
            },
        },
        &ctx,
    )
    .await?;

    client.delete_asset(asset.id).await?;
    assert!(client.get_maintenance(record.id).await.is_err());
    Ok(())
}
