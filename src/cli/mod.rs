pub mod client;
pub mod commands;
pub mod config;
pub mod utils;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

use self::client::ApiClient;
use self::config::{Session, SessionStore};

#[derive(Parser)]
#[command(name = "maintrack")]
#[command(about = "Maintrack CLI - assets, maintenance history and upcoming service")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Output in human-readable text format")]
    pub text: bool,

    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[arg(long, global = true, env = "MAINTRACK_SERVER", help = "API base URL (overrides the saved session)")]
    pub server: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Authentication and session management")]
    Auth {
        #[command(subcommand)]
        cmd: commands::auth::AuthCommands,
    },

    #[command(about = "Manage assets")]
    Asset {
        #[command(subcommand)]
        cmd: commands::asset::AssetCommands,
    },

    #[command(about = "Manage maintenance records")]
    Maintenance {
        #[command(subcommand)]
        cmd: commands::maintenance::MaintenanceCommands,
    },

    #[command(about = "Upcoming maintenance overview")]
    Dashboard {
        #[command(subcommand)]
        cmd: commands::dashboard::DashboardCommands,
    },

    #[command(about = "Remote server checks")]
    Server {
        #[command(subcommand)]
        cmd: commands::server::ServerCommands,
    },

    #[command(about = "Database administration")]
    Db {
        #[command(subcommand)]
        cmd: commands::db::DbCommands,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

/// Everything a command needs: output format, session persistence and the
/// server override from the command line
pub struct CliContext {
    pub output: OutputFormat,
    pub sessions: Box<dyn SessionStore>,
    pub server_override: Option<String>,
}

impl CliContext {
    /// The saved session with the command-line server applied
    pub fn session(&self) -> anyhow::Result<Session> {
        let mut session = self.sessions.load()?;
        if let Some(server) = &self.server_override {
            session.server = server.clone();
        }
        Ok(session)
    }

    pub fn client(&self) -> anyhow::Result<ApiClient> {
        ApiClient::new(&self.session()?)
    }
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let ctx = CliContext {
        output: OutputFormat::from_cli(&cli),
        sessions: Box::new(config::FileSessionStore::from_env()?),
        server_override: cli.server,
    };

    dispatch(cli.command, &ctx).await
}

pub async fn dispatch(command: Commands, ctx: &CliContext) -> anyhow::Result<()> {
    match command {
        Commands::Auth { cmd } => commands::auth::handle(cmd, ctx).await,
        Commands::Asset { cmd } => commands::asset::handle(cmd, ctx).await,
        Commands::Maintenance { cmd } => commands::maintenance::handle(cmd, ctx).await,
        Commands::Dashboard { cmd } => commands::dashboard::handle(cmd, ctx).await,
        Commands::Server { cmd } => commands::server::handle(cmd, ctx).await,
        Commands::Db { cmd } => commands::db::handle(cmd, ctx).await,
    }
}
