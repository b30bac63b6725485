use anyhow::Context;
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use maintrack_api::config::{self, StoreBackend};
use maintrack_api::database::DatabaseManager;
use maintrack_api::server::{self, AppState};
use maintrack_api::store::{MemoryStore, PgStore, Store};

#[tokio::main]
async fn main() {
    // Load .env if present so cargo run picks up DATABASE_URL, JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,tower_http=info")),
        )
        .init();

    if let Err(e) = run().await {
        error!("{:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let config = config::config().clone();
    config.validate().context("invalid configuration")?;
    info!("Starting Maintrack API in {:?} mode", config.environment);

    let (store, manager): (Arc<dyn Store>, Option<DatabaseManager>) = match config.database.backend {
        StoreBackend::Postgres => {
            let manager = DatabaseManager::connect(&config.database)
                .await
                .context("failed to connect to database")?;
            if config.database.auto_migrate {
                manager.migrate().await.context("failed to apply schema")?;
            }
            let store: Arc<dyn Store> = Arc::new(PgStore::from_manager(&manager));
            (store, Some(manager))
        }
        StoreBackend::Memory => {
            warn!("Using the in-memory store; data is lost on exit");
            let store: Arc<dyn Store> = Arc::new(MemoryStore::new());
            (store, None)
        }
    };

    let bind_addr = format!("{}:{}", config.api.host, config.api.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;
    info!("Maintrack API listening on http://{}", bind_addr);

    let app = server::app(AppState::new(store, config));
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    if let Some(manager) = manager {
        manager.close().await;
    }
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
