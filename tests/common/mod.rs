#![allow(dead_code)]

use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde_json::{json, Value};

use maintrack_api::config::AppConfig;
use maintrack_api::server::{app, AppState};
use maintrack_api::store::{MemoryStore, Store};
use maintrack_api::upcoming::FixedClock;

/// Fixed "today" every server spawned here classifies against
pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 10).unwrap()
}

/// `today()` shifted by `days`, formatted for request bodies
pub fn day(days: i64) -> String {
    (today() + chrono::Duration::days(days)).format("%Y-%m-%d").to_string()
}

pub fn test_config() -> AppConfig {
    let mut config = AppConfig::development();
    config.security.jwt_secret = "integration-test-secret".to_string();
    config.api.enable_request_logging = false;
    config
}

/// An API server on a free local port backed by an in-memory store
pub struct TestServer {
    pub port: u16,
    pub base_url: String,
    pub client: Client,
}

impl TestServer {
    pub async fn spawn() -> Result<Self> {
        let store: Arc<dyn Store> = Arc::new(MemoryStore::new());
        Self::spawn_with(store).await
    }

    pub async fn spawn_with(store: Arc<dyn Store>) -> Result<Self> {
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let base_url = format!("http://127.0.0.1:{}", port);

        let state = AppState::new(store, test_config()).with_clock(Arc::new(FixedClock(today())));
        let listener = tokio::net::TcpListener::bind(("127.0.0.1", port))
            .await
            .context("failed to bind test listener")?;
        tokio::spawn(async move {
            let _ = axum::serve(listener, app(state)).await;
        });

        let server = Self {
            port,
            base_url,
            client: Client::new(),
        };
        server.wait_ready(Duration::from_secs(5)).await?;
        Ok(server)
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let deadline = Instant::now() + timeout;
        while Instant::now() < deadline {
            if let Ok(resp) = self.client.get(self.url("/health")).send().await {
                if resp.status() == StatusCode::OK {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
        anyhow::bail!("server did not become ready on {} within {:?}", self.base_url, timeout)
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}/api{}", self.base_url, path)
    }

    pub fn get(&self, path: &str, token: &str) -> RequestBuilder {
        self.client.get(self.url(path)).bearer_auth(token)
    }

    pub fn post(&self, path: &str, token: &str, body: Value) -> RequestBuilder {
        self.client.post(self.url(path)).bearer_auth(token).json(&body)
    }

    pub fn put(&self, path: &str, token: &str, body: Value) -> RequestBuilder {
        self.client.put(self.url(path)).bearer_auth(token).json(&body)
    }

    pub fn delete(&self, path: &str, token: &str) -> RequestBuilder {
        self.client.delete(self.url(path)).bearer_auth(token)
    }

    /// Register a fresh user and return (token, user id)
    pub async fn register(&self) -> Result<(String, i64)> {
        let email = format!("user-{}@example.com", uuid::Uuid::new_v4());
        let res = self
            .client
            .post(self.url("/auth/register"))
            .json(&json!({ "email": email, "password": "hunter22" }))
            .send()
            .await?;
        anyhow::ensure!(res.status() == StatusCode::CREATED, "register failed: {}", res.status());

        let body: Value = res.json().await?;
        let token = body["token"].as_str().context("missing token")?.to_string();
        let id = body["user"]["id"].as_i64().context("missing user id")?;
        Ok((token, id))
    }

    pub async fn create_asset(&self, token: &str, name: &str) -> Result<i64> {
        let res = self.post("/assets", token, json!({ "name": name })).send().await?;
        anyhow::ensure!(res.status() == StatusCode::CREATED, "create asset failed: {}", res.status());
        let body: Value = res.json().await?;
        body["id"].as_i64().context("missing asset id")
    }

    pub async fn log_maintenance(&self, token: &str, asset_id: i64, body: Value) -> Result<i64> {
        let res = self
            .post(&format!("/assets/{}/maintenance", asset_id), token, body)
            .send()
            .await?;
        anyhow::ensure!(res.status() == StatusCode::CREATED, "log maintenance failed: {}", res.status());
        let body: Value = res.json().await?;
        body["id"].as_i64().context("missing record id")
    }

    pub async fn upcoming(&self, token: &str) -> Result<Vec<Value>> {
        let res = self.get("/dashboard/upcoming", token).send().await?;
        anyhow::ensure!(res.status() == StatusCode::OK, "dashboard failed: {}", res.status());
        Ok(res.json().await?)
    }
}
