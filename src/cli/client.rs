use anyhow::anyhow;
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::{json, Value};
use std::time::Duration;

use super::config::Session;
use crate::database::models::{
    Asset, CreateAssetPayload, CreateMaintenancePayload, MaintenanceRecord, UpdateAssetPayload,
    UpdateMaintenancePayload, User,
};
use crate::services::AuthResponse;

/// HTTP client for the Maintrack API, bound to one session
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(session: &Session) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder().timeout(Duration::from_secs(30)).build()?;
        Ok(Self {
            http,
            base_url: session.server.trim_end_matches('/').to_string(),
            token: session.token.clone(),
        })
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self.http.request(method, format!("{}/api{}", self.base_url, path));
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn send<T: DeserializeOwned>(&self, builder: RequestBuilder) -> anyhow::Result<T> {
        let response = check(builder.send().await?).await?;
        Ok(response.json::<T>().await?)
    }

    async fn send_empty(&self, builder: RequestBuilder) -> anyhow::Result<()> {
        check(builder.send().await?).await?;
        Ok(())
    }

    fn with_body<B: Serialize>(&self, method: Method, path: &str, body: &B) -> RequestBuilder {
        self.request(method, path).json(body)
    }

    pub async fn health(&self) -> anyhow::Result<Value> {
        // 503 still carries a useful body
        let response = self.request(Method::GET, "/health").send().await?;
        Ok(response.json::<Value>().await?)
    }

    pub async fn register(&self, email: &str, password: &str) -> anyhow::Result<AuthResponse> {
        let body = json!({ "email": email, "password": password });
        self.send(self.with_body(Method::POST, "/auth/register", &body)).await
    }

    pub async fn login(&self, email: &str, password: &str) -> anyhow::Result<AuthResponse> {
        let body = json!({ "email": email, "password": password });
        self.send(self.with_body(Method::POST, "/auth/login", &body)).await
    }

    pub async fn whoami(&self) -> anyhow::Result<User> {
        self.send(self.request(Method::GET, "/auth/whoami")).await
    }

    pub async fn list_assets(&self) -> anyhow::Result<Vec<Asset>> {
        self.send(self.request(Method::GET, "/assets")).await
    }

    pub async fn get_asset(&self, asset_id: i32) -> anyhow::Result<Asset> {
        self.send(self.request(Method::GET, &format!("/assets/{}", asset_id))).await
    }

    pub async fn create_asset(&self, payload: &CreateAssetPayload) -> anyhow::Result<Asset> {
        self.send(self.with_body(Method::POST, "/assets", payload)).await
    }

    pub async fn update_asset(&self, asset_id: i32, payload: &UpdateAssetPayload) -> anyhow::Result<Asset> {
        self.send(self.with_body(Method::PUT, &format!("/assets/{}", asset_id), payload))
            .await
    }

    pub async fn delete_asset(&self, asset_id: i32) -> anyhow::Result<()> {
        self.send_empty(self.request(Method::DELETE, &format!("/assets/{}", asset_id)))
            .await
    }

    pub async fn list_maintenance(&self, asset_id: i32) -> anyhow::Result<Vec<MaintenanceRecord>> {
        self.send(self.request(Method::GET, &format!("/assets/{}/maintenance", asset_id)))
            .await
    }

    pub async fn get_maintenance(&self, record_id: i32) -> anyhow::Result<MaintenanceRecord> {
        self.send(self.request(Method::GET, &format!("/maintenance/{}", record_id)))
            .await
    }

    pub async fn create_maintenance(
        &self,
        asset_id: i32,
        payload: &CreateMaintenancePayload,
    ) -> anyhow::Result<MaintenanceRecord> {
        self.send(self.with_body(Method::POST, &format!("/assets/{}/maintenance", asset_id), payload))
            .await
    }

    pub async fn update_maintenance(
        &self,
        record_id: i32,
        payload: &UpdateMaintenancePayload,
    ) -> anyhow::Result<MaintenanceRecord> {
        self.send(self.with_body(Method::PUT, &format!("/maintenance/{}", record_id), payload))
            .await
    }

    pub async fn delete_maintenance(&self, record_id: i32) -> anyhow::Result<()> {
        self.send_empty(self.request(Method::DELETE, &format!("/maintenance/{}", record_id)))
            .await
    }

    /// Raw dashboard items; the caller re-derives status locally
    pub async fn upcoming(&self) -> anyhow::Result<Vec<Value>> {
        self.send(self.request(Method::GET, "/dashboard/upcoming")).await
    }
}

/// Turn non-2xx responses into errors carrying the server's message
async fn check(response: Response) -> anyhow::Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let message = response
        .json::<Value>()
        .await
        .ok()
        .and_then(|body| body.get("message").and_then(Value::as_str).map(str::to_string))
        .unwrap_or_else(|| status.canonical_reason().unwrap_or("request failed").to_string());

    if status == StatusCode::UNAUTHORIZED {
        return Err(anyhow!("{} (run `maintrack auth login` first)", message));
    }
    Err(anyhow!("{} (HTTP {})", message, status.as_u16()))
}
