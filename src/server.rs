use axum::{
    http::{HeaderValue, Method},
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::config::AppConfig;
use crate::error::ApiError;
use crate::handlers::{protected, public};
use crate::middleware::jwt_auth_middleware;
use crate::services::{AssetService, AuthService, DashboardService, MaintenanceService};
use crate::store::Store;
use crate::upcoming::{Clock, StatusClassifier, SystemClock};

/// Shared, cheaply cloned handler state
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
    pub config: Arc<AppConfig>,
    pub clock: Arc<dyn Clock>,
}

impl AppState {
    pub fn new(store: Arc<dyn Store>, config: AppConfig) -> Self {
        Self {
            store,
            config: Arc::new(config),
            clock: Arc::new(SystemClock),
        }
    }

    /// Replace the source of "today" used by the dashboard
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn auth_service(&self) -> AuthService {
        AuthService::new(self.store.clone(), self.config.security.clone())
    }

    pub fn asset_service(&self) -> AssetService {
        AssetService::new(self.store.clone())
    }

    pub fn maintenance_service(&self) -> MaintenanceService {
        MaintenanceService::new(self.store.clone())
    }

    pub fn dashboard_service(&self) -> DashboardService {
        DashboardService::new(
            self.store.clone(),
            self.clock.clone(),
            StatusClassifier::new(self.config.dashboard.due_soon_days),
        )
    }
}

/// Full application router, everything under `/api`
pub fn app(state: AppState) -> Router {
    let api = public_routes()
        .merge(protected_routes(state.clone()));

    let mut router = Router::new()
        .nest("/api", api)
        .fallback(not_found);

    if state.config.security.enable_cors {
        router = router.layer(cors_layer(&state.config.security.cors_origins));
    }
    if state.config.api.enable_request_logging {
        router = router.layer(TraceLayer::new_for_http());
    }

    router.with_state(state)
}

fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(public::health))
        .route("/auth/register", post(public::auth_register))
        .route("/auth/login", post(public::auth_login))
}

fn protected_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/auth/whoami", get(protected::auth_whoami))
        .route(
            "/assets",
            get(protected::asset_list).post(protected::asset_create),
        )
        .route(
            "/assets/:assetId",
            get(protected::asset_get)
                .put(protected::asset_update)
                .delete(protected::asset_delete),
        )
        .route(
            "/assets/:assetId/maintenance",
            get(protected::maintenance_list).post(protected::maintenance_create),
        )
        .route(
            "/maintenance/:recordId",
            get(protected::maintenance_get)
                .put(protected::maintenance_update)
                .delete(protected::maintenance_delete),
        )
        .route("/dashboard/upcoming", get(protected::dashboard_upcoming))
        // route_layer: unknown paths fall through to the 404 handler unauthenticated
        .route_layer(middleware::from_fn_with_state(state, jwt_auth_middleware))
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let base = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
        .allow_headers(Any);

    if origins.is_empty() || origins.iter().any(|o| o == "*") {
        return base.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|o| match HeaderValue::from_str(o) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin '{}'", o);
                None
            }
        })
        .collect();
    base.allow_origin(origins)
}

async fn not_found() -> ApiError {
    ApiError::not_found("Resource not found on this server")
}
