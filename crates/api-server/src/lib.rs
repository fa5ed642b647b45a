//! StockSignal share API.
//!
//! Serves social cards (`/api/social-card`) and Open Graph images
//! (`/api/og-image/:ticker`) rendered from the upstream analysis API.

pub mod config;
mod og_image_routes;
mod request_id;
mod security_headers;
mod social_card_routes;

use std::sync::Arc;

use analysis_client::AnalysisClient;
use analysis_core::{AnalysisError, AnalysisProvider};
use axum::{
    extract::Request,
    http::{Method, StatusCode},
    middleware,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use social_cards::Branding;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use utoipa::OpenApi;

pub use config::ServerConfig;
pub use og_image_routes::og_image_routes;
pub use request_id::RequestId;
pub use social_card_routes::social_card_routes;

#[derive(OpenApi)]
#[openapi(
    info(title = "StockSignal Share API", version = "0.1.0"),
    paths(
        health_check,
        social_card_routes::get_social_card,
        og_image_routes::get_og_image,
    ),
    tags(
        (name = "Share", description = "Social cards and share images"),
        (name = "System", description = "Liveness")
    )
)]
pub struct ApiDoc;

#[derive(Clone)]
pub struct AppState {
    /// Backend used for social cards.
    pub cards: Arc<dyn AnalysisProvider>,
    /// Backend used for OG images. May point at a different deployment.
    pub images: Arc<dyn AnalysisProvider>,
    pub branding: Arc<Branding>,
}

impl AppState {
    pub fn from_config(config: &ServerConfig) -> anyhow::Result<Self> {
        let cards = AnalysisClient::new(&config.social_card_api_url, config.upstream_timeout)?;
        let images = AnalysisClient::new(&config.og_image_api_url, config.upstream_timeout)?;
        Ok(Self {
            cards: Arc::new(cards),
            images: Arc::new(images),
            branding: Arc::new(Branding::new(config.site_domain.clone())),
        })
    }
}

#[derive(Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

pub struct AppError {
    status: StatusCode,
    error: anyhow::Error,
}

impl AppError {
    pub fn with_status(status: StatusCode, error: anyhow::Error) -> Self {
        Self { status, error }
    }

    /// Map an analysis failure for `ticker` onto the response the caller sees.
    ///
    /// Upstream error statuses and messages are proxied; everything else is a
    /// generic 500.
    pub fn from_analysis(ticker: &str, err: AnalysisError) -> Self {
        match err {
            AnalysisError::Upstream { status, message } => {
                let status = StatusCode::from_u16(status)
                    .ok()
                    .filter(|s| s.is_client_error() || s.is_server_error())
                    .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
                let message = message
                    .unwrap_or_else(|| format!("Analysis API returned {} for {}", status.as_u16(), ticker));
                Self::with_status(status, anyhow::anyhow!(message))
            }
            other => {
                tracing::error!("Analysis for {} failed: {}", ticker, other);
                Self::with_status(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    anyhow::anyhow!("Failed to generate social card for {}", ticker),
                )
            }
        }
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self::with_status(StatusCode::INTERNAL_SERVER_ERROR, err.into())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::error!("Request failed ({}): {:#}", self.status, self.error);
        } else {
            tracing::warn!("Request rejected ({}): {}", self.status, self.error);
        }
        let body = ApiResponse::<()>::error(self.error.to_string());
        (self.status, Json(body)).into_response()
    }
}

#[derive(Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub version: &'static str,
    pub timestamp: String,
}

#[utoipa::path(
    get,
    path = "/health",
    responses((status = 200, description = "Service is up")),
    tag = "System"
)]
pub async fn health_check() -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers(Any);

    let trace = TraceLayer::new_for_http().make_span_with(|request: &Request| {
        tracing::info_span!(
            "http_request",
            method = %request.method(),
            uri = %request.uri(),
            request_id = tracing::field::Empty,
        )
    });

    Router::new()
        .route("/health", get(health_check))
        .route("/api-docs/openapi.json", get(openapi_json))
        .merge(social_card_routes())
        .merge(og_image_routes())
        .layer(
            ServiceBuilder::new()
                .layer(trace)
                .layer(cors)
                .layer(middleware::from_fn(request_id::request_id_middleware))
                .layer(middleware::from_fn(security_headers::security_headers_middleware)),
        )
        .with_state(state)
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("api_server=info,tower_http=info"));
    let json = std::env::var("RUST_LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let registry = tracing_subscriber::registry().with(filter);
    let result = if json {
        registry.with(tracing_subscriber::fmt::layer().json()).try_init()
    } else {
        registry.with(tracing_subscriber::fmt::layer()).try_init()
    };
    if let Err(e) = result {
        eprintln!("tracing already initialized: {e}");
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}

pub async fn run_server() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = ServerConfig::from_env()?;
    tracing::info!(
        "Social card backend: {}, OG image backend: {}, timeout {:?}",
        config.social_card_api_url,
        config.og_image_api_url,
        config.upstream_timeout
    );

    let state = AppState::from_config(&config)?;
    let app = build_router(state);

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("🚀 StockSignal share API listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}
