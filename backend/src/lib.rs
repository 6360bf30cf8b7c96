//! Directory back office
//!
//! Enquiry intake for listed providers and the admin tooling that verifies,
//! searches, and removes those listings.

use std::sync::Arc;
use std::time::Duration;

use axum::{routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub mod config;
pub mod error;
pub mod external;
pub mod gateway;
pub mod handlers;
pub mod routes;
pub mod services;

pub use config::Config;
pub use error::{AppError, AppResult};

use external::AssistantClient;
use gateway::Gateways;
use services::{AnalyticsRecorder, CatalogService, EnquiryService, ListingDirectory};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub db: Option<sqlx::PgPool>,
    pub enquiries: EnquiryService,
    pub directory: Arc<ListingDirectory>,
    pub catalog: CatalogService,
    pub assistant: Option<AssistantClient>,
}

impl AppState {
    /// Wire every service onto the given gateways
    pub fn new(config: Config, gateways: Gateways, db: Option<sqlx::PgPool>) -> AppResult<Self> {
        let analytics = AnalyticsRecorder::new(gateways.analytics, config.analytics.enabled);
        let assistant = config
            .assistant
            .endpoint
            .clone()
            .map(|endpoint| {
                AssistantClient::new(endpoint, Duration::from_secs(config.assistant.timeout_secs))
            })
            .transpose()?;

        Ok(Self {
            enquiries: EnquiryService::new(gateways.enquiries, analytics),
            directory: Arc::new(ListingDirectory::new(
                gateways.providers,
                config.listings.page_size,
            )),
            catalog: CatalogService::new(gateways.users, gateways.categories),
            assistant,
            db,
            config: Arc::new(config),
        })
    }
}

/// Create the application router with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .nest("/api/v1", routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Root endpoint
async fn root() -> &'static str {
    "Directory Back Office API v1.0"
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}
