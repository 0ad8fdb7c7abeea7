//! ClinicalRxQ Membership Portal Backend
//!
//! Public marketing endpoints plus gated member endpoints (dashboard,
//! programs, resource library), backed by Airtable for content and a local
//! SQLite key-value store for session and bookmark state.

mod api;
mod auth;
mod backend;
mod config;
mod errors;
mod models;
mod portal;
mod store;

use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use backend::AirtableBackend;
use config::Config;
use portal::Portal;
use store::{init_store, SessionStore, SqliteStore};

/// Airtable base used when AIRTABLE_BASE_ID is not set.
const DEFAULT_AIRTABLE_BASE: &str = "appQ1zk7TfCJOY5V3";

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub portal: Portal,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env();

    // Initialize logging
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting ClinicalRxQ Portal Backend");
    tracing::info!("Client-state path: {:?}", config.state_db_path);
    tracing::info!("Bind address: {}", config.bind_addr);

    // Warn if the Airtable credential is not configured
    if !config.is_airtable_configured() {
        tracing::warn!(
            "No Airtable API key configured (AIRTABLE_API_KEY). Remote operations will fail closed!"
        );
    }

    // Initialize the client-state store
    let pool = init_store(&config.state_db_path).await?;
    let sessions = SessionStore::new(Arc::new(SqliteStore::new(pool)));

    // Wire the live backend only when the credential is present
    let backend = config.airtable_api_key.clone().map(|api_key| {
        let base_id = config
            .airtable_base_id
            .clone()
            .unwrap_or_else(|| DEFAULT_AIRTABLE_BASE.to_string());
        Arc::new(AirtableBackend::new(api_key, base_id)) as Arc<dyn backend::PortalBackend>
    });

    // Create application state
    let state = AppState {
        portal: Portal::new(backend, sessions),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("Server listening on {}", config.bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Public routes
    let public_routes = Router::new()
        .route("/", get(api::home))
        .route("/login", get(api::login_page))
        .route("/login", post(api::login))
        .route("/logout", post(api::logout))
        .route("/join", get(api::join))
        .route("/enroll", get(api::join))
        .route("/contact", get(api::contact));

    // Member-only routes behind the session gate
    let member_routes = Router::new()
        .route("/dashboard", get(api::dashboard))
        .route("/programs", get(api::list_programs))
        .route("/programs/{slug}", get(api::program_page))
        .route("/library", get(api::list_resources))
        .route("/resources", get(api::list_resources))
        .route("/resources/{id}", get(api::get_resource))
        .route("/resources/{id}/bookmark", post(api::toggle_bookmark))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::member_gate,
        ));

    // Health check (no gate)
    let health_routes = Router::new().route("/health", get(health_check));

    Router::new()
        .merge(public_routes)
        .merge(member_routes)
        .merge(health_routes)
        .fallback(get(api::home))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "OK"
}
