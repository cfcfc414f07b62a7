//! Club portal backend
//!
//! Cookie-session REST backend over a single JSON document, with file uploads served
//! from the public directory.

mod api;
mod auth;
mod config;
mod db;
mod errors;
mod models;
mod uploads;

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, post},
    Router,
};
use time::Duration;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use config::{Config, DEFAULT_BOOTSTRAP_PASSWORD};
use db::{BootstrapAccount, JsonStore};
use uploads::UploadSink;

/// Name of the session cookie.
pub const SESSION_COOKIE_NAME: &str = "club.sid";

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<JsonStore>,
    pub uploads: Arc<UploadSink>,
    pub config: Arc<Config>,
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

    tracing::info!("Starting club backend");
    tracing::info!("Document path: {:?}", config.data_path);
    tracing::info!("Public dir: {:?}", config.public_dir);
    tracing::info!("Bind address: {}", config.bind_addr);

    if config.bootstrap_password == DEFAULT_BOOTSTRAP_PASSWORD {
        tracing::warn!(
            "Using the default bootstrap password (CLUB_BOOTSTRAP_PASSWORD). Change it before going live!"
        );
    }

    let state = build_state(config.clone()).await?;
    let app = create_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("Server listening on {}", config.bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Open the document store and upload directories.
pub async fn build_state(config: Config) -> Result<AppState, errors::AppError> {
    let store = db::init_store(JsonStore::new(
        &config.data_path,
        BootstrapAccount {
            username: config.bootstrap_username.clone(),
            password: config.bootstrap_password.clone(),
        },
    ))
    .await?;

    let uploads = UploadSink::init(&config.public_dir).await?;
    tracing::info!(
        "Materials in {:?}, team photos in {:?}",
        uploads.materials_dir(),
        uploads.team_dir()
    );

    Ok(AppState {
        store: Arc::new(store),
        uploads: Arc::new(uploads),
        config: Arc::new(config),
    })
}

/// Create the application router with all routes.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let sessions = SessionManagerLayer::new(MemoryStore::default())
        .with_name(SESSION_COOKIE_NAME)
        .with_secure(state.config.cookie_secure)
        .with_expiry(Expiry::OnInactivity(Duration::hours(
            state.config.session_ttl_hours,
        )));

    // API routes
    let api_routes = Router::new()
        // Session
        .route("/login", post(api::login))
        .route("/logout", post(api::logout))
        .route("/dashboard-data", get(api::dashboard_data))
        // Team (public read)
        .route("/team", get(api::get_team))
        .route(
            "/superadmin/update-team-member",
            post(api::update_team_member),
        )
        // Staff
        .route("/admin/add-user", post(api::add_user))
        .route("/admin/delete-user/{username}", delete(api::delete_user))
        .route("/admin/add-material", post(api::add_material))
        .route("/admin/notify", post(api::notify))
        .layer(DefaultBodyLimit::max(state.config.max_upload_bytes))
        .layer(sessions);

    // Health check (no auth required)
    let health_routes = Router::new().route("/health", get(health_check));

    // Static site, uploaded materials and team photos
    let public = ServeDir::new(&state.config.public_dir);

    Router::new()
        .nest("/api", api_routes)
        .merge(health_routes)
        .fallback_service(public)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "OK"
}
