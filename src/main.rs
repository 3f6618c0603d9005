//! Sócios Backend
//!
//! REST backend for the membership list: search, sortable columns, paginated
//! rows, the removal confirmation flow and route progress reporting.

mod api;
mod config;
mod errors;
mod listing;
mod models;
mod navigation;
mod store;

use std::sync::Arc;

use axum::{
    routing::{get, post, put},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use config::Config;
use listing::delete::{DeleteSink, LoggingDeleteSink};
use listing::sessions::ViewRegistry;
use navigation::{RouteProgress, TracingIndicator};
use store::Repository;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<Repository>,
    pub views: Arc<ViewRegistry>,
    pub progress: Arc<RouteProgress>,
    pub delete_sink: Arc<dyn DeleteSink>,
    pub config: Arc<Config>,
}

impl AppState {
    /// Wire the state around a loaded repository.
    pub fn new(repo: Repository, config: Config, delete_sink: Arc<dyn DeleteSink>) -> Self {
        let progress = RouteProgress::new(Arc::new(TracingIndicator), config.progress_stop_delay);
        let views = ViewRegistry::new(config.view_idle_ttl, config.max_views);
        Self {
            repo: Arc::new(repo),
            views: Arc::new(views),
            progress: Arc::new(progress),
            delete_sink,
            config: Arc::new(config),
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    let json = config.log_json;
    tracing_subscriber::registry()
        .with(env_filter)
        .with(json.then(|| tracing_subscriber::fmt::layer().json()))
        .with((!json).then(tracing_subscriber::fmt::layer))
        .init();

    tracing::info!("Starting Sócios Backend");
    tracing::info!("Dataset path: {:?}", config.data_path);
    tracing::info!("Bind address: {}", config.bind_addr);
    tracing::info!("Page size: {}", config.page_size);

    let dataset = store::load_dataset(&config.data_path).await?;
    tracing::info!(
        "Loaded {} members, tracking fee years {:?}",
        dataset.members().len(),
        dataset.tracked_years()
    );
    let repo = Repository::new(dataset);

    let bind_addr = config.bind_addr;
    let state = AppState::new(repo, config, Arc::new(LoggingDeleteSink));

    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    tracing::info!("Server listening on {}", bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        // Datastore
        .route("/datastore", get(api::get_datastore))
        // Profile
        .route("/profile", get(api::get_profile))
        // Members
        .route("/members", get(api::list_members))
        .route("/members/{username}", get(api::get_member))
        // Views
        .route("/views", post(api::create_view))
        .route("/views/{id}", get(api::get_view).delete(api::delete_view))
        .route("/views/{id}/query", put(api::set_view_query))
        .route("/views/{id}/sort", put(api::set_view_sort))
        .route("/views/{id}/page", put(api::set_view_page))
        .route("/views/{id}/delete", post(api::request_view_delete))
        .route("/views/{id}/delete/confirm", post(api::confirm_view_delete))
        .route("/views/{id}/delete/cancel", post(api::cancel_view_delete))
        .route("/views/{id}/delete/dismiss", post(api::dismiss_view_delete))
        // Navigation
        .route("/navigation", get(api::get_navigation))
        .route("/navigation/click", post(api::report_link_click))
        .route("/navigation/settled", post(api::report_route_settled));

    let health_routes = Router::new().route("/health", get(health_check));

    Router::new()
        .nest("/api", api_routes)
        .merge(health_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "OK"
}
