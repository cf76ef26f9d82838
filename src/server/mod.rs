use axum::{
    Router,
    http::HeaderValue,
    routing::{get, post},
};
use anyhow::Context;
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::repository::Repository;

pub mod error;
pub mod payload;
pub mod routes;

/// Server state
pub struct AppState {
    pub repository: Repository,
}

/// Where to listen and which browser origins may call the API
#[derive(Debug, Clone)]
pub struct ServerOptions {
    pub host: String,
    pub port: u16,
    pub allowed_origins: Vec<String>,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(routes::root))
        .route(
            "/api/projects",
            get(routes::list_projects).post(routes::create_project),
        )
        .route("/api/projects/from-template", post(routes::create_from_template))
        .route(
            "/api/projects/{id}",
            get(routes::get_project)
                .put(routes::update_project)
                .delete(routes::delete_project),
        )
        .route("/api/projects/{id}/categories", post(routes::add_category))
        .route("/api/project-templates", get(routes::list_templates))
        .route(
            "/api/vendors",
            get(routes::list_vendors).post(routes::create_vendor),
        )
        .route("/api/categories/{id}/vendors", get(routes::category_vendors))
        .route("/api/categories/{id}/quotes", get(routes::category_quotes))
        .route(
            "/api/categories/{id}/vendor-management",
            get(routes::vendor_management),
        )
        .route("/api/categories/{id}/invite", post(routes::invite_vendors))
        .route(
            "/api/categories/{id}/vendors/{vendor_id}/contact",
            post(routes::contact_vendor),
        )
        .route("/api/categories/{id}/select-quote", post(routes::select_quote))
        .route("/api/groups", get(routes::list_groups))
        .route("/api/groups/{id}", get(routes::get_group))
        .with_state(state)
}

/// An empty list or `*` allows any origin
pub fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    if allowed_origins.is_empty() || allowed_origins.iter().any(|o| o == "*") {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any)
}

pub async fn start_server(options: ServerOptions, repository: Repository) -> anyhow::Result<()> {
    tracing::info!("Serving data from {}", repository.describe());
    let state = Arc::new(AppState { repository });

    let app = router(state)
        .layer(cors_layer(&options.allowed_origins))
        .layer(TraceLayer::new_for_http());

    let listener = bind_listener(&options.host, options.port).await?;
    let addr = listener.local_addr()?;
    tracing::info!("Starting server on {}", addr);
    crate::ui::output::success(&format!("Server running at http://{}", addr));

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Bind `host:port`, resolving host names such as `localhost`
pub async fn bind_listener(host: &str, port: u16) -> anyhow::Result<tokio::net::TcpListener> {
    tokio::net::TcpListener::bind((host, port))
        .await
        .with_context(|| format!("failed to bind {}:{}", host, port))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
}
