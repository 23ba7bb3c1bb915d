use std::sync::Arc;

use anyhow::Result;
use axum::extract::DefaultBodyLimit;
use axum::routing::{delete, get, post, put};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::constants::server;
use crate::snapshot::{Exporter, Importer};
use crate::store::StoreClient;
use crate::web::{handlers, AppState};

pub async fn start_web_server(
    config: Arc<Config>,
    store: Arc<dyn StoreClient>,
    exporter: Arc<Exporter>,
    importer: Arc<Importer>,
) -> Result<()> {
    let state = AppState::new(config.clone(), store, exporter, importer);

    let app = create_router(state);
    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Admin console running on http://{}", addr);
    axum::serve(listener, app).await?;
    Ok(())
}

pub fn create_router(state: AppState) -> Router {
    let static_dir = state.config.static_dir.clone();

    Router::new()
        // === CONNECTION STATUS ===
        .route("/api/health", get(handlers::get_health))
        // === DATABASE ROUTES ===
        .route(
            "/api/databases",
            get(handlers::list_databases).post(handlers::create_database),
        )
        .route("/api/databases/{database}", delete(handlers::delete_database))
        .route(
            "/api/databases/{database}/collections",
            get(handlers::list_collections),
        )
        // === DOCUMENT ROUTES ===
        .route(
            "/api/databases/{database}/collections/{collection}/documents",
            get(handlers::list_documents).post(handlers::create_document),
        )
        .route(
            "/api/databases/{database}/collections/{collection}/documents/{id}",
            get(handlers::get_document),
        )
        .route(
            "/api/databases/{database}/collections/{collection}/documents/{id}",
            put(handlers::update_document),
        )
        .route(
            "/api/databases/{database}/collections/{collection}/documents/{id}",
            delete(handlers::delete_document),
        )
        // === EXPORT / IMPORT ROUTES ===
        .route("/api/databases/{database}/export", get(handlers::export_database))
        .route("/api/databases/{database}/import", post(handlers::import_database))
        // === STATIC UI ===
        .fallback_service(ServeDir::new(static_dir))
        // Add middleware; uploaded snapshots can be large
        .layer(DefaultBodyLimit::max(server::MAX_IMPORT_BYTES))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
