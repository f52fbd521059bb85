//! API server initialization

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::Router;
use axum::routing::get;
use tokio::net::TcpListener;
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;

use super::middleware::{self, AllowedOrigins};
use super::openapi::{openapi_json, swagger_ui_html};
use super::routes::{data, health, metadata};
use crate::core::CoreApp;
use crate::data::KineticsService;
use crate::data::filters::QueryLimits;

/// Shared state for every handler
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<KineticsService>,
    pub limits: QueryLimits,
}

/// Build the full router: API routes, docs, 404 fallback and layers
pub fn router(state: AppState, allowed_origins: &AllowedOrigins) -> Router {
    Router::new()
        .route("/api/v1/health", get(health::health))
        .route("/api/v1/data", get(data::get_data))
        .route("/api/v1/metadata", get(metadata::get_metadata))
        .route("/api/openapi.json", get(openapi_json))
        .route("/api/docs", get(swagger_ui_html))
        .route("/api/docs/", get(swagger_ui_html))
        .with_state(state)
        .fallback(middleware::handle_404)
        .layer(CompressionLayer::new())
        .layer(middleware::cors(allowed_origins))
        .layer(TraceLayer::new_for_http())
}

pub struct ApiServer {
    app: CoreApp,
    allowed_origins: AllowedOrigins,
}

impl ApiServer {
    pub fn new(app: CoreApp) -> Self {
        let allowed_origins = AllowedOrigins::new(&app.config.server.cors_origins);
        Self {
            app,
            allowed_origins,
        }
    }

    /// Returns CoreApp for graceful shutdown
    pub async fn start(self) -> Result<CoreApp> {
        let Self {
            app,
            allowed_origins,
        } = self;

        // Clone shutdown before moving app
        let shutdown = app.shutdown.clone();

        let host = app.config.server.host.clone();
        let port = app.config.server.port;
        let addr = SocketAddr::new(
            host.parse()
                .with_context(|| format!("Invalid server host: {}", host))?,
            port,
        );

        let state = AppState {
            store: app.store.clone(),
            limits: app.config.query.limits(),
        };
        let router = router(state, &allowed_origins);

        let listener = TcpListener::bind(addr)
            .await
            .with_context(|| format!("Failed to bind {}", addr))?;
        tracing::info!(
            address = %addr,
            backend = %app.store.backend(),
            table = %app.config.database.table,
            "OED API listening"
        );

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown.wait())
            .await?;

        Ok(app)
    }
}
