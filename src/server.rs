use anyhow::Result;
use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post},
    Router,
};
use std::{net::SocketAddr, sync::Arc, time::Duration};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::{
    auth,
    catalog::CatalogService,
    config::Config,
    handlers,
    session::SessionStore,
    signals::setup_signal_handlers,
};

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub catalog: Arc<CatalogService>,
    pub sessions: Arc<SessionStore>,
}

impl AppState {
    /// Build the state from configuration, loading the catalog once
    pub async fn new(config: Config) -> Self {
        let catalog = Arc::new(CatalogService::load(config.catalog.clone()).await);
        Self::with_catalog(config, catalog)
    }

    pub fn with_catalog(config: Config, catalog: Arc<CatalogService>) -> Self {
        let ttl = Duration::from_secs(config.auth.session_ttl_minutes.saturating_mul(60));
        let sessions = Arc::new(SessionStore::new(ttl, config.auth.is_enabled()));
        Self {
            config: Arc::new(config),
            catalog,
            sessions,
        }
    }
}

/// Start the Pricing Desk server
///
/// This function:
/// 1. Loads the catalog
/// 2. Sets up signal handlers for graceful shutdown and catalog reload
/// 3. Creates the Axum application
/// 4. Binds to the configured address
/// 5. Serves requests with graceful shutdown support
pub async fn start_server(config: Config) -> Result<()> {
    let state = AppState::new(config.clone()).await;

    // SIGTERM, SIGINT for shutdown; SIGHUP for catalog reload
    let (shutdown_tx, signal_handle) = setup_signal_handlers(state.catalog.clone())?;
    let mut shutdown_rx = shutdown_tx.subscribe();

    let app = create_router(state.clone());

    let addr = SocketAddr::from((
        config.server.host.parse::<std::net::IpAddr>()?,
        config.server.port,
    ));

    info!("Starting Pricing Desk on http://{}", addr);
    info!(
        "Configuration: {} catalog products, password gate {}, VAT {:.0}%",
        state.catalog.catalog().await.len(),
        if config.auth.is_enabled() { "on" } else { "off" },
        config.manufacturing.vat_rate * 100.0
    );

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            let _ = shutdown_rx.recv().await;
            info!("Shutdown signal received, draining connections...");
        })
        .await?;

    signal_handle.await?;
    info!("Server stopped gracefully");

    Ok(())
}

/// Create the Axum router with all routes and middleware
pub fn create_router(state: AppState) -> Router {
    // Routes behind the password gate
    let gated_routes = Router::new()
        .route("/api/catalog", get(handlers::catalog::list_catalog))
        .route("/api/catalog/reload", post(handlers::catalog::reload_catalog))
        .route("/api/analyze", post(handlers::analyze::analyze_json))
        .route("/analyze", post(handlers::analyze::analyze_html))
        .route("/api/cost", post(handlers::cost::create_estimate))
        .route(
            "/api/cost/history",
            get(handlers::cost::list_history).delete(handlers::cost::clear_history),
        )
        .route("/api/cost/history.csv", get(handlers::cost::export_history))
        .route("/logout", post(handlers::pages::logout))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth::auth_middleware,
        ));

    Router::new()
        .route("/", get(handlers::pages::index))
        .route("/login", post(handlers::pages::login))
        .merge(gated_routes)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth::session_middleware,
        ))
        // Health checks do not open sessions
        .route("/health", get(handlers::health::health_check))
        .layer(DefaultBodyLimit::max(1024 * 1024))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_huge_session_ttl_does_not_overflow() {
        let mut config = Config::default();
        config.auth.session_ttl_minutes = u64::MAX;
        let catalog = Arc::new(CatalogService::new(config.catalog.clone()));

        let state = AppState::with_catalog(config, catalog);
        assert!(state.sessions.is_empty());
    }
}
