//! lodge-ledger server entry point.
//!
//! Starts the Axum HTTP server with REST and WebSocket endpoints.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use axum::Router;
use axum::routing::get;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use lodge_ledger::api;
use lodge_ledger::app_state::AppState;
use lodge_ledger::config::LedgerConfig;
use lodge_ledger::domain::EventBus;
use lodge_ledger::service::LedgerService;
use lodge_ledger::store::CsvStore;
use lodge_ledger::ws::handler::ws_handler;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load configuration
    let config = LedgerConfig::from_env()?;
    tracing::info!(addr = %config.listen_addr, "starting lodge-ledger");

    // Prepare the backing file (created or migrated as needed)
    let store = CsvStore::new(config.ledger_file.clone());
    store
        .initialize()
        .with_context(|| format!("preparing backing file {}", config.ledger_file.display()))?;

    // Build domain and service layer
    let event_bus = EventBus::new(config.event_bus_capacity);
    let ledger = Arc::new(LedgerService::new(store, event_bus.clone()));

    // Build application state
    let app_state = AppState { ledger, event_bus };

    // Build router
    let app = Router::new()
        .merge(api::build_router())
        .route("/ws", get(ws_handler))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive())
                .layer(TimeoutLayer::new(Duration::from_secs(30))),
        )
        .with_state(app_state);

    #[cfg(feature = "swagger-ui")]
    let app = {
        use utoipa::OpenApi as _;
        app.merge(
            utoipa_swagger_ui::SwaggerUi::new("/swagger-ui")
                .url("/api-docs/openapi.json", api::ApiDoc::openapi()),
        )
    };

    // Start server
    let listener = tokio::net::TcpListener::bind(config.listen_addr)
        .await
        .with_context(|| format!("binding {}", config.listen_addr))?;
    tracing::info!(addr = %config.listen_addr, "server listening");

    axum::serve(listener, app).await?;

    Ok(())
}
