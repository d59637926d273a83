use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::api::handlers::{get_points_handler, health_check, process_receipt_handler};
use crate::config::{LogFormat, ServerConfig, DEFAULT_LOG_FILTER};
use crate::store::ReceiptStore;

/// Shared state handed to every handler
#[derive(Clone, Default)]
pub struct AppState {
    pub store: Arc<ReceiptStore>,
}

impl AppState {
    pub fn new(store: Arc<ReceiptStore>) -> Self {
        Self { store }
    }
}

pub fn init_tracing(log_format: LogFormat) {
    // Exactly one fmt layer is active; the other stays None
    let (json_layer, pretty_layer) = match log_format {
        LogFormat::Json => (Some(fmt::layer().json().with_target(false)), None),
        LogFormat::Pretty => (None, Some(fmt::layer().pretty())),
    };

    tracing_subscriber::registry()
        .with(json_layer)
        .with(pretty_layer)
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .init();
}

pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/receipts/process", post(process_receipt_handler))
        .route("/receipts/{id}/points", get(get_points_handler))
        // Health check endpoint
        .route("/health", get(health_check))
        .with_state(state)
        // Add tracing layer for observability
        .layer(TraceLayer::new_for_http())
        // A panicking handler answers 500 instead of dropping the connection
        .layer(CatchPanicLayer::new())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to install CTRL+C signal handler: {}", e);
        // Without a signal handler the server runs until killed
        std::future::pending::<()>().await;
    }
    info!("Shutting down gracefully...");
}

pub async fn run_server(config: ServerConfig) -> Result<(), Box<dyn std::error::Error>> {
    init_tracing(config.log_format);

    info!("Starting receipt processor");

    let state = AppState::new(Arc::new(ReceiptStore::new()));
    let app = create_app(state.clone());

    let addr = config.socket_addr();
    info!("Server listening on {}", addr);

    // Run the server with graceful shutdown
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    let stats = state.store.stats();
    info!(
        receipts = stats.receipts,
        cached_points = stats.cached_points,
        cache_hits = stats.cache_hits,
        cache_misses = stats.cache_misses,
        "Server stopped"
    );

    Ok(())
}
