//! fyyur server entry point.
//!
//! Starts the Axum HTTP server backed by PostgreSQL, or by an in-memory
//! store when persistence is disabled.

use std::sync::Arc;

use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use fyyur::api;
use fyyur::app_state::AppState;
use fyyur::config::{FyyurConfig, LogFormat};
use fyyur::persistence::{MemoryStore, PostgresStore, RecordStore};
use fyyur::service::ListingService;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = FyyurConfig::from_env()?;

    // Initialize tracing
    init_tracing(config.log_format);
    tracing::info!(addr = %config.listen_addr, "starting fyyur");

    // Build persistence layer
    let store: Arc<dyn RecordStore> = if config.persistence_enabled {
        let store = PostgresStore::connect(&config).await?;
        if config.run_migrations {
            store.run_migrations().await?;
        }
        Arc::new(store)
    } else {
        tracing::warn!("persistence disabled, records are kept in memory");
        Arc::new(MemoryStore::new())
    };

    // Build service layer and application state
    let app_state = AppState::new(ListingService::new(store));

    // Build router
    let app = api::build_app(app_state, config.request_timeout());

    // Start server
    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    tracing::info!(addr = %config.listen_addr, "server listening");

    axum::serve(listener, app).await?;

    Ok(())
}

fn init_tracing(format: LogFormat) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("fyyur=info,tower_http=info"));
    let (json_layer, text_layer) = match format {
        LogFormat::Json => (Some(fmt::layer().json().flatten_event(true)), None),
        LogFormat::Pretty => (None, Some(fmt::layer())),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(text_layer)
        .init();
}
