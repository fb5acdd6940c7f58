//! Catalog Actions Server
//!
//! Serves the catalog's item request forms and emails requests to staff.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, Layer};

use catalog_actions::{
    api,
    config::{AppConfig, LoggingConfig, SessionBackend},
    models::location::LocationSet,
    services::{
        email::SmtpMailer,
        redis::RedisSessionStore,
        session::{delete_expired_every, session_layer, MemorySessionStore},
        Services,
    },
    AppState,
};

/// How often expired sessions are dropped from the in-memory store
const SESSION_SWEEP_INTERVAL: Duration = Duration::from_secs(60);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Load configuration
    let config = AppConfig::load().context("Failed to load configuration")?;

    // Keep the guard alive so buffered file logs are flushed on exit
    let _log_guard = init_tracing(&config.logging);

    tracing::info!("Starting Catalog Actions Server v{}", env!("CARGO_PKG_VERSION"));

    let locations = LocationSet::from_config(&config.locations).context("Invalid location configuration")?;
    if locations.is_empty() {
        tracing::warn!("No locations configured, every request will show the item selection notice");
    } else {
        tracing::info!("Loaded {} locations", locations.len());
    }

    let mailer = SmtpMailer::new(&config.email).context("Failed to configure SMTP")?;
    tracing::info!(
        "Sending mail through {}:{}",
        config.email.smtp_host,
        config.email.smtp_port
    );

    let services = Services::new(locations, Arc::new(mailer));

    let addr = SocketAddr::new(
        config.server.host.parse().context("Invalid host address")?,
        config.server.port,
    );

    let session_config = config.session.clone();

    // Create application state
    let state = AppState {
        config: Arc::new(config),
        services: Arc::new(services),
    };

    let app = match session_config.backend {
        SessionBackend::Redis => {
            let store = RedisSessionStore::new(&session_config.redis_url)
                .await
                .context("Failed to connect to Redis")?;
            tracing::info!("Connected to Redis session store");
            api::create_router(state, session_layer(store, &session_config))
        }
        SessionBackend::Memory => {
            tracing::info!("Using in-memory session store");
            let store = MemorySessionStore::new();
            tokio::spawn(delete_expired_every(store.clone(), SESSION_SWEEP_INTERVAL));
            api::create_router(state, session_layer(store, &session_config))
        }
    };

    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Console logging, plus a daily rolling file when a directory is configured
fn init_tracing(logging: &LoggingConfig) -> Option<WorkerGuard> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("catalog_actions={},tower_http=debug", logging.level).into());

    let console = if logging.format == "json" {
        tracing_subscriber::fmt::layer().json().boxed()
    } else {
        tracing_subscriber::fmt::layer().boxed()
    };

    let (file, guard) = match &logging.directory {
        Some(directory) => {
            let appender = tracing_appender::rolling::daily(directory, "catalog-actions.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(writer)
                .boxed();
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(console)
        .with(file)
        .init();

    guard
}
