//! gymlog API server.
//!
//! REST API for tracking workouts, backed by an in-memory document store.

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use gymlog_api::{AppState, config::Config, routes};
use gymlog_domain::Service;
use gymlog_storage::memory::MemoryStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();

    let config = Config::from_env()?;
    tracing::info!(port = config.port, "starting gymlog API");

    let store = if config.demo {
        tracing::info!("seeding store with demo data");
        MemoryStore::with_demo_data()
    } else {
        MemoryStore::new()
    };

    let state = Arc::new(AppState {
        config: config.clone(),
        service: Service::new(store),
    });

    let app = routes::create_router(state);

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Events from the `log` facade used by the library crates are captured via
/// the subscriber's log compatibility layer.
fn init_logging() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
