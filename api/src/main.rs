//! SmartTodo+ API server
//!
//! Boot sequence: logging, configuration, database pool, router, listener.
//! The startup task then waits for an interrupt or terminate signal, drains
//! in-flight requests, and closes the pool before exiting.

use std::net::SocketAddr;
use std::sync::Arc;

use common::config::AppConfig;
use common::db;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{debug, error, info, Level};
use tracing_subscriber::{fmt::format::FmtSpan, EnvFilter, FmtSubscriber};

use api::router::build_router;
use api::AppState;

#[tokio::main]
async fn main() {
    init_tracing();

    if let Err(err) = run().await {
        error!("Startup failed: {}", err);
        std::process::exit(1);
    }
}

/// Initialize logging with debug level when DEBUG=1 env var is set
fn init_tracing() {
    let env = std::env::var("DEBUG").unwrap_or_else(|_| "0".to_string());
    let log_level = if env == "1" { Level::DEBUG } else { Level::INFO };

    let env_filter = EnvFilter::builder()
        .with_default_directive(log_level.into())
        .from_env_lossy();

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_span_events(FmtSpan::CLOSE)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set tracing subscriber");

    debug!("Debug logging enabled");
}

async fn run() -> common::Result<()> {
    let config = AppConfig::load()?;
    info!(environment = %config.server.env, "Configuration loaded");

    let pool = db::connect(&config.database).await?;

    let state = Arc::new(AppState { pool: pool.clone() });
    let app = build_router(state);

    let addr = config.server.listen_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!("SmartTodo+ API listening on http://{}", addr);

    // Run until interrupt signal
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    db::close(&pool).await;
    info!("Server stopped");

    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, draining in-flight requests");
}
