//! Simple Time Service
//!
//! ```text
//!     Client ──▶ [request id] ──▶ [trace span] ──▶ router ──┬─▶ GET /        → {timestamp, ip}
//!                                                           ├─▶ GET /healthz → "ok"
//!                                                           ├─▶ wrong method → 405
//!                                                           └─▶ fallback     → 404
//! ```
//!
//! Configuration comes from the environment only: `PORT` (default 8080),
//! `LOG_FORMAT`, `RUST_LOG` and `METRICS_ADDRESS`.

use std::sync::Arc;

use tokio::net::TcpListener;

use simple_time_service::config::{self, LogFormat};
use simple_time_service::lifecycle::{shutdown_on_signal, Shutdown};
use simple_time_service::observability::{logging, metrics};
use simple_time_service::HttpServer;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = match config::load_from_env() {
        Ok(config) => config,
        Err(e) => {
            // Logging is not configured yet; report with the default format.
            let _ = logging::init_logging(LogFormat::default());
            tracing::error!(error = %e, "Invalid configuration");
            return Err(e.into());
        }
    };

    logging::init_logging(config.observability.log_format)?;

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        "simple-time-service starting"
    );
    tracing::info!(
        bind_address = %config.listener.bind_address,
        log_format = ?config.observability.log_format,
        metrics_address = ?config.observability.metrics_address,
        "Configuration loaded"
    );

    if let Some(addr) = config.observability.metrics_address {
        metrics::init_metrics(addr);
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Arc::new(Shutdown::new());
    tokio::spawn(shutdown_on_signal(shutdown.clone()));

    let server = HttpServer::default();
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
