use std::path::PathBuf;
use std::sync::Arc;

use roster::config::Configuration;
use roster::telemetry;
use tokio::net::TcpListener;
use tokio::signal;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Resolve once Ctrl-C or SIGTERM is received.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            tracing::error!(error = %err, "cannot listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            },
            Err(err) => {
                tracing::error!(error = %err, "cannot listen for SIGTERM");
                std::future::pending::<()>().await;
            },
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("shutdown signal received, stopping server");
}

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    let path = std::env::var("CONFIG_PATH")
        .map(PathBuf::from)
        .unwrap_or_default();
    let config = Configuration::default().path(path).read()?;

    telemetry::init(&config.telemetry)?;

    let metrics = if config.telemetry.prometheus {
        Some(telemetry::setup_metrics_recorder()?)
    } else {
        None
    };

    let addr = config.socket_addr();
    let state = roster::initialize_state(Arc::clone(&config), metrics);

    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, name = %config.name, "server started");

    axum::serve(listener, roster::app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}
