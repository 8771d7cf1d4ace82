//! Gateway entry point.
//!
//! Runs every service in one process: the HTTP gateway in front, the
//! in-memory broker between shipping and warehouse, and the warehouse stock
//! consumer as a background task.

use std::error::Error;
use std::sync::Arc;

use events::{Broker, EventConsumer, InMemoryBroker};
use gateway::Stores;
use gateway::config::Config;
use tokio::signal;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use warehouse::StockDecrementHandler;

/// Waits for a shutdown signal (SIGINT or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for SIGINT");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("received SIGINT, starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("received SIGTERM, starting graceful shutdown");
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let config = Config::from_env();

    // 1. Initialize tracing
    tracing_subscriber::registry()
        .with(EnvFilter::try_new(&config.log_level).unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // 2. Install Prometheus metrics recorder
    let metrics_handle = metrics_exporter_prometheus::PrometheusBuilder::new().install_recorder()?;

    // 3. Connect the broker
    let broker: Arc<dyn Broker> = Arc::new(InMemoryBroker::new());
    broker.connect().await?;

    // 4. Stores and services
    let stores = if config.seed_demo_data {
        Stores::seeded()
    } else {
        Stores::new()
    };
    let consumer = EventConsumer::new(Arc::new(StockDecrementHandler::new(
        stores.warehouse.clone(),
    )))
    .start(Arc::clone(&broker))
    .await?;
    let state =
        gateway::create_default_state(&stores, Arc::clone(&broker), config.downstream_timeout);

    // 5. Build the application
    let app = gateway::create_app(state, metrics_handle);

    // 6. Start server
    let addr = config.addr();
    tracing::info!(
        %addr,
        downstream_timeout_ms = config.downstream_timeout.as_millis() as u64,
        "starting gateway"
    );

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // 7. Drain the pipeline
    consumer.shutdown().await?;
    broker.close().await?;

    tracing::info!("gateway shut down gracefully");
    Ok(())
}
