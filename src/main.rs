//! External data service.
//!
//! # Architecture Overview
//!
//! ```text
//!     GET /api/external/data?max_prediction_rows=N
//!         │
//!         ▼
//!     ┌──────────┐    ┌──────────────┐    ┌───────────────────────────┐
//!     │   http   │───▶│   resolver   │───▶│ metrics_log │ predictions │
//!     │  server  │    │ (env var →   │    │ probe       (concurrent)  │
//!     └──────────┘    │  directory)  │    └─────────────┬─────────────┘
//!         ▲           └──────────────┘                  │
//!         │                                             ▼
//!         └──────────────── JSON envelope ◀──── envelope.rs
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use external_data::config::{load_config, ServiceConfig};
use external_data::lifecycle::{signals, Shutdown};
use external_data::observability::{logging, metrics};
use external_data::HttpServer;

#[derive(Parser)]
#[command(name = "external-data")]
#[command(about = "Serve a local directory of metrics, predictions and probe results as JSON", long_about = None)]
struct Args {
    /// TOML configuration file. Defaults are used when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override `listener.bind_address`.
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => ServiceConfig::default(),
    };
    if let Some(bind) = args.bind {
        config.listener.bind_address = bind;
    }

    logging::init_logging(&config.observability);

    tracing::info!("external-data v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        env_var = %config.data_source.env_var,
        default_rows = config.predictions.default_rows,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;

    let shutdown = Shutdown::new();
    tokio::spawn(signals::trigger_on_signal(shutdown.clone()));

    let server = HttpServer::new(config);
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
