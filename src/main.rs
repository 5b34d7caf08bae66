use std::path::PathBuf;

use clap::Parser;

use error_log_api::config::{load_config, ServiceConfig};
use error_log_api::http::{bind_listener, HttpServer};
use error_log_api::lifecycle::{signals, Shutdown};
use error_log_api::observability::init_tracing;

#[derive(Parser)]
#[command(name = "error-log-api")]
#[command(about = "Streams ERROR log entries over HTTP", long_about = None)]
struct Args {
    /// Optional TOML configuration file; built-in defaults apply without it.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => ServiceConfig::default(),
    };

    init_tracing(&config.observability.log_level);

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        config_file = ?args.config,
        "error-log-api starting"
    );
    tracing::info!(
        bind_address = %config.listener.bind_address,
        log_file = %config.logs.file,
        route = %config.logs.route,
        max_body_bytes = config.limits.max_body_bytes,
        "Configuration loaded"
    );

    let listener = bind_listener(&config.listener).await?;

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(signals::shutdown_on_ctrl_c(shutdown.clone()));

    HttpServer::new(config).run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
