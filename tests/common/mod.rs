//! Shared helpers for integration tests.

use std::io::Write;
use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;

use error_log_api::config::ServiceConfig;
use error_log_api::http::HttpServer;
use error_log_api::lifecycle::Shutdown;

pub const SAMPLE_LOG: &str = "\
2024-01-01T00:00:00 [INFO] service started
2024-01-01T00:00:01 [ERROR] disk full
ERROR something went wrong
2024-01-01T00:00:02 [WARN] slow response
2024-01-01T00:00:03 [ERROR] connection refused: db:5432
";

pub const SAMPLE_NDJSON: &str = concat!(
    r#"{"timestamp":"2024-01-01T00:00:01","level":"ERROR","message":"disk full"}"#,
    "\n",
    r#"{"timestamp":"2024-01-01T00:00:03","level":"ERROR","message":"connection refused: db:5432"}"#,
    "\n",
);

/// Write `contents` to a fresh temporary log file.
pub fn log_file(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

/// Default config pointing at `path`.
pub fn config_for(path: &Path) -> ServiceConfig {
    let mut config = ServiceConfig::default();
    config.logs.file = path.display().to_string();
    config
}

/// Start a server on an ephemeral port.
#[allow(dead_code)]
pub async fn start_server(config: ServiceConfig) -> (SocketAddr, Shutdown) {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    let server = HttpServer::new(config);

    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    // Give the accept loop a moment to start.
    tokio::time::sleep(Duration::from_millis(50)).await;

    (addr, shutdown)
}

/// Client without pooling so each request gets its own connection.
#[allow(dead_code)]
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}
