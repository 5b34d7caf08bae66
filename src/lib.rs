//! ERROR log API.
//!
//! Serves the ERROR entries of a log file as a newline-delimited JSON
//! stream and accepts JSON log payloads over HTTP.
//!
//! ```text
//!   GET  /api/logs ──▶ http::logs ──pull──▶ extractor ──▶ logs.txt
//!                          │
//!                          └── one NDJSON frame per record
//!
//!   POST /api/logs ──▶ security::limits (1 MiB) ──▶ serde_json ──▶ tracing
//! ```

pub mod config;
pub mod extractor;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod security;

pub use config::ServiceConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
