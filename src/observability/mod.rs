//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! handlers, extractor, server
//!     → tracing events with structured fields
//!     → logging.rs (EnvFilter + fmt layer on stdout)
//! tower-http TraceLayer
//!     → one span per request
//! ```

pub mod logging;

pub use logging::init_tracing;
