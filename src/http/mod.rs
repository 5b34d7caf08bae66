//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum router, request ID, tracing)
//!     → path matches log route?
//!         no  → 404 fallback
//!         yes → Content-Type: application/json
//!             → logs.rs (GET stream / POST buffer) or 405
//!     → response.rs (fixed bodies, NDJSON framing)
//! ```

pub mod logs;
pub mod response;
pub mod server;

pub use server::{bind_listener, AppState, HttpServer, ServerError};
