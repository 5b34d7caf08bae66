//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (main.rs):
//!     Load config → Validate → Init tracing → Bind listener → Serve
//!
//! Shutdown (shutdown.rs):
//!     Ctrl+C (signals.rs) → Shutdown::trigger → stop accepting → drain
//! ```

pub mod shutdown;
pub mod signals;

pub use shutdown::Shutdown;
