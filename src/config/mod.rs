//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! optional config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → ServiceConfig (validated, immutable)
//!     → handed to HttpServer at startup
//! ```
//!
//! # Design Decisions
//! - No file means defaults: port 3000, `logs.txt`, `/api/logs`, 1 MiB bodies
//! - Config is immutable once loaded
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::{LimitsConfig, ListenerConfig, LogSourceConfig, ObservabilityConfig, ServiceConfig};
pub use validation::{validate_config, ValidationError};
