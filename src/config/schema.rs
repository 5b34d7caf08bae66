//! Configuration schema definitions.
//!
//! Every section has a `Default` that reproduces the service's fixed
//! behavior, so running without a config file needs no setup beyond a
//! `logs.txt` in the working directory.

use serde::{Deserialize, Serialize};

/// Root configuration for the service.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ServiceConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Log source and the HTTP route that exposes it.
    pub logs: LogSourceConfig,

    /// Request limits.
    pub limits: LimitsConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:3000").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:3000".to_string(),
        }
    }
}

/// Where ERROR entries are read from and where they are served.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LogSourceConfig {
    /// Log file, resolved against the working directory when relative.
    pub file: String,

    /// The single resource path served by the router.
    pub route: String,
}

impl Default for LogSourceConfig {
    fn default() -> Self {
        Self {
            file: "logs.txt".to_string(),
            route: "/api/logs".to_string(),
        }
    }
}

/// Request size limits.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Maximum accepted POST body size in bytes.
    pub max_body_bytes: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_body_bytes: 1_048_576, // 1 MiB
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}
