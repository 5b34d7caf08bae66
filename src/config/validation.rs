//! Configuration validation.
//!
//! Serde handles the syntax; this module checks the values make sense.
//! All problems are collected so a bad file is reported in one go.

use std::net::SocketAddr;

use crate::config::schema::ServiceConfig;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("listener.bind_address `{0}` is not a valid socket address")]
    BindAddress(String),

    #[error("logs.route `{0}` must start with '/' and name a resource")]
    Route(String),

    #[error("logs.file must not be empty")]
    EmptyFile,

    #[error("limits.max_body_bytes must be greater than zero")]
    ZeroBodyLimit,

    #[error("observability.log_level `{0}` is not one of trace, debug, info, warn, error")]
    LogLevel(String),
}

/// Validate a configuration, returning every problem found.
pub fn validate_config(config: &ServiceConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::BindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    let route = &config.logs.route;
    // Braces and '*' would be read as path parameters by the router.
    if !route.starts_with('/') || route.len() < 2 || route.contains(['{', '}', '*']) {
        errors.push(ValidationError::Route(route.clone()));
    }

    if config.logs.file.trim().is_empty() {
        errors.push(ValidationError::EmptyFile);
    }

    if config.limits.max_body_bytes == 0 {
        errors.push(ValidationError::ZeroBodyLimit);
    }

    let level = config.observability.log_level.to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ValidationError::LogLevel(
            config.observability.log_level.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
