//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Build the Axum router for the single log resource
//! - Wire up middleware (tracing, request ID, JSON content type)
//! - Bind the listener and serve until shutdown

use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    http::{header, HeaderValue},
    routing::{on, MethodFilter},
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    set_header::SetResponseHeaderLayer,
    trace::TraceLayer,
};

use crate::config::{ListenerConfig, ServiceConfig};
use crate::extractor::ErrorLineParser;
use crate::http::logs::{save_logs, stream_error_logs};
use crate::http::response::{method_not_allowed, not_found};
use crate::lifecycle::shutdown;

/// Errors that stop the server from starting or serving.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("failed to bind {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },

    #[error("server I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub log_file: Arc<PathBuf>,
    pub parser: Arc<ErrorLineParser>,
    pub max_body_bytes: usize,
}

impl AppState {
    pub fn from_config(config: &ServiceConfig) -> Self {
        Self {
            log_file: Arc::new(PathBuf::from(&config.logs.file)),
            parser: Arc::new(ErrorLineParser::new()),
            max_body_bytes: config.limits.max_body_bytes,
        }
    }
}

/// HTTP server for the log API.
pub struct HttpServer {
    router: Router,
    config: ServiceConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: ServiceConfig) -> Self {
        let state = AppState::from_config(&config);
        let router = Self::build_router(&config, state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    ///
    /// Unknown paths fall through to the 404 fallback before any route
    /// layer runs, so only the log route gets the JSON content type.
    pub fn build_router(config: &ServiceConfig, state: AppState) -> Router {
        let log_resource = on(MethodFilter::GET, stream_error_logs)
            .on(MethodFilter::POST, save_logs)
            // Without this Axum would answer HEAD with the GET handler.
            .on(MethodFilter::HEAD, method_not_allowed)
            .fallback(method_not_allowed);

        Router::new()
            .route(&config.logs.route, log_resource)
            .route_layer(SetResponseHeaderLayer::overriding(
                header::CONTENT_TYPE,
                HeaderValue::from_static("application/json"),
            ))
            .fallback(not_found)
            .with_state(state)
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TraceLayer::new_for_http())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
    }

    /// The router, for driving the service without a socket.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server on `listener` until `shutdown_rx` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown_rx: broadcast::Receiver<()>,
    ) -> Result<(), ServerError> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            log_file = %self.config.logs.file,
            route = %self.config.logs.route,
            "Server listening on port {}. Go to http://localhost:{}",
            addr.port(),
            addr.port()
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown::wait_for(shutdown_rx))
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Bind the configured listen address.
pub async fn bind_listener(config: &ListenerConfig) -> Result<TcpListener, ServerError> {
    TcpListener::bind(&config.bind_address)
        .await
        .map_err(|source| ServerError::Bind {
            address: config.bind_address.clone(),
            source,
        })
}
