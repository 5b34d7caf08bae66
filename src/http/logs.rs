//! Handlers for the log resource.
//!
//! # GET
//! Streams ERROR records as NDJSON. The first item is awaited before the
//! response head goes out so an unreadable file still gets a proper 500.
//! Later failures can only abort the connection.
//!
//! # POST
//! Buffers the body under the size ceiling, parses it once as JSON and
//! logs it. Nothing is stored.

use std::io;

use axum::{
    body::Body,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use bytes::Bytes;
use futures_util::{stream, StreamExt};

use crate::extractor::{extract, ExtractFailure, Extracted};
use crate::http::response;
use crate::http::server::AppState;
use crate::security::{read_limited_body, BodyError};

/// `GET <route>`: stream the log file's ERROR entries.
pub async fn stream_error_logs(State(state): State<AppState>) -> Response {
    let mut items = Box::pin(extract(state.log_file.as_path(), state.parser.clone()));

    let first = match items.next().await {
        None => {
            tracing::debug!(path = %state.log_file.display(), "No ERROR entries to stream");
            return StatusCode::OK.into_response();
        }
        Some(Extracted::Failure(failure)) => {
            log_failure(&failure, "Log file could not be read");
            return response::processing_error();
        }
        Some(Extracted::Record(record)) => record,
    };

    let body = stream::once(async move { Extracted::Record(first) })
        .chain(items)
        .map(encode);

    (StatusCode::OK, Body::from_stream(body)).into_response()
}

fn encode(item: Extracted) -> Result<Bytes, io::Error> {
    match item {
        Extracted::Record(record) => response::ndjson_line(&record),
        Extracted::Failure(failure) => {
            log_failure(&failure, "Log read failed mid-stream, aborting response");
            Err(io::Error::other(failure.message))
        }
    }
}

fn log_failure(failure: &ExtractFailure, msg: &str) {
    tracing::error!(
        code = failure.code.as_deref().unwrap_or("-"),
        message = %failure.message,
        original_error = %failure.original_error,
        "{msg}"
    );
}

/// `POST <route>`: accept a JSON payload and log it.
pub async fn save_logs(State(state): State<AppState>, body: Body) -> Response {
    let bytes = match read_limited_body(body, state.max_body_bytes).await {
        Ok(bytes) => bytes,
        Err(BodyError::TooLarge { limit, received }) => {
            tracing::warn!(limit, received, "Rejecting oversize payload");
            return response::payload_too_large();
        }
        Err(err @ BodyError::Transport(_)) => {
            tracing::warn!(error = %err, "Request body could not be read");
            return response::invalid_json();
        }
    };

    match serde_json::from_slice::<serde_json::Value>(&bytes) {
        Ok(payload) => {
            tracing::info!(payload = %payload, "Logs payload received");
            response::saved()
        }
        Err(err) => {
            tracing::debug!(error = %err, bytes = bytes.len(), "Payload is not valid JSON");
            response::invalid_json()
        }
    }
}
