//! Fixed replies and NDJSON framing.
//!
//! Every body the service answers with, apart from streamed records, is a
//! constant here so handlers and tests agree on the exact text.

use std::io;

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use bytes::Bytes;
use serde::Serialize;

use crate::extractor::LogRecord;

pub const NOT_FOUND_BODY: &str = "Provided url path does not exists!";
pub const METHOD_NOT_ALLOWED_BODY: &str = "Method Not Allowed";
pub const PAYLOAD_TOO_LARGE_BODY: &str = "Payload Too Large";
pub const INVALID_JSON_BODY: &str = "Invalid JSON";
pub const SAVED_BODY: &str = "Logs have been saved.";
pub const PROCESSING_ERROR: &str = "Error during processing.";

#[derive(Debug, Serialize)]
struct ErrorEnvelope {
    error: &'static str,
}

/// Fallback for every path other than the log route.
pub async fn not_found() -> Response {
    (StatusCode::NOT_FOUND, NOT_FOUND_BODY).into_response()
}

/// Fallback for unsupported methods on the log route.
pub async fn method_not_allowed() -> Response {
    (StatusCode::METHOD_NOT_ALLOWED, METHOD_NOT_ALLOWED_BODY).into_response()
}

/// 500 with the JSON error envelope, sent when the log cannot be read
/// before anything was streamed.
pub fn processing_error() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorEnvelope {
            error: PROCESSING_ERROR,
        }),
    )
        .into_response()
}

/// 413 that also tells hyper to drop the connection instead of draining
/// the rest of the body.
pub fn payload_too_large() -> Response {
    (
        StatusCode::PAYLOAD_TOO_LARGE,
        [(header::CONNECTION, "close")],
        PAYLOAD_TOO_LARGE_BODY,
    )
        .into_response()
}

pub fn invalid_json() -> Response {
    (StatusCode::BAD_REQUEST, INVALID_JSON_BODY).into_response()
}

pub fn saved() -> Response {
    (StatusCode::CREATED, SAVED_BODY).into_response()
}

/// Serialize one record as a single JSON line terminated by `\n`.
pub fn ndjson_line(record: &LogRecord) -> Result<Bytes, io::Error> {
    let mut line = serde_json::to_vec(record).map_err(io::Error::other)?;
    line.push(b'\n');
    Ok(Bytes::from(line))
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    #[test]
    fn test_ndjson_line_is_single_line() {
        let record = LogRecord {
            timestamp: "t".into(),
            level: "ERROR".into(),
            message: "multi\nline".into(),
        };

        let line = ndjson_line(&record).unwrap();
        assert_eq!(
            &line[..],
            b"{\"timestamp\":\"t\",\"level\":\"ERROR\",\"message\":\"multi\\nline\"}\n"
        );
    }

    #[tokio::test]
    async fn test_processing_error_envelope() {
        let response = processing_error();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&body[..], br#"{"error":"Error during processing."}"#);
    }

    #[test]
    fn test_payload_too_large_closes_connection() {
        let response = payload_too_large();
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(response.headers()[header::CONNECTION], "close");
    }
}
