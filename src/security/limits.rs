//! Request body size limits.
//!
//! # Responsibilities
//! - Accumulate a request body frame by frame
//! - Reject as soon as the running total passes the ceiling
//!
//! # Design Decisions
//! - The check runs after every frame, so an oversize body is never read to the end
//! - The caller answers 413 and closes the connection; unread frames are abandoned

use axum::body::Body;
use bytes::{Bytes, BytesMut};
use futures_util::StreamExt;

/// Why a body could not be collected.
#[derive(Debug, thiserror::Error)]
pub enum BodyError {
    #[error("payload of at least {received} bytes exceeds limit of {limit} bytes")]
    TooLarge { limit: usize, received: usize },

    #[error("failed to read request body: {0}")]
    Transport(#[from] axum::Error),
}

/// Growing buffer with a hard byte ceiling.
#[derive(Debug)]
pub struct BodyBuffer {
    limit: usize,
    buf: BytesMut,
}

impl BodyBuffer {
    pub fn new(limit: usize) -> Self {
        Self {
            limit,
            buf: BytesMut::new(),
        }
    }

    /// Append a frame. Fails once the total exceeds the limit.
    pub fn push(&mut self, chunk: &[u8]) -> Result<(), BodyError> {
        self.buf.extend_from_slice(chunk);
        if self.buf.len() > self.limit {
            return Err(BodyError::TooLarge {
                limit: self.limit,
                received: self.buf.len(),
            });
        }
        Ok(())
    }

    pub fn finish(self) -> Bytes {
        self.buf.freeze()
    }
}

/// Collect `body`, stopping at the first frame that crosses `limit`.
pub async fn read_limited_body(body: Body, limit: usize) -> Result<Bytes, BodyError> {
    let mut frames = body.into_data_stream();
    let mut buffer = BodyBuffer::new(limit);

    while let Some(frame) = frames.next().await {
        buffer.push(&frame?)?;
    }

    Ok(buffer.finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn test_exact_limit_is_accepted() {
        let mut buffer = BodyBuffer::new(4);
        buffer.push(b"ab").unwrap();
        buffer.push(b"cd").unwrap();
        assert_eq!(buffer.finish(), Bytes::from_static(b"abcd"));
    }

    #[test]
    fn test_one_byte_over_is_rejected() {
        let mut buffer = BodyBuffer::new(4);
        buffer.push(b"abcd").unwrap();
        let err = buffer.push(b"e").unwrap_err();
        assert!(matches!(err, BodyError::TooLarge { limit: 4, received: 5 }));
    }

    #[test]
    fn test_multibyte_utf8_counts_bytes() {
        // "é" is two bytes in UTF-8.
        let mut buffer = BodyBuffer::new(3);
        assert!(buffer.push("éé".as_bytes()).is_err());
    }

    #[tokio::test]
    async fn test_stops_pulling_after_limit() {
        let pulled = Arc::new(AtomicUsize::new(0));
        let counter = pulled.clone();
        let frames = futures_util::stream::iter(0..10).map(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok::<_, std::io::Error>(Bytes::from(vec![b'x'; 100]))
        });

        let err = read_limited_body(Body::from_stream(frames), 250)
            .await
            .unwrap_err();

        assert!(matches!(err, BodyError::TooLarge { received: 300, .. }));
        assert_eq!(pulled.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_collects_small_body() {
        let bytes = read_limited_body(Body::from("{\"a\":1}"), 1024).await.unwrap();
        assert_eq!(bytes, Bytes::from_static(b"{\"a\":1}"));
    }
}
