//! Request hardening.
//!
//! The service has no authentication; the only guard is the POST body
//! ceiling enforced by `limits.rs`.

pub mod limits;

pub use limits::{read_limited_body, BodyBuffer, BodyError};
