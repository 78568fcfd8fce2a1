//! Domain errors. Used by ports and use cases.
//!
//! Adapters map infrastructure errors into these. `Config` and `Auth` are
//! caught at the top level and end the run cleanly; everything else is fatal
//! for the invocation. Nothing is ever retried.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    /// Required configuration is missing or unusable.
    #[error("configuration error: {0}")]
    Config(String),

    /// The service rejected the access token (HTTP 401).
    #[error("authentication rejected (HTTP 401): {0}")]
    Auth(String),

    /// Any other non-success HTTP status from the service.
    #[error("chat service returned HTTP {status}: {body}")]
    Api { status: u16, body: String },

    /// Transport-level failure: connect, TLS, body read, or JSON decode.
    #[error("HTTP error: {0}")]
    Http(String),

    /// The directory snapshot could not be persisted.
    #[error("directory store error: {0}")]
    Store(String),

    /// An image download crossed the byte ceiling (declared or received).
    #[error("image too large: {size} bytes exceeds the {cap} byte cap")]
    ImageTooLarge { size: u64, cap: u64 },
}
