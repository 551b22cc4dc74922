//! Error types for the product API client.
//!
//! # Design
//! `NotFound` gets a dedicated variant because callers distinguish "the
//! product does not exist" from "the server returned an unexpected status".
//! Other non-2xx responses land in `HttpError` with the raw status and body.
//! `Transport` is reported by the host when the round-trip itself failed.

use thiserror::Error;

/// Errors produced while building requests or interpreting responses.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The server returned 404.
    #[error("resource not found")]
    NotFound,

    /// The server returned a status the operation does not accept.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    SerializationError(String),

    /// The request never produced a response.
    #[error("transport failed: {0}")]
    Transport(String),
}
