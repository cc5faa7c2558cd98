//! Error types for the Paystack client.
//!
//! # Design
//! Every failure is terminal for the call that produced it. Variants follow
//! the point at which the call failed: locally before any I/O (`Validation`,
//! `Serialization`, `UnsupportedQueryValue`, `Config`), on the wire
//! (`Transport`), or while interpreting the response (`Http`, `Rejected`,
//! `Decode`). Callers that want retries build them on top.

use thiserror::Error;

use crate::validate::ValidationErrors;

/// Result type alias for Paystack operations.
pub type Result<T> = std::result::Result<T, ApiError>;

/// Errors returned by `PaystackClient` and `Paystack`.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Connection-level failure (DNS, refused connection, broken body stream).
    #[error("transport error: {0}")]
    Transport(String),

    /// The server answered with a status other than 200 or 201.
    #[error("received HTTP {status}: {message}")]
    Http { status: u16, message: String },

    /// The server answered 2xx but reported `status: false` in the payload.
    #[error("request rejected: {message}")]
    Rejected { message: String },

    /// The response body could not be deserialized into the expected type.
    #[error("error decoding response: {0}")]
    Decode(String),

    /// The request payload could not be serialized to JSON.
    #[error("error encoding request: {0}")]
    Serialization(String),

    /// The input failed local validation; nothing was sent.
    #[error("error validating arguments: {0}")]
    Validation(#[from] ValidationErrors),

    /// A filtered field holds a value with no query-string conversion.
    #[error("unsupported query value for key '{key}': {kind}")]
    UnsupportedQueryValue { key: String, kind: &'static str },

    /// Client configuration is missing or malformed.
    #[error("{0}")]
    Config(String),
}

impl ApiError {
    /// The message reported by the remote API, if the error came from it.
    pub fn remote_message(&self) -> Option<&str> {
        match self {
            ApiError::Http { message, .. } | ApiError::Rejected { message } => Some(message),
            _ => None,
        }
    }
}
