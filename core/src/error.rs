//! Error types for the REST client.
//!
//! # Design
//! Only two things can go wrong once a request is built: nothing came back
//! (`Network`), or something came back that is not JSON (`Decode`). A JSON
//! body that reports a failure of its own is a successful call as far as
//! the client is concerned; see `api::ApplicationError` for the caller-side
//! interpretation.
//!
//! An optional body size cap adds a third case, `BodyTooLarge`, which is
//! kept apart from `Network` because a response did arrive.

use thiserror::Error;

/// Failures below HTTP: no response was received.
#[derive(Debug, Error)]
pub enum TransportError {
    /// DNS lookup, connect or socket I/O failed.
    #[error("connection failed: {0}")]
    Connection(String),

    /// The configured request timeout elapsed.
    #[error("request timed out")]
    Timeout,

    /// A response arrived but its body exceeded the configured cap.
    /// `HttpClient` reports this as [`ClientError::BodyTooLarge`], not as a
    /// network failure.
    #[error("response body is larger than {limit} bytes")]
    BodyTooLarge { limit: u64 },

    #[error("transport failed: {0}")]
    Other(String),
}

/// Errors returned by `HttpClient`.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("network error: {0}")]
    Network(#[source] TransportError),

    /// A response arrived but its body is not the expected JSON.
    #[error("failed to decode response (HTTP {status}): {source}")]
    Decode {
        status: u16,
        #[source]
        source: serde_json::Error,
    },

    /// The request payload could not be serialized to JSON.
    #[error("failed to serialize request body: {0}")]
    Serialization(#[source] serde_json::Error),

    /// The response body is larger than `ClientConfig::max_body_bytes`.
    #[error("response body is larger than {limit} bytes")]
    BodyTooLarge { limit: u64 },

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl From<TransportError> for ClientError {
    fn from(err: TransportError) -> Self {
        match err {
            TransportError::BodyTooLarge { limit } => ClientError::BodyTooLarge { limit },
            other => ClientError::Network(other),
        }
    }
}

impl ClientError {
    pub fn is_network(&self) -> bool {
        matches!(self, ClientError::Network(_))
    }

    pub fn is_decode(&self) -> bool {
        matches!(self, ClientError::Decode { .. })
    }
}
