//! Error types for textsink
//!
//! The taxonomy mirrors the three failure classes of the pipeline:
//! - [`DecodeError`] -- a malformed inbound envelope or notification; the same
//!   bytes will always fail the same way, so redelivery cannot help
//! - [`UpstreamError`] -- a recognition-service fetch or pagination failure;
//!   eligible for redelivery by the queueing layer
//! - [`WriteError`] -- an artifact persistence failure; redelivery is safe
//!   because writes are idempotent
//!
//! Non-success job status is deliberately absent from this taxonomy: it is a
//! recognized terminal outcome, not an error.

use thiserror::Error;

use crate::types::JobStatus;

/// Result type alias for textsink operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for textsink
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error with context about which setting is invalid
    #[error("configuration error: {message}")]
    Config {
        /// Human-readable error message describing the configuration issue
        message: String,
        /// The configuration key that caused the error (e.g., "output_bucket")
        key: Option<String>,
    },

    /// Inbound message could not be decoded
    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),

    /// Recognition result could not be fetched or paginated
    #[error("upstream error: {0}")]
    Upstream(#[from] UpstreamError),

    /// Text artifact could not be persisted
    #[error("write error: {0}")]
    Write(#[from] WriteError),
}

impl Error {
    /// Whether redelivering the message can plausibly succeed.
    ///
    /// Decode failures are deterministic over the message bytes, so the
    /// queueing layer's retries only delay the dead-letter path. Upstream and
    /// write failures are transient by nature and worth retrying.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Error::Upstream(_) | Error::Write(_))
    }
}

/// Failure decoding the doubly-encoded inbound envelope
///
/// Each variant names the encoding layer that was malformed, so a dead-letter
/// investigation can tell a broken transport apart from a broken publisher.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The outer structured payload was not valid JSON or lacked its body field
    #[error("malformed outer payload: {0}")]
    OuterPayload(#[source] serde_json::Error),

    /// The body field did not decode to the expected envelope
    #[error("malformed body envelope: {0}")]
    BodyEnvelope(#[source] serde_json::Error),

    /// The envelope's message did not decode to a job notification
    #[error("malformed notification: {0}")]
    Notification(#[source] serde_json::Error),
}

/// Failure fetching or paginating a job's recognition result
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// The fetch call itself failed (network or service error)
    #[error("result fetch failed: {0}")]
    Fetch(String),

    /// A page after the first reported a non-success job status
    #[error("job reported status {status} on result page {page}")]
    InconsistentStatus {
        /// Status the later page carried
        status: JobStatus,
        /// 1-based index of the offending page
        page: usize,
    },

    /// The service kept returning continuation tokens past the configured ceiling
    #[error("pagination exceeded the configured ceiling of {limit} pages")]
    PageLimitExceeded {
        /// Configured maximum page count
        limit: usize,
    },

    /// The enclosing invocation's deadline fired mid-message
    #[error("processing cancelled before completion")]
    Cancelled,
}

/// Failure persisting a text artifact
#[derive(Debug, Error)]
pub enum WriteError {
    /// The store rejected or failed the put
    #[error("artifact put failed for key {key}: {message}")]
    Put {
        /// Object key the put was addressed to
        key: String,
        /// Rendered store error
        message: String,
    },

    /// I/O error from a filesystem-backed store
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
