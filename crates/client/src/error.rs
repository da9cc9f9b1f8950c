//! Client error taxonomy.

use fieldserve_core::validate::FileValidationError;

/// A stream read failure (one attempt). Retried up to the policy bound.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{0}")]
pub struct StreamReadError(pub String);

/// Errors that terminate an upload session.
///
/// Record-level JSON parse failures are deliberately absent: they are
/// logged and skipped inside the decode loop, never propagated.
#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    /// Pre-upload validation failed; no network call was made.
    #[error(transparent)]
    InvalidFile(#[from] FileValidationError),

    /// The session was not Idle when the upload started.
    #[error("an upload is already in progress for this session")]
    SessionBusy,

    /// The server answered with a non-success status code.
    #[error("HTTP error! status: {status}")]
    Http { status: u16 },

    /// The HTTP exchange itself failed (connect, TLS, deadline expiry).
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Reading the response stream kept failing until the retry budget
    /// ran out.
    #[error("stream read failed after {attempts} attempts: {message}")]
    StreamExhausted { attempts: u32, message: String },

    /// The upload was cancelled via its cancellation token.
    #[error("upload cancelled")]
    Cancelled,
}
