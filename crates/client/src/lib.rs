//! Streaming client for the fieldserve bulk-upload protocol.
//!
//! Uploads a spreadsheet as multipart form data, consumes the server's
//! newline-delimited JSON progress stream, and folds each record into an
//! [`fieldserve_core::session::UploadSession`]. Provides the transport,
//! the partial-line-tolerant frame decoder, the bounded retry policy for
//! stream reads, and the one-call upload runner.

pub mod config;
pub mod decoder;
pub mod error;
pub mod retry;
pub mod runner;
pub mod transport;
