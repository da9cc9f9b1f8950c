//! The upload read loop.
//!
//! Drives one session from upload to terminal state: decode chunks into
//! records, fold each record into the session (which logs the deltas),
//! retry stream reads per the policy, and honor cancellation between
//! suspension points. Records are folded strictly in arrival order;
//! later records win for any field they redefine.

use fieldserve_core::livelog::LogSeverity;
use fieldserve_core::session::UploadSession;
use fieldserve_core::validate::validate_upload_file;
use tokio_util::sync::CancellationToken;

use crate::config::ClientConfig;
use crate::decoder::{DecodedFrame, FrameDecoder};
use crate::error::UploadError;
use crate::retry::RetryPolicy;
use crate::transport::{BulkUploadApi, ChunkSource};

/// Read the progress stream to completion, folding records into the
/// session.
///
/// On a read error the loop resumes from the same source after the
/// policy backoff, up to the attempt bound; JSON parse errors are
/// logged and skipped, never retried. Returns once the stream closes
/// or a fatal condition is reached.
pub async fn read_progress_stream(
    source: &mut dyn ChunkSource,
    session: &mut UploadSession,
    policy: &RetryPolicy,
    cancel: &CancellationToken,
) -> Result<(), UploadError> {
    let mut decoder = FrameDecoder::new();
    let mut attempts = 0u32;

    loop {
        let chunk = tokio::select! {
            _ = cancel.cancelled() => return Err(UploadError::Cancelled),
            chunk = source.next_chunk() => chunk,
        };

        match chunk {
            Ok(Some(bytes)) => {
                for frame in decoder.push_chunk(&bytes) {
                    match frame {
                        DecodedFrame::Record(record) => {
                            session.fold(record);
                        }
                        DecodedFrame::Malformed { line, error } => {
                            tracing::warn!(
                                error = %error,
                                raw_line = %line,
                                "Failed to parse progress record",
                            );
                            session.log(
                                format!("Error processing data chunk: {error}"),
                                LogSeverity::Error,
                            );
                        }
                    }
                }
            }
            Ok(None) => {
                // Stream closed; best-effort parse of a trailing partial.
                if let Some(record) = decoder.finish() {
                    session.fold(record);
                }
                return Ok(());
            }
            Err(e) => {
                attempts += 1;
                if attempts >= policy.max_attempts {
                    return Err(UploadError::StreamExhausted {
                        attempts,
                        message: e.to_string(),
                    });
                }

                let delay = policy.backoff_delay(attempts);
                tracing::warn!(
                    attempt = attempts,
                    max_attempts = policy.max_attempts,
                    delay_ms = delay.as_millis() as u64,
                    error = %e,
                    "Stream read error, retrying",
                );
                session.log(
                    format!(
                        "Stream error (retry {attempts}/{}): {e}",
                        policy.max_attempts
                    ),
                    LogSeverity::Warning,
                );

                tokio::select! {
                    _ = cancel.cancelled() => return Err(UploadError::Cancelled),
                    _ = tokio::time::sleep(delay) => {}
                }
            }
        }
    }
}

/// One-call bulk upload driver.
pub struct BulkUploader {
    api: BulkUploadApi,
    policy: RetryPolicy,
}

impl BulkUploader {
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            api: BulkUploadApi::new(config),
            policy: RetryPolicy::from_config(config),
        }
    }

    pub fn with_api(api: BulkUploadApi, policy: RetryPolicy) -> Self {
        Self { api, policy }
    }

    /// Validate, upload, and stream one file into the session.
    ///
    /// The session ends Completed or Failed (or stays Processing if the
    /// server closed the stream without a terminal record). Validation
    /// failures leave the session Idle and make no network call.
    pub async fn upload_file(
        &self,
        session: &mut UploadSession,
        file_name: &str,
        contents: Vec<u8>,
        cancel: &CancellationToken,
    ) -> Result<(), UploadError> {
        validate_upload_file(file_name, contents.len() as u64)?;

        if !session.start() {
            return Err(UploadError::SessionBusy);
        }
        let label = session.kind().label();
        session.log(
            format!("Starting {label} batch upload..."),
            LogSeverity::Info,
        );

        let mut source = match self.api.upload(session.kind(), file_name, contents).await {
            Ok(source) => source,
            Err(e) => {
                session.log(format!("Upload failed: {e}"), LogSeverity::Error);
                session.fail(e.to_string());
                return Err(e);
            }
        };

        session.log(
            format!("File uploaded successfully. Processing {label} records in batches..."),
            LogSeverity::Success,
        );

        match read_progress_stream(&mut source, session, &self.policy, cancel).await {
            Ok(()) => Ok(()),
            Err(e) => {
                session.log(format!("Upload failed: {e}"), LogSeverity::Error);
                session.fail(e.to_string());
                Err(e)
            }
        }
    }
}
