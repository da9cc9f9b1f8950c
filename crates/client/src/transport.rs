//! Multipart upload transport over [`reqwest`].
//!
//! [`BulkUploadApi`] issues the single multipart POST for one upload and
//! hands back a byte-chunk source over the streamed response body. The
//! whole exchange is bounded by a per-request deadline measured from
//! request initiation; expiry aborts the in-flight request and surfaces
//! as a transport failure.

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use fieldserve_core::kind::UploadKind;

use crate::config::ClientConfig;
use crate::error::{StreamReadError, UploadError};

/// Source of raw byte chunks from an open response stream.
///
/// The runner and its tests depend on this seam instead of on reqwest:
/// a retry resumes reading from the same source, never from a new
/// request.
#[async_trait]
pub trait ChunkSource: Send {
    /// Next chunk, `None` at end of stream.
    async fn next_chunk(&mut self) -> Result<Option<Bytes>, StreamReadError>;
}

/// HTTP client for the bulk ingestion endpoints.
pub struct BulkUploadApi {
    client: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

impl BulkUploadApi {
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: config.base_url.clone(),
            timeout: Duration::from_secs(config.upload_timeout_secs),
        }
    }

    /// Create an API client reusing an existing [`reqwest::Client`]
    /// (useful for connection pooling across widgets).
    pub fn with_client(client: reqwest::Client, config: &ClientConfig) -> Self {
        Self {
            client,
            base_url: config.base_url.clone(),
            timeout: Duration::from_secs(config.upload_timeout_secs),
        }
    }

    /// Ingestion endpoint for an upload kind.
    pub fn upload_url(&self, kind: UploadKind) -> String {
        format!("{}/bulk/{}/bulk-upload", self.base_url, kind.slug())
    }

    /// Upload a file and open the progress stream.
    ///
    /// Sends `POST /bulk/{slug}/bulk-upload` with one multipart part
    /// named `file`. Exactly one upload per invocation. A non-success
    /// status fails immediately without entering the decode loop.
    pub async fn upload(
        &self,
        kind: UploadKind,
        file_name: &str,
        contents: Vec<u8>,
    ) -> Result<ResponseChunkSource, UploadError> {
        let part = reqwest::multipart::Part::bytes(contents).file_name(file_name.to_string());
        let form = reqwest::multipart::Form::new().part("file", part);

        let response = self
            .client
            .post(self.upload_url(kind))
            .multipart(form)
            .timeout(self.timeout)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(UploadError::Http {
                status: status.as_u16(),
            });
        }

        tracing::debug!(kind = kind.slug(), status = status.as_u16(), "Upload accepted, streaming progress");
        Ok(ResponseChunkSource { response })
    }
}

/// [`ChunkSource`] over a streamed reqwest response body.
pub struct ResponseChunkSource {
    response: reqwest::Response,
}

#[async_trait]
impl ChunkSource for ResponseChunkSource {
    async fn next_chunk(&mut self) -> Result<Option<Bytes>, StreamReadError> {
        self.response
            .chunk()
            .await
            .map_err(|e| StreamReadError(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upload_url_per_kind() {
        let config = ClientConfig {
            base_url: "http://api.example.com".into(),
            ..Default::default()
        };
        let api = BulkUploadApi::new(&config);

        assert_eq!(
            api.upload_url(UploadKind::Customer),
            "http://api.example.com/bulk/customer/bulk-upload"
        );
        assert_eq!(
            api.upload_url(UploadKind::WarrantyCode),
            "http://api.example.com/bulk/warranty-code/bulk-upload"
        );
    }
}
