//! Client configuration loaded from environment variables.

/// Connection and retry settings for the bulk-upload client.
///
/// All fields have defaults suitable for local development; override via
/// environment variables in production.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Ingestion API base URL, no trailing slash.
    pub base_url: String,
    /// Whole-exchange deadline for one upload, in seconds. Measured from
    /// request initiation, not from the start of streaming.
    pub upload_timeout_secs: u64,
    /// Maximum stream-read attempts before the session fails.
    pub max_stream_retries: u32,
    /// Backoff unit between retries; attempt `n` waits `n` units.
    pub retry_backoff_ms: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".into(),
            upload_timeout_secs: 600,
            max_stream_retries: 3,
            retry_backoff_ms: 2000,
        }
    }
}

impl ClientConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                     | Default                 |
    /// |-----------------------------|-------------------------|
    /// | `FIELDSERVE_BASE_URL`       | `http://localhost:5000` |
    /// | `FIELDSERVE_UPLOAD_TIMEOUT_SECS` | `600`              |
    /// | `FIELDSERVE_STREAM_RETRIES` | `3`                     |
    /// | `FIELDSERVE_RETRY_BACKOFF_MS` | `2000`                |
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let base_url = std::env::var("FIELDSERVE_BASE_URL")
            .unwrap_or(defaults.base_url)
            .trim_end_matches('/')
            .to_string();

        let upload_timeout_secs = std::env::var("FIELDSERVE_UPLOAD_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.upload_timeout_secs);

        let max_stream_retries = std::env::var("FIELDSERVE_STREAM_RETRIES")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.max_stream_retries);

        let retry_backoff_ms = std::env::var("FIELDSERVE_RETRY_BACKOFF_MS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.retry_backoff_ms);

        Self {
            base_url,
            upload_timeout_secs,
            max_stream_retries,
            retry_backoff_ms,
        }
    }
}
