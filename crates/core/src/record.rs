//! Wire types for the bulk-upload progress stream.
//!
//! The server streams newline-delimited JSON records while it processes
//! an uploaded spreadsheet. Every top-level field is optional: a record
//! carries whatever changed, and counters are absolute running totals,
//! never per-record increments. This module deserializes one line into a
//! typed [`ProgressRecord`].

use serde::Deserialize;
use std::collections::HashMap;

/// Stream-level processing status carried by a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StreamStatus {
    Processing,
    Completed,
    Failed,
}

impl StreamStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Processing => "processing",
            Self::Completed => "completed",
            Self::Failed => "failed",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "processing" => Some(Self::Processing),
            "completed" => Some(Self::Completed),
            "failed" => Some(Self::Failed),
            _ => None,
        }
    }
}

impl std::fmt::Display for StreamStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome status of one spreadsheet row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum RowStatus {
    Created,
    Updated,
    Failed,
    Skipped,
}

impl RowStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Created => "Created",
            Self::Updated => "Updated",
            Self::Failed => "Failed",
            Self::Skipped => "Skipped",
        }
    }
}

impl std::fmt::Display for RowStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome for one input spreadsheet row.
///
/// The domain identifier key varies by upload kind (`customercodeid`,
/// `serialnumber`, `warrantycodeid`, ...), so identifier columns are
/// captured in the flattened `fields` map and read back via
/// [`RowResult::field_str`].
#[derive(Debug, Clone, Deserialize)]
pub struct RowResult {
    /// 1-based spreadsheet line number.
    #[serde(default)]
    pub row: u64,
    pub status: RowStatus,
    #[serde(default)]
    pub action: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub warnings: Option<Vec<String>>,
    /// Entity-specific columns (identifier, display name, ...).
    #[serde(flatten)]
    pub fields: HashMap<String, serde_json::Value>,
}

impl RowResult {
    /// Read an entity-specific column as a string, if present.
    pub fn field_str(&self, key: &str) -> Option<&str> {
        self.fields.get(key).and_then(|v| v.as_str())
    }
}

/// Partial update of the cumulative summary counters.
///
/// Each present counter is the absolute running total.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryPatch {
    pub created: Option<u64>,
    pub updated: Option<u64>,
    pub failed: Option<u64>,
    pub duplicates_in_file: Option<u64>,
    pub existing_records: Option<u64>,
    pub skipped_total: Option<u64>,
}

/// Server-side batch position.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BatchProgress {
    pub current_batch: u64,
    pub total_batches: u64,
    pub batch_size: u64,
    pub current_batch_records: u64,
}

/// Per-batch counter totals attached to a `batchCompleted` signal.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BatchSummary {
    pub created: u64,
    pub updated: u64,
    pub failed: u64,
}

/// One decoded progress record from the NDJSON stream.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProgressRecord {
    /// Unrecognized status strings deserialize as `None` so one new
    /// server value cannot invalidate the rest of the record.
    #[serde(deserialize_with = "stream_status_lenient")]
    pub status: Option<StreamStatus>,
    pub total_records: Option<u64>,
    pub processed_records: Option<u64>,
    /// Human-readable elapsed time, present on the terminal record.
    pub duration: Option<String>,
    pub summary: Option<SummaryPatch>,
    /// Column-name to field-name mapping detected by the server.
    pub header_mapping: Option<HashMap<String, String>>,
    /// Full replacement of the displayed result list.
    pub results: Option<Vec<RowResult>>,
    pub errors: Option<Vec<String>>,
    pub warnings: Option<Vec<String>>,
    pub batch_progress: Option<BatchProgress>,
    /// Most recently processed rows; drives live log lines only.
    pub latest_records: Option<Vec<RowResult>>,
    pub batch_completed: Option<bool>,
    pub batch_summary: Option<BatchSummary>,
}

fn stream_status_lenient<'de, D>(deserializer: D) -> Result<Option<StreamStatus>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.as_deref().and_then(StreamStatus::from_str))
}

/// Parse one stream line into a typed record.
///
/// Returns `Err` for malformed JSON. Callers log the failure and
/// continue with the next line.
pub fn parse_record(line: &str) -> Result<ProgressRecord, serde_json::Error> {
    serde_json::from_str(line)
}
