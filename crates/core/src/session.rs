//! Upload session state machine.
//!
//! One [`UploadSession`] owns the full lifecycle of a single file upload:
//! cumulative counters, the result list, and the live log. Status moves
//! only forward (Idle -> Processing -> Completed/Failed); the only way
//! back is [`UploadSession::reset`], which discards everything.

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use crate::kind::UploadKind;
use crate::livelog::{LiveLog, LogSeverity};
use crate::record::{BatchProgress, ProgressRecord, RowResult};
use crate::reducer::{self, ProgressDelta};

/// Lifecycle status of an upload session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    Idle,
    Processing,
    Completed,
    Failed,
}

impl SessionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Processing => "processing",
            Self::Completed => "completed",
            Self::Failed => "failed",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "idle" => Some(Self::Idle),
            "processing" => Some(Self::Processing),
            "completed" => Some(Self::Completed),
            "failed" => Some(Self::Failed),
            _ => None,
        }
    }

    /// Completed or Failed; no further record processing expected.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }
}

impl std::fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which view the widget shows for this session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActiveView {
    Upload,
    Results,
}

/// Cumulative summary counters. Monotonically non-decreasing: each
/// folded record carries absolute totals that replace these values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    pub created: u64,
    pub updated: u64,
    pub failed: u64,
    pub duplicates_in_file: u64,
    pub existing_records: u64,
    pub skipped_total: u64,
}

/// State of one file-upload lifecycle.
#[derive(Debug)]
pub struct UploadSession {
    kind: UploadKind,
    status: SessionStatus,
    active_view: ActiveView,
    started_at: Option<DateTime<Utc>>,
    ended_at: Option<DateTime<Utc>>,
    /// Server-reported elapsed time, or client-computed on failure.
    pub duration: Option<String>,
    pub total_records: u64,
    pub processed_records: u64,
    pub summary: Summary,
    pub header_mapping: HashMap<String, String>,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    /// Latest full result snapshot from the server.
    pub results: Vec<RowResult>,
    pub batch_progress: BatchProgress,
    pub live_log: LiveLog,
    last_error: Option<String>,
}

impl UploadSession {
    pub fn new(kind: UploadKind) -> Self {
        Self {
            kind,
            status: SessionStatus::Idle,
            active_view: ActiveView::Upload,
            started_at: None,
            ended_at: None,
            duration: None,
            total_records: 0,
            processed_records: 0,
            summary: Summary::default(),
            header_mapping: HashMap::new(),
            errors: Vec::new(),
            warnings: Vec::new(),
            results: Vec::new(),
            batch_progress: BatchProgress::default(),
            live_log: LiveLog::new(),
            last_error: None,
        }
    }

    pub fn kind(&self) -> UploadKind {
        self.kind
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn active_view(&self) -> ActiveView {
        self.active_view
    }

    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    pub fn ended_at(&self) -> Option<DateTime<Utc>> {
        self.ended_at
    }

    /// Error message of a failed session, if any.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Begin processing. Only valid from Idle; returns `false` (and
    /// leaves the session untouched) otherwise.
    pub fn start(&mut self) -> bool {
        if self.status != SessionStatus::Idle {
            return false;
        }
        self.status = SessionStatus::Processing;
        self.started_at = Some(Utc::now());
        true
    }

    /// Fold one decoded record into the session and log its deltas.
    ///
    /// Returns the deltas for callers that want to observe them. State
    /// after this call is a deterministic function of the prior state
    /// and the record.
    pub fn fold(&mut self, record: ProgressRecord) -> Vec<ProgressDelta> {
        let deltas = reducer::apply_record(self, record);
        for delta in &deltas {
            for (message, severity) in reducer::render_delta(self.kind, delta) {
                self.live_log.push(message, severity);
            }
        }
        deltas
    }

    /// Append a live-log line (transport and retry events).
    pub fn log(&mut self, message: impl Into<String>, severity: LogSeverity) {
        self.live_log.push(message, severity);
    }

    /// Seconds elapsed since the session started.
    pub fn elapsed_secs(&self) -> f64 {
        match self.started_at {
            Some(start) => (Utc::now() - start).num_milliseconds() as f64 / 1000.0,
            None => 0.0,
        }
    }

    /// Transition Processing -> Completed and switch to the results view.
    pub(crate) fn complete(&mut self) {
        if self.status != SessionStatus::Processing {
            return;
        }
        self.status = SessionStatus::Completed;
        self.ended_at = Some(Utc::now());
        self.active_view = ActiveView::Results;
    }

    /// Transition Processing -> Failed.
    ///
    /// If the server supplied no duration, the elapsed time from session
    /// start is recorded instead.
    pub fn fail(&mut self, message: impl Into<String>) {
        if self.status != SessionStatus::Processing {
            return;
        }
        self.status = SessionStatus::Failed;
        self.ended_at = Some(Utc::now());
        self.last_error = Some(message.into());
        if self.duration.is_none() {
            self.duration = Some(format!("{:.2}s", self.elapsed_secs()));
        }
    }

    pub(crate) fn mark_failed_by_record(&mut self) {
        self.fail(format!("{} processing failed", self.kind.label()));
    }

    /// Discard the whole session and return to Idle, ready for a new
    /// file. Valid from any state.
    pub fn reset(&mut self) {
        *self = Self::new(self.kind);
    }
}
