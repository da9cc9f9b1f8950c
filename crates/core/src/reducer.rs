//! Folds decoded progress records into the session state.
//!
//! Each record carries an arbitrary subset of fields holding *absolute*
//! cumulative values. The fold adopts the absolute values (latest record
//! wins for any field it redefines) and computes per-counter deltas
//! against the previous state; only positive deltas produce live-log
//! output. `results` is a full-replacement snapshot, never an append.

use crate::kind::{RowLogStyle, UploadKind};
use crate::livelog::LogSeverity;
use crate::record::{ProgressRecord, RowResult, RowStatus, StreamStatus};
use crate::session::{Summary, UploadSession};

/// A detected change while folding one record, in emission order.
#[derive(Debug, Clone)]
pub enum ProgressDelta {
    /// The server moved on to a new batch.
    BatchStarted {
        current: u64,
        total: u64,
        batch_size: u64,
    },
    /// More rows were processed since the previous record.
    Processed {
        newly: u64,
        processed: u64,
        total: u64,
        /// (current, total) when the upload is batch-oriented.
        batch: Option<(u64, u64)>,
    },
    /// Individually reported rows (log-only, not folded into results).
    RowsReported(Vec<RowResult>),
    Created { newly: u64, total: u64 },
    Updated { newly: u64, total: u64 },
    DuplicatesInFile { newly: u64, total: u64 },
    ExistingRecords { newly: u64, total: u64 },
    FailedRows { newly: u64, total: u64 },
    /// Per-batch completion signal with its batch-local totals.
    BatchCompleted {
        batch: u64,
        created: u64,
        updated: u64,
        failed: u64,
    },
    /// Terminal success, with the final merged summary.
    Completed {
        duration: String,
        total_batches: u64,
        summary: Summary,
    },
    /// Terminal failure reported by the server.
    Failed,
}

/// Merge one record into the session and return the detected deltas.
///
/// State after this call depends only on the prior state and the record.
/// Counters adopt the record's absolute values; deltas are computed as
/// `new - previous` and reported only when positive, so a repeated or
/// stale value never produces log spam.
pub fn apply_record(session: &mut UploadSession, record: ProgressRecord) -> Vec<ProgressDelta> {
    let prev_processed = session.processed_records;
    let prev_summary = session.summary;
    let prev_batch = session.batch_progress.current_batch;

    // ---- merge (absolute values win where present) ----

    if let Some(total) = record.total_records {
        session.total_records = total;
    }
    if let Some(processed) = record.processed_records {
        session.processed_records = processed;
    }
    if let Some(duration) = record.duration.clone() {
        session.duration = Some(duration);
    }
    if let Some(patch) = record.summary {
        let s = &mut session.summary;
        if let Some(v) = patch.created {
            s.created = v;
        }
        if let Some(v) = patch.updated {
            s.updated = v;
        }
        if let Some(v) = patch.failed {
            s.failed = v;
        }
        if let Some(v) = patch.duplicates_in_file {
            s.duplicates_in_file = v;
        }
        if let Some(v) = patch.existing_records {
            s.existing_records = v;
        }
        if let Some(v) = patch.skipped_total {
            s.skipped_total = v;
        }
    }
    if let Some(mapping) = record.header_mapping {
        session.header_mapping = mapping;
    }
    if let Some(errors) = record.errors {
        session.errors = errors;
    }
    if let Some(warnings) = record.warnings {
        session.warnings = warnings;
    }
    if let Some(mut bp) = record.batch_progress {
        // totalBatches is fixed once known.
        if session.batch_progress.total_batches > 0 {
            bp.total_batches = session.batch_progress.total_batches;
        }
        session.batch_progress = bp;
    }
    if let Some(results) = record.results {
        // Wholesale replacement: the server's latest list is authoritative.
        session.results = results;
    }

    // ---- deltas against the pre-merge state ----

    let mut deltas = Vec::new();
    let bp = session.batch_progress;

    if bp.current_batch > prev_batch {
        deltas.push(ProgressDelta::BatchStarted {
            current: bp.current_batch,
            total: bp.total_batches,
            batch_size: bp.batch_size,
        });
    }

    if session.processed_records > prev_processed {
        deltas.push(ProgressDelta::Processed {
            newly: session.processed_records - prev_processed,
            processed: session.processed_records,
            total: session.total_records,
            batch: (bp.current_batch > 0).then_some((bp.current_batch, bp.total_batches)),
        });
    }

    if let Some(rows) = record.latest_records {
        if !rows.is_empty() {
            deltas.push(ProgressDelta::RowsReported(rows));
        }
    }

    let s = session.summary;
    if s.created > prev_summary.created {
        deltas.push(ProgressDelta::Created {
            newly: s.created - prev_summary.created,
            total: s.created,
        });
    }
    if s.updated > prev_summary.updated {
        deltas.push(ProgressDelta::Updated {
            newly: s.updated - prev_summary.updated,
            total: s.updated,
        });
    }
    if s.duplicates_in_file > prev_summary.duplicates_in_file {
        deltas.push(ProgressDelta::DuplicatesInFile {
            newly: s.duplicates_in_file - prev_summary.duplicates_in_file,
            total: s.duplicates_in_file,
        });
    }
    if s.existing_records > prev_summary.existing_records {
        deltas.push(ProgressDelta::ExistingRecords {
            newly: s.existing_records - prev_summary.existing_records,
            total: s.existing_records,
        });
    }
    if s.failed > prev_summary.failed {
        deltas.push(ProgressDelta::FailedRows {
            newly: s.failed - prev_summary.failed,
            total: s.failed,
        });
    }

    if record.batch_completed == Some(true) {
        let bs = record.batch_summary.unwrap_or_default();
        deltas.push(ProgressDelta::BatchCompleted {
            batch: bp.current_batch,
            created: bs.created,
            updated: bs.updated,
            failed: bs.failed,
        });
    }

    match record.status {
        Some(StreamStatus::Completed) => {
            deltas.push(ProgressDelta::Completed {
                duration: session.duration.clone().unwrap_or_default(),
                total_batches: bp.total_batches,
                summary: session.summary,
            });
            session.complete();
        }
        Some(StreamStatus::Failed) => {
            deltas.push(ProgressDelta::Failed);
            session.mark_failed_by_record();
        }
        Some(StreamStatus::Processing) | None => {}
    }

    deltas
}

/// Render a delta into live-log lines for the given upload kind.
///
/// Most deltas produce one line; row reports produce zero or more
/// depending on the kind's row-log style.
pub fn render_delta(kind: UploadKind, delta: &ProgressDelta) -> Vec<(String, LogSeverity)> {
    let label = kind.label();
    match delta {
        ProgressDelta::BatchStarted {
            current,
            total,
            batch_size,
        } => vec![(
            format!("Starting batch {current}/{total} ({batch_size} records)"),
            LogSeverity::Info,
        )],

        ProgressDelta::Processed {
            newly,
            processed,
            total,
            batch,
        } => {
            let batch_info = match batch {
                Some((current, total_batches)) => format!(" [Batch {current}/{total_batches}]"),
                None => String::new(),
            };
            vec![(
                format!("Processed {newly} {label} record(s) ({processed}/{total}){batch_info}"),
                LogSeverity::Success,
            )]
        }

        ProgressDelta::RowsReported(rows) => render_rows(kind, rows),

        ProgressDelta::Created { newly, total } => vec![(
            format!("Created {newly} new {label} records (Total: {total})"),
            LogSeverity::Success,
        )],

        ProgressDelta::Updated { newly, total } => vec![(
            format!("Updated {newly} existing {label} records (Total: {total})"),
            LogSeverity::Info,
        )],

        ProgressDelta::DuplicatesInFile { newly, total } => vec![(
            format!("Found {newly} file duplicates (Total: {total})"),
            LogSeverity::Warning,
        )],

        ProgressDelta::ExistingRecords { newly, total } => vec![(
            format!("Processing {newly} existing records (Total: {total})"),
            LogSeverity::Info,
        )],

        ProgressDelta::FailedRows { newly, total } => vec![(
            format!("{newly} records failed validation (Total: {total})"),
            LogSeverity::Error,
        )],

        ProgressDelta::BatchCompleted {
            batch,
            created,
            updated,
            failed,
        } => vec![(
            format!("Batch {batch} completed: {created} created, {updated} updated, {failed} failed"),
            LogSeverity::Info,
        )],

        ProgressDelta::Completed {
            duration,
            total_batches,
            summary,
        } => {
            let message = if kind.batch_oriented() {
                format!(
                    "{label} batch upload completed in {duration}! Total Batches: {total_batches}, \
                     Created: {}, Updated: {}, Skipped: {}, Failed: {}",
                    summary.created, summary.updated, summary.skipped_total, summary.failed
                )
            } else {
                format!(
                    "{label} bulk upload completed in {duration}! \
                     Created: {}, Updated: {}, Skipped: {}, Failed: {}",
                    summary.created, summary.updated, summary.skipped_total, summary.failed
                )
            };
            vec![(message, LogSeverity::Success)]
        }

        ProgressDelta::Failed => vec![(
            format!("{label} processing failed!"),
            LogSeverity::Error,
        )],
    }
}

fn render_rows(kind: UploadKind, rows: &[RowResult]) -> Vec<(String, LogSeverity)> {
    match kind.row_log_style() {
        RowLogStyle::FailedOnly => rows
            .iter()
            .filter(|r| r.status == RowStatus::Failed)
            .map(|r| {
                let id = r.field_str(kind.identifier_field()).unwrap_or("N/A");
                let name = kind
                    .display_field()
                    .and_then(|f| r.field_str(f))
                    .unwrap_or("N/A");
                let error = r.error.as_deref().unwrap_or("N/A");
                (
                    format!("Failed: {id} ({name}) - {error}"),
                    LogSeverity::Error,
                )
            })
            .collect(),

        RowLogStyle::LastRecord => rows
            .last()
            .map(|r| {
                let id = r.field_str(kind.identifier_field()).unwrap_or("N/A");
                let name = kind
                    .display_field()
                    .and_then(|f| r.field_str(f))
                    .unwrap_or("N/A");
                let severity = match r.status {
                    RowStatus::Created => LogSeverity::Success,
                    RowStatus::Updated => LogSeverity::Info,
                    RowStatus::Failed => LogSeverity::Error,
                    RowStatus::Skipped => LogSeverity::Info,
                };
                vec![(format!("{}: {id} ({name})", r.status), severity)]
            })
            .unwrap_or_default(),

        RowLogStyle::None => Vec::new(),
    }
}
