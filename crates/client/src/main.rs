//! `fieldserve-upload` -- bulk upload CLI.
//!
//! Uploads a CSV/Excel file to the ingestion API and follows the
//! progress stream to completion, echoing the live log to stdout.
//! Can also emit the CSV template for a kind.
//!
//! # Usage
//!
//! ```text
//! fieldserve-upload <kind> <file>       upload a file
//! fieldserve-upload <kind> --template   print the CSV template
//! ```
//!
//! `<kind>` is an endpoint slug: `customer`, `amccontract`, or
//! `warranty-code`.
//!
//! # Environment variables
//!
//! | Variable                          | Default                 |
//! |-----------------------------------|-------------------------|
//! | `FIELDSERVE_BASE_URL`             | `http://localhost:5000` |
//! | `FIELDSERVE_UPLOAD_TIMEOUT_SECS`  | `600`                   |
//! | `FIELDSERVE_STREAM_RETRIES`       | `3`                     |
//! | `FIELDSERVE_RETRY_BACKOFF_MS`     | `2000`                  |

use std::path::Path;

use fieldserve_client::config::ClientConfig;
use fieldserve_client::runner::BulkUploader;
use fieldserve_core::kind::UploadKind;
use fieldserve_core::results::filter_tabs;
use fieldserve_core::session::{SessionStatus, UploadSession};
use fieldserve_core::template::template_csv;
use tokio_util::sync::CancellationToken;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn usage() -> ! {
    eprintln!("usage: fieldserve-upload <kind> <file>");
    eprintln!("       fieldserve-upload <kind> --template");
    eprintln!("kinds: customer, amccontract, warranty-code");
    std::process::exit(2);
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "fieldserve_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let (kind_slug, target) = match args.as_slice() {
        [kind, target] => (kind.as_str(), target.as_str()),
        _ => usage(),
    };

    let kind = UploadKind::from_slug(kind_slug).unwrap_or_else(|| {
        tracing::error!(slug = kind_slug, "Unknown upload kind");
        std::process::exit(2);
    });

    if target == "--template" {
        println!("{}", template_csv(kind));
        return;
    }

    let path = Path::new(target);
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_else(|| {
            tracing::error!(path = target, "Invalid file path");
            std::process::exit(2);
        })
        .to_string();

    let contents = tokio::fs::read(path).await.unwrap_or_else(|e| {
        tracing::error!(path = target, error = %e, "Failed to read file");
        std::process::exit(1);
    });

    let config = ClientConfig::from_env();
    tracing::info!(
        base_url = %config.base_url,
        kind = kind.slug(),
        file = %file_name,
        size = contents.len(),
        "Starting fieldserve-upload",
    );

    let uploader = BulkUploader::new(&config);
    let mut session = UploadSession::new(kind);

    let cancel = CancellationToken::new();
    let ctrl_c = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            ctrl_c.cancel();
        }
    });

    let result = uploader
        .upload_file(&mut session, &file_name, contents, &cancel)
        .await;

    // The live log is newest-first; print it oldest-first.
    let mut entries: Vec<_> = session.live_log.entries().collect();
    entries.reverse();
    for entry in entries {
        println!(
            "[{}] {:<7} {}",
            entry.timestamp,
            entry.severity.as_str(),
            entry.message
        );
    }

    print_outcome(&session);

    match result {
        Ok(()) if session.status() == SessionStatus::Completed => {}
        Ok(()) => {
            // Stream closed without a terminal record.
            tracing::warn!("Stream ended without completion status");
            std::process::exit(1);
        }
        Err(e) => {
            tracing::error!(error = %e, "Upload failed");
            std::process::exit(1);
        }
    }
}

fn print_outcome(session: &UploadSession) {
    let summary = session.summary;
    println!();
    println!("Status:    {}", session.status());
    if let Some(duration) = session.duration.as_deref() {
        println!("Duration:  {duration}");
    }
    println!(
        "Processed: {}/{}",
        session.processed_records, session.total_records
    );
    println!(
        "Created {}  Updated {}  Failed {}  Duplicates {}  Existing {}  Skipped {}",
        summary.created,
        summary.updated,
        summary.failed,
        summary.duplicates_in_file,
        summary.existing_records,
        summary.skipped_total,
    );

    if !session.results.is_empty() {
        let tabs = filter_tabs(session.kind(), &session.results);
        let rendered: Vec<String> = tabs
            .iter()
            .map(|t| format!("{} ({})", t.label(), t.count))
            .collect();
        println!("Results:   {}", rendered.join("  "));

        let id_field = session.kind().identifier_field();
        let name_field = session.kind().display_field();
        for row in &session.results {
            let id = row.field_str(id_field).unwrap_or("N/A");
            let name = name_field.and_then(|f| row.field_str(f)).unwrap_or("");
            let error = row.error.as_deref().unwrap_or("");
            println!("  row {:>4}  {:<8} {id}  {name}  {error}", row.row, row.status.as_str());
        }
    }

    for error in &session.errors {
        println!("Error:     {error}");
    }
    for warning in &session.warnings {
        println!("Warning:   {warning}");
    }
}
