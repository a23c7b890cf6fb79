//! Queued Search Main Entry Point
//!
//! Runs a single pass over the search queue: drain, reconcile, apply.
//! Schedule it externally (cron, a timer unit) to process the queue periodically.

use dotenv::dotenv;
use queued_search::{Dependencies, QueuedSearchError};
use std::env;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize tracing/logging.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("queued_search=info,queued_search_repository=info"));

    let json = env::var("LOG_FORMAT")
        .map(|format| format.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(true)
                    .with_thread_ids(true),
            )
            .init();

        info!(
            service_name = "queued-search",
            service_version = env!("CARGO_PKG_VERSION"),
            "Tracing initialized with JSON format"
        );
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_target(true).pretty())
            .init();

        info!(
            service_name = "queued-search",
            service_version = env!("CARGO_PKG_VERSION"),
            "Tracing initialized with console output"
        );
    }
}

#[tokio::main]
async fn main() -> Result<(), QueuedSearchError> {
    dotenv().ok();

    init_tracing();

    info!("Starting queued search processor");

    let mut deps = match Dependencies::new().await {
        Ok(deps) => {
            info!("Dependencies initialized successfully");
            deps
        }
        Err(e) => {
            error!(error = %e, "Failed to initialize dependencies");
            return Err(e);
        }
    };

    match deps.processor.run().await {
        Ok(report) => {
            info!(
                run_id = %report.run_id,
                drained = report.drained,
                malformed = report.malformed,
                updated = report.updated,
                deleted = report.deleted,
                skipped = report.skipped,
                elapsed_ms = (report.finished_at - report.started_at).num_milliseconds(),
                "Queue processed successfully"
            );
            Ok(())
        }
        Err(e) => {
            error!(error = %e, requeued = %e.requeued(), "Queue processing failed");
            Err(e.into())
        }
    }
}
