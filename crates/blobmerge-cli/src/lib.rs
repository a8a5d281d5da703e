//! Blobmerge CLI
//!
//! Downloads two text blobs from an Azure container, joins them with a
//! newline and uploads the result as a new blob.

pub mod error;
pub mod orchestrator;

pub use error::{RunError, RunStage};
pub use orchestrator::{run_merge, MergeOutcome};

/// Initialize tracing for the CLI binary.
///
/// Events go to stderr so stdout only carries the status lines.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Render an error and its source chain, one cause per line.
pub fn error_report(err: &(dyn std::error::Error + 'static)) -> String {
    let mut report = format!("Error: {}", err);
    let mut source = err.source();
    while let Some(cause) = source {
        report.push_str(&format!("\nCaused by: {}", cause));
        source = cause.source();
    }
    report
}
