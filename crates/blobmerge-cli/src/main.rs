//! blobmerge: merge two Azure text blobs into one.
//!
//! Set AZURE_STORAGE_CONNECTION_STRING and AZURE_STORAGE_CONTAINER_NAME
//! (a `.env` file is also read). Takes no arguments.

use std::io;
use std::process::ExitCode;

use blobmerge_cli::{error_report, init_tracing, run_merge, RunError};
use blobmerge_core::Config;
use blobmerge_storage::create_storage;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    init_tracing();

    match execute().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::debug!(
                stage = %err.stage(),
                exit_code = err.exit_code(),
                "Merge run failed"
            );
            eprintln!("{}", error_report(&err));
            ExitCode::from(err.exit_code())
        }
    }
}

async fn execute() -> Result<(), RunError> {
    let config = Config::from_env()?;
    let storage = create_storage(&config).map_err(RunError::Setup)?;

    let mut stdout = io::stdout();
    let outcome = run_merge(storage.as_ref(), config.plan(), &mut stdout).await?;

    tracing::info!(
        destination = %outcome.destination,
        url = %outcome.url,
        size_bytes = outcome.size_bytes,
        "Merged blob written"
    );

    Ok(())
}
