//! Merge orchestrator
//!
//! Runs the merge as a straight line: download the first source, download the
//! second, join them, upload the result. Any failure ends the run; nothing is
//! uploaded unless both downloads succeeded.

use std::io::Write;

use blobmerge_core::{MergePlan, SourcePair};
use blobmerge_storage::Storage;

use crate::error::{RunError, RunStage};

/// Result of a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeOutcome {
    pub destination: String,
    pub url: String,
    pub size_bytes: usize,
}

/// Download both sources, merge them and upload the result.
///
/// Status lines are written to `out`. The storage client is only used through
/// shared references.
pub async fn run_merge<W: Write>(
    storage: &dyn Storage,
    plan: &MergePlan,
    out: &mut W,
) -> Result<MergeOutcome, RunError> {
    tracing::debug!(
        container = %storage.container(),
        first = %plan.sources.first,
        second = %plan.sources.second,
        destination = %plan.destination,
        stage = %RunStage::Validated,
        "Starting merge run"
    );

    status(out, RunStage::Validated, "Downloading blobs...")?;
    let texts = download_sources(storage, &plan.sources).await?;
    tracing::debug!(stage = %RunStage::Downloaded, "Sources downloaded");

    status(out, RunStage::Downloaded, "Merging contents...")?;
    let merged = texts.merge();

    status(out, RunStage::Downloaded, "Uploading merged result...")?;
    let size_bytes = merged.len();
    let url = storage
        .upload(&plan.destination, merged.into_bytes())
        .await
        .map_err(|source| RunError::Upload {
            blob: plan.destination.clone(),
            source,
        })?;
    tracing::debug!(stage = %RunStage::Uploaded, url = %url, "Merged blob uploaded");

    status(
        out,
        RunStage::Uploaded,
        &format!("Uploaded merged blob: {}", plan.destination),
    )?;
    status(out, RunStage::Uploaded, "Done!")?;
    tracing::debug!(stage = %RunStage::Done, "Merge run finished");

    Ok(MergeOutcome {
        destination: plan.destination.clone(),
        url,
        size_bytes,
    })
}

/// Download `first` and then `second`; the second request is not sent if the
/// first fails.
async fn download_sources(
    storage: &dyn Storage,
    names: &SourcePair<String>,
) -> Result<SourcePair<String>, RunError> {
    let first = download_text(storage, &names.first).await?;
    let second = download_text(storage, &names.second).await?;
    Ok(SourcePair::new(first, second))
}

/// Download a blob and decode it as UTF-8. No lossy fallback.
async fn download_text(storage: &dyn Storage, blob_name: &str) -> Result<String, RunError> {
    let data = storage
        .download(blob_name)
        .await
        .map_err(|source| RunError::Download {
            blob: blob_name.to_string(),
            source,
        })?;

    String::from_utf8(data).map_err(|source| RunError::Decode {
        blob: blob_name.to_string(),
        source,
    })
}

fn status<W: Write>(out: &mut W, stage: RunStage, line: &str) -> Result<(), RunError> {
    writeln!(out, "{}", line)
        .and_then(|_| out.flush())
        .map_err(|source| RunError::Output { stage, source })
}
