//! Run errors
//!
//! Every way a merge run can fail, each mapped to its own process exit code.

use std::fmt::{Display, Formatter, Result as FmtResult};
use std::string::FromUtf8Error;

use blobmerge_core::ConfigError;
use blobmerge_storage::StorageError;

/// Stages of a run, in the order they are reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum RunStage {
    Start,
    Validated,
    Downloaded,
    Uploaded,
    Done,
}

impl Display for RunStage {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            RunStage::Start => write!(f, "start"),
            RunStage::Validated => write!(f, "validated"),
            RunStage::Downloaded => write!(f, "downloaded"),
            RunStage::Uploaded => write!(f, "uploaded"),
            RunStage::Done => write!(f, "done"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RunError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Failed to set up storage client")]
    Setup(#[source] StorageError),

    #[error("Failed to download blob {blob}")]
    Download {
        blob: String,
        #[source]
        source: StorageError,
    },

    #[error("Blob {blob} is not valid UTF-8")]
    Decode {
        blob: String,
        #[source]
        source: FromUtf8Error,
    },

    #[error("Failed to upload blob {blob}")]
    Upload {
        blob: String,
        #[source]
        source: StorageError,
    },

    #[error("Failed to write status output")]
    Output {
        stage: RunStage,
        #[source]
        source: std::io::Error,
    },
}

impl RunError {
    /// Process exit status for this failure.
    pub fn exit_code(&self) -> u8 {
        match self {
            RunError::Output { .. } => 1,
            RunError::Config(_) | RunError::Setup(_) => 2,
            RunError::Download { .. } => 3,
            RunError::Decode { .. } => 4,
            RunError::Upload { .. } => 5,
        }
    }

    /// The last stage the run completed before failing.
    pub fn stage(&self) -> RunStage {
        match self {
            RunError::Config(_) => RunStage::Start,
            RunError::Setup(_) | RunError::Download { .. } | RunError::Decode { .. } => {
                RunStage::Validated
            }
            RunError::Upload { .. } => RunStage::Downloaded,
            RunError::Output { stage, .. } => *stage,
        }
    }
}
