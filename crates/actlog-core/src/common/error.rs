//! Error types for the activity log pipeline.
//!
//! This module defines the central `Error` enum shared by the generation and
//! persistence stages. The pipeline does not recover from any of these: the
//! first error returned by a stage aborts the whole run.
//!
//! ## Error Cases
//! - `FileOpen`: A per-user output file could not be opened or created.
//! - `FileWrite`: The activity report could not be written to an open file.
//! - `InvalidConfig`: Startup configuration was rejected.
//! - `StageJoin`: A worker or saver task panicked or was torn down by the
//!   runtime before reporting.

use std::{io, path::PathBuf};

pub type Result<T> = core::result::Result<T, Error>;

/// Unified error type for the activity log pipeline.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Opening (or creating) the output file for a user failed.
    #[error("Failed to open {}", path.display())]
    FileOpen {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Writing the activity report into an opened file failed.
    #[error("Failed to write {}", path.display())]
    FileWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A configuration value was out of range or malformed.
    #[error("Invalid config: {reason}")]
    InvalidConfig { reason: String },

    /// A stage task could not be joined.
    #[error("{stage} task failed: {context}")]
    StageJoin {
        stage: &'static str,
        context: String,
    },
}

impl Error {
    /// Returns the output path involved in an I/O failure, if any.
    pub fn path(&self) -> Option<&std::path::Path> {
        match self {
            Self::FileOpen { path, .. } | Self::FileWrite { path, .. } => Some(path),
            Self::InvalidConfig { .. } | Self::StageJoin { .. } => None,
        }
    }
}
