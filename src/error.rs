use std::fmt::Display;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Failures surfaced by [`TagFile`](crate::TagFile).
///
/// Only `open` and `save` can fail; every other operation on an open file
/// is infallible.
#[derive(Debug, Error)]
pub enum Error {
    /// The path is missing, not a regular file, unreadable, or not a format
    /// the tagging library recognizes.
    #[error("invalid file {}: {reason}", .path.display())]
    InvalidFile { path: PathBuf, reason: String },

    /// Writing the tag back to disk failed.
    #[error("cannot save file {}: {reason}", .path.display())]
    SaveFailed { path: PathBuf, reason: String },
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub(crate) fn invalid_file(path: &Path, reason: impl Display) -> Self {
        Error::InvalidFile {
            path: path.to_path_buf(),
            reason: reason.to_string(),
        }
    }

    pub(crate) fn save_failed(path: &Path, reason: impl Display) -> Self {
        Error::SaveFailed {
            path: path.to_path_buf(),
            reason: reason.to_string(),
        }
    }

    /// Path of the file the failed operation was acting on.
    pub fn path(&self) -> &Path {
        match self {
            Error::InvalidFile { path, .. } | Error::SaveFailed { path, .. } => path,
        }
    }
}
