//! Repository error types
//!
//! Errors come in two classes:
//!
//! - Validation errors: expected, user-correctable conditions (detached head,
//!   empty index, unknown revision, ...). They carry a readable message and
//!   never abort the process.
//! - Fatal errors: I/O failures and corrupt on-disk records, carried as
//!   [`anyhow::Error`] with context attached by the area that failed.

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, RepositoryError>;

#[derive(Error, Debug)]
pub enum RepositoryError {
    #[error("not a repository (missing {0})")]
    NotARepository(PathBuf),

    #[error("a repository already exists at {0}")]
    AlreadyInitialized(PathBuf),

    #[error("cannot {action} in detached head mode, create a ref first")]
    DetachedHead { action: &'static str },

    #[error("nothing to save, the index is empty")]
    EmptyIndex,

    #[error("the index has unresolved conflicts: {}", .0.join(", "))]
    UnresolvedConflicts(Vec<String>),

    #[error("invalid save message: {0}")]
    InvalidMessage(String),

    #[error("unknown revision: {0}")]
    UnknownRevision(String),

    #[error("ambiguous revision {prefix}, candidates: {}", .candidates.join(", "))]
    AmbiguousRevision {
        prefix: String,
        candidates: Vec<String>,
    },

    #[error("cannot create a ref before the first save")]
    NoSaveHistory,

    #[error("ref {0} already points to another checkpoint")]
    RefCollision(String),

    #[error("invalid ref name: {0}")]
    InvalidRefName(String),

    #[error("path {0} is outside of the repository")]
    PathEscapesRoot(PathBuf),

    #[error("path {0} belongs to the repository metadata")]
    MetadataPath(PathBuf),

    #[error("path {0:?} cannot be tracked, names must be valid UTF-8 on a single line")]
    InvalidPath(PathBuf),

    #[error("path {0} did not match any file")]
    PathNotFound(PathBuf),

    #[error("the working directory has uncommitted changes, save or restore them first")]
    UncommittedChanges,

    #[error(transparent)]
    Fatal(#[from] anyhow::Error),
}

impl RepositoryError {
    pub fn is_validation(&self) -> bool {
        !matches!(self, RepositoryError::Fatal(_))
    }
}

impl From<std::io::Error> for RepositoryError {
    fn from(error: std::io::Error) -> Self {
        RepositoryError::Fatal(error.into())
    }
}
