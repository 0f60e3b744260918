//! A small single-user version control system
//!
//! Files are snapshotted into checkpoints stored under a `.repository`
//! metadata directory at the root of the working directory. Content lives in
//! a gzip-compressed, SHA-256 addressed object store; checkpoints record the
//! changes staged since their parent.

pub mod areas;
pub mod artifacts;
pub mod commands;
pub mod config;
pub mod errors;

use crate::areas::repository::Repository;
use std::path::Path;

pub fn create_repository(root: impl AsRef<Path>) -> errors::Result<Repository> {
    Repository::create(root)
}

pub fn open_repository(root: impl AsRef<Path>) -> errors::Result<Repository> {
    Repository::open(root)
}
