//! Repository-wide settings
//!
//! The on-disk layout is fixed; only the default branch name may be chosen at
//! creation time through the `CAIRN_DEFAULT_BRANCH` environment variable.

use std::path::{Path, PathBuf};

/// Name of the metadata directory living at the repository root
pub const METADATA_DIR: &str = ".repository";

pub const DEFAULT_BRANCH: &str = "master";

pub const DEFAULT_BRANCH_ENV: &str = "CAIRN_DEFAULT_BRANCH";

/// Layout of the `createdAt` line of a checkpoint record
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.9f %z";

#[derive(Debug, Clone)]
pub struct Config {
    root: Box<Path>,
    default_branch: String,
}

impl Config {
    pub fn new(root: Box<Path>) -> Self {
        let default_branch = std::env::var(DEFAULT_BRANCH_ENV)
            .ok()
            .map(|branch| branch.trim().to_string())
            .filter(|branch| !branch.is_empty())
            .unwrap_or_else(|| DEFAULT_BRANCH.to_string());

        Config {
            root,
            default_branch,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn default_branch(&self) -> &str {
        &self.default_branch
    }

    pub fn metadata_path(&self) -> PathBuf {
        self.root.join(METADATA_DIR)
    }

    pub fn objects_path(&self) -> PathBuf {
        self.metadata_path().join("objects")
    }

    pub fn saves_path(&self) -> PathBuf {
        self.metadata_path().join("saves")
    }

    pub fn index_path(&self) -> PathBuf {
        self.metadata_path().join("index")
    }

    pub fn refs_path(&self) -> PathBuf {
        self.metadata_path().join("refs")
    }

    pub fn head_path(&self) -> PathBuf {
        self.metadata_path().join("head")
    }
}
