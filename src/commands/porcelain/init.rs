use crate::areas::index::Index;
use crate::areas::refs::{Head, RefMap, Refs};
use crate::areas::repository::Repository;
use crate::artifacts::branch::ref_name::RefName;
use crate::config::Config;
use crate::errors::{RepositoryError, Result};
use anyhow::Context;
use std::path::Path;

impl Repository {
    /// Lay out a fresh metadata directory under `root` and open it
    ///
    /// The default branch starts without saves and head is attached to it.
    pub fn create(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref();
        std::fs::create_dir_all(root)
            .with_context(|| format!("Failed to create directory {:?}", root))?;

        let config = Config::new(root.canonicalize()?.into_boxed_path());
        let metadata_path = config.metadata_path();
        if metadata_path.exists() {
            return Err(RepositoryError::AlreadyInitialized(metadata_path));
        }

        let default_branch = RefName::try_parse(config.default_branch())?;

        for dir in [config.objects_path(), config.saves_path()] {
            std::fs::create_dir_all(&dir)
                .with_context(|| format!("Failed to create directory {:?}", dir))?;
        }

        let refs = Refs::new(
            config.refs_path().into_boxed_path(),
            config.head_path().into_boxed_path(),
        );
        refs.write_refs(&RefMap::from([(default_branch.clone(), None)]))?;
        refs.write_head(&Head::Attached(default_branch))?;
        Index::new(config.index_path().into_boxed_path()).write_updates()?;

        log::info!("initialized empty repository in {:?}", metadata_path);

        Self::open(config.root())
    }
}
