use crate::areas::repository::Repository;
use crate::artifacts::changes::change::Change;
use crate::errors::{RepositoryError, Result};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

impl Repository {
    /// Delete a file, or every tracked file under a directory, and stage the
    /// removal of whatever was saved
    ///
    /// Files that were only staged leave no trace in the index. Removing an
    /// already removed path is a no-op.
    pub fn remove_file(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let relative = self.resolve_path(path)?;

        let mut targets = self
            .state
            .tree
            .files_under(&relative)
            .into_iter()
            .map(|file| file.path.clone())
            .collect::<BTreeSet<PathBuf>>();
        targets.extend(self.state.index.entries_under_path(&relative));

        if targets.is_empty() {
            // untracked files simply go away
            if self.workspace().is_file(&relative) {
                self.workspace().remove_file(&relative)?;
                return Ok(());
            }
            return Err(RepositoryError::PathNotFound(path.to_path_buf()));
        }

        for target in targets {
            self.remove_tracked_file(&target)?;
        }

        Ok(())
    }

    fn remove_tracked_file(&mut self, relative: &Path) -> Result<()> {
        self.workspace().remove_file(relative)?;

        if self
            .state
            .index
            .entry_by_path(relative)
            .is_some_and(Change::is_removal)
        {
            return Ok(());
        }

        if let Some(previous) = self.state.index.remove(relative) {
            self.release(&previous)?;
        }

        if self.state.tree.find_file(relative).is_some() {
            log::debug!("staging removal of {:?}", relative);
            self.state.index.add(Change::removal(relative));
        }

        Ok(())
    }
}
