use crate::areas::repository::Repository;
use crate::artifacts::changes::change::Change;
use crate::errors::{RepositoryError, Result};
use std::path::Path;

impl Repository {
    /// Stage the current content of a file, or of every file under a directory
    ///
    /// Staging content identical to the saved one drops the path from the
    /// index instead. Staging unchanged content twice is a no-op.
    pub fn index_file(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let relative = self.resolve_path(path)?;

        if self.workspace().is_dir(&relative) {
            for file in self.workspace().list_files_under(&relative)? {
                self.index_single_file(&file)?;
            }
            return Ok(());
        }

        if !self.workspace().is_file(&relative) {
            return Err(RepositoryError::PathNotFound(path.to_path_buf()));
        }

        self.index_single_file(&relative)
    }

    fn index_single_file(&mut self, relative: &Path) -> Result<()> {
        Self::ensure_storable(relative)?;

        let data = self.workspace().read_file(relative)?;
        let object_id = self.database().store(&data)?;
        let saved_id = self
            .state
            .tree
            .find_file(relative)
            .map(|file| file.oid.clone());

        if saved_id.as_ref() == Some(&object_id) {
            if let Some(previous) = self.state.index.remove(relative) {
                log::debug!("{:?} is back to its saved content", relative);
                self.release(&previous)?;
            }
            return Ok(());
        }

        let change = match saved_id {
            Some(_) => Change::modification(relative, object_id),
            None => Change::creation(relative, object_id),
        };
        if self.state.index.entry_by_path(relative) == Some(&change) {
            return Ok(());
        }

        log::debug!("staging {:?} as {}", relative, change.tag().as_str());
        if let Some(previous) = self.state.index.add(change) {
            self.release(&previous)?;
        }

        Ok(())
    }

    /// Write the index back to disk
    pub fn save_index(&mut self) -> Result<()> {
        if self.state.index.is_changed() {
            self.state.index.write_updates()?;
        }

        Ok(())
    }
}
