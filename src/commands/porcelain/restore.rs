use crate::areas::repository::Repository;
use crate::artifacts::branch::ref_name::HEAD_REF_NAME;
use crate::artifacts::tree::snapshot::Tree;
use crate::errors::{RepositoryError, Result};
use std::path::Path;

impl Repository {
    /// Bring a file or directory back to the content it has in a revision
    ///
    /// `HEAD` restores the saved content overlaid with the staged changes and
    /// unstages what it restored. Any other revision restores that
    /// checkpoint's content and unstages only the entries under `path`. Head
    /// never moves. Whatever lived under `path` before is lost.
    pub fn restore(&mut self, revision: &str, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let relative = self.resolve_path(path)?;

        let snapshot = if revision.trim() == HEAD_REF_NAME {
            let mut merged = self.state.tree.clone();
            merged.replay(self.state.index.entries());
            merged
        } else {
            let revision = self.resolve_revision(revision)?;
            let save = self.saves().read_save(revision.id())?;
            Tree::from_save(self.path(), &save)
        };

        // untracked content was never stored and is left alone
        let node = snapshot.find_node(&relative);
        let tracked = node.is_some()
            || self.state.tree.find_node(&relative).is_some()
            || !self.state.index.entries_under_path(&relative).is_empty();
        if !tracked {
            return Err(RepositoryError::PathNotFound(path.to_path_buf()));
        }

        self.workspace().restore(&relative, node, self.database())?;

        for change in self.state.index.remove_under_path(&relative) {
            self.release(&change)?;
        }
        self.persist()?;

        log::info!("restored {:?} from {}", relative, revision.trim());
        Ok(())
    }
}
